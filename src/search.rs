//! Binary search helpers over time-ordered peak slices.
//!
//! All of these require their input to be sorted ascending by time
//! coordinate; on unsorted input they return an arbitrary in-bounds index.

use std::ops::Range;

use mzpeaks::coordinate::{CoordinateLike, Time};

/// Find the first index whose time coordinate is `>= rt`, or `peaks.len()`
/// if every peak elutes earlier.
pub fn lower_bound_by_time<T: CoordinateLike<Time>>(peaks: &[T], rt: f64) -> usize {
    peaks.partition_point(|p| Time::coordinate(p) < rt)
}

/// Find the first index whose time coordinate is `> rt`, or `peaks.len()`
/// if no peak elutes later.
pub fn upper_bound_by_time<T: CoordinateLike<Time>>(peaks: &[T], rt: f64) -> usize {
    peaks.partition_point(|p| Time::coordinate(p) <= rt)
}

/// [`lower_bound_by_time`] restricted to `range`, returning an index into
/// the full slice.
pub fn lower_bound_by_time_within<T: CoordinateLike<Time>>(
    peaks: &[T],
    rt: f64,
    range: Range<usize>,
) -> usize {
    range.start + lower_bound_by_time(&peaks[range.clone()], rt)
}

/// [`upper_bound_by_time`] restricted to `range`, returning an index into
/// the full slice.
pub fn upper_bound_by_time_within<T: CoordinateLike<Time>>(
    peaks: &[T],
    rt: f64,
    range: Range<usize>,
) -> usize {
    range.start + upper_bound_by_time(&peaks[range.clone()], rt)
}

/// Find the index of the peak closest in time to `rt`, or `None` on an
/// empty slice.
///
/// When the target falls exactly between two peaks, the peak at-or-after it
/// wins; the earlier peak is chosen only when it is strictly closer.
pub fn nearest_by_time<T: CoordinateLike<Time>>(peaks: &[T], rt: f64) -> Option<usize> {
    if peaks.is_empty() {
        return None;
    }
    let i = lower_bound_by_time(peaks, rt);
    if i == 0 {
        return Some(0);
    }
    if i == peaks.len() {
        return Some(peaks.len() - 1);
    }
    let before = Time::coordinate(&peaks[i - 1]);
    let after = Time::coordinate(&peaks[i]);
    if (before - rt).abs() < (after - rt).abs() {
        Some(i - 1)
    } else {
        Some(i)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::peak::ChromatogramPeak;
    use rstest::rstest;

    fn peaks_at(times: &[f64]) -> Vec<ChromatogramPeak> {
        times
            .iter()
            .map(|t| ChromatogramPeak::new(*t, 1.0))
            .collect()
    }

    #[test]
    fn test_bounds() {
        let peaks = peaks_at(&[1.0, 2.0, 2.0, 3.0, 5.0]);
        assert_eq!(lower_bound_by_time(&peaks, 2.0), 1);
        assert_eq!(upper_bound_by_time(&peaks, 2.0), 3);
        assert_eq!(lower_bound_by_time(&peaks, 0.0), 0);
        assert_eq!(lower_bound_by_time(&peaks, 6.0), peaks.len());
        assert_eq!(upper_bound_by_time(&peaks, 5.0), peaks.len());
        assert_eq!(upper_bound_by_time(&peaks, 0.5), 0);
    }

    #[test]
    fn test_bounds_within() {
        let peaks = peaks_at(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(lower_bound_by_time_within(&peaks, 0.0, 2..5), 2);
        assert_eq!(lower_bound_by_time_within(&peaks, 4.5, 2..5), 4);
        assert_eq!(upper_bound_by_time_within(&peaks, 3.0, 2..5), 3);
        assert_eq!(upper_bound_by_time_within(&peaks, 9.0, 2..5), 5);
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(6.0, 2)]
    #[case(2.9, 1)]
    // equidistant between the first two peaks, the later one wins
    #[case(2.0, 1)]
    #[case(3.0, 1)]
    #[case(4.9, 2)]
    fn test_nearest(#[case] rt: f64, #[case] expected: usize) {
        let peaks = peaks_at(&[1.0, 3.0, 5.0]);
        assert_eq!(nearest_by_time(&peaks, rt), Some(expected));
    }

    #[test]
    fn test_nearest_empty() {
        let peaks: Vec<ChromatogramPeak> = Vec::new();
        assert_eq!(nearest_by_time(&peaks, 1.0), None);
    }
}
