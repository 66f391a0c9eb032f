//! A sorted-union merge of two peak sequences with a fuzzy notion of
//! "the same retention time".

use log::debug;

use crate::peak::ChromatogramPeak;

/// The default time resolution for [`sum_similar_union`]: times equal after
/// rounding to 1/1000th of a unit (milliseconds, for times in seconds) are
/// treated as the same peak.
pub const MERGE_RESOLUTION: f64 = 1e3;

#[inline]
fn same_time(a: f64, b: f64, resolution: f64) -> bool {
    (a * resolution).round() == (b * resolution).round()
}

/// Merge two time-sorted peak slices into their sorted union, summing the
/// intensities of peaks whose times coincide at `resolution`.
///
/// When a pair coincides the output peak keeps `left`'s time. Both inputs
/// must be sorted ascending by time and contain no duplicate rounded times
/// of their own; the merge is not re-validated and unsorted input produces
/// an unsorted result.
pub fn sum_similar_union(
    left: &[ChromatogramPeak],
    right: &[ChromatogramPeak],
    resolution: f64,
) -> Vec<ChromatogramPeak> {
    let mut result = Vec::with_capacity(left.len() + right.len());
    let mut merged = 0usize;

    let mut first1 = left.iter().peekable();
    let mut first2 = right.iter().peekable();
    loop {
        let a = match first1.peek() {
            Some(a) => **a,
            None => {
                result.extend(first2.copied());
                break;
            }
        };
        let b = match first2.peek() {
            Some(b) => **b,
            None => {
                result.extend(first1.copied());
                break;
            }
        };

        if same_time(a.time, b.time, resolution) {
            result.push(ChromatogramPeak::new(a.time, a.intensity + b.intensity));
            merged += 1;
            first1.next();
            first2.next();
        } else if a.time < b.time {
            result.push(a);
            first1.next();
        } else {
            result.push(b);
            first2.next();
        }
    }

    if merged > 0 {
        debug!(
            "coalesced {merged} coinciding peaks while merging {} and {} peaks",
            left.len(),
            right.len()
        );
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;

    fn peaks(pairs: &[(f64, f32)]) -> Vec<ChromatogramPeak> {
        pairs.iter().map(|p| ChromatogramPeak::from(*p)).collect()
    }

    #[test]
    fn test_union_disjoint() {
        let left = peaks(&[(1.0, 10.0), (3.0, 30.0)]);
        let right = peaks(&[(2.0, 20.0), (4.0, 40.0)]);
        let merged = sum_similar_union(&left, &right, MERGE_RESOLUTION);
        assert_eq!(merged.len(), left.len() + right.len());
        let times: Vec<f64> = merged.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_union_fuzzy_equal() {
        // 1.0001 and 1.0004 both round to 1.000 at millisecond resolution
        let left = peaks(&[(1.0001, 5.0)]);
        let right = peaks(&[(1.0004, 3.0)]);
        let merged = sum_similar_union(&left, &right, MERGE_RESOLUTION);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].time, 1.0001);
        assert_eq!(merged[0].intensity, 8.0);
    }

    #[test]
    fn test_union_just_over_resolution() {
        // 1.0004 and 1.0006 round to different thousandths and stay apart
        let left = peaks(&[(1.0004, 5.0)]);
        let right = peaks(&[(1.0006, 3.0)]);
        let merged = sum_similar_union(&left, &right, MERGE_RESOLUTION);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_union_one_side_empty() {
        let left = peaks(&[(1.0, 10.0), (2.0, 20.0)]);
        let merged = sum_similar_union(&left, &[], MERGE_RESOLUTION);
        assert_eq!(merged, left);
        let merged = sum_similar_union(&[], &left, MERGE_RESOLUTION);
        assert_eq!(merged, left);
    }

    #[test]
    fn test_union_interleaved_with_overlap() {
        let left = peaks(&[(1.0, 1.0), (2.0, 2.0), (4.0, 4.0)]);
        let right = peaks(&[(2.0, 20.0), (3.0, 30.0), (5.0, 50.0)]);
        let merged = sum_similar_union(&left, &right, MERGE_RESOLUTION);
        let expected = peaks(&[(1.0, 1.0), (2.0, 22.0), (3.0, 30.0), (4.0, 4.0), (5.0, 50.0)]);
        assert_eq!(merged, expected);
    }
}
