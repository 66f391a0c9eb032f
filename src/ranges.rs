//! A cached summary of the coordinate extrema covered by a peak sequence.

use mzpeaks::coordinate::{CoordinateRange, Time};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::peak::ChromatogramPeak;

/// The time and intensity extrema of a chromatogram, recomputed on demand
/// with [`SignalRanges::update`] and reset by [`SignalRanges::clear`].
///
/// `None` fields mean the summary has not been computed, or the peak
/// sequence was empty when it was.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalRanges {
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub min_intensity: Option<f32>,
    pub max_intensity: Option<f32>,
}

impl SignalRanges {
    pub fn from_peaks(peaks: &[ChromatogramPeak]) -> Self {
        let mut inst = Self::default();
        inst.update(peaks);
        inst
    }

    /// Recompute the extrema from `peaks`. The peaks need not be sorted.
    pub fn update(&mut self, peaks: &[ChromatogramPeak]) {
        self.clear();
        for peak in peaks {
            self.start_time = Some(match self.start_time {
                Some(t) => t.min(peak.time),
                None => peak.time,
            });
            self.end_time = Some(match self.end_time {
                Some(t) => t.max(peak.time),
                None => peak.time,
            });
            self.min_intensity = Some(match self.min_intensity {
                Some(i) => i.min(peak.intensity),
                None => peak.intensity,
            });
            self.max_intensity = Some(match self.max_intensity {
                Some(i) => i.max(peak.intensity),
                None => peak.intensity,
            });
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_set(&self) -> bool {
        self.start_time.is_some()
    }

    /// The covered time span as an `mzpeaks` coordinate range
    pub fn time_range(&self) -> CoordinateRange<Time> {
        CoordinateRange::new(self.start_time, self.end_time)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_update() {
        let peaks = [
            ChromatogramPeak::new(5.0, 20.0),
            ChromatogramPeak::new(1.0, 350.0),
            ChromatogramPeak::new(3.0, 4.0),
        ];
        let mut ranges = SignalRanges::default();
        assert!(!ranges.is_set());
        ranges.update(&peaks);
        assert!(ranges.is_set());
        assert_eq!(ranges.start_time, Some(1.0));
        assert_eq!(ranges.end_time, Some(5.0));
        assert_eq!(ranges.min_intensity, Some(4.0));
        assert_eq!(ranges.max_intensity, Some(350.0));

        let span = ranges.time_range();
        assert!(span.contains(&ChromatogramPeak::new(3.0, 0.0)));
        assert!(!span.contains(&ChromatogramPeak::new(5.5, 0.0)));

        ranges.clear();
        assert!(!ranges.is_set());
    }

    #[test]
    fn test_update_empty() {
        let ranges = SignalRanges::from_peaks(&[]);
        assert!(!ranges.is_set());
        assert_eq!(ranges.end_time, None);
    }
}
