use std::cmp::Ordering;
use std::fmt;

use mzpeaks::coordinate::{CoordinateLike, Time};
use mzpeaks::IntensityMeasurement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single chromatogram data point, a retention time paired with the
/// intensity recorded there.
///
/// Implements [`CoordinateLike<Time>`](mzpeaks::CoordinateLike) so it can be
/// used with the rest of the `mzpeaks` ecosystem. The primary ordering is by
/// time; [`crate::Chromatogram`] provides a secondary ordering by intensity
/// through its sorting operations.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChromatogramPeak {
    /// The retention time, conventionally in seconds
    pub time: f64,
    pub intensity: f32,
}

impl ChromatogramPeak {
    #[inline]
    pub fn new(time: f64, intensity: f32) -> Self {
        Self { time, intensity }
    }

    /// An alias for the `time` field under its domain name
    #[inline]
    pub fn retention_time(&self) -> f64 {
        self.time
    }
}

impl PartialOrd for ChromatogramPeak {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            self.time
                .total_cmp(&other.time)
                .then(self.intensity.total_cmp(&other.intensity)),
        )
    }
}

impl CoordinateLike<Time> for ChromatogramPeak {
    #[inline]
    fn coordinate(&self) -> f64 {
        self.time
    }
}

impl IntensityMeasurement for ChromatogramPeak {
    #[inline]
    fn intensity(&self) -> f32 {
        self.intensity
    }
}

impl From<(f64, f32)> for ChromatogramPeak {
    fn from((time, intensity): (f64, f32)) -> Self {
        Self::new(time, intensity)
    }
}

impl From<ChromatogramPeak> for (f64, f32) {
    fn from(peak: ChromatogramPeak) -> Self {
        (peak.time, peak.intensity)
    }
}

impl fmt::Display for ChromatogramPeak {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ChromatogramPeak({}, {})", self.time, self.intensity)
    }
}
