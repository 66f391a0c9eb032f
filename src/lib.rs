//! `mzchrom` is a library for representing and processing chromatograms,
//! the retention time dimension of a mass spectrometry experiment.
//!
//! The central type is [`Chromatogram`], an ordered sequence of
//! (time, intensity) peaks that carries named per-peak metadata arrays in
//! lockstep, along with acquisition settings and a cached signal-range
//! summary. Sorting, nearest-peak lookup, retention time range queries, and
//! a fuzzy-tolerance merge of two chromatograms all maintain the index
//! correspondence between peaks and their metadata.
//!
//! The [`crate::smooth`] sub-module provides moving-average and
//! Savitzky-Golay smoothing for chromatographic signal.
//!
//! # Usage
//! ```
//! use mzchrom::{Chromatogram, MERGED_CHROMATOGRAM_MZS};
//!
//! let mut xic = Chromatogram::from_arrays(&[12.1, 11.9, 12.0], &[350.0, 150.0, 900.0]);
//! xic.sort_by_position();
//! assert!(xic.is_sorted());
//!
//! let apex = xic.find_nearest(11.99).unwrap();
//! assert_eq!(xic[apex].time, 12.0);
//!
//! let mut other = Chromatogram::from_arrays(&[12.0, 12.5], &[100.0, 80.0]);
//! other.settings_mut().product.mz = 633.27;
//! xic.merge_peaks(&other, true);
//! assert_eq!(xic.len(), 4);
//! assert_eq!(xic[1].intensity, 1000.0);
//!
//! let merged_from = xic
//!     .meta_value(MERGED_CHROMATOGRAM_MZS)
//!     .and_then(|v| v.as_float_list())
//!     .unwrap();
//! assert_eq!(merged_from, &[633.27]);
//! ```
pub mod arrays;
pub mod chromatogram;
pub mod merge;
pub mod peak;
pub mod prelude;
pub mod ranges;
pub mod search;
pub mod settings;
pub mod smooth;

#[cfg(test)]
mod test_data;

pub use crate::chromatogram::{Chromatogram, ChromatogramError};
pub use crate::merge::{sum_similar_union, MERGE_RESOLUTION};
pub use crate::peak::ChromatogramPeak;
pub use crate::ranges::SignalRanges;
pub use crate::settings::{ChromatogramSettings, ChromatogramType, MERGED_CHROMATOGRAM_MZS};

#[cfg(feature = "nalgebra")]
pub use crate::smooth::SavitzkyGolayFilter;
