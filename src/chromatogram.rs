//! The chromatogram container, an ordered peak sequence with index-aligned
//! metadata arrays.

use std::ops::{Index, IndexMut, Range};
use std::slice::{Iter, IterMut};

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arrays::{FloatDataArray, IntegerDataArray, StringDataArray};
use crate::merge::{sum_similar_union, MERGE_RESOLUTION};
use crate::peak::ChromatogramPeak;
use crate::ranges::SignalRanges;
use crate::search;
use crate::settings::{ChromatogramSettings, Value, MERGED_CHROMATOGRAM_MZS};

/// All the ways a chromatogram query can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChromatogramError {
    #[error("there must be at least one peak to determine the nearest peak")]
    EmptyChromatogram,
}

/// A sequence of [`ChromatogramPeak`] entries over retention time, carrying
/// per-peak metadata arrays and acquisition settings.
///
/// The peak sequence is kept in whatever order the caller established;
/// [`Chromatogram::sort_by_position`] puts it in ascending time order, which
/// the search operations ([`Chromatogram::find_nearest`],
/// [`Chromatogram::rt_begin`], [`Chromatogram::rt_end`],
/// [`Chromatogram::merge_peaks`]) require. Every sorting operation applies
/// the same permutation to each non-empty metadata array, so element `i` of
/// an array always describes peak `i`.
///
/// Equality compares peaks, metadata arrays, settings, and the cached signal
/// ranges. The name is deliberately excluded.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chromatogram {
    peaks: Vec<ChromatogramPeak>,
    name: String,
    settings: ChromatogramSettings,
    ranges: SignalRanges,
    float_arrays: Vec<FloatDataArray>,
    string_arrays: Vec<StringDataArray>,
    integer_arrays: Vec<IntegerDataArray>,
}

impl PartialEq for Chromatogram {
    fn eq(&self, other: &Self) -> bool {
        // the name may differ between otherwise identical chromatograms
        self.peaks == other.peaks
            && self.settings == other.settings
            && self.ranges == other.ranges
            && self.float_arrays == other.float_arrays
            && self.string_arrays == other.string_arrays
            && self.integer_arrays == other.integer_arrays
    }
}

impl Chromatogram {
    pub fn new(peaks: Vec<ChromatogramPeak>, settings: ChromatogramSettings) -> Self {
        Self {
            peaks,
            settings,
            ..Default::default()
        }
    }

    pub fn from_peaks(peaks: Vec<ChromatogramPeak>) -> Self {
        Self {
            peaks,
            ..Default::default()
        }
    }

    /// Build a chromatogram from parallel time and intensity arrays,
    /// truncating to the shorter of the two.
    pub fn from_arrays(time_array: &[f64], intensity_array: &[f32]) -> Self {
        let peaks = time_array
            .iter()
            .zip(intensity_array.iter())
            .map(|(t, i)| ChromatogramPeak::new(*t, *i))
            .collect();
        Self::from_peaks(peaks)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, ChromatogramPeak> {
        self.peaks.iter()
    }

    /// Mutable access to the peaks. Re-sort afterwards if the times were
    /// changed out of order.
    pub fn iter_mut(&mut self) -> IterMut<'_, ChromatogramPeak> {
        self.peaks.iter_mut()
    }

    pub fn peaks(&self) -> &[ChromatogramPeak] {
        &self.peaks
    }

    pub fn get(&self, index: usize) -> Option<&ChromatogramPeak> {
        self.peaks.get(index)
    }

    pub fn first(&self) -> Option<&ChromatogramPeak> {
        self.peaks.first()
    }

    pub fn last(&self) -> Option<&ChromatogramPeak> {
        self.peaks.last()
    }

    pub fn push<P: Into<ChromatogramPeak>>(&mut self, peak: P) {
        self.peaks.push(peak.into())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into()
    }

    pub fn settings(&self) -> &ChromatogramSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ChromatogramSettings {
        &mut self.settings
    }

    /// The characteristic m/z of this chromatogram, the product ion's m/z
    #[inline]
    pub fn mz(&self) -> f64 {
        self.settings.mz()
    }

    pub fn float_arrays(&self) -> &[FloatDataArray] {
        &self.float_arrays
    }

    pub fn float_arrays_mut(&mut self) -> &mut Vec<FloatDataArray> {
        &mut self.float_arrays
    }

    pub fn string_arrays(&self) -> &[StringDataArray] {
        &self.string_arrays
    }

    pub fn string_arrays_mut(&mut self) -> &mut Vec<StringDataArray> {
        &mut self.string_arrays
    }

    pub fn integer_arrays(&self) -> &[IntegerDataArray] {
        &self.integer_arrays
    }

    pub fn integer_arrays_mut(&mut self) -> &mut Vec<IntegerDataArray> {
        &mut self.integer_arrays
    }

    pub fn meta_value(&self, key: &str) -> Option<&Value> {
        self.settings.params.get(key)
    }

    pub fn set_meta_value<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.settings.params.set(key, value)
    }

    pub fn has_meta_value(&self, key: &str) -> bool {
        self.settings.params.contains(key)
    }

    /// The cached time and intensity extrema. Stale until
    /// [`Chromatogram::update_ranges`] is called.
    pub fn ranges(&self) -> &SignalRanges {
        &self.ranges
    }

    pub fn update_ranges(&mut self) {
        self.ranges.update(&self.peaks)
    }

    fn has_auxiliary_arrays(&self) -> bool {
        !(self.float_arrays.is_empty()
            && self.string_arrays.is_empty()
            && self.integer_arrays.is_empty())
    }

    /// Gather the peaks and every non-empty metadata array into the order
    /// given by `order`
    fn apply_permutation(&mut self, order: &[usize]) {
        let mut gathered = Vec::with_capacity(self.peaks.len());
        for &i in order {
            gathered.push(self.peaks[i]);
        }
        self.peaks = gathered;

        for array in self.float_arrays.iter_mut() {
            array.reorder(order);
        }
        for array in self.string_arrays.iter_mut() {
            array.reorder(order);
        }
        for array in self.integer_arrays.iter_mut() {
            array.reorder(order);
        }
    }

    /// Sort the peaks by intensity, ascending unless `reverse`.
    ///
    /// Ties keep their original relative order in either direction. When any
    /// metadata array is populated, the sort permutation is applied to it as
    /// well.
    pub fn sort_by_intensity(&mut self, reverse: bool) {
        if !self.has_auxiliary_arrays() {
            if reverse {
                self.peaks
                    .sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
            } else {
                self.peaks
                    .sort_by(|a, b| a.intensity.total_cmp(&b.intensity));
            }
            return;
        }

        let mut order: Vec<usize> = (0..self.peaks.len()).collect();
        if reverse {
            order.sort_by(|&i, &j| {
                self.peaks[j]
                    .intensity
                    .total_cmp(&self.peaks[i].intensity)
            });
        } else {
            order.sort_by(|&i, &j| {
                self.peaks[i]
                    .intensity
                    .total_cmp(&self.peaks[j].intensity)
            });
        }
        self.apply_permutation(&order);
    }

    /// Sort the peaks ascending by retention time, carrying every populated
    /// metadata array along.
    pub fn sort_by_position(&mut self) {
        if !self.has_auxiliary_arrays() {
            self.peaks.sort_by(|a, b| a.time.total_cmp(&b.time));
            return;
        }

        let mut order: Vec<usize> = (0..self.peaks.len()).collect();
        order.sort_by(|&i, &j| self.peaks[i].time.total_cmp(&self.peaks[j].time));
        self.apply_permutation(&order);
    }

    /// Whether the peaks are in ascending time order
    pub fn is_sorted(&self) -> bool {
        self.peaks.windows(2).all(|w| w[0].time <= w[1].time)
    }

    /// Find the index of the peak closest in time to `rt`.
    ///
    /// The peaks must already be sorted by time. When `rt` falls exactly
    /// between two peaks the later one is returned.
    pub fn find_nearest(&self, rt: f64) -> Result<usize, ChromatogramError> {
        debug_assert!(
            self.is_sorted(),
            "find_nearest requires a time-sorted chromatogram"
        );
        search::nearest_by_time(&self.peaks, rt).ok_or(ChromatogramError::EmptyChromatogram)
    }

    /// The first index with retention time `>= rt`
    pub fn rt_begin(&self, rt: f64) -> usize {
        search::lower_bound_by_time(&self.peaks, rt)
    }

    /// The first index with retention time `> rt`
    pub fn rt_end(&self, rt: f64) -> usize {
        search::upper_bound_by_time(&self.peaks, rt)
    }

    /// [`Chromatogram::rt_begin`] restricted to an index range
    pub fn rt_begin_within(&self, rt: f64, range: Range<usize>) -> usize {
        search::lower_bound_by_time_within(&self.peaks, rt, range)
    }

    /// [`Chromatogram::rt_end`] restricted to an index range
    pub fn rt_end_within(&self, rt: f64, range: Range<usize>) -> usize {
        search::upper_bound_by_time_within(&self.peaks, rt, range)
    }

    /// The peaks eluting between `lo` and `hi` inclusive. Requires the
    /// peaks to be sorted by time.
    pub fn between(&self, lo: f64, hi: f64) -> &[ChromatogramPeak] {
        let start = self.rt_begin(lo);
        let end = self.rt_end_within(hi, start..self.len());
        &self.peaks[start..end]
    }

    /// Merge `other`'s peaks into this chromatogram, producing the sorted
    /// union of both with intensities summed wherever two peaks coincide at
    /// millisecond resolution.
    ///
    /// Both chromatograms must already be sorted by time, and each must have
    /// distinct rounded times of its own, though the two may share times
    /// with one another. Metadata arrays are not merged or re-indexed; only
    /// the peak sequence is rebuilt. When `add_meta` is set, `other`'s
    /// characteristic m/z is appended to the
    /// [`MERGED_CHROMATOGRAM_MZS`] parameter list, creating it if absent.
    pub fn merge_peaks(&mut self, other: &Chromatogram, add_meta: bool) {
        debug_assert!(
            self.is_sorted() && other.is_sorted(),
            "merge_peaks requires both chromatograms to be time-sorted"
        );
        self.peaks = sum_similar_union(&self.peaks, &other.peaks, MERGE_RESOLUTION);

        if add_meta {
            let mut mzs = self
                .meta_value(MERGED_CHROMATOGRAM_MZS)
                .and_then(Value::as_float_list)
                .map(|ls| ls.to_vec())
                .unwrap_or_default();
            mzs.push(other.mz());
            self.set_meta_value(MERGED_CHROMATOGRAM_MZS, mzs);
        }
    }

    /// Drop all peaks. When `clear_meta_data` is set, the settings, name,
    /// cached ranges, and every metadata array are wiped as well.
    pub fn clear(&mut self, clear_meta_data: bool) {
        self.peaks.clear();

        if clear_meta_data {
            self.ranges.clear();
            self.settings = ChromatogramSettings::default();
            self.name.clear();
            self.float_arrays.clear();
            self.string_arrays.clear();
            self.integer_arrays.clear();
        }
    }
}

impl Index<usize> for Chromatogram {
    type Output = ChromatogramPeak;

    fn index(&self, index: usize) -> &Self::Output {
        &self.peaks[index]
    }
}

impl IndexMut<usize> for Chromatogram {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.peaks[index]
    }
}

impl<'a> IntoIterator for &'a Chromatogram {
    type Item = &'a ChromatogramPeak;
    type IntoIter = Iter<'a, ChromatogramPeak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}

impl IntoIterator for Chromatogram {
    type Item = ChromatogramPeak;
    type IntoIter = std::vec::IntoIter<ChromatogramPeak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.into_iter()
    }
}

impl FromIterator<ChromatogramPeak> for Chromatogram {
    fn from_iter<I: IntoIterator<Item = ChromatogramPeak>>(iter: I) -> Self {
        Self::from_peaks(iter.into_iter().collect())
    }
}

impl Extend<ChromatogramPeak> for Chromatogram {
    fn extend<I: IntoIterator<Item = ChromatogramPeak>>(&mut self, iter: I) {
        self.peaks.extend(iter)
    }
}
