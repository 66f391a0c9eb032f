//! Named metadata arrays kept in lockstep with a chromatogram's peaks.
//!
//! A [`DataArray`] is either empty, meaning the quantity is not tracked, or
//! exactly as long as the owning peak sequence, with element `i` describing
//! peak `i`. Any permutation applied to the peaks must be applied to every
//! non-empty array as well, which [`crate::Chromatogram`]'s sorting
//! operations do automatically.

use std::ops::Index;
use std::slice::Iter;

use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named array of per-peak metadata values
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataArray<T> {
    pub name: String,
    pub data: Vec<T>,
}

/// Per-peak floating point metadata, e.g. peak width or mass accuracy
pub type FloatDataArray = DataArray<f32>;
/// Per-peak textual metadata, e.g. identification labels
pub type StringDataArray = DataArray<String>;
/// Per-peak integral metadata, e.g. charge states or flags
pub type IntegerDataArray = DataArray<i32>;

impl<T: Clone> DataArray<T> {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
        }
    }

    pub fn wrap<S: Into<String>>(name: S, data: Vec<T>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn push(&mut self, value: T) {
        self.data.push(value)
    }

    pub fn clear(&mut self) {
        self.data.clear()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Gather the array into the order given by `order`, where `order[j]` is
    /// the index the `j`-th element is drawn from.
    ///
    /// The pass is bounded by the array's own length so an array shorter than
    /// the peak sequence is never overrun; entries whose source index falls
    /// outside the array are dropped.
    pub(crate) fn reorder(&mut self, order: &[usize]) {
        if self.data.is_empty() {
            return;
        }
        if self.data.len() != order.len() {
            warn!(
                "data array {:?} has {} entries but the peak sequence has {}",
                self.name,
                self.data.len(),
                order.len()
            );
        }
        let gathered: Vec<T> = order
            .iter()
            .take(self.data.len())
            .filter_map(|&i| self.data.get(i).cloned())
            .collect();
        self.data = gathered;
    }
}

impl<T> Index<usize> for DataArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> Extend<T> for DataArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter)
    }
}

impl<'a, T> IntoIterator for &'a DataArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
