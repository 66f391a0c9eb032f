//! Descriptive metadata attached to a chromatogram: how it was acquired,
//! which ions it tracks, and a free-form key-value parameter store.

use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The metadata key under which [`crate::Chromatogram::merge_peaks`] records
/// the product m/z values of the chromatograms merged into this one.
pub const MERGED_CHROMATOGRAM_MZS: &str = "merged_chromatogram_mzs";

/// The kind of signal a chromatogram traces over time
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChromatogramType {
    #[default]
    MassChromatogram,
    TotalIonCurrent,
    SelectedIonCurrent,
    BasePeak,
    SelectedIonMonitoring,
    SelectedReactionMonitoring,
    ElectromagneticRadiation,
    Absorption,
    Emission,
}

/// An ion selection window, the m/z the instrument centered on and the
/// half-open offsets around it
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IonWindow {
    pub mz: f64,
    pub window_lower: f64,
    pub window_upper: f64,
}

impl IonWindow {
    pub fn new(mz: f64, window_lower: f64, window_upper: f64) -> Self {
        Self {
            mz,
            window_lower,
            window_upper,
        }
    }
}

impl From<f64> for IonWindow {
    fn from(mz: f64) -> Self {
        Self::new(mz, 0.0, 0.0)
    }
}

/// A value in a [`MetaMap`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    Boolean(bool),
    Int(i64),
    Float(f64),
    Str(String),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
    StrList(Vec<String>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            Self::IntList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float_list(&self) -> Option<&[f64]> {
        match self {
            Self::FloatList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            Self::StrList(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::IntList(v) => write!(f, "{v:?}"),
            Self::FloatList(v) => write!(f, "{v:?}"),
            Self::StrList(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Self::IntList(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Self::FloatList(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::StrList(value)
    }
}

/// A free-form key-value parameter store
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetaMap(HashMap<String, Value>);

impl MetaMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

/// The acquisition metadata of a chromatogram, held by the container as a
/// plain field rather than through inheritance.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChromatogramSettings {
    /// The identifier the source assigned this chromatogram
    pub native_id: String,
    pub chromatogram_type: ChromatogramType,
    /// The ion selected for fragmentation, if any
    pub precursor: IonWindow,
    /// The ion monitored over time. Its m/z is the chromatogram's
    /// characteristic m/z.
    pub product: IonWindow,
    pub params: MetaMap,
}

impl ChromatogramSettings {
    pub fn new(native_id: impl Into<String>, chromatogram_type: ChromatogramType) -> Self {
        Self {
            native_id: native_id.into(),
            chromatogram_type,
            ..Default::default()
        }
    }

    /// The characteristic m/z of the signal being traced
    #[inline]
    pub fn mz(&self) -> f64 {
        self.product.mz
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_meta_map() {
        let mut params = MetaMap::new();
        assert!(!params.contains("ms_level"));
        params.set("ms_level", 2i64);
        params.set("filter_string", "FTMS + c NSI Full ms2");
        assert!(params.contains("ms_level"));
        assert_eq!(params.get("ms_level").and_then(Value::as_int), Some(2));
        assert_eq!(params.len(), 2);
        params.remove("ms_level");
        assert!(!params.contains("ms_level"));
    }

    #[test]
    fn test_value_accessors() {
        let val = Value::from(vec![412.18, 633.27]);
        assert_eq!(val.as_float_list(), Some([412.18, 633.27].as_slice()));
        assert_eq!(val.as_float(), None);
        assert_eq!(Value::from(5.0).as_float(), Some(5.0));
    }

    #[test]
    fn test_settings_mz() {
        let mut settings = ChromatogramSettings::new(
            "SRM SIC Q1=412 Q3=633",
            ChromatogramType::SelectedReactionMonitoring,
        );
        settings.precursor = IonWindow::from(412.18);
        settings.product = IonWindow::new(633.27, 0.5, 0.5);
        assert_eq!(settings.mz(), 633.27);
    }
}
