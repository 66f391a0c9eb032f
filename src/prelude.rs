pub use crate::arrays::{DataArray, FloatDataArray, IntegerDataArray, StringDataArray};
pub use crate::chromatogram::{Chromatogram, ChromatogramError};
pub use crate::peak::ChromatogramPeak;
pub use crate::settings::{ChromatogramSettings, ChromatogramType, MetaMap, Value};

pub use mzpeaks::coordinate::{CoordinateLike, Time};
pub use mzpeaks::IntensityMeasurement;
