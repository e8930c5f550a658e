//! # boreas-io
//!
//! Read a gridded sea-surface-temperature dataset from NetCDF into the
//! [`boreas_grid::GriddedField`] data model: CF-style 1-D coordinate axes,
//! a `days since` time axis, and `_FillValue`/`missing_value` substitution
//! with NaN.

mod error;
mod netcdf_read;
mod reader;

pub use error::IoError;
pub use reader::{DatasetConfig, read_dataset};
