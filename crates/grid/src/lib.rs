//! # boreas-grid
//!
//! Data model for gridded climate fields: a 3-D `(time, latitude,
//! longitude)` array with coordinate axes, longitude normalization to the
//! [0, 360) convention, physical-range masking, and rectangular domain
//! selection.

mod domain;
mod error;
mod field;

pub use domain::Domain;
pub use error::GridError;
pub use field::GriddedField;
