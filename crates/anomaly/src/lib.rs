//! # boreas-anomaly
//!
//! Turns a cleaned gridded field into the centered anomaly matrix consumed
//! by the EOF solver.
//!
//! # Pipeline
//!
//! ```text
//!  annual means (strict) -> climatology (lenient) -> anomaly + policy
//!      -> latitude weights -> weighted-mean removal -> (time x space)
//! ```
//!
//! Annual aggregation is strict: one missing observation invalidates the
//! whole cell-year. Climatology is lenient: missing years are skipped. What
//! happens to cells that end up non-finite is controlled by
//! [`MissingPolicy`].

mod annual;
mod climatology;
mod config;
mod error;
mod matrix;
mod weights;

pub use annual::{AnnualField, annual_mean};
pub use climatology::{anomalies, climatology};
pub use config::{AnomalyConfig, MissingPolicy};
pub use error::AnomalyError;
pub use matrix::{flatten_weights, to_time_space};
pub use weights::{latitude_weights, remove_weighted_mean, weight_grid};
