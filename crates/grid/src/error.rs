//! Error types for boreas-grid.

/// Error type for all fallible operations in the boreas-grid crate.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Returned when an axis length does not match the data shape.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a domain selection retains no points along an axis.
    #[error("empty selection: no {name} points inside the requested bounds")]
    EmptySelection {
        /// Name of the axis that came up empty.
        name: String,
    },

    /// Returned when a bound pair is inverted.
    #[error("invalid {name} bounds: min {min} exceeds max {max}")]
    InvalidBounds {
        /// Name of the bounded quantity.
        name: String,
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },

    /// Returned when a date range is inverted.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start of the range as given.
        start: chrono::NaiveDate,
        /// End of the range as given.
        end: chrono::NaiveDate,
    },

    /// Returned when the time axis is not sorted ascending.
    #[error("time axis not monotonic at index {index}")]
    UnsortedTimeAxis {
        /// First offending index.
        index: usize,
    },
}
