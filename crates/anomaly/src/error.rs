//! Error types for boreas-anomaly.

/// Error type for all fallible operations in the boreas-anomaly crate.
#[derive(Debug, thiserror::Error)]
pub enum AnomalyError {
    /// Returned when a field has no time steps to aggregate.
    #[error("empty field: no {name} available for aggregation")]
    EmptyField {
        /// Name of the missing axis or quantity.
        name: String,
    },

    /// Returned under [`MissingPolicy::Propagate`](crate::MissingPolicy)
    /// when non-finite anomalies remain after climatology removal.
    #[error("{n_cells} cell-year(s) have missing anomalies under the propagate policy")]
    MissingData {
        /// Number of non-finite cell-years encountered.
        n_cells: usize,
    },

    /// Returned when an array shape does not match its coordinate axes.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },
}
