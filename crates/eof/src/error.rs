//! Error types for boreas-eof.

/// Error type for all fallible operations in the boreas-eof crate.
#[derive(Debug, thiserror::Error)]
pub enum EofError {
    /// Returned when an input length does not match the data matrix.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when the data matrix contains non-finite values.
    #[error("data matrix contains {n_cells} non-finite value(s)")]
    NonFinite {
        /// Number of non-finite entries.
        n_cells: usize,
    },

    /// Returned when a weight is negative or non-finite.
    #[error("invalid weight {value} at space index {index}")]
    InvalidWeight {
        /// Offending space index.
        index: usize,
        /// The weight value.
        value: f64,
    },

    /// Returned when the matrix has fewer than two time steps.
    #[error("need at least 2 time steps for a decomposition, got {got}")]
    TooFewTimeSteps {
        /// Number of time steps supplied.
        got: usize,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when power iteration fails to converge for a mode.
    #[error("power iteration did not converge for mode {mode} after {iterations} iteration(s)")]
    NonConvergence {
        /// Zero-based mode rank that failed.
        mode: usize,
        /// Iteration budget that was exhausted.
        iterations: usize,
    },

    /// Returned when a requested mode rank exceeds the computed modes.
    #[error("mode rank {rank} out of range: {available} mode(s) available")]
    RankOutOfRange {
        /// Requested zero-based rank.
        rank: usize,
        /// Number of modes actually computed.
        available: usize,
    },
}
