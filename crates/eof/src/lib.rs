//! # boreas-eof
//!
//! Empirical Orthogonal Function decomposition of a `(time x space)` data
//! matrix with per-space-point weights.
//!
//! The solver multiplies each column by its weight, removes each column's
//! temporal mean, forms the temporal covariance `D * D^T`, and extracts the
//! leading eigenpairs by power iteration with deflation. The covariance is
//! `(n_times x n_times)`, which for annual climate series is small enough
//! that no external linear-algebra backend is needed.
//!
//! Each returned mode carries a correlation map (Pearson correlation of the
//! mode's time coefficients with every unweighted column), time
//! coefficients scaled to unit variance, and the fraction of total variance
//! the mode explains.

mod config;
mod decomposition;
mod error;
mod solver;

pub use config::EofConfig;
pub use decomposition::{EofDecomposition, EofMode};
pub use error::EofError;
pub use solver::EofSolver;
