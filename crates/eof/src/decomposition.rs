//! Ranked decomposition output.

use ndarray::{Array1, Array2};

use crate::error::EofError;

/// A single EOF mode.
#[derive(Debug, Clone)]
pub struct EofMode {
    pub(crate) correlation: Array1<f64>,
    pub(crate) pcs: Array1<f64>,
    pub(crate) variance_fraction: f64,
}

impl EofMode {
    /// Correlation of the mode's time coefficients with each space point,
    /// in [-1, 1]. Space points with zero variance yield NaN.
    pub fn correlation(&self) -> &Array1<f64> {
        &self.correlation
    }

    /// Time coefficients, scaled to unit variance.
    pub fn pcs(&self) -> &Array1<f64> {
        &self.pcs
    }

    /// Fraction of total variance explained by this mode, in [0, 1].
    pub fn variance_fraction(&self) -> f64 {
        self.variance_fraction
    }

    /// Reshapes the correlation map back to a `(lat, lon)` grid, longitude
    /// varying fastest, matching the flattening order of the input matrix.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::DimensionMismatch`] if `ny * nx` does not equal
    /// the number of space points.
    pub fn pattern_grid(&self, ny: usize, nx: usize) -> Result<Array2<f64>, EofError> {
        if ny * nx != self.correlation.len() {
            return Err(EofError::DimensionMismatch {
                name: "pattern grid".into(),
                expected: self.correlation.len(),
                got: ny * nx,
            });
        }
        Ok(Array2::from_shape_vec((ny, nx), self.correlation.to_vec())
            .expect("length checked above"))
    }
}

/// Modes ranked by descending explained variance.
#[derive(Debug, Clone)]
pub struct EofDecomposition {
    pub(crate) modes: Vec<EofMode>,
}

impl EofDecomposition {
    /// All computed modes, strongest first.
    pub fn modes(&self) -> &[EofMode] {
        &self.modes
    }

    /// Number of computed modes.
    pub fn n_modes(&self) -> usize {
        self.modes.len()
    }

    /// The mode at a zero-based rank.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::RankOutOfRange`] if fewer modes were computed.
    pub fn mode(&self, rank: usize) -> Result<&EofMode, EofError> {
        self.modes.get(rank).ok_or(EofError::RankOutOfRange {
            rank,
            available: self.modes.len(),
        })
    }

    /// Explained-variance fraction of each mode, strongest first.
    pub fn variance_fractions(&self) -> Vec<f64> {
        self.modes.iter().map(|m| m.variance_fraction).collect()
    }
}
