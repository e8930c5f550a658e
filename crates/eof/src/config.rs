//! Solver configuration.

use crate::error::EofError;

/// Configuration for the EOF solver.
#[derive(Debug, Clone)]
pub struct EofConfig {
    /// Number of leading modes to extract.
    n_modes: usize,
    /// Iteration budget per mode for power iteration.
    max_iterations: usize,
    /// Convergence tolerance on the squared change of the unit eigenvector
    /// between iterations.
    tolerance: f64,
}

impl Default for EofConfig {
    fn default() -> Self {
        Self {
            n_modes: 2,
            max_iterations: 1000,
            tolerance: 1e-12,
        }
    }
}

impl EofConfig {
    /// Creates a configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of leading modes to extract.
    pub fn with_n_modes(mut self, n: usize) -> Self {
        self.n_modes = n;
        self
    }

    /// Sets the per-mode iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Number of leading modes to extract.
    pub fn n_modes(&self) -> usize {
        self.n_modes
    }

    /// Per-mode iteration budget.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Convergence tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::InvalidConfig`] if a value is out of range.
    pub fn validate(&self) -> Result<(), EofError> {
        if self.n_modes == 0 {
            return Err(EofError::InvalidConfig {
                reason: "n_modes must be at least 1".into(),
            });
        }
        if self.max_iterations == 0 {
            return Err(EofError::InvalidConfig {
                reason: "max_iterations must be at least 1".into(),
            });
        }
        if !(self.tolerance > 0.0) {
            return Err(EofError::InvalidConfig {
                reason: format!("tolerance must be positive, got {}", self.tolerance),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = EofConfig::new();
        assert_eq!(cfg.n_modes(), 2);
        assert_eq!(cfg.max_iterations(), 1000);
        assert_eq!(cfg.tolerance(), 1e-12);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let cfg = EofConfig::new()
            .with_n_modes(4)
            .with_max_iterations(50)
            .with_tolerance(1e-9);
        assert_eq!(cfg.n_modes(), 4);
        assert_eq!(cfg.max_iterations(), 50);
        assert_eq!(cfg.tolerance(), 1e-9);
    }

    #[test]
    fn validate_rejects_zero_modes() {
        let err = EofConfig::new().with_n_modes(0).validate().unwrap_err();
        assert!(matches!(err, EofError::InvalidConfig { .. }));
    }

    #[test]
    fn validate_rejects_non_positive_tolerance() {
        let err = EofConfig::new().with_tolerance(0.0).validate().unwrap_err();
        assert!(matches!(err, EofError::InvalidConfig { .. }));
    }
}
