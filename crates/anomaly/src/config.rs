//! Anomaly configuration.

/// What to do with non-finite anomaly cells after climatology removal.
///
/// `ZeroFill` reproduces the source analysis: "no data" is treated as "no
/// anomaly", which biases sparse regions toward the domain mean but keeps
/// every cell in the decomposition. `Propagate` keeps missing values
/// missing and fails loudly before the decomposition instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Replace non-finite anomalies with exactly 0.0.
    #[default]
    ZeroFill,
    /// Keep non-finite anomalies and error out before the decomposition.
    Propagate,
}

/// Configuration for anomaly computation.
#[derive(Debug, Clone, Default)]
pub struct AnomalyConfig {
    /// Policy for non-finite anomaly cells.
    missing: MissingPolicy,
}

impl AnomalyConfig {
    /// Creates a configuration with the default zero-fill policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the missing-value policy.
    pub fn with_missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.missing = policy;
        self
    }

    /// The configured missing-value policy.
    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing
    }
}
