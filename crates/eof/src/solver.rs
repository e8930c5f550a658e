//! EOF solver: weighted covariance and power iteration with deflation.

use ndarray::{Array1, Array2};
use tracing::debug;

use crate::config::EofConfig;
use crate::decomposition::{EofDecomposition, EofMode};
use crate::error::EofError;

/// Relative threshold below which the residual covariance is treated as
/// fully deflated and the remaining eigenvalues as zero.
const RANK_EPS: f64 = 1e-12;

/// Solver for a `(time x space)` data matrix with per-space-point weights.
///
/// Construction validates the inputs, removes each column's temporal mean,
/// and applies the weights; [`EofSolver::solve`] performs the actual
/// decomposition.
#[derive(Debug, Clone)]
pub struct EofSolver {
    /// Column-centered data, unweighted. Correlation maps are computed
    /// against this matrix.
    centered: Array2<f64>,
    /// Column-centered data with each column multiplied by its weight.
    /// This is the matrix that gets decomposed.
    weighted: Array2<f64>,
}

impl EofSolver {
    /// Creates a solver after validating the matrix and weights.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::TooFewTimeSteps`] for fewer than two rows,
    /// [`EofError::DimensionMismatch`] when the weight length does not
    /// match the number of columns, [`EofError::NonFinite`] when the matrix
    /// contains NaN or infinities, and [`EofError::InvalidWeight`] for a
    /// negative or non-finite weight.
    pub fn new(data: Array2<f64>, weights: &Array1<f64>) -> Result<Self, EofError> {
        let (nt, ns) = data.dim();

        if nt < 2 {
            return Err(EofError::TooFewTimeSteps { got: nt });
        }
        if weights.len() != ns {
            return Err(EofError::DimensionMismatch {
                name: "weights".into(),
                expected: ns,
                got: weights.len(),
            });
        }

        let n_bad = data.iter().filter(|v| !v.is_finite()).count();
        if n_bad > 0 {
            return Err(EofError::NonFinite { n_cells: n_bad });
        }
        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(EofError::InvalidWeight { index, value });
        }

        let mut centered = data;
        for mut col in centered.columns_mut() {
            let mean = col.sum() / nt as f64;
            col.mapv_inplace(|v| v - mean);
        }

        let mut weighted = centered.clone();
        for (j, mut col) in weighted.columns_mut().into_iter().enumerate() {
            let w = weights[j];
            col.mapv_inplace(|v| v * w);
        }

        Ok(Self { centered, weighted })
    }

    /// Decomposes the matrix into its leading modes.
    ///
    /// At most `n_times` modes exist; a request for more is capped. Modes
    /// beyond the matrix rank come back with zero variance fraction, zero
    /// time coefficients, and an all-NaN correlation map.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::InvalidConfig`] for a bad configuration and
    /// [`EofError::NonConvergence`] when power iteration exhausts its
    /// budget on a mode.
    pub fn solve(&self, config: &EofConfig) -> Result<EofDecomposition, EofError> {
        config.validate()?;

        let (nt, ns) = self.weighted.dim();
        let n_modes = config.n_modes().min(nt);

        let cov = self.weighted.dot(&self.weighted.t());
        let total_variance = cov.diag().sum();

        let pairs = leading_eigenpairs(
            &cov,
            n_modes,
            config.max_iterations(),
            config.tolerance(),
        )?;

        let mut modes = Vec::with_capacity(pairs.len());
        for (rank, (lambda, u)) in pairs.into_iter().enumerate() {
            let mode = self.build_mode(lambda, u, total_variance, nt, ns);
            debug!(
                rank,
                variance_fraction = mode.variance_fraction,
                "mode extracted"
            );
            modes.push(mode);
        }

        Ok(EofDecomposition { modes })
    }

    /// Assembles one mode from an eigenpair of the temporal covariance.
    fn build_mode(
        &self,
        lambda: f64,
        u: Array1<f64>,
        total_variance: f64,
        nt: usize,
        ns: usize,
    ) -> EofMode {
        let sigma = lambda.sqrt();
        if sigma <= 0.0 || total_variance <= 0.0 {
            return EofMode {
                correlation: Array1::from_elem(ns, f64::NAN),
                pcs: Array1::zeros(nt),
                variance_fraction: 0.0,
            };
        }

        // Spatial loadings of the weighted matrix; only their dominant sign
        // matters, it pins the sign convention for the whole mode.
        let loadings = self.weighted.t().dot(&u) / sigma;
        let sign = dominant_sign(&loadings);

        // Eigenvectors of D*D^T are orthogonal to the ones vector because
        // the columns of D are centered, so the raw coefficients u * sigma
        // have zero mean and sample variance lambda / (nt - 1). Dividing by
        // its square root leaves unit variance.
        let scale = sign * ((nt - 1) as f64).sqrt();
        let pcs = u.mapv(|v| v * scale);

        let correlation = correlation_map(&pcs, &self.centered);

        EofMode {
            correlation,
            pcs,
            variance_fraction: lambda / total_variance,
        }
    }
}

/// Leading eigenpairs of a symmetric positive semi-definite matrix by
/// power iteration with deflation.
///
/// Once the residual trace falls below `RANK_EPS` of the original trace,
/// the remaining requested modes are returned as zero eigenpairs without
/// iterating.
fn leading_eigenpairs(
    cov: &Array2<f64>,
    n: usize,
    max_iter: usize,
    tol: f64,
) -> Result<Vec<(f64, Array1<f64>)>, EofError> {
    let dim = cov.nrows();
    let total = cov.diag().sum();

    let mut m = cov.clone();
    let mut pairs = Vec::with_capacity(n);

    for comp in 0..n {
        let residual = m.diag().sum();
        if total <= 0.0 || residual <= total * RANK_EPS {
            pairs.push((0.0, Array1::zeros(dim)));
            continue;
        }

        let mut v: Array1<f64> =
            Array1::from_shape_fn(dim, |i| 1.0 + ((i + comp) as f64 * 0.1).sin());
        normalize(&mut v);

        let mut converged = false;
        for _ in 0..max_iter {
            let mut w = m.dot(&v);
            if !normalize(&mut w) {
                break;
            }
            let diff: f64 = w
                .iter()
                .zip(v.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            v = w;
            if diff < tol {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(EofError::NonConvergence {
                mode: comp,
                iterations: max_iter,
            });
        }

        let lambda = v.dot(&m.dot(&v)).max(0.0);

        // Deflate: m -= lambda * v * v^T.
        for i in 0..dim {
            let vi = v[i];
            for j in 0..dim {
                m[[i, j]] -= lambda * vi * v[j];
            }
        }

        pairs.push((lambda, v));
    }

    Ok(pairs)
}

/// Scales a vector to unit length. Returns `false` when the norm is too
/// small to divide by, leaving the vector untouched.
fn normalize(v: &mut Array1<f64>) -> bool {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 1e-15 {
        v.mapv_inplace(|x| x / norm);
        true
    } else {
        false
    }
}

/// Sign of the largest-magnitude element, mapping zero to positive.
fn dominant_sign(v: &Array1<f64>) -> f64 {
    let dominant = v
        .iter()
        .copied()
        .max_by(|a, b| {
            a.abs()
                .partial_cmp(&b.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(0.0);
    if dominant < 0.0 { -1.0 } else { 1.0 }
}

/// Pearson correlation of `pcs` with every column of `data`.
///
/// Columns with zero variance (or a constant `pcs` series) yield NaN.
fn correlation_map(pcs: &Array1<f64>, data: &Array2<f64>) -> Array1<f64> {
    let n = pcs.len() as f64;
    let pc_mean = pcs.sum() / n;
    let pc_dev: Vec<f64> = pcs.iter().map(|p| p - pc_mean).collect();
    let pc_ss: f64 = pc_dev.iter().map(|d| d * d).sum();

    data.columns()
        .into_iter()
        .map(|col| {
            let col_mean = col.sum() / n;
            let mut sum_xy = 0.0;
            let mut sum_yy = 0.0;
            for (d, y) in pc_dev.iter().zip(col.iter()) {
                let dy = y - col_mean;
                sum_xy += d * dy;
                sum_yy += dy * dy;
            }
            let denom = (pc_ss * sum_yy).sqrt();
            if denom > 0.0 { sum_xy / denom } else { f64::NAN }
        })
        .collect()
}
