//! Climatology removal.

use ndarray::{Array2, Array3};
use tracing::debug;

use crate::annual::AnnualField;
use crate::config::MissingPolicy;
use crate::error::AnomalyError;

/// Per-cell mean of the annual aggregate across years, skipping missing
/// years (lenient aggregation).
///
/// A cell with no finite years yields NaN; what happens to it downstream is
/// decided by the [`MissingPolicy`] passed to [`anomalies`].
pub fn climatology(annual: &AnnualField) -> Array2<f64> {
    let (nt, ny, nx) = annual.data().dim();

    Array2::from_shape_fn((ny, nx), |(y, x)| {
        let mut sum = 0.0;
        let mut count = 0usize;
        for t in 0..nt {
            let v = annual.data()[[t, y, x]];
            if v.is_finite() {
                sum += v;
                count += 1;
            }
        }
        if count > 0 {
            sum / count as f64
        } else {
            f64::NAN
        }
    })
}

/// Annual aggregate minus climatology, with the missing-value policy
/// applied to non-finite results.
///
/// # Errors
///
/// Returns [`AnomalyError::DimensionMismatch`] if the climatology shape
/// does not match the field, and [`AnomalyError::MissingData`] when the
/// policy is [`MissingPolicy::Propagate`] and non-finite anomalies remain.
pub fn anomalies(
    annual: &AnnualField,
    clim: &Array2<f64>,
    policy: MissingPolicy,
) -> Result<Array3<f64>, AnomalyError> {
    let (nt, ny, nx) = annual.data().dim();
    if clim.dim() != (ny, nx) {
        return Err(AnomalyError::DimensionMismatch {
            name: "climatology".into(),
            expected: ny * nx,
            got: clim.len(),
        });
    }

    let mut anom = Array3::zeros((nt, ny, nx));
    let mut n_missing = 0usize;
    for t in 0..nt {
        for y in 0..ny {
            for x in 0..nx {
                let v = annual.data()[[t, y, x]] - clim[[y, x]];
                anom[[t, y, x]] = if v.is_finite() {
                    v
                } else {
                    n_missing += 1;
                    match policy {
                        MissingPolicy::ZeroFill => 0.0,
                        MissingPolicy::Propagate => f64::NAN,
                    }
                };
            }
        }
    }

    if n_missing > 0 {
        debug!(n_missing, ?policy, "non-finite anomaly cells");
        if policy == MissingPolicy::Propagate {
            return Err(AnomalyError::MissingData { n_cells: n_missing });
        }
    }

    Ok(anom)
}
