//! Latitude weighting and weighted spatial-mean removal.

use ndarray::{Array1, Array2, Array3};

/// Per-latitude weight `sqrt(cos(lat))`, latitude in degrees.
///
/// Weights are non-negative and depend only on latitude; cosine is floored
/// at zero so rounding at the poles cannot produce a NaN weight.
pub fn latitude_weights(lats: &[f64]) -> Array1<f64> {
    lats.iter()
        .map(|lat| lat.to_radians().cos().max(0.0).sqrt())
        .collect()
}

/// Latitude weights broadcast across longitude into a `(lat, lon)` grid.
pub fn weight_grid(lats: &[f64], n_lon: usize) -> Array2<f64> {
    let w = latitude_weights(lats);
    Array2::from_shape_fn((lats.len(), n_lon), |(y, _)| w[y])
}

/// Removes the weighted spatial mean from each time slab in place.
///
/// The mean of a slab is `sum(anomaly * weight)` over space divided by
/// `sum(weights) * n_lon`, where `sum(weights)` runs over the full
/// `(lat, lon)` weight grid. The denominator reproduces the source
/// analysis exactly.
///
/// Returns the mean removed from each slab.
pub fn remove_weighted_mean(anom: &mut Array3<f64>, weights: &Array2<f64>) -> Vec<f64> {
    let (nt, ny, nx) = anom.dim();
    let w_total: f64 = weights.sum();
    let denom = w_total * nx as f64;

    let mut removed = Vec::with_capacity(nt);
    for t in 0..nt {
        let mut weighted_sum = 0.0;
        for y in 0..ny {
            for x in 0..nx {
                weighted_sum += anom[[t, y, x]] * weights[[y, x]];
            }
        }
        let mean = if denom > 0.0 { weighted_sum / denom } else { 0.0 };
        for y in 0..ny {
            for x in 0..nx {
                anom[[t, y, x]] -= mean;
            }
        }
        removed.push(mean);
    }

    removed
}
