//! Reshaping into the (time x space) matrix consumed by the EOF solver.

use ndarray::{Array1, Array2, Array3};

/// Flattens the spatial dimensions into one combined axis with time
/// leading, longitude varying fastest.
pub fn to_time_space(anom: &Array3<f64>) -> Array2<f64> {
    let (nt, ny, nx) = anom.dim();
    let flat: Vec<f64> = anom.iter().copied().collect();
    Array2::from_shape_vec((nt, ny * nx), flat)
        .expect("row-major flatten preserves element count")
}

/// Flattens a `(lat, lon)` weight grid into per-space-point weights in the
/// same order as [`to_time_space`].
pub fn flatten_weights(weights: &Array2<f64>) -> Array1<f64> {
    Array1::from_iter(weights.iter().copied())
}
