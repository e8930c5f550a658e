//! Gridded field container.

use std::cmp::Ordering;

use chrono::NaiveDate;
use ndarray::{Array3, Axis};

use crate::error::GridError;

/// A gridded climate field over `(time, latitude, longitude)`.
///
/// Values are in degrees Celsius with `f64::NAN` as the missing-value
/// marker. The time axis must be sorted ascending; the latitude axis is
/// kept in source order (HadISST-style files store it descending).
#[derive(Debug, Clone)]
pub struct GriddedField {
    /// Data in `(time, latitude, longitude)` order.
    data: Array3<f64>,
    /// Latitude of each row, degrees north.
    lats: Vec<f64>,
    /// Longitude of each column, degrees east.
    lons: Vec<f64>,
    /// Date of each time step.
    dates: Vec<NaiveDate>,
}

impl GriddedField {
    /// Creates a new `GriddedField` after validating axis lengths against
    /// the data shape and checking that the time axis is sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] when an axis length does not
    /// match the corresponding data dimension, or
    /// [`GridError::UnsortedTimeAxis`] when dates are not ascending.
    pub fn new(
        data: Array3<f64>,
        lats: Vec<f64>,
        lons: Vec<f64>,
        dates: Vec<NaiveDate>,
    ) -> Result<Self, GridError> {
        let (nt, ny, nx) = data.dim();

        if dates.len() != nt {
            return Err(GridError::DimensionMismatch {
                name: "time".into(),
                expected: nt,
                got: dates.len(),
            });
        }
        if lats.len() != ny {
            return Err(GridError::DimensionMismatch {
                name: "latitude".into(),
                expected: ny,
                got: lats.len(),
            });
        }
        if lons.len() != nx {
            return Err(GridError::DimensionMismatch {
                name: "longitude".into(),
                expected: nx,
                got: lons.len(),
            });
        }

        if let Some(index) = dates.windows(2).position(|w| w[0] > w[1]) {
            return Err(GridError::UnsortedTimeAxis { index });
        }

        Ok(Self {
            data,
            lats,
            lons,
            dates,
        })
    }

    /// Normalizes longitudes to [0, 360) and re-sorts the longitude axis
    /// ascending, permuting the data columns to match.
    ///
    /// A longitude of -170 maps to 190.
    pub fn normalize_longitudes(self) -> Self {
        let normed: Vec<f64> = self.lons.iter().map(|l| l.rem_euclid(360.0)).collect();

        let mut order: Vec<usize> = (0..normed.len()).collect();
        order.sort_by(|&a, &b| normed[a].partial_cmp(&normed[b]).unwrap_or(Ordering::Equal));

        let data = self.data.select(Axis(2), &order);
        let lons = order.iter().map(|&i| normed[i]).collect();

        Self {
            data,
            lats: self.lats,
            lons,
            dates: self.dates,
        }
    }

    /// Marks values outside `[min, max]` as missing.
    ///
    /// Out-of-range values are replaced with NaN, never clamped; in-range
    /// values pass through unchanged.
    pub fn mask_outside(&mut self, min: f64, max: f64) {
        self.data
            .mapv_inplace(|v| if v < min || v > max { f64::NAN } else { v });
    }

    /// Data in `(time, latitude, longitude)` order.
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Latitude of each row.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude of each column.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Date of each time step.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of time steps.
    pub fn n_times(&self) -> usize {
        self.dates.len()
    }

    /// Number of latitude rows.
    pub fn n_lats(&self) -> usize {
        self.lats.len()
    }

    /// Number of longitude columns.
    pub fn n_lons(&self) -> usize {
        self.lons.len()
    }
}
