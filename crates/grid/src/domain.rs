//! Rectangular space/time domain selection.

use chrono::NaiveDate;
use ndarray::Axis;

use crate::error::GridError;
use crate::field::GriddedField;

/// A rectangular latitude/longitude band with an inclusive date range.
///
/// Longitude bounds follow the [0, 360) convention, so a field should be
/// passed through [`GriddedField::normalize_longitudes`] before selection.
#[derive(Debug, Clone)]
pub struct Domain {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
    start: NaiveDate,
    end: NaiveDate,
}

impl Domain {
    /// Creates a new `Domain` after validating bound ordering.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidBounds`] if a min exceeds its max.
    pub fn new(
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, GridError> {
        if lat_min > lat_max {
            return Err(GridError::InvalidBounds {
                name: "latitude".into(),
                min: lat_min,
                max: lat_max,
            });
        }
        if lon_min > lon_max {
            return Err(GridError::InvalidBounds {
                name: "longitude".into(),
                min: lon_min,
                max: lon_max,
            });
        }
        if start > end {
            return Err(GridError::InvalidDateRange { start, end });
        }

        Ok(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
            start,
            end,
        })
    }

    /// Restricts a field to this domain, all bounds inclusive.
    ///
    /// Axis ordering is preserved: a descending latitude axis stays
    /// descending after selection.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptySelection`] when no points survive along
    /// the time, latitude, or longitude axis.
    pub fn select(&self, field: &GriddedField) -> Result<GriddedField, GridError> {
        let t_idx = indices_where(field.dates(), |d| *d >= self.start && *d <= self.end);
        if t_idx.is_empty() {
            return Err(GridError::EmptySelection {
                name: "time".into(),
            });
        }

        let y_idx = indices_where(field.lats(), |&lat| {
            lat >= self.lat_min && lat <= self.lat_max
        });
        if y_idx.is_empty() {
            return Err(GridError::EmptySelection {
                name: "latitude".into(),
            });
        }

        let x_idx = indices_where(field.lons(), |&lon| {
            lon >= self.lon_min && lon <= self.lon_max
        });
        if x_idx.is_empty() {
            return Err(GridError::EmptySelection {
                name: "longitude".into(),
            });
        }

        let data = field
            .data()
            .select(Axis(0), &t_idx)
            .select(Axis(1), &y_idx)
            .select(Axis(2), &x_idx);

        let dates = t_idx.iter().map(|&i| field.dates()[i]).collect();
        let lats = y_idx.iter().map(|&i| field.lats()[i]).collect();
        let lons = x_idx.iter().map(|&i| field.lons()[i]).collect();

        GriddedField::new(data, lats, lons, dates)
    }
}

/// Indices of the elements satisfying a predicate, in axis order.
fn indices_where<T>(values: &[T], pred: impl Fn(&T) -> bool) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| pred(v))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_field() -> GriddedField {
        // 4 monthly steps over 2000, 3 descending latitudes, 4 longitudes.
        let dates: Vec<NaiveDate> = (1..=4).map(|m| date(2000, m, 15)).collect();
        let lats = vec![60.0, 40.0, 20.0];
        let lons = vec![100.0, 150.0, 200.0, 250.0];
        let data = Array3::from_shape_fn((4, 3, 4), |(t, y, x)| {
            (t * 100 + y * 10 + x) as f64
        });
        GriddedField::new(data, lats, lons, dates).unwrap()
    }

    #[test]
    fn new_rejects_inverted_latitude_bounds() {
        let result = Domain::new(
            60.0,
            20.0,
            0.0,
            360.0,
            date(2000, 1, 1),
            date(2000, 12, 31),
        );
        assert!(matches!(
            result.unwrap_err(),
            GridError::InvalidBounds { .. }
        ));
    }

    #[test]
    fn new_rejects_inverted_date_range() {
        let result = Domain::new(
            0.0,
            10.0,
            0.0,
            360.0,
            date(2001, 1, 1),
            date(2000, 1, 1),
        );
        assert!(matches!(
            result.unwrap_err(),
            GridError::InvalidDateRange { .. }
        ));
    }

    #[test]
    fn select_is_inclusive_on_all_bounds() {
        let field = make_field();
        let domain = Domain::new(
            20.0,
            60.0,
            150.0,
            250.0,
            date(2000, 2, 15),
            date(2000, 3, 15),
        )
        .unwrap();

        let out = domain.select(&field).unwrap();

        // Latitude band [20, 60] keeps all three rows, in source order.
        assert_eq!(out.lats(), &[60.0, 40.0, 20.0]);
        // Longitude band [150, 250] keeps the last three columns.
        assert_eq!(out.lons(), &[150.0, 200.0, 250.0]);
        // Date range keeps the Feb and Mar steps (inclusive on both ends).
        assert_eq!(out.n_times(), 2);
        assert_eq!(out.dates()[0], date(2000, 2, 15));
        assert_eq!(out.dates()[1], date(2000, 3, 15));

        // Cell correspondence: time 1 (Feb), lat row 0, lon 150 was
        // data[1, 0, 1] = 101 in the source field.
        assert_eq!(out.data()[[0, 0, 0]], 101.0);
    }

    #[test]
    fn select_preserves_descending_latitude_order() {
        let field = make_field();
        let domain = Domain::new(
            20.0,
            50.0,
            0.0,
            360.0,
            date(2000, 1, 1),
            date(2000, 12, 31),
        )
        .unwrap();

        let out = domain.select(&field).unwrap();
        assert_eq!(out.lats(), &[40.0, 20.0]);
    }

    #[test]
    fn select_empty_latitude_band_errors() {
        let field = make_field();
        let domain = Domain::new(
            -90.0,
            -80.0,
            0.0,
            360.0,
            date(2000, 1, 1),
            date(2000, 12, 31),
        )
        .unwrap();

        let err = domain.select(&field).unwrap_err();
        assert!(matches!(err, GridError::EmptySelection { name } if name == "latitude"));
    }

    #[test]
    fn select_empty_date_range_errors() {
        let field = make_field();
        let domain = Domain::new(
            0.0,
            90.0,
            0.0,
            360.0,
            date(1990, 1, 1),
            date(1990, 12, 31),
        )
        .unwrap();

        let err = domain.select(&field).unwrap_err();
        assert!(matches!(err, GridError::EmptySelection { name } if name == "time"));
    }
}
