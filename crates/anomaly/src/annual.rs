//! Strict aggregation to annual means.

use chrono::Datelike;
use ndarray::Array3;

use boreas_grid::GriddedField;

use crate::error::AnomalyError;

/// A field reduced to one value per calendar year per grid cell.
#[derive(Debug, Clone)]
pub struct AnnualField {
    /// Data in `(year, latitude, longitude)` order.
    data: Array3<f64>,
    /// Calendar year of each time slab, ascending.
    years: Vec<i32>,
    /// Latitude of each row.
    lats: Vec<f64>,
    /// Longitude of each column.
    lons: Vec<f64>,
}

impl AnnualField {
    /// Data in `(year, latitude, longitude)` order.
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Calendar year of each time slab.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Latitude of each row.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude of each column.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Number of years.
    pub fn n_years(&self) -> usize {
        self.years.len()
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

/// Aggregates a field to annual means with strict missing propagation.
///
/// Observations are grouped by calendar year. The yearly value of a cell is
/// the arithmetic mean of all its observations in that year; if any of them
/// is missing the yearly value is missing. Plain summation gives exactly
/// that behaviour, since NaN poisons the sum.
///
/// # Errors
///
/// Returns [`AnomalyError::EmptyField`] when the field has no time steps.
pub fn annual_mean(field: &GriddedField) -> Result<AnnualField, AnomalyError> {
    if field.n_times() == 0 {
        return Err(AnomalyError::EmptyField {
            name: "time steps".into(),
        });
    }

    let ny = field.n_lats();
    let nx = field.n_lons();

    // Dates are sorted, so years form ascending runs.
    let mut years: Vec<i32> = Vec::new();
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for (t, date) in field.dates().iter().enumerate() {
        let year = date.year();
        if years.last() == Some(&year) {
            if let Some(run) = runs.last_mut() {
                run.1 = t + 1;
            }
        } else {
            years.push(year);
            runs.push((t, t + 1));
        }
    }

    let mut data = Array3::zeros((years.len(), ny, nx));
    for (slab, &(start, end)) in runs.iter().enumerate() {
        let count = (end - start) as f64;
        for y in 0..ny {
            for x in 0..nx {
                let mut sum = 0.0;
                for t in start..end {
                    sum += field.data()[[t, y, x]];
                }
                data[[slab, y, x]] = sum / count;
            }
        }
    }

    Ok(AnnualField {
        data,
        years,
        lats: field.lats().to_vec(),
        lons: field.lons().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 15).unwrap()
    }

    fn single_cell_field(dates: Vec<NaiveDate>, values: Vec<f64>) -> GriddedField {
        let nt = dates.len();
        let data = Array3::from_shape_vec((nt, 1, 1), values).unwrap();
        GriddedField::new(data, vec![45.0], vec![180.0], dates).unwrap()
    }

    #[test]
    fn groups_by_calendar_year() {
        let dates = vec![date(2000, 1), date(2000, 7), date(2001, 1), date(2001, 7)];
        let field = single_cell_field(dates, vec![1.0, 3.0, 10.0, 20.0]);

        let annual = annual_mean(&field).unwrap();

        assert_eq!(annual.years(), &[2000, 2001]);
        assert_relative_eq!(annual.data()[[0, 0, 0]], 2.0);
        assert_relative_eq!(annual.data()[[1, 0, 0]], 15.0);
    }

    #[test]
    fn strict_one_missing_observation_poisons_the_year() {
        let dates = vec![date(2000, 1), date(2000, 7)];
        let field = single_cell_field(dates, vec![5.0, f64::NAN]);

        let annual = annual_mean(&field).unwrap();

        assert!(annual.data()[[0, 0, 0]].is_nan());
    }

    #[test]
    fn strict_propagation_is_per_cell() {
        let dates = vec![date(2000, 1), date(2000, 7)];
        let data = Array3::from_shape_vec(
            (2, 1, 2),
            vec![1.0, 1.0, 3.0, f64::NAN],
        )
        .unwrap();
        let field =
            GriddedField::new(data, vec![45.0], vec![100.0, 110.0], dates).unwrap();

        let annual = annual_mean(&field).unwrap();

        assert_relative_eq!(annual.data()[[0, 0, 0]], 2.0);
        assert!(annual.data()[[0, 0, 1]].is_nan());
    }

    #[test]
    fn partial_years_average_available_observations() {
        // 2001 has a single observation; its mean is that observation.
        let dates = vec![date(2000, 1), date(2000, 2), date(2001, 12)];
        let field = single_cell_field(dates, vec![2.0, 4.0, 7.0]);

        let annual = annual_mean(&field).unwrap();

        assert_eq!(annual.years(), &[2000, 2001]);
        assert_relative_eq!(annual.data()[[0, 0, 0]], 3.0);
        assert_relative_eq!(annual.data()[[1, 0, 0]], 7.0);
    }

    #[test]
    fn empty_field_errors() {
        let field = single_cell_field(vec![], vec![]);
        let err = annual_mean(&field).unwrap_err();
        assert!(matches!(err, AnomalyError::EmptyField { .. }));
    }
}
