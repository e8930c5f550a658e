//! End-to-end pipeline test on a synthetic 3x3 grid over 5 years.
//!
//! Exercises the full chain the `analyze` command runs: longitude
//! normalization, range masking, domain selection, strict annual
//! aggregation, lenient climatology, zero-fill anomalies, latitude
//! weighting, weighted-mean removal, EOF decomposition, mode reshape, and
//! figure rendering.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use ndarray::Array3;
use tempfile::tempdir;

use boreas_anomaly::{
    MissingPolicy, annual_mean, anomalies, climatology, flatten_weights, remove_weighted_mean,
    to_time_space, weight_grid,
};
use boreas_eof::{EofConfig, EofSolver};
use boreas_grid::{Domain, GriddedField};
use boreas_render::{RenderConfig, render_figure};

const N_YEARS: usize = 5;

/// Monthly synthetic SST: a warming trend uniform in space plus a weaker
/// alternating secondary pattern, constant within each year. One
/// observation is pushed outside the physical range to exercise masking.
fn synthetic_field() -> GriddedField {
    let lats = vec![40.0, 30.0, 20.0];
    // Deliberately unsorted with a negative value: normalization must give
    // the ascending axis [190, 200, 210].
    let lons = vec![200.0, -170.0, 210.0];

    let dates: Vec<NaiveDate> = (0..N_YEARS as i32)
        .flat_map(|y| (1..=12).map(move |m| NaiveDate::from_ymd_opt(2000 + y, m, 15).unwrap()))
        .collect();

    let wiggle = [1.0, -1.0, 0.0, -1.0, 1.0];
    let mut data = Array3::zeros((N_YEARS * 12, 3, 3));
    for t in 0..N_YEARS * 12 {
        let year = t / 12;
        for y in 0..3 {
            for x in 0..3 {
                let checker = if (y + x) % 2 == 0 { 1.0 } else { -1.0 };
                data[[t, y, x]] = 15.0
                    + 0.5 * year as f64
                    + 0.3 * y as f64
                    + 0.2 * wiggle[year] * checker;
            }
        }
    }

    // Year 2, month 5, on the -170 column: impossible temperature, must be
    // masked and poison that cell-year under strict aggregation.
    data[[2 * 12 + 4, 2, 1]] = 99.0;

    GriddedField::new(data, lats, lons, dates).unwrap()
}

#[test]
fn full_pipeline_produces_second_mode() {
    let dir = tempdir().unwrap();

    // -- Clean and select ---------------------------------------------------

    let mut field = synthetic_field().normalize_longitudes();
    assert_eq!(field.lons(), &[190.0, 200.0, 210.0]);

    field.mask_outside(-2.0, 35.0);
    // The impossible value moved to column 0 when -170 sorted to the front.
    assert!(field.data()[[2 * 12 + 4, 2, 0]].is_nan());

    let domain = Domain::new(
        20.0,
        60.0,
        120.0,
        240.0,
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2004, 12, 31).unwrap(),
    )
    .unwrap();
    let field = domain.select(&field).unwrap();
    assert_eq!(field.n_times(), N_YEARS * 12);

    // -- Annual anomalies ---------------------------------------------------

    let annual = annual_mean(&field).unwrap();
    assert_eq!(annual.years(), &[2000, 2001, 2002, 2003, 2004]);
    // Strict aggregation: the poisoned cell-year is missing.
    assert!(annual.data()[[2, 2, 0]].is_nan());

    let clim = climatology(&annual);
    assert!(clim[[2, 0]].is_finite());

    let mut anom = anomalies(&annual, &clim, MissingPolicy::ZeroFill).unwrap();
    assert_eq!(anom[[2, 2, 0]], 0.0);

    // -- Weighting and centering --------------------------------------------

    let weights = weight_grid(annual.lats(), annual.n_lons());
    let first = remove_weighted_mean(&mut anom, &weights);

    // Each pass removes 1/n_lon of the weighted mean, so a re-run sees the
    // remainder and the iteration heads toward zero.
    let mut again = anom.clone();
    let second = remove_weighted_mean(&mut again, &weights);
    for (m1, m2) in first.iter().zip(&second) {
        assert!(m2.abs() <= m1.abs() + 1e-12);
        assert_relative_eq!(*m2, m1 * (2.0 / 3.0), epsilon = 1e-10);
    }

    // -- Decomposition ------------------------------------------------------

    let matrix = to_time_space(&anom);
    assert_eq!(matrix.dim(), (N_YEARS, 9));

    let solver = EofSolver::new(matrix, &flatten_weights(&weights)).unwrap();
    let decomp = solver.solve(&EofConfig::new()).unwrap();

    let fractions = decomp.variance_fractions();
    assert!(fractions[1] <= fractions[0]);
    assert!(fractions[0] > 0.0);

    let mode = decomp.mode(1).unwrap();
    assert_eq!(mode.pcs().len(), N_YEARS);

    let pattern = mode.pattern_grid(annual.n_lats(), annual.n_lons()).unwrap();
    assert_eq!(pattern.dim(), (3, 3));

    for &c in mode.correlation() {
        if c.is_finite() {
            assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&c));
        }
    }

    // -- Rendering ----------------------------------------------------------

    let out = dir.path().join("mode.png");
    let pcs: Vec<f64> = mode.pcs().iter().copied().collect();
    render_figure(
        &pattern,
        &pcs,
        mode.variance_fraction() * 100.0,
        &out,
        &RenderConfig::new().with_map_width(90),
    )
    .unwrap();
    assert!(out.exists());
}

#[test]
fn propagate_policy_fails_loudly_on_masked_data() {
    let mut field = synthetic_field().normalize_longitudes();
    field.mask_outside(-2.0, 35.0);

    let annual = annual_mean(&field).unwrap();
    let clim = climatology(&annual);

    let err = anomalies(&annual, &clim, MissingPolicy::Propagate).unwrap_err();
    assert!(matches!(
        err,
        boreas_anomaly::AnomalyError::MissingData { .. }
    ));
}
