//! High-level dataset reader configuration and orchestration.

use std::path::Path;

use ndarray::Array3;
use tracing::{debug, info};

use boreas_grid::GriddedField;

use crate::error::IoError;
use crate::netcdf_read;

// ---------------------------------------------------------------------------
// DatasetConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a gridded temperature dataset from NetCDF.
///
/// Use the builder methods (`with_*`) to customise variable names and
/// coordinate aliases. The [`Default`] implementation supplies CF-convention
/// names suitable for HadISST-style files.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// NetCDF variable name for the temperature field.
    var: String,
    /// NetCDF variable name for the time axis.
    time_var: String,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            var: "sst".into(),
            time_var: "time".into(),
            lat_aliases: vec!["latitude".into(), "lat".into(), "y".into()],
            lon_aliases: vec!["longitude".into(), "lon".into(), "x".into()],
        }
    }
}

impl DatasetConfig {
    /// Set the temperature variable name.
    pub fn with_var(mut self, name: impl Into<String>) -> Self {
        self.var = name.into();
        self
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }
}

// ---------------------------------------------------------------------------
// read_dataset
// ---------------------------------------------------------------------------

/// Read a gridded temperature dataset from a NetCDF file.
///
/// The file must contain a 3-D `(time, lat, lon)` temperature variable,
/// 1-D coordinate axes, and a time axis with CF `days since` units. Values
/// equal to the variable's declared `_FillValue` (or `missing_value`) are
/// replaced with NaN.
///
/// # Errors
///
/// Returns [`IoError`] on missing files or variables, dimension
/// mismatches, or time-axis decoding failures.
pub fn read_dataset(path: &Path, config: &DatasetConfig) -> Result<GriddedField, IoError> {
    let file = netcdf_read::open_file(path)?;

    // -- Coordinates --------------------------------------------------------

    let lat_alias_refs: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();
    let lon_alias_refs: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();

    let lats = netcdf_read::read_1d_f64(&file, &lat_alias_refs, path)?;
    let lons = netcdf_read::read_1d_f64(&file, &lon_alias_refs, path)?;

    // -- Time ---------------------------------------------------------------

    let time_offsets = netcdf_read::read_1d_f64(&file, &[&config.time_var], path)?;
    let base_date = netcdf_read::read_time_base(&file, &config.time_var, path)?;
    let dates = netcdf_read::time_offsets_to_dates(base_date, &time_offsets)?;

    // -- 3-D data -----------------------------------------------------------

    let (mut data, [nt, ny, nx]) = netcdf_read::read_3d_f64(&file, &config.var, path)?;

    if lats.len() != ny {
        return Err(IoError::DimensionMismatch {
            name: "latitude".into(),
            expected: ny,
            got: lats.len(),
        });
    }
    if lons.len() != nx {
        return Err(IoError::DimensionMismatch {
            name: "longitude".into(),
            expected: nx,
            got: lons.len(),
        });
    }
    if dates.len() != nt {
        return Err(IoError::DimensionMismatch {
            name: "time".into(),
            expected: nt,
            got: dates.len(),
        });
    }

    // -- Fill-value substitution --------------------------------------------

    if let Some(fill) = netcdf_read::read_fill_value(&file, &config.var) {
        let mut n_filled = 0usize;
        for v in &mut data {
            if *v == fill {
                *v = f64::NAN;
                n_filled += 1;
            }
        }
        debug!(fill, n_filled, "substituted fill values with NaN");
    }

    let array = Array3::from_shape_vec((nt, ny, nx), data).map_err(|e| IoError::Netcdf {
        reason: format!("failed to shape {}: {e}", config.var),
    })?;

    let field = GriddedField::new(array, lats, lons, dates)?;
    info!(
        n_times = field.n_times(),
        n_lats = field.n_lats(),
        n_lons = field.n_lons(),
        "dataset loaded"
    );

    Ok(field)
}
