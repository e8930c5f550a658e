//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::NaiveDate;
use netcdf::AttributeValue;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 3-D `f64` variable and return the flattened data together with
/// the shape `[nt, ny, nx]` derived from the variable's dimensions.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, [usize; 3]), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: 3,
            got: dims.len(),
        });
    }

    let nt = dims[0].len();
    let ny = dims[1].len();
    let nx = dims[2].len();

    let data = var.get_values::<f64, _>(..)?;
    Ok((data, [nt, ny, nx]))
}

/// Read the fill value of a variable, if declared.
///
/// Checks the `_FillValue` attribute first, then the legacy
/// `missing_value`, returning the first numeric value found.
pub(crate) fn read_fill_value(file: &netcdf::File, var_name: &str) -> Option<f64> {
    let var = file.variable(var_name)?;
    for attr_name in ["_FillValue", "missing_value"] {
        if let Some(Ok(value)) = var.attribute_value(attr_name)
            && let Some(fv) = attribute_to_f64(&value)
        {
            return Some(fv);
        }
    }
    None
}

/// Convert a numeric attribute value to `f64`, returning `None` for
/// non-numeric attribute types.
fn attribute_to_f64(value: &AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Double(v) => Some(*v),
        AttributeValue::Float(v) => Some(f64::from(*v)),
        AttributeValue::Int(v) => Some(f64::from(*v)),
        AttributeValue::Short(v) => Some(f64::from(*v)),
        AttributeValue::Schar(v) => Some(f64::from(*v)),
        _ => None,
    }
}

/// Read the `units` attribute of the time variable and parse a
/// CF-convention string like `"days since YYYY-MM-DD"` or
/// `"days since YYYY-MM-DD HH:MM:SS"` into the base date.
pub(crate) fn read_time_base(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<NaiveDate, IoError> {
    let var = file
        .variable(time_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: time_var.to_string(),
            path: path.to_path_buf(),
        })?;

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    // Expected format: "days since YYYY-MM-DD" or "days since YYYY-MM-DD HH:MM:SS"
    let parts: Vec<&str> = units_str.splitn(3, ' ').collect();
    if parts.len() < 3 || parts[0] != "days" || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units_str}'"),
        });
    }

    // Take only the date portion (first 10 characters of parts[2]).
    let date_str = if parts[2].len() >= 10 {
        &parts[2][..10]
    } else {
        parts[2]
    };

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| IoError::InvalidTime {
        reason: format!("failed to parse base date '{date_str}': {e}"),
    })
}

/// Convert floating-point day offsets from a base date into dates.
///
/// Each offset is truncated to an integer number of days and added to
/// `base_date` with chrono arithmetic.
pub(crate) fn time_offsets_to_dates(
    base_date: NaiveDate,
    offsets: &[f64],
) -> Result<Vec<NaiveDate>, IoError> {
    offsets
        .iter()
        .map(|&offset| {
            let days = offset as i64;
            base_date
                .checked_add_signed(chrono::TimeDelta::days(days))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("date overflow adding {days} days to {base_date}"),
                })
        })
        .collect()
}
