//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::config::*;

// Import crate types
use boreas_anomaly::{AnomalyConfig, MissingPolicy};
use boreas_eof::EofConfig;
use boreas_grid::Domain;
use boreas_io::DatasetConfig;
use boreas_render::RenderConfig;

/// Parses a missing-value policy name string into the corresponding enum
/// variant.
pub fn parse_missing_policy(s: &str) -> Result<MissingPolicy> {
    match s.to_lowercase().as_str() {
        "zero-fill" | "zero_fill" => Ok(MissingPolicy::ZeroFill),
        "propagate" => Ok(MissingPolicy::Propagate),
        other => bail!("unknown missing-value policy: {other:?}"),
    }
}

/// Builds a [`DatasetConfig`] from the TOML I/O configuration.
pub fn build_dataset_config(io: &IoToml) -> DatasetConfig {
    DatasetConfig::default()
        .with_var(&io.var)
        .with_time_var(&io.time_var)
}

/// Builds a [`Domain`] from the TOML domain configuration.
///
/// Year bounds become an inclusive Jan 1 .. Dec 31 date range.
pub fn build_domain(domain: &DomainToml) -> Result<Domain> {
    let start = NaiveDate::from_ymd_opt(domain.start_year, 1, 1)
        .ok_or_else(|| anyhow::anyhow!("invalid start year: {}", domain.start_year))?;
    let end = NaiveDate::from_ymd_opt(domain.end_year, 12, 31)
        .ok_or_else(|| anyhow::anyhow!("invalid end year: {}", domain.end_year))?;

    Ok(Domain::new(
        domain.lat_min,
        domain.lat_max,
        domain.lon_min,
        domain.lon_max,
        start,
        end,
    )?)
}

/// Builds an [`AnomalyConfig`] from the TOML anomaly configuration.
pub fn build_anomaly_config(anomaly: &AnomalyToml) -> Result<AnomalyConfig> {
    let policy = parse_missing_policy(&anomaly.missing)?;
    Ok(AnomalyConfig::new().with_missing_policy(policy))
}

/// Builds an [`EofConfig`] from the TOML EOF configuration.
///
/// The solver always computes at least one mode past the reported rank so
/// the variance ranking is observable.
pub fn build_eof_config(eof: &EofToml) -> EofConfig {
    EofConfig::new()
        .with_n_modes((eof.mode_rank + 1).max(2))
        .with_max_iterations(eof.max_iterations)
        .with_tolerance(eof.tolerance)
}

/// Builds a [`RenderConfig`] from the TOML render configuration.
pub fn build_render_config(render: &RenderToml) -> RenderConfig {
    RenderConfig::new()
        .with_map_width(render.map_width)
        .with_chart_height(render.chart_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_missing_policy_names() {
        assert_eq!(
            parse_missing_policy("zero-fill").unwrap(),
            MissingPolicy::ZeroFill
        );
        assert_eq!(
            parse_missing_policy("Propagate").unwrap(),
            MissingPolicy::Propagate
        );
        assert!(parse_missing_policy("drop").is_err());
    }

    #[test]
    fn default_domain_builds() {
        assert!(build_domain(&DomainToml::default()).is_ok());
    }

    #[test]
    fn out_of_range_year_is_rejected() {
        let toml = DomainToml {
            start_year: i32::MAX,
            ..DomainToml::default()
        };
        assert!(build_domain(&toml).is_err());
    }

    #[test]
    fn inverted_latitude_band_is_rejected() {
        let toml = DomainToml {
            lat_min: 60.0,
            lat_max: 20.0,
            ..DomainToml::default()
        };
        assert!(build_domain(&toml).is_err());
    }

    #[test]
    fn eof_config_covers_reported_rank() {
        let cfg = build_eof_config(&EofToml::default());
        assert_eq!(cfg.n_modes(), 2);

        let deep = build_eof_config(&EofToml {
            mode_rank: 4,
            ..EofToml::default()
        });
        assert_eq!(deep.n_modes(), 5);
    }
}
