use std::path::PathBuf;

use serde::Deserialize;

/// Top-level boreas configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoreasConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Analysis domain settings.
    #[serde(default)]
    pub domain: DomainToml,

    /// Anomaly settings.
    #[serde(default)]
    pub anomaly: AnomalyToml,

    /// EOF solver settings.
    #[serde(default)]
    pub eof: EofToml,

    /// Figure output settings.
    #[serde(default)]
    pub render: RenderToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    #[serde(default = "default_var")]
    pub var: String,
    #[serde(default = "default_time_var")]
    pub time_var: String,
}

fn default_var() -> String {
    "sst".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}

/// North-Pacific defaults matching the reference analysis.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainToml {
    #[serde(default = "default_lat_min")]
    pub lat_min: f64,
    #[serde(default = "default_lat_max")]
    pub lat_max: f64,
    #[serde(default = "default_lon_min")]
    pub lon_min: f64,
    #[serde(default = "default_lon_max")]
    pub lon_max: f64,
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default = "default_end_year")]
    pub end_year: i32,
    #[serde(default = "default_valid_min")]
    pub valid_min: f64,
    #[serde(default = "default_valid_max")]
    pub valid_max: f64,
}

impl Default for DomainToml {
    fn default() -> Self {
        Self {
            lat_min: default_lat_min(),
            lat_max: default_lat_max(),
            lon_min: default_lon_min(),
            lon_max: default_lon_max(),
            start_year: default_start_year(),
            end_year: default_end_year(),
            valid_min: default_valid_min(),
            valid_max: default_valid_max(),
        }
    }
}

fn default_lat_min() -> f64 {
    20.0
}
fn default_lat_max() -> f64 {
    60.0
}
fn default_lon_min() -> f64 {
    120.0
}
fn default_lon_max() -> f64 {
    240.0
}
fn default_start_year() -> i32 {
    1900
}
fn default_end_year() -> i32 {
    2020
}
fn default_valid_min() -> f64 {
    -2.0
}
fn default_valid_max() -> f64 {
    35.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnomalyToml {
    /// "zero-fill" or "propagate".
    #[serde(default = "default_missing")]
    pub missing: String,
}

impl Default for AnomalyToml {
    fn default() -> Self {
        Self {
            missing: default_missing(),
        }
    }
}

fn default_missing() -> String {
    "zero-fill".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EofToml {
    /// Zero-based rank of the reported mode.
    #[serde(default = "default_mode_rank")]
    pub mode_rank: usize,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for EofToml {
    fn default() -> Self {
        Self {
            mode_rank: default_mode_rank(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

fn default_mode_rank() -> usize {
    1
}
fn default_max_iterations() -> usize {
    1000
}
fn default_tolerance() -> f64 {
    1e-12
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderToml {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_summary")]
    pub summary: PathBuf,
    #[serde(default = "default_map_width")]
    pub map_width: u32,
    #[serde(default = "default_chart_height")]
    pub chart_height: u32,
}

impl Default for RenderToml {
    fn default() -> Self {
        Self {
            output: default_output(),
            summary: default_summary(),
            map_width: default_map_width(),
            chart_height: default_chart_height(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("eof_mode.png")
}
fn default_summary() -> PathBuf {
    PathBuf::from("eof_mode.json")
}
fn default_map_width() -> u32 {
    840
}
fn default_chart_height() -> u32 {
    200
}
