//! JSON summary structures for analysis results.

use serde::Serialize;

/// Top-level analysis summary written next to the figure.
#[derive(Debug, Serialize)]
pub struct AnalysisSummary {
    /// Domain the analysis ran over.
    pub domain: DomainSummary,
    /// Zero-based rank of the reported mode.
    pub mode_rank: usize,
    /// Explained variance of the reported mode, percent.
    pub variance_percent: f64,
    /// Calendar year of each time coefficient.
    pub years: Vec<i32>,
    /// Time coefficients of the reported mode, unit variance.
    pub principal_components: Vec<f64>,
}

/// Summary of the selected analysis domain.
#[derive(Debug, Serialize)]
pub struct DomainSummary {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    pub start_year: i32,
    pub end_year: i32,
    pub n_latitudes: usize,
    pub n_longitudes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_json() {
        let summary = AnalysisSummary {
            domain: DomainSummary {
                lat_min: 20.0,
                lat_max: 60.0,
                lon_min: 120.0,
                lon_max: 240.0,
                start_year: 1900,
                end_year: 2020,
                n_latitudes: 40,
                n_longitudes: 120,
            },
            mode_rank: 1,
            variance_percent: 12.5,
            years: vec![1900, 1901],
            principal_components: vec![0.3, -0.3],
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"mode_rank\":1"));
        assert!(json.contains("\"variance_percent\":12.5"));
        assert!(json.contains("\"n_longitudes\":120"));
    }
}
