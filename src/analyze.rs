//! Analyze command: run the anomaly/EOF pipeline and render the figure.

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use boreas_anomaly::{
    annual_mean, anomalies, climatology, flatten_weights, remove_weighted_mean, to_time_space,
    weight_grid,
};
use boreas_eof::EofSolver;
use boreas_io::read_dataset;
use boreas_render::render_figure;

use crate::cli::AnalyzeArgs;
use crate::config::BoreasConfig;
use crate::convert;
use crate::summary::{AnalysisSummary, DomainSummary};

/// Run the full analysis pipeline.
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let _cmd = info_span!("analyze").entered();

    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: BoreasConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    // 2. Build configs from TOML
    let dataset_cfg = convert::build_dataset_config(&config.io);
    let domain = convert::build_domain(&config.domain)?;
    let anomaly_cfg = convert::build_anomaly_config(&config.anomaly)?;
    let eof_cfg = convert::build_eof_config(&config.eof);
    let render_cfg = convert::build_render_config(&config.render);

    // 3. Read the dataset
    let input =
        config.io.input.as_ref().ok_or_else(|| {
            anyhow::anyhow!("no input path: set [io].input in the config file")
        })?;
    info!(path = %input.display(), "reading dataset");
    let field = read_dataset(input, &dataset_cfg)
        .with_context(|| format!("failed to read NetCDF: {}", input.display()))?;

    // 4. Clean and restrict to the analysis domain
    let mut field = field.normalize_longitudes();
    field.mask_outside(config.domain.valid_min, config.domain.valid_max);
    let field = domain.select(&field).context("domain selection failed")?;
    info!(
        n_times = field.n_times(),
        n_lats = field.n_lats(),
        n_lons = field.n_lons(),
        "domain selected"
    );

    // 5. Annual anomalies
    let annual = annual_mean(&field).context("annual aggregation failed")?;
    let clim = climatology(&annual);
    let mut anom = anomalies(&annual, &clim, anomaly_cfg.missing_policy())
        .context("anomaly computation failed")?;
    info!(n_years = annual.n_years(), "annual anomalies computed");

    // 6. Latitude weighting and weighted-mean removal
    let weights = weight_grid(annual.lats(), annual.n_lons());
    let removed = remove_weighted_mean(&mut anom, &weights);
    debug!(
        max_removed = removed.iter().fold(0.0_f64, |a, m| a.max(m.abs())),
        "weighted spatial means removed"
    );

    // 7. EOF decomposition
    let matrix = to_time_space(&anom);
    let solver =
        EofSolver::new(matrix, &flatten_weights(&weights)).context("EOF setup failed")?;
    let decomp = solver.solve(&eof_cfg).context("EOF decomposition failed")?;

    let rank = config.eof.mode_rank;
    let mode = decomp.mode(rank).context("mode selection failed")?;
    let pattern = mode
        .pattern_grid(annual.n_lats(), annual.n_lons())
        .context("mode reshape failed")?;
    let variance_percent = mode.variance_fraction() * 100.0;
    info!(rank, variance_percent, "mode selected");

    // 8. Render the figure
    let output = args.output.unwrap_or_else(|| config.render.output.clone());
    let pcs: Vec<f64> = mode.pcs().iter().copied().collect();
    render_figure(&pattern, &pcs, variance_percent, &output, &render_cfg)
        .with_context(|| format!("failed to render figure: {}", output.display()))?;
    info!(path = %output.display(), "figure written");

    // 9. Write the JSON summary
    let summary = AnalysisSummary {
        domain: DomainSummary {
            lat_min: config.domain.lat_min,
            lat_max: config.domain.lat_max,
            lon_min: config.domain.lon_min,
            lon_max: config.domain.lon_max,
            start_year: config.domain.start_year,
            end_year: config.domain.end_year,
            n_latitudes: annual.n_lats(),
            n_longitudes: annual.n_lons(),
        },
        mode_rank: rank,
        variance_percent,
        years: annual.years().to_vec(),
        principal_components: pcs,
    };

    let summary_path = args
        .summary
        .unwrap_or_else(|| config.render.summary.clone());
    let json = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
    std::fs::write(&summary_path, json)
        .with_context(|| format!("failed to write summary: {}", summary_path.display()))?;
    info!(path = %summary_path.display(), "summary written");

    Ok(())
}
