//! Composite figure: mode map, variance meter, PC bar chart.

use std::path::Path;

use image::{Rgba, RgbaImage};
use ndarray::Array2;
use tracing::debug;

use crate::error::RenderError;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const MISSING_GREY: Rgba<u8> = Rgba([200, 200, 200, 255]);
const METER_FILL: Rgba<u8> = Rgba([60, 60, 60, 255]);
const METER_EMPTY: Rgba<u8> = Rgba([230, 230, 230, 255]);
const AXIS_DARK: Rgba<u8> = Rgba([40, 40, 40, 255]);

const METER_HEIGHT: u32 = 8;
const GAP: u32 = 16;

/// Layout configuration for the output figure.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Target pixel width of the mode map; grid cells are scaled up to the
    /// largest integer factor that fits.
    map_width: u32,
    /// Pixel height of the PC bar chart.
    chart_height: u32,
    /// Outer margin in pixels.
    margin: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            map_width: 840,
            chart_height: 200,
            margin: 16,
        }
    }
}

impl RenderConfig {
    /// Creates a configuration with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target mode-map width in pixels.
    pub fn with_map_width(mut self, px: u32) -> Self {
        self.map_width = px;
        self
    }

    /// Sets the bar-chart height in pixels.
    pub fn with_chart_height(mut self, px: u32) -> Self {
        self.chart_height = px;
        self
    }

    /// Sets the outer margin in pixels.
    pub fn with_margin(mut self, px: u32) -> Self {
        self.margin = px;
        self
    }
}

/// Renders the figure to a PNG file.
///
/// `pattern` is the `(lat, lon)` correlation grid in [-1, 1] (NaN cells are
/// drawn grey), `pcs` the mode's time coefficients, and `variance_percent`
/// the explained variance shown by the meter strip.
///
/// # Errors
///
/// Returns [`RenderError::EmptyInput`] for an empty grid or coefficient
/// series, and [`RenderError::Image`] when encoding or writing fails.
pub fn render_figure(
    pattern: &Array2<f64>,
    pcs: &[f64],
    variance_percent: f64,
    path: &Path,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    let (ny, nx) = pattern.dim();
    if ny == 0 || nx == 0 {
        return Err(RenderError::EmptyInput {
            name: "pattern".into(),
        });
    }
    if pcs.is_empty() {
        return Err(RenderError::EmptyInput { name: "pcs".into() });
    }

    let gradient = colorgrad::CustomGradient::new()
        .html_colors(&["#2166ac", "#f7f7f7", "#b2182b"])
        .domain(&[-1.0, 0.0, 1.0])
        .build()?;

    let scale = (config.map_width / nx as u32).max(1);
    let map_w = scale * nx as u32;
    let map_h = scale * ny as u32;

    let width = map_w + 2 * config.margin;
    let height =
        config.margin + map_h + GAP + METER_HEIGHT + GAP + config.chart_height + config.margin;

    let mut img = RgbaImage::from_pixel(width, height, WHITE);

    // -- Mode map -----------------------------------------------------------

    for py in 0..map_h {
        for px in 0..map_w {
            let y = (py / scale) as usize;
            let x = (px / scale) as usize;
            let v = pattern[[y, x]];
            let colour = if v.is_finite() {
                Rgba(gradient.at(v.clamp(-1.0, 1.0)).to_rgba8())
            } else {
                MISSING_GREY
            };
            img.put_pixel(config.margin + px, config.margin + py, colour);
        }
    }

    // -- Variance meter -----------------------------------------------------

    let meter_top = config.margin + map_h + GAP;
    let filled = ((variance_percent / 100.0).clamp(0.0, 1.0) * map_w as f64) as u32;
    for py in 0..METER_HEIGHT {
        for px in 0..map_w {
            let colour = if px < filled { METER_FILL } else { METER_EMPTY };
            img.put_pixel(config.margin + px, meter_top + py, colour);
        }
    }

    // -- PC bar chart -------------------------------------------------------

    let chart_top = meter_top + METER_HEIGHT + GAP;
    let half = config.chart_height / 2;
    let midline = chart_top + half;

    let max_abs = pcs.iter().fold(0.0_f64, |acc, p| acc.max(p.abs()));
    let amplitude = if max_abs > 1e-12 { max_abs } else { 1.0 };

    let positive = Rgba(gradient.at(0.75).to_rgba8());
    let negative = Rgba(gradient.at(-0.75).to_rgba8());

    let slot = map_w as f64 / pcs.len() as f64;
    let bar_w = (slot * 0.8).max(1.0) as u32;

    for (i, &pc) in pcs.iter().enumerate() {
        let x0 = config.margin + (i as f64 * slot + slot * 0.1) as u32;
        let h = ((pc.abs() / amplitude) * (half.saturating_sub(2)) as f64) as u32;
        let (top, colour) = if pc >= 0.0 {
            (midline - h, positive)
        } else {
            (midline, negative)
        };
        for py in 0..h {
            for px in 0..bar_w {
                let ix = (x0 + px).min(width - 1);
                img.put_pixel(ix, top + py, colour);
            }
        }
    }

    // Zero line over the bars.
    for px in 0..map_w {
        img.put_pixel(config.margin + px, midline, AXIS_DARK);
    }

    img.save(path)?;
    debug!(path = %path.display(), width, height, "figure written");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_values() {
        let cfg = RenderConfig::new();
        assert_eq!(cfg.map_width, 840);
        assert_eq!(cfg.chart_height, 200);
        assert_eq!(cfg.margin, 16);
    }

    #[test]
    fn builder_methods() {
        let cfg = RenderConfig::new()
            .with_map_width(400)
            .with_chart_height(100)
            .with_margin(8);
        assert_eq!(cfg.map_width, 400);
        assert_eq!(cfg.chart_height, 100);
        assert_eq!(cfg.margin, 8);
    }
}
