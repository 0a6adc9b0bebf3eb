//! Annotated SVG heat maps of a [`SensitivityGrid`].
//!
//! Row 0 (the first volatility) is drawn at the top and spot increases left to
//! right. Cells are coloured on a yellow-orange-brown scale normalised to the grid's
//! own priced range; missing cells are grey and annotated "n/a".

use std::path::Path;

use anyhow::{ensure, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::grid::types::SensitivityGrid;

/// Output settings for a heat map
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeatmapStyle {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Write the price inside each cell
    pub annotate: bool,
    /// Decimals for annotations and axis labels
    pub precision: usize,
    /// Annotation font size
    pub font_size: u32,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            annotate: true,
            precision: 2,
            font_size: 14,
        }
    }
}

/// Sequential yellow → orange → brown colour stops.
const YL_OR_BR: [(u8, u8, u8); 5] = [
    (255, 255, 229),
    (254, 227, 145),
    (254, 153, 41),
    (204, 76, 2),
    (102, 37, 6),
];

const MISSING_COLOR: RGBColor = RGBColor(200, 200, 200);

/// Map `t` in `[0, 1]` onto the colour scale. Out-of-range input is clamped.
pub fn heat_color(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let position = t * (YL_OR_BR.len() - 1) as f64;
    let lower = (position.floor() as usize).min(YL_OR_BR.len() - 2);
    let frac = position - lower as f64;

    let (r0, g0, b0) = YL_OR_BR[lower];
    let (r1, g1, b1) = YL_OR_BR[lower + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Render `grid` to an SVG file.
pub fn render_heatmap_svg(
    grid: &SensitivityGrid,
    path: impl AsRef<Path>,
    style: &HeatmapStyle,
) -> Result<()> {
    let path = path.as_ref();
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    draw_heatmap(&root, grid, style)
        .with_context(|| format!("failed to draw heat map for {}", path.display()))?;
    root.present()
        .with_context(|| format!("failed to write heat map to {}", path.display()))?;
    Ok(())
}

/// Render `grid` to an in-memory SVG document.
pub fn render_heatmap_svg_string(grid: &SensitivityGrid, style: &HeatmapStyle) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (style.width, style.height))
            .into_drawing_area();
        draw_heatmap(&root, grid, style).context("failed to draw heat map")?;
        root.present().context("failed to finish SVG document")?;
    }
    Ok(svg)
}

fn draw_heatmap<DB>(
    root: &DrawingArea<DB, Shift>,
    grid: &SensitivityGrid,
    style: &HeatmapStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let rows = grid.rows();
    let columns = grid.columns();
    ensure!(
        grid.is_well_formed(),
        "grid cells do not match its axes ({} volatilities x {} spots)",
        rows,
        columns
    );
    let row_labels = grid.row_labels(style.precision);
    let column_labels = grid.column_labels(style.precision);

    root.fill(&WHITE)?;

    // Integer coordinates sit at cell centres so the tick labels line up
    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(
            format!("{} price heat map", grid.option_type.as_str().to_uppercase()),
            ("sans-serif", 28),
        )
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..columns as f64 - 0.5, -0.5..rows as f64 - 0.5)?;

    // Rows are flipped so that the first volatility is the top row
    let y_of_row = |row: usize| (rows - 1 - row) as f64;
    let label_at = |labels: &[String], value: f64, flip: bool| -> String {
        let index = value.round();
        if (value - index).abs() > 1e-6 || index < 0.0 || index as usize >= labels.len() {
            return String::new();
        }
        let index = index as usize;
        let index = if flip { labels.len() - 1 - index } else { index };
        labels[index].clone()
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(columns)
        .y_labels(rows)
        .x_label_formatter(&|x| label_at(&column_labels, *x, false))
        .y_label_formatter(&|y| label_at(&row_labels, *y, true))
        .x_desc("Spot price")
        .y_desc("Volatility")
        .draw()?;

    let range = grid.value_range();
    let normalise = |value: f64| match range {
        Some((lo, hi)) if hi - lo > f64::EPSILON => (value - lo) / (hi - lo),
        _ => 0.5,
    };

    let mut cells = Vec::with_capacity(rows * columns);
    for (row, values) in grid.cells.iter().enumerate() {
        for (column, value) in values.iter().enumerate() {
            cells.push((row, column, *value));
        }
    }

    chart.draw_series(cells.iter().map(|&(row, column, value)| {
        let x = column as f64;
        let y = y_of_row(row);
        let color = value.map_or(MISSING_COLOR, |v| heat_color(normalise(v)));
        Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], color.filled())
    }))?;

    if style.annotate {
        let centered = Pos::new(HPos::Center, VPos::Center);
        chart.draw_series(cells.iter().map(|&(row, column, value)| {
            let (text, color) = match value {
                Some(v) if normalise(v) > 0.6 => (format!("{:.*}", style.precision, v), WHITE),
                Some(v) => (format!("{:.*}", style.precision, v), BLACK),
                None => ("n/a".to_string(), BLACK),
            };
            let text_style =
                FontDesc::new(FontFamily::SansSerif, style.font_size as f64, FontStyle::Normal)
                    .color(&color)
                    .pos(centered);
            Text::new(text, (column as f64, y_of_row(row)), text_style)
        }))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(0.0), RGBColor(255, 255, 229));
        assert_eq!(heat_color(1.0), RGBColor(102, 37, 6));
        assert_eq!(heat_color(-3.0), heat_color(0.0));
        assert_eq!(heat_color(7.0), heat_color(1.0));
        assert_eq!(heat_color(f64::NAN), heat_color(0.0));
    }

    #[test]
    fn test_heat_color_darkens_monotonically() {
        let brightness = |c: RGBColor| c.0 as u32 + c.1 as u32 + c.2 as u32;
        let mut previous = brightness(heat_color(0.0));
        for step in 1..=20 {
            let current = brightness(heat_color(step as f64 / 20.0));
            assert!(current <= previous, "scale should darken at step {}", step);
            previous = current;
        }
    }
}
