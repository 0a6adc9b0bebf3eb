//! Presentation helpers for grids and inputs: SVG heat maps and CSV/text tables.
//!
//! Nothing here feeds back into pricing. Rounding to the display precision happens
//! only in this layer and in the grid label helpers.

pub mod heatmap;
pub mod table;

pub use heatmap::{heat_color, render_heatmap_svg, render_heatmap_svg_string, HeatmapStyle};
pub use table::{
    format_grid_table, grid_to_csv_string, parameter_summary, write_grid_csv,
    write_parameter_csv,
};
