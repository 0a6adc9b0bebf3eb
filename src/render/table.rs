//! Tabular views of grids and input parameters.

use std::io::Write;

use anyhow::{anyhow, Context, Result};

use crate::grid::types::SensitivityGrid;
use crate::models::bs::OptionParameters;
use crate::models::utils::round_to;

const CORNER_LABEL: &str = "volatility \\ spot";

/// Labelled inputs rounded for display, in the order they are usually shown.
pub fn parameter_summary(params: &OptionParameters, precision: usize) -> Vec<(&'static str, f64)> {
    vec![
        ("Risk-Free Rate", round_to(params.risk_free_rate, precision)),
        ("Underlying Price", round_to(params.spot, precision)),
        ("Strike Price", round_to(params.strike, precision)),
        ("Time to Expiry (Years)", round_to(params.time_to_expiry, precision)),
        ("Volatility (σ)", round_to(params.volatility, precision)),
    ]
}

/// Write the parameter summary as a one-row CSV table.
pub fn write_parameter_csv<W: Write>(
    params: &OptionParameters,
    writer: W,
    precision: usize,
) -> Result<()> {
    let summary = parameter_summary(params, precision);
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(summary.iter().map(|(label, _)| *label))
        .context("failed to write parameter header")?;
    wtr.write_record(summary.iter().map(|(_, v)| format!("{:.*}", precision, v)))
        .context("failed to write parameter values")?;
    wtr.flush().context("failed to flush parameter table")?;
    Ok(())
}

/// Write a grid as CSV: spot labels across, volatility labels down, missing cells empty.
pub fn write_grid_csv<W: Write>(grid: &SensitivityGrid, writer: W, precision: usize) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![CORNER_LABEL.to_string()];
    header.extend(grid.column_labels(precision));
    wtr.write_record(&header)
        .context("failed to write grid header")?;

    for (label, row) in grid.row_labels(precision).into_iter().zip(&grid.cells) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(label);
        record.extend(
            row.iter()
                .map(|cell| cell.map(|v| format!("{:.*}", precision, v)).unwrap_or_default()),
        );
        wtr.write_record(&record)
            .context("failed to write grid row")?;
    }

    wtr.flush().context("failed to flush grid table")?;
    Ok(())
}

/// [`write_grid_csv`] into a `String`.
pub fn grid_to_csv_string(grid: &SensitivityGrid, precision: usize) -> Result<String> {
    let mut wtr = Vec::new();
    write_grid_csv(grid, &mut wtr, precision)?;
    String::from_utf8(wtr).map_err(|e| anyhow!("grid CSV is not valid UTF-8: {}", e))
}

/// Fixed-width text rendering for terminals.
pub fn format_grid_table(grid: &SensitivityGrid, precision: usize) -> String {
    let row_labels = grid.row_labels(precision);
    let column_labels = grid.column_labels(precision);
    let cells: Vec<Vec<String>> = grid
        .cells
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Some(v) => format!("{:.*}", precision, v),
                    None => "n/a".to_string(),
                })
                .collect()
        })
        .collect();

    let label_width = row_labels
        .iter()
        .map(String::len)
        .chain(std::iter::once(CORNER_LABEL.len()))
        .max()
        .unwrap_or(0);
    let cell_width = column_labels
        .iter()
        .chain(cells.iter().flatten())
        .map(String::len)
        .max()
        .unwrap_or(0);

    let mut out = format!("{:<label_width$}", CORNER_LABEL);
    for label in &column_labels {
        out.push_str(&format!(" {:>cell_width$}", label));
    }
    out.push('\n');
    for (label, row) in row_labels.iter().zip(&cells) {
        out.push_str(&format!("{:<label_width$}", label));
        for cell in row {
            out.push_str(&format!(" {:>cell_width$}", cell));
        }
        out.push('\n');
    }
    out
}
