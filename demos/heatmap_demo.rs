// demos/heatmap_demo.rs

//! Price a call and a put, sweep them over spot and volatility, and write heat maps
//!
//! Usage:
//!     cargo run --example heatmap_demo -- [session.toml]
//!
//! Without an argument the built-in defaults are used (r=5%, S=K=100, T=0.5,
//! σ=20%, spot 75–125 and volatility 0.10–0.30 at ten points each). Set
//! `RUST_LOG=debug` to see the evaluator's progress messages.

use anyhow::Result;
use sensitivity_lib::render::{format_grid_table, parameter_summary, render_heatmap_svg};
use sensitivity_lib::{build_grids_with_config, price_call_put, OptionType, SessionConfig};

fn main() -> Result<()> {
    env_logger::init();

    let session = match std::env::args().nth(1) {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::default(),
    };
    let precision = session.grid.display_precision;

    println!("Black-Scholes Sensitivity Demo");
    println!("==============================");

    for (label, value) in parameter_summary(&session.parameters, precision) {
        println!("  {:<24} {:>10.*}", label, precision, value);
    }

    // A bad base set is reported, not shown as a blank price
    match price_call_put(&session.parameters) {
        Ok(prices) => {
            println!("\nCALL  ${:.*}", precision, prices.call);
            println!("PUT   ${:.*}", precision, prices.put);
        }
        Err(e) => println!("\nCannot price base parameters: {}", e),
    }

    let grids = build_grids_with_config(&session.parameters, &session.grid)?;

    if !grids.is_complete() {
        println!(
            "\nWarning: {} grid cells could not be priced and are shown as n/a",
            grids.failed_cells()
        );
    }

    for option_type in OptionType::ALL {
        let grid = grids.grid(option_type);
        println!("\n{} heat map", option_type.as_str().to_uppercase());
        print!("{}", format_grid_table(grid, precision));

        let path = format!("{}_heatmap.svg", option_type);
        render_heatmap_svg(grid, &path, &session.render)?;
        println!("Chart saved to {}", path);
    }

    Ok(())
}
