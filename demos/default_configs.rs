use sensitivity_lib::{build_grids_with_config, default_configs, OptionParameters};

fn main() {
    let base = OptionParameters::default();

    println!("Sensitivity-lib Default Configuration Examples\n");

    let presets = [
        ("Standard", default_configs::standard(), "Classic 10 x 10 heat map"),
        ("Fine", default_configs::fine(), "Large displays, parallel evaluation"),
        ("Coarse", default_configs::coarse(), "Quick overview"),
        ("Minimal", default_configs::minimal(), "Smoke checks, debugging"),
    ];

    for (i, (name, config, use_case)) in presets.iter().enumerate() {
        println!("{}. {} Configuration:", i + 1, name);
        println!(
            "   Spot axis: {:.2} to {:.2} ({} points)",
            config.spot_range.min, config.spot_range.max, config.spot_range.count
        );
        println!(
            "   Volatility axis: {:.2} to {:.2} ({} points)",
            config.vol_range.min, config.vol_range.max, config.vol_range.count
        );
        println!("   Parallel: {}", config.parallel);
        println!("   Use case: {}\n", use_case);
    }

    println!("Running example sweep with standard config...");
    match build_grids_with_config(&base, &default_configs::standard()) {
        Ok(grids) => {
            let (lo, hi) = grids.call.value_range().unwrap_or((0.0, 0.0));
            println!("✅ Sweep complete!");
            println!("   Call prices range from {:.2} to {:.2}", lo, hi);
            println!("   Failed cells: {}", grids.failed_cells());
        }
        Err(e) => {
            println!("❌ Sweep failed: {}", e);
        }
    }
}
