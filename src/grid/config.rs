use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::grid::types::AxisSpec;
use crate::models::bs::OptionParameters;
use crate::render::heatmap::HeatmapStyle;

/// Sweep configuration: the two axes plus how to evaluate them
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// Spot-price axis (grid columns)
    #[serde(default = "default_spot_range")]
    pub spot_range: AxisSpec,

    /// Volatility axis (grid rows)
    #[serde(default = "default_vol_range")]
    pub vol_range: AxisSpec,

    /// Evaluate rows on the rayon pool instead of sequentially
    #[serde(default)]
    pub parallel: bool,

    /// Decimals used for axis labels and annotated values
    #[serde(default = "default_display_precision")]
    pub display_precision: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spot_range: default_spot_range(),
            vol_range: default_vol_range(),
            parallel: false,
            display_precision: default_display_precision(),
        }
    }
}

impl GridConfig {
    /// 10 × 10 sweep over spot 75–125 and volatility 0.10–0.30
    pub fn standard() -> Self {
        Self::default()
    }

    /// 25 × 25 sweep, evaluated in parallel
    pub fn fine() -> Self {
        Self {
            spot_range: AxisSpec::new(75.0, 125.0, 25),
            vol_range: AxisSpec::new(0.10, 0.30, 25),
            parallel: true,
            ..Self::default()
        }
    }

    /// 5 × 5 sweep for quick looks
    pub fn coarse() -> Self {
        Self {
            spot_range: AxisSpec::new(75.0, 125.0, 5),
            vol_range: AxisSpec::new(0.10, 0.30, 5),
            ..Self::default()
        }
    }

    /// 2 × 2 corners only, for smoke checks
    pub fn minimal() -> Self {
        Self {
            spot_range: AxisSpec::new(75.0, 125.0, 2),
            vol_range: AxisSpec::new(0.10, 0.30, 2),
            ..Self::default()
        }
    }
}

/// Everything one pricing session needs: base inputs, sweep, and heat map output
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub parameters: OptionParameters,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub render: HeatmapStyle,
}

impl SessionConfig {
    /// Parse a session from TOML text. Missing sections fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse session config")
    }

    /// Load a session from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }
}

fn default_spot_range() -> AxisSpec {
    AxisSpec::new(75.0, 125.0, 10)
}

fn default_vol_range() -> AxisSpec {
    AxisSpec::new(0.10, 0.30, 10)
}

fn default_display_precision() -> usize {
    2
}
