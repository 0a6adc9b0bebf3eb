//! # Sensitivity-Lib: Black-Scholes Pricing and Spot/Volatility Sensitivity Grids
//!
//! `sensitivity-lib` prices European options with the closed-form Black-Scholes model
//! and sweeps those prices over a two-dimensional grid of underlying spot price and
//! volatility, producing call and put matrices ready for heat map or table display.
//!
//! ## Core Features
//!
//! - **Pricer**: closed-form call/put prices with typed domain errors
//! - **Normal CDF**: `erfc`-based, accurate well into the tails
//! - **Grid Evaluator**: linearly spaced axes, per-cell failure isolation, optional
//!   parallel evaluation and cancellation
//! - **Presentation**: annotated SVG heat maps and CSV/text tables
//!
//! ## Quick Start
//!
//! ```rust
//! use sensitivity_lib::{build_grids, price_call_put, AxisSpec, OptionParameters};
//!
//! let base = OptionParameters::new(0.05, 100.0, 100.0, 0.5, 0.2)?;
//! let prices = price_call_put(&base)?;
//! assert!((prices.call - 6.89).abs() < 0.05);
//!
//! let spot_range = AxisSpec::new(75.0, 125.0, 10);
//! let vol_range = AxisSpec::new(0.10, 0.30, 10);
//! let grids = build_grids(&base, &spot_range, &vol_range)?;
//!
//! assert_eq!(grids.call.rows(), 10);
//! assert_eq!(grids.failed_cells(), 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Grid Layout
//!
//! Rows follow the volatility axis and columns follow the spot axis. A cell whose
//! parameters cannot be priced (for example a zero volatility on the axis) is `None`
//! and listed in [`GridEvaluation::failures`]; the rest of the grid is still usable.
//!
//! ## Configuration Presets
//!
//! - `standard()`: 10 × 10 over spot 75–125 and volatility 0.10–0.30
//! - `fine()`: 25 × 25, evaluated in parallel
//! - `coarse()`: 5 × 5
//! - `minimal()`: 2 × 2 corners

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod grid;
pub mod models;
pub mod render;

// ================================================================================================
// IMPORTS
// ================================================================================================

#[cfg(feature = "serde")]
use grid::config::GridConfig as InternalGridConfig;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Errors
pub use error::{DomainError, DomainReason, GridError};

// Pricing
pub use models::bs::{price, price_call_put, BlackScholes, OptionParameters, OptionType, PricePair};
pub use models::traits::OptionPricer;
pub use models::utils::{normal_cdf, normal_pdf};

// Grid evaluation
pub use grid::{
    build_grids, AxisSpec, CancelToken, CellFailure, GridEvaluation, GridEvaluator,
    SensitivityGrid,
};

// Configuration
#[cfg(feature = "serde")]
pub use grid::config::{GridConfig, SessionConfig};

// Presentation
pub use render::HeatmapStyle;

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured sweep settings for common use cases.
///
/// # Available Configurations
///
/// - [`standard()`]: the classic 10 × 10 heat map
/// - [`fine()`]: dense 25 × 25 grid on the rayon pool
/// - [`coarse()`]: 5 × 5 overview
/// - [`minimal()`]: 2 × 2 corners, for tests and smoke checks
#[cfg(feature = "serde")]
pub mod default_configs {
    use crate::grid::config::GridConfig;

    /// Spot 75–125 and volatility 0.10–0.30, ten points each, sequential.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sensitivity_lib::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.spot_range.count, 10);
    /// ```
    pub fn standard() -> GridConfig {
        GridConfig::standard()
    }

    /// Same ranges at 25 points each, evaluated in parallel.
    ///
    /// Suited to large displays where the 10 × 10 heat map looks blocky.
    pub fn fine() -> GridConfig {
        GridConfig::fine()
    }

    /// Same ranges at 5 points each.
    pub fn coarse() -> GridConfig {
        GridConfig::coarse()
    }

    /// Axis endpoints only.
    pub fn minimal() -> GridConfig {
        GridConfig::minimal()
    }
}

/// Evaluate call and put grids using a [`GridConfig`].
///
/// Honours `config.parallel`; everything else behaves like [`build_grids`].
///
/// # Errors
///
/// * [`GridError::InvalidAxis`] if either axis breaks `min < max` or `count >= 2`
///
/// # Example
///
/// ```rust
/// use sensitivity_lib::{build_grids_with_config, default_configs, OptionParameters};
///
/// let grids = build_grids_with_config(&OptionParameters::default(), &default_configs::coarse())?;
/// assert_eq!(grids.put.columns(), 5);
/// # Ok::<(), sensitivity_lib::GridError>(())
/// ```
#[cfg(feature = "serde")]
pub fn build_grids_with_config(
    base: &OptionParameters,
    config: &InternalGridConfig,
) -> error::Result<GridEvaluation> {
    GridEvaluator::new(*base, config.spot_range, config.vol_range)
        .with_parallel(config.parallel)
        .run()
}
