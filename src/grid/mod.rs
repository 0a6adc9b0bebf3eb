//! Spot × volatility sensitivity sweeps
//!
//! Builds linearly spaced spot and volatility axes, prices a call and a put at
//! every coordinate, and returns both grids with their axes. Rows are volatility,
//! columns are spot. Cells that cannot be priced are left empty and reported
//! rather than failing the sweep.

#[cfg(feature = "serde")]
pub mod config;
pub mod pipeline;
pub mod types;

pub use pipeline::{build_grids, CancelToken, GridEvaluator};
pub use types::{AxisSpec, CellFailure, GridEvaluation, SensitivityGrid};
