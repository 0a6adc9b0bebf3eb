use crate::error::{DomainError, GridError};
use crate::models::bs::OptionType;
use crate::models::utils::linspace;

/// A linearly spaced axis request: `count` points from `min` to `max` inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisSpec {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl AxisSpec {
    pub fn new(min: f64, max: f64, count: usize) -> Self {
        Self { min, max, count }
    }

    /// Check `min < max`, finite bounds and `count >= 2`.
    ///
    /// `axis` names the axis in the resulting error ("spot", "volatility").
    pub fn validate(&self, axis: &'static str) -> Result<(), GridError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(GridError::InvalidAxis {
                axis,
                message: format!(
                    "bounds must be finite, got min={} max={}",
                    self.min, self.max
                ),
            });
        }
        if self.min >= self.max {
            return Err(GridError::InvalidAxis {
                axis,
                message: format!(
                    "min ({}) must be strictly below max ({})",
                    self.min, self.max
                ),
            });
        }
        if self.count < 2 {
            return Err(GridError::InvalidAxis {
                axis,
                message: format!("count must be at least 2, got {}", self.count),
            });
        }
        Ok(())
    }

    /// The axis values at full precision.
    pub fn values(&self) -> Vec<f64> {
        linspace(self.min, self.max, self.count)
    }

    /// Distance between neighbouring points.
    pub fn step(&self) -> f64 {
        (self.max - self.min) / (self.count.saturating_sub(1).max(1) as f64)
    }
}

/// Prices for one option type over a volatility × spot sweep.
///
/// `cells[row][column]`: rows follow `volatility_axis`, columns follow `spot_axis`.
/// `None` marks a cell whose parameters could not be priced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityGrid {
    pub option_type: OptionType,
    pub volatility_axis: Vec<f64>,
    pub spot_axis: Vec<f64>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl SensitivityGrid {
    pub fn rows(&self) -> usize {
        self.volatility_axis.len()
    }

    pub fn columns(&self) -> usize {
        self.spot_axis.len()
    }

    /// `cells` has one row per volatility and one column per spot.
    ///
    /// Always true for grids built by the evaluator; a deserialized grid may not be.
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.rows() && self.cells.iter().all(|row| row.len() == self.columns())
    }

    /// Cell at (volatility row, spot column); `None` if missing or out of range.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(row)?.get(column).copied().flatten()
    }

    pub fn row(&self, row: usize) -> Option<&[Option<f64>]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Number of missing cells in this grid.
    pub fn missing_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_none())
            .count()
    }

    /// Smallest and largest priced value, ignoring missing cells.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Volatility labels rounded for display.
    pub fn row_labels(&self, precision: usize) -> Vec<String> {
        format_labels(&self.volatility_axis, precision)
    }

    /// Spot labels rounded for display.
    pub fn column_labels(&self, precision: usize) -> Vec<String> {
        format_labels(&self.spot_axis, precision)
    }
}

fn format_labels(values: &[f64], precision: usize) -> Vec<String> {
    values.iter().map(|v| format!("{:.*}", precision, v)).collect()
}

/// One grid coordinate whose pricing failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellFailure {
    pub row: usize,
    pub column: usize,
    pub volatility: f64,
    pub spot: f64,
    pub error: DomainError,
}

/// Output of a sweep: call and put grids on identical axes plus the failed cells.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEvaluation {
    pub call: SensitivityGrid,
    pub put: SensitivityGrid,
    /// Failed coordinates in row-major order. A coordinate appears once even when
    /// both sides failed there.
    pub failures: Vec<CellFailure>,
}

impl GridEvaluation {
    /// Aggregate count of failed grid coordinates.
    pub fn failed_cells(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn grid(&self, option_type: OptionType) -> &SensitivityGrid {
        match option_type {
            OptionType::Call => &self.call,
            OptionType::Put => &self.put,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_validation() {
        assert!(AxisSpec::new(75.0, 125.0, 10).validate("spot").is_ok());
        assert!(AxisSpec::new(125.0, 75.0, 10).validate("spot").is_err());
        assert!(AxisSpec::new(0.2, 0.2, 10).validate("volatility").is_err());
        assert!(AxisSpec::new(0.1, 0.3, 1).validate("volatility").is_err());
        assert!(AxisSpec::new(f64::NAN, 0.3, 5).validate("volatility").is_err());
        assert!(AxisSpec::new(0.1, f64::INFINITY, 5)
            .validate("volatility")
            .is_err());
    }

    #[test]
    fn test_axis_values_and_step() {
        let axis = AxisSpec::new(0.1, 0.3, 5);
        let values = axis.values();
        assert_eq!(values.len(), 5);
        assert!((axis.step() - 0.05).abs() < 1e-15);
        assert_eq!(values[0], 0.1);
        assert_eq!(values[4], 0.3);
    }

    #[test]
    fn test_grid_accessors() {
        let grid = SensitivityGrid {
            option_type: OptionType::Call,
            volatility_axis: vec![0.1, 0.2],
            spot_axis: vec![90.0, 100.0, 110.0],
            cells: vec![
                vec![Some(1.0), None, Some(3.0)],
                vec![Some(0.5), Some(2.0), Some(7.25)],
            ],
        };

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.get(0, 2), Some(3.0));
        assert_eq!(grid.get(0, 1), None);
        assert_eq!(grid.get(5, 0), None);
        assert_eq!(grid.missing_count(), 1);
        assert_eq!(grid.value_range(), Some((0.5, 7.25)));
        assert_eq!(grid.row_labels(2), vec!["0.10", "0.20"]);
        assert_eq!(grid.column_labels(0), vec!["90", "100", "110"]);
        assert!(grid.is_well_formed());

        let mut ragged = grid.clone();
        ragged.cells[1].pop();
        assert!(!ragged.is_well_formed());

        let mut extra_row = grid;
        extra_row.cells.push(vec![None, None, None]);
        assert!(!extra_row.is_well_formed());
    }
}
