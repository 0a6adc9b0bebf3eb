use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use rayon::prelude::*;

use crate::error::{DomainError, GridError, Result};
use crate::grid::types::{AxisSpec, CellFailure, GridEvaluation, SensitivityGrid};
use crate::models::bs::{BlackScholes, OptionParameters, OptionType};
use crate::models::traits::OptionPricer;

/// Cooperative cancellation flag shared between a caller and a running sweep.
///
/// Cloning shares the flag. The evaluator polls it between cells; once it is set
/// the sweep stops and returns [`GridError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Result of pricing one (volatility, spot) coordinate for both sides.
struct CellOutcome {
    call: Option<f64>,
    put: Option<f64>,
    error: Option<DomainError>,
}

/// Evaluates a pricer over a volatility × spot sweep around a base parameter set.
pub struct GridEvaluator<P: OptionPricer = BlackScholes> {
    pricer: P,
    base: OptionParameters,
    spot_range: AxisSpec,
    vol_range: AxisSpec,
    parallel: bool,
    cancel: Option<CancelToken>,
}

impl GridEvaluator<BlackScholes> {
    pub fn new(base: OptionParameters, spot_range: AxisSpec, vol_range: AxisSpec) -> Self {
        Self::with_pricer(BlackScholes, base, spot_range, vol_range)
    }
}

impl<P: OptionPricer> GridEvaluator<P> {
    pub fn with_pricer(
        pricer: P,
        base: OptionParameters,
        spot_range: AxisSpec,
        vol_range: AxisSpec,
    ) -> Self {
        Self {
            pricer,
            base,
            spot_range,
            vol_range,
            parallel: false,
            cancel: None,
        }
    }

    /// Dispatch rows to the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Honour a cancellation token between cells
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Run the sweep.
    ///
    /// Cells that fail to price become `None` and are listed in
    /// [`GridEvaluation::failures`]; only invalid axes or cancellation fail the
    /// whole evaluation.
    pub fn run(&self) -> Result<GridEvaluation> {
        self.spot_range.validate("spot")?;
        self.vol_range.validate("volatility")?;

        let spot_axis = self.spot_range.values();
        let volatility_axis = self.vol_range.values();
        let total = spot_axis.len() * volatility_axis.len();

        debug!(
            "Evaluating {}x{} grid (volatility x spot), parallel={}",
            volatility_axis.len(),
            spot_axis.len(),
            self.parallel
        );

        let completed = AtomicUsize::new(0);
        let row_outcomes = if self.parallel {
            volatility_axis
                .par_iter()
                .map(|&vol| self.evaluate_row(vol, &spot_axis, &completed))
                .collect::<Option<Vec<_>>>()
        } else {
            volatility_axis
                .iter()
                .map(|&vol| self.evaluate_row(vol, &spot_axis, &completed))
                .collect::<Option<Vec<_>>>()
        };

        let row_outcomes = match row_outcomes {
            Some(rows) if !self.is_cancelled() => rows,
            _ => {
                let completed = completed.load(Ordering::Relaxed);
                warn!(
                    "Grid evaluation cancelled after {} of {} cells; discarding partial results",
                    completed, total
                );
                return Err(GridError::Cancelled { completed, total });
            }
        };

        let mut call_cells = Vec::with_capacity(volatility_axis.len());
        let mut put_cells = Vec::with_capacity(volatility_axis.len());
        let mut failures = Vec::new();

        for (row, outcomes) in row_outcomes.into_iter().enumerate() {
            let mut call_row = Vec::with_capacity(spot_axis.len());
            let mut put_row = Vec::with_capacity(spot_axis.len());
            for (column, outcome) in outcomes.into_iter().enumerate() {
                if let Some(error) = outcome.error {
                    failures.push(CellFailure {
                        row,
                        column,
                        volatility: volatility_axis[row],
                        spot: spot_axis[column],
                        error,
                    });
                }
                call_row.push(outcome.call);
                put_row.push(outcome.put);
            }
            call_cells.push(call_row);
            put_cells.push(put_row);
        }

        if !failures.is_empty() {
            warn!(
                "Partial grid: {} of {} cells could not be priced (first failure: {} at volatility={}, spot={})",
                failures.len(),
                total,
                failures[0].error,
                failures[0].volatility,
                failures[0].spot
            );
        }

        debug!("Grid evaluation finished: {} cells", total);

        Ok(GridEvaluation {
            call: SensitivityGrid {
                option_type: OptionType::Call,
                volatility_axis: volatility_axis.clone(),
                spot_axis: spot_axis.clone(),
                cells: call_cells,
            },
            put: SensitivityGrid {
                option_type: OptionType::Put,
                volatility_axis,
                spot_axis,
                cells: put_cells,
            },
            failures,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Price every spot for one volatility. `None` means cancellation was observed.
    fn evaluate_row(
        &self,
        volatility: f64,
        spot_axis: &[f64],
        completed: &AtomicUsize,
    ) -> Option<Vec<CellOutcome>> {
        let mut row = Vec::with_capacity(spot_axis.len());
        for &spot in spot_axis {
            if self.is_cancelled() {
                return None;
            }
            row.push(self.evaluate_cell(volatility, spot));
            completed.fetch_add(1, Ordering::Relaxed);
        }
        Some(row)
    }

    fn evaluate_cell(&self, volatility: f64, spot: f64) -> CellOutcome {
        let params = self.base.with_spot_and_volatility(spot, volatility);
        let call = self.pricer.price(&params, OptionType::Call);
        let put = self.pricer.price(&params, OptionType::Put);
        let error = call.as_ref().err().or(put.as_ref().err()).copied();
        CellOutcome {
            call: call.ok(),
            put: put.ok(),
            error,
        }
    }
}

/// Sequential Black-Scholes sweep with no cancellation.
pub fn build_grids(
    base: &OptionParameters,
    spot_range: &AxisSpec,
    vol_range: &AxisSpec,
) -> Result<GridEvaluation> {
    GridEvaluator::new(*base, *spot_range, *vol_range).run()
}
