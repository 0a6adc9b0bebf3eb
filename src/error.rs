//! Error types for pricing and grid evaluation.
//!
//! Pricing failures are data-dependent and deterministic, so they are modelled as a
//! single [`DomainError`] carrying a reason code. Structural problems with a sweep
//! request (bad axes, cancellation) live in [`GridError`].

use thiserror::Error;

/// Convenience alias for grid-level operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Why a parameter set could not be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainReason {
    NonPositiveVolatility,
    NonPositiveTime,
    /// Spot or strike is not strictly positive, so `ln(S/K)` is undefined.
    NonPositivePrice,
    /// Risk-free rate is negative or not finite.
    InvalidRate,
    /// Inputs passed validation but the formula overflowed or produced NaN.
    NonFiniteResult,
}

impl DomainReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainReason::NonPositiveVolatility => "non-positive volatility",
            DomainReason::NonPositiveTime => "non-positive time",
            DomainReason::NonPositivePrice => "non-positive price",
            DomainReason::InvalidRate => "invalid rate",
            DomainReason::NonFiniteResult => "non-finite result",
        }
    }
}

impl std::fmt::Display for DomainReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter set lies outside the Black-Scholes domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct DomainError {
    pub reason: DomainReason,
}

impl DomainError {
    pub fn new(reason: DomainReason) -> Self {
        Self { reason }
    }
}

impl From<DomainReason> for DomainError {
    fn from(reason: DomainReason) -> Self {
        Self::new(reason)
    }
}

/// Errors that abort a whole sweep rather than a single cell.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum GridError {
    /// An axis request breaks `min < max`, `count >= 2`, or has non-finite bounds.
    #[error("invalid {axis} axis: {message}")]
    InvalidAxis {
        axis: &'static str,
        message: String,
    },

    /// The sweep was cancelled; partial results were discarded.
    #[error("grid evaluation cancelled after {completed} of {total} cells")]
    Cancelled { completed: usize, total: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_display_is_reason_code() {
        let err = DomainError::new(DomainReason::NonPositiveVolatility);
        assert_eq!(err.to_string(), "non-positive volatility");
        assert_eq!(
            DomainError::from(DomainReason::NonPositiveTime).to_string(),
            "non-positive time"
        );
        assert_eq!(
            DomainError::from(DomainReason::NonPositivePrice).to_string(),
            "non-positive price"
        );
        assert_eq!(
            DomainError::from(DomainReason::InvalidRate).to_string(),
            "invalid rate"
        );
        assert_eq!(
            DomainError::from(DomainReason::NonFiniteResult).to_string(),
            "non-finite result"
        );
    }

    #[test]
    fn grid_error_display_includes_axis() {
        let err = GridError::InvalidAxis {
            axis: "spot",
            message: "min must be below max".into(),
        };
        let display = format!("{err}");
        assert!(display.contains("spot"));
        assert!(display.contains("min must be below max"));
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DomainError>();
        assert_send_sync::<GridError>();
    }
}
