// Closed-form Black-Scholes pricing for European calls and puts on a
// non-dividend-paying underlying. Early exercise, implied volatility and Greeks are
// out of scope for this crate.

use crate::error::{DomainError, DomainReason};
use crate::models::traits::OptionPricer;
use crate::models::utils::normal_cdf;

/// Inputs to a single Black-Scholes evaluation.
///
/// A plain value type: grid evaluation derives per-cell copies with
/// [`OptionParameters::with_spot_and_volatility`] and never mutates the base set.
/// Fields are not validated on construction through the struct literal so that a
/// sweep can represent (and then fail to price) degenerate corners; use
/// [`OptionParameters::new`] when the set must be priceable up front.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParameters {
    /// Annualized continuously-compounded risk-free rate (as decimal)
    pub risk_free_rate: f64,
    /// Underlying spot price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to expiration in years
    pub time_to_expiry: f64,
    /// Annualized volatility (as decimal, e.g. 0.2 for 20%)
    pub volatility: f64,
}

impl Default for OptionParameters {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            spot: 100.0,
            strike: 100.0,
            time_to_expiry: 0.5,
            volatility: 0.2,
        }
    }
}

impl OptionParameters {
    /// Build a parameter set, rejecting anything the pricer could not evaluate.
    pub fn new(
        risk_free_rate: f64,
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        volatility: f64,
    ) -> Result<Self, DomainError> {
        let params = Self {
            risk_free_rate,
            spot,
            strike,
            time_to_expiry,
            volatility,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the pricing domain. Volatility is checked first, then time, then prices,
    /// then the rate.
    ///
    /// A NaN or infinite field is rejected with the reason of the field it occupies.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !positive_finite(self.volatility) {
            return Err(DomainReason::NonPositiveVolatility.into());
        }
        if !positive_finite(self.time_to_expiry) {
            return Err(DomainReason::NonPositiveTime.into());
        }
        if !positive_finite(self.spot) || !positive_finite(self.strike) {
            return Err(DomainReason::NonPositivePrice.into());
        }
        if !(self.risk_free_rate >= 0.0 && self.risk_free_rate.is_finite()) {
            return Err(DomainReason::InvalidRate.into());
        }
        Ok(())
    }

    /// A fresh parameter set with only spot and volatility replaced.
    pub fn with_spot_and_volatility(&self, spot: f64, volatility: f64) -> Self {
        Self {
            spot,
            volatility,
            ..*self
        }
    }

    /// Strike discounted to today, `K * e^(-rT)`.
    pub fn discounted_strike(&self) -> f64 {
        self.strike * (-self.risk_free_rate * self.time_to_expiry).exp()
    }
}

fn positive_finite(x: f64) -> bool {
    x > 0.0 && x.is_finite()
}

/// European option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub const ALL: [OptionType; 2] = [OptionType::Call, OptionType::Put];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call and put prices for the same parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePair {
    pub call: f64,
    pub put: f64,
}

impl PricePair {
    pub fn get(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call,
            OptionType::Put => self.put,
        }
    }
}

/// The Black-Scholes model as an [`OptionPricer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl OptionPricer for BlackScholes {
    fn price(&self, params: &OptionParameters, option_type: OptionType) -> Result<f64, DomainError> {
        price(params, option_type)
    }
}

/// Price a European option under Black-Scholes assumptions.
///
/// ```text
/// d1 = (ln(S/K) + (r + σ²/2)·T) / (σ·√T)
/// d2 = d1 - σ·√T
/// call = S·Φ(d1) - K·e^(-rT)·Φ(d2)
/// put  = K·e^(-rT)·Φ(-d2) - S·Φ(-d1)
/// ```
///
/// # Errors
///
/// [`DomainError`] with reason `NonPositiveVolatility`, `NonPositiveTime`,
/// `NonPositivePrice` or `InvalidRate` when the parameters fall outside the model's
/// domain, and `NonFiniteResult` when extreme but valid inputs overflow the formula.
#[allow(non_snake_case)]
pub fn price(params: &OptionParameters, option_type: OptionType) -> Result<f64, DomainError> {
    params.validate()?;

    let OptionParameters {
        risk_free_rate: r,
        spot: S,
        strike: K,
        time_to_expiry: T,
        volatility: sigma,
    } = *params;

    let sigma_sqrt_t = sigma * T.sqrt();
    let d1 = ((S / K).ln() + (r + 0.5 * sigma * sigma) * T) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;
    let discounted_strike = K * (-r * T).exp();

    let value = match option_type {
        OptionType::Call => S * normal_cdf(d1) - discounted_strike * normal_cdf(d2),
        OptionType::Put => discounted_strike * normal_cdf(-d2) - S * normal_cdf(-d1),
    };

    if !value.is_finite() {
        return Err(DomainReason::NonFiniteResult.into());
    }
    // Cancellation between the two terms can leave a few ulps below zero far OTM
    Ok(value.max(0.0))
}

/// Price both sides for the same parameter set.
pub fn price_call_put(params: &OptionParameters) -> Result<PricePair, DomainError> {
    Ok(PricePair {
        call: price(params, OptionType::Call)?,
        put: price(params, OptionType::Put)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_params() -> OptionParameters {
        OptionParameters::new(0.05, 100.0, 100.0, 0.5, 0.2).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let params = reference_params();
        let call = price(&params, OptionType::Call).unwrap();
        let put = price(&params, OptionType::Put).unwrap();

        assert!((call - 6.8887).abs() < 1e-3, "call = {}", call);
        assert!((put - 4.4197).abs() < 1e-3, "put = {}", put);
    }

    #[test]
    fn test_validation_order() {
        // Everything wrong at once: volatility is reported first
        let params = OptionParameters {
            risk_free_rate: 0.05,
            spot: 0.0,
            strike: 0.0,
            time_to_expiry: 0.0,
            volatility: 0.0,
        };
        assert_eq!(
            params.validate().unwrap_err().reason,
            DomainReason::NonPositiveVolatility
        );

        let params = OptionParameters {
            volatility: 0.2,
            ..params
        };
        assert_eq!(
            params.validate().unwrap_err().reason,
            DomainReason::NonPositiveTime
        );

        let params = OptionParameters {
            time_to_expiry: 1.0,
            ..params
        };
        assert_eq!(
            params.validate().unwrap_err().reason,
            DomainReason::NonPositivePrice
        );
    }

    #[test]
    fn test_nan_inputs_rejected() {
        let base = reference_params();
        let nan_vol = base.with_spot_and_volatility(100.0, f64::NAN);
        assert_eq!(
            price(&nan_vol, OptionType::Call).unwrap_err().reason,
            DomainReason::NonPositiveVolatility
        );
        let nan_spot = base.with_spot_and_volatility(f64::NAN, 0.2);
        assert_eq!(
            price(&nan_spot, OptionType::Put).unwrap_err().reason,
            DomainReason::NonPositivePrice
        );
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let base = reference_params();
        let cases = [
            (OptionParameters { risk_free_rate: f64::NAN, ..base }, DomainReason::InvalidRate),
            (OptionParameters { risk_free_rate: f64::INFINITY, ..base }, DomainReason::InvalidRate),
            (base.with_spot_and_volatility(f64::INFINITY, 0.2), DomainReason::NonPositivePrice),
            (OptionParameters { strike: f64::INFINITY, ..base }, DomainReason::NonPositivePrice),
            (base.with_spot_and_volatility(100.0, f64::INFINITY), DomainReason::NonPositiveVolatility),
            (OptionParameters { time_to_expiry: f64::INFINITY, ..base }, DomainReason::NonPositiveTime),
        ];
        for (params, reason) in cases {
            assert_eq!(params.validate().unwrap_err().reason, reason, "{:?}", params);
            for option_type in OptionType::ALL {
                assert_eq!(price(&params, option_type).unwrap_err().reason, reason);
            }
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = OptionParameters::new(-0.05, 100.0, 100.0, 0.5, 0.2).unwrap_err();
        assert_eq!(err.reason, DomainReason::InvalidRate);
        assert!(OptionParameters::new(0.0, 100.0, 100.0, 0.5, 0.2).is_ok());
    }

    #[test]
    fn test_collapsed_variance_is_not_reported_as_zero_price() {
        // σ·√T underflows to 0 at the money, so d1 = 0/0
        let params = OptionParameters::new(0.0, 100.0, 100.0, 1e-300, 1e-300).unwrap();
        assert_eq!(
            price(&params, OptionType::Call).unwrap_err().reason,
            DomainReason::NonFiniteResult
        );
        assert!(price_call_put(&params).is_err());
    }

    #[test]
    fn test_with_spot_and_volatility_leaves_base_untouched() {
        let base = reference_params();
        let derived = base.with_spot_and_volatility(120.0, 0.35);

        assert_eq!(derived.spot, 120.0);
        assert_eq!(derived.volatility, 0.35);
        assert_eq!(derived.strike, base.strike);
        assert_eq!(derived.risk_free_rate, base.risk_free_rate);
        assert_eq!(derived.time_to_expiry, base.time_to_expiry);
        assert_eq!(base, reference_params());
    }

    #[test]
    fn test_deep_otm_put_is_non_negative() {
        let params = OptionParameters::new(0.05, 1000.0, 10.0, 0.1, 0.05).unwrap();
        let put = price(&params, OptionType::Put).unwrap();
        assert!(put >= 0.0);
        assert!(put < 1e-12);
    }

    #[test]
    fn test_price_pair_matches_individual_prices() {
        let params = reference_params();
        let pair = price_call_put(&params).unwrap();
        assert_eq!(pair.get(OptionType::Call), price(&params, OptionType::Call).unwrap());
        assert_eq!(pair.get(OptionType::Put), price(&params, OptionType::Put).unwrap());
    }
}
