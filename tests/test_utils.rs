#![allow(dead_code)] // Each test binary uses a different subset of these helpers

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sensitivity_lib::OptionParameters;

/// Seed shared by the randomised sweeps so failures are reproducible
pub const TEST_SEED: u64 = 123456;

/// r=5%, S=K=100, T=6 months, σ=20%
pub fn reference_params() -> OptionParameters {
    OptionParameters::new(0.05, 100.0, 100.0, 0.5, 0.2).expect("reference parameters are valid")
}

/// Build a parameter set without validation, for degenerate-input tests
pub fn raw_params(r: f64, spot: f64, strike: f64, t: f64, sigma: f64) -> OptionParameters {
    OptionParameters {
        risk_free_rate: r,
        spot,
        strike,
        time_to_expiry: t,
        volatility: sigma,
    }
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(TEST_SEED)
}

/// Random priceable parameter set covering ITM, ATM and OTM strikes,
/// short and long expiries, and low to very high volatility
pub fn random_params(rng: &mut StdRng) -> OptionParameters {
    OptionParameters {
        risk_free_rate: rng.gen_range(0.0..0.15),
        spot: rng.gen_range(5.0..500.0),
        strike: rng.gen_range(5.0..500.0),
        time_to_expiry: rng.gen_range(0.01..5.0),
        volatility: rng.gen_range(0.01..1.5),
    }
}

/// Put-call parity right-hand side: S - K·e^(-rT)
pub fn parity_rhs(params: &OptionParameters) -> f64 {
    params.spot - params.strike * (-params.risk_free_rate * params.time_to_expiry).exp()
}
