pub mod bs;

/// Common traits used by pricing models
pub mod traits {
    use crate::error::DomainError;
    use crate::models::bs::{OptionParameters, OptionType};

    /// Closed-form pricer for a single European option.
    ///
    /// Implementations must be pure: the same inputs always give the same result and
    /// nothing outside the call is touched. The grid evaluator may call it from
    /// several threads at once.
    pub trait OptionPricer: Send + Sync {
        fn price(
            &self,
            params: &OptionParameters,
            option_type: OptionType,
        ) -> Result<f64, DomainError>;
    }
}

/// Numeric utilities shared by the pricing models
pub mod utils {
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    /// Standard normal cumulative distribution function.
    ///
    /// Computed as `0.5 * erfc(-x / sqrt(2))`. Using the complementary error function
    /// keeps full relative precision in the lower tail, where `0.5 * (1 + erf(x))`
    /// would cancel to zero long before the true probability underflows.
    pub fn normal_cdf(x: f64) -> f64 {
        0.5 * libm::erfc(-x * FRAC_1_SQRT_2)
    }

    /// Standard normal probability density function.
    pub fn normal_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Linearly spaced values from `min` to `max` inclusive.
    ///
    /// The last element is exactly `max` so axis endpoints survive round-off.
    pub fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![min],
            _ => {
                let steps = (count - 1) as f64;
                let mut values: Vec<f64> = (0..count)
                    .map(|i| min + (max - min) * (i as f64) / steps)
                    .collect();
                values[count - 1] = max;
                values
            }
        }
    }

    /// Round to a fixed number of decimals. Presentation only.
    pub fn round_to(value: f64, decimals: usize) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        (value * factor).round() / factor
    }

}
