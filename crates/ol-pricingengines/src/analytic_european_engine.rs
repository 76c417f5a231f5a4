//! Analytic European option engine (Black-Scholes-Merton).
//!
//! Prices European vanilla options using the closed-form Black-Scholes-Merton
//! formula. Computes the value and first/second-order Greeks.

use ol_core::{errors::Error, errors::Result, Real};
use ol_instruments::{
    ExerciseStyle, OptionParams, OptionSpec, OptionType, PriceOutputs, PricingEngine,
};
use ol_math::distributions::{normal_cdf, normal_pdf};
use tracing::debug;

/// Analytic pricing engine for European vanilla options.
///
/// Implements the Black-Scholes-Merton closed-form solution:
///
/// $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEuropeanEngine;

impl AnalyticEuropeanEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

/// Compute Black-Scholes price and Greeks for a European option.
///
/// Returns `(price, delta, gamma, vega, theta, rho)`. Vega and rho are per
/// unit shift, theta per year. With `T ≤ 0` or `σ ≤ 0` the price is the
/// undiscounted intrinsic value and every Greek is zero. A zero spot gives
/// the limiting values, with gamma 0.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Real,
    dividend_yield: Real,
    volatility: Real,
    time_to_expiry: Real,
) -> (Real, Real, Real, Real, Real, Real) {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 || volatility <= 0.0 {
        let intrinsic = option_type.intrinsic(spot, strike);
        return (intrinsic, 0.0, 0.0, 0.0, 0.0, 0.0);
    }

    let r = risk_free_rate;
    let q = dividend_yield;
    let sigma = volatility;
    let sqrt_t = t.sqrt();
    let std_dev = sigma * sqrt_t;
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();

    let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / std_dev;
    let d2 = d1 - std_dev;

    let nd1 = normal_cdf(phi * d1);
    let nd2 = normal_cdf(phi * d2);
    let npd1 = normal_pdf(d1);

    // Price
    let price = phi * (spot * df_q * nd1 - strike * df_r * nd2);
    // Delta
    let delta = phi * df_q * nd1;
    // Gamma
    let gamma = if spot > 0.0 {
        df_q * npd1 / (spot * std_dev)
    } else {
        0.0
    };
    // Vega (per 1.0 absolute vol, not per 1%)
    let vega = spot * df_q * npd1 * sqrt_t;
    // Theta (per year)
    let theta = {
        let term1 = -(spot * df_q * npd1 * sigma) / (2.0 * sqrt_t);
        let term2 = -phi * r * strike * df_r * nd2;
        let term3 = phi * q * spot * df_q * nd1;
        term1 + term2 + term3
    };
    // Rho (per 1.0 rate shift)
    let rho = phi * strike * t * df_r * nd2;

    (price, delta, gamma, vega, theta, rho)
}

impl PricingEngine for AnalyticEuropeanEngine {
    fn price(&self, spec: &OptionSpec, params: &OptionParams) -> Result<PriceOutputs> {
        if spec.exercise != ExerciseStyle::European {
            return Err(Error::UnsupportedExercise {
                engine: "AnalyticEuropeanEngine",
                required: "European",
            });
        }

        if params.is_degenerate() {
            debug!(
                engine = "AnalyticEuropeanEngine",
                %params,
                "degenerate inputs, intrinsic value"
            );
            return Ok(PriceOutputs::from_value(spec.intrinsic(params.spot)));
        }

        let (value, delta, gamma, vega, theta, rho) = black_scholes_merton(
            spec.option_type(),
            params.spot,
            params.strike,
            params.rate,
            params.dividend_yield,
            params.volatility,
            params.maturity,
        );

        Ok(PriceOutputs {
            value,
            delta,
            gamma,
            vega,
            theta,
            rho,
            ..PriceOutputs::default()
        })
    }
}
