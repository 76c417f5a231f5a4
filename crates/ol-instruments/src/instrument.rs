//! Pricing results and the `PricingEngine` contract.
//!
//! Every engine answers `price(spec, params)` with a fresh [`PriceOutputs`]
//! record. Lattice and analytic engines fill the Greeks; Monte Carlo engines
//! fill value, standard deviation and standard error and leave the Greeks at
//! zero.

use crate::option::{OptionParams, OptionSpec};
use ol_core::{errors::Result, Real};
use ol_math::statistics;

/// Results of one pricing call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceOutputs {
    /// Present value.
    pub value: Real,
    /// ∂V/∂S.
    pub delta: Real,
    /// ∂²V/∂S².
    pub gamma: Real,
    /// ∂V/∂σ.
    pub vega: Real,
    /// ∂V/∂t (calendar time, per year).
    pub theta: Real,
    /// ∂V/∂r.
    pub rho: Real,
    /// Sample standard deviation of the discounted payoffs (Monte Carlo only).
    pub std_dev: Real,
    /// Standard error of the Monte Carlo estimate.
    pub std_error: Real,
}

impl PriceOutputs {
    /// Results carrying only a value.
    pub fn from_value(value: Real) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Value, standard deviation and standard error of a discounted-payoff
    /// sample. Greeks stay at zero.
    pub fn from_sample(sample: &[Real]) -> Self {
        Self {
            value: statistics::mean(sample),
            std_dev: statistics::standard_deviation(sample),
            std_error: statistics::standard_error(sample),
            ..Self::default()
        }
    }
}

/// Base trait for all pricing engines.
///
/// An engine prices one kind of specification (`Spec`) against flat market
/// parameters. Configuration is fixed at construction, so `price` reads
/// only its arguments and the engine's own settings.
pub trait PricingEngine<Spec = OptionSpec>: std::fmt::Debug + Send + Sync {
    /// Price `spec` under `params`.
    fn price(&self, spec: &Spec, params: &OptionParams) -> Result<PriceOutputs>;
}
