//! Trinomial lattice engine.
//!
//! Same contract as the binomial engine, on a recombining trinomial tree with
//! moment-matched branch probabilities.

use crate::config::LatticeConfig;
use crate::lattice_engine::price_with_greeks;
use ol_core::{errors::Result, Real};
use ol_instruments::{ExerciseStyle, OptionParams, OptionSpec, PriceOutputs, PricingEngine};
use ol_methods::{roll_back, TrinomialTree};

const ENGINE: &str = "TrinomialEngine";

/// Trinomial lattice engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrinomialEngine {
    config: LatticeConfig,
}

impl TrinomialEngine {
    /// Create an engine from a configuration.
    pub fn new(config: LatticeConfig) -> Self {
        Self { config }
    }

    /// Replace the whole configuration.
    pub fn with_config(self, config: LatticeConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Tree value of `spec` with the root at `spot`.
    ///
    /// Zero steps, `T ≤ 0` or `σ ≤ 0` give the payoff at `spot`.
    pub fn value_from_tree(&self, spec: &OptionSpec, params: &OptionParams, spot: Real) -> Real {
        let steps = self.config.steps();
        if steps == 0 || params.is_degenerate() {
            return spec.intrinsic(spot);
        }
        let tree = TrinomialTree::new(params, spot, steps);
        roll_back(&tree, &|s| spec.intrinsic(s), spec.exercise)
    }

    /// Price with American exercise, whatever `spec` says.
    pub fn price_american(&self, spec: &OptionSpec, params: &OptionParams) -> Result<PriceOutputs> {
        self.price(&spec.with_exercise(ExerciseStyle::American), params)
    }
}

impl Default for TrinomialEngine {
    fn default() -> Self {
        Self::new(LatticeConfig::new(crate::config::DEFAULT_TRINOMIAL_STEPS))
    }
}

impl PricingEngine for TrinomialEngine {
    fn price(&self, spec: &OptionSpec, params: &OptionParams) -> Result<PriceOutputs> {
        price_with_greeks(ENGINE, &self.config, spec, params, |spot| {
            self.value_from_tree(spec, params, spot)
        })
    }
}
