//! Binomial lattice engine (Cox-Ross-Rubinstein).
//!
//! Prices European and American vanilla options by backward induction on a
//! CRR tree. Delta and gamma come from re-running the tree at log-bumped
//! spots; vega, theta and rho are not computed.

use crate::config::LatticeConfig;
use crate::lattice_engine::price_with_greeks;
use ol_core::{errors::Result, Real};
use ol_instruments::{ExerciseStyle, OptionParams, OptionSpec, PriceOutputs, PricingEngine};
use ol_methods::{roll_back, BinomialTree};

const ENGINE: &str = "BinomialEngine";

/// Cox-Ross-Rubinstein binomial engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialEngine {
    config: LatticeConfig,
}

impl BinomialEngine {
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
        let tree = BinomialTree::cox_ross_rubinstein(params, spot, steps);
        roll_back(&tree, &|s| spec.intrinsic(s), spec.exercise)
    }

    /// Price with European exercise, whatever `spec` says.
    pub fn price_european(&self, spec: &OptionSpec, params: &OptionParams) -> Result<PriceOutputs> {
        self.price_style(&spec.with_exercise(ExerciseStyle::European), params)
    }

    /// Price with American exercise, whatever `spec` says.
    pub fn price_american(&self, spec: &OptionSpec, params: &OptionParams) -> Result<PriceOutputs> {
        self.price_style(&spec.with_exercise(ExerciseStyle::American), params)
    }

    fn price_style(&self, spec: &OptionSpec, params: &OptionParams) -> Result<PriceOutputs> {
        price_with_greeks(ENGINE, &self.config, spec, params, |spot| {
            self.value_from_tree(spec, params, spot)
        })
    }
}

impl Default for BinomialEngine {
    fn default() -> Self {
        Self::new(LatticeConfig::new(crate::config::DEFAULT_BINOMIAL_STEPS))
    }
}

impl PricingEngine for BinomialEngine {
    fn price(&self, spec: &OptionSpec, params: &OptionParams) -> Result<PriceOutputs> {
        match spec.exercise {
            ExerciseStyle::European => self.price_european(spec, params),
            ExerciseStyle::American => self.price_american(spec, params),
        }
    }
}
