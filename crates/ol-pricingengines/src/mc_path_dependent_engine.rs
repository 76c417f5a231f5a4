//! Monte Carlo engine for path-dependent options.
//!
//! Prices arithmetic Asian, barrier and fixed-strike lookback options from
//! discretely monitored GBM paths. Every sampled spot, the initial one
//! included, counts towards the average, the barrier test and the extremes.

use crate::config::{MonteCarloConfig, PathDependentConfig};
use ol_core::{errors::Error, errors::Result, Real};
use ol_instruments::{
    OptionParams, OptionSpec, PathDependentOptionSpec, PriceOutputs, PricingEngine,
};
use tracing::debug;

const ENGINE: &str = "McPathDependentEngine";

/// Monte Carlo engine for [`PathDependentOptionSpec`]s.
///
/// Vanilla [`OptionSpec`]s are always rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct McPathDependentEngine {
    config: PathDependentConfig,
}

impl McPathDependentEngine {
    /// Create an engine from a configuration.
    pub fn new(config: PathDependentConfig) -> Self {
        Self { config }
    }

    /// Replace the whole configuration.
    pub fn with_config(self, config: PathDependentConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &PathDependentConfig {
        &self.config
    }

    /// Discounted payoffs, one per simulated path, before any
    /// variance-reduction post-processing.
    pub fn discounted_payoffs(
        &self,
        spec: &PathDependentOptionSpec,
        params: &OptionParams,
    ) -> Vec<Real> {
        let paths = self.config.generator().generate(params);
        let discount = params.discount();
        paths.iter().map(|path| discount * spec.payoff(path)).collect()
    }
}

impl Default for McPathDependentEngine {
    fn default() -> Self {
        Self::new(MonteCarloConfig::path_dependent_default())
    }
}

impl PricingEngine<PathDependentOptionSpec> for McPathDependentEngine {
    fn price(&self, spec: &PathDependentOptionSpec, params: &OptionParams) -> Result<PriceOutputs> {
        if params.is_degenerate() {
            debug!(engine = ENGINE, %params, "degenerate inputs, flat paths");
        }

        let vr = self.config.variance_reduction();
        let sample = vr.reduce(&self.discounted_payoffs(spec, params));
        let out = PriceOutputs::from_sample(&sample);
        debug!(
            engine = ENGINE,
            kind = ?spec.kind,
            paths = self.config.paths(),
            time_steps = self.config.time_steps(),
            variance_reduction = %vr,
            value = out.value,
            std_error = out.std_error,
            "monte carlo price"
        );
        Ok(out)
    }
}

impl PricingEngine<OptionSpec> for McPathDependentEngine {
    fn price(&self, _spec: &OptionSpec, _params: &OptionParams) -> Result<PriceOutputs> {
        Err(Error::UnsupportedSpec {
            engine: ENGINE,
            expected: "PathDependentOptionSpec",
        })
    }
}
