//! Monte Carlo engine for European vanilla options.
//!
//! Simulates GBM paths, discounts the terminal payoff of each path, applies
//! the configured variance reduction and reports the sample mean together
//! with its standard deviation and standard error. Greeks are left at zero.

use crate::config::MonteCarloConfig;
use ol_core::{errors::Error, errors::Result, Real};
use ol_instruments::{ExerciseStyle, OptionParams, OptionSpec, PriceOutputs, PricingEngine};
use tracing::debug;

const ENGINE: &str = "McEuropeanEngine";

/// Monte Carlo engine for European vanilla options.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct McEuropeanEngine {
    config: MonteCarloConfig,
}

impl McEuropeanEngine {
    /// Create an engine from a configuration.
    pub fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    /// Replace the whole configuration.
    pub fn with_config(self, config: MonteCarloConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Discounted terminal payoffs, one per simulated path, before any
    /// variance-reduction post-processing.
    pub fn discounted_payoffs(&self, spec: &OptionSpec, params: &OptionParams) -> Vec<Real> {
        let paths = self.config.generator().generate(params);
        let discount = params.discount();
        (0..paths.paths())
            .map(|i| discount * spec.intrinsic(paths.terminal(i)))
            .collect()
    }
}

impl PricingEngine for McEuropeanEngine {
    fn price(&self, spec: &OptionSpec, params: &OptionParams) -> Result<PriceOutputs> {
        if spec.exercise != ExerciseStyle::European {
            return Err(Error::UnsupportedExercise {
                engine: ENGINE,
                required: "European",
            });
        }

        if params.is_degenerate() {
            debug!(engine = ENGINE, %params, "degenerate inputs, discounted intrinsic value");
            return Ok(PriceOutputs::from_value(params.discount() * spec.intrinsic(params.spot)));
        }

        let vr = self.config.variance_reduction();
        let sample = vr.reduce(&self.discounted_payoffs(spec, params));
        let out = PriceOutputs::from_sample(&sample);
        debug!(
            engine = ENGINE,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european_engine::black_scholes_merton;
    use approx::assert_abs_diff_eq;
    use ol_instruments::OptionType;
    use ol_methods::VarianceReduction;

    fn params() -> OptionParams {
        OptionParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 1.0)
    }

    fn engine(paths: usize, vr: VarianceReduction) -> McEuropeanEngine {
        McEuropeanEngine::new(
            MonteCarloConfig::builder()
                .paths(paths)
                .seed(42)
                .variance_reduction(vr)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn mc_european_call_converges_to_bs() {
        let out = engine(100_000, VarianceReduction::None)
            .price(&OptionSpec::european(OptionType::Call, 100.0), &params())
            .unwrap();
        let (bs, ..) = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
        assert!(
            (out.value - bs).abs() < 4.0 * out.std_error,
            "MC call = {:.4} ± {:.4}, expected {bs:.4}",
            out.value,
            out.std_error
        );
        let sqrt_n = (100_000.0_f64).sqrt();
        assert_abs_diff_eq!(out.std_error, out.std_dev / sqrt_n, epsilon = 1e-12);
        assert_eq!(out.delta, 0.0);
    }

    #[test]
    fn multi_step_paths_price_the_same_option() {
        let config = MonteCarloConfig::builder()
            .paths(40_000)
            .time_steps(12)
            .build()
            .unwrap();
        let out = McEuropeanEngine::new(config)
            .price(&OptionSpec::european(OptionType::Put, 105.0), &params())
            .unwrap();
        let (bs, ..) = black_scholes_merton(OptionType::Put, 100.0, 105.0, 0.05, 0.0, 0.2, 1.0);
        assert!((out.value - bs).abs() < 4.0 * out.std_error);
    }

    #[test]
    fn antithetic_sample_is_halved() {
        let e = engine(1001, VarianceReduction::Antithetic);
        let spec = OptionSpec::european(OptionType::Call, 100.0);
        let raw = e.discounted_payoffs(&spec, &params());
        assert_eq!(raw.len(), 1001);
        let out = e.price(&spec, &params()).unwrap();
        let reduced = VarianceReduction::Antithetic.reduce(&raw);
        assert_eq!(reduced.len(), 501);
        let sqrt_n = (501.0_f64).sqrt();
        assert_abs_diff_eq!(out.std_error, out.std_dev / sqrt_n, epsilon = 1e-12);
    }

    #[test]
    fn same_seed_is_reproducible() {
        let spec = OptionSpec::european(OptionType::Call, 110.0);
        let a = engine(5_000, VarianceReduction::MomentMatching);
        let b = engine(5_000, VarianceReduction::MomentMatching);
        assert_eq!(a.price(&spec, &params()), b.price(&spec, &params()));
    }

    #[test]
    fn rejects_american() {
        let err = McEuropeanEngine::default()
            .price(&OptionSpec::american(OptionType::Call, 100.0), &params())
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedExercise {
                engine: "McEuropeanEngine",
                required: "European"
            }
        );
    }

    #[test]
    fn degenerate_inputs_give_discounted_intrinsic() {
        let flat = OptionParams::new(120.0, 100.0, 0.05, 0.0, 0.0, 1.0);
        let out = McEuropeanEngine::default()
            .price(&OptionSpec::european(OptionType::Call, 100.0), &flat)
            .unwrap();
        assert_abs_diff_eq!(out.value, 20.0 * (-0.05_f64).exp(), epsilon = 1e-12);
        assert_eq!(out.std_error, 0.0);

        let expired = OptionParams::new(120.0, 100.0, 0.05, 0.0, 0.2, 0.0);
        let out = McEuropeanEngine::default()
            .price(&OptionSpec::european(OptionType::Call, 100.0), &expired)
            .unwrap();
        assert_abs_diff_eq!(out.value, 20.0, epsilon = 1e-12);
    }
}
