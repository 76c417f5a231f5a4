//! Longstaff-Schwartz Monte Carlo engine for American vanilla options.
//!
//! Paths are simulated once on a uniform grid of exercise dates. Walking
//! backward from the last interior date, the discounted future cash flow of
//! every in-the-money path is regressed on Laguerre polynomials of the
//! rescaled spot; a path exercises when its intrinsic value beats the fitted
//! continuation value. Out-of-the-money paths take no part in either the
//! regression or the exercise decision.
//!
//! Reference: Longstaff & Schwartz (2001), *Valuing American Options by
//! Simulation: A Simple Least-Squares Approach*.

use crate::config::LsmcConfig;
use ol_core::{errors::Error, errors::Result, Real};
use ol_instruments::{ExerciseStyle, OptionParams, OptionSpec, PriceOutputs, PricingEngine};
use ol_math::linear_least_squares::{laguerre_basis_into, NormalEquations};
use ol_math::statistics;
use tracing::{debug, trace};

const ENGINE: &str = "McAmericanEngine";

/// Strikes below this are treated as zero when choosing the basis scale.
const SCALE_FLOOR: Real = 1e-12;

// ─── ContinuationRegression ───────────────────────────────────────────────────

/// Fitted continuation value as a function of spot.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuationRegression {
    coefficients: Vec<Real>,
    inv_scale: Real,
}

impl ContinuationRegression {
    /// Least-squares fit of `cash_flows` on `L₀ … L_degree` of `spot / scale`.
    ///
    /// With no observations every coefficient is zero. A singular normal
    /// system falls back to the flat estimate `mean(cash_flows)`.
    pub fn fit(spots: &[Real], cash_flows: &[Real], degree: usize, scale: Real) -> Self {
        debug_assert_eq!(spots.len(), cash_flows.len());
        let dim = degree + 1;
        let inv_scale = if scale > SCALE_FLOOR {
            1.0 / scale
        } else {
            1.0
        };
        let mut coefficients = vec![0.0; dim];
        if spots.is_empty() {
            return Self {
                coefficients,
                inv_scale,
            };
        }

        let mut equations = NormalEquations::new(dim);
        let mut phi = vec![0.0; dim];
        for (&spot, &cf) in spots.iter().zip(cash_flows) {
            laguerre_basis_into(spot.max(0.0) * inv_scale, &mut phi);
            equations.add(&phi, cf);
        }

        match equations.solve() {
            Some(beta) => coefficients.copy_from_slice(beta.as_slice()),
            None => {
                let mean = statistics::mean(cash_flows);
                debug!(
                    observations = equations.observations(),
                    degree,
                    fallback = mean,
                    "singular regression, using sample mean"
                );
                coefficients[0] = mean;
            }
        }
        Self {
            coefficients,
            inv_scale,
        }
    }

    /// Regression coefficients, lowest degree first.
    pub fn coefficients(&self) -> &[Real] {
        &self.coefficients
    }

    /// Fitted continuation value at `spot`.
    pub fn continuation(&self, spot: Real, basis: &mut [Real]) -> Real {
        laguerre_basis_into(spot.max(0.0) * self.inv_scale, basis);
        self.coefficients
            .iter()
            .zip(basis.iter())
            .map(|(c, l)| c * l)
            .sum()
    }
}

// ─── McAmericanEngine ─────────────────────────────────────────────────────────

/// Longstaff-Schwartz Monte Carlo engine for American vanilla options.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct McAmericanEngine {
    config: LsmcConfig,
}

impl McAmericanEngine {
    /// Create an engine from a configuration.
    pub fn new(config: LsmcConfig) -> Self {
        Self { config }
    }

    /// Replace the whole configuration.
    pub fn with_config(self, config: LsmcConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &LsmcConfig {
        &self.config
    }

    /// Per-path cash flows discounted to time zero, before variance-reduction
    /// post-processing. `params` must not be degenerate.
    pub fn cash_flows(&self, spec: &OptionSpec, params: &OptionParams) -> Vec<Real> {
        let paths = self.config.generator().generate(params);
        let n_paths = paths.paths();
        let steps = paths.time_steps();
        let dt = params.maturity / steps as Real;
        let step_discount = (-params.rate * dt).exp();
        let degree = self.config.polynomial_degree();
        let scale = if params.strike > SCALE_FLOOR {
            params.strike
        } else {
            params.spot.max(1.0)
        };

        let mut cash: Vec<Real> = (0..n_paths)
            .map(|i| spec.intrinsic(paths.terminal(i)))
            .collect();

        let mut itm_paths = Vec::with_capacity(n_paths);
        let mut itm_spots = Vec::with_capacity(n_paths);
        let mut itm_cash = Vec::with_capacity(n_paths);
        let mut basis = vec![0.0; degree + 1];

        for step in (1..steps).rev() {
            for cf in cash.iter_mut() {
                *cf *= step_discount;
            }

            itm_paths.clear();
            itm_spots.clear();
            itm_cash.clear();
            for (i, &cf) in cash.iter().enumerate() {
                let spot = paths.spot(i, step);
                if spec.intrinsic(spot) > 0.0 {
                    itm_paths.push(i);
                    itm_spots.push(spot);
                    itm_cash.push(cf);
                }
            }
            if itm_paths.is_empty() {
                trace!(step, in_the_money = 0, "no exercise candidates");
                continue;
            }

            let regression = ContinuationRegression::fit(&itm_spots, &itm_cash, degree, scale);
            let mut exercised = 0usize;
            for (&i, &spot) in itm_paths.iter().zip(&itm_spots) {
                let intrinsic = spec.intrinsic(spot);
                if intrinsic > regression.continuation(spot, &mut basis) {
                    cash[i] = intrinsic;
                    exercised += 1;
                }
            }
            trace!(
                step,
                in_the_money = itm_paths.len(),
                exercised,
                "exercise date"
            );
        }

        for cf in cash.iter_mut() {
            *cf *= step_discount;
        }

        let intrinsic_now = spec.intrinsic(params.spot);
        if intrinsic_now > 0.0 {
            for cf in cash.iter_mut() {
                *cf = cf.max(intrinsic_now);
            }
        }
        cash
    }
}

impl PricingEngine for McAmericanEngine {
    fn price(&self, spec: &OptionSpec, params: &OptionParams) -> Result<PriceOutputs> {
        if spec.exercise != ExerciseStyle::American {
            return Err(Error::UnsupportedExercise {
                engine: ENGINE,
                required: "American",
            });
        }

        if params.is_degenerate() {
            debug!(engine = ENGINE, %params, "degenerate inputs, intrinsic value");
            return Ok(PriceOutputs::from_value(spec.intrinsic(params.spot)));
        }

        let vr = self.config.variance_reduction();
        let sample = vr.reduce(&self.cash_flows(spec, params));
        let out = PriceOutputs::from_sample(&sample);
        debug!(
            engine = ENGINE,
            paths = self.config.paths(),
            time_steps = self.config.time_steps(),
            degree = self.config.polynomial_degree(),
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
    use approx::assert_abs_diff_eq;
    use ol_instruments::OptionType;
    use ol_methods::VarianceReduction;

    fn params() -> OptionParams {
        OptionParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 1.0)
    }

    fn engine(paths: usize, steps: usize) -> McAmericanEngine {
        McAmericanEngine::new(
            LsmcConfig::builder()
                .paths(paths)
                .time_steps(steps)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn regression_recovers_linear_continuation() {
        // y = 3 − 2·(S/100) is spanned by L0 and L1
        let spots: Vec<Real> = (0..50).map(|i| 60.0 + i as Real).collect();
        let cfs: Vec<Real> = spots.iter().map(|s| 3.0 - 2.0 * s / 100.0).collect();
        let reg = ContinuationRegression::fit(&spots, &cfs, 2, 100.0);
        let mut basis = [0.0; 3];
        for &s in &[65.0, 80.0, 105.0] {
            let expected = 3.0 - 2.0 * s / 100.0;
            assert_abs_diff_eq!(reg.continuation(s, &mut basis), expected, epsilon = 1e-8);
        }
    }

    #[test]
    fn singular_regression_falls_back_to_mean() {
        // a single repeated spot cannot identify a slope
        let reg = ContinuationRegression::fit(&[90.0; 4], &[1.0, 2.0, 3.0, 6.0], 2, 100.0);
        assert_eq!(reg.coefficients(), &[3.0, 0.0, 0.0]);
        let mut basis = [0.0; 3];
        assert_abs_diff_eq!(reg.continuation(123.0, &mut basis), 3.0, epsilon = 1e-15);
    }

    #[test]
    fn empty_regression_is_zero() {
        let reg = ContinuationRegression::fit(&[], &[], 3, 0.0);
        assert_eq!(reg.coefficients(), &[0.0; 4]);
    }

    #[test]
    fn american_put_near_reference() {
        // S=K=100, r=5%, σ=20%, T=1: American put ≈ 6.09
        let out = engine(20_000, 50)
            .price(&OptionSpec::american(OptionType::Put, 100.0), &params())
            .unwrap();
        assert!(
            (out.value - 6.09).abs() < 0.2,
            "LSMC put = {:.4} ± {:.4}",
            out.value,
            out.std_error
        );
        assert!(out.std_error > 0.0);
    }

    #[test]
    fn deep_itm_put_is_worth_intrinsic() {
        let p = params().with_spot(50.0);
        let out = engine(2_000, 20)
            .price(&OptionSpec::american(OptionType::Put, 100.0), &p)
            .unwrap();
        assert!(out.value >= 50.0 - 1e-12, "value = {}", out.value);
    }

    #[test]
    fn rejects_european() {
        let err = McAmericanEngine::default()
            .price(&OptionSpec::european(OptionType::Put, 100.0), &params())
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("American"), "{err}");
    }

    #[test]
    fn degenerate_inputs_give_intrinsic() {
        let expired = OptionParams::new(80.0, 100.0, 0.05, 0.0, 0.2, -0.5);
        let out = McAmericanEngine::default()
            .price(&OptionSpec::american(OptionType::Put, 100.0), &expired)
            .unwrap();
        assert_eq!(out, PriceOutputs::from_value(20.0));
    }

    #[test]
    fn antithetic_halves_the_sample() {
        let config = LsmcConfig::builder()
            .paths(2_000)
            .time_steps(10)
            .variance_reduction(VarianceReduction::Antithetic)
            .build()
            .unwrap();
        let e = McAmericanEngine::new(config);
        let spec = OptionSpec::american(OptionType::Put, 100.0);
        let out = e.price(&spec, &params()).unwrap();
        let raw = e.cash_flows(&spec, &params());
        assert_eq!(raw.len(), 2_000);
        let sqrt_n = (1_000.0_f64).sqrt();
        assert_abs_diff_eq!(out.std_error, out.std_dev / sqrt_n, epsilon = 1e-12);
    }
}
