//! Cross-engine properties.
//!
//! These integration tests check the engines against each other and against
//! the closed form: parity, lattice convergence, early-exercise premia,
//! Monte Carlo error bars and the path-dependent payoff bounds.

use approx::assert_abs_diff_eq;
use ol_core::Error;
use ol_instruments::{
    BarrierType, OptionParams, OptionSpec, OptionType, PathDependentOptionSpec, PricingEngine,
};
use ol_methods::VarianceReduction;
use ol_pricingengines::{
    black_scholes_merton, AnalyticEuropeanEngine, BinomialEngine, LatticeConfig, LsmcConfig,
    McAmericanEngine, McEuropeanEngine, McPathDependentEngine, MonteCarloConfig, TrinomialEngine,
};
use proptest::prelude::*;

fn atm() -> OptionParams {
    OptionParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 1.0)
}

fn binomial(steps: usize) -> BinomialEngine {
    BinomialEngine::new(
        LatticeConfig::binomial()
            .steps(steps)
            .bump(0.0)
            .build()
            .unwrap(),
    )
}

fn trinomial(steps: usize) -> TrinomialEngine {
    TrinomialEngine::new(
        LatticeConfig::trinomial()
            .steps(steps)
            .bump(0.0)
            .build()
            .unwrap(),
    )
}

fn mc(paths: usize, seed: u64, vr: VarianceReduction) -> McEuropeanEngine {
    McEuropeanEngine::new(
        MonteCarloConfig::builder()
            .paths(paths)
            .seed(seed)
            .variance_reduction(vr)
            .build()
            .unwrap(),
    )
}

// ───────────────────────── analytic ─────────────────────────

#[test]
fn test_atm_call_equals_put_without_carry() {
    let params = OptionParams::new(100.0, 100.0, 0.0, 0.0, 0.3, 2.0);
    let engine = AnalyticEuropeanEngine::new();
    let call = engine
        .price(&OptionSpec::european(OptionType::Call, 100.0), &params)
        .unwrap();
    let put = engine
        .price(&OptionSpec::european(OptionType::Put, 100.0), &params)
        .unwrap();
    assert_abs_diff_eq!(call.value, put.value, epsilon = 1e-12);
    assert_abs_diff_eq!(call.gamma, put.gamma, epsilon = 1e-12);
}

proptest! {
    #[test]
    fn prop_put_call_parity(
        spot in 20.0..200.0_f64,
        strike in 20.0..200.0_f64,
        rate in -0.02..0.10_f64,
        div in 0.0..0.06_f64,
        vol in 0.05..0.8_f64,
        t in 0.05..3.0_f64,
    ) {
        let (c, ..) = black_scholes_merton(OptionType::Call, spot, strike, rate, div, vol, t);
        let (p, ..) = black_scholes_merton(OptionType::Put, spot, strike, rate, div, vol, t);
        let forward = spot * (-div * t).exp() - strike * (-rate * t).exp();
        prop_assert!((c - p - forward).abs() < 1e-9 * spot.max(strike));
    }
}

// ───────────────────────── lattices ─────────────────────────

fn mean_abs_error(
    steps: impl Iterator<Item = usize>,
    price: impl Fn(usize) -> f64,
    bs: f64,
) -> f64 {
    let errors: Vec<f64> = steps.map(|n| (price(n) - bs).abs()).collect();
    errors.iter().sum::<f64>() / errors.len() as f64
}

#[test]
fn test_lattices_converge_to_black_scholes() {
    // CRR error oscillates with the step count, so compare averages over a window
    let params = OptionParams::new(95.0, 100.0, 0.04, 0.0, 0.2, 1.0);
    let spec = OptionSpec::european(OptionType::Call, 100.0);
    let (bs, ..) = black_scholes_merton(OptionType::Call, 95.0, 100.0, 0.04, 0.0, 0.2, 1.0);

    let value = |engine: &dyn PricingEngine| engine.price(&spec, &params).unwrap().value;

    let coarse = mean_abs_error(20..30, |n| value(&binomial(n)), bs);
    let fine = mean_abs_error(1000..1010, |n| value(&binomial(n)), bs);
    assert!(fine < coarse, "binomial: {fine:.2e} vs {coarse:.2e}");
    assert!(fine < 5e-3, "binomial: fine {fine:.2e}");

    let coarse = mean_abs_error(20..30, |n| value(&trinomial(n)), bs);
    let fine = mean_abs_error(1000..1010, |n| value(&trinomial(n)), bs);
    assert!(fine < coarse, "trinomial: {fine:.2e} vs {coarse:.2e}");
    assert!(fine < 5e-3, "trinomial: fine {fine:.2e}");
}

#[test]
#[ignore = "slow: 100 000-step lattices"]
fn test_lattice_convergence_at_large_step_counts() {
    let params = OptionParams::new(95.0, 100.0, 0.04, 0.0, 0.2, 1.0);
    let spec = OptionSpec::european(OptionType::Call, 100.0);
    let (bs, ..) = black_scholes_merton(OptionType::Call, 95.0, 100.0, 0.04, 0.0, 0.2, 1.0);

    let err = |v: f64| (v - bs).abs();
    let b25 = err(binomial(25_000).price(&spec, &params).unwrap().value);
    let b100 = err(binomial(100_000).price(&spec, &params).unwrap().value);
    assert!(b100 < b25, "binomial: {b100:.2e} !< {b25:.2e}");

    let t25 = err(trinomial(25_000).price(&spec, &params).unwrap().value);
    let t100 = err(trinomial(100_000).price(&spec, &params).unwrap().value);
    assert!(t100 < t25, "trinomial: {t100:.2e} !< {t25:.2e}");
}

#[test]
fn test_american_put_carries_early_exercise_premium() {
    let params = atm();
    for engine in [&binomial(500) as &dyn PricingEngine, &trinomial(500)] {
        let euro = engine
            .price(&OptionSpec::european(OptionType::Put, 100.0), &params)
            .unwrap();
        let amer = engine
            .price(&OptionSpec::american(OptionType::Put, 100.0), &params)
            .unwrap();
        assert!(
            amer.value > euro.value + 0.1,
            "{engine:?}: {} vs {}",
            amer.value,
            euro.value
        );
    }
}

#[test]
fn test_american_call_without_dividends_is_european() {
    let params = OptionParams::new(110.0, 100.0, 0.05, 0.0, 0.25, 0.75);
    for engine in [&binomial(400) as &dyn PricingEngine, &trinomial(400)] {
        let euro = engine
            .price(&OptionSpec::european(OptionType::Call, 100.0), &params)
            .unwrap();
        let amer = engine
            .price(&OptionSpec::american(OptionType::Call, 100.0), &params)
            .unwrap();
        assert_abs_diff_eq!(amer.value, euro.value, epsilon = 1e-6);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_american_dominates_european(
        spot in 60.0..140.0_f64,
        rate in 0.0..0.08_f64,
        div in 0.0..0.05_f64,
        vol in 0.1..0.5_f64,
        call in any::<bool>(),
    ) {
        let params = OptionParams::new(spot, 100.0, rate, div, vol, 1.0);
        let option_type = if call { OptionType::Call } else { OptionType::Put };
        let engine = binomial(101);
        let euro = engine.price(&OptionSpec::european(option_type, 100.0), &params).unwrap();
        let amer = engine.price(&OptionSpec::american(option_type, 100.0), &params).unwrap();
        prop_assert!(amer.value >= euro.value - 1e-12);
        prop_assert!(amer.value >= (option_type.sign() * (spot - 100.0)).max(0.0) - 1e-12);
    }
}

// ───────────────────────── monte carlo ─────────────────────────

#[test]
fn test_antithetic_lowers_standard_error() {
    let spec = OptionSpec::european(OptionType::Call, 100.0);
    let seeds = 1..=12u64;
    let (mut plain, mut anti, mut wins) = (0.0, 0.0, 0);
    for seed in seeds.clone() {
        let a = mc(4_000, seed, VarianceReduction::None)
            .price(&spec, &atm())
            .unwrap();
        let b = mc(4_000, seed, VarianceReduction::Antithetic)
            .price(&spec, &atm())
            .unwrap();
        plain += a.std_error;
        anti += b.std_error;
        if b.std_error <= a.std_error {
            wins += 1;
        }
    }
    assert!(anti < plain, "antithetic {anti} vs plain {plain}");
    assert!(wins * 4 >= 3 * seeds.count(), "antithetic won {wins} times");
}

#[test]
fn test_every_variance_reduction_mode_is_unbiased() {
    let spec = OptionSpec::european(OptionType::Put, 100.0);
    let (bs, ..) = black_scholes_merton(OptionType::Put, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
    for vr in VarianceReduction::ALL {
        let out = mc(40_000, 7, vr).price(&spec, &atm()).unwrap();
        assert!(
            (out.value - bs).abs() < 4.0 * out.std_error + 1e-3,
            "{vr}: {} ± {} vs {bs}",
            out.value,
            out.std_error
        );
    }
}

#[test]
fn test_lsmc_is_reproducible() {
    let config = LsmcConfig::builder()
        .paths(4_000)
        .time_steps(25)
        .seed(99)
        .build()
        .unwrap();
    let spec = OptionSpec::american(OptionType::Put, 100.0);
    let a = McAmericanEngine::new(config).price(&spec, &atm()).unwrap();
    let b = McAmericanEngine::new(config).price(&spec, &atm()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.value.to_bits(), b.value.to_bits());
}

#[test]
fn test_lsmc_call_without_dividends_matches_european() {
    let out = McAmericanEngine::default()
        .price(&OptionSpec::american(OptionType::Call, 100.0), &atm())
        .unwrap();
    let (bs, ..) = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
    assert!(
        (out.value - bs).abs() < 4.0 * out.std_error + 0.1,
        "LSMC call = {} ± {}, european = {bs}",
        out.value,
        out.std_error
    );
}

// ───────────────────────── path-dependent ─────────────────────────

fn path_dependent(paths: usize, steps: usize) -> McPathDependentEngine {
    McPathDependentEngine::new(
        MonteCarloConfig::path_dependent()
            .paths(paths)
            .time_steps(steps)
            .build()
            .unwrap(),
    )
}

#[test]
fn test_knock_out_is_cheaper_than_vanilla() {
    let engine = path_dependent(10_000, 50);
    let (vanilla, ..) = black_scholes_merton(OptionType::Put, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
    let spec = PathDependentOptionSpec::barrier(OptionType::Put, 100.0, 85.0, BarrierType::DownOut);
    let out = engine.price(&spec, &atm()).unwrap();
    assert!(
        out.value >= 0.0 && out.value < vanilla,
        "down-and-out put = {}",
        out.value
    );
}

#[test]
fn test_barrier_already_breached_knocks_out() {
    // the initial spot is monitored, so a spot beyond the barrier is knocked out
    let engine = path_dependent(1_000, 10);
    let spec = PathDependentOptionSpec::barrier(OptionType::Call, 100.0, 90.0, BarrierType::UpOut);
    let out = engine.price(&spec, &atm()).unwrap();
    assert_eq!(out.value, 0.0);
}

#[test]
fn test_lookback_put_is_at_least_vanilla() {
    let engine = path_dependent(10_000, 50);
    let (vanilla, ..) = black_scholes_merton(OptionType::Put, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
    let spec = PathDependentOptionSpec::lookback(OptionType::Put, 100.0);
    let out = engine.price(&spec, &atm()).unwrap();
    assert!(out.value > vanilla, "lookback put = {}", out.value);
}

// ───────────────────────── failures ─────────────────────────

#[test]
fn test_engines_reject_unsupported_inputs() {
    let euro = OptionSpec::european(OptionType::Call, 100.0);
    let amer = OptionSpec::american(OptionType::Call, 100.0);
    let params = atm();

    fn boxed(engine: impl PricingEngine + 'static) -> Box<dyn PricingEngine> {
        Box::new(engine)
    }
    let cases = [
        (boxed(AnalyticEuropeanEngine::new()), amer),
        (boxed(McEuropeanEngine::default()), amer),
        (boxed(McAmericanEngine::default()), euro),
        (boxed(McPathDependentEngine::default()), euro),
        (boxed(BinomialEngine::new(LatticeConfig::new(0))), euro),
        (boxed(TrinomialEngine::new(LatticeConfig::new(0))), amer),
    ];
    for (engine, spec) in cases {
        let err = engine.price(&spec, &params).unwrap_err();
        assert!(err.is_invalid_argument(), "{engine:?}: {err}");
    }
}

#[test]
fn test_invalid_configurations_fail_to_build() {
    assert!(matches!(
        MonteCarloConfig::builder().paths(0).build(),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(LsmcConfig::builder().time_steps(0).build().is_err());
    assert!(LsmcConfig::builder().polynomial_degree(11).build().is_err());
    assert!(LatticeConfig::binomial().bump(f64::NAN).build().is_err());
    assert!(LatticeConfig::trinomial().bump(-1e-4).build().is_err());
}
