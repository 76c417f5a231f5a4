//! Single-engine pricing commands.
//!
//! Each command prices one contract with one engine and prints the full
//! [`PriceOutputs`](ol_instruments::PriceOutputs) table.

use super::{outputs_table, Barrier, MarketArgs, SimulationArgs};
use crate::config::FileConfig;
use crate::error::{CliError, Result};
use ol_core::Size;
use ol_instruments::{ExerciseStyle, PathDependentOptionSpec, PricingEngine};
use ol_pricingengines::{
    AnalyticEuropeanEngine, BinomialEngine, McAmericanEngine, McEuropeanEngine,
    McPathDependentEngine, TrinomialEngine,
};
use tracing::info;

fn exercise(american: bool) -> ExerciseStyle {
    if american {
        ExerciseStyle::American
    } else {
        ExerciseStyle::European
    }
}

/// `optionlab analytic`
pub fn analytic(market: &MarketArgs) -> Result<()> {
    let params = market.params();
    info!(%params, "Black-Scholes closed form");
    let spec = market.spec(ExerciseStyle::European);
    let out = AnalyticEuropeanEngine::new().price(&spec, &params)?;
    println!("{}", outputs_table("Analytic European", &out));
    Ok(())
}

/// `optionlab binomial`
pub fn binomial(
    file: &FileConfig,
    market: &MarketArgs,
    steps: Option<Size>,
    american: bool,
) -> Result<()> {
    let config = file.binomial(steps)?;
    let spec = market.spec(exercise(american));
    let params = market.params();
    info!(%params, steps = config.steps(), exercise = %spec.exercise, "binomial lattice");
    let out = BinomialEngine::new(config).price(&spec, &params)?;
    let title = format!("Binomial {} ({} steps)", spec.exercise, config.steps());
    println!("{}", outputs_table(&title, &out));
    Ok(())
}

/// `optionlab trinomial`
pub fn trinomial(
    file: &FileConfig,
    market: &MarketArgs,
    steps: Option<Size>,
    american: bool,
) -> Result<()> {
    let config = file.trinomial(steps)?;
    let spec = market.spec(exercise(american));
    let params = market.params();
    info!(%params, steps = config.steps(), exercise = %spec.exercise, "trinomial lattice");
    let out = TrinomialEngine::new(config).price(&spec, &params)?;
    let title = format!("Trinomial {} ({} steps)", spec.exercise, config.steps());
    println!("{}", outputs_table(&title, &out));
    Ok(())
}

/// `optionlab mc-european`
pub fn mc_european(file: &FileConfig, market: &MarketArgs, sim: &SimulationArgs) -> Result<()> {
    let config = file.monte_carlo(&sim.overrides())?;
    let params = market.params();
    info!(
        %params,
        paths = config.paths(),
        time_steps = config.time_steps(),
        variance_reduction = %config.variance_reduction(),
        "monte carlo european"
    );
    let spec = market.spec(ExerciseStyle::European);
    let out = McEuropeanEngine::new(config).price(&spec, &params)?;
    let title = format!("MC European ({} paths)", config.paths());
    println!("{}", outputs_table(&title, &out));
    Ok(())
}

/// `optionlab lsmc`
pub fn lsmc(
    file: &FileConfig,
    market: &MarketArgs,
    sim: &SimulationArgs,
    degree: Option<usize>,
) -> Result<()> {
    let config = file.lsmc(&sim.overrides(), degree)?;
    let params = market.params();
    info!(
        %params,
        paths = config.paths(),
        time_steps = config.time_steps(),
        degree = config.polynomial_degree(),
        variance_reduction = %config.variance_reduction(),
        "longstaff-schwartz american"
    );
    let spec = market.spec(ExerciseStyle::American);
    let out = McAmericanEngine::new(config).price(&spec, &params)?;
    let title = format!(
        "LSMC American ({} paths x {} dates)",
        config.paths(),
        config.time_steps()
    );
    println!("{}", outputs_table(&title, &out));
    Ok(())
}

/// Which exotic the `path-dependent` command prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Exotic {
    Asian,
    Barrier,
    Lookback,
}

/// Build the path-dependent contract from the command-line flags.
pub fn exotic_spec(
    market: &MarketArgs,
    exotic: Exotic,
    level: Option<f64>,
    barrier: Option<Barrier>,
) -> Result<PathDependentOptionSpec> {
    let option_type = market.side.into();
    Ok(match exotic {
        Exotic::Asian => PathDependentOptionSpec::asian(option_type, market.strike),
        Exotic::Lookback => PathDependentOptionSpec::lookback(option_type, market.strike),
        Exotic::Barrier => {
            let (Some(level), Some(barrier)) = (level, barrier) else {
                return Err(CliError::InvalidArgument(
                    "a barrier option needs both --level and --barrier".into(),
                ));
            };
            PathDependentOptionSpec::barrier(option_type, market.strike, level, barrier.into())
        }
    })
}

/// `optionlab path-dependent`
pub fn path_dependent(
    file: &FileConfig,
    market: &MarketArgs,
    sim: &SimulationArgs,
    spec: &PathDependentOptionSpec,
) -> Result<()> {
    let config = file.path_dependent(&sim.overrides())?;
    let params = market.params();
    info!(
        %params,
        kind = ?spec.kind,
        paths = config.paths(),
        time_steps = config.time_steps(),
        "monte carlo path-dependent"
    );
    let out = McPathDependentEngine::new(config).price(spec, &params)?;
    let title = format!("MC {:?} {}", spec.kind, spec.option_type);
    println!("{}", outputs_table(&title, &out));
    Ok(())
}
