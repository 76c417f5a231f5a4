//! Side-by-side comparison of every vanilla engine.

use super::{cell, MarketArgs};
use crate::config::{FileConfig, SimulationOverrides};
use crate::error::Result;
use ol_core::Real;
use ol_instruments::{OptionParams, OptionSpec, OptionType, PricingEngine};
use ol_pricingengines::{
    AnalyticEuropeanEngine, BinomialEngine, McAmericanEngine, McEuropeanEngine, TrinomialEngine,
};
use tracing::info;

/// One engine's values for the four vanilla contracts.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub engine: &'static str,
    pub european_call: Option<Real>,
    pub european_put: Option<Real>,
    pub american_call: Option<Real>,
    pub american_put: Option<Real>,
}

impl ComparisonRow {
    fn render(&self) -> String {
        format!(
            "{:<12}{}{}{}{}",
            self.engine,
            cell(self.european_call),
            cell(self.european_put),
            cell(self.american_call),
            cell(self.american_put)
        )
    }
}

fn value(engine: &dyn PricingEngine, spec: &OptionSpec, params: &OptionParams) -> Result<Real> {
    Ok(engine.price(spec, params)?.value)
}

/// Price the four contracts with every engine that supports them.
pub fn rows(
    engines: &[(&'static str, &dyn PricingEngine, bool, bool)],
    strike: Real,
    params: &OptionParams,
) -> Result<Vec<ComparisonRow>> {
    let contracts = |american: bool, option_type| {
        if american {
            OptionSpec::american(option_type, strike)
        } else {
            OptionSpec::european(option_type, strike)
        }
    };
    engines
        .iter()
        .map(|&(name, engine, european, american)| {
            let price = |is_american: bool, option_type| -> Result<Option<Real>> {
                let supported = if is_american { american } else { european };
                if !supported {
                    return Ok(None);
                }
                value(engine, &contracts(is_american, option_type), params).map(Some)
            };
            Ok(ComparisonRow {
                engine: name,
                european_call: price(false, OptionType::Call)?,
                european_put: price(false, OptionType::Put)?,
                american_call: price(true, OptionType::Call)?,
                american_put: price(true, OptionType::Put)?,
            })
        })
        .collect()
}

/// `optionlab compare`
pub fn run(file: &FileConfig, market: &MarketArgs) -> Result<()> {
    let params = market.params();
    info!(%params, "comparing vanilla engines");

    let sim = SimulationOverrides::default();
    let analytic = AnalyticEuropeanEngine::new();
    let binomial = BinomialEngine::new(file.binomial(None)?);
    let trinomial = TrinomialEngine::new(file.trinomial(None)?);
    let mc = McEuropeanEngine::new(file.monte_carlo(&sim)?);
    let lsmc = McAmericanEngine::new(file.lsmc(&sim, None)?);

    let engines: [(&'static str, &dyn PricingEngine, bool, bool); 5] = [
        ("Analytic", &analytic, true, false),
        ("Binomial", &binomial, true, true),
        ("Trinomial", &trinomial, true, true),
        ("MC", &mc, true, false),
        ("LSMC", &lsmc, false, true),
    ];
    let table = rows(&engines, market.strike, &params)?;

    println!(
        "{:<12}{:>12}{:>12}{:>12}{:>12}",
        "Engine", "Euro call", "Euro put", "Amer call", "Amer put"
    );
    println!("{}", "-".repeat(60));
    for row in &table {
        println!("{}", row.render());
    }

    if let Some(row) = table.iter().find(|r| r.engine == "Binomial") {
        if let (Some(ec), Some(ep), Some(ac), Some(ap)) =
            (row.european_call, row.european_put, row.american_call, row.american_put)
        {
            println!();
            println!("Early-exercise premium (binomial)");
            println!("{:<12}{:>12.4}", "Call", ac - ec);
            println!("{:<12}{:>12.4}", "Put", ap - ep);
        }
    }
    Ok(())
}
