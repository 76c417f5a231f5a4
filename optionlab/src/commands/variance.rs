//! Variance-reduction comparison for the Monte Carlo engines.

use super::MarketArgs;
use crate::config::{FileConfig, SimulationOverrides};
use crate::error::Result;
use ol_core::Size;
use ol_instruments::{ExerciseStyle, PriceOutputs, PricingEngine};
use ol_methods::VarianceReduction;
use ol_pricingengines::{McAmericanEngine, McEuropeanEngine};
use tracing::info;

/// MC European and LSMC outputs for one variance-reduction mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceRow {
    pub mode: VarianceReduction,
    pub european: PriceOutputs,
    pub american: PriceOutputs,
}

/// Price with every variance-reduction mode at the same seed.
pub fn rows(
    file: &FileConfig,
    market: &MarketArgs,
    paths: Option<Size>,
) -> Result<Vec<VarianceRow>> {
    let params = market.params();
    VarianceReduction::ALL
        .iter()
        .map(|&mode| {
            let sim = SimulationOverrides {
                paths,
                variance_reduction: Some(mode),
                ..Default::default()
            };
            let european = McEuropeanEngine::new(file.monte_carlo(&sim)?)
                .price(&market.spec(ExerciseStyle::European), &params)?;
            let american = McAmericanEngine::new(file.lsmc(&sim, None)?)
                .price(&market.spec(ExerciseStyle::American), &params)?;
            Ok(VarianceRow {
                mode,
                european,
                american,
            })
        })
        .collect()
}

/// `optionlab variance`
pub fn run(file: &FileConfig, market: &MarketArgs, paths: Option<Size>) -> Result<()> {
    info!(params = %market.params(), ?paths, "variance reduction comparison");
    let table = rows(file, market, paths)?;

    for (title, pick) in [
        ("MC European", (|r: &VarianceRow| r.european) as fn(&VarianceRow) -> PriceOutputs),
        ("LSMC American", |r: &VarianceRow| r.american),
    ] {
        println!("{title}");
        println!(
            "{:<28}{:>12}{:>12}{:>12}",
            "Mode", "Value", "Std dev", "Std error"
        );
        println!("{}", "-".repeat(64));
        for row in &table {
            let out = pick(row);
            println!(
                "{:<28}{:>12.4}{:>12.4}{:>12.6}",
                row.mode.as_str(),
                out.value,
                out.std_dev,
                out.std_error
            );
        }
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Side;

    #[test]
    fn one_row_per_mode() {
        let market = MarketArgs {
            spot: 100.0,
            strike: 100.0,
            rate: 0.05,
            dividend: 0.0,
            volatility: 0.2,
            maturity: 1.0,
            side: Side::Put,
        };
        let file = FileConfig::from_toml("[lsmc]\ntime_steps = 10\n").unwrap();
        let table = rows(&file, &market, Some(2_000)).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table[0].mode, VarianceReduction::None);
        for row in &table {
            assert!(row.european.value > 0.0);
            let floor = row.european.value - 4.0 * row.european.std_error;
            assert!(row.american.value >= floor);
        }
    }
}
