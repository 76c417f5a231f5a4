//! CLI command implementations.
//!
//! Each submodule implements one family of subcommands. The shared argument
//! groups and the table printer live here; formatting never leaks into the
//! library crates.

pub mod compare;
pub mod price;
pub mod variance;

use crate::config::SimulationOverrides;
use clap::{Args, ValueEnum};
use ol_core::Size;
use ol_instruments::{
    BarrierType, ExerciseStyle, OptionParams, OptionSpec, OptionType, PriceOutputs,
};
use ol_methods::VarianceReduction;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    Call,
    Put,
}

impl From<Side> for OptionType {
    fn from(side: Side) -> Self {
        match side {
            Side::Call => OptionType::Call,
            Side::Put => OptionType::Put,
        }
    }
}

/// Barrier direction and knock behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Barrier {
    UpIn,
    UpOut,
    DownIn,
    DownOut,
}

impl From<Barrier> for BarrierType {
    fn from(barrier: Barrier) -> Self {
        match barrier {
            Barrier::UpIn => BarrierType::UpIn,
            Barrier::UpOut => BarrierType::UpOut,
            Barrier::DownIn => BarrierType::DownIn,
            Barrier::DownOut => BarrierType::DownOut,
        }
    }
}

/// Market inputs and the vanilla contract.
#[derive(Debug, Clone, Args)]
pub struct MarketArgs {
    /// Spot price of the underlying
    #[arg(long, default_value_t = 100.0)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long, default_value_t = 100.0)]
    pub strike: f64,

    /// Continuously compounded risk-free rate
    #[arg(short, long, default_value_t = 0.05)]
    pub rate: f64,

    /// Continuous dividend yield
    #[arg(short = 'q', long, default_value_t = 0.0)]
    pub dividend: f64,

    /// Volatility (annualised)
    #[arg(long = "vol", default_value_t = 0.2)]
    pub volatility: f64,

    /// Time to maturity in years
    #[arg(short = 't', long, default_value_t = 1.0)]
    pub maturity: f64,

    /// Option type
    #[arg(long = "type", value_enum, default_value_t = Side::Call)]
    pub side: Side,
}

impl MarketArgs {
    pub fn params(&self) -> OptionParams {
        OptionParams::new(
            self.spot,
            self.strike,
            self.rate,
            self.dividend,
            self.volatility,
            self.maturity,
        )
    }

    pub fn spec(&self, exercise: ExerciseStyle) -> OptionSpec {
        OptionSpec::european(self.side.into(), self.strike).with_exercise(exercise)
    }
}

/// Monte Carlo sampling flags.
#[derive(Debug, Clone, Args)]
pub struct SimulationArgs {
    /// Number of simulated paths
    #[arg(short = 'n', long)]
    pub paths: Option<Size>,

    /// Number of time steps per path
    #[arg(long)]
    pub time_steps: Option<Size>,

    /// Mersenne-Twister seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// none, antithetic, moment-matching or antithetic-moment-matching
    #[arg(long = "vr")]
    pub variance_reduction: Option<VarianceReduction>,
}

impl SimulationArgs {
    pub fn overrides(&self) -> SimulationOverrides {
        SimulationOverrides {
            paths: self.paths,
            time_steps: self.time_steps,
            seed: self.seed,
            variance_reduction: self.variance_reduction,
        }
    }
}

/// Render `outputs` as a two-column table.
pub fn outputs_table(title: &str, outputs: &PriceOutputs) -> String {
    let rows = [
        ("Value", outputs.value),
        ("Delta", outputs.delta),
        ("Gamma", outputs.gamma),
        ("Vega", outputs.vega),
        ("Theta", outputs.theta),
        ("Rho", outputs.rho),
        ("Std dev", outputs.std_dev),
        ("Std error", outputs.std_error),
    ];
    let mut out = format!("{title}\n{}\n", "-".repeat(title.len().max(26)));
    for (label, value) in rows {
        out.push_str(&format!("{label:<12}{value:>14.6}\n"));
    }
    out
}

/// A cell that may be empty when the engine does not support the contract.
pub fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:>12.4}"),
        None => format!("{:>12}", "-"),
    }
}
