//! optionlab CLI - price vanilla and path-dependent options from the shell.
//!
//! # Commands
//!
//! - `optionlab analytic` - Black-Scholes closed form with Greeks
//! - `optionlab binomial` / `trinomial` - lattice engines, `--american` for early exercise
//! - `optionlab mc-european` - Monte Carlo European
//! - `optionlab lsmc` - Longstaff-Schwartz American
//! - `optionlab path-dependent` - Asian, barrier and lookback options
//! - `optionlab compare` - every vanilla engine side by side
//! - `optionlab variance` - the four variance-reduction modes side by side
//!
//! Engine settings come from the optional `--config` TOML file; flags given
//! on the command line win over the file. Logging goes to stderr and follows
//! `RUST_LOG`, defaulting to `info` (`debug` with `--verbose`).

use clap::{Parser, Subcommand};
use ol_core::Size;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::price::Exotic;
use commands::{Barrier, MarketArgs, SimulationArgs};
use config::FileConfig;
use error::Result;

/// Option pricing with closed-form, lattice and Monte Carlo engines
#[derive(Parser)]
#[command(name = "optionlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Black-Scholes-Merton closed form (European only)
    Analytic {
        #[command(flatten)]
        market: MarketArgs,
    },

    /// Cox-Ross-Rubinstein binomial lattice
    Binomial {
        #[command(flatten)]
        market: MarketArgs,

        /// Number of lattice steps
        #[arg(long)]
        steps: Option<Size>,

        /// Allow early exercise
        #[arg(long)]
        american: bool,
    },

    /// Moment-matched trinomial lattice
    Trinomial {
        #[command(flatten)]
        market: MarketArgs,

        /// Number of lattice steps
        #[arg(long)]
        steps: Option<Size>,

        /// Allow early exercise
        #[arg(long)]
        american: bool,
    },

    /// Monte Carlo European
    McEuropean {
        #[command(flatten)]
        market: MarketArgs,

        #[command(flatten)]
        sim: SimulationArgs,
    },

    /// Longstaff-Schwartz least-squares Monte Carlo (American only)
    Lsmc {
        #[command(flatten)]
        market: MarketArgs,

        #[command(flatten)]
        sim: SimulationArgs,

        /// Highest Laguerre polynomial degree in the regression
        #[arg(long)]
        degree: Option<usize>,
    },

    /// Monte Carlo Asian, barrier or lookback option
    PathDependent {
        #[command(flatten)]
        market: MarketArgs,

        #[command(flatten)]
        sim: SimulationArgs,

        /// Exotic payoff
        #[arg(long, value_enum, default_value_t = Exotic::Asian)]
        kind: Exotic,

        /// Barrier level (barrier options only)
        #[arg(long)]
        level: Option<f64>,

        /// Barrier direction and knock behaviour (barrier options only)
        #[arg(long, value_enum)]
        barrier: Option<Barrier>,
    },

    /// Price European and American calls and puts with every vanilla engine
    Compare {
        #[command(flatten)]
        market: MarketArgs,
    },

    /// Compare variance-reduction modes for MC European and LSMC
    Variance {
        #[command(flatten)]
        market: MarketArgs,

        /// Number of simulated paths
        #[arg(short = 'n', long)]
        paths: Option<Size>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let file = FileConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analytic { market } => commands::price::analytic(&market),
        Commands::Binomial {
            market,
            steps,
            american,
        } => commands::price::binomial(&file, &market, steps, american),
        Commands::Trinomial {
            market,
            steps,
            american,
        } => commands::price::trinomial(&file, &market, steps, american),
        Commands::McEuropean { market, sim } => commands::price::mc_european(&file, &market, &sim),
        Commands::Lsmc {
            market,
            sim,
            degree,
        } => commands::price::lsmc(&file, &market, &sim, degree),
        Commands::PathDependent {
            market,
            sim,
            kind,
            level,
            barrier,
        } => {
            let spec = commands::price::exotic_spec(&market, kind, level, barrier)?;
            commands::price::path_dependent(&file, &market, &sim, &spec)
        }
        Commands::Compare { market } => commands::compare::run(&file, &market),
        Commands::Variance { market, paths } => commands::variance::run(&file, &market, paths),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "pricing failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
