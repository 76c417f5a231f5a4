//! # ol-pricingengines
//!
//! Pricing engines for vanilla and path-dependent options under
//! Black-Scholes dynamics.
//!
//! ## Engines
//!
//! - [`AnalyticEuropeanEngine`] - Black-Scholes-Merton closed form with Greeks
//! - [`BinomialEngine`] - Cox-Ross-Rubinstein lattice, European or American
//! - [`TrinomialEngine`] - moment-matched trinomial lattice
//! - [`McEuropeanEngine`] - Monte Carlo for European payoffs
//! - [`McAmericanEngine`] - Longstaff-Schwartz least-squares Monte Carlo
//! - [`McPathDependentEngine`] - Monte Carlo for Asian, barrier and lookback options
//!
//! Engines are immutable values built from the configurations in [`config`]
//! and all implement [`PricingEngine`](ol_instruments::PricingEngine).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_engine;
pub mod config;
mod lattice_engine;
pub mod mc_american_engine;
pub mod mc_european_engine;
pub mod mc_path_dependent_engine;
pub mod trinomial_engine;

pub use analytic_european_engine::{black_scholes_merton, AnalyticEuropeanEngine};
pub use binomial_engine::BinomialEngine;
pub use config::{LatticeConfig, LsmcConfig, MonteCarloConfig, PathDependentConfig};
pub use mc_american_engine::{ContinuationRegression, McAmericanEngine};
pub use mc_european_engine::McEuropeanEngine;
pub use mc_path_dependent_engine::McPathDependentEngine;
pub use trinomial_engine::TrinomialEngine;
