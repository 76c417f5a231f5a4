//! # optionlab
//!
//! Vanilla and path-dependent option pricing under Black-Scholes dynamics:
//! closed form, binomial and trinomial lattices, and Monte Carlo engines
//! (European, Longstaff-Schwartz American, Asian/barrier/lookback).
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ol-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use optionlab::instruments::{OptionParams, OptionSpec, OptionType, PricingEngine};
//! use optionlab::pricingengines::{AnalyticEuropeanEngine, BinomialEngine};
//!
//! let params = OptionParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
//! let put = OptionSpec::american(OptionType::Put, 100.0);
//!
//! let european = AnalyticEuropeanEngine::new()
//!     .price(&OptionSpec::european(OptionType::Put, 100.0), &params)
//!     .unwrap();
//! let american = BinomialEngine::default().price(&put, &params).unwrap();
//! assert!(american.value > european.value);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ol_core as core;

/// Normal distribution, statistics, random numbers and least squares.
pub use ol_math as math;

/// Option specifications, market parameters and the engine contract.
pub use ol_instruments as instruments;

/// Numerical methods (lattices, Monte Carlo path generation).
pub use ol_methods as methods;

/// Pricing engines and their configurations.
pub use ol_pricingengines as pricingengines;

/// Convenience prelude: the types needed to price an option.
pub mod prelude {
    pub use ol_core::{Error, Real, Result};
    pub use ol_instruments::{
        BarrierType, ExerciseStyle, ExoticKind, OptionParams, OptionSpec, OptionType,
        PathDependentOptionSpec, PriceOutputs, PricingEngine,
    };
    pub use ol_methods::VarianceReduction;
    pub use ol_pricingengines::{
        AnalyticEuropeanEngine, BinomialEngine, LatticeConfig, LsmcConfig, McAmericanEngine,
        McEuropeanEngine, McPathDependentEngine, MonteCarloConfig, PathDependentConfig,
        TrinomialEngine,
    };
}
