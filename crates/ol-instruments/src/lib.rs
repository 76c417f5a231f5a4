//! # ol-instruments
//!
//! Option specifications, market parameters, the uniform pricing result
//! record and the [`PricingEngine`] contract every engine implements.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod exercise;
pub mod instrument;
pub mod option;
pub mod payoff;

pub use exercise::ExerciseStyle;
pub use instrument::{PriceOutputs, PricingEngine};
pub use option::{BarrierType, ExoticKind, OptionParams, OptionSpec, PathDependentOptionSpec};
pub use payoff::{OptionType, Payoff, PlainVanillaPayoff};
