//! # ol-methods
//!
//! Numerical methods: recombining lattices with backward induction and
//! Monte Carlo path generation.
//!
//! # Modules
//!
//! * [`lattice`] - CRR binomial and moment-matched trinomial trees,
//!   backward induction, finite-difference spot Greeks
//! * [`monte_carlo`] - GBM path generation and variance reduction

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial trees, trinomial trees, backward induction.
pub mod lattice;

/// Monte Carlo simulation: path generation and variance reduction.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{roll_back, spot_greeks, BinomialTree, Lattice, SpotGreeks, TrinomialTree};
pub use monte_carlo::{moment_match, PathGenerator, SimulatedPaths, VarianceReduction};
