//! # ol-math
//!
//! Mathematical collaborators of the pricing engines: the standard normal
//! distribution (via statrs), descriptive sample statistics, a seeded
//! Mersenne-Twister normal generator, and the Laguerre-basis least-squares
//! solver used by Longstaff-Schwartz regression (over nalgebra).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Polynomial bases and normal-equations least squares.
pub mod linear_least_squares;

/// Random number generators.
pub mod random_numbers;

/// Descriptive statistics over samples.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_pdf};
pub use linear_least_squares::{laguerre_basis_into, NormalEquations, PIVOT_TOLERANCE};
pub use random_numbers::MersenneTwisterNormalRng;
pub use statistics::{mean, standard_deviation, standard_error, variance};
