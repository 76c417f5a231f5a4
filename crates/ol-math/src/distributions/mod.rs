//! Probability distributions.
//!
//! Only the standard normal is needed by the pricing engines; the
//! cumulative function delegates to the `statrs` complementary error
//! function and is accurate to about 1e-11.

pub mod normal;

pub use normal::{normal_cdf, normal_pdf};
