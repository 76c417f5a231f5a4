//! Descriptive statistics over a sample of reals.
//!
//! These are the reductions every Monte Carlo engine applies to its
//! discounted-payoff sample: mean, Bessel-corrected variance and standard
//! deviation, and the standard error of the mean.

use ol_core::Real;

/// Arithmetic mean. Returns 0 for an empty sample.
pub fn mean(data: &[Real]) -> Real {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<Real>() / data.len() as Real
}

/// Unbiased (Bessel-corrected) sample variance.
///
/// Returns 0 for samples with fewer than two elements.
pub fn variance(data: &[Real]) -> Real {
    if data.len() < 2 {
        return 0.0;
    }
    let mu = mean(data);
    let accum: Real = data.iter().map(|x| (x - mu) * (x - mu)).sum();
    accum / (data.len() - 1) as Real
}

/// Sample standard deviation, `√variance`.
///
/// Returns 0 for samples with fewer than two elements.
pub fn standard_deviation(data: &[Real]) -> Real {
    variance(data).sqrt()
}

/// Standard error of the mean, `standard_deviation / √n`.
///
/// Returns 0 for an empty sample.
pub fn standard_error(data: &[Real]) -> Real {
    if data.is_empty() {
        return 0.0;
    }
    standard_deviation(data) / (data.len() as Real).sqrt()
}
