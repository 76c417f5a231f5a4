//! Shared driver for the lattice engines.

use crate::config::LatticeConfig;
use ol_core::{errors::Error, errors::Result, Real};
use ol_instruments::{OptionParams, OptionSpec, PriceOutputs};
use ol_methods::spot_greeks;
use tracing::debug;

/// Value at the unbumped spot plus finite-difference delta and gamma.
///
/// `value_from_tree(spot)` must answer degenerate inputs itself; this only
/// rejects a zero step count.
pub(crate) fn price_with_greeks(
    engine: &'static str,
    config: &LatticeConfig,
    spec: &OptionSpec,
    params: &OptionParams,
    value_from_tree: impl Fn(Real) -> Real,
) -> Result<PriceOutputs> {
    if config.steps() == 0 {
        return Err(Error::InvalidConfiguration(format!("{engine} requires at least one step")));
    }
    if params.is_degenerate() {
        debug!(engine, %params, exercise = %spec.exercise, "degenerate inputs, intrinsic value");
    }

    let base = value_from_tree(params.spot);
    let greeks = spot_greeks(params.spot, config.bump(), base, &value_from_tree);
    Ok(PriceOutputs {
        value: base,
        delta: greeks.delta,
        gamma: greeks.gamma,
        ..PriceOutputs::default()
    })
}
