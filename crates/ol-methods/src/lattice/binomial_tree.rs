//! Recombining Cox-Ross-Rubinstein binomial tree.
//!
//! Node `(i, j)` is the state after `j` up-moves and `i − j` down-moves,
//! with spot `x0 · u^j · d^(i−j)`, `u = exp(σ√Δt)` and `d = 1/u`. Drift is
//! carried entirely by the risk-neutral up-probability
//! `p = (exp((r − q)Δt) − d) / (u − d)`.

use ol_core::Real;
use ol_instruments::OptionParams;
use tracing::debug;

/// A recombining CRR binomial tree.
///
/// The tree has `steps + 1` time layers, with layer `i` having `i + 1` nodes.
#[derive(Debug, Clone)]
pub struct BinomialTree {
    x0: Real,
    dt: Real,
    steps: usize,
    up: Real,
    pu: Real,
    discount: Real,
}

impl BinomialTree {
    /// Cox-Ross-Rubinstein tree rooted at `spot` over `params.maturity`.
    ///
    /// Callers must pass `steps > 0`, `maturity > 0` and `volatility > 0`;
    /// degenerate inputs are answered before a tree is built. A
    /// risk-neutral probability outside `[0, 1]` is clamped.
    pub fn cox_ross_rubinstein(params: &OptionParams, spot: Real, steps: usize) -> Self {
        debug_assert!(steps > 0 && !params.is_degenerate());
        let dt = params.maturity / steps as Real;
        let up = (params.volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = ((params.rate - params.dividend_yield) * dt).exp();
        let raw = (growth - down) / (up - down);
        let pu = raw.clamp(0.0, 1.0);
        if pu != raw {
            debug!(raw, clamped = pu, steps, "binomial up-probability clamped");
        }
        Self {
            x0: spot,
            dt,
            steps,
            up,
            pu,
            discount: (-params.rate * dt).exp(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Real {
        self.dt
    }

    /// Root spot.
    pub fn x0(&self) -> Real {
        self.x0
    }

    /// Up factor `u`; the down factor is `1/u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Per-step discount factor `exp(−rΔt)`.
    pub fn discount(&self) -> Real {
        self.discount
    }

    /// Number of nodes at time step `i` (always `i + 1`).
    pub fn size(&self, i: usize) -> usize {
        i + 1
    }

    /// Index of the descendant node at step `i+1`.
    ///
    /// `branch = 0` → down, `branch = 1` → up.
    pub fn descendant(&self, _i: usize, index: usize, branch: usize) -> usize {
        index + branch
    }

    /// Spot at node `(i, index)`.
    pub fn underlying(&self, i: usize, index: usize) -> Real {
        let j = 2 * index as i32 - i as i32;
        self.x0 * self.up.powi(j)
    }

    /// Transition probability for `branch` (0 = down, 1 = up).
    pub fn probability(&self, _i: usize, _index: usize, branch: usize) -> Real {
        if branch == 1 {
            self.pu
        } else {
            1.0 - self.pu
        }
    }
}
