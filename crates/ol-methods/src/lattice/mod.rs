//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`BinomialTree`] - recombining Cox-Ross-Rubinstein tree
//! * [`TrinomialTree`] - recombining tree with moment-matched probabilities
//! * [`roll_back`] - backward induction with optional early exercise
//! * [`spot_greeks`] - finite-difference delta and gamma from a log-spot bump

pub mod binomial_tree;
pub mod trinomial_tree;

pub use binomial_tree::BinomialTree;
pub use trinomial_tree::TrinomialTree;

use ol_core::Real;
use ol_instruments::ExerciseStyle;

// ─── Lattice ──────────────────────────────────────────────────────────────────

/// A recombining tree with homogeneous branching.
pub trait Lattice {
    /// Number of branches leaving every node.
    const BRANCHES: usize;

    /// Number of time steps.
    fn steps(&self) -> usize;
    /// Number of nodes at time step `i`.
    fn size(&self, i: usize) -> usize;
    /// Index at step `i+1` reached from node `(i, index)` through `branch`.
    fn descendant(&self, i: usize, index: usize, branch: usize) -> usize;
    /// Probability of `branch` at node `(i, index)`.
    fn probability(&self, i: usize, index: usize, branch: usize) -> Real;
    /// Spot at node `(i, index)`.
    fn underlying(&self, i: usize, index: usize) -> Real;
    /// Per-step discount factor.
    fn discount(&self) -> Real;
}

impl Lattice for BinomialTree {
    const BRANCHES: usize = 2;

    fn steps(&self) -> usize {
        BinomialTree::steps(self)
    }
    fn size(&self, i: usize) -> usize {
        BinomialTree::size(self, i)
    }
    fn descendant(&self, i: usize, index: usize, branch: usize) -> usize {
        BinomialTree::descendant(self, i, index, branch)
    }
    fn probability(&self, i: usize, index: usize, branch: usize) -> Real {
        BinomialTree::probability(self, i, index, branch)
    }
    fn underlying(&self, i: usize, index: usize) -> Real {
        BinomialTree::underlying(self, i, index)
    }
    fn discount(&self) -> Real {
        BinomialTree::discount(self)
    }
}

impl Lattice for TrinomialTree {
    const BRANCHES: usize = 3;

    fn steps(&self) -> usize {
        TrinomialTree::steps(self)
    }
    fn size(&self, i: usize) -> usize {
        TrinomialTree::size(self, i)
    }
    fn descendant(&self, i: usize, index: usize, branch: usize) -> usize {
        TrinomialTree::descendant(self, i, index, branch)
    }
    fn probability(&self, i: usize, index: usize, branch: usize) -> Real {
        TrinomialTree::probability(self, i, index, branch)
    }
    fn underlying(&self, i: usize, index: usize) -> Real {
        TrinomialTree::underlying(self, i, index)
    }
    fn discount(&self) -> Real {
        TrinomialTree::discount(self)
    }
}

// ─── Backward induction ───────────────────────────────────────────────────────

/// Price an option by backward induction on `tree`.
///
/// Terminal values are `payoff` at the last layer. Each earlier node takes
/// the discounted probability-weighted average of its descendants; under
/// American exercise it takes the larger of that and `payoff` at the node.
/// Only the nodes still reachable from the root are updated, so the active
/// range shrinks by one layer per step.
pub fn roll_back<L: Lattice>(
    tree: &L,
    payoff: &dyn Fn(Real) -> Real,
    exercise: ExerciseStyle,
) -> Real {
    let n = tree.steps();
    let american = exercise == ExerciseStyle::American;
    let discount = tree.discount();

    let mut values: Vec<Real> = (0..tree.size(n))
        .map(|j| payoff(tree.underlying(n, j)))
        .collect();

    // Nodes at layer i only read descendants with index ≥ their own, so the
    // buffer can be overwritten in place from low to high index.
    for i in (0..n).rev() {
        for j in 0..tree.size(i) {
            let expected: Real = (0..L::BRANCHES)
                .map(|b| tree.probability(i, j, b) * values[tree.descendant(i, j, b)])
                .sum();
            let continuation = discount * expected;
            values[j] = if american {
                continuation.max(payoff(tree.underlying(i, j)))
            } else {
                continuation
            };
        }
    }

    values[0]
}

// ─── Finite-difference Greeks ─────────────────────────────────────────────────

/// Delta and gamma estimated by re-pricing at bumped spots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpotGreeks {
    /// Central-difference delta.
    pub delta: Real,
    /// Non-uniform second-difference gamma.
    pub gamma: Real,
}

/// Finite-difference delta and gamma around `spot`.
///
/// The spot is shocked in log space, `S·e^{±bump}`, and `value_at` is called
/// once per bumped spot. `base` is the unbumped value. With
/// `h_u = S_u − S` and `h_d = S − S_d`:
///
/// ```text
/// delta = (V_u − V_d) / (S_u − S_d)
/// gamma = 2·(h_d·V_u − (h_u + h_d)·V + h_u·V_d) / (h_u·h_d·(h_u + h_d))
/// ```
///
/// Both Greeks stay zero when `spot ≤ 0` or `bump ≤ 0`.
pub fn spot_greeks(
    spot: Real,
    bump: Real,
    base: Real,
    mut value_at: impl FnMut(Real) -> Real,
) -> SpotGreeks {
    let mut greeks = SpotGreeks::default();
    if spot <= 0.0 || bump <= 0.0 {
        return greeks;
    }
    let spot_up = spot * bump.exp();
    let spot_down = spot * (-bump).exp();
    let up = value_at(spot_up);
    let down = value_at(spot_down);

    let h_up = spot_up - spot;
    let h_down = spot - spot_down;
    let width = spot_up - spot_down;
    if width > 0.0 {
        greeks.delta = (up - down) / width;
    }
    let gamma_denom = h_up * h_down * (h_up + h_down);
    if h_up > 0.0 && h_down > 0.0 && gamma_denom != 0.0 {
        greeks.gamma = 2.0 * (h_down * up - (h_up + h_down) * base + h_up * down) / gamma_denom;
    }
    greeks
}

// ─── Tests ────────────────────────────────────────────────────────────────────
