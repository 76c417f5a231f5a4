//! Recombining trinomial tree with moment-matched probabilities.
//!
//! The log-spot spacing is `dx = σ√(3Δt)`, so `u = exp(dx)` and `d = 1/u`.
//! Branch probabilities match the mean and variance of the log-return
//! `a = r − q − σ²/2`:
//!
//! ```text
//! p_u = 1/6 + a·√Δt / (2σ√3)
//! p_d = 1/6 − a·√Δt / (2σ√3)
//! p_m = 1 − p_u − p_d
//! ```
//!
//! Negative probabilities are clamped to zero and the triple renormalised;
//! a triple that sums to zero falls back to `(0.25, 0.5, 0.25)`.

use ol_core::Real;
use ol_instruments::OptionParams;
use tracing::debug;

const SQRT_3: Real = 1.732_050_807_568_877_2;

/// A recombining trinomial tree.
///
/// Layer `i` has `2i + 1` nodes; node `(i, index)` sits `index − i` spacings
/// away from the root in log-spot.
#[derive(Debug, Clone)]
pub struct TrinomialTree {
    x0: Real,
    dt: Real,
    steps: usize,
    up: Real,
    /// Branch probabilities (0 = down, 1 = middle, 2 = up).
    probs: [Real; 3],
    discount: Real,
}

impl TrinomialTree {
    /// Moment-matched tree rooted at `spot` over `params.maturity`.
    ///
    /// Callers must pass `steps > 0`, `maturity > 0` and `volatility > 0`.
    pub fn new(params: &OptionParams, spot: Real, steps: usize) -> Self {
        debug_assert!(steps > 0 && !params.is_degenerate());
        let dt = params.maturity / steps as Real;
        let sigma = params.volatility;
        let up = (sigma * (3.0 * dt).sqrt()).exp();
        let a = params.rate - params.dividend_yield - 0.5 * sigma * sigma;
        let shift = a * dt.sqrt() / (2.0 * sigma * SQRT_3);
        let pu = 1.0 / 6.0 + shift;
        let pd = 1.0 / 6.0 - shift;
        let pm = 1.0 - pu - pd;
        Self {
            x0: spot,
            dt,
            steps,
            up,
            probs: normalized_probabilities(pd, pm, pu),
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

    /// Number of nodes at time step `i` (always `2i + 1`).
    pub fn size(&self, i: usize) -> usize {
        2 * i + 1
    }

    /// Index of the descendant node at step `i+1`.
    ///
    /// `branch = 0` → down, `1` → middle, `2` → up.
    pub fn descendant(&self, _i: usize, index: usize, branch: usize) -> usize {
        index + branch
    }

    /// Spot at node `(i, index)`.
    pub fn underlying(&self, i: usize, index: usize) -> Real {
        let j = index as i32 - i as i32;
        self.x0 * self.up.powi(j)
    }

    /// Transition probability for `branch` (0 = down, 1 = middle, 2 = up).
    pub fn probability(&self, _i: usize, _index: usize, branch: usize) -> Real {
        self.probs[branch]
    }
}

/// Clamp a raw `(down, middle, up)` triple to non-negative values summing
/// to one.
pub fn normalized_probabilities(pd: Real, pm: Real, pu: Real) -> [Real; 3] {
    let clamped = [pd.max(0.0), pm.max(0.0), pu.max(0.0)];
    if clamped != [pd, pm, pu] {
        debug!(pd, pm, pu, "trinomial probabilities clamped");
    }
    let sum: Real = clamped.iter().sum();
    if sum == 0.0 {
        return [0.25, 0.5, 0.25];
    }
    clamped.map(|p| p / sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn probabilities_match_first_two_moments() {
        let p = OptionParams::new(100.0, 100.0, 0.05, 0.02, 0.25, 1.0);
        let tree = TrinomialTree::new(&p, 100.0, 200);
        let dx = tree.up().ln();
        let [pd, pm, pu] = [0, 1, 2].map(|b| tree.probability(0, 0, b));
        assert_abs_diff_eq!(pd + pm + pu, 1.0, epsilon = 1e-14);

        let a = p.rate - p.dividend_yield - 0.5 * p.volatility * p.volatility;
        let mean = (pu - pd) * dx;
        let second = (pu + pd) * dx * dx;
        assert_abs_diff_eq!(mean, a * tree.dt(), epsilon = 1e-12);
        // E[x²] = σ²Δt + O(Δt²)
        let variance = p.volatility * p.volatility * tree.dt();
        assert_abs_diff_eq!(second, variance, epsilon = 1e-6);
    }

    #[test]
    fn layers_widen_by_two_nodes() {
        let p = OptionParams::new(100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
        let tree = TrinomialTree::new(&p, 100.0, 4);
        assert_eq!(tree.size(0), 1);
        assert_eq!(tree.size(4), 9);
        assert_abs_diff_eq!(tree.underlying(3, 3), 100.0, epsilon = 1e-10);
        let root = tree.underlying(0, 0);
        assert_abs_diff_eq!(tree.underlying(1, 1), root, epsilon = 1e-10);
        // middle branch keeps the spot
        let mid = tree.descendant(1, 1, 1);
        assert_abs_diff_eq!(tree.underlying(2, mid), root, epsilon = 1e-10);
    }

    #[test]
    fn negative_probabilities_are_renormalised() {
        let [pd, pm, pu] = normalized_probabilities(-0.1, 0.6, 0.5);
        assert_eq!(pd, 0.0);
        assert_abs_diff_eq!(pm, 0.6 / 1.1, epsilon = 1e-15);
        assert_abs_diff_eq!(pu, 0.5 / 1.1, epsilon = 1e-15);
    }

    #[test]
    fn all_negative_falls_back_to_fixed_split() {
        let fallback = normalized_probabilities(-1.0, -2.0, -0.5);
        assert_eq!(fallback, [0.25, 0.5, 0.25]);
    }
}
