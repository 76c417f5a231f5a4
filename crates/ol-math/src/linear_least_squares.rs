//! Polynomial bases and normal-equations least squares.
//!
//! Longstaff-Schwartz regression fits a handful of basis coefficients to
//! thousands of cross-sectional observations. The design matrix is never
//! materialised: each observation's basis vector is folded into the Gram
//! matrix `AᵀA` and the moment vector `Aᵀy`, and the resulting small square
//! system is solved by Gauss-Jordan elimination with partial pivoting.
//!
//! A pivot below [`PIVOT_TOLERANCE`] declares the system singular and
//! [`NormalEquations::solve`] returns `None`; callers decide the fallback.

use nalgebra::{DMatrix, DVector};
use ol_core::Real;

/// Smallest absolute pivot accepted by [`solve_partial_pivoting`].
pub const PIVOT_TOLERANCE: Real = 1e-12;

/// Write the Laguerre polynomials `L₀(x) … L_{out.len()−1}(x)` into `out`.
///
/// Uses the three-term recurrence
/// `n·Lₙ(x) = (2n − 1 − x)·Lₙ₋₁(x) − (n − 1)·Lₙ₋₂(x)` with
/// `L₀ = 1`, `L₁ = 1 − x`.
pub fn laguerre_basis_into(x: Real, out: &mut [Real]) {
    if out.is_empty() {
        return;
    }
    out[0] = 1.0;
    if out.len() > 1 {
        out[1] = 1.0 - x;
    }
    for n in 2..out.len() {
        let nf = n as Real;
        out[n] = ((2.0 * nf - 1.0 - x) * out[n - 1] - (nf - 1.0) * out[n - 2]) / nf;
    }
}

/// Accumulator for the normal equations `AᵀA β = Aᵀy`.
#[derive(Debug, Clone)]
pub struct NormalEquations {
    gram: DMatrix<Real>,
    moments: DVector<Real>,
    observations: usize,
}

impl NormalEquations {
    /// Empty system for `dim` basis functions.
    pub fn new(dim: usize) -> Self {
        Self {
            gram: DMatrix::zeros(dim, dim),
            moments: DVector::zeros(dim),
            observations: 0,
        }
    }

    /// Number of basis functions.
    pub fn dim(&self) -> usize {
        self.moments.len()
    }

    /// Number of observations folded in so far.
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Fold one observation: basis vector `phi` (length [`dim`](Self::dim))
    /// and response `y`.
    pub fn add(&mut self, phi: &[Real], y: Real) {
        debug_assert_eq!(phi.len(), self.dim());
        let n = self.dim();
        for r in 0..n {
            for c in 0..n {
                self.gram[(r, c)] += phi[r] * phi[c];
            }
            self.moments[r] += phi[r] * y;
        }
        self.observations += 1;
    }

    /// Solve for the coefficients, or `None` if the system is singular.
    pub fn solve(&self) -> Option<DVector<Real>> {
        solve_partial_pivoting(self.gram.clone(), self.moments.clone(), PIVOT_TOLERANCE)
    }
}

/// Solve the square system `a·x = b` by Gauss-Jordan elimination with
/// partial (row) pivoting.
///
/// Returns `None` when the largest candidate pivot in some column is
/// smaller than `tolerance` in absolute value.
pub fn solve_partial_pivoting(
    mut a: DMatrix<Real>,
    mut b: DVector<Real>,
    tolerance: Real,
) -> Option<DVector<Real>> {
    let n = b.len();
    debug_assert!(a.is_square() && a.nrows() == n);

    for col in 0..n {
        let mut pivot = col;
        let mut max_val = a[(col, col)].abs();
        for row in col + 1..n {
            let val = a[(row, col)].abs();
            if val > max_val {
                max_val = val;
                pivot = row;
            }
        }
        if max_val < tolerance {
            return None;
        }
        if pivot != col {
            a.swap_rows(col, pivot);
            b.swap_rows(col, pivot);
        }

        let inv_pivot = 1.0 / a[(col, col)];
        for k in col..n {
            a[(col, k)] *= inv_pivot;
        }
        b[col] *= inv_pivot;

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[(row, col)];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[(row, k)] -= factor * a[(col, k)];
            }
            b[row] -= factor * b[col];
        }
    }

    Some(b)
}
