// File: crates/trend-core/src/solver.rs
// Summary: Least-squares kernel; solves the normal equations (XᵀX)b = Xᵀy by
// Gaussian elimination with partial pivoting.

use nalgebra::{DMatrix, DVector};

use crate::error::{EngineError, Result};

/// Pivots at or below `SINGULAR_EPSILON * max|XᵀX|` mark the system singular.
pub const SINGULAR_EPSILON: f64 = 1e-10;

/// Fitted coefficients.
///
/// Indexing follows the `b1 = intercept` convention through [`Coefficients::b`]:
/// `b(1)` is the constant term and `b(i)` the coefficient on design column
/// `i - 1`. [`Coefficients::as_slice`] exposes the same values 0-based.
#[derive(Clone, Debug, PartialEq)]
pub struct Coefficients(Vec<f64>);

impl Coefficients {
    pub fn new(values: Vec<f64>) -> Self { Self(values) }

    /// 1-indexed access; `b(0)` and indices past the end read as 0.
    pub fn b(&self, i: usize) -> f64 {
        i.checked_sub(1).and_then(|k| self.0.get(k)).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn as_slice(&self) -> &[f64] { &self.0 }
}

/// Minimize `||Xb − y||²`.
///
/// `design` has one row per sample and one column per parameter. Returns one
/// coefficient per column. Requires more rows than columns.
pub fn solve_least_squares(design: &DMatrix<f64>, target: &DVector<f64>) -> Result<Coefficients> {
    let (n, p) = design.shape();
    if target.len() != n {
        return Err(EngineError::Validation(format!(
            "design matrix has {n} rows but target has {} values",
            target.len()
        )));
    }
    if n <= p {
        return Err(EngineError::InsufficientData { samples: n, parameters: p });
    }
    if p == 0 {
        return Ok(Coefficients::new(Vec::new()));
    }

    let normal = design.tr_mul(design);
    let rhs = design.tr_mul(target);
    let solution = eliminate(normal, rhs)?;
    Ok(Coefficients::new(solution.iter().copied().collect()))
}

/// Solve the square system `a·b = rhs` in place.
fn eliminate(mut a: DMatrix<f64>, mut rhs: DVector<f64>) -> Result<DVector<f64>> {
    let p = a.nrows();
    let scale = a.amax();

    for col in 0..p {
        // partial pivoting: largest magnitude at or below the diagonal
        let (offset, pivot) = a
            .view((col, col), (p - col, 1))
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0.0f64), |best, (k, v)| if v.abs() > best.1.abs() { (k, v) } else { best });
        if !(pivot.abs() > SINGULAR_EPSILON * scale) {
            return Err(EngineError::SingularSystem { column: col, pivot, scale });
        }
        let row = col + offset;
        if row != col {
            a.swap_rows(row, col);
            rhs.swap_rows(row, col);
        }

        for r in (col + 1)..p {
            let factor = a[(r, col)] / a[(col, col)];
            if factor == 0.0 {
                continue;
            }
            for c in col..p {
                a[(r, c)] -= factor * a[(col, c)];
            }
            rhs[r] -= factor * rhs[col];
        }
    }

    let mut b = DVector::zeros(p);
    for r in (0..p).rev() {
        let tail: f64 = ((r + 1)..p).map(|c| a[(r, c)] * b[c]).sum();
        b[r] = (rhs[r] - tail) / a[(r, r)];
    }
    Ok(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_indexed_access() {
        let c = Coefficients::new(vec![2.0, 3.0]);
        assert_eq!(c.b(0), 0.0);
        assert_eq!(c.b(1), 2.0);
        assert_eq!(c.b(2), 3.0);
        assert_eq!(c.b(3), 0.0);
    }

    #[test]
    fn eliminates_with_row_swap() {
        // zero on the first diagonal entry forces a pivot swap
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 1.0]);
        let rhs = DVector::from_vec(vec![2.0, 5.0]);
        let b = eliminate(a, rhs).expect("solvable");
        assert!((b[0] - 3.0).abs() < 1e-12);
        assert!((b[1] - 2.0).abs() < 1e-12);
    }
}
