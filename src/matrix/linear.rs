//! Linear solves: A x = b via LU with partial pivoting.

use crate::Float;

use super::Matrix;

/// The matrix handed to [`Lu::factor`] has a zero pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Singular;

/// LU factorization of a square matrix, reusable across right-hand sides.
#[derive(Debug, Clone)]
pub struct Lu {
    n: usize,
    a: Vec<Float>,
    piv: Vec<usize>,
}

impl Lu {
    pub fn factor(matrix: &Matrix) -> Result<Self, Singular> {
        let n = matrix.n;
        debug_assert_eq!(n, matrix.m, "LU needs a square matrix");
        let mut a = matrix.data.clone();
        let mut piv = vec![0; n];

        for k in 0..n {
            // pivot
            let mut pivot_row = k;
            let mut pivot_val = a[k * n + k].abs();
            for i in (k + 1)..n {
                let val = a[i * n + k].abs();
                if val > pivot_val {
                    pivot_val = val;
                    pivot_row = i;
                }
            }
            if pivot_val == 0.0 || !pivot_val.is_finite() {
                return Err(Singular);
            }
            piv[k] = pivot_row;
            if pivot_row != k {
                for j in 0..n {
                    a.swap(k * n + j, pivot_row * n + j);
                }
            }
            // Eliminate below the pivot
            let akk = a[k * n + k];
            for i in (k + 1)..n {
                let factor = a[i * n + k] / akk;
                a[i * n + k] = factor;
                for j in (k + 1)..n {
                    a[i * n + j] -= factor * a[k * n + j];
                }
            }
        }

        Ok(Self { n, a, piv })
    }

    /// In-place solve: overwrites `b` with `x`.
    pub fn solve(&self, b: &mut [Float]) {
        let n = self.n;
        let a = &self.a;
        for k in 0..n {
            b.swap(k, self.piv[k]);
        }
        // Forward solve Ly = Pb
        for i in 0..n {
            let mut sum = b[i];
            for k in 0..i {
                sum -= a[i * n + k] * b[k];
            }
            b[i] = sum;
        }
        // Backward solve Ux = y
        for i in (0..n).rev() {
            let mut sum = b[i];
            for k in (i + 1)..n {
                sum -= a[i * n + k] * b[k];
            }
            b[i] = sum / a[i * n + i];
        }
    }
}
