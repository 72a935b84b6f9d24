//! Dense matrices and linear solves for the implicit integrators.

mod linear;

use std::ops::{Index, IndexMut};

use crate::Float;

pub use linear::{Lu, Singular};

/// Dense row-major `n x m` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub n: usize,
    pub m: usize,
    data: Vec<Float>,
}

impl Matrix {
    pub fn zeros(n: usize, m: usize) -> Self {
        Self {
            n,
            m,
            data: vec![0.0; n * m],
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Float;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[i * self.m + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        &mut self.data[i * self.m + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing_is_row_major() {
        let mut a = Matrix::zeros(2, 3);
        a[(1, 2)] = 5.0;
        a[(0, 1)] = -1.0;
        assert_eq!(a.data, vec![0.0, -1.0, 0.0, 0.0, 0.0, 5.0]);
        assert_eq!(a[(1, 2)], 5.0);
    }
}
