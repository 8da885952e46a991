//! N-dimensional exact matrix math.

use std::fmt;
use std::ops::Mul;

use itertools::Itertools;
use num_traits::{One, Zero};

use crate::{QVector, Rational};

/// N-by-N square matrix with exact rational entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QMatrix {
    /// Number of rows and columns.
    ndim: usize,
    /// Elements stored in **row-major** order.
    elems: Vec<Rational>,
}

impl QMatrix {
    /// Constructs an identity matrix.
    pub fn ident(ndim: usize) -> Self {
        Self::from_fn(ndim, |i, j| {
            if i == j {
                Rational::one()
            } else {
                Rational::zero()
            }
        })
    }
    /// Constructs a matrix from a function of `(row, col)`.
    pub fn from_fn(ndim: usize, mut f: impl FnMut(usize, usize) -> Rational) -> Self {
        let elems = (0..ndim)
            .flat_map(|i| (0..ndim).map(move |j| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Self { ndim, elems }
    }
    /// Constructs a matrix from a list of rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square matrix.
    pub fn from_rows<R: AsRef<[Rational]>>(rows: &[R]) -> Self {
        let ndim = rows.len();
        assert!(
            rows.iter().all(|r| r.as_ref().len() == ndim),
            "matrix must be square",
        );
        Self {
            ndim,
            elems: rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect(),
        }
    }
    /// Constructs a matrix from integer rows.
    pub fn from_integer_rows<R: AsRef<[i64]>>(rows: &[R]) -> Self {
        let rows = rows
            .iter()
            .map(|r| r.as_ref().iter().map(|&x| Rational::from_integer(x)).collect_vec())
            .collect_vec();
        Self::from_rows(&rows)
    }

    /// Returns the number of rows (and columns) of the matrix.
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Returns an element from the matrix.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[track_caller]
    pub fn get(&self, row: usize, col: usize) -> Rational {
        assert!(row < self.ndim && col < self.ndim, "matrix index out of bounds");
        self.elems[row * self.ndim + col]
    }
    /// Returns a mutable reference to an element from the matrix.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[track_caller]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut Rational {
        assert!(row < self.ndim && col < self.ndim, "matrix index out of bounds");
        &mut self.elems[row * self.ndim + col]
    }
    /// Returns a row of the matrix.
    pub fn row(&self, row: usize) -> QVector {
        self.elems[row * self.ndim..(row + 1) * self.ndim]
            .iter()
            .copied()
            .collect()
    }
    /// Returns a column of the matrix.
    pub fn col(&self, col: usize) -> QVector {
        (0..self.ndim).map(|i| self.get(i, col)).collect()
    }
    /// Returns an iterator over the rows of the matrix.
    pub fn rows(&self) -> impl '_ + ExactSizeIterator<Item = QVector> {
        (0..self.ndim).map(|i| self.row(i))
    }

    /// Returns the entries as integer rows, or `None` if any entry is
    /// fractional.
    pub fn to_integer_rows(&self) -> Option<Vec<Vec<i64>>> {
        self.rows().map(|r| r.to_integers()).collect()
    }

    /// Returns the determinant of the matrix, computed exactly by Gaussian
    /// elimination.
    pub fn determinant(&self) -> Rational {
        let n = self.ndim;
        let mut a = self.clone();
        let mut det = Rational::one();
        for col in 0..n {
            let Some(pivot) = (col..n).find(|&row| !a.get(row, col).is_zero()) else {
                return Rational::zero();
            };
            if pivot != col {
                a.swap_rows(pivot, col);
                det = -det;
            }
            let p = a.get(col, col);
            det *= p;
            for row in col + 1..n {
                let factor = a.get(row, col) / p;
                if !factor.is_zero() {
                    for k in col..n {
                        let delta = factor * a.get(col, k);
                        *a.get_mut(row, k) -= delta;
                    }
                }
            }
        }
        det
    }

    /// Returns the inverse of the matrix, or `None` if it is singular.
    ///
    /// Uses Gauss-Jordan elimination over the rationals, so the result is
    /// exact.
    pub fn inverse(&self) -> Option<QMatrix> {
        let n = self.ndim;
        let mut a = self.clone();
        let mut inv = QMatrix::ident(n);
        for col in 0..n {
            let pivot = (col..n).find(|&row| !a.get(row, col).is_zero())?;
            if pivot != col {
                a.swap_rows(pivot, col);
                inv.swap_rows(pivot, col);
            }
            let p = a.get(col, col).recip();
            a.scale_row(col, p);
            inv.scale_row(col, p);
            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = a.get(row, col);
                if factor.is_zero() {
                    continue;
                }
                for k in 0..n {
                    let da = factor * a.get(col, k);
                    *a.get_mut(row, k) -= da;
                    let di = factor * inv.get(col, k);
                    *inv.get_mut(row, k) -= di;
                }
            }
        }
        Some(inv)
    }

    fn swap_rows(&mut self, r1: usize, r2: usize) {
        for k in 0..self.ndim {
            self.elems.swap(r1 * self.ndim + k, r2 * self.ndim + k);
        }
    }
    fn scale_row(&mut self, row: usize, factor: Rational) {
        for k in 0..self.ndim {
            *self.get_mut(row, k) *= factor;
        }
    }

    /// Returns the product `v * self`, treating `v` as a row vector.
    pub fn left_mul(&self, v: &QVector) -> QVector {
        (0..self.ndim)
            .map(|j| (0..self.ndim).map(|i| v.get(i) * self.get(i, j)).sum())
            .collect()
    }
}

impl fmt::Display for QMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "[{}]", row.iter().join(", "))?;
        }
        Ok(())
    }
}

/// Constructs a matrix from integer rows.
#[macro_export]
macro_rules! row_matrix {
    ($([$($n:expr),* $(,)?]),* $(,)?) => {
        $crate::QMatrix::from_integer_rows(&[$(vec![$($n as i64),*]),*])
    };
}

impl Mul for &QMatrix {
    type Output = QMatrix;

    fn mul(self, rhs: Self) -> Self::Output {
        assert_eq!(self.ndim(), rhs.ndim(), "matrix size mismatch");
        let ndim = self.ndim();
        QMatrix::from_fn(ndim, |i, j| {
            (0..ndim).map(|k| self.get(i, k) * rhs.get(k, j)).sum()
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{frac, int};

    #[test]
    fn test_matrix_multiply() {
        let m1 = row_matrix![[1, 0, 1], [2, 1, 1], [0, 1, 1]];
        let m2 = row_matrix![[1, 2, 1], [2, 3, 1], [4, 2, 2]];
        assert_eq!(&m1 * &m2, row_matrix![[5, 4, 3], [8, 9, 5], [6, 5, 3]]);
        assert_eq!(m1.left_mul(&qvector![1, 1, 1]), qvector![3, 2, 3]);
    }

    #[test]
    fn test_matrix_determinant() {
        let m = row_matrix![[3, 1], [7, -4]];
        assert_eq!(m.determinant(), int(-19));

        let m = row_matrix![[-2, 2, -3], [-1, 1, 3], [2, 4, -1]];
        assert_eq!(m.determinant(), int(54));

        let m = row_matrix![[1, 5, -10, 3], [2, 6, 3, 1], [3, 8, 6, 4], [4, 7, 2, 1]];
        assert_eq!(m.determinant(), int(-402));

        // A4 Cartan matrix
        let a4 = row_matrix![[2, -1, 0, 0], [-1, 2, -1, 0], [0, -1, 2, -1], [0, 0, -1, 2]];
        assert_eq!(a4.determinant(), int(5));
    }

    #[test]
    fn test_matrix_inverse() {
        let m = row_matrix![[1, 1, -3], [0, 1, 0], [4, 6, -10]];
        assert_eq!(&m * &m.inverse().unwrap(), QMatrix::ident(3));

        let a2 = row_matrix![[2, -1], [-1, 2]];
        let a2_inv = a2.inverse().unwrap();
        assert_eq!(a2_inv.get(0, 0), frac(2, 3));
        assert_eq!(a2_inv.get(0, 1), frac(1, 3));

        assert_eq!(row_matrix![[1, 2], [2, 4]].inverse(), None);
    }
}
