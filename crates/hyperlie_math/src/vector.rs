//! N-dimensional exact vector math.

use std::fmt;
use std::iter::Sum;
use std::ops::*;

use itertools::Itertools;
use num_traits::Zero;
use smallvec::SmallVec;

use crate::Rational;

/// Constructs an N-dimensional rational vector from integer components, using
/// the same syntax as `vec![]`.
#[macro_export]
macro_rules! qvector {
    [$($n:expr),* $(,)?] => {
        $crate::QVector($crate::smallvec::smallvec![$($crate::Rational::from_integer($n)),*])
    };
}

/// N-dimensional vector with exact rational components. Reading out of bounds
/// returns zero, and arithmetic pads the shorter operand with zeros.
///
/// Equality and hashing are exact and sensitive to the number of components.
/// All vectors in one ambient space share the same number of components, so
/// this never matters in practice.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QVector(pub SmallVec<[Rational; 8]>);

impl QVector {
    /// Zero-dimensional empty vector.
    pub const EMPTY: Self = Self(SmallVec::new_const());

    /// Returns a zero vector.
    pub fn zero(ndim: usize) -> Self {
        Self(smallvec::smallvec![Rational::zero(); ndim])
    }
    /// Returns a unit vector along an axis, padded to `ndim`.
    pub fn unit(ndim: usize, axis: usize) -> Self {
        let mut ret = Self::zero(std::cmp::max(ndim, axis + 1));
        ret[axis] = Rational::from_integer(1);
        ret
    }
    /// Constructs a vector whose components are each half of the given
    /// integers. This is convenient for root tables containing half-integers.
    pub fn from_halves(halves: &[i64]) -> Self {
        halves.iter().map(|&n| Rational::new(n, 2)).collect()
    }
    /// Constructs a vector from integer components.
    pub fn from_integers(values: &[i64]) -> Self {
        values.iter().map(|&n| Rational::from_integer(n)).collect()
    }

    /// Returns the number of components in the vector.
    pub fn ndim(&self) -> usize {
        self.0.len()
    }
    /// Returns a component of the vector. If the index is out of bounds,
    /// returns zero.
    pub fn get(&self, idx: usize) -> Rational {
        self.0.get(idx).copied().unwrap_or_else(Rational::zero)
    }
    /// Returns an iterator over the components of the vector.
    pub fn iter(&self) -> impl '_ + ExactSizeIterator<Item = Rational> {
        self.0.iter().copied()
    }
    /// Returns whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|x| x.is_zero())
    }
    /// Returns the components as integers, or `None` if any is fractional.
    pub fn to_integers(&self) -> Option<Vec<i64>> {
        self.0
            .iter()
            .map(|x| x.is_integer().then(|| x.to_integer()))
            .collect()
    }

    /// Returns the dot product of this vector with another.
    pub fn dot(&self, rhs: &QVector) -> Rational {
        // Components past the shorter vector contribute nothing.
        std::iter::zip(&self.0, &rhs.0).map(|(l, r)| l * r).sum()
    }
    /// Returns the squared magnitude of the vector.
    pub fn mag2(&self) -> Rational {
        self.dot(self)
    }
    /// Returns a scaled copy of the vector.
    #[must_use]
    pub fn scale(&self, scalar: Rational) -> QVector {
        self.iter().map(|x| x * scalar).collect()
    }

    /// Pads the vector with zeros up to `ndim`.
    #[must_use]
    pub fn pad(&self, ndim: usize) -> QVector {
        self.iter().pad_using(ndim, |_| Rational::zero()).collect()
    }
    /// Resizes the vector in-place, padding with zeros.
    pub fn resize(&mut self, ndim: usize) {
        self.0.resize(ndim, Rational::zero());
    }

    /// Returns an iterator over two vectors, both padded to the same length.
    pub fn zip<'a>(
        a: &'a QVector,
        b: &'a QVector,
    ) -> impl 'a + Iterator<Item = (Rational, Rational)> {
        let ndim = std::cmp::max(a.ndim(), b.ndim());
        (0..ndim).map(|i| (a.get(i), b.get(i)))
    }
}

impl fmt::Display for QVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

macro_rules! impl_zero_padded_op {
    (impl $trait_name:ident for $type_name:ty { fn $fn_name:ident() }) => {
        impl $trait_name<&QVector> for $type_name {
            type Output = QVector;

            fn $fn_name(self, rhs: &QVector) -> Self::Output {
                QVector::zip(&self, rhs)
                    .map(|(l, r)| l.$fn_name(r))
                    .collect()
            }
        }
        impl $trait_name<QVector> for $type_name {
            type Output = QVector;

            fn $fn_name(self, rhs: QVector) -> Self::Output {
                $trait_name::$fn_name(self, &rhs)
            }
        }
    };
}
macro_rules! impl_vector_ops {
    (impl for $type_name:ty) => {
        impl_zero_padded_op!(impl Add for $type_name { fn add() });
        impl_zero_padded_op!(impl Sub for $type_name { fn sub() });

        impl Neg for $type_name {
            type Output = QVector;

            fn neg(self) -> Self::Output {
                self.iter().map(|n| -n).collect()
            }
        }

        impl Mul<Rational> for $type_name {
            type Output = QVector;

            fn mul(self, rhs: Rational) -> Self::Output {
                self.scale(rhs)
            }
        }
        impl Mul<i64> for $type_name {
            type Output = QVector;

            fn mul(self, rhs: i64) -> Self::Output {
                self.scale(Rational::from_integer(rhs))
            }
        }
        impl Div<Rational> for $type_name {
            type Output = QVector;

            fn div(self, rhs: Rational) -> Self::Output {
                self.iter().map(|x| x / rhs).collect()
            }
        }
    };
}
impl_vector_ops!(impl for QVector);
impl_vector_ops!(impl for &'_ QVector);

impl AddAssign<&QVector> for QVector {
    fn add_assign(&mut self, rhs: &QVector) {
        let ndim = std::cmp::max(self.ndim(), rhs.ndim());
        self.resize(ndim);
        for (l, r) in std::iter::zip(&mut self.0, &rhs.0) {
            *l += r;
        }
    }
}
impl SubAssign<&QVector> for QVector {
    fn sub_assign(&mut self, rhs: &QVector) {
        let ndim = std::cmp::max(self.ndim(), rhs.ndim());
        self.resize(ndim);
        for (l, r) in std::iter::zip(&mut self.0, &rhs.0) {
            *l -= r;
        }
    }
}

impl Index<usize> for QVector {
    type Output = Rational;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
impl IndexMut<usize> for QVector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let ndim = self.ndim();
        self.0.get_mut(index).unwrap_or_else(|| {
            panic!(
                "vector index out of bounds: the dimensionality is {ndim} but the index is {index}",
            )
        })
    }
}

impl FromIterator<Rational> for QVector {
    fn from_iter<T: IntoIterator<Item = Rational>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> Sum<&'a QVector> for QVector {
    fn sum<I: Iterator<Item = &'a QVector>>(iter: I) -> Self {
        let mut ret = Self::EMPTY;
        for v in iter {
            ret += v;
        }
        ret
    }
}
impl Sum<QVector> for QVector {
    fn sum<I: Iterator<Item = QVector>>(iter: I) -> Self {
        let mut ret = Self::EMPTY;
        for v in iter {
            ret += &v;
        }
        ret
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QVector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|x| x.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::frac;

    #[test]
    pub fn test_vector_add() {
        let v1 = qvector![1, 2, -10];
        let v2 = qvector![-5];
        assert_eq!(&v1 + &v2, qvector![-4, 2, -10]);
        assert_eq!(v2 + v1, qvector![-4, 2, -10]);
    }

    #[test]
    pub fn test_vector_sub() {
        let v1 = qvector![1, 2, -10];
        let v2 = qvector![-5];
        assert_eq!(&v1 - &v2, qvector![6, 2, -10]);
        assert_eq!(v2 - &v1, qvector![-6, -2, 10]);
    }

    #[test]
    pub fn test_vector_neg() {
        let v1 = qvector![1, 2, -10];
        assert_eq!(-&v1, qvector![-1, -2, 10]);
        assert_eq!(-v1, qvector![-1, -2, 10]);
    }

    #[test]
    pub fn test_dot_product() {
        let v1 = qvector![1, 2, -10];
        let v2 = qvector![-5, 16];
        assert_eq!(v1.dot(&v2), Rational::from_integer(27));

        let half = QVector::from_halves(&[1, 1, 1, 1]);
        assert_eq!(half.mag2(), Rational::from_integer(1));
        assert_eq!(half.dot(&qvector![1]), frac(1, 2));
    }

    #[test]
    pub fn test_integrality() {
        assert_eq!(QVector::from_halves(&[2, -4]).to_integers(), Some(vec![1, -2]));
        assert_eq!(QVector::from_halves(&[1, 2]).to_integers(), None);
    }

    #[test]
    pub fn test_display() {
        assert_eq!(QVector::from_halves(&[1, -2, 0]).to_string(), "(1/2, -1, 0)");
    }
}
