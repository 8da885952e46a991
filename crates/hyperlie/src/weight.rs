//! Weights in the Dynkin (fundamental-weight) basis.

use std::fmt;
use std::ops::*;
use std::str::FromStr;

use itertools::Itertools;
use smallvec::SmallVec;

use crate::{LieResult, WeightError};

/// Constructs a [`Weight`] from Dynkin labels, using the same syntax as
/// `vec![]`.
#[macro_export]
macro_rules! weight {
    [$($n:expr),* $(,)?] => {
        $crate::Weight($crate::weight::Labels::from_slice(&[$($n as i64),*]))
    };
}

/// Storage for Dynkin labels.
pub type Labels = SmallVec<[i64; 8]>;

/// Largest Dynkin label accepted in a highest weight.
///
/// With labels this small, every weight of an irrep stays far from the
/// limits of `i64`. Inner products are still computed with checked
/// arithmetic, since they grow with the square of the rank.
pub const MAX_LABEL: i64 = 1 << 20;

/// Weight expressed by its Dynkin labels, which are its coefficients in the
/// basis of fundamental weights.
///
/// Weights are ordered lexicographically by label, which is the order used to
/// break ties and to decide which member of a conjugate pair is "barred."
#[derive(serde::Serialize, Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Weight(pub Labels);

impl Weight {
    /// Returns the zero weight of a given rank.
    pub fn zero(rank: usize) -> Self {
        Self(smallvec::smallvec![0; rank])
    }
    /// Returns the weight with every label equal to one, which is the Weyl
    /// vector ρ.
    pub fn rho(rank: usize) -> Self {
        Self(smallvec::smallvec![1; rank])
    }
    /// Returns the `i`th fundamental weight.
    pub fn fundamental(rank: usize, i: usize) -> Self {
        let mut ret = Self::zero(rank);
        ret.0[i] = 1;
        ret
    }

    /// Returns the number of labels.
    pub fn rank(&self) -> usize {
        self.0.len()
    }
    /// Returns the labels as a slice.
    pub fn labels(&self) -> &[i64] {
        &self.0
    }
    /// Returns an iterator over the labels.
    pub fn iter(&self) -> impl '_ + ExactSizeIterator<Item = i64> {
        self.0.iter().copied()
    }

    /// Returns whether every label is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&a| a == 0)
    }
    /// Returns whether every label is nonnegative.
    pub fn is_dominant(&self) -> bool {
        self.0.iter().all(|&a| a >= 0)
    }
    /// Returns whether every label is strictly positive, which means the
    /// weight lies in the interior of the dominant chamber.
    pub fn is_strictly_dominant(&self) -> bool {
        self.0.iter().all(|&a| a > 0)
    }
    /// Returns the index of the first negative label, if any.
    pub fn first_negative(&self) -> Option<usize> {
        self.0.iter().position(|&a| a < 0)
    }

    /// Returns the labels at the given indices, in order.
    #[must_use]
    pub fn restrict(&self, indices: &[usize]) -> Weight {
        Weight(indices.iter().map(|&i| self.0[i]).collect())
    }

    /// Returns an error if the weight does not have `rank` labels.
    pub fn check_rank(&self, rank: usize) -> LieResult<()> {
        if self.rank() != rank {
            return Err(WeightError::WrongLength {
                expected: rank,
                got: self.rank(),
            }
            .into());
        }
        Ok(())
    }
    /// Returns an error if the weight is not a valid highest weight for an
    /// algebra of rank `rank`.
    pub fn check_highest_weight(&self, rank: usize) -> LieResult<()> {
        self.check_rank(rank)?;
        if !self.is_dominant() {
            return Err(WeightError::NotDominant(self.clone()).into());
        }
        if let Some(index) = self.0.iter().position(|&a| a > MAX_LABEL) {
            return Err(WeightError::LabelTooLarge {
                index,
                label: self.0[index],
                max: MAX_LABEL,
            }
            .into());
        }
        Ok(())
    }

    /// Adds two weights, returning `None` on overflow.
    pub fn checked_add(&self, rhs: &Weight) -> Option<Weight> {
        std::iter::zip(&self.0, &rhs.0)
            .map(|(a, b)| a.checked_add(*b))
            .collect::<Option<Labels>>()
            .map(Weight)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

/// Parses comma- or whitespace-separated labels, optionally in brackets, such
/// as `1,0,0,1` or `[1, 0, 0, 1]`.
impl FromStr for Weight {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('[').unwrap_or(s);
        let s = s.strip_suffix(']').unwrap_or(s);
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map(Weight)
    }
}

impl From<Vec<i64>> for Weight {
    fn from(value: Vec<i64>) -> Self {
        Weight(value.into())
    }
}
impl From<&[i64]> for Weight {
    fn from(value: &[i64]) -> Self {
        Weight(Labels::from_slice(value))
    }
}

impl Add<&Weight> for &Weight {
    type Output = Weight;

    fn add(self, rhs: &Weight) -> Self::Output {
        Weight(std::iter::zip(&self.0, &rhs.0).map(|(a, b)| a + b).collect())
    }
}
impl Sub<&Weight> for &Weight {
    type Output = Weight;

    fn sub(self, rhs: &Weight) -> Self::Output {
        Weight(std::iter::zip(&self.0, &rhs.0).map(|(a, b)| a - b).collect())
    }
}
impl Neg for &Weight {
    type Output = Weight;

    fn neg(self) -> Self::Output {
        Weight(self.0.iter().map(|a| -a).collect())
    }
}
impl AddAssign<&Weight> for Weight {
    fn add_assign(&mut self, rhs: &Weight) {
        for (a, b) in std::iter::zip(&mut self.0, &rhs.0) {
            *a += b;
        }
    }
}
impl SubAssign<&Weight> for Weight {
    fn sub_assign(&mut self, rhs: &Weight) {
        for (a, b) in std::iter::zip(&mut self.0, &rhs.0) {
            *a -= b;
        }
    }
}
impl Mul<i64> for &Weight {
    type Output = Weight;

    fn mul(self, rhs: i64) -> Self::Output {
        Weight(self.0.iter().map(|a| a * rhs).collect())
    }
}

impl Index<usize> for Weight {
    type Output = i64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
