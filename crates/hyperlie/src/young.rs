//! Young diagrams for irreps of SU(N).

use std::fmt;

use itertools::Itertools;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use crate::error::bail_internal;
use crate::{CartanType, LieError, LieResult, Weight};

/// [Young diagram](https://w.wiki/3yNP), stored as its row lengths from top
/// to bottom.
///
/// Row lengths are non-increasing and never zero.
#[derive(serde::Serialize, Debug, Default, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct YoungDiagram {
    rows: Vec<u64>,
}

impl fmt::Display for YoungDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.rows.iter().join(", "))
    }
}

impl YoungDiagram {
    /// Constructs a Young diagram from its row lengths, ignoring trailing
    /// zeros. Returns `None` if the row lengths are not non-increasing.
    pub fn new(mut rows: Vec<u64>) -> Option<Self> {
        while rows.last() == Some(&0) {
            rows.pop();
        }
        rows.iter()
            .tuple_windows()
            .all(|(a, b)| a >= b)
            .then_some(Self { rows })
    }

    /// Returns the Young diagram of an irrep of A<sub>n</sub>, whose `i`th row
    /// has length λ<sub>i</sub> = a<sub>i</sub> + a<sub>i+1</sub> + ... +
    /// a<sub>n</sub>.
    pub fn from_dynkin_labels(cartan_type: CartanType, highest_weight: &Weight) -> LieResult<Self> {
        let CartanType::A(_) = cartan_type else {
            return Err(LieError::UnsupportedOperation(format!(
                "Young diagrams are only defined for the A series, not {cartan_type}",
            )));
        };
        highest_weight.check_highest_weight(cartan_type.rank())?;

        let mut rows = highest_weight
            .labels()
            .iter()
            .rev()
            .scan(0, |sum, &a| {
                *sum += a as u64;
                Some(*sum)
            })
            .collect_vec();
        rows.reverse();
        match Self::new(rows) {
            Some(diagram) => Ok(diagram),
            None => bail_internal!("partial sums of {highest_weight} are not a partition"),
        }
    }

    /// Returns the Dynkin labels of the irrep of A<sub>n</sub> with this Young
    /// diagram. Columns of length n+1 are ignored, since they contribute only
    /// a trivial factor.
    pub fn to_dynkin_labels(&self, cartan_type: CartanType) -> LieResult<Weight> {
        let CartanType::A(_) = cartan_type else {
            return Err(LieError::UnsupportedOperation(format!(
                "Young diagrams are only defined for the A series, not {cartan_type}",
            )));
        };
        let rank = cartan_type.rank();
        if self.rows.len() > rank + 1 {
            return Err(LieError::UnsupportedOperation(format!(
                "Young diagram {self} has more than {} rows, so it is zero for {}",
                rank + 1,
                cartan_type.physics_name(),
            )));
        }
        Ok((0..rank)
            .map(|i| (self.row(i) - self.row(i + 1)) as i64)
            .collect::<Vec<_>>()
            .into())
    }

    /// Returns the row lengths.
    pub fn rows(&self) -> &[u64] {
        &self.rows
    }
    /// Returns the length of row `i`, which is zero past the bottom row.
    pub fn row(&self, i: usize) -> u64 {
        self.rows.get(i).copied().unwrap_or(0)
    }
    /// Returns the column lengths, which are the row lengths of the
    /// transposed diagram.
    pub fn columns(&self) -> Vec<u64> {
        (0..self.row(0))
            .map(|j| self.rows.iter().take_while(|&&len| len > j).count() as u64)
            .collect()
    }
    /// Returns the number of boxes.
    pub fn boxes(&self) -> u64 {
        self.rows.iter().sum()
    }

    /// Returns the hook length of the box in row `i` and column `j`, which is
    /// the number of boxes to its right, plus the number below it, plus one.
    pub fn hook_length(&self, i: usize, j: usize) -> u64 {
        let columns = self.columns();
        let right = self.row(i) - j as u64 - 1;
        let below = columns[j] - i as u64 - 1;
        right + below + 1
    }

    /// Returns the dimension of the irrep of SU(`n`) with this Young diagram,
    /// using the hook content formula:
    ///
    /// dim = ∏ (n + j - i) / h(i, j)
    ///
    /// where the product is over all boxes (i, j) and h is the hook length.
    pub fn su_dimension(&self, n: u64) -> LieResult<u64> {
        if self.rows.len() as u64 > n {
            return Ok(0);
        }
        let columns = self.columns();
        let mut numer = BigUint::one();
        let mut denom = BigUint::one();
        for (i, &len) in self.rows.iter().enumerate() {
            for j in 0..len {
                let content = n + j - i as u64;
                let hook = (len - j - 1) + (columns[j as usize] - i as u64 - 1) + 1;
                numer *= content;
                denom *= hook;
            }
        }
        if (&numer % &denom) != BigUint::ZERO {
            bail_internal!("hook content formula for {self} in SU({n}) is not an integer");
        }
        (numer / denom)
            .to_u64()
            .ok_or_else(|| LieError::resource("dimension", u64::MAX, u64::MAX))
    }
}
