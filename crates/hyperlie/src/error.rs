use itertools::Itertools;

use crate::{CartanType, Weight};

/// Error produced when an algebra identifier or Cartan type is invalid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    /// The identifier matches no known notation.
    #[error("unrecognized algebra {0:?}")]
    Unparseable(String),
    /// The series exists but not at this rank.
    #[error("series {series} has no simple algebra of rank {rank}")]
    BadRank {
        /// Series letter.
        series: char,
        /// Requested rank.
        rank: u64,
    },
    /// The algebra is semisimple but not simple.
    #[error("{name} is not simple; it is {}", .factors.iter().join(" × "))]
    NotSimple {
        /// Identifier that was requested.
        name: String,
        /// Simple factors.
        factors: Vec<CartanType>,
    },
}

/// Error produced when a weight is not valid for an operation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    /// The number of Dynkin labels does not match the rank.
    #[error("expected {expected} Dynkin labels, got {got}")]
    WrongLength {
        /// Rank of the algebra.
        expected: usize,
        /// Number of labels given.
        got: usize,
    },
    /// A highest weight was required but some label is negative.
    #[error("{0} is not dominant")]
    NotDominant(Weight),
    /// A label is larger than [`crate::weight::MAX_LABEL`].
    #[error("label {label} at node {index} exceeds the maximum of {max}")]
    LabelTooLarge {
        /// Node index of the label.
        index: usize,
        /// Value of the label.
        label: i64,
        /// Largest accepted label.
        max: i64,
    },
}

/// Error returned by a Lie algebra computation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LieError {
    #[error("invalid algebra: {0}")]
    #[allow(missing_docs)]
    InvalidAlgebra(#[from] AlgebraError),
    #[error("invalid weight: {0}")]
    #[allow(missing_docs)]
    InvalidWeight(#[from] WeightError),
    /// A computation would exceed a configured bound. `required` is a lower
    /// bound on what the computation needs.
    #[error("{resource} limit exceeded: at least {required} needed but the limit is {limit}")]
    ResourceLimitExceeded {
        /// Name of the bounded resource.
        resource: &'static str,
        /// Configured limit.
        limit: u64,
        /// Amount the computation needs.
        required: u64,
    },
    /// The operation is not defined for this input.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    /// An internal invariant failed. This is always a bug.
    #[error("internal consistency check failed: {0}")]
    InternalConsistency(String),
}
impl LieError {
    /// Returns whether the error indicates a bug rather than bad input or a
    /// resource limit.
    pub fn is_internal(&self) -> bool {
        matches!(self, LieError::InternalConsistency(_))
    }

    pub(crate) fn resource(resource: &'static str, limit: impl TryInto<u64>, required: impl TryInto<u64>) -> Self {
        LieError::ResourceLimitExceeded {
            resource,
            limit: limit.try_into().unwrap_or(u64::MAX),
            required: required.try_into().unwrap_or(u64::MAX),
        }
    }

    /// Error for an exact value that does not fit in 64 bits.
    pub(crate) fn overflow() -> Self {
        LieError::resource("dimension", u64::MAX, u64::MAX)
    }
}

/// Result type returned by Lie algebra computations.
pub type LieResult<T> = Result<T, LieError>;

/// Returns an [`LieError::InternalConsistency`] error from the current
/// function.
macro_rules! bail_internal {
    ($($arg:tt)*) => {
        return Err($crate::LieError::InternalConsistency(format!($($arg)*)))
    };
}
pub(crate) use bail_internal;
