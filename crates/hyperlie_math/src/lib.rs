//! Exact rational vector and matrix primitives for root and weight lattices.
//!
//! Everything here is exact: orbit deduplication and the cancellation in the
//! Weyl dimension formula both depend on it, so there is no floating-point
//! type anywhere in this crate.

pub use {num_rational, num_traits as num, smallvec};

#[macro_use]
mod vector;

pub mod matrix;
pub mod parity;
pub mod rational;

/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::matrix::*;
    pub use crate::parity::Parity;
    pub use crate::rational::*;
    pub use crate::vector::*;
    pub use crate::{qvector, row_matrix};
}
pub use prelude::*;
