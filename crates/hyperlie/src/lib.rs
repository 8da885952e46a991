//! Representation theory of finite-dimensional simple Lie algebras.
//!
//! Everything is computed exactly from a [`CartanType`]: root systems and
//! Cartan matrices, Weyl group orbits, irrep dimensions (Weyl's formula),
//! weight multiplicities (Freudenthal's formula), tensor product
//! decompositions (Klimyk's formula), and branching rules for the maximal
//! subalgebras obtained by deleting a node from the Dynkin diagram.
//!
//! Most callers should go through [`LieEngine`], which validates input,
//! enforces resource limits, and caches results.

#[macro_use]
pub mod weight;

pub mod branching;
mod cache;
mod cartan_type;
mod config;
pub mod dimension;
mod dynkin;
mod engine;
mod error;
pub mod irrep;
mod root_system;
pub mod tensor;
pub mod weight_system;
pub mod weyl;
pub mod young;

pub use cache::ComputationCache;
pub use cartan_type::*;
pub use config::EngineConfig;
pub use dynkin::*;
pub use engine::*;
pub use error::*;
pub use root_system::*;
pub use weight::Weight;

/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::branching::{BreakingMethod, BranchingRule, SymmetryBreaking};
    pub use crate::tensor::{TensorDecomposition, TensorPower};
    pub use crate::weight_system::WeightSystem;
    pub use crate::{
        CartanType, DynkinDiagram, EngineConfig, LieEngine, LieError, LieResult, RootSystem,
        Weight, weight,
    };
}

#[cfg(test)]
mod tests;
