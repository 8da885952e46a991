//! The [`LieEngine`] facade, which validates input and caches results.

use std::collections::HashMap;
use std::sync::Arc;

use hyperlie_math::prelude::*;

use crate::branching::{self, BreakingMethod, BranchingRule, SymmetryBreaking};
use crate::irrep::{self, IrrepName};
use crate::tensor::{self, TensorDecomposition, TensorPower, TensorTerm};
use crate::weight_system::WeightSystem;
use crate::young::YoungDiagram;
use crate::{
    CartanType, ComputationCache, DynkinDiagram, DynkinEdge, EngineConfig, LieResult,
    RootSystem, Weight, dimension,
};

/// Entry point for representation theory computations.
///
/// Every method validates its input before computing anything, enforces the
/// limits in its [`EngineConfig`], and caches expensive results. The engine is
/// `Send + Sync`, so one instance can serve many threads.
#[derive(Debug)]
pub struct LieEngine {
    config: EngineConfig,
    cache: ComputationCache,
}

impl Default for LieEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl LieEngine {
    /// Constructs an engine with an empty cache.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cache: ComputationCache::new(config.cache_capacity),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    /// Returns the cache.
    pub fn cache(&self) -> &ComputationCache {
        &self.cache
    }

    /// Parses an algebra name in physics notation (`SU(5)`) or Cartan
    /// notation (`A4`) and returns its canonical Cartan type.
    pub fn classify(&self, identifier: &str) -> LieResult<CartanType> {
        Ok(CartanType::classify(identifier)?)
    }

    /// Returns the root system of an algebra.
    pub fn root_system(&self, cartan_type: CartanType) -> LieResult<Arc<RootSystem>> {
        self.cache
            .root_system(cartan_type, || RootSystem::new(cartan_type))
    }

    /// Returns the Dynkin diagram of an algebra.
    pub fn dynkin_diagram(&self, cartan_type: CartanType) -> LieResult<DynkinDiagram> {
        Ok(DynkinDiagram::new(&*self.root_system(cartan_type)?))
    }
    /// Returns the extended Dynkin diagram of an algebra, whose last node is
    /// the lowest root.
    pub fn extended_dynkin_diagram(&self, cartan_type: CartanType) -> LieResult<DynkinDiagram> {
        DynkinDiagram::extended(&*self.root_system(cartan_type)?)
    }

    /// Returns a summary of an algebra and its root system.
    pub fn algebra_info(&self, cartan_type: CartanType) -> LieResult<AlgebraInfo> {
        let rs = self.root_system(cartan_type)?;
        let diagram = DynkinDiagram::new(&rs);
        Ok(AlgebraInfo {
            cartan_type,
            physics_name: cartan_type.physics_name(),
            rank: cartan_type.rank(),
            dimension: cartan_type.algebra_dimension(),
            root_count: cartan_type.root_count(),
            positive_root_count: cartan_type.positive_root_count(),
            weyl_group_order: cartan_type.weyl_group_order().to_string(),
            cartan_matrix: cartan_type.cartan_matrix(),
            inverse_cartan: rs.inverse_cartan().rows().collect(),
            quadratic_form: rs.gram_matrix().rows().collect(),
            simple_roots: rs.simple_roots().to_vec(),
            fundamental_weights: rs.fundamental_weights().to_vec(),
            highest_root: rs.highest_root().labels.clone(),
            rho: rs.rho(),
            dynkin_edges: diagram.edges(),
            dynkin_diagram: diagram.to_string(),
        })
    }

    /// Returns the dimension of an irrep.
    pub fn dimension(&self, cartan_type: CartanType, highest_weight: &Weight) -> LieResult<u64> {
        highest_weight.check_highest_weight(cartan_type.rank())?;
        dimension::dimension(&*self.root_system(cartan_type)?, highest_weight)
    }

    /// Returns every weight of an irrep along with its multiplicity.
    pub fn weight_system(
        &self,
        cartan_type: CartanType,
        highest_weight: &Weight,
    ) -> LieResult<Arc<WeightSystem>> {
        highest_weight.check_highest_weight(cartan_type.rank())?;
        let rs = self.root_system(cartan_type)?;
        self.cache.weight_system(cartan_type, highest_weight, || {
            WeightSystem::new(&rs, highest_weight, self.config.max_weights)
        })
    }

    /// Returns a summary of an irrep, including all of its weights.
    pub fn irrep(&self, cartan_type: CartanType, highest_weight: &Weight) -> LieResult<IrrepInfo> {
        highest_weight.check_highest_weight(cartan_type.rank())?;
        let rs = self.root_system(cartan_type)?;
        let ws = self.weight_system(cartan_type, highest_weight)?;
        let name = IrrepName::new(&rs, highest_weight)?;
        let conjugate = irrep::conjugate(&rs, highest_weight)?;
        let young_diagram = match cartan_type {
            CartanType::A(_) => Some(YoungDiagram::from_dynkin_labels(cartan_type, highest_weight)?),
            _ => None,
        };

        Ok(IrrepInfo {
            cartan_type,
            highest_weight: highest_weight.clone(),
            dimension: ws.dimension(),
            name: name.to_string(),
            latex_name: name.latex(),
            is_self_conjugate: conjugate == *highest_weight,
            conjugate,
            young_diagram,
            weights: ws
                .iter()
                .map(|(w, multiplicity)| WeightInfo {
                    labels: w.clone(),
                    ambient: rs.to_ambient(w),
                    multiplicity,
                })
                .collect(),
        })
    }

    /// Decomposes the tensor product of two irreps.
    ///
    /// Returns an error without computing any weights if the product exceeds
    /// the configured maximum dimension.
    pub fn tensor_product(
        &self,
        cartan_type: CartanType,
        lhs: &Weight,
        rhs: &Weight,
    ) -> LieResult<Arc<TensorDecomposition>> {
        lhs.check_highest_weight(cartan_type.rank())?;
        rhs.check_highest_weight(cartan_type.rank())?;
        let lhs_dim = self.dimension(cartan_type, lhs)?;
        let rhs_dim = self.dimension(cartan_type, rhs)?;
        tensor::check_tensor_dim(lhs_dim, rhs_dim, self.config.max_tensor_dim)?;

        self.cache.tensor_product(cartan_type, lhs, rhs, || {
            let rs = self.root_system(cartan_type)?;
            // Expand whichever factor is smaller.
            if lhs_dim <= rhs_dim {
                let ws = self.weight_system(cartan_type, lhs)?;
                tensor::decompose(&rs, &ws, rhs, self.config.max_tensor_dim)
            } else {
                let ws = self.weight_system(cartan_type, rhs)?;
                Ok(tensor::decompose(&rs, &ws, lhs, self.config.max_tensor_dim)?.swapped())
            }
        })
    }

    /// Decomposes the `power`th tensor power of an irrep.
    ///
    /// Each factor is multiplied in with [`Self::tensor_product()`], so the
    /// intermediate products are cached. Returns an error without computing
    /// anything if the power exceeds the configured maximum dimension.
    pub fn tensor_power(
        &self,
        cartan_type: CartanType,
        highest_weight: &Weight,
        power: u32,
    ) -> LieResult<TensorPower> {
        highest_weight.check_highest_weight(cartan_type.rank())?;
        let base_dimension = self.dimension(cartan_type, highest_weight)?;
        tensor::check_tensor_power_dim(base_dimension, power, self.config.max_tensor_dim)?;

        let mut summands = HashMap::from([(Weight::zero(cartan_type.rank()), 1_u64)]);
        // Powers of the trivial irrep are trivial.
        let factor_count = if highest_weight.is_zero() { 0 } else { power };
        for _ in 0..factor_count {
            let mut next: HashMap<Weight, u64> = HashMap::new();
            for (mu, m) in &summands {
                let product = self.tensor_product(cartan_type, mu, highest_weight)?;
                for term in &product.terms {
                    *next.entry(term.highest_weight.clone()).or_default() += m * term.multiplicity;
                }
            }
            summands = next;
        }

        let terms = summands
            .into_iter()
            .map(|(highest_weight, multiplicity)| {
                Ok(TensorTerm {
                    dimension: self.dimension(cartan_type, &highest_weight)?,
                    highest_weight,
                    multiplicity,
                })
            })
            .collect::<LieResult<Vec<_>>>()?;
        log::debug!("decomposed {cartan_type} {highest_weight}^{power} into {} irreps", terms.len());
        TensorPower::new(cartan_type, highest_weight.clone(), power, base_dimension, terms)
    }

    /// Returns the subalgebra obtained by deleting `node` from the ordinary or
    /// extended Dynkin diagram.
    pub fn break_symmetry(
        &self,
        cartan_type: CartanType,
        node: usize,
        method: BreakingMethod,
    ) -> LieResult<SymmetryBreaking> {
        let diagram = match method {
            BreakingMethod::Standard => self.dynkin_diagram(cartan_type)?,
            BreakingMethod::Extended => self.extended_dynkin_diagram(cartan_type)?,
        };
        branching::break_symmetry(&diagram, node)
    }

    /// Decomposes an irrep into irreps of the subalgebra obtained by deleting
    /// `node` from the ordinary or extended Dynkin diagram.
    pub fn branch(
        &self,
        cartan_type: CartanType,
        highest_weight: &Weight,
        node: usize,
        method: BreakingMethod,
    ) -> LieResult<BranchingRule> {
        highest_weight.check_highest_weight(cartan_type.rank())?;
        let breaking = self.break_symmetry(cartan_type, node, method)?;
        let rs = self.root_system(cartan_type)?;
        let ws = self.weight_system(cartan_type, highest_weight)?;
        branching::branch(&rs, &ws, &breaking, self.config.max_weights)
    }
}

/// Summary of a simple Lie algebra.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AlgebraInfo {
    /// Canonical Cartan type.
    pub cartan_type: CartanType,
    /// Name of the compact group in physics notation.
    pub physics_name: String,
    /// Rank, which is the number of simple roots.
    pub rank: usize,
    /// Dimension of the algebra, which is the rank plus the number of roots.
    pub dimension: usize,
    /// Number of roots.
    pub root_count: usize,
    /// Number of positive roots.
    pub positive_root_count: usize,
    /// Order of the Weyl group, in decimal.
    pub weyl_group_order: String,
    /// Cartan matrix.
    pub cartan_matrix: Vec<Vec<i64>>,
    /// Inverse of the Cartan matrix, whose rows are the fundamental weights in
    /// the basis of simple roots.
    pub inverse_cartan: Vec<QVector>,
    /// Inner products of the fundamental weights in ambient coordinates.
    pub quadratic_form: Vec<QVector>,
    /// Simple roots in ambient coordinates.
    pub simple_roots: Vec<QVector>,
    /// Fundamental weights in ambient coordinates.
    pub fundamental_weights: Vec<QVector>,
    /// Dynkin labels of the highest root, which is the highest weight of the
    /// adjoint irrep.
    pub highest_root: Weight,
    /// Dynkin labels of the Weyl vector.
    pub rho: Weight,
    /// Edges of the Dynkin diagram.
    pub dynkin_edges: Vec<DynkinEdge>,
    /// Text rendering of the Dynkin diagram.
    pub dynkin_diagram: String,
}

/// Summary of an irrep.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IrrepInfo {
    /// Cartan type of the algebra.
    pub cartan_type: CartanType,
    /// Highest weight.
    pub highest_weight: Weight,
    /// Dimension.
    pub dimension: u64,
    /// Physics name, such as `5̄`.
    pub name: String,
    /// Physics name in LaTeX, such as `\bar{5}`.
    pub latex_name: String,
    /// Highest weight of the conjugate irrep.
    pub conjugate: Weight,
    /// Whether the irrep is its own conjugate.
    pub is_self_conjugate: bool,
    /// Young diagram, for the A series only.
    pub young_diagram: Option<YoungDiagram>,
    /// Every weight, starting with the highest weight.
    pub weights: Vec<WeightInfo>,
}

/// Weight of an irrep.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WeightInfo {
    /// Dynkin labels.
    pub labels: Weight,
    /// Ambient coordinates.
    pub ambient: QVector,
    /// Multiplicity.
    pub multiplicity: u64,
}
