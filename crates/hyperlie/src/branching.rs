//! Symmetry breaking by deleting a node from the Dynkin diagram, and the
//! resulting branching rules.
//!
//! Deleting a node from the ordinary diagram gives a Levi subalgebra with a
//! U(1) factor. Deleting a node from the extended diagram gives a semisimple
//! subalgebra of full rank, such as SU(6) × SU(2) in E<sub>6</sub>.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use hyperlie_math::prelude::*;
use itertools::Itertools;

use crate::error::bail_internal;
use crate::weight_system::WeightSystem;
use crate::{
    CartanType, DiagramComponent, DynkinDiagram, LieError, LieResult, RootSystem, Weight,
};

/// Which Dynkin diagram a node is deleted from.
#[derive(serde::Serialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BreakingMethod {
    /// Delete a node from the ordinary diagram, leaving a U(1) factor.
    #[default]
    Standard,
    /// Delete a node from the extended diagram, whose node `rank` is the
    /// lowest root.
    Extended,
}

/// Subalgebra obtained by deleting a node from a Dynkin diagram.
///
/// The remaining nodes form the semisimple part. With
/// [`BreakingMethod::Standard`], the deleted node becomes a U(1) factor.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SymmetryBreaking {
    /// Algebra before breaking.
    pub parent: CartanType,
    /// Diagram that the node was deleted from.
    pub method: BreakingMethod,
    /// Index of the deleted node.
    pub removed_node: usize,
    /// Simple factors of the subalgebra, with their node mappings.
    pub factors: Vec<DiagramComponent>,
    /// Number of U(1) factors.
    pub u1_count: usize,
}

impl SymmetryBreaking {
    /// Returns the subalgebra in physics notation, such as
    /// `SU(3) × SU(2) × U(1)`.
    pub fn subalgebra_name(&self) -> String {
        self.factors
            .iter()
            .map(|f| f.cartan_type.physics_name())
            .chain(std::iter::repeat_n("U(1)".to_owned(), self.u1_count))
            .join(" × ")
    }
}

/// Returns the subalgebra obtained by deleting `node` from the Dynkin
/// diagram, which may be ordinary or extended.
///
/// Deleting a node from the extended diagram must leave a proper subalgebra,
/// so the lowest root and nodes with mark 1 are rejected.
pub fn break_symmetry(diagram: &DynkinDiagram, node: usize) -> LieResult<SymmetryBreaking> {
    let parent = diagram.cartan_type();
    if node >= diagram.node_count() {
        return Err(LieError::UnsupportedOperation(format!(
            "node {node} does not exist in {parent}, which has nodes 0 to {}",
            diagram.node_count() - 1,
        )));
    }
    let remaining = (0..diagram.node_count()).filter(|&i| i != node).collect_vec();
    let factors = diagram.identify_components(&remaining)?;

    let method = match diagram.is_extended() {
        true => BreakingMethod::Extended,
        false => BreakingMethod::Standard,
    };
    let u1_count = match method {
        BreakingMethod::Standard => 1,
        BreakingMethod::Extended => 0,
    };
    let subalgebra_dimension: usize = factors.iter().map(|f| f.cartan_type.algebra_dimension()).sum();
    if method == BreakingMethod::Extended && subalgebra_dimension == parent.algebra_dimension() {
        return Err(LieError::UnsupportedOperation(format!(
            "deleting node {node} from the extended diagram of {parent} leaves {parent} unbroken",
        )));
    }

    Ok(SymmetryBreaking {
        parent,
        method,
        removed_node: node,
        factors,
        u1_count,
    })
}

/// Irrep of a subalgebra appearing in a branching rule.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BranchingTerm {
    /// Highest weight for each simple factor, in canonical node order.
    pub irreps: Vec<Weight>,
    /// Dimension for each simple factor.
    pub dimensions: Vec<u64>,
    /// Exact U(1) charge.
    #[serde(serialize_with = "serialize_rational")]
    pub charge: Rational,
    /// U(1) charge multiplied by [`BranchingRule::charge_scale`].
    pub scaled_charge: i64,
    /// Number of times this irrep appears.
    pub multiplicity: u64,
}
impl BranchingTerm {
    /// Returns the total dimension of the subalgebra irrep.
    pub fn dimension(&self) -> u64 {
        self.dimensions.iter().product()
    }
}

/// Decomposition of an irrep into irreps of a subalgebra.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BranchingRule {
    /// Subalgebra.
    pub breaking: SymmetryBreaking,
    /// Highest weight of the parent irrep.
    pub highest_weight: Weight,
    /// Dimension of the parent irrep.
    pub dimension: u64,
    /// Smallest positive integer that makes every U(1) charge an integer.
    pub charge_scale: i64,
    /// Subalgebra irreps, sorted by descending charge and then by descending
    /// dimension.
    pub terms: Vec<BranchingTerm>,
}

fn serialize_rational<S: serde::Serializer>(r: &Rational, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(r)
}

/// Weights of an irrep of the subalgebra, projected to each simple factor.
type FactorWeights = Vec<Weight>;

/// Decomposes an irrep of the parent algebra into irreps of the subalgebra
/// described by `breaking`.
///
/// Each weight is projected onto the Dynkin labels of each factor, which are
/// the labels at the nodes of that factor, and onto the U(1) charge, which is
/// the coefficient of the deleted simple root. Within each charge, the highest
/// remaining weight is peeled off along with the full weight system of its
/// irrep until nothing is left.
///
/// For an extended breaking, the label at the lowest root node is ⟨μ, -γ^∨⟩
/// and every charge is zero.
pub fn branch(
    root_system: &RootSystem,
    weight_system: &WeightSystem,
    breaking: &SymmetryBreaking,
    max_weights: usize,
) -> LieResult<BranchingRule> {
    if breaking.parent != root_system.cartan_type() {
        return Err(LieError::UnsupportedOperation(format!(
            "cannot branch a {} irrep using a breaking of {}",
            root_system.cartan_type(),
            breaking.parent,
        )));
    }

    let (charge_column, lowest_coroot) = match breaking.method {
        BreakingMethod::Standard => (Some(root_system.inverse_cartan().col(breaking.removed_node)), None),
        BreakingMethod::Extended => (None, Some(root_system.lowest_coroot()?)),
    };
    let charge_scale = charge_column.as_ref().map_or(1, |col| common_denominator(&col.0));
    let charge_of = |w: &Weight| -> Rational {
        let Some(col) = &charge_column else {
            return int(0);
        };
        std::iter::zip(w.iter(), col.iter()).map(|(a, c)| c * a).sum()
    };
    // Dynkin labels at every node of the diagram the breaking came from.
    let diagram_labels = |w: &Weight| -> Weight {
        let Some(coroot) = &lowest_coroot else {
            return w.clone();
        };
        let lowest_label: i64 = std::iter::zip(w.iter(), coroot).map(|(a, c)| a * c).sum();
        Weight(w.iter().chain([lowest_label]).collect())
    };

    let factor_root_systems = breaking
        .factors
        .iter()
        .map(|f| RootSystem::new(f.cartan_type))
        .collect::<LieResult<Vec<_>>>()?;
    let mut factor_weight_systems: HashMap<(usize, Weight), WeightSystem> = HashMap::new();

    // Charge → projected weight → multiplicity
    let mut groups: BTreeMap<Rational, HashMap<FactorWeights, i64>> = BTreeMap::new();
    for (w, m) in weight_system.iter() {
        let labels = diagram_labels(w);
        let projected = breaking.factors.iter().map(|f| labels.restrict(&f.nodes)).collect_vec();
        *groups.entry(charge_of(w)).or_default().entry(projected).or_default() += m as i64;
    }

    let height = |projected: &FactorWeights| -> Rational {
        std::iter::zip(&factor_root_systems, projected)
            .map(|(rs, w)| rs.height(w))
            .sum()
    };

    let mut terms = vec![];
    for (charge, mut group) in groups.into_iter().rev() {
        group.retain(|_, m| *m != 0);
        while let Some(top) = group
            .keys()
            .max_by_key(|&k| (height(k), k.clone()))
            .cloned()
        {
            let n = group[&top];
            if n <= 0 || !top.iter().all(|w| w.is_dominant()) {
                bail_internal!("cannot peel {top:?} with multiplicity {n} at charge {charge}");
            }

            // Subtract the weight system of `top`.
            for (i, w) in top.iter().enumerate() {
                let key = (i, w.clone());
                if !factor_weight_systems.contains_key(&key) {
                    let ws = WeightSystem::new(&factor_root_systems[i], w, max_weights)?;
                    factor_weight_systems.insert(key, ws);
                }
            }
            let factor_systems = top
                .iter()
                .enumerate()
                .map(|(i, w)| &factor_weight_systems[&(i, w.clone())])
                .collect_vec();
            for (weights, mult) in product_weights(&factor_systems) {
                let Some(count) = group.get_mut(&weights) else {
                    bail_internal!("{weights:?} is missing while peeling {top:?}");
                };
                *count -= n * mult as i64;
                if *count < 0 {
                    bail_internal!("{weights:?} has negative multiplicity while peeling {top:?}");
                }
                if *count == 0 {
                    group.remove(&weights);
                }
            }

            terms.push(BranchingTerm {
                dimensions: factor_systems.iter().map(|ws| ws.dimension()).collect(),
                irreps: top,
                charge,
                scaled_charge: (charge * charge_scale).to_integer(),
                multiplicity: n as u64,
            });
        }
    }
    terms.sort_by_cached_key(|t| {
        (Reverse(t.charge), Reverse(t.dimension()), Reverse(t.irreps.clone()))
    });

    let total: u64 = terms.iter().map(|t| t.multiplicity * t.dimension()).sum();
    if total != weight_system.dimension() {
        bail_internal!(
            "branching of {} has total dimension {total}; expected {}",
            weight_system.highest_weight(),
            weight_system.dimension(),
        );
    }

    log::debug!(
        "branched {} {} to {} in {} terms",
        breaking.parent,
        weight_system.highest_weight(),
        breaking.subalgebra_name(),
        terms.len(),
    );

    Ok(BranchingRule {
        breaking: breaking.clone(),
        highest_weight: weight_system.highest_weight().clone(),
        dimension: weight_system.dimension(),
        charge_scale,
        terms,
    })
}

/// Returns the weights of a tensor product of irreps of different factors,
/// which are all combinations of one weight from each factor.
fn product_weights(factors: &[&WeightSystem]) -> Vec<(FactorWeights, u64)> {
    factors.iter().fold(vec![(vec![], 1)], |acc, ws| {
        acc.iter()
            .flat_map(|(prefix, m1)| {
                ws.iter().map(move |(w, m2)| {
                    let mut weights = prefix.clone();
                    weights.push(w.clone());
                    (weights, m1 * m2)
                })
            })
            .collect()
    })
}
