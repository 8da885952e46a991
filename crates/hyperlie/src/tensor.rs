//! Tensor product decomposition, using Klimyk's formula, and tensor powers.

use std::cmp::Reverse;
use std::collections::HashMap;

use itertools::Itertools;

use crate::dimension::dimension;
use crate::error::bail_internal;
use crate::weight_system::WeightSystem;
use crate::{CartanType, LieError, LieResult, RootSystem, Weight, weyl};

/// Irreducible summand in a tensor product.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorTerm {
    /// Highest weight of the summand.
    pub highest_weight: Weight,
    /// Number of times the summand appears.
    pub multiplicity: u64,
    /// Dimension of the summand.
    pub dimension: u64,
}

/// Decomposition of a tensor product of two irreps into irreps.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TensorDecomposition {
    /// Cartan type of the algebra.
    pub cartan_type: CartanType,
    /// Highest weight of the left factor.
    pub lhs: Weight,
    /// Highest weight of the right factor.
    pub rhs: Weight,
    /// Dimension of the left factor.
    pub lhs_dimension: u64,
    /// Dimension of the right factor.
    pub rhs_dimension: u64,
    /// Summands, sorted by descending dimension and then by descending Dynkin
    /// labels.
    pub terms: Vec<TensorTerm>,
}

impl TensorDecomposition {
    /// Returns the dimension of the tensor product.
    pub fn dimension(&self) -> u64 {
        self.lhs_dimension * self.rhs_dimension
    }
    /// Returns the multiplicity of an irrep in the tensor product.
    pub fn multiplicity(&self, highest_weight: &Weight) -> u64 {
        self.terms
            .iter()
            .find(|t| t.highest_weight == *highest_weight)
            .map_or(0, |t| t.multiplicity)
    }
    /// Returns the same decomposition with the factors listed in the other
    /// order.
    #[must_use]
    pub fn swapped(mut self) -> Self {
        std::mem::swap(&mut self.lhs, &mut self.rhs);
        std::mem::swap(&mut self.lhs_dimension, &mut self.rhs_dimension);
        self
    }
}

/// Decomposition of a tensor power of an irrep into irreps.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TensorPower {
    /// Cartan type of the algebra.
    pub cartan_type: CartanType,
    /// Highest weight of the irrep being raised to a power.
    pub highest_weight: Weight,
    /// Number of tensor factors.
    pub power: u32,
    /// Dimension of the irrep being raised to a power.
    pub base_dimension: u64,
    /// Dimension of the tensor power.
    pub dimension: u64,
    /// Summands, sorted by descending dimension and then by descending Dynkin
    /// labels.
    pub terms: Vec<TensorTerm>,
}

impl TensorPower {
    /// Assembles a tensor power from its summands, checking that their
    /// dimensions add up.
    pub fn new(
        cartan_type: CartanType,
        highest_weight: Weight,
        power: u32,
        base_dimension: u64,
        mut terms: Vec<TensorTerm>,
    ) -> LieResult<Self> {
        let Some(dimension) = base_dimension.checked_pow(power) else {
            return Err(LieError::resource("tensor dimension", u64::MAX, u64::MAX));
        };
        sort_terms(&mut terms);
        let total: u64 = terms.iter().map(|t| t.multiplicity * t.dimension).sum();
        if total != dimension {
            bail_internal!("{base_dimension}^{power} decomposed into total dimension {total}");
        }
        Ok(Self {
            cartan_type,
            highest_weight,
            power,
            base_dimension,
            dimension,
            terms,
        })
    }

    /// Returns the multiplicity of an irrep in the tensor power.
    pub fn multiplicity(&self, highest_weight: &Weight) -> u64 {
        self.terms
            .iter()
            .find(|t| t.highest_weight == *highest_weight)
            .map_or(0, |t| t.multiplicity)
    }
}

fn sort_terms(terms: &mut [TensorTerm]) {
    terms.sort_by_cached_key(|t| (Reverse(t.dimension), Reverse(t.highest_weight.clone())));
}

/// Returns an error if the tensor product of irreps with dimensions `lhs` and
/// `rhs` exceeds `max_tensor_dim`.
pub fn check_tensor_dim(lhs: u64, rhs: u64, max_tensor_dim: u64) -> LieResult<()> {
    let required = lhs.saturating_mul(rhs);
    if required > max_tensor_dim {
        log::warn!("tensor product dimension {lhs}×{rhs} exceeds {max_tensor_dim}");
        return Err(LieError::resource("tensor dimension", max_tensor_dim, required));
    }
    Ok(())
}

/// Returns the dimension of the `power`th tensor power of an irrep with
/// dimension `base`, or an error if it exceeds `max_tensor_dim`.
pub fn check_tensor_power_dim(base: u64, power: u32, max_tensor_dim: u64) -> LieResult<u64> {
    match base.checked_pow(power) {
        Some(required) if required <= max_tensor_dim => Ok(required),
        required => {
            let required = required.unwrap_or(u64::MAX);
            log::warn!("tensor power dimension {base}^{power} exceeds {max_tensor_dim}");
            Err(LieError::resource("tensor dimension", max_tensor_dim, required))
        }
    }
}

/// Decomposes the tensor product of the irrep described by `lhs` with the
/// irrep of highest weight `rhs`.
///
/// For each weight μ of `lhs` with multiplicity m, the weight σ = Λ + μ + ρ
/// (where Λ is `rhs`) contributes ±m to the irrep with highest weight w(σ) -
/// ρ, where w is the Weyl group element that takes σ into the dominant
/// chamber and ± is its sign. Weights σ that lie on a mirror contribute
/// nothing.
pub fn decompose(
    root_system: &RootSystem,
    lhs: &WeightSystem,
    rhs: &Weight,
    max_tensor_dim: u64,
) -> LieResult<TensorDecomposition> {
    rhs.check_highest_weight(root_system.rank())?;
    let lhs_dimension = lhs.dimension();
    let rhs_dimension = dimension(root_system, rhs)?;
    check_tensor_dim(lhs_dimension, rhs_dimension, max_tensor_dim)?;

    let rho = root_system.rho();
    let shifted_rhs = rhs + &rho;
    let mut buckets: HashMap<Weight, i64> = HashMap::new();
    for (mu, m) in lhs.iter() {
        let sigma = &shifted_rhs + mu;
        let (dominant, parity) = weyl::to_dominant(root_system, &sigma)?;
        if !dominant.is_strictly_dominant() {
            continue;
        }
        *buckets.entry(&dominant - &rho).or_default() += parity.sign() * m as i64;
    }

    let mut terms = vec![];
    for (highest_weight, count) in buckets {
        if count < 0 {
            bail_internal!("Klimyk coefficient of {highest_weight} is {count}");
        }
        if count > 0 {
            let dimension = dimension(root_system, &highest_weight)?;
            terms.push(TensorTerm {
                highest_weight,
                multiplicity: count as u64,
                dimension,
            });
        }
    }
    sort_terms(&mut terms);

    let total: u64 = terms.iter().map(|t| t.multiplicity * t.dimension).sum();
    if total != lhs_dimension * rhs_dimension {
        bail_internal!(
            "{lhs_dimension} × {rhs_dimension} decomposed into total dimension {total}: {}",
            terms.iter().map(|t| format!("{}×{}", t.multiplicity, t.highest_weight)).join(" + "),
        );
    }

    log::debug!(
        "decomposed {} {} ⊗ {rhs} into {} irreps",
        root_system.cartan_type(),
        lhs.highest_weight(),
        terms.len(),
    );

    Ok(TensorDecomposition {
        cartan_type: root_system.cartan_type(),
        lhs: lhs.highest_weight().clone(),
        rhs: rhs.clone(),
        lhs_dimension,
        rhs_dimension,
        terms,
    })
}
