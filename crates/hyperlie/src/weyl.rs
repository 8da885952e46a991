//! Weyl group action on weights.
//!
//! All weights here are in the Dynkin basis, where the simple reflection
//! s<sub>i</sub> subtracts λ<sub>i</sub> copies of row `i` of the Cartan
//! matrix. That keeps every computation in exact integers.

use hyperlie_math::Parity;
use indexmap::IndexSet;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::error::bail_internal;
use crate::{DynkinDiagram, LieError, LieResult, RootSystem, Weight};

/// Reflects a weight through the hyperplane orthogonal to the `i`th simple
/// root: λ ↦ λ - ⟨λ, α<sub>i</sub><sup>∨</sup>⟩ α<sub>i</sub>.
pub fn reflect(root_system: &RootSystem, weight: &Weight, i: usize) -> Weight {
    let mut ret = weight.clone();
    reflect_in_place(root_system, &mut ret, i);
    ret
}

fn reflect_in_place(root_system: &RootSystem, weight: &mut Weight, i: usize) {
    let a = weight[i];
    if a != 0 {
        for (x, c) in std::iter::zip(&mut weight.0, &root_system.cartan_matrix()[i]) {
            *x -= a * c;
        }
    }
}

/// Returns the unique dominant weight in the Weyl orbit of `weight`, along
/// with the parity of a Weyl group element that maps `weight` to it.
pub fn to_dominant(root_system: &RootSystem, weight: &Weight) -> LieResult<(Weight, Parity)> {
    // Each reflection at a negative label decreases the length of the
    // remaining Weyl group element by one, so this takes at most as many
    // steps as there are positive roots.
    let max_steps = root_system.positive_roots().len();
    let mut ret = weight.clone();
    let mut parity = Parity::Even;
    for _ in 0..=max_steps {
        match ret.first_negative() {
            Some(i) => {
                reflect_in_place(root_system, &mut ret, i);
                parity = parity.opposite();
            }
            None => return Ok((ret, parity)),
        }
    }
    bail_internal!("{weight} did not reach the dominant chamber after {max_steps} reflections")
}

/// Returns the order of the stabilizer of a dominant weight, which is the
/// parabolic subgroup generated by the simple reflections at its zero labels.
pub fn stabilizer_order(root_system: &RootSystem, dominant: &Weight) -> LieResult<BigUint> {
    let zero_nodes = (0..dominant.rank())
        .filter(|&i| dominant[i] == 0)
        .collect::<Vec<_>>();
    let components = DynkinDiagram::new(root_system).identify_components(&zero_nodes)?;
    Ok(components
        .iter()
        .map(|c| c.cartan_type.weyl_group_order())
        .product())
}

/// Returns the number of weights in the Weyl orbit of `weight`, computed as
/// |W| / |W<sub>λ</sub>|.
pub fn orbit_size(root_system: &RootSystem, weight: &Weight) -> LieResult<BigUint> {
    let (dominant, _) = to_dominant(root_system, weight)?;
    let stabilizer = stabilizer_order(root_system, &dominant)?;
    Ok(root_system.cartan_type().weyl_group_order() / stabilizer)
}

/// Returns the Weyl orbit of `weight`, starting with its dominant
/// representative.
///
/// Returns an error instead of generating more than `max_size` weights.
pub fn orbit(root_system: &RootSystem, weight: &Weight, max_size: usize) -> LieResult<Vec<Weight>> {
    let (dominant, _) = to_dominant(root_system, weight)?;
    let expected = orbit_size(root_system, &dominant)?;
    let expected = match expected.to_usize() {
        Some(n) if n <= max_size => n,
        _ => return Err(LieError::resource("orbit size", max_size, expected.to_u64().unwrap_or(u64::MAX))),
    };

    // Every weight in the orbit can be reached from the dominant one by only
    // reflecting at positive labels.
    let mut seen = IndexSet::with_capacity(expected);
    seen.insert(dominant);
    let mut next_unprocessed_index = 0;
    while next_unprocessed_index < seen.len() {
        let current = seen[next_unprocessed_index].clone();
        for i in 0..current.rank() {
            if current[i] > 0 {
                seen.insert(reflect(root_system, &current, i));
            }
        }
        if seen.len() > expected {
            bail_internal!("orbit of {weight} exceeds its expected size {expected}");
        }
        next_unprocessed_index += 1;
    }
    if seen.len() != expected {
        bail_internal!("orbit of {weight} has {} weights; expected {expected}", seen.len());
    }
    Ok(seen.into_iter().collect())
}
