//! Weight multiplicities of irreps, using Freudenthal's formula.

use std::cmp::Reverse;

use indexmap::IndexMap;
use num_traits::ToPrimitive;
use rayon::prelude::*;

use crate::dimension::dimension;
use crate::error::bail_internal;
use crate::{CartanType, LieError, LieResult, RootSystem, Weight, weyl};

/// Every weight of an irrep along with its multiplicity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightSystem {
    cartan_type: CartanType,
    highest_weight: Weight,
    dimension: u64,
    /// Dominant weights with their multiplicities, sorted by depth below the
    /// highest weight.
    dominant: Vec<(Weight, u64)>,
    /// All weights with their multiplicities, sorted by depth below the
    /// highest weight and then by descending Dynkin labels.
    weights: IndexMap<Weight, u64>,
}

impl WeightSystem {
    /// Computes the weight system of the irrep with highest weight
    /// `highest_weight`.
    ///
    /// Returns an error instead of producing more than `max_weights` distinct
    /// weights.
    pub fn new(
        root_system: &RootSystem,
        highest_weight: &Weight,
        max_weights: usize,
    ) -> LieResult<Self> {
        highest_weight.check_highest_weight(root_system.rank())?;
        let dimension = dimension(root_system, highest_weight)?;

        let dominant_weights = dominant_weights(root_system, highest_weight, max_weights)?;
        let dominant = freudenthal(root_system, highest_weight, &dominant_weights)?;

        // Multiplicity is constant on each Weyl orbit.
        let orbits = dominant
            .par_iter()
            .map(|(w, m)| Ok((weyl::orbit(root_system, w, max_weights)?, *m)))
            .collect::<LieResult<Vec<_>>>()?;
        let mut weights: IndexMap<Weight, u64> = orbits
            .into_iter()
            .flat_map(|(orbit, m)| orbit.into_iter().map(move |w| (w, m)))
            .collect();
        if weights.len() > max_weights {
            return Err(LieError::resource("weights", max_weights, weights.len()));
        }
        weights.sort_by_cached_key(|w, _| {
            (root_system.height(&(highest_weight - w)), Reverse(w.clone()))
        });

        let total: u64 = weights.values().sum();
        if total != dimension {
            bail_internal!(
                "weight system of {highest_weight} has total multiplicity {total} \
                 but dimension {dimension}",
            );
        }
        match weights.get(highest_weight).copied() {
            Some(1) => (),
            m => bail_internal!("highest weight {highest_weight} has multiplicity {m:?}"),
        }

        log::debug!(
            "computed {} weights ({} dominant) for {} {highest_weight}",
            weights.len(),
            dominant.len(),
            root_system.cartan_type(),
        );

        Ok(Self {
            cartan_type: root_system.cartan_type(),
            highest_weight: highest_weight.clone(),
            dimension,
            dominant,
            weights,
        })
    }

    /// Returns the Cartan type of the algebra.
    pub fn cartan_type(&self) -> CartanType {
        self.cartan_type
    }
    /// Returns the highest weight.
    pub fn highest_weight(&self) -> &Weight {
        &self.highest_weight
    }
    /// Returns the dimension of the irrep, which is the sum of all
    /// multiplicities.
    pub fn dimension(&self) -> u64 {
        self.dimension
    }
    /// Returns the number of distinct weights.
    pub fn len(&self) -> usize {
        self.weights.len()
    }
    /// Returns whether there are no weights, which is never the case.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the dominant weights with their multiplicities, sorted by
    /// depth below the highest weight.
    pub fn dominant_weights(&self) -> &[(Weight, u64)] {
        &self.dominant
    }
    /// Returns an iterator over all weights with their multiplicities.
    pub fn iter(&self) -> impl '_ + ExactSizeIterator<Item = (&Weight, u64)> {
        self.weights.iter().map(|(w, &m)| (w, m))
    }
    /// Returns the multiplicity of a weight, which is zero if it is not a
    /// weight of the irrep.
    pub fn multiplicity(&self, weight: &Weight) -> u64 {
        self.weights.get(weight).copied().unwrap_or(0)
    }
}

/// Returns the dominant weights of the irrep with highest weight
/// `highest_weight`, sorted by depth.
///
/// These are exactly the dominant weights below `highest_weight` in the
/// same coset of the root lattice. Each one is reachable from
/// `highest_weight` by subtracting positive roots one at a time without ever
/// leaving the dominant chamber.
fn dominant_weights(
    root_system: &RootSystem,
    highest_weight: &Weight,
    max_weights: usize,
) -> LieResult<Vec<Weight>> {
    let mut total_weights = 0_usize;
    let mut count_orbit = |w: &Weight| -> LieResult<()> {
        let size = weyl::orbit_size(root_system, w)?.to_usize().unwrap_or(usize::MAX);
        total_weights = total_weights.saturating_add(size);
        if total_weights > max_weights {
            log::warn!(
                "weight system of {} {highest_weight} exceeds {max_weights} weights",
                root_system.cartan_type(),
            );
            return Err(LieError::resource("weights", max_weights, total_weights));
        }
        Ok(())
    };

    // Dominant weight → depth
    let mut seen = IndexMap::new();
    count_orbit(highest_weight)?;
    seen.insert(highest_weight.clone(), 0_i64);
    let mut next_unprocessed_index = 0;
    while let Some((mu, &depth)) = seen.get_index(next_unprocessed_index) {
        let mu = mu.clone();
        for root in root_system.positive_roots() {
            let nu = &mu - &root.labels;
            if nu.is_dominant() && !seen.contains_key(&nu) {
                count_orbit(&nu)?;
                seen.insert(nu, depth + root.height);
            }
        }
        next_unprocessed_index += 1;
    }

    seen.sort_by(|_, d1, _, d2| d1.cmp(d2));
    Ok(seen.into_keys().collect())
}

/// Computes the multiplicity of each dominant weight using Freudenthal's
/// formula:
///
/// ((Λ+ρ, Λ+ρ) - (μ+ρ, μ+ρ)) m(μ) = 2 Σ<sub>α>0</sub> Σ<sub>k≥1</sub>
/// m(μ+kα) (μ+kα, α)
///
/// `dominant` must be sorted by depth, so that every weight on the right side
/// is already known when it is needed.
fn freudenthal(
    root_system: &RootSystem,
    highest_weight: &Weight,
    dominant: &[Weight],
) -> LieResult<Vec<(Weight, u64)>> {
    let rho = root_system.rho();
    let top = highest_weight.checked_add(&rho).ok_or_else(LieError::overflow)?;
    let top_norm = root_system.inner_scaled(&top, &top)?;

    let mut mults: IndexMap<Weight, u64> = IndexMap::with_capacity(dominant.len());
    for mu in dominant {
        if mu == highest_weight {
            mults.insert(mu.clone(), 1);
            continue;
        }

        let shifted = mu + &rho;
        let denom = top_norm
            .checked_sub(root_system.inner_scaled(&shifted, &shifted)?)
            .ok_or_else(LieError::overflow)?;
        if denom <= 0 {
            bail_internal!("Freudenthal denominator for {mu} is {denom}");
        }

        let mut sum: i64 = 0;
        for root in root_system.positive_roots() {
            let alpha = &root.labels;
            let mut nu = mu + alpha;
            // Weight strings are unbroken, so stop at the first non-weight.
            loop {
                let (dom, _) = weyl::to_dominant(root_system, &nu)?;
                let Some(&m) = mults.get(&dom) else {
                    break;
                };
                let term = i64::try_from(m)
                    .ok()
                    .and_then(|m| m.checked_mul(root_system.inner_scaled(&nu, alpha).ok()?));
                sum = term
                    .and_then(|term| sum.checked_add(term))
                    .ok_or_else(LieError::overflow)?;
                nu += alpha;
            }
        }

        let numer = sum.checked_mul(2).ok_or_else(LieError::overflow)?;
        if numer <= 0 || numer % denom != 0 {
            bail_internal!("Freudenthal multiplicity of {mu} is {numer}/{denom}");
        }
        mults.insert(mu.clone(), (numer / denom) as u64);
    }
    Ok(mults.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn weight_system(t: CartanType, highest_weight: Weight) -> WeightSystem {
        let rs = RootSystem::new(t).unwrap();
        WeightSystem::new(&rs, &highest_weight, 100_000).unwrap()
    }

    #[test]
    fn test_su3_fundamental() {
        let ws = weight_system(CartanType::A(2), weight![1, 0]);
        assert_eq!(
            ws.iter().collect::<Vec<_>>(),
            vec![(&weight![1, 0], 1), (&weight![-1, 1], 1), (&weight![0, -1], 1)],
        );
    }

    #[test]
    fn test_su3_adjoint() {
        let ws = weight_system(CartanType::A(2), weight![1, 1]);
        assert_eq!(ws.len(), 7);
        assert_eq!(ws.multiplicity(&weight![0, 0]), 2);
        assert_eq!(ws.multiplicity(&weight![1, 1]), 1);
        assert_eq!(ws.multiplicity(&weight![-1, 2]), 1);
        assert_eq!(ws.multiplicity(&weight![5, 5]), 0);
        assert_eq!(ws.dominant_weights(), &[(weight![1, 1], 1), (weight![0, 0], 2)]);
    }

    #[test]
    fn test_multiplicities() {
        // SU(3) 15 = [2, 1] has dominant weights [2,1]:1, [0,2]:1, [1,0]:2
        let ws = weight_system(CartanType::A(2), weight![2, 1]);
        assert_eq!(
            ws.dominant_weights(),
            &[(weight![2, 1], 1), (weight![0, 2], 1), (weight![1, 0], 2)],
        );

        // SO(10) adjoint has 5 zero weights.
        let ws = weight_system(CartanType::D(5), weight![0, 1, 0, 0, 0]);
        assert_eq!(ws.multiplicity(&weight![0, 0, 0, 0, 0]), 5);
        assert_eq!(ws.len(), 41);

        // E6 adjoint has 6 zero weights.
        let ws = weight_system(CartanType::E6, weight![0, 1, 0, 0, 0, 0]);
        assert_eq!(ws.multiplicity(&weight![0, 0, 0, 0, 0, 0]), 6);
        assert_eq!(ws.dimension(), 78);

        // G2 7 has one zero weight, and F4 26 has two.
        let ws = weight_system(CartanType::G2, weight![1, 0]);
        assert_eq!(ws.multiplicity(&weight![0, 0]), 1);
        let ws = weight_system(CartanType::F4, weight![0, 0, 0, 1]);
        assert_eq!(ws.multiplicity(&weight![0, 0, 0, 0]), 2);
    }

    #[test]
    fn test_multiplicities_sum_to_dimension() {
        for (t, w) in [
            (CartanType::A(4), weight![1, 0, 0, 1]),
            (CartanType::A(4), weight![0, 1, 1, 0]),
            (CartanType::B(3), weight![1, 0, 1]),
            (CartanType::C(3), weight![0, 1, 1]),
            (CartanType::D(5), weight![0, 0, 0, 1, 0]),
            (CartanType::E6, weight![1, 0, 0, 0, 0, 0]),
            (CartanType::E7, weight![0, 0, 0, 0, 0, 0, 1]),
            (CartanType::F4, weight![1, 0, 0, 0]),
            (CartanType::G2, weight![1, 1]),
        ] {
            let rs = RootSystem::new(t).unwrap();
            let ws = WeightSystem::new(&rs, &w, 100_000).unwrap();
            let total: u64 = ws.iter().map(|(_, m)| m).sum();
            assert_eq!(total, dimension(&rs, &w).unwrap(), "{t} {w}");
            assert_eq!(ws.multiplicity(&w), 1);
        }
    }

    #[test]
    fn test_weight_limit() {
        let rs = RootSystem::new(CartanType::A(4)).unwrap();
        let result = WeightSystem::new(&rs, &weight![1, 0, 0, 1], 10);
        assert!(matches!(
            result,
            Err(LieError::ResourceLimitExceeded {
                resource: "weights",
                limit: 10,
                ..
            }),
        ));
        // 24 has 20 roots and one zero weight.
        assert_eq!(WeightSystem::new(&rs, &weight![1, 0, 0, 1], 21).unwrap().len(), 21);
    }
}
