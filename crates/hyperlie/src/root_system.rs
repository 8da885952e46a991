//! Root systems and the weight lattice.

use hyperlie_math::prelude::*;
use indexmap::IndexSet;
use itertools::Itertools;

use crate::error::bail_internal;
use crate::weight::Labels;
use crate::{CartanType, LieError, LieResult, Weight};

/// Positive root, stored both in the Dynkin basis and in the basis of simple
/// roots.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositiveRoot {
    /// Dynkin labels of the root.
    pub labels: Weight,
    /// Coefficients of the root in the basis of simple roots. These are all
    /// nonnegative.
    pub coords: Labels,
    /// Sum of `coords`.
    pub height: i64,
}

/// Root system of a simple Lie algebra, along with everything needed to
/// compute with weights in the Dynkin basis.
///
/// Simple roots are embedded in the standard orthogonal coordinates used by
/// Bourbaki, and the node order matches Bourbaki's.
#[derive(Debug, Clone)]
pub struct RootSystem {
    cartan_type: CartanType,
    /// Simple roots in ambient coordinates.
    simple_roots: Vec<QVector>,
    /// Cartan matrix, where entry `(i, j)` is ⟨α<sub>i</sub>,
    /// α<sub>j</sub><sup>∨</sup>⟩. Row `i` is the Dynkin labels of
    /// α<sub>i</sub>.
    cartan_matrix: Vec<Labels>,
    /// Inverse of the Cartan matrix. Row `i` gives the fundamental weight
    /// Λ<sub>i</sub> in the basis of simple roots.
    inverse_cartan: QMatrix,
    /// Fundamental weights in ambient coordinates.
    fundamental_weights: Vec<QVector>,
    /// Gram matrix of the fundamental weights, multiplied by
    /// `gram_denominator` so that every entry is an integer.
    gram: Vec<Labels>,
    /// Common denominator of the Gram matrix of the fundamental weights.
    gram_denominator: i64,
    /// Height of each fundamental weight, which is the row sum of the inverse
    /// Cartan matrix.
    fundamental_heights: Vec<Rational>,
    /// Positive roots sorted by height.
    positive_roots: Vec<PositiveRoot>,
}

impl RootSystem {
    /// Constructs the root system for a Cartan type.
    ///
    /// Returns an error if any derived quantity fails its consistency check.
    pub fn new(cartan_type: CartanType) -> LieResult<Self> {
        let n = cartan_type.rank();
        let simple_roots = ambient_simple_roots(cartan_type);
        if simple_roots.len() != n {
            bail_internal!("{cartan_type} has {} simple roots", simple_roots.len());
        }

        // C_ij = 2(α_i, α_j) / (α_j, α_j)
        let cartan_q = QMatrix::from_fn(n, |i, j| {
            int(2) * simple_roots[i].dot(&simple_roots[j]) / simple_roots[j].mag2()
        });
        let Some(cartan_rows) = cartan_q.to_integer_rows() else {
            bail_internal!("{cartan_type} Cartan matrix is not integral:\n{cartan_q}");
        };
        if cartan_rows != cartan_type.cartan_matrix() {
            bail_internal!("{cartan_type} Cartan matrix does not match its Dynkin diagram");
        }
        if (0..n).any(|i| cartan_rows[i][i] != 2) {
            bail_internal!("{cartan_type} Cartan matrix has a diagonal entry other than 2");
        }
        let cartan_matrix = cartan_rows.iter().map(|row| Labels::from_slice(row)).collect_vec();

        let Some(inverse_cartan) = cartan_q.inverse() else {
            bail_internal!("{cartan_type} Cartan matrix is singular");
        };

        // Λ_i = Σ_j (C⁻¹)_ij α_j
        let fundamental_weights = inverse_cartan
            .rows()
            .map(|row| std::iter::zip(row.iter(), &simple_roots).map(|(c, a)| a * c).sum::<QVector>())
            .collect_vec();

        let gram_q = QMatrix::from_fn(n, |i, j| {
            fundamental_weights[i].dot(&fundamental_weights[j])
        });
        let gram_denominator = common_denominator(&gram_q.rows().flat_map(|r| r.0).collect_vec());
        let gram = gram_q
            .rows()
            .map(|row| row.iter().map(|x| (x * gram_denominator).to_integer()).collect())
            .collect();

        let fundamental_heights = inverse_cartan.rows().map(|row| row.iter().sum()).collect();

        let positive_roots = positive_roots(&cartan_matrix);
        if positive_roots.len() != cartan_type.positive_root_count() {
            bail_internal!(
                "{cartan_type} has {} positive roots; expected {}",
                positive_roots.len(),
                cartan_type.positive_root_count(),
            );
        }

        log::debug!(
            "constructed root system for {cartan_type} with {} roots",
            2 * positive_roots.len(),
        );

        Ok(Self {
            cartan_type,
            simple_roots,
            cartan_matrix,
            inverse_cartan,
            fundamental_weights,
            gram,
            gram_denominator,
            fundamental_heights,
            positive_roots,
        })
    }

    /// Returns the Cartan type.
    pub fn cartan_type(&self) -> CartanType {
        self.cartan_type
    }
    /// Returns the rank.
    pub fn rank(&self) -> usize {
        self.simple_roots.len()
    }

    /// Returns the simple roots in ambient coordinates.
    pub fn simple_roots(&self) -> &[QVector] {
        &self.simple_roots
    }
    /// Returns the Cartan matrix. Row `i` is the Dynkin labels of the `i`th
    /// simple root.
    pub fn cartan_matrix(&self) -> &[Labels] {
        &self.cartan_matrix
    }
    /// Returns the inverse of the Cartan matrix. Row `i` is the `i`th
    /// fundamental weight in the basis of simple roots.
    pub fn inverse_cartan(&self) -> &QMatrix {
        &self.inverse_cartan
    }
    /// Returns the fundamental weights in ambient coordinates.
    pub fn fundamental_weights(&self) -> &[QVector] {
        &self.fundamental_weights
    }
    /// Returns the Gram matrix of the fundamental weights, which is the
    /// quadratic form on the weight lattice in the Dynkin basis.
    pub fn gram_matrix(&self) -> QMatrix {
        let d = Rational::from_integer(self.gram_denominator);
        QMatrix::from_fn(self.rank(), |i, j| int(self.gram[i][j]) / d)
    }

    /// Returns the `i`th simple root in the Dynkin basis.
    pub fn simple_root(&self, i: usize) -> Weight {
        Weight(self.cartan_matrix[i].clone())
    }
    /// Returns the positive roots, sorted by height.
    pub fn positive_roots(&self) -> &[PositiveRoot] {
        &self.positive_roots
    }
    /// Returns all roots in the Dynkin basis: the positive roots sorted by
    /// height followed by their negatives.
    pub fn roots(&self) -> Vec<Weight> {
        let positive = self.positive_roots.iter().map(|r| r.labels.clone());
        let negative = self.positive_roots.iter().map(|r| -&r.labels);
        positive.chain(negative).collect()
    }
    /// Returns all roots in ambient coordinates.
    pub fn ambient_roots(&self) -> Vec<QVector> {
        self.roots().iter().map(|r| self.to_ambient(r)).collect()
    }
    /// Returns the highest root, which is the unique positive root of maximal
    /// height.
    pub fn highest_root(&self) -> &PositiveRoot {
        // `positive_roots()` is never empty and is sorted by height.
        &self.positive_roots[self.positive_roots.len() - 1]
    }
    /// Returns coefficients c<sub>i</sub> such that ⟨λ, -γ<sup>∨</sup>⟩ = Σ
    /// c<sub>i</sub> λ<sub>i</sub> for every weight λ, where γ is the highest
    /// root. These are the comarks, negated.
    ///
    /// This is the Dynkin label at the extra node of the extended Dynkin
    /// diagram.
    pub fn lowest_coroot(&self) -> LieResult<Labels> {
        let gamma = &self.highest_root().labels;
        let gamma_norm = self.inner_scaled(gamma, gamma)?;
        (0..self.rank())
            .map(|i| {
                // ⟨ω_i, -γ^∨⟩ = -2(ω_i, γ) / (γ, γ)
                let numer = -2 * self.inner_scaled(&Weight::fundamental(self.rank(), i), gamma)?;
                if numer % gamma_norm != 0 {
                    bail_internal!("comark {i} of {} is {numer}/{gamma_norm}", self.cartan_type);
                }
                Ok(numer / gamma_norm)
            })
            .collect()
    }
    /// Returns the Weyl vector ρ, which is half the sum of the positive roots
    /// and also the sum of the fundamental weights.
    pub fn rho(&self) -> Weight {
        Weight::rho(self.rank())
    }

    /// Returns the ambient coordinates of a weight.
    pub fn to_ambient(&self, weight: &Weight) -> QVector {
        std::iter::zip(weight.iter(), &self.fundamental_weights)
            .map(|(a, v)| v * a)
            .sum()
    }
    /// Returns the coefficients of a weight in the basis of simple roots.
    /// These are integers exactly when the weight is in the root lattice.
    pub fn simple_root_coords(&self, weight: &Weight) -> QVector {
        self.inverse_cartan
            .left_mul(&QVector::from_integers(weight.labels()))
    }
    /// Returns the sum of the coefficients of a weight in the basis of simple
    /// roots. For a difference of two weights in the same irrep, this is the
    /// number of simple roots separating them.
    pub fn height(&self, weight: &Weight) -> Rational {
        std::iter::zip(weight.iter(), &self.fundamental_heights)
            .map(|(a, h)| h * a)
            .sum()
    }

    /// Returns the inner product of two weights.
    pub fn inner(&self, a: &Weight, b: &Weight) -> LieResult<Rational> {
        Ok(Rational::new(self.inner_scaled(a, b)?, self.gram_denominator))
    }
    /// Returns the inner product of two weights multiplied by
    /// [`Self::gram_denominator()`], which is always an integer.
    ///
    /// Returns an error if the result does not fit in an `i64`.
    pub fn inner_scaled(&self, a: &Weight, b: &Weight) -> LieResult<i64> {
        let mut ret: i64 = 0;
        for (i, x) in a.iter().enumerate() {
            if x == 0 {
                continue;
            }
            let term = std::iter::zip(&self.gram[i], b.iter())
                .try_fold(0_i64, |acc, (&g, y)| acc.checked_add(g.checked_mul(y)?))
                .and_then(|row| row.checked_mul(x))
                .and_then(|term| ret.checked_add(term));
            ret = term.ok_or_else(LieError::overflow)?;
        }
        Ok(ret)
    }
    /// Returns the denominator used by [`Self::inner_scaled()`].
    pub fn gram_denominator(&self) -> i64 {
        self.gram_denominator
    }
}

/// Returns the positive roots of the root system with the given Cartan
/// matrix, sorted by height.
///
/// Roots are built up one height at a time. β + α<sub>i</sub> is a root
/// exactly when the α<sub>i</sub>-string through β extends upward, which is
/// when p - ⟨β, α<sub>i</sub><sup>∨</sup>⟩ > 0 where p is the number of times
/// α<sub>i</sub> can be subtracted from β.
fn positive_roots(cartan_matrix: &[Labels]) -> Vec<PositiveRoot> {
    let n = cartan_matrix.len();
    let labels_of = |coords: &Labels| -> Labels {
        (0..n)
            .map(|i| (0..n).map(|j| coords[j] * cartan_matrix[j][i]).sum())
            .collect()
    };

    let mut roots: IndexSet<Labels> = (0..n)
        .map(|i| {
            let mut coords = Labels::from_elem(0, n);
            coords[i] = 1;
            coords
        })
        .collect();

    let mut next_unprocessed_index = 0;
    while next_unprocessed_index < roots.len() {
        let beta = roots[next_unprocessed_index].clone();
        let labels = labels_of(&beta);
        for i in 0..n {
            let mut p = 0;
            let mut lower = beta.clone();
            loop {
                lower[i] -= 1;
                if lower[i] < 0 || !roots.contains(&lower) {
                    break;
                }
                p += 1;
            }
            if p - labels[i] > 0 {
                let mut higher = beta.clone();
                higher[i] += 1;
                roots.insert(higher);
            }
        }
        next_unprocessed_index += 1;
    }

    roots
        .into_iter()
        .map(|coords| PositiveRoot {
            labels: Weight(labels_of(&coords)),
            height: coords.iter().sum(),
            coords,
        })
        .sorted_by_key(|r| r.height)
        .collect()
}

/// Returns the simple roots of a Cartan type in the standard embedding.
fn ambient_simple_roots(cartan_type: CartanType) -> Vec<QVector> {
    let e = |ndim: usize, i: usize| QVector::unit(ndim, i);
    // e_i - e_{i+1} for each i in `0..count`
    let chain = |ndim: usize, count: usize| (0..count).map(move |i| e(ndim, i) - e(ndim, i + 1));

    let n = cartan_type.rank();
    match cartan_type {
        CartanType::A(_) => chain(n + 1, n).collect(),
        CartanType::B(_) => chain(n, n - 1).chain([e(n, n - 1)]).collect(),
        CartanType::C(_) => chain(n, n - 1).chain([e(n, n - 1) * 2]).collect(),
        CartanType::D(_) => chain(n, n - 1)
            .chain([e(n, n - 2) + e(n, n - 1)])
            .collect(),
        CartanType::E6 | CartanType::E7 | CartanType::E8 => {
            let e8 = [QVector::from_halves(&[1, -1, -1, -1, -1, -1, -1, 1]), e(8, 0) + e(8, 1)]
                .into_iter()
                .chain((0..6).map(|i| e(8, i + 1) - e(8, i)));
            e8.take(n).collect()
        }
        CartanType::F4 => vec![
            e(4, 1) - e(4, 2),
            e(4, 2) - e(4, 3),
            e(4, 3),
            QVector::from_halves(&[1, -1, -1, -1]),
        ],
        CartanType::G2 => vec![qvector![1, -1, 0], qvector![-2, 1, 1]],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn all_small_types() -> Vec<CartanType> {
        (1..=6)
            .map(CartanType::A)
            .chain((2..=5).map(CartanType::B))
            .chain((2..=5).map(CartanType::C))
            .chain((4..=6).map(CartanType::D))
            .chain([
                CartanType::E6,
                CartanType::E7,
                CartanType::E8,
                CartanType::F4,
                CartanType::G2,
            ])
            .collect()
    }

    #[test]
    fn test_root_counts() {
        for t in all_small_types() {
            let rs = RootSystem::new(t).unwrap();
            assert_eq!(rs.roots().len(), t.root_count(), "{t}");
            assert_eq!(rs.ambient_roots().iter().unique().count(), t.root_count(), "{t}");
        }
        assert_eq!(RootSystem::new(CartanType::E8).unwrap().roots().len(), 240);
        assert_eq!(RootSystem::new(CartanType::E6).unwrap().roots().len(), 72);
    }

    #[test]
    fn test_cartan_matrix_invariants() {
        for t in all_small_types() {
            let rs = RootSystem::new(t).unwrap();
            let c = rs.cartan_matrix();
            for i in 0..t.rank() {
                assert_eq!(c[i][i], 2);
                for j in 0..t.rank() {
                    if i != j {
                        assert!(c[i][j] <= 0);
                        assert_eq!(c[i][j] == 0, c[j][i] == 0);
                    }
                }
            }
            let c = QMatrix::from_integer_rows(c);
            assert_ne!(c.determinant(), int(0), "{t}");
            assert_eq!(&c * rs.inverse_cartan(), QMatrix::ident(t.rank()));
        }
    }

    #[test]
    fn test_cartan_determinants() {
        #[track_caller]
        fn assert_det(t: CartanType, expected: i64) {
            let c = QMatrix::from_integer_rows(&t.cartan_matrix());
            assert_eq!(c.determinant(), int(expected), "{t}");
        }
        assert_det(CartanType::A(4), 5);
        assert_det(CartanType::B(3), 2);
        assert_det(CartanType::C(3), 2);
        assert_det(CartanType::D(5), 4);
        assert_det(CartanType::E6, 3);
        assert_det(CartanType::E7, 2);
        assert_det(CartanType::E8, 1);
        assert_det(CartanType::F4, 1);
        assert_det(CartanType::G2, 1);
    }

    #[test]
    fn test_roots_closed_under_negation() {
        for t in all_small_types() {
            let rs = RootSystem::new(t).unwrap();
            let roots: IndexSet<QVector> = rs.ambient_roots().into_iter().collect();
            for r in &roots {
                assert!(roots.contains(&-r), "{t}: missing negative of {r}");
            }
        }
    }

    #[test]
    fn test_fundamental_weights_are_dual() {
        for t in all_small_types() {
            let rs = RootSystem::new(t).unwrap();
            for (i, w) in rs.fundamental_weights().iter().enumerate() {
                for (j, a) in rs.simple_roots().iter().enumerate() {
                    let pairing = int(2) * w.dot(a) / a.mag2();
                    assert_eq!(pairing, int((i == j) as i64), "{t}");
                }
            }
        }
    }

    #[test]
    fn test_rho() {
        for t in all_small_types() {
            let rs = RootSystem::new(t).unwrap();
            let positive_sum: QVector = rs
                .positive_roots()
                .iter()
                .map(|r| rs.to_ambient(&r.labels))
                .sum();
            assert_eq!(&positive_sum / int(2), rs.to_ambient(&rs.rho()).pad(positive_sum.ndim()));
        }
    }

    #[test]
    fn test_highest_root() {
        #[track_caller]
        fn assert_highest_root(t: CartanType, labels: Weight, height: i64) {
            let rs = RootSystem::new(t).unwrap();
            assert_eq!(rs.highest_root().labels, labels);
            assert_eq!(rs.highest_root().height, height);
        }

        // The highest root is the highest weight of the adjoint representation.
        assert_highest_root(CartanType::A(4), weight![1, 0, 0, 1], 4);
        assert_highest_root(CartanType::D(5), weight![0, 1, 0, 0, 0], 7);
        assert_highest_root(CartanType::E6, weight![0, 1, 0, 0, 0, 0], 11);
        assert_highest_root(CartanType::E8, weight![0, 0, 0, 0, 0, 0, 0, 1], 29);
        assert_highest_root(CartanType::F4, weight![1, 0, 0, 0], 11);
        assert_highest_root(CartanType::G2, weight![0, 1], 5);
    }

    #[test]
    fn test_inner_product() {
        let rs = RootSystem::new(CartanType::A(2)).unwrap();
        assert_eq!(rs.inner(&weight![1, 0], &weight![1, 0]), Ok(frac(2, 3)));
        assert_eq!(rs.inner(&weight![1, 0], &weight![0, 1]), Ok(frac(1, 3)));
        assert_eq!(rs.inner(&rs.simple_root(0), &rs.simple_root(0)), Ok(int(2)));
        assert_eq!(rs.height(&weight![1, 1]), int(2));
        assert_eq!(rs.simple_root_coords(&weight![1, 1]), qvector![1, 1]);
    }

    #[test]
    fn test_lowest_coroot() {
        #[track_caller]
        fn assert_lowest_coroot(t: CartanType, expected: &[i64]) {
            let rs = RootSystem::new(t).unwrap();
            assert_eq!(rs.lowest_coroot().unwrap().as_slice(), expected, "{t}");
        }

        // Simply laced: the comarks are the marks.
        assert_lowest_coroot(CartanType::A(3), &[-1, -1, -1]);
        assert_lowest_coroot(CartanType::D(5), &[-1, -2, -2, -1, -1]);
        assert_lowest_coroot(CartanType::E6, &[-1, -2, -2, -3, -2, -1]);
        // γ = 3α₁ + 2α₂, and α₁ is short.
        assert_lowest_coroot(CartanType::G2, &[-1, -2]);
        // γ^∨ is the highest short coroot.
        assert_lowest_coroot(CartanType::B(3), &[-1, -2, -1]);
    }

    #[test]
    fn test_inner_product_overflow() {
        let rs = RootSystem::new(CartanType::A(1)).unwrap();
        assert_eq!(rs.inner_scaled(&weight![3], &weight![5]), Ok(15));
        assert_eq!(
            rs.inner_scaled(&weight![i64::MAX], &weight![2]),
            Err(LieError::overflow()),
        );
    }
}
