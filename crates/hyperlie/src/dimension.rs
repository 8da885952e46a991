//! Weyl dimension formula.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive};

use crate::error::bail_internal;
use crate::{LieError, LieResult, RootSystem, Weight};

/// Returns the dimension of the irrep with highest weight `highest_weight`:
///
/// dim(Λ) = ∏<sub>α>0</sub> (Λ+ρ, α) / (ρ, α)
///
/// Returns an error if `highest_weight` has the wrong length or is not
/// dominant.
pub fn dimension(root_system: &RootSystem, highest_weight: &Weight) -> LieResult<u64> {
    highest_weight.check_highest_weight(root_system.rank())?;

    let rho = root_system.rho();
    let shifted = highest_weight.checked_add(&rho).ok_or_else(LieError::overflow)?;
    let mut product = BigRational::one();
    for root in root_system.positive_roots() {
        // The Gram denominator cancels between numerator and denominator.
        let numer = root_system.inner_scaled(&shifted, &root.labels)?;
        let denom = root_system.inner_scaled(&rho, &root.labels)?;
        if denom <= 0 {
            bail_internal!("(ρ, {}) is not positive", root.labels);
        }
        product *= BigRational::new(BigInt::from(numer), BigInt::from(denom));
    }

    if !product.is_integer() {
        bail_internal!("Weyl dimension of {highest_weight} is not an integer: {product}");
    }
    let dim = product.to_integer();
    dim.to_u64().ok_or_else(LieError::overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CartanType, WeightError};

    #[track_caller]
    fn assert_dim(t: CartanType, highest_weight: Weight, expected: u64) {
        let rs = RootSystem::new(t).unwrap();
        assert_eq!(dimension(&rs, &highest_weight).unwrap(), expected, "{t} {highest_weight}");
    }

    #[test]
    fn test_su3_dimensions() {
        assert_dim(CartanType::A(2), weight![0, 0], 1);
        assert_dim(CartanType::A(2), weight![1, 0], 3);
        assert_dim(CartanType::A(2), weight![0, 1], 3);
        assert_dim(CartanType::A(2), weight![1, 1], 8);
        assert_dim(CartanType::A(2), weight![2, 0], 6);
        assert_dim(CartanType::A(2), weight![3, 0], 10);
        assert_dim(CartanType::A(2), weight![2, 1], 15);
    }

    #[test]
    fn test_gut_dimensions() {
        assert_dim(CartanType::A(4), weight![1, 0, 0, 0], 5);
        assert_dim(CartanType::A(4), weight![0, 1, 0, 0], 10);
        assert_dim(CartanType::A(4), weight![2, 0, 0, 0], 15);
        assert_dim(CartanType::A(4), weight![1, 0, 0, 1], 24);

        assert_dim(CartanType::D(5), weight![1, 0, 0, 0, 0], 10);
        assert_dim(CartanType::D(5), weight![0, 1, 0, 0, 0], 45);
        assert_dim(CartanType::D(5), weight![0, 0, 0, 1, 0], 16);
        assert_dim(CartanType::D(5), weight![0, 0, 0, 0, 1], 16);
        assert_dim(CartanType::D(5), weight![0, 0, 0, 0, 2], 126);

        assert_dim(CartanType::E6, weight![1, 0, 0, 0, 0, 0], 27);
        assert_dim(CartanType::E6, weight![0, 1, 0, 0, 0, 0], 78);
        assert_dim(CartanType::E7, weight![0, 0, 0, 0, 0, 0, 1], 56);
        assert_dim(CartanType::E7, weight![1, 0, 0, 0, 0, 0, 0], 133);
        assert_dim(CartanType::E8, weight![0, 0, 0, 0, 0, 0, 0, 1], 248);
        assert_dim(CartanType::E8, weight![1, 0, 0, 0, 0, 0, 0, 0], 3875);
    }

    #[test]
    fn test_non_simply_laced_dimensions() {
        assert_dim(CartanType::B(3), weight![1, 0, 0], 7);
        assert_dim(CartanType::B(3), weight![0, 0, 1], 8);
        assert_dim(CartanType::C(3), weight![1, 0, 0], 6);
        assert_dim(CartanType::C(3), weight![0, 1, 0], 14);
        assert_dim(CartanType::F4, weight![0, 0, 0, 1], 26);
        assert_dim(CartanType::F4, weight![1, 0, 0, 0], 52);
        assert_dim(CartanType::G2, weight![1, 0], 7);
        assert_dim(CartanType::G2, weight![0, 1], 14);
    }

    #[test]
    fn test_dimension_errors() {
        let rs = RootSystem::new(CartanType::A(2)).unwrap();
        assert!(matches!(
            dimension(&rs, &weight![1, -1]),
            Err(LieError::InvalidWeight(_)),
        ));
        assert!(matches!(
            dimension(&rs, &weight![1, 0, 0]),
            Err(LieError::InvalidWeight(_)),
        ));
    }

    #[test]
    fn test_large_labels() {
        use crate::weight::MAX_LABEL;

        let rs = RootSystem::new(CartanType::A(1)).unwrap();
        assert_eq!(dimension(&rs, &weight![MAX_LABEL]), Ok(MAX_LABEL as u64 + 1));
        assert!(matches!(
            dimension(&rs, &weight![i64::MAX]),
            Err(LieError::InvalidWeight(WeightError::LabelTooLarge { .. })),
        ));

        let rs = RootSystem::new(CartanType::E8).unwrap();
        assert_eq!(
            dimension(&rs, &weight![0, 0, 0, 0, 0, 0, 0, MAX_LABEL]),
            Err(LieError::ResourceLimitExceeded {
                resource: "dimension",
                limit: u64::MAX,
                required: u64::MAX,
            }),
        );
    }
}
