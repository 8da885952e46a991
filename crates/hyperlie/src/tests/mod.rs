use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::branching::BreakingMethod;
use crate::*;

fn engine() -> LieEngine {
    LieEngine::new(EngineConfig {
        max_weights: 100_000,
        max_tensor_dim: u64::MAX,
        cache_capacity: 16,
    })
}

#[track_caller]
fn tensor(engine: &LieEngine, group: &str, lhs: Weight, rhs: Weight) -> Vec<(Weight, u64)> {
    let t = engine.classify(group).unwrap();
    engine
        .tensor_product(t, &lhs, &rhs)
        .unwrap()
        .terms
        .iter()
        .map(|term| (term.highest_weight.clone(), term.multiplicity))
        .collect()
}

#[test]
fn test_su3_scenarios() {
    let engine = engine();
    let t = engine.classify("SU(3)").unwrap();
    assert_eq!(engine.dimension(t, &weight![1, 0]).unwrap(), 3);
    assert_eq!(engine.dimension(t, &weight![1, 1]).unwrap(), 8);
    assert_eq!(
        tensor(&engine, "SU(3)", weight![1, 0], weight![1, 0]),
        vec![(weight![2, 0], 1), (weight![0, 1], 1)],
    );
    assert_eq!(
        tensor(&engine, "SU(3)", weight![1, 0], weight![0, 1]),
        vec![(weight![1, 1], 1), (weight![0, 0], 1)],
    );
}

#[test]
fn test_su5_scenarios() {
    let engine = engine();
    let t = engine.classify("SU(5)").unwrap();
    assert_eq!(engine.dimension(t, &weight![1, 0, 0, 0]).unwrap(), 5);
    assert_eq!(engine.dimension(t, &weight![1, 0, 0, 1]).unwrap(), 24);
    assert_eq!(
        tensor(&engine, "SU(5)", weight![1, 0, 0, 0], weight![0, 0, 0, 1]),
        vec![(weight![1, 0, 0, 1], 1), (weight![0, 0, 0, 0], 1)],
    );
}

#[test]
fn test_so10_scenarios() {
    let engine = engine();
    let t = engine.classify("SO(10)").unwrap();
    assert_eq!(t, CartanType::D(5));
    assert_eq!(engine.dimension(t, &weight![0, 0, 0, 1, 0]).unwrap(), 16);
}

#[test]
fn test_supported_examples() {
    let engine = engine();
    for example in CartanType::supported_examples() {
        let t = engine.classify(&example.physics_name).unwrap();
        assert_eq!(t, example.cartan_type);
        let info = engine.algebra_info(t).unwrap();
        assert_eq!(info.rank, example.rank);
        let adjoint = engine.irrep(t, &info.highest_root).unwrap();
        assert_eq!(adjoint.dimension as usize, info.dimension);
    }
}

#[test]
fn test_cartan_matrices() {
    for t in [
        CartanType::A(1),
        CartanType::A(7),
        CartanType::B(2),
        CartanType::B(5),
        CartanType::C(3),
        CartanType::C(6),
        CartanType::D(4),
        CartanType::D(7),
        CartanType::E6,
        CartanType::E7,
        CartanType::E8,
        CartanType::F4,
        CartanType::G2,
    ] {
        let rs = RootSystem::new(t).unwrap();
        for (i, row) in rs.cartan_matrix().iter().enumerate() {
            assert_eq!(row[i], 2, "{t}");
        }
        assert!(rs.inverse_cartan().determinant() != hyperlie_math::int(0), "{t}");

        let roots = rs.roots();
        assert_eq!(roots.len(), t.root_count(), "{t}");
        for root in &roots {
            assert!(roots.contains(&-root), "{t} {root}");
        }
    }
}

#[test]
fn test_extended_breaking_scenarios() {
    let engine = engine();
    let t = engine.classify("E6").unwrap();
    let breaking = engine.break_symmetry(t, 1, BreakingMethod::Extended).unwrap();
    assert_eq!(breaking.subalgebra_name(), "SU(6) × SU(2)");
    let t = engine.classify("SO(10)").unwrap();
    let breaking = engine.break_symmetry(t, 1, BreakingMethod::Extended).unwrap();
    assert_eq!(breaking.subalgebra_name(), "SU(2) × SU(4) × SU(2)");
    // 16 → (2, 4, 1) ⊕ (1, 4̄, 2)
    let rule = engine.branch(t, &weight![0, 0, 0, 1, 0], 1, BreakingMethod::Extended).unwrap();
    assert_eq!(rule.terms.len(), 2);
    assert!(rule.terms.iter().all(|term| term.dimension() == 8));
}

#[test]
fn test_concurrent_engine() {
    let engine = engine();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let d = engine
                    .tensor_product(CartanType::A(4), &weight![0, 1, 0, 0], &weight![0, 1, 0, 0])
                    .unwrap();
                assert_eq!(d.dimension(), 100);
            });
        }
    });
}

/// Returns a small algebra along with a highest weight whose irrep has a
/// manageable number of weights.
fn small_irrep() -> impl Strategy<Value = (CartanType, Weight)> {
    prop::sample::select(vec![
        CartanType::A(1),
        CartanType::A(2),
        CartanType::A(3),
        CartanType::B(2),
        CartanType::C(2),
        CartanType::B(3),
        CartanType::C(3),
        CartanType::D(4),
        CartanType::G2,
    ])
    .prop_flat_map(|t| {
        let max_label: i64 = if t.rank() <= 2 { 3 } else { 1 };
        let labels = prop::collection::vec(0..=max_label, t.rank());
        (Just(t), labels.prop_map(Weight::from))
    })
}

/// Returns a rank 1 or 2 algebra along with two highest weights.
fn small_tensor_product() -> impl Strategy<Value = (CartanType, Weight, Weight)> {
    prop::sample::select(vec![CartanType::A(1), CartanType::A(2), CartanType::B(2), CartanType::G2])
        .prop_flat_map(|t| {
            let labels = || prop::collection::vec(0..=2_i64, t.rank()).prop_map(Weight::from);
            (Just(t), labels(), labels())
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn proptest_multiplicities_sum_to_dimension((t, w) in small_irrep()) {
        let engine = engine();
        let ws = engine.weight_system(t, &w).unwrap();
        let total: u64 = ws.iter().map(|(_, m)| m).sum();
        prop_assert_eq!(total, engine.dimension(t, &w).unwrap());
        prop_assert_eq!(ws.multiplicity(&w), 1);
        // Multiplicity is Weyl invariant.
        let rs = engine.root_system(t).unwrap();
        for (mu, m) in ws.iter() {
            let (dom, _) = weyl::to_dominant(&rs, mu).unwrap();
            prop_assert_eq!(ws.multiplicity(&dom), m);
        }
    }

    #[test]
    fn proptest_tensor_dimension_is_conserved((t, lhs, rhs) in small_tensor_product()) {
        let engine = engine();
        let d = engine.tensor_product(t, &lhs, &rhs).unwrap();
        let total: u64 = d.terms.iter().map(|term| term.multiplicity * term.dimension).sum();
        prop_assert_eq!(total, d.lhs_dimension * d.rhs_dimension);
        prop_assert_eq!(d.multiplicity(&(&lhs + &rhs)), 1);

        let reversed = engine.tensor_product(t, &rhs, &lhs).unwrap();
        prop_assert_eq!(&d.terms, &reversed.terms);
    }

    #[test]
    fn proptest_trivial_tensor_factor((t, w) in small_irrep()) {
        let engine = engine();
        let zero = Weight::zero(t.rank());
        let d = engine.tensor_product(t, &w, &zero).unwrap();
        prop_assert_eq!(d.terms.len(), 1);
        prop_assert_eq!(&d.terms[0].highest_weight, &w);
        prop_assert_eq!(d.terms[0].multiplicity, 1);
    }

    #[test]
    fn proptest_conjugate_is_involution((t, w) in small_irrep()) {
        let rs = RootSystem::new(t).unwrap();
        let conj = irrep::conjugate(&rs, &w).unwrap();
        prop_assert_eq!(irrep::conjugate(&rs, &conj).unwrap(), w.clone());
        prop_assert_eq!(dimension::dimension(&rs, &conj).unwrap(), dimension::dimension(&rs, &w).unwrap());
    }

    #[test]
    fn proptest_branching_conserves_dimension((t, w) in small_irrep(), node in 0..4_usize) {
        prop_assume!(node < t.rank());
        let engine = engine();
        let rule = engine.branch(t, &w, node, BreakingMethod::Standard).unwrap();
        let total: u64 = rule.terms.iter().map(|term| term.multiplicity * term.dimension()).sum();
        prop_assert_eq!(total, rule.dimension);
    }

    #[test]
    fn proptest_extended_branching_conserves_dimension((t, w) in small_irrep(), node in 0..5_usize) {
        let engine = engine();
        // Nodes that leave the algebra unbroken are rejected.
        let Ok(rule) = engine.branch(t, &w, node, BreakingMethod::Extended) else {
            return Ok(());
        };
        prop_assert_eq!(rule.breaking.u1_count, 0);
        prop_assert_eq!(rule.charge_scale, 1);
        let total: u64 = rule.terms.iter().map(|term| term.multiplicity * term.dimension()).sum();
        prop_assert_eq!(total, rule.dimension);
    }

    #[test]
    fn proptest_tensor_power_matches_product((t, w) in small_irrep()) {
        let engine = engine();
        let square = engine.tensor_power(t, &w, 2).unwrap();
        let product = engine.tensor_product(t, &w, &w).unwrap();
        prop_assert_eq!(&square.terms, &product.terms);
    }
}
