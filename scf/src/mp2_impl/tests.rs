//! Tests for MP2 implementation

use super::*;
use crate::error::ScfError;
use crate::scf_impl::{RestrictedSCF, ScfOptions, ScfSolution};
use crate::test_systems::{h2_sto3g, model_four_orbital, two_level_without_repulsion};
use integrals::{IntegralStore, TwoElectronIntegrals};
use nalgebra::{DMatrix, DVector};
use std::sync::Arc;

fn converged(store: &Arc<IntegralStore>, num_occ: usize) -> ScfSolution {
    let options = ScfOptions {
        energy_tolerance: 1e-10,
        density_tolerance: 1e-10,
        max_cycle: 100,
    };
    RestrictedSCF::new(store.clone(), num_occ, options)
        .unwrap()
        .run()
        .into_result()
        .unwrap()
}

#[test]
fn test_mp2_zero_without_electron_repulsion() {
    let store = two_level_without_repulsion(0.5);
    let solution = converged(&store, 1);

    for transform in [&DirectTransform as &dyn IntegralTransform, &QuarterTransform] {
        let mut mp2 = MP2::from_scf(&solution, &store).unwrap();
        let result = mp2.calculate_mp2_energy(transform).unwrap();
        assert_eq!(result.correlation_energy, 0.0);
        assert_eq!(result.total_energy, solution.total_energy);
        assert_eq!(mp2.get_correlation_energy(), Some(0.0));
    }
}

#[test]
fn test_h2_sto3g_mp2_energy() {
    let store = h2_sto3g();
    let solution = converged(&store, 1);

    for algorithm in [TransformAlgorithm::Direct, TransformAlgorithm::Quarter] {
        let mut mp2 = MP2::from_scf(&solution, &store).unwrap();
        let result = mp2.calculate_mp2_energy(algorithm.strategy().as_ref()).unwrap();
        // Szabo & Ostlund table 6.2: E(2) = -0.0132 for H2/STO-3G
        assert!(
            (result.correlation_energy + 0.013154099130).abs() < 1e-8,
            "{algorithm}: {}",
            result.correlation_energy
        );
        assert!((result.total_energy + 1.129786506692).abs() < 1e-8);
    }
}

#[test]
fn test_h2_mo_integrals() {
    let store = h2_sto3g();
    let solution = converged(&store, 1);
    let mo = MP2::from_scf(&solution, &store).unwrap().transform_integrals(&QuarterTransform);

    // (11|11), (22|11), (21|21), (22|22) over the bonding/antibonding pair
    assert!((mo.get(0, 0, 0, 0) - 0.674596251683).abs() < 1e-8);
    assert!((mo.get(1, 1, 0, 0) - 0.663602332760).abs() < 1e-8);
    assert!((mo.get(1, 0, 1, 0) - 0.181223667843).abs() < 1e-8);
    assert!((mo.get(1, 1, 1, 1) - 0.697384974339).abs() < 1e-8);
    // parity forbids (11|12)
    assert!(mo.get(0, 0, 0, 1).abs() < 1e-10);
}

#[test]
fn test_identity_coefficients_leave_integrals_unchanged() {
    let mut ao = TwoElectronIntegrals::zeros(2);
    ao.set(0, 0, 0, 0, 0.9);
    ao.set(1, 0, 0, 0, 0.3);
    ao.set(1, 0, 1, 0, 0.2);
    ao.set(1, 1, 0, 0, 0.5);
    ao.set(1, 1, 1, 0, 0.1);
    ao.set(1, 1, 1, 1, 0.7);
    let identity = DMatrix::identity(2, 2);

    for transform in [&DirectTransform as &dyn IntegralTransform, &QuarterTransform] {
        let mo = transform.transform(&ao, &identity);
        assert!(mo.max_abs_diff(&ao) < 1e-15, "{}", transform.name());
    }
}

#[test]
fn test_direct_and_quarter_transforms_agree() {
    let store = model_four_orbital();
    let ao = store.eri();
    for _ in 0..3 {
        let coeffs = DMatrix::<f64>::new_random(4, 4) - DMatrix::from_element(4, 4, 0.5);
        let direct = DirectTransform.transform(ao, &coeffs);
        let quarter = QuarterTransform.transform(ao, &coeffs);
        assert_eq!(direct.len(), quarter.len());
        assert!(direct.max_abs_diff(&quarter) < 1e-12);
    }
}

#[test]
fn test_transform_follows_definition() {
    let store = model_four_orbital();
    let ao = store.eri();
    let coeffs = DMatrix::<f64>::new_random(4, 4);
    let mo = QuarterTransform.transform(ao, &coeffs);

    let (i, j, k, l) = (3, 1, 2, 0);
    let mut expected = 0.0;
    for p in 0..4 {
        for q in 0..4 {
            for r in 0..4 {
                for s in 0..4 {
                    expected += coeffs[(p, i)]
                        * coeffs[(q, j)]
                        * coeffs[(r, k)]
                        * coeffs[(s, l)]
                        * ao.get(p, q, r, s);
                }
            }
        }
    }
    assert!((mo.get(i, j, k, l) - expected).abs() < 1e-12);
    assert!((mo.get(k, l, j, i) - expected).abs() < 1e-12);
}

#[test]
fn test_model_system_mp2_is_negative_and_strategy_independent() {
    let store = model_four_orbital();
    let solution = converged(&store, 2);
    let mut mp2 = MP2::from_scf(&solution, &store).unwrap();

    let direct = mp2.calculate_mp2_energy(&DirectTransform).unwrap();
    let quarter = mp2.calculate_mp2_energy(&QuarterTransform).unwrap();
    assert!(direct.correlation_energy < 0.0);
    assert!((direct.correlation_energy - quarter.correlation_energy).abs() < 1e-12);
    assert!((direct.correlation_energy + 5.788986312840e-4).abs() < 1e-8);
}

#[test]
fn test_orbital_energies_come_from_mo_fock_diagonal() {
    let store = model_four_orbital();
    let solution = converged(&store, 2);
    let mp2 = MP2::from_scf(&solution, &store).unwrap();

    assert_eq!(mp2.num_occ, 2);
    assert_eq!(mp2.num_virt, 2);
    for i in 0..4 {
        assert_eq!(mp2.orbital_energies()[i], mp2.mo_fock()[(i, i)]);
        assert!((mp2.orbital_energies()[i] - solution.orbital_energies[i]).abs() < 1e-10);
    }
}

#[test]
fn test_degenerate_denominator_is_reported() {
    // H = 1 on both orbitals: ε_0 + ε_0 - ε_1 - ε_1 = 0
    let kinetic = DMatrix::from_diagonal(&DVector::from_vec(vec![1.0, 1.0]));
    let store = Arc::new(
        IntegralStore::new(
            0.0,
            DMatrix::identity(2, 2),
            kinetic,
            DMatrix::zeros(2, 2),
            TwoElectronIntegrals::zeros(2),
        )
        .unwrap(),
    );
    let solution = converged(&store, 1);
    let mut mp2 = MP2::from_scf(&solution, &store).unwrap();

    match mp2.calculate_mp2_energy(&QuarterTransform) {
        Err(ScfError::DegenerateOrbitals { i, j, a, b, denominator }) => {
            assert_eq!((i, j, a, b), (0, 0, 1, 1));
            assert!(denominator.abs() < 1e-10);
        }
        other => panic!("expected degenerate orbital error, got {:?}", other),
    }
    assert_eq!(mp2.get_correlation_energy(), None);
}

#[test]
fn test_solution_from_another_basis_is_rejected() {
    let solution = converged(&model_four_orbital(), 2);
    let store = h2_sto3g();
    assert!(matches!(
        MP2::from_scf(&solution, &store),
        Err(ScfError::BasisMismatch { solution: 4, integrals: 2 })
    ));
}

#[test]
fn test_no_virtual_orbitals_gives_zero() {
    let store = h2_sto3g();
    let solution = converged(&store, 2);
    let mut mp2 = MP2::from_scf(&solution, &store).unwrap();
    assert_eq!(mp2.num_virt, 0);
    let result = mp2.calculate_mp2_energy(&DirectTransform).unwrap();
    assert_eq!(result.correlation_energy, 0.0);
}

#[test]
fn test_transform_algorithm_parsing() {
    assert_eq!("direct".parse::<TransformAlgorithm>().unwrap(), TransformAlgorithm::Direct);
    assert_eq!(" Quarter ".parse::<TransformAlgorithm>().unwrap(), TransformAlgorithm::Quarter);
    assert!(matches!(
        "optimized".parse::<TransformAlgorithm>(),
        Err(ScfError::UnknownTransform(name)) if name == "optimized"
    ));
    assert_eq!(TransformAlgorithm::default(), TransformAlgorithm::Quarter);
    assert_eq!(TransformAlgorithm::Direct.to_string(), "direct");
    assert_eq!(TransformAlgorithm::Quarter.strategy().name(), "quarter");
}
