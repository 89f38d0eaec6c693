//! Small integral sets shared by the unit tests.

use integrals::{canonical_quartets, IntegralStore, TwoElectronIntegrals};
use nalgebra::DMatrix;
use std::sync::Arc;

/// H2 in STO-3G at R = 1.4 bohr (Szabo & Ostlund, section 3.5.2).
pub fn h2_sto3g() -> Arc<IntegralStore> {
    let overlap = DMatrix::from_row_slice(2, 2, &[1.0, 0.6593, 0.6593, 1.0]);
    let kinetic = DMatrix::from_row_slice(2, 2, &[0.7600, 0.2365, 0.2365, 0.7600]);
    let nuclear = DMatrix::from_row_slice(2, 2, &[-1.8804, -1.1948, -1.1948, -1.8804]);

    let mut eri = TwoElectronIntegrals::zeros(2);
    eri.set(0, 0, 0, 0, 0.7746);
    eri.set(1, 1, 1, 1, 0.7746);
    eri.set(0, 0, 1, 1, 0.5697);
    eri.set(1, 0, 0, 0, 0.4441);
    eri.set(1, 1, 1, 0, 0.4441);
    eri.set(1, 0, 1, 0, 0.2970);

    Arc::new(IntegralStore::new(1.0 / 1.4, overlap, kinetic, nuclear, eri).unwrap())
}

/// S = 1, H = diag(1, 2), no electron repulsion.
pub fn two_level_without_repulsion(nuclear_repulsion: f64) -> Arc<IntegralStore> {
    let kinetic = DMatrix::from_diagonal(&nalgebra::DVector::from_vec(vec![1.0, 2.0]));
    Arc::new(
        IntegralStore::new(
            nuclear_repulsion,
            DMatrix::identity(2, 2),
            kinetic,
            DMatrix::zeros(2, 2),
            TwoElectronIntegrals::zeros(2),
        )
        .unwrap(),
    )
}

/// Four non-orthogonal orbitals with weak repulsion; converges in under
/// twenty plain iterations at 1e-10.
pub fn model_four_orbital() -> Arc<IntegralStore> {
    model_four_orbital_permuted(&[0, 1, 2, 3])
}

/// The same system with AO `p` of the new basis being AO `perm[p]` of the old one.
pub fn model_four_orbital_permuted(perm: &[usize; 4]) -> Arc<IntegralStore> {
    let n = 4;
    let overlap = DMatrix::from_fn(n, n, |i, j| {
        let (i, j) = (perm[i], perm[j]);
        if i == j {
            1.0
        } else {
            0.1 / (1.0 + i.abs_diff(j) as f64)
        }
    });
    let kinetic = DMatrix::from_fn(n, n, |i, j| {
        let (i, j) = (perm[i], perm[j]);
        if i == j {
            -2.0 + i as f64
        } else {
            -0.2 / (1.0 + i.abs_diff(j) as f64)
        }
    });

    let mut eri = TwoElectronIntegrals::zeros(n);
    for (i, j, k, l) in canonical_quartets(n) {
        eri.set(i, j, k, l, model_repulsion(perm[i], perm[j], perm[k], perm[l]));
    }

    Arc::new(IntegralStore::new(1.5, overlap, kinetic, DMatrix::zeros(n, n), eri).unwrap())
}

fn model_repulsion(i: usize, j: usize, k: usize, l: usize) -> f64 {
    if i == j && k == l {
        0.6 / (1.0 + i.abs_diff(k) as f64)
    } else {
        0.05 / (1.0 + (i + j + k + l) as f64)
    }
}
