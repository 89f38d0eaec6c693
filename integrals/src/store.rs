//! In-memory integral set.

extern crate nalgebra as na;

use crate::error::IntegralError;
use crate::index::{compound_index, compressed_len};
use na::DMatrix;

/// Absolute tolerance for the symmetry check on one-electron matrices.
const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Two-electron repulsion integrals (ij|kl) in chemists' notation, one value
/// per symmetry-unique quartet.
#[derive(Clone, Debug, PartialEq)]
pub struct TwoElectronIntegrals {
    num_basis: usize,
    values: Vec<f64>,
}

impl TwoElectronIntegrals {
    /// All-zero tensor over `num_basis` orbitals.
    pub fn zeros(num_basis: usize) -> Self {
        TwoElectronIntegrals {
            num_basis,
            values: vec![0.0; compressed_len(num_basis)],
        }
    }

    /// Wrap an already compressed array, checking its length.
    pub fn from_compressed(num_basis: usize, values: Vec<f64>) -> Result<Self, IntegralError> {
        let expected = compressed_len(num_basis);
        if values.len() != expected {
            return Err(IntegralError::TensorLength {
                actual: values.len(),
                expected,
                num_basis,
            });
        }
        Ok(TwoElectronIntegrals { num_basis, values })
    }

    pub fn num_basis(&self) -> usize {
        self.num_basis
    }

    /// (ij|kl)
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize, l: usize) -> f64 {
        self.values[compound_index(i, j, k, l)]
    }

    /// Set (ij|kl) and, implicitly, its seven symmetry partners.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, l: usize, value: f64) {
        self.values[compound_index(i, j, k, l)] = value;
    }

    #[inline]
    pub fn get_compound(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest absolute elementwise difference to another tensor of the same size.
    pub fn max_abs_diff(&self, other: &TwoElectronIntegrals) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

/// The complete, validated set of integrals for one molecule.
///
/// All members are fixed after construction. The core Hamiltonian
/// `H = T + V` is assembled once here.
#[derive(Clone, Debug)]
pub struct IntegralStore {
    num_basis: usize,
    nuclear_repulsion: f64,
    overlap: DMatrix<f64>,
    kinetic: DMatrix<f64>,
    nuclear_attraction: DMatrix<f64>,
    h_core: DMatrix<f64>,
    eri: TwoElectronIntegrals,
}

impl IntegralStore {
    pub fn new(
        nuclear_repulsion: f64,
        overlap: DMatrix<f64>,
        kinetic: DMatrix<f64>,
        nuclear_attraction: DMatrix<f64>,
        eri: TwoElectronIntegrals,
    ) -> Result<Self, IntegralError> {
        let num_basis = overlap.nrows();
        check_finite("nuclear repulsion", std::iter::once(&nuclear_repulsion))?;
        check_symmetric_matrix("overlap", &overlap, num_basis)?;
        check_symmetric_matrix("kinetic", &kinetic, num_basis)?;
        check_symmetric_matrix("nuclear attraction", &nuclear_attraction, num_basis)?;
        if eri.num_basis() != num_basis || eri.len() != compressed_len(num_basis) {
            return Err(IntegralError::TensorLength {
                actual: eri.len(),
                expected: compressed_len(num_basis),
                num_basis,
            });
        }
        check_finite("two-electron integrals", eri.as_slice().iter())?;

        let h_core = &kinetic + &nuclear_attraction;

        Ok(IntegralStore {
            num_basis,
            nuclear_repulsion,
            overlap,
            kinetic,
            nuclear_attraction,
            h_core,
            eri,
        })
    }

    pub fn num_basis(&self) -> usize {
        self.num_basis
    }

    pub fn nuclear_repulsion(&self) -> f64 {
        self.nuclear_repulsion
    }

    pub fn overlap(&self) -> &DMatrix<f64> {
        &self.overlap
    }

    pub fn kinetic(&self) -> &DMatrix<f64> {
        &self.kinetic
    }

    pub fn nuclear_attraction(&self) -> &DMatrix<f64> {
        &self.nuclear_attraction
    }

    /// Core Hamiltonian T + V.
    pub fn h_core(&self) -> &DMatrix<f64> {
        &self.h_core
    }

    pub fn eri(&self) -> &TwoElectronIntegrals {
        &self.eri
    }
}

fn check_finite<'a>(
    name: &'static str,
    values: impl Iterator<Item = &'a f64>,
) -> Result<(), IntegralError> {
    match values.enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(IntegralError::NonFinite { name, index, value }),
        None => Ok(()),
    }
}

fn check_symmetric_matrix(
    name: &'static str,
    matrix: &DMatrix<f64>,
    expected: usize,
) -> Result<(), IntegralError> {
    if matrix.nrows() != expected || matrix.ncols() != expected {
        return Err(IntegralError::DimensionMismatch {
            name,
            rows: matrix.nrows(),
            cols: matrix.ncols(),
            expected,
        });
    }
    check_finite(name, matrix.iter())?;
    for i in 0..expected {
        for j in 0..i {
            let deviation = (matrix[(i, j)] - matrix[(j, i)]).abs();
            if deviation > SYMMETRY_TOLERANCE {
                return Err(IntegralError::NotSymmetric {
                    name,
                    i,
                    j,
                    deviation,
                });
            }
        }
    }
    Ok(())
}
