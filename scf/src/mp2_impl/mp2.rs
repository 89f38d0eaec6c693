//! Core MP2 implementation

extern crate nalgebra as na;

use super::transform::IntegralTransform;
use crate::error::ScfError;
use crate::scf_impl::ScfSolution;
use integrals::{IntegralStore, TwoElectronIntegrals};
use na::{DMatrix, DVector};
use rayon::prelude::*;
use tracing::info;

/// Denominators smaller than this are treated as degenerate.
pub const DEFAULT_DEGENERACY_THRESHOLD: f64 = 1e-10;

/// MP2 calculation structure
///
/// Holds the converged HF orbitals and the AO integrals they are expanded
/// over, and evaluates the second-order correlation energy.
pub struct MP2<'a> {
    /// Number of basis functions
    pub num_basis: usize,

    /// Number of occupied orbitals
    pub num_occ: usize,

    /// Number of virtual orbitals
    pub num_virt: usize,

    /// Threshold below which |ε_i + ε_j - ε_a - ε_b| is an error
    pub degeneracy_threshold: f64,

    mo_coeffs: DMatrix<f64>,
    mo_fock: DMatrix<f64>,
    orbital_energies: DVector<f64>,
    ao_eri: &'a TwoElectronIntegrals,
    hf_energy: f64,
    correlation_energy: Option<f64>,
}

/// Energies produced by [`MP2::calculate_mp2_energy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mp2Result {
    pub hf_energy: f64,
    pub correlation_energy: f64,
    pub total_energy: f64,
}

impl<'a> MP2<'a> {
    /// Set up MP2 from a converged SCF solution.
    ///
    /// The orbital energies are the diagonal of the MO-basis Fock matrix
    /// CᵀFC built from the final AO Fock matrix. The solution must come from
    /// an SCF run over `integrals`.
    pub fn from_scf(
        solution: &ScfSolution,
        integrals: &'a IntegralStore,
    ) -> Result<Self, ScfError> {
        let num_basis = integrals.num_basis();
        let num_occ = solution.num_occ;
        let (rows, cols) = solution.coeffs.shape();
        if rows != num_basis
            || cols != num_basis
            || solution.fock_matrix.shape() != (num_basis, num_basis)
        {
            return Err(ScfError::BasisMismatch {
                solution: rows.max(cols),
                integrals: num_basis,
            });
        }
        if num_occ > num_basis {
            return Err(ScfError::InvalidOccupation { num_occ, num_basis });
        }
        let num_virt = num_basis - num_occ;

        let mo_fock = solution.coeffs.transpose() * &solution.fock_matrix * &solution.coeffs;
        let orbital_energies = mo_fock.diagonal();

        info!("MP2 Initialization:");
        info!("  Number of basis functions: {}", num_basis);
        info!("  Number of occupied orbitals: {}", num_occ);
        info!("  Number of virtual orbitals: {}", num_virt);

        Ok(MP2 {
            num_basis,
            num_occ,
            num_virt,
            degeneracy_threshold: DEFAULT_DEGENERACY_THRESHOLD,
            mo_coeffs: solution.coeffs.clone(),
            mo_fock,
            orbital_energies,
            ao_eri: integrals.eri(),
            hf_energy: solution.total_energy,
            correlation_energy: None,
        })
    }

    pub fn with_degeneracy_threshold(mut self, threshold: f64) -> Self {
        self.degeneracy_threshold = threshold;
        self
    }

    /// Fock matrix in the MO basis, CᵀFC.
    pub fn mo_fock(&self) -> &DMatrix<f64> {
        &self.mo_fock
    }

    pub fn orbital_energies(&self) -> &DVector<f64> {
        &self.orbital_energies
    }

    /// Two-electron integrals over the HF molecular orbitals.
    pub fn transform_integrals(&self, transform: &dyn IntegralTransform) -> TwoElectronIntegrals {
        transform.transform(self.ao_eri, &self.mo_coeffs)
    }

    /// Transform the integrals with `transform` and sum the MP2 energy.
    pub fn calculate_mp2_energy(
        &mut self,
        transform: &dyn IntegralTransform,
    ) -> Result<Mp2Result, ScfError> {
        info!(
            "Starting MP2 correlation energy calculation ({} transformation)...",
            transform.name()
        );

        let correlation_energy = if self.num_occ == 0 || self.num_virt == 0 {
            info!("No occupied or virtual orbitals - MP2 correlation energy is zero.");
            0.0
        } else {
            let mo_eri = self.transform_integrals(transform);
            mp2_energy(
                &mo_eri,
                &self.orbital_energies,
                self.num_occ,
                self.degeneracy_threshold,
            )?
        };

        info!("MP2 correlation energy: {:.12} Eh", correlation_energy);
        self.correlation_energy = Some(correlation_energy);

        Ok(Mp2Result {
            hf_energy: self.hf_energy,
            correlation_energy,
            total_energy: self.hf_energy + correlation_energy,
        })
    }

    pub fn get_correlation_energy(&self) -> Option<f64> {
        self.correlation_energy
    }
}

/// E = Σ_{ij occ, ab virt} (ia|jb) [2 (ia|jb) - (ib|ja)] / (ε_i + ε_j - ε_a - ε_b)
pub(crate) fn mp2_energy(
    mo_eri: &TwoElectronIntegrals,
    orbital_energies: &DVector<f64>,
    num_occ: usize,
    degeneracy_threshold: f64,
) -> Result<f64, ScfError> {
    let n = mo_eri.num_basis();
    let e = orbital_energies;

    let per_occupied: Vec<f64> = (0..num_occ)
        .into_par_iter()
        .map(|i| {
            let mut energy = 0.0;
            for a in num_occ..n {
                for j in 0..num_occ {
                    for b in num_occ..n {
                        let denominator = e[i] + e[j] - e[a] - e[b];
                        if denominator.abs() < degeneracy_threshold {
                            return Err(ScfError::DegenerateOrbitals {
                                i,
                                j,
                                a,
                                b,
                                denominator,
                            });
                        }
                        let iajb = mo_eri.get(i, a, j, b);
                        let ibja = mo_eri.get(i, b, j, a);
                        energy += iajb * (2.0 * iajb - ibja) / denominator;
                    }
                }
            }
            Ok(energy)
        })
        .collect::<Result<Vec<f64>, ScfError>>()?;

    Ok(per_occupied.iter().sum())
}
