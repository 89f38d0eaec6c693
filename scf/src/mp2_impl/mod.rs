//! MP2 (Møller-Plesset perturbation theory, second order) implementation
//!
//! This module provides MP2 correlation energy calculations based on
//! converged Hartree-Fock results.
//!
//! # Theory
//!
//! The MP2 correlation energy is given by:
//!
//! E_MP2 = Σ_{ij,ab} [(ia|jb) * (2*(ia|jb) - (ib|ja))] / (ε_i + ε_j - ε_a - ε_b)
//!
//! where:
//! - i, j are occupied molecular orbitals
//! - a, b are virtual (unoccupied) molecular orbitals
//! - (ia|jb) are two-electron integrals in MO basis
//! - ε are orbital energies, the diagonal of CᵀFC
//!
//! The AO→MO transformation of the two-electron integrals is pluggable
//! through [`IntegralTransform`]: [`DirectTransform`] is the straightforward
//! O(N^8) sum and [`QuarterTransform`] the factorized O(N^5) variant. Both
//! produce the same tensor up to rounding.
//!
//! # Usage
//!
//! ```ignore
//! let solution = scf.run().into_result()?;
//! let mut mp2 = MP2::from_scf(&solution, scf.integrals())?;
//! let result = mp2.calculate_mp2_energy(&QuarterTransform)?;
//! println!("{}", result.total_energy);
//! ```

mod mp2;
mod transform;
#[cfg(test)]
mod tests;

pub use mp2::{Mp2Result, MP2};
pub use transform::{DirectTransform, IntegralTransform, QuarterTransform, TransformAlgorithm};
