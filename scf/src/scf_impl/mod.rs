//! Restricted closed-shell Hartree-Fock.
//!
//! The SCF engine starts from the core-Hamiltonian guess and runs a plain
//! fixed-point iteration: build the Fock matrix from the current density,
//! diagonalize it in the Löwdin-orthogonalized basis, rebuild the density from
//! the lowest `num_occ` orbitals and recompute the energy. It stops once both
//! the energy change and the RMS density change fall below their tolerances,
//! or reports non-convergence after `max_cycle` steps.

extern crate nalgebra as na;

mod orthogonalizer;
mod restricted;

pub use orthogonalizer::orthogonalizer;
pub use restricted::RestrictedSCF;

use crate::error::ScfError;
use na::{DMatrix, DVector};
use std::cmp::Ordering;

/// Convergence settings and the iteration cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScfOptions {
    /// Threshold on |E_total(n) - E_total(n-1)|.
    pub energy_tolerance: f64,
    /// Threshold on the root of the summed squared density-matrix change.
    pub density_tolerance: f64,
    pub max_cycle: usize,
}

impl Default for ScfOptions {
    fn default() -> Self {
        ScfOptions {
            energy_tolerance: 1e-12,
            density_tolerance: 1e-12,
            max_cycle: 100,
        }
    }
}

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScfState {
    Initialized,
    Iterating,
    Converged,
    NotConverged,
}

/// The state an iteration is compared against, taken before the step runs.
#[derive(Debug, Clone)]
pub struct ScfSnapshot {
    pub total_energy: f64,
    pub density: DMatrix<f64>,
}

/// Result of comparing a fresh iterate with the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    pub delta_energy: f64,
    pub rms_density: f64,
    pub converged: bool,
}

impl Convergence {
    /// Compare the current energy and density with `previous`.
    pub fn check(
        previous: &ScfSnapshot,
        total_energy: f64,
        density: &DMatrix<f64>,
        options: &ScfOptions,
    ) -> Self {
        let delta_energy = total_energy - previous.total_energy;
        let rms_density = (density - &previous.density).norm();
        Convergence {
            delta_energy,
            rms_density,
            converged: delta_energy.abs() < options.energy_tolerance
                && rms_density < options.density_tolerance,
        }
    }

    /// Placeholder used when no iteration has run.
    pub fn not_started() -> Self {
        Convergence {
            delta_energy: f64::INFINITY,
            rms_density: f64::INFINITY,
            converged: false,
        }
    }
}

/// Final (or last) state of an SCF run.
#[derive(Debug, Clone)]
pub struct ScfSolution {
    pub num_occ: usize,
    /// MO coefficients in the original AO basis, one orbital per column,
    /// ordered by ascending orbital energy.
    pub coeffs: DMatrix<f64>,
    /// AO Fock matrix the coefficients diagonalize.
    pub fock_matrix: DMatrix<f64>,
    pub density_matrix: DMatrix<f64>,
    pub orbital_energies: DVector<f64>,
    pub electronic_energy: f64,
    pub nuclear_repulsion: f64,
    pub total_energy: f64,
    pub iterations: usize,
    pub convergence: Convergence,
}

/// Outcome of [`RestrictedSCF::scf_cycle`].
#[derive(Debug, Clone)]
pub enum ScfOutcome {
    Converged(ScfSolution),
    NotConverged { last: ScfSolution, iterations: usize },
}

impl ScfOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, ScfOutcome::Converged(_))
    }

    pub fn solution(&self) -> &ScfSolution {
        match self {
            ScfOutcome::Converged(solution) => solution,
            ScfOutcome::NotConverged { last, .. } => last,
        }
    }

    /// Turn non-convergence into [`ScfError::NotConverged`].
    pub fn into_result(self) -> Result<ScfSolution, ScfError> {
        match self {
            ScfOutcome::Converged(solution) => Ok(solution),
            ScfOutcome::NotConverged { last, iterations } => Err(ScfError::NotConverged {
                max_cycle: iterations,
                delta_energy: last.convergence.delta_energy,
                rms_density: last.convergence.rms_density,
            }),
        }
    }
}

/// Read-only hooks into the SCF loop, used for reporting.
pub trait ScfObserver {
    fn initial_guess(&mut self, _scf: &RestrictedSCF) {}
    fn iteration(&mut self, _cycle: usize, _scf: &RestrictedSCF, _convergence: &Convergence) {}
    fn finished(&mut self, _outcome: &ScfOutcome) {}
}

impl ScfObserver for () {}

/// Solve F C = S C e through the orthogonalizer `x`.
///
/// Eigenpairs come back sorted by ascending eigenvalue, with each
/// coefficient column back-transformed to the AO basis and phase-fixed by
/// [`align_eigenvectors`].
pub(crate) fn diagonalize(
    fock: &DMatrix<f64>,
    x: &DMatrix<f64>,
) -> (DVector<f64>, DMatrix<f64>) {
    let f_prime = x.transpose() * fock * x;
    let f_prime = (&f_prime + f_prime.transpose()) * 0.5;
    let eig = f_prime.symmetric_eigen();

    let mut indices: Vec<usize> = (0..eig.eigenvalues.len()).collect();
    indices.sort_by(|&a, &b| {
        eig.eigenvalues[a]
            .partial_cmp(&eig.eigenvalues[b])
            .unwrap_or(Ordering::Equal)
    });
    let sorted_eigenvalues =
        DVector::from_fn(eig.eigenvalues.len(), |i, _| eig.eigenvalues[indices[i]]);
    let sorted_eigenvectors = eig.eigenvectors.select_columns(&indices);

    (sorted_eigenvalues, align_eigenvectors(x * sorted_eigenvectors))
}

/// Flip each column so that its largest-magnitude entry is positive.
pub fn align_eigenvectors(mut eigvecs: DMatrix<f64>) -> DMatrix<f64> {
    for j in 0..eigvecs.ncols() {
        let max_val = eigvecs
            .column(j)
            .iter()
            .copied()
            .max_by(|a, b| a.abs().partial_cmp(&b.abs()).unwrap_or(Ordering::Less));
        if matches!(max_val, Some(v) if v < 0.0) {
            eigvecs.column_mut(j).neg_mut();
        }
    }
    eigvecs
}

/// D(i,j) = Σ_{m < num_occ} C(i,m) C(j,m)
pub fn density_from_coeffs(coeffs: &DMatrix<f64>, num_occ: usize) -> DMatrix<f64> {
    let occupied = coeffs.columns(0, num_occ);
    &occupied * occupied.transpose()
}
