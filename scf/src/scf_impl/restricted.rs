//! The restricted Hartree-Fock iteration.

extern crate nalgebra as na;

use super::{
    density_from_coeffs, diagonalize, orthogonalizer, Convergence, ScfObserver, ScfOptions,
    ScfOutcome, ScfSnapshot, ScfSolution, ScfState,
};
use crate::error::ScfError;
use integrals::IntegralStore;
use na::{DMatrix, DVector};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// Closed-shell SCF over a fixed integral set.
///
/// The Fock matrix, density, coefficients and energies are replaced once per
/// cycle; the integrals, core Hamiltonian and orthogonalizer never change
/// after [`RestrictedSCF::new`].
#[derive(Clone)]
pub struct RestrictedSCF {
    integrals: Arc<IntegralStore>,
    num_basis: usize,
    num_occ: usize,
    options: ScfOptions,
    orthogonalizer: DMatrix<f64>,
    fock_matrix: DMatrix<f64>,
    density_matrix: DMatrix<f64>,
    coeffs: DMatrix<f64>,
    e_level: DVector<f64>,
    electronic_energy: f64,
    total_energy: f64,
    cycle: usize,
    state: ScfState,
}

impl RestrictedSCF {
    /// Orthogonalize the basis and set up the core-Hamiltonian guess.
    pub fn new(
        integrals: Arc<IntegralStore>,
        num_occ: usize,
        options: ScfOptions,
    ) -> Result<Self, ScfError> {
        let num_basis = integrals.num_basis();
        if num_occ > num_basis {
            return Err(ScfError::InvalidOccupation { num_occ, num_basis });
        }

        let orthogonalizer = orthogonalizer(integrals.overlap())?;

        // Core guess: F = H, diagonalized as XᵀHX.
        let fock_matrix = integrals.h_core().clone();
        let (e_level, coeffs) = diagonalize(&fock_matrix, &orthogonalizer);
        let density_matrix = density_from_coeffs(&coeffs, num_occ);
        let electronic_energy =
            electronic_energy(&density_matrix, integrals.h_core(), &fock_matrix);
        let total_energy = electronic_energy + integrals.nuclear_repulsion();

        info!(
            "RHF setup: {} basis functions, {} doubly occupied orbitals",
            num_basis, num_occ
        );
        info!("Initial (core guess) energy: {:.12} au", total_energy);

        Ok(RestrictedSCF {
            integrals,
            num_basis,
            num_occ,
            options,
            orthogonalizer,
            fock_matrix,
            density_matrix,
            coeffs,
            e_level,
            electronic_energy,
            total_energy,
            cycle: 0,
            state: ScfState::Initialized,
        })
    }

    pub fn num_basis(&self) -> usize {
        self.num_basis
    }

    pub fn num_occ(&self) -> usize {
        self.num_occ
    }

    pub fn options(&self) -> &ScfOptions {
        &self.options
    }

    pub fn integrals(&self) -> &IntegralStore {
        &self.integrals
    }

    pub fn state(&self) -> ScfState {
        self.state
    }

    /// Number of completed cycles.
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Symmetric orthogonalization matrix S^(-1/2).
    pub fn orthogonalizer(&self) -> &DMatrix<f64> {
        &self.orthogonalizer
    }

    /// Current AO Fock matrix.
    ///
    /// Before the first cycle this is the AO-basis guess, the core Hamiltonian
    /// itself; its orthogonal-basis form is
    /// [`orthogonal_fock_matrix`](Self::orthogonal_fock_matrix).
    pub fn fock_matrix(&self) -> &DMatrix<f64> {
        &self.fock_matrix
    }

    /// Current Fock matrix in the orthogonalized basis, XᵀFX.
    pub fn orthogonal_fock_matrix(&self) -> DMatrix<f64> {
        self.orthogonalizer.transpose() * &self.fock_matrix * &self.orthogonalizer
    }

    pub fn density_matrix(&self) -> &DMatrix<f64> {
        &self.density_matrix
    }

    pub fn coeffs(&self) -> &DMatrix<f64> {
        &self.coeffs
    }

    /// Eigenvalues of the current Fock matrix, ascending.
    pub fn e_level(&self) -> &DVector<f64> {
        &self.e_level
    }

    pub fn electronic_energy(&self) -> f64 {
        self.electronic_energy
    }

    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    pub fn snapshot(&self) -> ScfSnapshot {
        ScfSnapshot {
            total_energy: self.total_energy,
            density: self.density_matrix.clone(),
        }
    }

    /// F(i,j) = H(i,j) + Σ_kl D(k,l) [2 (ij|kl) - (ik|jl)]
    pub fn build_fock_matrix(&self, density: &DMatrix<f64>) -> DMatrix<f64> {
        let n = self.num_basis;
        let h_core = self.integrals.h_core();
        let eri = self.integrals.eri();

        // F is symmetric, so only the lower triangle is built.
        let ij_pairs: Vec<(usize, usize)> =
            (0..n).flat_map(|i| (0..=i).map(move |j| (i, j))).collect();

        let values: Vec<f64> = ij_pairs
            .par_iter()
            .map(|&(i, j)| {
                let mut f_ij = h_core[(i, j)];
                for k in 0..n {
                    for l in 0..n {
                        let coulomb = eri.get(i, j, k, l);
                        let exchange = eri.get(i, k, j, l);
                        f_ij += density[(k, l)] * (2.0 * coulomb - exchange);
                    }
                }
                f_ij
            })
            .collect();

        let mut fock = DMatrix::zeros(n, n);
        for (&(i, j), &value) in ij_pairs.iter().zip(values.iter()) {
            fock[(i, j)] = value;
            fock[(j, i)] = value;
        }
        fock
    }

    /// One fixed-point step: Fock build, diagonalization, density, energy.
    pub fn iterate(&mut self) {
        self.state = ScfState::Iterating;
        self.fock_matrix = self.build_fock_matrix(&self.density_matrix);

        let (e_level, coeffs) = diagonalize(&self.fock_matrix, &self.orthogonalizer);
        self.e_level = e_level;
        self.coeffs = coeffs;
        self.density_matrix = density_from_coeffs(&self.coeffs, self.num_occ);

        self.electronic_energy = electronic_energy(
            &self.density_matrix,
            self.integrals.h_core(),
            &self.fock_matrix,
        );
        self.total_energy = self.electronic_energy + self.integrals.nuclear_repulsion();
        self.cycle += 1;
    }

    /// Iterate until both convergence criteria hold or `max_cycle` is reached.
    pub fn scf_cycle<O: ScfObserver + ?Sized>(&mut self, observer: &mut O) -> ScfOutcome {
        observer.initial_guess(self);

        let mut convergence = Convergence::not_started();
        for _ in 0..self.options.max_cycle {
            let previous = self.snapshot();
            self.iterate();
            convergence = Convergence::check(
                &previous,
                self.total_energy,
                &self.density_matrix,
                &self.options,
            );

            debug!(
                "Cycle {}: E = {:.12} au, dE = {:.3e} au, rms(D) = {:.3e}",
                self.cycle, self.total_energy, convergence.delta_energy, convergence.rms_density
            );
            observer.iteration(self.cycle, self, &convergence);

            if convergence.converged {
                info!("SCF converged in {} cycles.", self.cycle);
                self.state = ScfState::Converged;
                let outcome = ScfOutcome::Converged(self.solution(convergence));
                observer.finished(&outcome);
                return outcome;
            }
        }

        info!(
            "SCF did not converge within {} cycles (dE = {:.3e}, rms(D) = {:.3e})",
            self.options.max_cycle, convergence.delta_energy, convergence.rms_density
        );
        self.state = ScfState::NotConverged;
        let outcome = ScfOutcome::NotConverged {
            last: self.solution(convergence),
            iterations: self.cycle,
        };
        observer.finished(&outcome);
        outcome
    }

    /// [`scf_cycle`](Self::scf_cycle) without an observer.
    pub fn run(&mut self) -> ScfOutcome {
        self.scf_cycle(&mut ())
    }

    fn solution(&self, convergence: Convergence) -> ScfSolution {
        debug!("Orbital energies: {:?}", self.e_level.as_slice());
        ScfSolution {
            num_occ: self.num_occ,
            coeffs: self.coeffs.clone(),
            fock_matrix: self.fock_matrix.clone(),
            density_matrix: self.density_matrix.clone(),
            orbital_energies: self.e_level.clone(),
            electronic_energy: self.electronic_energy,
            nuclear_repulsion: self.integrals.nuclear_repulsion(),
            total_energy: self.total_energy,
            iterations: self.cycle,
            convergence,
        }
    }
}

/// E_elec = Σ_ij D(i,j) [H(i,j) + F(i,j)]
pub(crate) fn electronic_energy(
    density: &DMatrix<f64>,
    h_core: &DMatrix<f64>,
    fock: &DMatrix<f64>,
) -> f64 {
    density.component_mul(&(h_core + fock)).sum()
}
