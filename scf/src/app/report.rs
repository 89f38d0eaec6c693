use scf::{Convergence, IntegralStore, Mp2Result, RestrictedSCF, ScfObserver, ScfOutcome, ScfSolution};
use tracing::{info, warn};

const RULE: &str = "--------------------------------------------------------------------------------";

/// Logs the SCF state at every phase through `tracing`.
pub struct LogReporter;

impl ScfObserver for LogReporter {
    fn initial_guess(&mut self, scf: &RestrictedSCF) {
        info!("{RULE}");
        info!("Symmetric Orthogonalization Matrix:{}", scf.orthogonalizer());
        info!("Initial Fock Matrix (orthogonalized basis):{}", scf.orthogonal_fock_matrix());
        info!("Initial MO Coefficient Matrix:{}", scf.coeffs());
        info!("Initial Density Matrix:{}", scf.density_matrix());
        info!("Initial Energy: {:.12} au", scf.total_energy());
        info!("{RULE}");
        info!("Iter\t\tEnergy\t\t\tdE\t\trms(D)");
    }

    fn iteration(&mut self, cycle: usize, scf: &RestrictedSCF, convergence: &Convergence) {
        info!(
            "{}\t\t{:.12}\t{:.3e}\t{:.3e}",
            cycle,
            scf.total_energy(),
            convergence.delta_energy,
            convergence.rms_density
        );
    }

    fn finished(&mut self, outcome: &ScfOutcome) {
        info!("{RULE}");
        match outcome {
            ScfOutcome::Converged(solution) => {
                info!("SCF converged after {} iterations", solution.iterations)
            }
            ScfOutcome::NotConverged { iterations, .. } => {
                warn!("SCF stopped after {} iterations without converging", iterations)
            }
        }
    }
}

pub fn report_integrals(integrals: &IntegralStore) {
    info!("{RULE}");
    info!("------------------------ Hartree Fock w/ MP2 Correction ------------------------");
    info!("{RULE}");
    info!("Nuclear repulsion energy = {:.12}", integrals.nuclear_repulsion());
    info!("Overlap Integrals:{}", integrals.overlap());
    info!("Kinetic-Energy Integrals:{}", integrals.kinetic());
    info!("Nuclear Attraction Integrals:{}", integrals.nuclear_attraction());
    info!("Core Hamiltonian:{}", integrals.h_core());
}

pub fn report_restricted_summary(solution: &ScfSolution) {
    info!("\nSCF calculation finished.");

    info!("\nFinal Energy Levels:");
    for (i, energy) in solution.orbital_energies.iter().enumerate() {
        let occupation = if i < solution.num_occ { "occ" } else { "virt" };
        info!("  Level {}: {:.8} au ({})", i + 1, energy, occupation);
    }

    info!("\nElectronic Energy:         {:.10} au", solution.electronic_energy);
    info!("Hartree-Fock Total Energy: {:.10} au", solution.total_energy);
}

pub fn report_mp2_summary(result: &Mp2Result) {
    info!("\n===========================================");
    info!("        MP2 Results Summary");
    info!("===========================================");
    info!("Hartree-Fock energy:       {:.10} au", result.hf_energy);
    info!("MP2 correlation energy:    {:.10} au", result.correlation_energy);
    info!("Total MP2 energy:          {:.10} au", result.total_energy);
    info!("===========================================\n");
}

/// Percentage deviation of `energy` from the configured reference, if any.
pub fn report_reference_deviation(reference: Option<f64>, energy: f64) {
    if let Some(expected) = reference {
        let percent_off = 100.0 * (energy - expected) / expected;
        info!("{RULE}");
        info!("{:.6e} percent off from the reference energy {:.12}", percent_off, expected);
        info!("{RULE}");
    }
}
