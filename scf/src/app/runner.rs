use crate::app::report::LogReporter;
use crate::config::{Args, Config};
use color_eyre::eyre::{Result, WrapErr};
use scf::{IntegralStore, RestrictedSCF, ScfSolution};
use std::sync::Arc;
use tracing::info;

/// Run RHF to convergence; non-convergence is an error.
pub fn run_restricted(
    integrals: Arc<IntegralStore>,
    args: &Args,
    config: &Config,
) -> Result<ScfSolution> {
    let options = config.scf_options(args);
    info!(
        "SCF options: energy tolerance {:e}, density tolerance {:e}, max cycles {}",
        options.energy_tolerance, options.density_tolerance, options.max_cycle
    );

    info!("\nInitializing SCF calculation...");
    let mut scf = RestrictedSCF::new(integrals, config.num_occupied, options)
        .wrap_err("Failed to set up the SCF calculation")?;

    info!("\nStarting SCF cycle...\n");
    let outcome = scf.scf_cycle(&mut LogReporter);
    Ok(outcome.into_result()?)
}
