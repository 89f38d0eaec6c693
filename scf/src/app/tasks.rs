use crate::app::report::{report_mp2_summary, report_reference_deviation};
use crate::config::{Args, Config};
use color_eyre::eyre::{Result, WrapErr};
use scf::{IntegralStore, ScfSolution, MP2};
use tracing::info;

pub fn run_restricted_followups(
    solution: &ScfSolution,
    integrals: &IntegralStore,
    args: &Args,
    config: &Config,
) -> Result<()> {
    if config.is_mp2_enabled(args) {
        run_mp2(solution, integrals, args, config)?;
    } else {
        report_reference_deviation(config.reference_energy, solution.total_energy);
    }
    Ok(())
}

fn run_mp2(
    solution: &ScfSolution,
    integrals: &IntegralStore,
    args: &Args,
    config: &Config,
) -> Result<()> {
    info!("\n===========================================");
    info!("       Starting MP2 Calculation");
    info!("===========================================");

    let algorithm = config.mp2_algorithm(args)?;
    info!("Using {} integral transformation", algorithm);

    let mut mp2 = MP2::from_scf(solution, integrals)
        .wrap_err("SCF solution does not match the integral set")?
        .with_degeneracy_threshold(config.mp2_degeneracy_threshold());
    let result = mp2
        .calculate_mp2_energy(algorithm.strategy().as_ref())
        .wrap_err("MP2 correction failed")?;

    report_mp2_summary(&result);
    report_reference_deviation(config.reference_energy, result.total_energy);
    Ok(())
}
