//! Command-line argument parsing for SCF calculations

use clap::Parser;

/// Hartree-Fock SCF with MP2 correction from precomputed integrals
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override energy convergence threshold
    #[arg(long)]
    pub energy_tolerance: Option<f64>,

    /// Override density (RMS) convergence threshold
    #[arg(long)]
    pub density_tolerance: Option<f64>,

    /// Override maximum SCF cycles
    #[arg(long)]
    pub max_cycle: Option<usize>,

    /// MP2 integral transformation (direct or quarter)
    #[arg(long)]
    pub mp2_algorithm: Option<String>,

    /// Skip the MP2 correction
    #[arg(long)]
    pub no_mp2: bool,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,
}
