//! SCF Calculation Command-Line Interface
//!
//! Runs restricted Hartree-Fock and an MP2 correction on a precomputed
//! integral set described by a YAML configuration.

use color_eyre::eyre::Result;

mod app;
mod config;
mod io;

use app::ScfApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    ScfApplication::from_cli()?.run()
}
