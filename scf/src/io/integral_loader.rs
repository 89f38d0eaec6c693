//! Integral set loading

use crate::config::Config;
use color_eyre::eyre::{Result, WrapErr};
use scf::IntegralStore;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Load the integral files named in `config`, resolving relative paths
/// against `base` (the directory holding the configuration file).
pub fn load_integrals(config: &Config, base: &Path) -> Result<Arc<IntegralStore>> {
    let files = config.integrals.files(base);
    info!("Reading overlap integrals from: {}", files.overlap.display());

    let store = files
        .load(config.num_orbitals)
        .wrap_err_with(|| format!("Unable to load integrals from {}", base.display()))?;

    Ok(Arc::new(store))
}
