//! Configuration management for SCF calculations
//!
//! This module handles configuration structures, defaults, and validation
//! for Hartree-Fock and MP2 runs.

mod args;

pub use args::Args;

use color_eyre::eyre::Result;
use scf::{IntegralFiles, ScfOptions, TransformAlgorithm};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for SCF calculations
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub integrals: IntegralSource,
    /// Basis size; inferred from the overlap file when absent.
    pub num_orbitals: Option<usize>,
    pub num_occupied: usize,
    #[serde(default)]
    pub scf_params: ScfParams,
    pub mp2: Option<Mp2Params>,
    /// Known total energy to compare the MP2-corrected result with.
    pub reference_energy: Option<f64>,
}

/// Where the precomputed integrals live. Relative paths are resolved
/// against the directory of the configuration file.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IntegralSource {
    pub directory: Option<String>,
    pub nuclear_repulsion: Option<String>,
    pub overlap: Option<String>,
    pub kinetic: Option<String>,
    pub nuclear_attraction: Option<String>,
    pub two_electron: Option<String>,
}

impl IntegralSource {
    pub fn files(&self, base: &Path) -> IntegralFiles {
        let directory = match &self.directory {
            Some(dir) => base.join(dir),
            None => base.to_path_buf(),
        };
        let defaults = IntegralFiles::in_directory(&directory);
        let pick = |name: &Option<String>, default: PathBuf| -> PathBuf {
            name.as_ref().map(|n| directory.join(n)).unwrap_or(default)
        };

        IntegralFiles {
            nuclear_repulsion: pick(&self.nuclear_repulsion, defaults.nuclear_repulsion),
            overlap: pick(&self.overlap, defaults.overlap),
            kinetic: pick(&self.kinetic, defaults.kinetic),
            nuclear_attraction: pick(&self.nuclear_attraction, defaults.nuclear_attraction),
            two_electron: pick(&self.two_electron, defaults.two_electron),
        }
    }
}

/// SCF-specific parameters
#[derive(Debug, Deserialize, Serialize)]
pub struct ScfParams {
    pub energy_tolerance: Option<f64>,
    pub density_tolerance: Option<f64>,
    pub max_cycle: Option<usize>,
}

impl Default for ScfParams {
    fn default() -> Self {
        let options = ScfOptions::default();
        ScfParams {
            energy_tolerance: Some(options.energy_tolerance),
            density_tolerance: Some(options.density_tolerance),
            max_cycle: Some(options.max_cycle),
        }
    }
}

impl ScfParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.energy_tolerance.is_none() {
            self.energy_tolerance = defaults.energy_tolerance;
        }
        if self.density_tolerance.is_none() {
            self.density_tolerance = defaults.density_tolerance;
        }
        if self.max_cycle.is_none() {
            self.max_cycle = defaults.max_cycle;
        }
        self
    }
}

/// MP2 calculation parameters
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Mp2Params {
    pub enabled: Option<bool>,
    pub algorithm: Option<String>, // "direct" or "quarter"
    pub degeneracy_threshold: Option<f64>,
}

impl Default for Mp2Params {
    fn default() -> Self {
        Mp2Params {
            enabled: Some(true),
            algorithm: Some(TransformAlgorithm::default().to_string()),
            degeneracy_threshold: Some(1e-10),
        }
    }
}

impl Mp2Params {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.enabled.is_none() {
            self.enabled = defaults.enabled;
        }
        if self.algorithm.is_none() {
            self.algorithm = defaults.algorithm;
        }
        if self.degeneracy_threshold.is_none() {
            self.degeneracy_threshold = defaults.degeneracy_threshold;
        }
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.scf_params = self.scf_params.with_defaults();
        self.mp2 = Some(self.mp2.take().unwrap_or_default().with_defaults());
        self
    }

    /// SCF options with command-line overrides applied.
    pub fn scf_options(&self, args: &Args) -> ScfOptions {
        let defaults = ScfOptions::default();
        ScfOptions {
            energy_tolerance: args
                .energy_tolerance
                .or(self.scf_params.energy_tolerance)
                .unwrap_or(defaults.energy_tolerance),
            density_tolerance: args
                .density_tolerance
                .or(self.scf_params.density_tolerance)
                .unwrap_or(defaults.density_tolerance),
            max_cycle: args
                .max_cycle
                .or(self.scf_params.max_cycle)
                .unwrap_or(defaults.max_cycle),
        }
    }

    /// Check if MP2 calculation is enabled
    pub fn is_mp2_enabled(&self, args: &Args) -> bool {
        !args.no_mp2 && self.mp2.as_ref().and_then(|m| m.enabled).unwrap_or(true)
    }

    /// Get the MP2 integral transformation
    pub fn mp2_algorithm(&self, args: &Args) -> Result<TransformAlgorithm> {
        let name = args
            .mp2_algorithm
            .clone()
            .or_else(|| self.mp2.as_ref().and_then(|m| m.algorithm.clone()));
        match name {
            Some(name) => Ok(name.parse::<TransformAlgorithm>()?),
            None => Ok(TransformAlgorithm::default()),
        }
    }

    pub fn mp2_degeneracy_threshold(&self) -> f64 {
        self.mp2
            .as_ref()
            .and_then(|m| m.degeneracy_threshold)
            .unwrap_or(1e-10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const YAML: &str = r#"
integrals:
  directory: h2_sto3g
  two_electron: two_electron.dat
num_occupied: 1
scf_params:
  energy_tolerance: 1.0e-10
mp2:
  algorithm: direct
"#;

    fn parse() -> Config {
        serde_yml::from_str::<Config>(YAML).unwrap().with_defaults()
    }

    #[test]
    fn test_defaults_fill_missing_values() {
        let config = parse();
        assert_eq!(config.num_occupied, 1);
        assert_eq!(config.num_orbitals, None);
        assert_eq!(config.scf_params.energy_tolerance, Some(1e-10));
        assert_eq!(config.scf_params.density_tolerance, Some(1e-12));
        assert_eq!(config.scf_params.max_cycle, Some(100));
        let mp2 = config.mp2.as_ref().unwrap();
        assert_eq!(mp2.enabled, Some(true));
        assert_eq!(mp2.algorithm.as_deref(), Some("direct"));
    }

    #[test]
    fn test_command_line_overrides_file() {
        let config = parse();
        let args = Args::parse_from([
            "scf",
            "--max-cycle",
            "7",
            "--mp2-algorithm",
            "quarter",
        ]);
        let options = config.scf_options(&args);
        assert_eq!(options.max_cycle, 7);
        assert_eq!(options.energy_tolerance, 1e-10);
        assert_eq!(config.mp2_algorithm(&args).unwrap(), TransformAlgorithm::Quarter);
        assert!(config.is_mp2_enabled(&args));

        let args = Args::parse_from(["scf", "--no-mp2"]);
        assert!(!config.is_mp2_enabled(&args));
        assert_eq!(config.mp2_algorithm(&args).unwrap(), TransformAlgorithm::Direct);
    }

    #[test]
    fn test_unknown_algorithm_is_an_error() {
        let config = parse();
        let args = Args::parse_from(["scf", "--mp2-algorithm", "fast"]);
        assert!(config.mp2_algorithm(&args).is_err());
    }

    #[test]
    fn test_integral_paths_resolve_against_base() {
        let config = parse();
        let files = config.integrals.files(Path::new("/data/runs"));
        assert_eq!(files.overlap, PathBuf::from("/data/runs/h2_sto3g/s.dat"));
        assert_eq!(
            files.two_electron,
            PathBuf::from("/data/runs/h2_sto3g/two_electron.dat")
        );
    }
}
