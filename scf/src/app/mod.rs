mod report;
mod runner;
mod tasks;

pub use runner::run_restricted;

use self::report::{report_integrals, report_restricted_summary};
use self::tasks::run_restricted_followups;
use crate::config::{Args, Config};
use crate::io::{load_integrals, setup_output};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::{Path, PathBuf};

pub struct ScfApplication {
    args: Args,
    config: Config,
    base_dir: PathBuf,
}

impl ScfApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        let base_dir = Path::new(&args.config_file)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self {
            args,
            config,
            base_dir,
        })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref());

        let integrals = load_integrals(&self.config, &self.base_dir)?;
        report_integrals(&integrals);

        let solution = run_restricted(integrals.clone(), &self.args, &self.config)?;
        report_restricted_summary(&solution);
        run_restricted_followups(&solution, &integrals, &self.args, &self.config)?;

        Ok(())
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}
