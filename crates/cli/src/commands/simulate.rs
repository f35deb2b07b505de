//! Monte Carlo simulation of a profile.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use tanzo_content::{
    ConfigLoader, ExportFormat, ProfileLoader, SimulationSettings, export_result, write_result,
};
use tanzo_core::{SimulationConfig, parse_seed, simulate};

use crate::config;

/// Run a Monte Carlo simulation over a profile
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Profile document (YAML or JSON)
    pub file: PathBuf,

    /// Number of iterations
    #[arg(short, long)]
    pub iterations: Option<u64>,

    /// Base seed; runs with the same seed are identical
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<u64>,

    /// Fraction of the value domain used as implicit variance
    #[arg(long)]
    pub variation_factor: Option<f64>,

    /// Only simulate archetypes tagged with this environment
    #[arg(short, long)]
    pub environment: Option<String>,

    /// TOML file with simulation parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Spread iterations across threads
    #[arg(long)]
    pub parallel: bool,

    /// Write the result to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: json, yaml or text (defaults to the output extension)
    #[arg(short, long)]
    pub format: Option<ExportFormat>,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let loaded = ProfileLoader::load(&self.file)?;
        let config = self.resolve_config(&loaded.settings)?;

        tracing::debug!(?config, "resolved simulation config");

        let result = simulate(&loaded.profile, &config)?;

        match &self.output {
            Some(path) => {
                let format = self
                    .format
                    .or_else(|| ExportFormat::from_extension(path))
                    .unwrap_or_default();
                write_result(path, &result, format)?;
                println!("{}", result);
                eprintln!(
                    "{} Wrote {} result to {}",
                    style("✓").green().bold(),
                    format.as_str(),
                    style(path.display()).cyan()
                );
            }
            None => match self.format {
                Some(format) if format != ExportFormat::Text => {
                    println!("{}", export_result(&result, format)?);
                }
                _ => println!("{}", result),
            },
        }

        Ok(())
    }

    fn resolve_config(&self, profile: &SimulationSettings) -> Result<SimulationConfig> {
        let file = match &self.config {
            Some(path) => ConfigLoader::load_settings(path)?,
            None => SimulationSettings::default(),
        };
        let env = config::settings_from_env()?;
        let flags = self.settings();

        Ok(config::resolve([profile, &file, &env, &flags]).with_summary(true))
    }

    fn settings(&self) -> SimulationSettings {
        SimulationSettings {
            iterations: self.iterations,
            seed: self.seed,
            variation_factor: self.variation_factor,
            environment: self.environment.clone(),
            parallel: self.parallel.then_some(true),
            ..Default::default()
        }
    }
}
