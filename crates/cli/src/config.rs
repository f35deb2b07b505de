//! Simulation config resolution for the CLI.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. the profile's `simulation` block
//! 3. `--config FILE.toml`
//! 4. environment (`TANZO_ITERATIONS`, `TANZO_SEED`, `TANZO_VARIATION_FACTOR`,
//!    `TANZO_ENVIRONMENT`)
//! 5. command-line flags

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, Result};
use tanzo_content::SimulationSettings;
use tanzo_core::{SimulationConfig, parse_seed};

pub const ENV_ITERATIONS: &str = "TANZO_ITERATIONS";
pub const ENV_SEED: &str = "TANZO_SEED";
pub const ENV_VARIATION_FACTOR: &str = "TANZO_VARIATION_FACTOR";
pub const ENV_ENVIRONMENT: &str = "TANZO_ENVIRONMENT";

/// Settings from the process environment.
pub fn settings_from_env() -> Result<SimulationSettings> {
    settings_from_lookup(|key| env::var(key).ok())
}

/// Settings from an arbitrary key lookup.
pub fn settings_from_lookup<F>(lookup: F) -> Result<SimulationSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let seed = match lookup(ENV_SEED) {
        Some(raw) => Some(parse_seed(&raw).with_context(|| format!("Invalid {}", ENV_SEED))?),
        None => None,
    };

    Ok(SimulationSettings {
        iterations: read_env(&lookup, ENV_ITERATIONS)?,
        seed,
        variation_factor: read_env(&lookup, ENV_VARIATION_FACTOR)?,
        environment: lookup(ENV_ENVIRONMENT).filter(|env| !env.trim().is_empty()),
        ..Default::default()
    })
}

/// Overlays every layer onto the defaults, lowest precedence first.
pub fn resolve<'a>(layers: impl IntoIterator<Item = &'a SimulationSettings>) -> SimulationConfig {
    layers
        .into_iter()
        .fold(SimulationConfig::default(), |config, layer| layer.apply(config))
}

fn read_env<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("Invalid {}='{}': {}", key, raw, e)),
        None => Ok(None),
    }
}
