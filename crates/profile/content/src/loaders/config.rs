//! Simulation configuration loader.

use std::path::Path;

use tanzo_core::SimulationConfig;

use crate::document::SimulationSettings;
use crate::loaders::{LoadResult, read_file};

/// Loader for simulation configuration from TOML files.
///
/// ```toml
/// iterations = 1000
/// seed = 42
/// variation_factor = 0.1
/// environment = "work"
/// domain = [0.0, 100.0]
/// parallel = true
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a complete config, defaults filled in for missing fields.
    pub fn load(path: &Path) -> LoadResult<SimulationConfig> {
        Ok(Self::load_settings(path)?.apply(SimulationConfig::default()))
    }

    /// Load only the fields the file sets, for layering over other sources.
    pub fn load_settings(path: &Path) -> LoadResult<SimulationSettings> {
        let content = read_file(path)?;
        let settings: SimulationSettings = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))?;

        Ok(settings)
    }
}
