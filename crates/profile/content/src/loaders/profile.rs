//! Profile document loader.

use std::path::Path;

use tanzo_core::{Profile, SimulationConfig};
use tracing::{debug, info};

use crate::document::{ProfileDocument, SimulationSettings};
use crate::loaders::{DocumentFormat, LoadResult, read_file};

/// A validated profile together with the simulation block it declared.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedProfile {
    pub profile: Profile,
    pub settings: SimulationSettings,
}

impl LoadedProfile {
    /// Simulation config implied by the document alone.
    pub fn simulation_defaults(&self) -> SimulationConfig {
        self.settings.apply(SimulationConfig::default())
    }
}

/// Loader for YAML/JSON profile documents.
pub struct ProfileLoader;

impl ProfileLoader {
    /// Parse a document without validating it.
    pub fn load_document(path: &Path) -> LoadResult<ProfileDocument> {
        let content = read_file(path)?;
        let format = DocumentFormat::detect(path, &content);
        debug!(
            target: "tanzo::content",
            path = %path.display(),
            format = format.as_str(),
            "parsing profile document"
        );

        Self::parse(&content, format)
            .map_err(|e| anyhow::anyhow!("Failed to parse profile {}: {}", path.display(), e))
    }

    /// Parse and validate a document.
    pub fn load(path: &Path) -> LoadResult<LoadedProfile> {
        let document = Self::load_document(path)?;
        let settings = document.settings();
        let profile = document.into_profile()?;

        info!(
            target: "tanzo::content",
            profile = %profile.name,
            version = %profile.version,
            archetypes = profile.archetypes.len(),
            "loaded profile"
        );

        Ok(LoadedProfile { profile, settings })
    }

    /// Parse a document from a string in the given format.
    pub fn parse(content: &str, format: DocumentFormat) -> LoadResult<ProfileDocument> {
        let document = match format {
            DocumentFormat::Json => serde_json::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse profile JSON: {}", e))?,
            DocumentFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse profile YAML: {}", e))?,
        };
        Ok(document)
    }
}
