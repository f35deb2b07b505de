//! Exporters for simulation results and profiles.

mod shorthand;

pub use shorthand::{distribution_shorthand, profile_shorthand};

use std::str::FromStr;

use tanzo_core::SimulationResult;

/// Output format for a [`SimulationResult`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
    /// The plain-text summary.
    Text,
}

impl ExportFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Text => "text",
        }
    }

    /// Format implied by an output file extension, if recognizable.
    pub fn from_extension(path: &std::path::Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unknown export format '{0}' (expected json, yaml or text)")]
    UnknownFormat(String),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Renders a result in the requested format.
pub fn export_result(result: &SimulationResult, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        ExportFormat::Yaml => Ok(serde_yaml::to_string(result)?),
        ExportFormat::Text => Ok(result.to_string()),
    }
}

/// Writes a rendered result to `path`.
#[cfg(feature = "loaders")]
pub fn write_result(
    path: &std::path::Path,
    result: &SimulationResult,
    format: ExportFormat,
) -> crate::loaders::LoadResult<()> {
    let rendered = export_result(result, format)?;
    std::fs::write(path, rendered)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;

    tracing::info!(
        target: "tanzo::content",
        path = %path.display(),
        format = format.as_str(),
        "wrote simulation result"
    );
    Ok(())
}
