//! Structural validation of a profile document.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use tanzo_content::ProfileLoader;

/// Check a profile document and list its archetypes
#[derive(Parser, Debug)]
pub struct Validate {
    /// Profile document (YAML or JSON)
    pub file: PathBuf,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let document = ProfileLoader::load_document(&self.file)?;

        if let Err(errors) = document.validate() {
            eprintln!(
                "{} {} has {} problem(s):",
                style("✗").red().bold(),
                style(self.file.display()).cyan(),
                errors.len()
            );
            for error in errors.errors() {
                eprintln!("  {} {}", style("-").red(), error);
            }
            anyhow::bail!("Validation failed for {}", self.file.display());
        }

        let body = &document.profile;
        println!(
            "{} Profile {} v{} is valid",
            style("✓").green().bold(),
            style(&body.name).cyan().bold(),
            document.version
        );
        println!("  Archetypes: {}", body.archetypes.len());
        for archetype in &body.archetypes {
            let weight = archetype
                .weight
                .map(|w| format!("{:.0}%", w * 100.0))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "    {} {} ({} attributes, weight {})",
                style("•").dim(),
                archetype.display_name().unwrap_or_default(),
                archetype.attributes.len(),
                weight
            );
        }
        if !body.typologies.is_empty() {
            println!("  Typologies:");
            for (system, fields) in &body.typologies {
                let fields: Vec<String> = fields
                    .iter()
                    .filter_map(|(key, value)| Some(format!("{}={}", key, value.as_ref()?)))
                    .collect();
                println!("    {} {}: {}", style("•").dim(), system, fields.join(", "));
            }
        }
        if let Some(settings) = body.simulation.as_ref().filter(|s| !s.is_empty()) {
            let config = settings.apply(Default::default());
            println!(
                "  Simulation defaults: {} iterations, seed {}",
                config.iterations,
                config
                    .seed
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "random".to_string())
            );
        }

        Ok(())
    }
}
