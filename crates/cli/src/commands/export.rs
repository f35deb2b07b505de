//! Profile shorthand export.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tanzo_content::{ProfileLoader, profile_shorthand};

/// Print a profile in compact shorthand notation
#[derive(Parser, Debug)]
pub struct Export {
    /// Profile document (YAML or JSON)
    pub file: PathBuf,

    /// Write the shorthand to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Export {
    pub fn execute(self) -> Result<()> {
        let loaded = ProfileLoader::load(&self.file)?;
        let shorthand = profile_shorthand(&loaded.profile);

        match self.output {
            Some(path) => {
                std::fs::write(&path, format!("{}\n", shorthand))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!(
                    "{} Wrote shorthand to {}",
                    style("✓").green().bold(),
                    style(path.display()).cyan()
                );
            }
            None => println!("{}", shorthand),
        }

        Ok(())
    }
}
