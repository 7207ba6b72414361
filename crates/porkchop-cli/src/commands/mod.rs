//! Subcommands and the helpers they share.

pub mod chunk;
pub mod clean;
pub mod config;
pub mod diff;
pub mod extract;
pub mod score;

use std::fs;
use std::path::{Path, PathBuf};

use console::style;

use porkchop_core::models::config::PorkchopConfig;
use porkchop_core::text::clean_text;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Load the `--config` file, or the user config when present, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PorkchopConfig> {
    if let Some(path) = config_path {
        return Ok(PorkchopConfig::from_file(Path::new(path))?);
    }
    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(PorkchopConfig::from_file(&default_path)?)
    } else {
        Ok(PorkchopConfig::default())
    }
}

/// Read a bill text file, cleaning it unless `raw` is set.
pub fn read_bill(path: &Path, raw: bool) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    let text = fs::read_to_string(path)?;
    Ok(if raw { text } else { clean_text(&text) })
}

/// Write to the output file, or stdout when none was given.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
