//! Diff command - compare consecutive versions of a bill.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use glob::glob;
use tracing::{debug, info};

use porkchop_core::compare::{render_changelog, Comparator};
use porkchop_core::models::comparison::VersionText;
use porkchop_core::text::clean_text;

use super::{load_config, write_output};

/// Arguments for the diff command.
#[derive(Args)]
pub struct DiffArgs {
    /// Version files or glob patterns, oldest first
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    format: DiffFormat,

    /// Bill title for the changelog header
    #[arg(short, long, default_value = "Untitled bill")]
    title: String,

    /// Inputs are already cleaned
    #[arg(long)]
    raw: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum DiffFormat {
    /// Full comparison records
    Json,
    /// Changelog
    Markdown,
}

pub async fn run(args: DiffArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let files = expand_inputs(&args.inputs)?;
    if files.len() < 2 {
        eprintln!(
            "{} Only one version given; nothing to compare.",
            style("ℹ").blue()
        );
    }

    let mut versions = Vec::with_capacity(files.len());
    for path in &files {
        let text = fs::read_to_string(path)?;
        let text = if args.raw { text } else { clean_text(&text) };
        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("version")
            .to_string();
        debug!("Loaded version {} from {}", label, path.display());
        versions.push(VersionText::new(label, text));
    }

    let comparator = Comparator::with_config(config.comparison);
    let mut comparisons = Vec::new();
    for pair in versions.windows(2) {
        comparisons.push(comparator.compare_versions(&pair[0], &pair[1], None).await?);
    }
    info!("Compared {} versions", versions.len());

    let output = match args.format {
        DiffFormat::Json => serde_json::to_string_pretty(&comparisons)?,
        DiffFormat::Markdown => render_changelog(&args.title, &comparisons),
    };
    write_output(args.output.as_ref(), &output)
}

/// Expand each argument as a glob, keeping argument order.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in inputs {
        let matched: Vec<PathBuf> = glob(pattern)?.filter_map(|r| r.ok()).collect();
        if matched.is_empty() {
            anyhow::bail!("Input file not found: {}", pattern);
        }
        files.extend(matched);
    }
    Ok(files)
}
