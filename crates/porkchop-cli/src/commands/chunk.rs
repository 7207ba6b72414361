//! Chunk command - split bill text into divisions, titles or sized pieces.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use porkchop_core::models::bill::Chunk;
use porkchop_core::models::config::ChunkStrategy;
use porkchop_core::text::Chunker;

use super::{load_config, read_bill, write_output};

/// Arguments for the chunk command.
#[derive(Args)]
pub struct ChunkArgs {
    /// Bill text file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Chunking strategy (default: from config)
    #[arg(short, long, value_enum)]
    strategy: Option<Strategy>,

    /// Maximum characters per chunk (default: from config)
    #[arg(short, long)]
    max_chars: Option<usize>,

    /// Input is already cleaned
    #[arg(long)]
    raw: bool,

    /// Print a one-line summary per chunk instead of JSON
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Strategy {
    Size,
    Structure,
}

impl From<Strategy> for ChunkStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Size => ChunkStrategy::Size,
            Strategy::Structure => ChunkStrategy::Structure,
        }
    }
}

pub async fn run(args: ChunkArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let text = read_bill(&args.input, args.raw)?;

    let mut chunker = Chunker::with_config(config.chunking);
    if let Some(strategy) = args.strategy {
        chunker = chunker.with_strategy(strategy.into());
    }
    if let Some(max_chars) = args.max_chars {
        chunker = chunker.with_max_chars(max_chars);
    }

    let chunks = chunker.chunk(&text);
    info!("Split {} into {} chunks", args.input.display(), chunks.len());

    let output = if args.summary {
        format_summary(&chunks)
    } else {
        serde_json::to_string_pretty(&chunks)?
    };
    write_output(args.output.as_ref(), &output)
}

fn format_summary(chunks: &[Chunk]) -> String {
    let mut out = String::new();
    for chunk in chunks {
        out.push_str(&format!(
            "{:<24} {:>8} chars  {} / {}\n",
            chunk.id,
            chunk.char_count,
            chunk.division.as_deref().unwrap_or("-"),
            chunk.title.as_deref().unwrap_or("-")
        ));
    }
    out.trim_end().to_string()
}
