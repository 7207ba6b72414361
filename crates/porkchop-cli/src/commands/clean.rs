//! Clean command - strip publishing artifacts from raw bill text.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::{read_bill, write_output};

/// Arguments for the clean command.
#[derive(Args)]
pub struct CleanArgs {
    /// Raw bill text file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: CleanArgs) -> anyhow::Result<()> {
    let cleaned = read_bill(&args.input, false)?;
    info!("Cleaned {}: {} lines", args.input.display(), cleaned.lines().count());
    write_output(args.output.as_ref(), &cleaned)
}
