//! CLI application for legislative bill text analysis.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{chunk, clean, config, diff, extract, score};

/// Porkchop - Extract spending facts from bills and flag likely pork
#[derive(Parser)]
#[command(name = "porkchop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip publishing artifacts from raw bill text
    Clean(clean::CleanArgs),

    /// Split bill text into chunks
    Chunk(chunk::ChunkArgs),

    /// Extract facts from a bill
    Extract(extract::ExtractArgs),

    /// Compare versions of a bill
    Diff(diff::DiffArgs),

    /// Score extracted spending items
    Score(score::ScoreArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Clean(args) => clean::run(args).await,
        Commands::Chunk(args) => chunk::run(args, config_path).await,
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Diff(args) => diff::run(args, config_path).await,
        Commands::Score(args) => score::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
