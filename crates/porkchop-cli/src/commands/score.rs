//! Score command - heuristic pork scores for extracted spending.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use porkchop_core::models::bill::{BillContext, FactBundle, SpendingItem};
use porkchop_core::models::score::BillScoreReport;
use porkchop_core::score::PorkScorer;

use super::{load_config, write_output, OutputFormat};

/// Arguments for the score command.
#[derive(Args)]
pub struct ScoreArgs {
    /// JSON file: `extract` output or a list of spending items
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Bill title used for the relevance check
    #[arg(short, long, default_value = "")]
    title: String,

    /// Bill purpose
    #[arg(long, default_value = "")]
    purpose: String,

    /// Score at which an item is reported as high pork (default: from config)
    #[arg(long)]
    high_threshold: Option<u32>,
}

pub async fn run(args: ScoreArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(threshold) = args.high_threshold {
        config.scoring.high_pork_threshold = threshold;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let items = load_items(&fs::read_to_string(&args.input)?)?;
    info!("Loaded {} spending items from {}", items.len(), args.input.display());

    let bill = BillContext::new(&args.title).with_purpose(&args.purpose);
    let report = PorkScorer::with_config(config.scoring)
        .score_bill(&items, &bill, None)
        .await?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Csv => format_csv(&report)?,
        OutputFormat::Text => format_text(&report),
    };
    write_output(args.output.as_ref(), &output)?;

    if report.high_pork.is_empty() {
        eprintln!("{} No high-pork items", style("✓").green());
    } else {
        eprintln!(
            "{} {} of {} items at or above the high-pork threshold",
            style("⚠").yellow(),
            style(report.high_pork.len()).red(),
            report.items_scored
        );
    }
    Ok(())
}

/// Accept either fact bundles from `extract` or bare spending items.
fn load_items(json: &str) -> anyhow::Result<Vec<(String, SpendingItem)>> {
    if let Ok(bundles) = serde_json::from_str::<Vec<FactBundle>>(json) {
        return Ok(bundles
            .iter()
            .flat_map(|bundle| {
                bundle.funding.iter().enumerate().map(move |(i, fact)| {
                    (format!("{}#{}", bundle.chunk_id, i + 1), SpendingItem::from(fact))
                })
            })
            .collect());
    }

    let items: Vec<SpendingItem> = serde_json::from_str(json)?;
    Ok(items
        .into_iter()
        .enumerate()
        .map(|(i, item)| (format!("item-{}", i + 1), item))
        .collect())
}

fn format_csv(report: &BillScoreReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["item_id", "amount", "purpose", "score", "flags"])?;

    for item in &report.all_scores {
        let score = item.result.score.to_string();
        let flags = item.result.flags.iter().cloned().collect::<Vec<_>>().join(";");
        let record: [&str; 5] = [
            &item.item_id,
            &item.amount,
            item.purpose.as_deref().unwrap_or_default(),
            &score,
            &flags,
        ];
        wtr.write_record(record)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data.trim_end().to_string())
}

/// Plain report text; it may be written to a file, so no terminal styling.
fn format_text(report: &BillScoreReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Bill: {}\n", report.title));
    out.push_str(&format!(
        "Items scored: {}  avg: {:.1}  max: {}\n",
        report.items_scored, report.avg_score, report.max_score
    ));

    if report.high_pork.is_empty() {
        out.push_str("No high-pork items\n");
    } else {
        out.push_str("High pork:\n");
        for item in &report.high_pork {
            let flags: Vec<&str> = item.result.flags.iter().map(String::as_str).collect();
            out.push_str(&format!(
                "  [{:>3}] {} {} ({})\n",
                item.result.score,
                item.amount,
                item.purpose.as_deref().unwrap_or("unspecified"),
                flags.join(", ")
            ));
        }
    }

    out.trim_end().to_string()
}
