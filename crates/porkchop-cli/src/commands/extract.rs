//! Extract command - pull funding, citations, deadlines and duties from a bill.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use porkchop_core::extract::{BillExtractor, FactExtractor};
use porkchop_core::models::bill::{FactBundle, RefType};
use porkchop_core::text::Chunker;

use super::{load_config, read_bill, write_output, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Bill text file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (csv lists funding only)
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Enactment date (YYYY-MM-DD) for resolving "N days" deadlines
    #[arg(long)]
    enacted: Option<NaiveDate>,

    /// Input is already cleaned
    #[arg(long)]
    raw: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let text = read_bill(&args.input, args.raw)?;

    let chunks = Chunker::with_config(config.chunking).chunk(&text);
    let extractor = BillExtractor::with_config(config.extraction);

    let pb = ProgressBar::new(chunks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let mut bundles = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        pb.set_message(chunk.id.clone());
        bundles.push(extractor.extract(&chunk.text, &chunk.id));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let funding_count: usize = bundles.iter().map(|b| b.funding.len()).sum();
    info!(
        "Extracted {} funding facts from {} chunks of {}",
        funding_count,
        chunks.len(),
        args.input.display()
    );

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&bundles)?,
        OutputFormat::Csv => format_csv(&bundles)?,
        OutputFormat::Text => format_text(&bundles, args.enacted),
    };
    write_output(args.output.as_ref(), &output)?;

    debug!("Total extraction time: {:?}", start.elapsed());
    if funding_count == 0 {
        eprintln!("{} No funding facts found", style("ℹ").blue());
    }

    Ok(())
}

fn format_csv(bundles: &[FactBundle]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "chunk_id",
        "amount",
        "amount_numeric",
        "purpose",
        "recipient",
        "availability",
        "fiscal_years",
    ])?;

    for bundle in bundles {
        for fact in &bundle.funding {
            let amount_numeric = fact.amount_numeric.to_string();
            let record: [&str; 7] = [
                &bundle.chunk_id,
                &fact.display_amount,
                &amount_numeric,
                &fact.purpose,
                fact.recipient.as_deref().unwrap_or_default(),
                fact.availability.as_deref().unwrap_or_default(),
                fact.fiscal_years.as_deref().unwrap_or_default(),
            ];
            wtr.write_record(record)?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data.trim_end().to_string())
}

fn format_text(bundles: &[FactBundle], enacted: Option<NaiveDate>) -> String {
    let mut out = String::new();

    for bundle in bundles.iter().filter(|b| !b.is_empty()) {
        out.push_str(&format!("Chunk {}:\n", bundle.chunk_id));

        if !bundle.funding.is_empty() {
            out.push_str(&format!("  Funding (total ${:.0}):\n", bundle.total_funding()));
            for fact in &bundle.funding {
                out.push_str(&format!("    {} for {}\n", fact.display_amount, fact.purpose));
            }
        }

        for (label, ref_type) in [
            ("U.S. Code", RefType::UsCode),
            ("Public Laws", RefType::PublicLaw),
            ("Acts", RefType::Act),
        ] {
            let refs: Vec<&str> = bundle
                .references_of(ref_type)
                .map(|r| r.ref_text.as_str())
                .collect();
            if !refs.is_empty() {
                out.push_str(&format!("  {}: {}\n", label, refs.join("; ")));
            }
        }

        if !bundle.deadlines.is_empty() {
            out.push_str("  Deadlines:\n");
            for deadline in &bundle.deadlines {
                let due = deadline
                    .due_date(enacted)
                    .map(|d| format!(" (due {})", d))
                    .unwrap_or_default();
                out.push_str(&format!("    {}{}: {}\n", deadline.date, due, deadline.action));
            }
        }

        if !bundle.duties.is_empty() {
            out.push_str(&format!("  Duties: {}\n", bundle.duties.len()));
        }
        if !bundle.entities.is_empty() {
            out.push_str(&format!("  Entities: {}\n", bundle.entities.join(", ")));
        }
        out.push('\n');
    }

    if out.is_empty() {
        return "No facts found.".to_string();
    }
    out.trim_end().to_string()
}
