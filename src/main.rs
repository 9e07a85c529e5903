// =============================================================================
// main.rs - THE DRIVER
// =============================================================================
//
// Reads business records as JSON Lines from a file (or stdin), runs the
// filter and cleaning pipelines, writes the survivors as JSON Lines to
// stdout. Logs go to stderr so the data stream stays clean.
//
//   truck_business_filter places.jsonl > trucking.jsonl
//   RUST_LOG=debug truck_business_filter < places.jsonl > trucking.jsonl
// =============================================================================

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use truck_business_filter::{BusinessRecord, CleaningPipeline, Dataset, FilterConfig, FilterPipeline};

/// Keep US truck/freight/logistics businesses from a business-directory dump.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON Lines input file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Skip name cleaning and emit the filtered records as they are.
    #[arg(long)]
    no_clean: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_json_lines<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut records = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", number + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: BusinessRecord = serde_json::from_str(&line)
            .with_context(|| format!("line {} is not a valid business record", number + 1))?;
        records.push(record);
    }
    Ok(Dataset::new(records))
}

fn write_json_lines<W: Write>(mut writer: W, dataset: &Dataset) -> Result<()> {
    for record in dataset.iter() {
        serde_json::to_writer(&mut writer, record).context("failed to serialize record")?;
        writer.write_all(b"\n").context("failed to write output")?;
    }
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = FilterConfig::from_env();
    init_tracing(config.log_json);

    info!(
        threshold = config.confidence_threshold,
        country = %config.target_country,
        include_keywords = config.include_keywords.len(),
        exclude_keywords = config.exclude_keywords.len(),
        "Configuration loaded"
    );

    let dataset = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_json_lines(BufReader::new(file))?
        }
        None => read_json_lines(io::stdin().lock())?,
    };
    info!(records = dataset.len(), "Records loaded");

    let pipeline = FilterPipeline::from_config(&config)?;
    let (filtered, mut report) = pipeline.filter_with_report(dataset)?;

    let output = if cli.no_clean {
        filtered
    } else {
        let (cleaned, transition) = CleaningPipeline::from_config(&config).clean_with_report(filtered)?;
        report.push(transition);
        cleaned
    };

    write_json_lines(BufWriter::new(io::stdout().lock()), &output)?;
    info!(
        kept = output.len(),
        dropped = report.total_dropped(),
        "Done"
    );

    Ok(())
}
