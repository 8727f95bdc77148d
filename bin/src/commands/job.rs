//! Consolidate and select command implementation.
//!
//! Builds a job configuration from the command line, runs it over one input
//! file and writes every sink plus run statistics to the output directory.

use anyhow::{Context, Result};
use clap::Args;
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tsfold_lib::prelude::*;

/// Options shared by every job.
#[derive(Args)]
pub(crate) struct JobArgs {
    /// Input CSV file
    input: PathBuf,

    /// Consolidation period (y, q, m, w, d)
    #[arg(short, long, default_value = "m")]
    period: String,

    /// Record order (asc, desc)
    #[arg(short, long, default_value = "desc")]
    direction: String,

    /// Input column template. Inferred from the column count when omitted.
    #[arg(long)]
    csvcols: Option<String>,

    /// Output column template
    #[arg(long, default_value = "d,o,h,l,c,v,a")]
    outcols: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Output file prefix. Defaults to the input file stem.
    #[arg(long)]
    base_name: Option<String>,

    /// Symbol for lines without one. Defaults to the input file stem.
    #[arg(long)]
    symbol: Option<String>,

    /// Omit header rows
    #[arg(long)]
    no_header: bool,

    /// Number of shards reduced in parallel
    #[arg(long, default_value = "1")]
    shards: usize,
}

/// Options of a selection job.
#[derive(Args)]
pub(crate) struct SelectArgs {
    /// Comma separated filter names or codes
    #[arg(short, long, default_value = "o,ho,lo,h,lh,l,hl,hv,lv,a,ha,la")]
    filters: String,

    /// Output mode (split, combine, regress, all)
    #[arg(short, long, default_value = "all")]
    mode: String,

    /// Also write every raw input record to the debug sink
    #[arg(long)]
    all_records: bool,
}

impl JobArgs {
    fn stem(&self) -> String {
        self.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn config(&self, select: Option<&SelectArgs>) -> Result<JobConfig> {
        let mut config = JobConfig {
            csvcols: self.csvcols.clone(),
            outcols: self.outcols.clone(),
            period: self.period.parse()?,
            direction: self.direction.parse()?,
            header: !self.no_header,
            shards: self.shards,
            base_name: self.base_name.clone().unwrap_or_else(|| self.stem()),
            ..JobConfig::default()
        };
        if let Some(select) = select {
            config.filters = Some(select.filters.parse()?);
            config.mode = select.mode.parse()?;
            config.emit_all_records = select.all_records;
        }
        Ok(config)
    }
}

/// Run a consolidation, or a selection when `select` is given.
pub(crate) fn run(args: &JobArgs, select: Option<&SelectArgs>, quiet: bool) -> Result<()> {
    let config = args.config(select).context("Invalid job configuration")?;
    debug!("job config: {}", serde_json::to_string(&config)?);

    let engine = Engine::new(config).context("Invalid job configuration")?;
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let symbol = args.symbol.clone().unwrap_or_else(|| args.stem());

    let output = engine
        .run_reader(BufReader::new(file), &symbol)
        .with_context(|| format!("Failed to process {}", args.input.display()))?;

    let writer = SinkWriter::new(&args.output_dir);
    let files = writer.write(&engine, &output)?;
    let stats_path = writer.write_stats(&engine.config().base_name, &output.stats)?;

    if !quiet {
        let ingest = output.stats.ingest;
        println!(
            "Read {} lines ({} good, {} bad, {} headers)",
            ingest.lines, ingest.good, ingest.bad, ingest.headers
        );
        println!("Reduced {} groups", output.stats.groups);
        for path in &files {
            println!("  {}", path.display());
        }
        println!("Stats: {}", stats_path.display());
    }
    Ok(())
}
