//! Partition, sort, delimit and reduce.

use std::collections::BTreeMap;
use std::io::Read;
use std::num::NonZeroUsize;

use log::{debug, info};
use rayon::prelude::*;
use tsfold_aggregate::{ConsolidatedSummary, PeriodAggregator};
use tsfold_format::{ColumnTemplate, Ingestor, OutputRow, ParsedRecord};
use tsfold_key::{GroupComparator, KeyComparator, KeyedRecord, TotalOrderComparator, partition};
use tsfold_select::{ExtremalSelector, Selection};
use tsfold_types::TsfoldError;

use crate::{JobConfig, JobKind, Result, RunStats, Sink};

/// Rendered lines of a finished run.
#[derive(Debug, Clone, Default)]
pub struct JobOutput {
    /// Lines per sink, without header rows.
    pub lines: BTreeMap<Sink, Vec<String>>,
    /// Run counters.
    pub stats: RunStats,
}

impl JobOutput {
    /// Lines written to `sink`.
    #[must_use]
    pub fn sink(&self, sink: Sink) -> &[String] {
        self.lines.get(&sink).map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct ShardOutput {
    lines: BTreeMap<Sink, Vec<String>>,
    groups: u64,
}

impl ShardOutput {
    fn push(&mut self, sink: Sink, line: String) {
        self.lines.entry(sink).or_default().push(line);
    }
}

/// Runs one job over in-memory records.
///
/// Records are keyed, partitioned into shards by group identity, and each
/// shard is sorted, delimited into groups and reduced on the rayon pool.
/// Output is deterministic for a given input and configuration.
#[derive(Debug)]
pub struct Engine {
    config: JobConfig,
    output: ColumnTemplate,
    shards: NonZeroUsize,
    order: TotalOrderComparator,
    groups: GroupComparator,
    selector: Option<ExtremalSelector>,
}

impl Engine {
    /// Creates an engine for a validated job.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: JobConfig) -> Result<Self> {
        config.validate()?;
        let output = config.output_template()?;
        let shards = NonZeroUsize::new(config.shards)
            .ok_or_else(|| TsfoldError::InvalidConfig("shards must be at least 1".to_string()))?;
        let selector = match config.kind() {
            JobKind::Consolidate => None,
            JobKind::Select(selector) => Some(ExtremalSelector::new(selector)),
        };
        Ok(Self {
            order: TotalOrderComparator::new(config.direction),
            groups: GroupComparator::new(config.direction),
            config,
            output,
            shards,
            selector,
        })
    }

    /// The job configuration.
    #[must_use]
    pub const fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Sinks this job writes, in output order.
    #[must_use]
    pub fn sinks(&self) -> Vec<Sink> {
        Sink::for_job(&self.config.kind())
    }

    /// Header row of every sink.
    #[must_use]
    pub fn header(&self) -> String {
        self.output.header()
    }

    /// Creates an ingestor for the configured input template.
    ///
    /// # Errors
    ///
    /// Returns an error if the input template is unusable.
    pub fn ingestor(&self) -> Result<Ingestor> {
        Ok(Ingestor::new(self.config.input_template()?)?)
    }

    /// Ingests CSV from `reader` and runs the job.
    ///
    /// `symbol` tags records whose lines carry no symbol column.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or a record cannot be keyed.
    pub fn run_reader<R: Read>(&self, reader: R, symbol: &str) -> Result<JobOutput> {
        let mut ingestor = self.ingestor()?.with_symbol(symbol);
        let records = ingestor.read(reader)?;
        let mut output = self.run(records)?;
        output.stats.ingest = ingestor.stats();
        Ok(output)
    }

    /// Runs the job over parsed records.
    ///
    /// # Errors
    ///
    /// Returns an error if a record timestamp has no calendar bucket.
    pub fn run(&self, records: Vec<ParsedRecord>) -> Result<JobOutput> {
        let count = records.len();
        let mut shards: Vec<Vec<KeyedRecord>> = (0..self.shards.get()).map(|_| Vec::new()).collect();
        for parsed in records {
            let keyed = KeyedRecord::new(
                &parsed.exchange,
                &parsed.symbol,
                parsed.record,
                self.config.period,
            )?;
            shards[partition(&keyed.key, self.shards)].push(keyed);
        }

        let reduced: Vec<ShardOutput> = shards
            .into_par_iter()
            .enumerate()
            .map(|(index, shard)| self.reduce_shard(index, shard))
            .collect();

        let mut output = JobOutput::default();
        for sink in self.sinks() {
            output.lines.insert(sink, Vec::new());
        }
        for shard in reduced {
            output.stats.groups += shard.groups;
            for (sink, lines) in shard.lines {
                output.lines.entry(sink).or_default().extend(lines);
            }
        }
        output.stats.records = count as u64;
        output.stats.shards = self.shards.get();
        output.stats.rows = output
            .lines
            .iter()
            .map(|(sink, lines)| (sink.name(self.config.period), lines.len() as u64))
            .collect();

        info!(
            "reduced {} records into {} groups across {} shards ({} rows)",
            count,
            output.stats.groups,
            self.shards,
            output.stats.total_rows()
        );
        Ok(output)
    }

    fn reduce_shard(&self, index: usize, mut shard: Vec<KeyedRecord>) -> ShardOutput {
        shard.sort_by(|a, b| self.order.compare(&a.key, &b.key));
        let output = match &self.selector {
            None => self.consolidate_shard(&shard),
            Some(selector) => self.select_shard(selector, &shard),
        };
        debug!("shard {index}: {} records, {} groups", shard.len(), output.groups);
        output
    }

    fn consolidate_shard(&self, shard: &[KeyedRecord]) -> ShardOutput {
        let mut output = ShardOutput::default();
        let mut aggregator = PeriodAggregator::new(self.config.direction);
        for keyed in shard {
            if let Some(summary) = aggregator.process(&keyed.key, &keyed.record) {
                self.push_summary(&mut output, &summary);
            }
        }
        if let Some(summary) = aggregator.finish() {
            self.push_summary(&mut output, &summary);
        }
        output
    }

    fn push_summary(&self, output: &mut ShardOutput, summary: &ConsolidatedSummary) {
        let record = summary.to_record();
        let row = OutputRow::new(
            self.config.period.as_str(),
            output.groups as usize,
            &summary.identity,
            &record,
        );
        output.push(Sink::Summaries, self.output.format(&row));
        output.groups += 1;
    }

    fn select_shard(&self, selector: &ExtremalSelector, shard: &[KeyedRecord]) -> ShardOutput {
        let mut output = ShardOutput::default();
        for run in shard.chunk_by(|a, b| self.groups.same_group(&a.key, &b.key)) {
            let Some(first) = run.first() else {
                continue;
            };
            let group = output.groups as usize;
            if let Some(selection) = selector.select(group, &first.key, run.iter().map(|k| &k.record)) {
                self.push_selection(&mut output, &selection);
                output.groups += 1;
            }
        }
        output
    }

    fn push_selection(&self, output: &mut ShardOutput, selection: &Selection) {
        for emission in &selection.emissions {
            let row = OutputRow::new(
                emission.label(),
                emission.filter_id,
                &selection.identity,
                &emission.record,
            );
            output.push(Sink::Records(emission.stream), self.output.format(&row));
        }
    }
}
