//! Named output sinks.

use tsfold_select::Stream;
use tsfold_types::Period;

use crate::JobKind;

/// Logical destination of output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sink {
    /// Consolidated summaries.
    Summaries,
    /// One selector stream.
    Records(Stream),
}

impl Sink {
    /// Sink name: `<period>` or `<period>/rec/<stream>`.
    #[must_use]
    pub fn name(&self, period: Period) -> String {
        match self {
            Self::Summaries => period.as_str().to_string(),
            Self::Records(stream) => format!("{}/rec/{}", period.as_str(), stream.suffix()),
        }
    }

    /// File name of the sink: `<base>-<name>.csv`, with `/` turned into `-`.
    #[must_use]
    pub fn file_name(&self, base: &str, period: Period) -> String {
        format!("{base}-{}.csv", self.name(period).replace('/', "-"))
    }

    /// Sinks a job can write to, in output order.
    #[must_use]
    pub fn for_job(kind: &JobKind) -> Vec<Self> {
        match kind {
            JobKind::Consolidate => vec![Self::Summaries],
            JobKind::Select(config) => {
                Stream::for_config(config.mode, config.filters.kinds(), config.emit_all_records)
                    .into_iter()
                    .map(Self::Records)
                    .collect()
            }
        }
    }
}
