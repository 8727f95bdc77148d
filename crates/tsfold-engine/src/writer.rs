//! Writes sink lines and statistics to an output directory.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::{Engine, EngineError, JobOutput, Result, RunStats};

/// Writes the sinks of a run as `<base>-<sink>.csv` files.
#[derive(Debug, Clone)]
pub struct SinkWriter {
    out_dir: PathBuf,
}

impl SinkWriter {
    /// Creates a writer for `out_dir`.
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Output directory.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Writes one file per sink the job can produce.
    ///
    /// Every file gets the header row first when the job enables headers,
    /// even if the sink received no lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or a file cannot be written.
    pub fn write(&self, engine: &Engine, output: &JobOutput) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir).map_err(|source| EngineError::CreateDir {
            path: self.out_dir.clone(),
            source,
        })?;

        let config = engine.config();
        let header = config.header.then(|| engine.header());
        let mut written = Vec::new();
        for sink in engine.sinks() {
            let path = self.out_dir.join(sink.file_name(&config.base_name, config.period));
            let lines = output.sink(sink);
            write_lines(&path, header.as_deref(), lines).map_err(|source| {
                EngineError::WriteFile {
                    path: path.clone(),
                    source,
                }
            })?;
            debug!("wrote {} rows to {}", lines.len(), path.display());
            written.push(path);
        }
        info!("wrote {} files to {}", written.len(), self.out_dir.display());
        Ok(written)
    }

    /// Writes run statistics as `<base>-stats.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_stats(&self, base_name: &str, stats: &RunStats) -> Result<PathBuf> {
        let path = self.out_dir.join(format!("{base_name}-stats.json"));
        let file = File::create(&path).map_err(|source| EngineError::WriteFile {
            path: path.clone(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), stats)?;
        Ok(path)
    }
}

fn write_lines(path: &Path, header: Option<&str>, lines: &[String]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    if let Some(header) = header {
        writeln!(writer, "{header}")?;
    }
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}
