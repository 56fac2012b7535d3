//! Batch sinks: where converted records are handed off.

use anyhow::{bail, Context, Result};
use dlc_model::Record;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Accepts an ordered record stream and exposes the resulting artifact.
pub trait RecordBatch {
    /// Append the next record. Order of calls is the order of the artifact.
    fn push(&mut self, record: Record) -> Result<()>;

    /// Finalize the batch (if needed) and return where the artifact lives.
    fn output_path(&mut self) -> Result<PathBuf>;
}

/// Writes the batch as one JSON array file.
#[derive(Debug)]
pub struct JsonFileBatch {
    dir: PathBuf,
    records: Vec<Record>,
    written: Option<PathBuf>,
    echo_output: bool,
}

impl JsonFileBatch {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            records: Vec::new(),
            written: None,
            echo_output: false,
        }
    }

    /// Log the artifact's contents once it has been written.
    pub fn with_echo(mut self, echo_output: bool) -> Self {
        self.echo_output = echo_output;
        self
    }

    fn write(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating output dir {}", self.dir.display()))?;
        let path = self
            .dir
            .join(format!("dlc_import_{}.json", Uuid::new_v4().simple()));
        let json = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            records = self.records.len(),
            "wrote import batch"
        );
        Ok(path)
    }

    /// Read the artifact back and log it. Never writes.
    fn echo(path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading back {}", path.display()))?;
        tracing::info!(path = %path.display(), "==================");
        tracing::info!("{contents}");
        tracing::info!("==================");
        Ok(())
    }
}

impl RecordBatch for JsonFileBatch {
    fn push(&mut self, record: Record) -> Result<()> {
        if let Some(path) = &self.written {
            bail!("batch already written to {}", path.display());
        }
        self.records.push(record);
        Ok(())
    }

    fn output_path(&mut self) -> Result<PathBuf> {
        let path = match &self.written {
            Some(path) => path.clone(),
            None => {
                let path = self.write()?;
                self.written = Some(path.clone());
                path
            }
        };
        if self.echo_output {
            Self::echo(&path)?;
        }
        Ok(path)
    }
}

/// Keeps the batch in memory; has no output artifact.
#[derive(Debug, Default)]
pub struct MemoryBatch {
    records: Vec<Record>,
}

impl MemoryBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl RecordBatch for MemoryBatch {
    fn push(&mut self, record: Record) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn output_path(&mut self) -> Result<PathBuf> {
        bail!("in-memory batch has no output artifact")
    }
}
