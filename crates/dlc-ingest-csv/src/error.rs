use dlc_model::ModelError;
use thiserror::Error;

/// Errors that stop a conversion run.
///
/// Sparse rows (blank rows, unknown levels, missing optional cells) are never
/// errors; they are skipped or omitted.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The top-level container could not be resolved.
    #[error("no resource defined (row {row})")]
    NoResourceDefined { row: usize },

    #[error("row {row}: {source}")]
    InvalidContainerId {
        row: usize,
        #[source]
        source: ModelError,
    },

    #[error("row {row}: container lookup failed: {message}")]
    Lookup { row: usize, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("batch sink failed: {0:#}")]
    Sink(anyhow::Error),
}

impl ConvertError {
    /// Spreadsheet row the error was raised for, when there is one.
    pub fn row(&self) -> Option<usize> {
        match self {
            ConvertError::NoResourceDefined { row }
            | ConvertError::InvalidContainerId { row, .. }
            | ConvertError::Lookup { row, .. } => Some(*row),
            _ => None,
        }
    }
}
