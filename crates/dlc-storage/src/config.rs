//! Import configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_REPOSITORY_ID: u32 = 12345;
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Configuration for a DLC import run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Repository the minted record URIs belong to
    pub repository_id: u32,
    /// Language tag written on created containers
    pub language: String,
    /// Abort on container lookup failures instead of treating them as "not found"
    pub strict_lookup: bool,
    /// Log the batch artifact's contents after it is written
    pub echo_output: bool,
    /// Mint counter-based record URIs so repeated runs produce identical batches
    pub deterministic_refs: bool,
    /// Directory for the batch artifact (system temp dir when unset)
    pub output_dir: Option<PathBuf>,
    /// JSON file listing containers that already exist in the host system
    pub existing_resources: Option<PathBuf>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            repository_id: DEFAULT_REPOSITORY_ID,
            language: DEFAULT_LANGUAGE.to_string(),
            strict_lookup: false,
            echo_output: false,
            deterministic_refs: false,
            output_dir: None,
            existing_resources: None,
        }
    }
}

impl ImportConfig {
    /// Load a JSON config file. Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
