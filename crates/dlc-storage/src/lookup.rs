//! Container lookup by composite identifier.

use anyhow::{Context, Result};
use dlc_model::{IdentifierKey, RecordRef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Finds containers that already exist in the host system.
pub trait ContainerLookup {
    /// Look up a container by its exact composite identifier.
    ///
    /// `Ok(None)` means no such container exists; `Err` means the store could not
    /// answer.
    fn find_container(&self, key: &IdentifierKey) -> Result<Option<RecordRef>>;
}

/// One entry of an existing-containers file.
///
/// The identifier is given either as its canonical array text
/// (`"identifier": "[\"MS\",\"0042\",null,null]"`) or as `id_0`..`id_3` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingContainer {
    pub uri: RecordRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(flatten)]
    pub fields: IdentifierKey,
}

impl ExistingContainer {
    pub fn key(&self) -> Result<IdentifierKey> {
        match &self.identifier {
            Some(text) => Ok(IdentifierKey::from_canonical(text)?),
            None => Ok(self.fields.clone()),
        }
    }
}

/// Container store held in memory, keyed by canonical identifier text.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContainerStore {
    by_key: HashMap<String, RecordRef>,
}

impl InMemoryContainerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `[ExistingContainer, ...]` from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading existing resources {}", path.display()))?;
        let entries: Vec<ExistingContainer> = serde_json::from_str(&text)
            .with_context(|| format!("parsing existing resources {}", path.display()))?;

        let mut store = Self::new();
        for entry in entries {
            let key = entry
                .key()
                .with_context(|| format!("existing resource {}", entry.uri))?;
            store.insert(&key, entry.uri);
        }
        tracing::debug!(
            path = %path.display(),
            containers = store.len(),
            "loaded existing containers"
        );
        Ok(store)
    }

    /// Register a container. A later insert for the same key replaces the earlier one.
    pub fn insert(&mut self, key: &IdentifierKey, uri: RecordRef) -> Option<RecordRef> {
        self.by_key.insert(key.canonical(), uri)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl ContainerLookup for InMemoryContainerStore {
    fn find_container(&self, key: &IdentifierKey) -> Result<Option<RecordRef>> {
        Ok(self.by_key.get(&key.canonical()).cloned())
    }
}
