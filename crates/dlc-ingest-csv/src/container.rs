//! Top-level container resolution (find-or-create by composite identifier).

use crate::{format_date, format_extent, ConvertError, Row};
use dlc_model::{
    ContainerRecord, ExtentPortion, IdentifierKey, Level, RecordKind, RecordRef, UserDefined,
};
use dlc_storage::{ContainerLookup, RefMinter};
use std::collections::HashMap;

/// Outcome of resolving a collection row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A container with this identifier already exists; nothing new to emit.
    Existing(RecordRef),
    /// A new container record that must be emitted.
    Created(ContainerRecord),
}

impl Resolution {
    pub fn reference(&self) -> &RecordRef {
        match self {
            Resolution::Existing(r) => r,
            Resolution::Created(record) => &record.uri,
        }
    }
}

/// Resolves collection rows against a container store.
///
/// Containers created during the run are remembered, so a repeated collection row
/// resolves to the container created for its first occurrence.
pub struct ContainerResolver {
    lookup: Box<dyn ContainerLookup>,
    created: HashMap<String, RecordRef>,
    language: String,
    strict_lookup: bool,
}

impl ContainerResolver {
    pub fn new(lookup: Box<dyn ContainerLookup>, language: String, strict_lookup: bool) -> Self {
        Self {
            lookup,
            created: HashMap::new(),
            language,
            strict_lookup,
        }
    }

    pub fn resolve(
        &mut self,
        row_number: usize,
        row: &Row,
        minter: &mut dyn RefMinter,
    ) -> Result<Resolution, ConvertError> {
        let raw = row
            .resource_id
            .as_deref()
            .ok_or(ConvertError::NoResourceDefined { row: row_number })?;
        let key = IdentifierKey::parse(raw).map_err(|source| ConvertError::InvalidContainerId {
            row: row_number,
            source,
        })?;
        let canonical = key.canonical();

        if let Some(existing) = self.find_existing(row_number, &key)? {
            tracing::info!(
                row = row_number,
                key = %canonical,
                uri = %existing,
                "found existing container"
            );
            return Ok(Resolution::Existing(existing));
        }
        if let Some(existing) = self.created.get(&canonical) {
            tracing::debug!(
                row = row_number,
                key = %canonical,
                uri = %existing,
                "container already created in this run"
            );
            return Ok(Resolution::Existing(existing.clone()));
        }

        let uri = minter.mint(RecordKind::Resource);
        let record = ContainerRecord {
            uri: uri.clone(),
            identifier: key,
            title: row.title.clone(),
            level: Level::Collection,
            extents: format_extent(row, Some(ExtentPortion::Whole))
                .into_iter()
                .collect(),
            dates: format_date(row.date.as_deref()).into_iter().collect(),
            user_defined: UserDefined {
                integer_2: row.ud_int_2.clone(),
            },
            language: self.language.clone(),
        };
        tracing::info!(
            row = row_number,
            key = %canonical,
            uri = %uri,
            "created container"
        );
        self.created.insert(canonical, uri);
        Ok(Resolution::Created(record))
    }

    fn find_existing(
        &self,
        row_number: usize,
        key: &IdentifierKey,
    ) -> Result<Option<RecordRef>, ConvertError> {
        match self.lookup.find_container(key) {
            Ok(found) => Ok(found),
            Err(err) if self.strict_lookup => Err(ConvertError::Lookup {
                row: row_number,
                message: format!("{err:#}"),
            }),
            Err(err) => {
                tracing::warn!(
                    row = row_number,
                    key = %key,
                    error = %format!("{err:#}"),
                    "container lookup failed, treating as not found"
                );
                Ok(None)
            }
        }
    }
}
