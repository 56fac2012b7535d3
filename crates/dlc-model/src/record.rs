//! Output records and their nested date/extent/note structures.

use crate::{IdentifierKey, Level};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label stamped on every synthesized date.
pub const DATE_LABEL_CREATION: &str = "creation";

/// Expression used when a date cell is present but empty.
pub const NO_DATE_EXPRESSION: &str = "No date provided";

// ============================================================================
// References
// ============================================================================

/// Opaque, globally unique record reference (a host-system URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordRef(String);

impl RecordRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `{ "ref": "<uri>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefLink {
    #[serde(rename = "ref")]
    pub reference: RecordRef,
}

impl From<RecordRef> for RefLink {
    fn from(reference: RecordRef) -> Self {
        Self { reference }
    }
}

/// Which kind of record a freshly minted reference is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Resource,
    ArchivalObject,
}

impl RecordKind {
    /// Path segment used in the record URI.
    pub fn collection_path(self) -> &'static str {
        match self {
            RecordKind::Resource => "resources",
            RecordKind::ArchivalObject => "archival_objects",
        }
    }
}

// ============================================================================
// Sub-structures
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateType {
    Single,
    Inclusive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Date {
    pub date_type: DateType,
    pub label: String,
    pub expression: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtentPortion {
    Whole,
    #[default]
    Part,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub portion: ExtentPortion,
    pub extent_type: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteType {
    #[serde(rename = "scopecontent")]
    ScopeContent,
    #[serde(rename = "processinfo")]
    ProcessInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "jsonmodel_type", rename_all = "snake_case")]
pub enum SubNote {
    NoteText { content: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "jsonmodel_type", rename_all = "snake_case")]
pub enum Note {
    NoteMultipart {
        #[serde(rename = "type")]
        note_type: NoteType,
        subnotes: Vec<SubNote>,
    },
}

impl Note {
    /// A multipart note wrapping a single text subnote.
    pub fn text(note_type: NoteType, content: impl Into<String>) -> Self {
        Note::NoteMultipart {
            note_type,
            subnotes: vec![SubNote::NoteText {
                content: content.into(),
            }],
        }
    }

    pub fn note_type(&self) -> NoteType {
        match self {
            Note::NoteMultipart { note_type, .. } => *note_type,
        }
    }

    /// Text of the first text subnote, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            Note::NoteMultipart { subnotes, .. } => subnotes.iter().find_map(|s| match s {
                SubNote::NoteText { content } => Some(content.as_str()),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDefined {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integer_2: Option<String>,
}

// ============================================================================
// Records
// ============================================================================

/// The top-level container (`resource`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub uri: RecordRef,
    #[serde(flatten)]
    pub identifier: IdentifierKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub level: Level,
    pub extents: Vec<Extent>,
    pub dates: Vec<Date>,
    pub user_defined: UserDefined,
    pub language: String,
}

/// A class, series, file or item (`archival_object`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionRecord {
    pub uri: RecordRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    pub level: Level,
    pub dates: Vec<Date>,
    pub extents: Vec<Extent>,
    pub notes: Vec<Note>,
    pub resource: RefLink,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<RefLink>,
}

impl DescriptionRecord {
    pub fn parent_ref(&self) -> Option<&RecordRef> {
        self.parent.as_ref().map(|p| &p.reference)
    }

    pub fn resource_ref(&self) -> &RecordRef {
        &self.resource.reference
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "jsonmodel_type", rename_all = "snake_case")]
pub enum Record {
    Resource(ContainerRecord),
    ArchivalObject(DescriptionRecord),
}

impl Record {
    pub fn uri(&self) -> &RecordRef {
        match self {
            Record::Resource(r) => &r.uri,
            Record::ArchivalObject(r) => &r.uri,
        }
    }

    pub fn level(&self) -> Level {
        match self {
            Record::Resource(r) => r.level,
            Record::ArchivalObject(r) => r.level,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Record::Resource(r) => r.title.as_deref(),
            Record::ArchivalObject(r) => r.title.as_deref(),
        }
    }

    /// Nearest ancestor; containers have none.
    pub fn parent_ref(&self) -> Option<&RecordRef> {
        match self {
            Record::Resource(_) => None,
            Record::ArchivalObject(r) => r.parent_ref(),
        }
    }

    pub fn as_container(&self) -> Option<&ContainerRecord> {
        match self {
            Record::Resource(r) => Some(r),
            Record::ArchivalObject(_) => None,
        }
    }

    pub fn as_description(&self) -> Option<&DescriptionRecord> {
        match self {
            Record::Resource(_) => None,
            Record::ArchivalObject(r) => Some(r),
        }
    }
}

impl From<ContainerRecord> for Record {
    fn from(r: ContainerRecord) -> Self {
        Record::Resource(r)
    }
}

impl From<DescriptionRecord> for Record {
    fn from(r: DescriptionRecord) -> Self {
        Record::ArchivalObject(r)
    }
}
