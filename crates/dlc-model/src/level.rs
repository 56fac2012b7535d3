//! Hierarchical levels recognized in a DLC export.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five fixed depths of the DLC hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Collection,
    Class,
    Series,
    File,
    Item,
}

/// Spreadsheet label → level. Matching is exact.
const LEVEL_LABELS: [(&str, Level); 5] = [
    ("Collection", Level::Collection),
    ("Class", Level::Class),
    ("Series", Level::Series),
    ("File", Level::File),
    ("Item", Level::Item),
];

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Collection,
        Level::Class,
        Level::Series,
        Level::File,
        Level::Item,
    ];

    /// Look up a spreadsheet level label.
    ///
    /// Unrecognized labels yield `None`; callers treat such rows as unprocessable
    /// and drop them without raising an error.
    pub fn from_label(label: &str) -> Option<Level> {
        LEVEL_LABELS
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, level)| *level)
    }

    /// The label as it appears in the spreadsheet's level column.
    pub fn label(self) -> &'static str {
        match self {
            Level::Collection => "Collection",
            Level::Class => "Class",
            Level::Series => "Series",
            Level::File => "File",
            Level::Item => "Item",
        }
    }

    /// The lowercase tag written into records.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Collection => "collection",
            Level::Class => "class",
            Level::Series => "series",
            Level::File => "file",
            Level::Item => "item",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_label(s).ok_or_else(|| ModelError::UnknownLevel(s.to_string()))
    }
}
