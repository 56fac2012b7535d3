//! Row classification and the running hierarchy context.
//!
//! DLC rows never name their parent. The parent of a row is whatever
//! collection / class / series row was seen most recently:
//!
//! | row level  | updates   | parent                               |
//! |------------|-----------|--------------------------------------|
//! | collection | collection| (none)                               |
//! | class      | class     | (none)                               |
//! | series     | series    | class, if any                        |
//! | file, item | (nothing) | series if any, else class if any     |
//!
//! Slots are never cleared: a new class does not reset the current series.

use crate::Row;
use dlc_model::{Level, RecordRef};

/// Classify a row by its level cell. `None` means the row cannot be processed.
pub fn classify(row: &Row) -> Option<Level> {
    row.level.as_deref().and_then(Level::from_label)
}

/// The most recently seen ancestor of each context-carrying level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyContext {
    collection: Option<RecordRef>,
    class: Option<RecordRef>,
    series: Option<RecordRef>,
}

impl HierarchyContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self) -> Option<&RecordRef> {
        self.collection.as_ref()
    }

    pub fn class(&self) -> Option<&RecordRef> {
        self.class.as_ref()
    }

    pub fn series(&self) -> Option<&RecordRef> {
        self.series.as_ref()
    }

    pub fn get(&self, level: Level) -> Option<&RecordRef> {
        match level {
            Level::Collection => self.collection(),
            Level::Class => self.class(),
            Level::Series => self.series(),
            Level::File | Level::Item => None,
        }
    }

    /// Record that a row of `level` resolved to `reference`.
    ///
    /// Returns the reference it replaced. File and item rows leave the context as is.
    pub fn enter(&mut self, level: Level, reference: RecordRef) -> Option<RecordRef> {
        let slot = match level {
            Level::Collection => &mut self.collection,
            Level::Class => &mut self.class,
            Level::Series => &mut self.series,
            Level::File | Level::Item => return None,
        };
        slot.replace(reference)
    }

    /// Parent for a new record of `level`.
    ///
    /// For files and items the series wins whenever one is set, even if that series
    /// was opened under an earlier class.
    pub fn parent_for(&self, level: Level) -> Option<&RecordRef> {
        match level {
            Level::Collection | Level::Class => None,
            Level::Series => self.class(),
            Level::File | Level::Item => self.series().or(self.class()),
        }
    }
}
