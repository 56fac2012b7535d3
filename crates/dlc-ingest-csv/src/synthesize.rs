//! Description record synthesis (class, series, file, item).

use crate::{format_date, format_extent, Row};
use dlc_model::{DescriptionRecord, Level, Note, NoteType, RecordKind, RecordRef};
use dlc_storage::RefMinter;

/// Scope-and-content first, then processing information; each only when present.
pub fn collect_notes(row: &Row) -> Vec<Note> {
    let mut notes = Vec::new();
    if let Some(text) = &row.scopecontent_note {
        notes.push(Note::text(NoteType::ScopeContent, text.clone()));
    }
    if let Some(text) = &row.processinfo_note {
        notes.push(Note::text(NoteType::ProcessInfo, text.clone()));
    }
    notes
}

/// Build a description record for `row` under the container `resource`.
///
/// The record comes back without a parent; the caller attaches one from the
/// hierarchy context.
pub fn synthesize(
    row: &Row,
    level: Level,
    resource: &RecordRef,
    minter: &mut dyn RefMinter,
) -> DescriptionRecord {
    DescriptionRecord {
        uri: minter.mint(RecordKind::ArchivalObject),
        title: row.title.clone(),
        component_id: row.component_id.clone(),
        level,
        dates: format_date(row.date.as_deref()).into_iter().collect(),
        extents: format_extent(row, None).into_iter().collect(),
        notes: collect_notes(row),
        resource: resource.clone().into(),
        parent: None,
    }
}
