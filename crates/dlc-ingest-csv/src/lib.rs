//! DLC CSV ingestion
//!
//! Converts a flat Digital Library Collections export into archival records.
//! Each row describes one node of a five-level hierarchy; parents are never named
//! explicitly, they are implied by row order:
//!
//! ```text
//! Collection  MS 0042   Papers of ...        ← container (deduplicated by id)
//! Class                 Correspondence       ← parent: none
//! Series                Outgoing             ← parent: class
//! File                  Letters 1990-1995    ← parent: series (else class)
//! Item                  Letter to ...        ← parent: series (else class)
//! ```
//!
//! Pipeline:
//! - [`RowReader`] normalizes CSV cells into fixed-shape [`Row`]s
//! - [`DlcConverter`] classifies rows, tracks the [`HierarchyContext`] and builds records
//! - records are handed to a [`dlc_storage::RecordBatch`] in spreadsheet order
//!
//! This crate does not validate record content against host business rules.

pub mod container;
pub mod converter;
pub mod error;
pub mod format;
pub mod registry;
pub mod row;
pub mod synthesize;
pub mod tracker;

pub use container::{ContainerResolver, Resolution};
pub use converter::{ConversionSummary, ConverterOptions, DlcConverter, RowOutcome};
pub use error::ConvertError;
pub use format::{format_date, format_extent};
pub use registry::{import_types, instance_for, profile, DlcImport, ImportType, DLC_IMPORT_TYPE};
pub use row::{normalize_cell, Column, Row, RowReader, COLUMN_COUNT};
pub use synthesize::{collect_notes, synthesize};
pub use tracker::{classify, HierarchyContext};
