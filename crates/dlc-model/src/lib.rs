//! Archival record model for DLC imports
//!
//! A DLC spreadsheet describes one collection as a five-level hierarchy:
//!
//! ```text
//! collection ─► class ─► series ─► file ─► item
//! ```
//!
//! This crate holds the typed shapes that hierarchy is converted into:
//! - [`Level`]: the five recognized depths
//! - [`IdentifierKey`]: the 4-slot composite identifier used to deduplicate containers
//! - [`Record`]: either a [`ContainerRecord`] (the collection) or a [`DescriptionRecord`]
//!
//! Records serialize to the JSON shape the host collection-management system imports
//! (`resource` / `archival_object`).

pub mod error;
pub mod identifier;
pub mod level;
pub mod record;

pub use error::ModelError;
pub use identifier::{IdentifierKey, IDENTIFIER_SLOTS};
pub use level::Level;
pub use record::*;
