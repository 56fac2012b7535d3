//! Import-type registry.

use crate::{ConversionSummary, ConvertError, DlcConverter, RowReader};
use serde::Serialize;
use std::path::PathBuf;

pub const DLC_IMPORT_TYPE: &str = "dlc";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportType {
    pub name: &'static str,
    pub description: &'static str,
}

pub fn import_types() -> Vec<ImportType> {
    vec![ImportType {
        name: DLC_IMPORT_TYPE,
        description: "Digital Library Collections CSV",
    }]
}

pub fn profile() -> &'static str {
    "Convert a DLC CSV export to ArchivesSpace JSONModel records"
}

/// A converter bound to its input file.
pub struct DlcImport {
    input: PathBuf,
    converter: DlcConverter,
}

/// Bind `converter` to `input` if `type_name` names the DLC import type.
pub fn instance_for(
    type_name: &str,
    input: impl Into<PathBuf>,
    converter: DlcConverter,
) -> Option<DlcImport> {
    (type_name == DLC_IMPORT_TYPE).then(|| DlcImport {
        input: input.into(),
        converter,
    })
}

impl DlcImport {
    pub fn into_converter(self) -> DlcConverter {
        self.converter
    }

    /// Read the input file and convert every row.
    pub fn run(&mut self) -> Result<ConversionSummary, ConvertError> {
        let reader = RowReader::from_path(&self.input)?;
        tracing::info!(input = %self.input.display(), "converting DLC export");
        let summary = self.converter.run_reader(reader)?;
        Ok(summary.clone())
    }
}
