//! Fixed-shape rows of a DLC export.

use crate::ConvertError;
use csv::{ReaderBuilder, StringRecord, Terminator};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of columns in a DLC export.
pub const COLUMN_COUNT: usize = 15;

/// DLC export columns, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Level,
    ResourceId,
    UdInt2,
    ContainerType,
    ContainerIndicator,
    ComponentId,
    Title,
    Date,
    ExtentNumber,
    ExtentType,
    ExtentPhysicalDetails,
    ExtentDimensions,
    ScopeContentNote,
    Creator,
    ProcessInfoNote,
}

impl Column {
    pub const ORDER: [Column; COLUMN_COUNT] = [
        Column::Level,
        Column::ResourceId,
        Column::UdInt2,
        Column::ContainerType,
        Column::ContainerIndicator,
        Column::ComponentId,
        Column::Title,
        Column::Date,
        Column::ExtentNumber,
        Column::ExtentType,
        Column::ExtentPhysicalDetails,
        Column::ExtentDimensions,
        Column::ScopeContentNote,
        Column::Creator,
        Column::ProcessInfoNote,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Level => "level",
            Column::ResourceId => "resource_id",
            Column::UdInt2 => "ud_int_2",
            Column::ContainerType => "container_type",
            Column::ContainerIndicator => "container_indicator",
            Column::ComponentId => "component_id",
            Column::Title => "title",
            Column::Date => "date",
            Column::ExtentNumber => "extent_number",
            Column::ExtentType => "extent_type",
            Column::ExtentPhysicalDetails => "extent_physical_details",
            Column::ExtentDimensions => "extent_dimensions",
            Column::ScopeContentNote => "scopecontent_note",
            Column::Creator => "creator",
            Column::ProcessInfoNote => "processinfo_note",
        }
    }
}

/// Trim a cell; blank cells are absent.
pub fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// One spreadsheet row. Every cell is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub level: Option<String>,
    pub resource_id: Option<String>,
    pub ud_int_2: Option<String>,
    pub container_type: Option<String>,
    pub container_indicator: Option<String>,
    pub component_id: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub extent_number: Option<String>,
    pub extent_type: Option<String>,
    pub extent_physical_details: Option<String>,
    pub extent_dimensions: Option<String>,
    pub scopecontent_note: Option<String>,
    pub creator: Option<String>,
    pub processinfo_note: Option<String>,
}

impl Row {
    /// Build a row by position. Cells past the last column are ignored; missing
    /// trailing cells stay absent.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut row = Row::default();
        for (column, cell) in Column::ORDER.into_iter().zip(cells) {
            *row.slot_mut(column) = normalize_cell(cell.as_ref());
        }
        row
    }

    /// Builder-style setter; the value goes through the same normalization as CSV cells.
    pub fn with(mut self, column: Column, value: &str) -> Self {
        *self.slot_mut(column) = normalize_cell(value);
        self
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        match column {
            Column::Level => self.level.as_deref(),
            Column::ResourceId => self.resource_id.as_deref(),
            Column::UdInt2 => self.ud_int_2.as_deref(),
            Column::ContainerType => self.container_type.as_deref(),
            Column::ContainerIndicator => self.container_indicator.as_deref(),
            Column::ComponentId => self.component_id.as_deref(),
            Column::Title => self.title.as_deref(),
            Column::Date => self.date.as_deref(),
            Column::ExtentNumber => self.extent_number.as_deref(),
            Column::ExtentType => self.extent_type.as_deref(),
            Column::ExtentPhysicalDetails => self.extent_physical_details.as_deref(),
            Column::ExtentDimensions => self.extent_dimensions.as_deref(),
            Column::ScopeContentNote => self.scopecontent_note.as_deref(),
            Column::Creator => self.creator.as_deref(),
            Column::ProcessInfoNote => self.processinfo_note.as_deref(),
        }
    }

    fn slot_mut(&mut self, column: Column) -> &mut Option<String> {
        match column {
            Column::Level => &mut self.level,
            Column::ResourceId => &mut self.resource_id,
            Column::UdInt2 => &mut self.ud_int_2,
            Column::ContainerType => &mut self.container_type,
            Column::ContainerIndicator => &mut self.container_indicator,
            Column::ComponentId => &mut self.component_id,
            Column::Title => &mut self.title,
            Column::Date => &mut self.date,
            Column::ExtentNumber => &mut self.extent_number,
            Column::ExtentType => &mut self.extent_type,
            Column::ExtentPhysicalDetails => &mut self.extent_physical_details,
            Column::ExtentDimensions => &mut self.extent_dimensions,
            Column::ScopeContentNote => &mut self.scopecontent_note,
            Column::Creator => &mut self.creator,
            Column::ProcessInfoNote => &mut self.processinfo_note,
        }
    }

    /// True when every cell is absent.
    pub fn is_blank(&self) -> bool {
        Column::ORDER.iter().all(|c| self.get(*c).is_none())
    }
}

/// Streams [`Row`]s out of a headerless DLC CSV export, each paired with the
/// 1-based file line it starts on.
///
/// Rows may be ragged; a header line, if present, is just a row whose level is not
/// recognized. Empty lines produce no row but still count toward line numbers. Only
/// `\n` ends a record; a trailing `\r` is trimmed with the rest of the last cell.
pub struct RowReader<R> {
    inner: csv::Reader<NewlineIndex<R>>,
    record: StringRecord,
}

/// Pass-through reader that remembers the byte offset of every `\n`.
///
/// The csv reader stamps a record with the position where the previous record
/// ended, before skipping any empty lines, so line numbers are recovered here.
struct NewlineIndex<R> {
    inner: R,
    consumed: u64,
    newlines: Vec<u64>,
}

impl<R: Read> Read for NewlineIndex<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        let base = self.consumed;
        self.newlines.extend(
            buf[..n]
                .iter()
                .enumerate()
                .filter(|(_, b)| **b == b'\n')
                .map(|(i, _)| base + i as u64),
        );
        self.consumed += n as u64;
        Ok(n)
    }
}

impl<R> NewlineIndex<R> {
    /// 1-based line of the first record byte at or after `byte`, skipping empty lines.
    fn record_line(&self, byte: u64) -> usize {
        let mut start = byte;
        let mut before = self.newlines.partition_point(|&offset| offset < start);
        while self.newlines.get(before) == Some(&start) {
            start += 1;
            before += 1;
        }
        before + 1
    }
}

impl RowReader<File> {
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> RowReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let inner = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(NewlineIndex {
                inner: reader,
                consumed: 0,
                newlines: Vec::new(),
            });
        Self {
            inner,
            record: StringRecord::new(),
        }
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<(usize, Row), ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.inner.position().byte();
        match self.inner.read_record(&mut self.record) {
            Ok(true) => {
                let line = self.inner.get_ref().record_line(start);
                Some(Ok((line, Row::from_cells(self.record.iter()))))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}
