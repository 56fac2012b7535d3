//! The DLC conversion run.

use crate::{
    classify, synthesize, ContainerResolver, ConvertError, HierarchyContext, Resolution, Row,
    RowReader,
};
use dlc_model::{Level, Record, RecordRef, RefLink};
use dlc_storage::{
    ContainerLookup, ImportConfig, RandomRefMinter, RecordBatch, RefMinter, SequentialRefMinter,
    DEFAULT_LANGUAGE,
};
use serde::Serialize;
use std::collections::VecDeque;
use std::io::Read;

/// Options the conversion core needs from the surrounding configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOptions {
    pub language: String,
    pub strict_lookup: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            strict_lookup: false,
        }
    }
}

impl From<&ImportConfig> for ConverterOptions {
    fn from(config: &ImportConfig) -> Self {
        Self {
            language: config.language.clone(),
            strict_lookup: config.strict_lookup,
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub rows_read: usize,
    pub rows_skipped_blank: usize,
    pub rows_skipped_unknown_level: usize,
    pub containers_created: usize,
    pub containers_reused: usize,
    pub descriptions_created: usize,
}

impl ConversionSummary {
    pub fn records_emitted(&self) -> usize {
        self.containers_created + self.descriptions_created
    }
}

/// What processing one row did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    SkippedBlank,
    SkippedUnknownLevel,
    ContainerCreated(RecordRef),
    ContainerReused(RecordRef),
    Described { level: Level, uri: RecordRef },
    /// A class or series step was handed a row of another level.
    Unchanged,
}

/// Converts DLC rows into records.
///
/// One converter is one run: the hierarchy context and the record list live for
/// as long as the converter does.
pub struct DlcConverter {
    resolver: ContainerResolver,
    minter: Box<dyn RefMinter>,
    context: HierarchyContext,
    /// Newest record first; reversed once when the batch is handed off.
    records: VecDeque<Record>,
    summary: ConversionSummary,
}

impl DlcConverter {
    pub fn new(
        options: ConverterOptions,
        lookup: Box<dyn ContainerLookup>,
        minter: Box<dyn RefMinter>,
    ) -> Self {
        Self {
            resolver: ContainerResolver::new(lookup, options.language, options.strict_lookup),
            minter,
            context: HierarchyContext::new(),
            records: VecDeque::new(),
            summary: ConversionSummary::default(),
        }
    }

    /// Converter minting references for the configured repository.
    ///
    /// References are random hex unless `deterministic_refs` is set.
    pub fn from_config(config: &ImportConfig, lookup: Box<dyn ContainerLookup>) -> Self {
        let minter: Box<dyn RefMinter> = if config.deterministic_refs {
            Box::new(SequentialRefMinter::new(config.repository_id))
        } else {
            Box::new(RandomRefMinter::new(config.repository_id))
        };
        Self::new(ConverterOptions::from(config), lookup, minter)
    }

    pub fn context(&self) -> &HierarchyContext {
        &self.context
    }

    pub fn summary(&self) -> &ConversionSummary {
        &self.summary
    }

    /// Records built so far, in spreadsheet order.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter().rev()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records.into_iter().rev().collect()
    }

    /// Process numbered rows in order, stopping at the first fatal error.
    ///
    /// The number paired with each row is the one fatal errors report.
    pub fn run<I, E>(&mut self, rows: I) -> Result<&ConversionSummary, ConvertError>
    where
        I: IntoIterator<Item = Result<(usize, Row), E>>,
        ConvertError: From<E>,
    {
        for row in rows {
            let (row_number, row) = row?;
            self.process_row(row_number, &row)?;
        }

        tracing::info!(
            rows = self.summary.rows_read,
            containers_created = self.summary.containers_created,
            containers_reused = self.summary.containers_reused,
            descriptions = self.summary.descriptions_created,
            skipped = self.summary.rows_skipped_blank + self.summary.rows_skipped_unknown_level,
            "conversion finished"
        );
        Ok(&self.summary)
    }

    /// Process in-memory rows, numbered from 1.
    pub fn run_rows<I>(&mut self, rows: I) -> Result<&ConversionSummary, ConvertError>
    where
        I: IntoIterator<Item = Row>,
    {
        let numbered = (1usize..).zip(rows).map(Ok::<_, ConvertError>);
        self.run(numbered)
    }

    /// Process a CSV export; errors report file line numbers.
    pub fn run_reader<R: Read>(
        &mut self,
        reader: RowReader<R>,
    ) -> Result<&ConversionSummary, ConvertError> {
        self.run(reader)
    }

    /// Classify one row and apply it to the context and record list.
    pub fn process_row(
        &mut self,
        row_number: usize,
        row: &Row,
    ) -> Result<RowOutcome, ConvertError> {
        self.summary.rows_read += 1;

        if row.is_blank() {
            self.summary.rows_skipped_blank += 1;
            tracing::debug!(row = row_number, "skipping blank row");
            return Ok(RowOutcome::SkippedBlank);
        }

        let Some(level) = classify(row) else {
            self.summary.rows_skipped_unknown_level += 1;
            tracing::warn!(
                row = row_number,
                level = row.level.as_deref().unwrap_or(""),
                "skipping row with unrecognized level"
            );
            return Ok(RowOutcome::SkippedUnknownLevel);
        };
        tracing::debug!(row = row_number, %level, "processing row");

        match level {
            Level::Collection => self.resolve_collection(row_number, row),
            Level::Class => {
                let uri = self.create_class(row_number, row)?;
                Ok(Self::described(level, uri))
            }
            Level::Series => {
                let uri = self.create_series(row_number, row)?;
                Ok(Self::described(level, uri))
            }
            Level::File | Level::Item => {
                let uri = self.describe(row_number, row, level)?;
                Ok(RowOutcome::Described { level, uri })
            }
        }
    }

    fn resolve_collection(
        &mut self,
        row_number: usize,
        row: &Row,
    ) -> Result<RowOutcome, ConvertError> {
        let (uri, outcome) = match self.resolver.resolve(row_number, row, self.minter.as_mut())? {
            Resolution::Existing(uri) => {
                self.summary.containers_reused += 1;
                (uri.clone(), RowOutcome::ContainerReused(uri))
            }
            Resolution::Created(record) => {
                let uri = record.uri.clone();
                self.summary.containers_created += 1;
                self.emit(record.into());
                (uri.clone(), RowOutcome::ContainerCreated(uri))
            }
        };
        self.context.enter(Level::Collection, uri);
        Ok(outcome)
    }

    fn described(level: Level, uri: Option<RecordRef>) -> RowOutcome {
        match uri {
            Some(uri) => RowOutcome::Described { level, uri },
            None => RowOutcome::Unchanged,
        }
    }

    /// Create a class record and make it the current class.
    ///
    /// A row that is not classified as a class changes nothing and yields the
    /// current class.
    pub fn create_class(
        &mut self,
        row_number: usize,
        row: &Row,
    ) -> Result<Option<RecordRef>, ConvertError> {
        if classify(row) != Some(Level::Class) {
            return Ok(self.context.class().cloned());
        }
        let uri = self.describe(row_number, row, Level::Class)?;
        self.context.enter(Level::Class, uri.clone());
        Ok(Some(uri))
    }

    /// Create a series record under the current class and make it the current series.
    ///
    /// A row that is not classified as a series changes nothing and yields the
    /// current series.
    pub fn create_series(
        &mut self,
        row_number: usize,
        row: &Row,
    ) -> Result<Option<RecordRef>, ConvertError> {
        if classify(row) != Some(Level::Series) {
            return Ok(self.context.series().cloned());
        }
        let uri = self.describe(row_number, row, Level::Series)?;
        self.context.enter(Level::Series, uri.clone());
        Ok(Some(uri))
    }

    fn describe(
        &mut self,
        row_number: usize,
        row: &Row,
        level: Level,
    ) -> Result<RecordRef, ConvertError> {
        let resource = self
            .context
            .collection()
            .cloned()
            .ok_or(ConvertError::NoResourceDefined { row: row_number })?;

        let mut record = synthesize(row, level, &resource, self.minter.as_mut());
        record.parent = self.context.parent_for(level).cloned().map(RefLink::from);

        let uri = record.uri.clone();
        self.summary.descriptions_created += 1;
        self.emit(record.into());
        Ok(uri)
    }

    fn emit(&mut self, record: Record) {
        self.records.push_front(record);
    }

    /// Hand every record to `batch` in spreadsheet order.
    pub fn finish(self, batch: &mut dyn RecordBatch) -> Result<ConversionSummary, ConvertError> {
        for record in self.records.into_iter().rev() {
            batch.push(record).map_err(ConvertError::Sink)?;
        }
        Ok(self.summary)
    }
}
