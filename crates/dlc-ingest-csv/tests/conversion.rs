use anyhow::anyhow;
use dlc_ingest_csv::{
    Column, ConversionSummary, ConvertError, ConverterOptions, DlcConverter, Row, RowOutcome,
    RowReader,
};
use dlc_model::{IdentifierKey, Level, Record, RecordRef};
use dlc_storage::{
    ContainerLookup, ImportConfig, InMemoryContainerStore, MemoryBatch, SequentialRefMinter,
};

fn converter_with(lookup: Box<dyn ContainerLookup>, strict_lookup: bool) -> DlcConverter {
    DlcConverter::new(
        ConverterOptions {
            strict_lookup,
            ..ConverterOptions::default()
        },
        lookup,
        Box::new(SequentialRefMinter::new(12345)),
    )
}

fn converter() -> DlcConverter {
    converter_with(Box::new(InMemoryContainerStore::new()), false)
}

fn collection(id: &str, title: &str) -> Row {
    Row::default()
        .with(Column::Level, "Collection")
        .with(Column::ResourceId, id)
        .with(Column::Title, title)
}

fn node(level: &str, title: &str) -> Row {
    Row::default()
        .with(Column::Level, level)
        .with(Column::Title, title)
}

fn by_title<'a>(records: &'a [Record], title: &str) -> &'a Record {
    records
        .iter()
        .find(|r| r.title() == Some(title))
        .unwrap_or_else(|| panic!("no record titled {title}"))
}

struct FailingLookup;

impl ContainerLookup for FailingLookup {
    fn find_container(&self, _key: &IdentifierKey) -> anyhow::Result<Option<RecordRef>> {
        Err(anyhow!("store offline"))
    }
}

#[test]
fn full_hierarchy_keeps_spreadsheet_order_and_parents() {
    let mut converter = converter();
    converter
        .run_rows(vec![
            collection("MS 0042", "Papers"),
            node("Class", "Correspondence"),
            node("Series", "Outgoing"),
            node("File", "Letters 1990"),
            node("Item", "Letter to the editor"),
        ])
        .unwrap();

    let records = converter.into_records();
    let titles: Vec<_> = records.iter().map(|r| r.title().unwrap()).collect();
    assert_eq!(
        titles,
        vec![
            "Papers",
            "Correspondence",
            "Outgoing",
            "Letters 1990",
            "Letter to the editor"
        ]
    );

    let container = records[0].uri().clone();
    let class = records[1].uri().clone();
    let series = records[2].uri().clone();

    assert_eq!(records[0].parent_ref(), None);
    assert_eq!(records[1].parent_ref(), None);
    assert_eq!(records[2].parent_ref(), Some(&class));
    assert_eq!(records[3].parent_ref(), Some(&series));
    assert_eq!(records[4].parent_ref(), Some(&series));
    for record in &records[1..] {
        assert_eq!(record.as_description().unwrap().resource_ref(), &container);
    }
}

#[test]
fn file_after_series_without_class_parents_to_series() {
    let mut converter = converter();
    converter
        .run_rows(vec![
            collection("MS 1", "Papers"),
            node("Series", "Diaries"),
            node("File", "1950"),
        ])
        .unwrap();

    let records = converter.into_records();
    let series = by_title(&records, "Diaries");
    assert_eq!(series.parent_ref(), None);
    assert_eq!(by_title(&records, "1950").parent_ref(), Some(series.uri()));
}

#[test]
fn file_under_class_only_parents_to_class() {
    let mut converter = converter();
    converter
        .run_rows(vec![
            collection("MS 1", "Papers"),
            node("Class", "Photographs"),
            node("Item", "Portrait"),
        ])
        .unwrap();

    let records = converter.into_records();
    let class = by_title(&records, "Photographs");
    assert_eq!(by_title(&records, "Portrait").parent_ref(), Some(class.uri()));
}

#[test]
fn stale_series_still_wins_after_a_new_class() {
    let mut converter = converter();
    converter
        .run_rows(vec![
            collection("MS 1", "Papers"),
            node("Class", "A"),
            node("Series", "A.1"),
            node("Class", "B"),
            node("File", "Under B"),
        ])
        .unwrap();

    let records = converter.into_records();
    let stale_series = by_title(&records, "A.1");
    assert_eq!(
        by_title(&records, "Under B").parent_ref(),
        Some(stale_series.uri())
    );
}

#[test]
fn repeated_container_rows_emit_one_container() {
    let mut converter = converter();
    let summary = converter
        .run_rows(vec![
            collection("MS 0042", "Papers"),
            node("File", "First"),
            collection("MS  0042", "Papers again"),
            node("File", "Second"),
        ])
        .unwrap()
        .clone();

    assert_eq!(summary.containers_created, 1);
    assert_eq!(summary.containers_reused, 1);

    let records = converter.into_records();
    let containers: Vec<_> = records.iter().filter_map(Record::as_container).collect();
    assert_eq!(containers.len(), 1);
    assert_eq!(records.len(), 3);

    let second = by_title(&records, "Second").as_description().unwrap();
    assert_eq!(second.resource_ref(), &containers[0].uri);
}

#[test]
fn a_new_container_id_switches_context() {
    let mut converter = converter();
    converter
        .run_rows(vec![
            collection("MS 1", "First collection"),
            node("File", "In first"),
            collection("MS 2", "Second collection"),
            node("File", "In second"),
        ])
        .unwrap();

    let records = converter.into_records();
    let second = by_title(&records, "Second collection").uri().clone();
    let file = by_title(&records, "In second").as_description().unwrap();
    assert_eq!(file.resource_ref(), &second);
}

#[test]
fn existing_container_is_referenced_not_recreated() {
    let existing = RecordRef::new("/repositories/12345/resources/8");
    let mut store = InMemoryContainerStore::new();
    store.insert(&IdentifierKey::parse("MS 0042").unwrap(), existing.clone());

    let mut converter = converter_with(Box::new(store), false);
    converter
        .run_rows(vec![collection("MS 0042", "Papers"), node("Class", "Maps")])
        .unwrap();

    assert_eq!(converter.context().collection(), Some(&existing));
    let records = converter.into_records();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].as_description().unwrap().resource_ref(),
        &existing
    );
}

#[test]
fn sparse_item_has_empty_lists_but_links() {
    let mut converter = converter();
    converter
        .run_rows(vec![
            collection("MS 1", "Papers"),
            node("Class", "Objects"),
            Row::default().with(Column::Level, "Item"),
        ])
        .unwrap();

    let records = converter.into_records();
    let item = records[2].as_description().unwrap();
    assert_eq!(item.level, Level::Item);
    assert!(item.dates.is_empty());
    assert!(item.extents.is_empty());
    assert!(item.notes.is_empty());
    assert!(item.parent.is_some());
    assert_eq!(item.resource_ref(), records[0].uri());
}

#[test]
fn blank_and_unknown_rows_are_skipped_silently() {
    let mut converter = converter();
    converter
        .run_rows(vec![
            collection("MS 1", "Papers"),
            node("Class", "Correspondence"),
        ])
        .unwrap();
    let context_before = converter.context().clone();

    let blank = Row::from_cells(["", "  ", "", "\t"]);
    assert_eq!(
        converter.process_row(3, &blank).unwrap(),
        RowOutcome::SkippedBlank
    );
    assert_eq!(
        converter
            .process_row(4, &node("Subseries", "Ignored"))
            .unwrap(),
        RowOutcome::SkippedUnknownLevel
    );
    assert_eq!(converter.context(), &context_before);

    let summary: ConversionSummary = converter.summary().clone();
    assert_eq!(summary.rows_read, 4);
    assert_eq!(summary.rows_skipped_blank, 1);
    assert_eq!(summary.rows_skipped_unknown_level, 1);
    assert_eq!(summary.records_emitted(), 2);
}

#[test]
fn unresolvable_container_aborts_before_later_rows() {
    let mut converter = converter();
    let err = converter
        .run_rows(vec![
            collection("MS 1", "Papers"),
            node("Class", "Before"),
            Row::default().with(Column::Level, "Collection"),
            node("Class", "After"),
        ])
        .unwrap_err();

    assert!(matches!(err, ConvertError::NoResourceDefined { row: 3 }));
    assert_eq!(err.row(), Some(3));
    assert_eq!(converter.summary().rows_read, 3);
    assert!(converter.records().all(|r| r.title() != Some("After")));
}

#[test]
fn overlong_container_id_aborts() {
    let mut converter = converter();
    let err = converter
        .run_rows(vec![collection("A B C D E", "Too many parts")])
        .unwrap_err();
    assert!(matches!(err, ConvertError::InvalidContainerId { row: 1, .. }));
}

#[test]
fn description_before_any_container_aborts() {
    let mut converter = converter();
    let err = converter
        .run_rows(vec![node("File", "Orphan")])
        .unwrap_err();
    assert!(matches!(err, ConvertError::NoResourceDefined { row: 1 }));
}

#[test]
fn lookup_failures_are_not_found_unless_strict() {
    let mut lenient = converter_with(Box::new(FailingLookup), false);
    lenient
        .run_rows(vec![collection("MS 1", "Papers")])
        .unwrap();
    assert_eq!(lenient.summary().containers_created, 1);

    let mut strict = converter_with(Box::new(FailingLookup), true);
    let err = strict
        .run_rows(vec![collection("MS 1", "Papers")])
        .unwrap_err();
    match err {
        ConvertError::Lookup { row, message } => {
            assert_eq!(row, 1);
            assert!(message.contains("store offline"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn misrouted_class_step_keeps_current_class() {
    let mut converter = converter();
    converter
        .run_rows(vec![
            collection("MS 1", "Papers"),
            node("Class", "Correspondence"),
        ])
        .unwrap();
    let class = converter.context().class().cloned();
    let emitted = converter.summary().records_emitted();

    let returned = converter
        .create_class(3, &node("File", "Not a class"))
        .unwrap();
    assert_eq!(returned, class);
    assert_eq!(converter.context().class(), class.as_ref());
    assert_eq!(converter.summary().records_emitted(), emitted);
}

#[test]
fn finish_hands_records_to_batch_in_order() {
    let mut converter = converter();
    converter
        .run_rows(vec![
            collection("MS 1", "Papers"),
            node("Class", "A"),
            node("File", "A.1"),
            node("Class", "B"),
        ])
        .unwrap();

    let mut batch = MemoryBatch::new();
    let summary = converter.finish(&mut batch).unwrap();
    assert_eq!(summary.records_emitted(), 4);

    let titles: Vec<_> = batch.records().iter().map(|r| r.title().unwrap()).collect();
    assert_eq!(titles, vec!["Papers", "A", "A.1", "B"]);
}

#[test]
fn container_row_fields_land_on_the_resource() {
    let mut converter = converter();
    let row = collection("MS 0042 A", "Papers")
        .with(Column::UdInt2, "17")
        .with(Column::Date, "1901")
        .with(Column::ExtentNumber, "2")
        .with(Column::ExtentType, "boxes")
        .with(Column::ExtentPhysicalDetails, "water damage");
    converter.run_rows(vec![row]).unwrap();

    let records = converter.into_records();
    let json = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(json["jsonmodel_type"], "resource");
    assert_eq!(json["id_0"], "MS");
    assert_eq!(json["id_2"], "A");
    assert!(json.get("id_3").is_none());
    assert_eq!(json["user_defined"]["integer_2"], "17");
    assert_eq!(json["dates"][0]["date_type"], "single");
    assert_eq!(json["extents"][0]["portion"], "whole");
    assert_eq!(json["extents"][0]["physical_details"], "water damage");
    assert_eq!(json["language"], "eng");
    assert!(json["uri"]
        .as_str()
        .unwrap()
        .starts_with("/repositories/12345/resources/import_"));
}

#[test]
fn fatal_errors_name_the_export_line() {
    let export = "Collection,MS 1,,,,,Papers\n\n\nFile,,,,,,Letters\nCollection,,,,,,Bad\n";
    let mut converter = converter();
    let err = converter
        .run_reader(RowReader::from_reader(export.as_bytes()))
        .unwrap_err();

    assert!(matches!(err, ConvertError::NoResourceDefined { row: 5 }));
    assert_eq!(converter.summary().rows_read, 3);
}

fn uris_from_config(config: &ImportConfig) -> Vec<String> {
    let mut converter = DlcConverter::from_config(config, Box::new(InMemoryContainerStore::new()));
    converter
        .run_rows(vec![collection("MS 1", "Papers"), node("Class", "A")])
        .unwrap();
    converter
        .into_records()
        .iter()
        .map(|r| r.uri().to_string())
        .collect()
}

#[test]
fn config_selects_how_references_are_minted() {
    let deterministic = ImportConfig {
        repository_id: 9,
        deterministic_refs: true,
        ..ImportConfig::default()
    };
    let first = uris_from_config(&deterministic);
    assert_eq!(first, uris_from_config(&deterministic));
    assert!(first[0].starts_with("/repositories/9/resources/import_"));
    assert!(first[1].starts_with("/repositories/9/archival_objects/import_"));

    let random = ImportConfig::default();
    assert_ne!(uris_from_config(&random), uris_from_config(&random));
}
