//! Tests for loading and normalizing the source table.
mod common;
use common::*;
use flow_estimator::prelude::*;
use std::io::Write;

#[test]
fn test_headers_are_trimmed_and_tab_renamed() {
    let table = sample_table();
    assert_eq!(
        table.columns,
        vec!["System", "Record Type", "Direction", "Description", "# Messages", "Owner"]
    );
}

#[test]
fn test_records_keep_fields_and_passthrough_columns() {
    let table = sample_table();
    assert_eq!(table.len(), 5);

    let first = &table.records[0];
    assert_eq!(first.id, RowId(0));
    assert_eq!(first.system, "ERP");
    assert_eq!(first.record_type, "Sales Order");
    assert_eq!(first.direction, "Inbound");
    assert_eq!(first.description, "Orders from the shop");
    assert_eq!(first.messages, 5.0);
    assert_eq!(first.extra_field("Owner"), Some("Integration"));
    assert_eq!(first.label(), "Sales Order → Inbound");

    assert_eq!(table.records[4].messages, 1.5);
}

#[test]
fn test_systems_are_distinct_in_first_appearance_order() {
    let csv = "System,Tab,Direction,Description,# Messages\n\
               CRM,A,In,d,1\n\
               ERP,B,In,d,1\n\
               ,C,In,d,1\n\
               CRM,D,Out,d,1\n";
    let table = FlowTable::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(table.systems(), vec!["CRM", "ERP"]);
}

#[test]
fn test_filter_preserves_row_identity() {
    let table = sample_table();
    let ids: Vec<RowId> = table.filter_by_system("CRM").map(|r| r.id).collect();
    assert_eq!(ids, vec![RowId(3), RowId(4)]);
    assert_eq!(table.filter_by_system("Unknown").count(), 0);
}

#[test]
fn test_blank_rows_are_skipped_without_shifting_ids() {
    let csv = "System,Tab,Direction,Description,# Messages\n\
               ERP,A,In,d,1\n\
               ,,,,\n\
               ERP,B,Out,d,2\n";
    let table = FlowTable::from_reader(csv.as_bytes()).unwrap();
    let ids: Vec<RowId> = table.records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RowId(0), RowId(2)]);
    assert!(table.get(RowId(1)).is_none());
}

#[test]
fn test_missing_column_fails() {
    let csv = "System,Direction,Description,# Messages\nERP,In,d,1\n";
    let err = FlowTable::from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Record Type"));
    assert!(err.to_string().contains("Record Type"));
}

#[test]
fn test_non_numeric_message_count_fails() {
    let csv = "System,Tab,Direction,Description,# Messages\nERP,A,In,d,many\n";
    let err = FlowTable::from_reader(csv.as_bytes()).unwrap_err();
    match err {
        LoadError::InvalidMessageCount { line, value } => {
            assert_eq!(line, 2);
            assert_eq!(value, "many");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_blank_message_count_fails() {
    let csv = "System,Tab,Direction,Description,# Messages\nERP,A,In,d,\n";
    let err = FlowTable::from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::InvalidMessageCount { .. }));
}

#[test]
fn test_ragged_rows_are_malformed() {
    let csv = "System,Tab,Direction,Description,# Messages\nERP,A,In\n";
    let err = FlowTable::from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::Csv(_)));
}

#[test]
fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

    let table = FlowTable::from_path(file.path()).unwrap();
    assert_eq!(table.len(), 5);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FlowTable::from_path(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}
