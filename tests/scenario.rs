//! Tests for scripted, non-interactive runs.
mod common;
use common::*;
use flow_estimator::prelude::*;
use std::io::Write;

const SCENARIO_JSON: &str = r#"{
    "system": "ERP",
    "flows": [
        { "row": 0, "monthly_volume": 100 },
        { "row": 2, "frequency": "scheduled", "executions_per_hour": 2, "monthly_volume": 100 }
    ]
}"#;

#[test]
fn test_scenario_applies_system_selection_and_parameters() {
    let table = sample_table();
    let scenario = Scenario::from_json(SCENARIO_JSON).unwrap();
    assert_eq!(scenario.flows[0].frequency, FrequencyMode::RealTime);

    let mut session = Session::new(&table);
    scenario.apply(&mut session).unwrap();

    assert_eq!(session.system(), Some("ERP"));
    assert_eq!(session.selected(), &[RowId(0), RowId(2)]);
    let estimate = Estimator::compute(&session).unwrap();
    assert_eq!(estimate.total, 2240.0);
}

#[test]
fn test_scheduled_flow_defaults_to_one_execution_per_hour() {
    let flow: ScenarioFlow =
        serde_json::from_str(r#"{ "row": 1, "frequency": "scheduled" }"#).unwrap();
    let params = flow.parameters().unwrap();
    assert_eq!(params.executions_per_hour(), 1);
    assert_eq!(params.executions_per_month(), 720);
}

#[test]
fn test_scenario_rejects_rows_from_other_systems() {
    let table = sample_table();
    let scenario = Scenario::from_json(r#"{ "system": "ERP", "flows": [{ "row": 3 }] }"#).unwrap();
    let err = scenario.apply(&mut Session::new(&table)).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::Selection(SelectionError::NotInSystem { .. })
    ));
}

#[test]
fn test_scenario_rejects_out_of_range_rate() {
    let table = sample_table();
    let scenario = Scenario::from_json(
        r#"{ "system": "ERP", "flows": [{ "row": 0, "frequency": "scheduled", "executions_per_hour": 90 }] }"#,
    )
    .unwrap();
    let err = scenario.apply(&mut Session::new(&table)).unwrap_err();
    assert!(err.to_string().contains("between 1 and 60"));
}

#[test]
fn test_scenario_from_file_and_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCENARIO_JSON.as_bytes()).unwrap();
    let scenario = Scenario::from_file(file.path()).unwrap();
    assert_eq!(scenario.flows.len(), 2);

    assert!(matches!(
        Scenario::from_json("{ not json"),
        Err(ScenarioError::Json(_))
    ));
}

#[test]
fn test_estimate_serializes_to_json() {
    let table = sample_table();
    let mut session = Session::new(&table);
    Scenario::from_json(SCENARIO_JSON)
        .unwrap()
        .apply(&mut session)
        .unwrap();
    let estimate = Estimator::compute(&session).unwrap();

    let json = serde_json::to_value(&estimate).unwrap();
    assert_eq!(json["total"], 2240.0);
    assert_eq!(json["severity"], "normal");
    assert_eq!(json["rows"][1]["frequency"], "scheduled");
    assert_eq!(json["rows"][1]["executions_per_month"], 1440);
    assert_eq!(json["rows"][0]["record_type"], "Sales Order");
}

#[test]
fn test_empty_estimate_serializes_as_object() {
    let table = sample_table();
    let mut session = Session::new(&table);
    Scenario::from_json(r#"{ "system": "CRM", "flows": [] }"#)
        .unwrap()
        .apply(&mut session)
        .unwrap();
    assert!(Estimator::compute(&session).is_none());

    let estimate = Estimate::empty(session.system().map(str::to_string));
    let json = serde_json::to_value(&estimate).unwrap();
    assert!(json.is_object());
    assert_eq!(json["system"], "CRM");
    assert_eq!(json["rows"], serde_json::json!([]));
    assert_eq!(json["total"], 0.0);
    assert_eq!(json["severity"], "normal");
}
