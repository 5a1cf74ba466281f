//! Tests for the results table and total line.
mod common;
use common::*;
use flow_estimator::prelude::*;
use flow_estimator::report::{TOTAL_MESSAGES_LABEL, format_total};

fn two_row_estimate(table: &FlowTable) -> Estimate {
    let mut session = session_for(table, "ERP");
    session.set_selection(&[RowId(0), RowId(2)]).unwrap();
    session.set_monthly_volume(RowId(0), 100).unwrap();
    session
        .set_parameters(RowId(2), FlowParameters::scheduled(2, 100).unwrap())
        .unwrap();
    Estimator::compute(&session).unwrap()
}

#[test]
fn test_summary_table_has_five_columns() {
    let formatter = ReportFormatter::new(false);
    assert_eq!(
        formatter.headers(),
        vec!["Record Type", "Direction", "Description", "# Messages", "Total Messages"]
    );
}

#[test]
fn test_detailed_table_adds_parameter_columns() {
    let table = sample_table();
    let estimate = two_row_estimate(&table);
    let formatter = ReportFormatter::new(true);

    assert_eq!(formatter.headers().len(), 9);
    let cells = formatter.row_cells(&estimate.rows[1]);
    assert_eq!(
        cells,
        vec![
            "Invoice",
            "Outbound",
            "Invoices to billing",
            "3",
            "Scheduled",
            "2",
            "1,440",
            "100",
            "1,740"
        ]
    );
}

#[test]
fn test_render_contains_rows_and_total() {
    let table = sample_table();
    let estimate = two_row_estimate(&table);
    let report = ReportFormatter::new(false).render(Some(&estimate));

    assert!(report.contains("Orders from the shop"));
    assert!(report.contains("Invoices to billing"));
    assert!(report.contains(TOTAL_MESSAGES_LABEL));
    assert!(report.contains("2,240"));
    assert!(!report.contains("Owner"));
}

#[test]
fn test_render_without_selection_shows_prompt() {
    let report = ReportFormatter::new(false).render(None);
    assert_eq!(report, NO_SELECTION_PROMPT);
}

#[test]
fn test_total_is_truncated_with_separators() {
    assert_eq!(format_total(2440.0), "2,440");
    assert_eq!(format_total(1_000_001.75), "1,000,001");
}

#[test]
fn test_forced_color_marks_warning_total() {
    let table = single_flow_table(20.0);
    let mut session = session_for(&table, "S");
    session.select(RowId(0)).unwrap();
    session.set_monthly_volume(RowId(0), 60_000).unwrap();
    let estimate = Estimator::compute(&session).unwrap();
    assert_eq!(estimate.severity(), Severity::Warning);

    let formatter = ReportFormatter {
        detailed: false,
        force_color: true,
    };
    let rendered = formatter.total_table(&estimate).to_string();
    assert!(rendered.contains("1,200,000"));
    assert!(rendered.contains('\u{1b}'));
}
