use super::params::{FlowParameters, FrequencyMode};
use super::session::Session;
use crate::data::FlowRecord;
use serde::Serialize;
use tracing::debug;

/// Aggregate totals above this many messages are flagged.
pub const WARNING_THRESHOLD: f64 = 1_000_000.0;

/// How the aggregate total should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Warning,
}

impl Severity {
    /// Judged on the whole-number total that is displayed, so a fractional
    /// remainder never flags a total shown as exactly 1,000,000.
    pub fn for_total(total: f64) -> Self {
        if total.trunc() > WARNING_THRESHOLD {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

/// A selected flow together with its parameters and derived message total.
#[derive(Debug, Clone, Serialize)]
pub struct ComputedRow {
    #[serde(flatten)]
    pub record: FlowRecord,
    pub frequency: FrequencyMode,
    pub executions_per_hour: u64,
    pub executions_per_month: u64,
    pub monthly_volume: u64,
    pub total_messages: f64,
}

impl ComputedRow {
    pub fn new(record: &FlowRecord, params: FlowParameters) -> Self {
        Self {
            record: record.clone(),
            frequency: params.frequency(),
            executions_per_hour: params.executions_per_hour(),
            executions_per_month: params.executions_per_month(),
            monthly_volume: params.monthly_volume,
            total_messages: total_messages(record.messages, &params),
        }
    }
}

/// The result of one compute pass over a session.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    pub system: Option<String>,
    pub rows: Vec<ComputedRow>,
    pub total: f64,
    pub severity: Severity,
}

impl Estimate {
    pub fn from_rows(system: Option<String>, rows: Vec<ComputedRow>) -> Self {
        let total = rows.iter().fold(0.0, |acc, r| acc + r.total_messages);
        Self {
            system,
            rows,
            total,
            severity: Severity::for_total(total),
        }
    }

    /// An estimate with no rows, for callers that always need a value.
    pub fn empty(system: Option<String>) -> Self {
        Self::from_rows(system, Vec::new())
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Messages for one flow: volume times messages per unit, plus one message
/// per execution when the flow is scheduled.
pub fn total_messages(messages: f64, params: &FlowParameters) -> f64 {
    let volume = params.monthly_volume as f64 * messages;
    match params.frequency() {
        FrequencyMode::Scheduled => volume + params.executions_per_month() as f64,
        FrequencyMode::RealTime => volume,
    }
}

/// Derives estimates from session state. Holds no state of its own.
pub struct Estimator;

impl Estimator {
    /// Recomputes every selected row. Returns `None` when nothing is selected.
    pub fn compute(session: &Session<'_>) -> Option<Estimate> {
        if session.selected().is_empty() {
            return None;
        }
        let rows: Vec<ComputedRow> = session
            .selected_flows()
            .map(|(record, params)| ComputedRow::new(record, params))
            .collect();
        let estimate = Estimate::from_rows(session.system().map(str::to_string), rows);
        debug!(
            rows = estimate.rows.len(),
            total = estimate.total,
            severity = ?estimate.severity,
            "Computed estimate"
        );
        Some(estimate)
    }
}
