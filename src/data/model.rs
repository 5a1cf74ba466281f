use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a record in the loaded source table.
///
/// Rows are addressed by position rather than by label, so two flows with the
/// same Record Type and Direction stay distinguishable. The id is only stable
/// for the lifetime of the table it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub usize);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One message-flow definition from the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub id: RowId,
    pub system: String,
    pub record_type: String,
    pub direction: String,
    pub description: String,
    /// Messages produced per unit of monthly volume.
    pub messages: f64,
    /// Any other columns of the source row, in header order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

impl FlowRecord {
    /// The human-readable label shown in the flow picker.
    pub fn label(&self) -> String {
        format!("{} → {}", self.record_type, self.direction)
    }

    /// The label plus description and row id, unique even when labels repeat.
    pub fn picker_label(&self) -> String {
        if self.description.is_empty() {
            format!("{} {}", self.label(), self.id)
        } else {
            format!("{} ({}) {}", self.label(), self.description, self.id)
        }
    }

    /// Looks up a passthrough column by its normalized header.
    pub fn extra_field(&self, column: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// The immutable, normalized contents of the source table.
#[derive(Debug, Clone, Default)]
pub struct FlowTable {
    /// Normalized column headers, in file order.
    pub columns: Vec<String>,
    pub records: Vec<FlowRecord>,
}

impl FlowTable {
    pub fn new(columns: Vec<String>, records: Vec<FlowRecord>) -> Self {
        Self { columns, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record with the given id, if it exists.
    pub fn get(&self, id: RowId) -> Option<&FlowRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Distinct non-empty System values, in first-appearance order.
    pub fn systems(&self) -> Vec<&str> {
        use itertools::Itertools;

        self.records
            .iter()
            .map(|r| r.system.as_str())
            .filter(|s| !s.is_empty())
            .unique()
            .collect()
    }

    /// All records belonging to `system`, keeping their original row ids.
    pub fn filter_by_system(&self, system: &str) -> impl Iterator<Item = &FlowRecord> {
        self.records.iter().filter(move |r| r.system == system)
    }

    pub fn has_system(&self, system: &str) -> bool {
        !system.is_empty() && self.records.iter().any(|r| r.system == system)
    }
}
