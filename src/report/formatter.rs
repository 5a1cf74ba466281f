use crate::data::{DESCRIPTION_COLUMN, DIRECTION_COLUMN, MESSAGES_COLUMN, RECORD_TYPE_COLUMN};
use crate::estimator::{ComputedRow, Estimate, Severity};
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

/// Shown instead of a results table when nothing is selected.
pub const NO_SELECTION_PROMPT: &str = "Please select at least one flow to begin.";

pub const TOTAL_MESSAGES_LABEL: &str = "Total Messages";

/// Renders estimates as terminal tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFormatter {
    /// Include frequency, rates and volume columns.
    pub detailed: bool,
    /// Emit ANSI colors even when stdout is not a terminal.
    pub force_color: bool,
}

impl ReportFormatter {
    pub fn new(detailed: bool) -> Self {
        Self {
            detailed,
            force_color: false,
        }
    }

    /// Column headers of the results table.
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec![
            RECORD_TYPE_COLUMN,
            DIRECTION_COLUMN,
            DESCRIPTION_COLUMN,
            MESSAGES_COLUMN,
        ];
        if self.detailed {
            headers.extend([
                "Frequency",
                "Executions per Hour",
                "Executions per Month",
                "Monthly Volume",
            ]);
        }
        headers.push(TOTAL_MESSAGES_LABEL);
        headers
    }

    /// Plain-text cells for one row, aligned with [`headers`](Self::headers).
    pub fn row_cells(&self, row: &ComputedRow) -> Vec<String> {
        let mut cells = vec![
            row.record.record_type.clone(),
            row.record.direction.clone(),
            row.record.description.clone(),
            format_number(row.record.messages),
        ];
        if self.detailed {
            cells.extend([
                row.frequency.to_string(),
                group_thousands(row.executions_per_hour as i128),
                group_thousands(row.executions_per_month as i128),
                group_thousands(row.monthly_volume as i128),
            ]);
        }
        cells.push(format_number(row.total_messages));
        cells
    }

    pub fn rows_table(&self, estimate: &Estimate) -> Table {
        let mut table = self.base_table();
        table.set_header(
            self.headers()
                .into_iter()
                .map(|h| Cell::new(h).fg(Color::Cyan)),
        );

        let numeric_from = 3;
        for row in &estimate.rows {
            table.add_row(self.row_cells(row).into_iter().enumerate().map(|(i, text)| {
                let cell = Cell::new(text);
                if i >= numeric_from {
                    cell.set_alignment(CellAlignment::Right)
                } else {
                    cell
                }
            }));
        }
        table
    }

    /// One-line summary of the aggregate, colored by severity.
    pub fn total_table(&self, estimate: &Estimate) -> Table {
        let mut table = self.base_table();
        table.add_row(vec![
            Cell::new(TOTAL_MESSAGES_LABEL),
            Cell::new(format_total(estimate.total))
                .fg(severity_color(estimate.severity()))
                .set_alignment(CellAlignment::Right),
        ]);
        table
    }

    /// Full report text, or the selection prompt when there is nothing to show.
    pub fn render(&self, estimate: Option<&Estimate>) -> String {
        match estimate {
            Some(estimate) => format!(
                "{}\n{}",
                self.rows_table(estimate),
                self.total_table(estimate)
            ),
            None => NO_SELECTION_PROMPT.to_string(),
        }
    }

    fn base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if self.force_color {
            table.enforce_styling();
        }
        table
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Warning => Color::Red,
        Severity::Normal => Color::Green,
    }
}

/// Formats the aggregate total as a whole number with thousands separators.
pub fn format_total(total: f64) -> String {
    group_thousands(total.trunc() as i128)
}

/// Whole numbers get thousands separators; fractional values keep their digits.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        group_thousands(n as i128)
    } else {
        format!("{}", n)
    }
}

pub fn group_thousands(n: i128) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(2440), "2,440");
        assert_eq!(group_thousands(1_000_001), "1,000,001");
        assert_eq!(group_thousands(-12345), "-12,345");
    }

    #[test]
    fn test_format_number_keeps_fractions() {
        assert_eq!(format_number(1940.0), "1,940");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_total(2440.9), "2,440");
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(severity_color(Severity::Normal), Color::Green);
        assert_eq!(severity_color(Severity::Warning), Color::Red);
    }
}
