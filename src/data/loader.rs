use super::model::{FlowRecord, FlowTable, RowId};
use crate::error::LoadError;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Location of the source table when no other path is configured.
pub const DEFAULT_SOURCE_PATH: &str = "data/NSIP_LOE.csv";

pub const SYSTEM_COLUMN: &str = "System";
pub const RECORD_TYPE_COLUMN: &str = "Record Type";
pub const DIRECTION_COLUMN: &str = "Direction";
pub const DESCRIPTION_COLUMN: &str = "Description";
pub const MESSAGES_COLUMN: &str = "# Messages";

/// Header renames applied after trimming: `(source name, display name)`.
const COLUMN_RENAMES: &[(&str, &str)] = &[("Tab", RECORD_TYPE_COLUMN)];

const REQUIRED_COLUMNS: &[&str] = &[
    SYSTEM_COLUMN,
    RECORD_TYPE_COLUMN,
    DIRECTION_COLUMN,
    DESCRIPTION_COLUMN,
    MESSAGES_COLUMN,
];

/// Trims every header and applies the display renames.
pub fn normalize_headers<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    headers
        .into_iter()
        .map(|h| {
            let trimmed = h.trim();
            COLUMN_RENAMES
                .iter()
                .find(|(from, _)| *from == trimmed)
                .map_or_else(|| trimmed.to_string(), |(_, to)| to.to_string())
        })
        .collect()
}

/// Column positions of the fields every record needs.
struct ColumnIndex {
    system: usize,
    record_type: usize,
    direction: usize,
    description: usize,
    messages: usize,
}

impl ColumnIndex {
    fn resolve(columns: &[String]) -> Result<Self, LoadError> {
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|name| !columns.iter().any(|c| c == *name))
        {
            return Err(LoadError::MissingColumn(missing.to_string()));
        }
        let position = |name: &str| columns.iter().position(|c| c == name).unwrap_or_default();
        Ok(Self {
            system: position(SYSTEM_COLUMN),
            record_type: position(RECORD_TYPE_COLUMN),
            direction: position(DIRECTION_COLUMN),
            description: position(DESCRIPTION_COLUMN),
            messages: position(MESSAGES_COLUMN),
        })
    }

    fn is_known(&self, idx: usize) -> bool {
        [
            self.system,
            self.record_type,
            self.direction,
            self.description,
            self.messages,
        ]
        .contains(&idx)
    }
}

impl FlowTable {
    /// Loads and normalizes the source table at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = table.len(),
            systems = table.systems().len(),
            "Loaded flow table"
        );
        Ok(table)
    }

    /// Loads and normalizes a source table from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let columns = normalize_headers(csv_reader.headers()?.iter());
        let index = ColumnIndex::resolve(&columns)?;

        let mut records = Vec::new();
        for (row, result) in csv_reader.records().enumerate() {
            let raw = result?;
            if raw.iter().all(|cell| cell.trim().is_empty()) {
                warn!(row, "Skipping blank row");
                continue;
            }
            records.push(parse_record(RowId(row), &raw, &columns, &index)?);
        }

        debug!(columns = ?columns, "Normalized headers");
        Ok(Self::new(columns, records))
    }
}

fn parse_record(
    id: RowId,
    raw: &StringRecord,
    columns: &[String],
    index: &ColumnIndex,
) -> Result<FlowRecord, LoadError> {
    let cell = |idx: usize| raw.get(idx).map(str::trim).unwrap_or_default().to_string();

    let messages_raw = cell(index.messages);
    let messages = messages_raw
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .ok_or_else(|| LoadError::InvalidMessageCount {
            line: raw.position().map_or(0, |p| p.line()),
            value: messages_raw.clone(),
        })?;

    let extra = columns
        .iter()
        .enumerate()
        .filter(|(idx, _)| !index.is_known(*idx))
        .map(|(idx, name)| (name.clone(), cell(idx)))
        .collect();

    Ok(FlowRecord {
        id,
        system: cell(index.system),
        record_type: cell(index.record_type),
        direction: cell(index.direction),
        description: cell(index.description),
        messages,
        extra,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_headers_trims_and_renames() {
        let headers = normalize_headers(["  System ", "Tab", " Direction", "# Messages  "]);
        assert_eq!(headers, vec!["System", "Record Type", "Direction", "# Messages"]);
    }

    #[test]
    fn test_resolve_reports_first_missing_column() {
        let columns = normalize_headers(["System", "Tab", "Direction", "# Messages"]);
        let err = ColumnIndex::resolve(&columns).err().unwrap();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Description"));
    }
}
