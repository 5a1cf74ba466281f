use crate::data::RowId;
use thiserror::Error;

/// Errors that can occur while loading the flow source table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open source table '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse source table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Source table is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Invalid '# Messages' value '{value}' on line {line}: expected a number")]
    InvalidMessageCount { line: u64, value: String },
}

/// Errors raised when the flow selection refers to rows outside the active system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No system has been chosen yet")]
    NoSystem,

    #[error("Unknown system '{0}'")]
    UnknownSystem(String),

    #[error("Row {row} does not belong to system '{system}'")]
    NotInSystem { row: RowId, system: String },

    #[error("Row {0} is not part of the current selection")]
    NotSelected(RowId),
}

/// Errors raised when a flow parameter falls outside its allowed bounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Executions per hour must be between {min} and {max}, got {value}")]
    ExecutionsPerHourOutOfRange { value: u64, min: u64, max: u64 },

    #[error("Executions per hour can only be set on a scheduled flow")]
    NotScheduled,

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Errors that can occur while reading or applying a scenario file.
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}
