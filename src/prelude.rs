//! Prelude module for convenient imports
//!
//! Re-exports the types needed to load a table, drive a session and render
//! the result.

// Data loading
pub use crate::data::{DEFAULT_SOURCE_PATH, FlowRecord, FlowTable, RowId};

// Parameter capture and computation
pub use crate::estimator::{
    ComputedRow, Estimate, Estimator, FlowParameters, FrequencyMode, Session, Severity,
};

// Presentation
pub use crate::report::{NO_SELECTION_PROMPT, ReportFormatter};

// Scripted runs
pub use crate::scenario::{Scenario, ScenarioFlow};

// Error types
pub use crate::error::{LoadError, ParameterError, ScenarioError, SelectionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
