//! # Flow Estimator - Monthly Message Volume Calculator
//!
//! **Flow Estimator** estimates how many messages a set of integration flows
//! will exchange per month. Flow definitions come from a fixed CSV table; the
//! user picks one system, selects some of its flows and describes how each
//! one runs.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: [`FlowTable::from_path`](data::FlowTable::from_path) reads the
//!     source table, trims headers and renames `Tab` to `Record Type`.
//! 2.  **Capture**: a [`Session`](estimator::Session) holds the chosen system,
//!     the selected rows and per-row [`FlowParameters`](estimator::FlowParameters).
//! 3.  **Compute**: [`Estimator::compute`](estimator::Estimator::compute)
//!     derives an [`Estimate`](estimator::Estimate) from the session.
//! 4.  **Present**: [`ReportFormatter`](report::ReportFormatter) renders the
//!     rows and a color-coded total.
//!
//! For each selected flow:
//!
//! ```text
//! Total Messages = Monthly Volume × # Messages
//!                + Exec/hour × 24 × 30        (scheduled flows only)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use flow_estimator::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let csv = "System,Tab,Direction,Description,# Messages\n\
//!            ERP,Orders,Inbound,Order import,5\n";
//! let table = FlowTable::from_reader(csv.as_bytes())?;
//!
//! let mut session = Session::new(&table);
//! session.choose_system("ERP")?;
//! session.select(RowId(0))?;
//! session.set_frequency(RowId(0), FrequencyMode::Scheduled)?;
//! session.set_executions_per_hour(RowId(0), 2)?;
//! session.set_monthly_volume(RowId(0), 100)?;
//!
//! let estimate = Estimator::compute(&session).expect("one flow is selected");
//! assert_eq!(estimate.total, 1940.0);
//! assert_eq!(estimate.severity(), Severity::Normal);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod estimator;
pub mod interactive;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod scenario;
