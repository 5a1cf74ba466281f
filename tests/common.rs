//! Common test utilities for building flow tables and sessions.
use flow_estimator::prelude::*;

/// A small source table in the production export layout.
///
/// Rows 0-2 belong to `ERP`, rows 3-4 to `CRM`. Rows 0 and 1 share the
/// same label on purpose.
#[allow(dead_code)]
pub const SAMPLE_CSV: &str = "\
 System ,Tab,Direction ,Description,# Messages,Owner
ERP,Sales Order,Inbound,Orders from the shop,5,Integration
ERP,Sales Order,Inbound,Orders from the marketplace,2,Integration
ERP,Invoice,Outbound,Invoices to billing,3,Finance
CRM,Customer,Inbound,Customer master,4,Integration
CRM,Customer,Outbound,Credit limits,1.5,Finance
";

#[allow(dead_code)]
pub fn sample_table() -> FlowTable {
    FlowTable::from_reader(SAMPLE_CSV.as_bytes()).unwrap()
}

/// A session on `table` with `system` already chosen.
#[allow(dead_code)]
pub fn session_for<'a>(table: &'a FlowTable, system: &str) -> Session<'a> {
    let mut session = Session::new(table);
    session.choose_system(system).unwrap();
    session
}

/// A one-row table with the given "# Messages" value under system `S`.
#[allow(dead_code)]
pub fn single_flow_table(messages: f64) -> FlowTable {
    let csv = format!(
        "System,Tab,Direction,Description,# Messages\nS,Flow,Inbound,Test flow,{}\n",
        messages
    );
    FlowTable::from_reader(csv.as_bytes()).unwrap()
}
