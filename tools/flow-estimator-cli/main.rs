use clap::Parser;
use flow_estimator::interactive::{InteractiveApp, Prompter};
use flow_estimator::logging::init_logging;
use flow_estimator::prelude::*;
use std::io::{self, Write};
use tracing::info;

/// Estimates monthly message volumes for a selection of integration flows
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flow definition table (CSV)
    #[arg(env = "FLOW_ESTIMATOR_SOURCE", default_value = DEFAULT_SOURCE_PATH)]
    source_path: String,

    /// Run non-interactively from a scenario JSON file
    #[arg(short, long)]
    scenario: Option<String>,

    /// Print the estimate as JSON instead of a table (scenario mode only)
    #[arg(long, requires = "scenario")]
    json: bool,

    /// Show frequency, execution and volume columns in the results table
    #[arg(short, long)]
    detailed: bool,

    /// List the systems and flows of the source table and exit
    #[arg(short, long, conflicts_with = "scenario")]
    list: bool,

    /// Enable debug logging on stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let table = FlowTable::from_path(&cli.source_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load flow table '{}': {}",
            cli.source_path, e
        ))
    });
    info!(systems = ?table.systems(), "Source table ready");

    if cli.list {
        list_flows(&table);
    } else if let Some(scenario_path) = &cli.scenario {
        run_scenario(&table, scenario_path, &cli);
    } else {
        run_interactive(&table, &cli);
    }
}

/// Prints every system with its flows and row numbers.
fn list_flows(table: &FlowTable) {
    for system in table.systems() {
        println!("{}", system);
        for flow in table.filter_by_system(system) {
            println!(
                "  row {:>4}: {} ({} messages/unit)",
                flow.id.0,
                flow.label(),
                flow.messages
            );
        }
    }
}

fn run_scenario(table: &FlowTable, scenario_path: &str, cli: &Cli) {
    let scenario = Scenario::from_file(scenario_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load scenario '{}': {}",
            scenario_path, e
        ))
    });

    let mut session = Session::new(table);
    scenario
        .apply(&mut session)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to apply scenario: {}", e)));

    let estimate = Estimator::compute(&session);
    if cli.json {
        if estimate.is_none() {
            eprintln!("{}", NO_SELECTION_PROMPT);
        }
        let estimate =
            estimate.unwrap_or_else(|| Estimate::empty(session.system().map(str::to_string)));
        let json = serde_json::to_string_pretty(&estimate)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize estimate: {}", e)));
        println!("{}", json);
    } else {
        println!("{}", ReportFormatter::new(cli.detailed).render(estimate.as_ref()));
    }
}

fn run_interactive(table: &FlowTable, cli: &Cli) {
    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut app = InteractiveApp::new(
        Session::new(table),
        prompter,
        ReportFormatter::new(cli.detailed),
    );
    if let Err(e) = app.run() {
        exit_with_error(&format!("Interactive session failed: {}", e));
    }
    let (_, mut stdout) = app.finish();
    let _ = stdout.flush();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
