use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;

/// A CLI tool to generate a sample flow definition table for the estimator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated CSV file to
    #[arg(short, long, default_value = "generated_flows.csv")]
    output: String,

    /// Number of systems to generate
    #[arg(long, default_value_t = 3)]
    systems: usize,

    /// The minimum number of flows per system
    #[arg(long, default_value_t = 2)]
    min: usize,

    /// The maximum number of flows per system
    #[arg(long, default_value_t = 8)]
    max: usize,
}

const SYSTEM_NAMES: &[&str] = &[
    "ERP", "CRM", "WMS", "HCM", "Billing", "Procurement", "Ledger", "Payroll",
];
const RECORD_TYPES: &[&str] = &[
    "Sales Order",
    "Purchase Order",
    "Invoice",
    "Customer",
    "Supplier",
    "Item",
    "Shipment",
    "Employee",
    "Journal",
    "Payment",
];
const DIRECTIONS: &[&str] = &["Inbound", "Outbound"];
const OWNERS: &[&str] = &["Integration", "Finance", "Operations", "HR"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }
    if cli.systems == 0 || cli.systems > SYSTEM_NAMES.len() {
        eprintln!(
            "Error: --systems must be between 1 and {}",
            SYSTEM_NAMES.len()
        );
        std::process::exit(1);
    }

    println!(
        "Generating flow table ({} systems, {} to {} flows each)...",
        cli.systems, cli.min, cli.max
    );

    let mut writer = csv::Writer::from_path(&cli.output)?;
    // Padded headers and the raw `Tab` name mirror the production export.
    writer.write_record([" System", "Tab", "Direction ", "Description", "# Messages", "Owner"])?;

    let mut total_rows = 0;
    for system in &SYSTEM_NAMES[..cli.systems] {
        let count = rng.random_range(cli.min..=cli.max);
        for _ in 0..count {
            writer.write_record(generate_flow(&mut rng, system))?;
        }
        total_rows += count;
        println!("-> Generated {} flow(s) for '{}'.", count, system);
    }
    writer.flush()?;

    println!(
        "Successfully generated {} rows and saved them to '{}'",
        total_rows, cli.output
    );

    Ok(())
}

fn generate_flow(rng: &mut ThreadRng, system: &str) -> Vec<String> {
    let record_type = *RECORD_TYPES.choose(rng).unwrap_or(&"Item");
    let direction = *DIRECTIONS.choose(rng).unwrap_or(&"Inbound");
    let owner = *OWNERS.choose(rng).unwrap_or(&"Integration");
    let messages = rng.random_range(1..=12);
    vec![
        system.to_string(),
        record_type.to_string(),
        direction.to_string(),
        format!("{} {} sync for {}", direction, record_type, system),
        messages.to_string(),
        owner.to_string(),
    ]
}
