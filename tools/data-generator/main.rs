use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use jobflow::record::{ApplicationRecord, RecordSet, RecordStatus, Status};
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::fs;

const COMPANIES: [&str; 12] = [
    "Acme Corp",
    "Globex",
    "Initech",
    "Umbrella",
    "Hooli",
    "Stark Industries",
    "Wayne Enterprises",
    "Cyberdyne",
    "Soylent",
    "Tyrell",
    "Wonka Industries",
    "Vandelay Imports",
];

const POSITIONS: [&str; 8] = [
    "Software Engineer",
    "Backend Developer",
    "Frontend Developer",
    "Data Engineer",
    "Site Reliability Engineer",
    "Product Engineer",
    "Platform Engineer",
    "Engineering Manager",
];

/// Relative frequency of each status, in `Status::ALL` order.
const STATUS_WEIGHTS: [u32; 5] = [50, 20, 5, 20, 5];

const NOISE_STATUSES: [&str; 3] = ["Ghosted", "On Hold", "applied"];

/// A CLI tool to generate sample application records
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_records.json")]
    output: String,

    /// Number of records to generate
    #[arg(short, long, default_value_t = 40)]
    count: usize,

    /// How many months back application dates may go
    #[arg(long, default_value_t = 6)]
    months: u64,

    /// Share of records given a status outside the known set (0.0 to 1.0)
    #[arg(long, default_value_t = 0.0)]
    noise: f64,

    /// Owner id written to every record
    #[arg(long, default_value = "demo-user")]
    owner: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let mut rng = rand::rng();

    if !(0.0..=1.0).contains(&cli.noise) {
        eprintln!("Error: --noise ({}) must be between 0.0 and 1.0", cli.noise);
        std::process::exit(1);
    }

    println!(
        "Generating {} records over the last {} months...",
        cli.count, cli.months
    );

    let today = Local::now().date_naive();
    let records: Vec<ApplicationRecord> = (1..=cli.count as u64)
        .map(|id| generate_record(&mut rng, id, &cli, today))
        .collect();

    let json_output = RecordSet::new(records).to_json_pretty()?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved records to '{}'",
        cli.output
    );

    Ok(())
}

fn generate_record(rng: &mut ThreadRng, id: u64, cli: &Cli, today: NaiveDate) -> ApplicationRecord {
    let status = if rng.random_bool(cli.noise) {
        let raw = NOISE_STATUSES.choose(rng).copied().unwrap_or("Unknown");
        RecordStatus::Unrecognized(raw.to_string())
    } else {
        RecordStatus::Known(pick_status(rng))
    };

    let days_back = rng.random_range(0..=cli.months.max(1) * 30);
    let date_applied = today.checked_sub_days(Days::new(days_back)).unwrap_or(today);

    let salary = rng
        .random_bool(0.6)
        .then(|| (rng.random_range(60..=180) * 1000) as f64);

    ApplicationRecord {
        id,
        owner_id: cli.owner.clone(),
        company: COMPANIES.choose(rng).copied().unwrap_or_default().to_string(),
        position: POSITIONS.choose(rng).copied().unwrap_or_default().to_string(),
        status,
        date_applied,
        salary,
    }
}

fn pick_status(rng: &mut ThreadRng) -> Status {
    let total: u32 = STATUS_WEIGHTS.iter().sum();
    let mut roll = rng.random_range(0..total);
    for (status, weight) in Status::ALL.into_iter().zip(STATUS_WEIGHTS) {
        if roll < weight {
            return status;
        }
        roll -= weight;
    }
    Status::Applied
}
