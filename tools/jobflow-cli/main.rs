use clap::{Parser, Subcommand};
use jobflow::prelude::*;
use std::fs;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Lays out and renders job-application flow diagrams
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log more detail (repeat for trace output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the flow diagram of a records JSON file
    Render {
        /// Path to the records JSON file (array or {"records": [...]})
        records_path: String,
        /// Where to write the SVG document
        #[arg(short, long, default_value = "flow.svg")]
        output: String,
        /// Also write the computed layout as JSON
        #[arg(long)]
        layout: Option<String>,
        /// Layout configuration JSON; missing keys keep their defaults
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Print headline counts, status distribution and monthly timeline
    Summary {
        /// Path to the records JSON file
        records_path: String,
        /// Print the summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render {
            records_path,
            output,
            layout,
            config,
        } => run_render(&records_path, &output, layout.as_deref(), config.as_deref()),
        Command::Summary { records_path, json } => run_summary(&records_path, json),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("jobflow=debug,info"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_records(records_path: &str) -> RecordSet {
    RecordSet::from_file(records_path).unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn run_render(records_path: &str, output: &str, layout_path: Option<&str>, config_path: Option<&str>) {
    let total_start = Instant::now();

    // --- 1. Configuration ---
    let config = match config_path {
        Some(path) => LayoutConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load layout config: {}", e))),
        None => LayoutConfig::default(),
    };
    let engine = FlowLayoutEngine::new(config)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid layout config: {}", e)));

    // --- 2. Records ---
    let load_start = Instant::now();
    let records = load_records(records_path);
    info!(count = records.len(), path = records_path, "loaded records");
    let load_duration = load_start.elapsed();

    // --- 3. Derivation and Layout ---
    let layout_start = Instant::now();
    let flow = derive_flow(records.records());
    let layout = engine.layout(&flow);
    let layout_duration = layout_start.elapsed();
    debug!(?layout_duration, "layout computed");

    // --- 4. Output ---
    let svg = SvgRenderer::default().render(&layout);
    fs::write(output, svg)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", output, e)));
    println!("Wrote flow diagram to '{}'", output);

    if let Some(path) = layout_path {
        let json = layout
            .to_json_pretty()
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize layout: {}", e)));
        fs::write(path, json)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e)));
        println!("Wrote layout to '{}'", path);
    }

    // --- 5. Summary ---
    if flow.is_empty() {
        println!("No applications to display");
    } else {
        for positioned in &layout.nodes {
            println!(
                "  -> {}: {} (y {:.1}, height {:.1})",
                positioned.node.display_name,
                positioned.node.count,
                positioned.rect.y,
                positioned.rect.height
            );
        }
        if flow.unrecognized > 0 {
            println!(
                "  -> {} record(s) with an unrecognized status are counted in the total only",
                flow.unrecognized
            );
        }
    }

    println!("\n--- Performance Summary ---");
    println!("File Loading:         {:?}", load_duration);
    println!("Layout:               {:?}", layout_duration);
    println!("Total Execution:      {:?}", total_start.elapsed());
}

fn run_summary(records_path: &str, json: bool) {
    let records = load_records(records_path);
    let summary = Summary::from_records(records.records());

    if json {
        let text = serde_json::to_string_pretty(&summary)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize summary: {}", e)));
        println!("{}", text);
        return;
    }

    println!("Total Applications:   {}", summary.total);
    println!("Interviews:           {}", summary.interviews);
    println!("Offers:               {}", summary.offers);
    println!("Pending:              {}", summary.applied);

    if summary.total == 0 {
        println!("\nNo applications yet.");
        return;
    }

    println!("\n--- Status Distribution ---");
    for share in &summary.distribution {
        println!(
            "{:<20} {:>5} ({:.0}%)",
            share.status.as_str(),
            share.count,
            share.percent
        );
    }

    println!("\n--- Applications Over Time ---");
    for month in &summary.timeline {
        println!("{:<20} {:>5}", month.label, month.count);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
