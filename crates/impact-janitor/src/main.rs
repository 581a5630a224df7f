//! Impact Janitor CLI
//!
//! Runs the auto-verify sweep against a SQLite database until Ctrl+C.

use impact_janitor::{JanitorConfig, JanitorError, JanitorWorker};
use impact_store::SqliteStore;
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), JanitorError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        JanitorConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        return Ok(());
    } else {
        eprintln!("Warning: No config file specified, using default configuration");
        eprintln!("Usage: impact-janitor --config <path-to-config.toml>");
        eprintln!();
        JanitorConfig::default()
    };

    tracing::info!(
        database = %config.database_path,
        window_hours = config.auto_verify_after_hours,
        dry_run = config.dry_run,
        "Opening entry store"
    );
    let store = SqliteStore::new(&config.database_path)?;

    JanitorWorker::new(config).run(store).await
}

fn print_help() {
    println!("Impact Janitor - Automatic verification of overdue volunteer hours");
    println!();
    println!("USAGE:");
    println!("    impact-janitor --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    - auto_verify_after_hours: Hours before a pending entry is verified (default: 48)");
    println!("    - sweep_interval_minutes: Minutes between sweeps (default: 15)");
    println!("    - batch_limit: Most entries verified per sweep (default: 500)");
    println!("    - dry_run: Log without writing (default: false)");
    println!("    - database_path: SQLite database file (default: impact.db)");
    println!();
    println!("    Set RUST_LOG to adjust log verbosity (default: info).");
}
