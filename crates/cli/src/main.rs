//! Dispatch CLI - demo seeding and report inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed an in-memory demo dataset and print the dashboard statistics
//! dispatch-cli demo stats
//!
//! # Same dataset, rolling-window performance report
//! dispatch-cli demo performance --period quarter
//!
//! # Control the dataset size
//! dispatch-cli demo stats --clients 8 --deliveries 200
//! ```
//!
//! # Commands
//!
//! - `demo stats` - seed and print statistics
//! - `demo performance` - seed and print a performance report
//!
//! Dataset sizes default from `DISPATCH_SEED_CLIENTS` /
//! `DISPATCH_SEED_DELIVERIES` (see [`config`]); flags win over env.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "dispatch-cli")]
#[command(author, version, about = "Dispatch CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a demo dataset and print a report
    Demo {
        #[command(subcommand)]
        report: DemoReport,
    },
}

#[derive(Subcommand)]
enum DemoReport {
    /// Dashboard statistics (per-status and per-client breakdowns)
    Stats {
        /// Number of clients to seed
        #[arg(long)]
        clients: Option<usize>,

        /// Number of deliveries to seed
        #[arg(long)]
        deliveries: Option<usize>,
    },
    /// Rolling-window performance report
    Performance {
        /// Number of clients to seed
        #[arg(long)]
        clients: Option<usize>,

        /// Number of deliveries to seed
        #[arg(long)]
        deliveries: Option<usize>,

        /// Window length (`week`, `month`, `quarter`, `semester`, `year`)
        #[arg(long, default_value = "month")]
        period: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Demo { report } => match report {
            DemoReport::Stats {
                clients,
                deliveries,
            } => commands::demo::stats(clients, deliveries)?,
            DemoReport::Performance {
                clients,
                deliveries,
                period,
            } => commands::demo::performance(clients, deliveries, &period)?,
        },
    }
    Ok(())
}
