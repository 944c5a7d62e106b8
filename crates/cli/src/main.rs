//! `capacal` command-line entry point
//!
//! Command output goes to stdout; logs go to stderr.

#![allow(clippy::print_stdout)]

mod output;

use std::path::PathBuf;

use anyhow::Context;
use capacal_core::{AvailabilityService, ConsultantSource, ProjectSource};
use capacal_infra::{config, HaloConnector};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "capacal")]
#[command(about = "Consultant availability calendar from HaloPSA projects")]
struct Cli {
    /// Config file (TOML or JSON); standard locations are probed otherwise
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show capacity, booked and available hours for each business day
    Month {
        /// Year, defaults to the current one
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12, defaults to the current one
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Calendar settings file (included consultants, threshold, holidays)
        #[arg(long, env = "CAPACAL_SETTINGS")]
        settings: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// List normalized consultants
    Consultants {
        #[arg(long)]
        json: bool,
    },
    /// List normalized projects
    Projects {
        #[arg(long)]
        json: bool,
    },
}

/// Initialize tracing on stderr so stdout carries only command output
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "capacal=info,capacal_infra=info".into()),
    );

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = config::load(cli.config).context("failed to load configuration")?;
    let connector = HaloConnector::from_config(&config)?;

    match cli.command {
        Commands::Month { year, month, settings, json } => {
            let today = chrono::Local::now().date_naive();
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());

            let settings = config::load_settings(settings.as_deref())
                .context("failed to load calendar settings")?;
            let service = AvailabilityService::new(
                connector.consultant_source(),
                connector.project_source(),
                config.calendar.default_hours_per_day,
            );

            tracing::info!(year, month, "Computing month view");
            let view = service
                .month_view(year, month, &settings)
                .await
                .context("failed to load data from HaloPSA")?;
            println!("{}", output::format_month(&view, json));
        }
        Commands::Consultants { json } => {
            let consultants = connector
                .consultant_source()
                .consultants()
                .await
                .context("failed to load consultants")?;
            println!(
                "{}",
                output::format_consultants(&consultants, config.calendar.default_hours_per_day, json)
            );
        }
        Commands::Projects { json } => {
            let projects =
                connector.project_source().projects().await.context("failed to load projects")?;
            println!("{}", output::format_projects(&projects, json));
        }
    }

    Ok(())
}
