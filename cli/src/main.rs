//! Skylog CLI
//!
//! Command-line interface for recording weather observations and querying them
//! straight from `ClickHouse`.
//!
//! # Usage
//!
//! ```bash
//! skylog --help
//! skylog record --temperature 21.5 --humidity 48 --pressure 1013.2
//! skylog list --field humidity --start-date 2025-01-02 --end-date 2025-01-02
//! skylog metrics --field temperature
//! skylog fields
//! ```

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use shared::chrono::{DateTime, Utc};
use shared::models::{field_catalogue, FieldInfo, Observation};
use shared::query::{compute_metrics, list_measurements, FilterParams};
use shared::storage::{ClickHouseObservationStore, ObservationStore};
use std::sync::Arc;

/// Skylog CLI - weather observation recorder and query tool
#[derive(Parser)]
#[command(name = "skylog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    db: DbArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// `ClickHouse` connection options.
#[derive(Args, Debug)]
struct DbArgs {
    /// `ClickHouse` HTTP URL
    #[arg(long, env = "SKYLOG_DB_URL", default_value = "http://localhost:8123")]
    db_url: String,

    /// Database name
    #[arg(long, env = "SKYLOG_DB_NAME", default_value = "skylog")]
    db_name: String,

    /// Database user
    #[arg(long, env = "SKYLOG_DB_USER", default_value = "skylog")]
    db_user: String,

    /// Database password
    #[arg(
        long,
        env = "SKYLOG_DB_PASSWORD",
        default_value = "skylog_dev",
        hide_env_values = true
    )]
    db_password: String,
}

impl DbArgs {
    fn client(&self) -> clickhouse::Client {
        clickhouse::Client::default()
            .with_url(&self.db_url)
            .with_database(&self.db_name)
            .with_user(&self.db_user)
            .with_password(&self.db_password)
    }
}

/// Optional date range shared by the query commands.
#[derive(Args, Debug, Default)]
struct RangeArgs {
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record one observation
    Record {
        /// Temperature in °C
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,

        /// Relative humidity in %
        #[arg(long)]
        humidity: f64,

        /// Atmospheric pressure in hPa
        #[arg(long)]
        pressure: f64,

        /// Observation time (RFC 3339); defaults to now
        #[arg(long)]
        timestamp: Option<DateTime<Utc>>,
    },
    /// List observations, optionally projected onto one field
    List {
        /// Field to project onto
        #[arg(long)]
        field: Option<String>,

        #[command(flatten)]
        range: RangeArgs,
    },
    /// Summary statistics for one field
    Metrics {
        /// Field to summarize
        #[arg(long)]
        field: String,

        #[command(flatten)]
        range: RangeArgs,
    },
    /// Show the field catalogue
    Fields,
}

#[derive(Serialize)]
struct FieldsOutput {
    fields: Vec<FieldInfo>,
}

fn filter_params(field: Option<String>, range: RangeArgs) -> FilterParams {
    FilterParams {
        field,
        start_date: range.start_date,
        end_date: range.end_date,
    }
}

fn build_observation(
    temperature: f64,
    humidity: f64,
    pressure: f64,
    timestamp: Option<DateTime<Utc>>,
) -> Result<Observation> {
    let observation = Observation::new(
        timestamp.unwrap_or_else(Utc::now),
        temperature,
        humidity,
        pressure,
    );
    observation
        .validate_observation()
        .context("rejected observation")?;
    Ok(observation)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn connect(db: &DbArgs) -> ClickHouseObservationStore {
    ClickHouseObservationStore::new(Arc::new(db.client()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Record {
            temperature,
            humidity,
            pressure,
            timestamp,
        }) => {
            let observation = build_observation(temperature, humidity, pressure, timestamp)?;
            let store = connect(&cli.db);
            store.ensure_schema().with_context(|| {
                format!("failed to prepare observations table at {}", cli.db.db_url)
            })?;
            store
                .insert(observation.clone())
                .context("failed to store observation")?;
            tracing::info!(timestamp = %observation.timestamp, "Observation recorded");
            print_json(&observation)?;
        }
        Some(Commands::List { field, range }) => {
            let store = connect(&cli.db);
            let rows = list_measurements(&store, &filter_params(field, range))?;
            print_json(&rows)?;
        }
        Some(Commands::Metrics { field, range }) => {
            let store = connect(&cli.db);
            let metrics = compute_metrics(&store, &filter_params(Some(field), range))?;
            print_json(&metrics)?;
        }
        Some(Commands::Fields) => {
            print_json(&FieldsOutput {
                fields: field_catalogue(),
            })?;
        }
        None => {
            println!("Skylog CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
