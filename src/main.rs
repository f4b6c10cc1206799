//! Klinik Import - patient spreadsheet importer
//!
//! Reads Excel/CSV patient lists, maps their columns, normalizes and
//! validates the rows, then submits them to the clinic Patient Service.

mod cli;
mod config;
mod defaults;
mod error;
mod handlers;
mod services;
mod types;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::Config::from_env()?;

    std::fs::create_dir_all(&config.logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.logs_dir, "klinik-import.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // stderr keeps stdout free for the report and the template
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,klinik_import=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    info!("Patient API at {}", config.patient_api_url);

    let result = match cli.command {
        Command::Import { file, profile, dry_run } => {
            handlers::import::handle_import(&config, &file, &profile, dry_run).await
        }
        Command::Template { profile, output } => {
            handlers::template::handle_template(&profile, output.as_deref())
        }
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
