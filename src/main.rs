use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;
use uf_quote::args::{Args, Command};
use uf_quote::{AppConfig, commands};

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_logger(args.common().log_level().unwrap_or("info"));
            error!("Exiting with error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let log_level = args.common().log_level().unwrap_or(&config.log_level).to_string();
    init_logger(&log_level);
    debug!("Log level set to {log_level}");

    match main_inner(args, config) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn main_inner(args: Args, config: AppConfig) -> anyhow::Result<String> {
    trace!("{args:?}");
    match args.command() {
        Command::Catalog(catalog_args) => commands::catalog(catalog_args, &config),
        Command::Quote(quote_args) => commands::quote(quote_args, &config),
    }
}

/// Initializes the tracing subscriber.
fn init_logger(level: &str) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use the configured level for this crate only.
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
