//! Checkout CLI
//!
//! Prices a single basket against a fixture set and prints the total, or `-1` if the
//! basket is rejected.

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use checkout::{
    fixtures::{Fixture, FixtureError},
    pricing::{ERROR_SENTINEL, price_skus},
    receipt::ReceiptError,
};
use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::{error, warn};
use tracing_subscriber::{
    EnvFilter,
    filter::ParseError,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Price a basket of SKUs", long_about = None)]
struct Cli {
    /// Basket, one character per unit (e.g. "AABCE")
    skus: String,

    /// Fixture set providing the catalog and promotions
    #[arg(short, long, default_value = "standard")]
    fixture: String,

    /// Directory containing fixture sets
    #[arg(long, env = "CHECKOUT_FIXTURES_DIR", default_value = "./fixtures")]
    fixtures_dir: PathBuf,

    /// Print an itemised receipt instead of the bare total
    #[arg(short, long)]
    receipt: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid log level: {0}")]
    LogLevel(#[from] ParseError),

    #[error("failed to initialise logging: {0}")]
    Logging(#[from] TryInitError),

    #[error("failed to load fixtures: {0}")]
    Fixture(#[from] FixtureError),

    #[error("failed to write receipt: {0}")]
    Receipt(#[from] ReceiptError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[expect(clippy::print_stderr, reason = "logging may be what failed to start")]
fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(%err, "checkout failed");
            eprintln!("{err}");

            ExitCode::FAILURE
        }
    }
}

/// Returns whether the basket was accepted.
fn run(cli: &Cli) -> Result<bool, CliError> {
    init_logging(cli)?;

    let catalog = Fixture::from_set_in(&cli.fixtures_dir, &cli.fixture)?.build();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match price_skus(&catalog, &cli.skus) {
        Ok(receipt) if cli.receipt => {
            receipt.write_to(&mut handle, &catalog)?;
            Ok(true)
        }
        Ok(receipt) => {
            writeln!(handle, "{}", receipt.total())?;
            Ok(true)
        }
        Err(err) => {
            warn!(%err, "basket rejected");
            writeln!(handle, "{ERROR_SENTINEL}")?;
            Ok(false)
        }
    }
}

fn log_filter(level: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(level)
}

fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let registry = tracing_subscriber::registry().with(log_filter(&cli.log_level)?);

    match cli.log_format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn log_filter_accepts_levels_and_directives() {
        assert!(log_filter("debug").is_ok());
        assert!(log_filter("checkout=trace,warn").is_ok());
    }

    #[test]
    fn invalid_log_level_is_reported() -> TestResult {
        let Err(error) = log_filter("checkout=loud") else {
            return Err("expected a parse error".into());
        };

        assert!(
            CliError::from(error)
                .to_string()
                .starts_with("invalid log level")
        );

        Ok(())
    }
}
