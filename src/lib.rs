pub mod adapters;
pub mod channels;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod interpolate;
pub mod reactions;
pub mod types;
pub mod upload;

pub use config::Config;
pub use error::{ResourceError, Result};

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout is reserved for the JSON response.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}

/// Prints a fatal error the way every command reports it and yields exit
/// code 1.
pub fn fatal(err: &dyn std::fmt::Display) -> ExitCode {
    eprintln!("Error {err}");
    ExitCode::from(1)
}

/// Parses the command line. Usage errors exit 1; `--help` and `--version`
/// exit 0.
pub fn parse_cli<T: Parser>() -> std::result::Result<T, ExitCode> {
    T::try_parse().map_err(|err| {
        let _ = err.print();
        if err.use_stderr() {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    })
}
