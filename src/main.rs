//! CLI entry point for lector-xml.

use std::process::ExitCode;

use lector_xml::cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // WARN by default, respecting RUST_LOG; stdout carries the response only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
