//! Command-line interface for reading Comprobante payloads.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::response::{Respuesta, SolicitudXml, responder, responder_json};
use crate::xml::encode_payload;

/// Exit status when the payload was answered with a 400.
const EXIT_REJECTED: u8 = 2;

/// Errors that stop the CLI before a response is produced.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Lector XML - validate Base64-encoded CFDI Comprobantes.
#[derive(Parser)]
#[command(name = "lector-xml")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode, parse, and validate a payload; print the JSON response.
    Read {
        /// Base64 payload (default: read from --file or stdin)
        payload: Option<String>,

        /// Read the input from a file instead
        #[arg(short, long, conflicts_with = "payload")]
        file: Option<PathBuf>,

        /// Treat the input as a JSON request body (`{"xml": "..."}`)
        #[arg(short, long)]
        request: bool,

        /// Print the response on a single line
        #[arg(short, long)]
        compact: bool,
    },

    /// Print the Base64 payload of an XML file.
    Encode {
        /// XML file to encode
        xml_file: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Read {
            payload,
            file,
            request,
            compact,
        } => read_command(payload, file.as_deref(), request, compact),
        Commands::Encode { xml_file } => encode_command(&xml_file),
    }
}

/// Execute the read command.
fn read_command(
    payload: Option<String>,
    file: Option<&Path>,
    request: bool,
    compact: bool,
) -> Result<ExitCode> {
    let input = match (payload, file) {
        (Some(payload), _) => payload,
        (None, Some(path)) => read_file(path)?,
        (None, None) => read_stdin()?,
    };
    tracing::debug!(bytes = input.len(), request, "read input");

    let respuesta = if request {
        responder_json(&input)
    } else {
        responder(&SolicitudXml { xml: input })
    };

    println!("{}", render(&respuesta, compact)?);
    Ok(if respuesta.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_REJECTED)
    })
}

/// Execute the encode command.
fn encode_command(xml_file: &Path) -> Result<ExitCode> {
    let xml = read_file(xml_file)?;
    println!("{}", encode_payload(&xml));
    Ok(ExitCode::SUCCESS)
}

fn render(respuesta: &Respuesta, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(&respuesta.body)?
    } else {
        serde_json::to_string_pretty(&respuesta.body)?
    };
    Ok(rendered)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(CliError::Stdin)?;
    Ok(input)
}
