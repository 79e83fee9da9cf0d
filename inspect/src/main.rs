//! jellyfin-inspect command line entry point.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

use jellyfin_inspect::config::{Config, Direction, Overrides};
use jellyfin_inspect::decode::{decode_frames, DecodeOptions};
use jellyfin_inspect::query::{render_query, DtoKind};
use jellyfin_inspect::{open_input, openapi, read_input};

/// Inspect Jellyfin WebSocket frames and DTOs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level or filter directive (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode newline-delimited frames
    Decode {
        /// Input file, stdin when absent or "-"
        file: Option<PathBuf>,

        /// Decode client-to-server frames
        #[arg(long)]
        inbound: bool,

        /// Require a MessageType on every frame
        #[arg(long)]
        strict: bool,

        /// Print frames re-encoded as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a DTO document as a query string
    Query {
        #[arg(long, value_enum)]
        kind: DtoKind,

        /// Render deepObject style under this prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Input file, stdin when absent or "-"
        file: Option<PathBuf>,
    },
    /// Print the OpenAPI component schemas
    Schema,
}

impl Args {
    fn overrides(&self) -> Overrides {
        let (direction, allow_untagged) = match &self.command {
            Command::Decode {
                inbound, strict, ..
            } => (
                inbound.then_some(Direction::Inbound),
                strict.then_some(false),
            ),
            _ => (None, None),
        };
        Overrides {
            direction,
            allow_untagged,
            pretty: self.pretty.then_some(true),
            log_file: self.log_file.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = Config::from_figment(&args.overrides())?;
    let _log_guard = jellyfin_inspect::logging::init(&config)?;
    debug!(?config, "Configuration loaded");

    match args.command {
        Command::Decode { file, json, .. } => {
            let options = DecodeOptions {
                json,
                ..DecodeOptions::from(&config)
            };
            let input = open_input(file.as_deref())?;
            let mut stdout = io::stdout().lock();
            let report = decode_frames(input, &mut stdout, &options)?;
            stdout.flush()?;

            if report.is_clean() {
                Ok(ExitCode::SUCCESS)
            } else {
                error!("{} frame(s) failed to decode", report.failures.len());
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Query { kind, prefix, file } => {
            let document = read_input(file.as_deref())?;
            println!("{}", render_query(kind, &document, prefix.as_deref())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Schema => {
            println!("{}", openapi::components_json(config.pretty)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
