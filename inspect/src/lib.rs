//! Command line inspector for Jellyfin WebSocket frames and DTOs.
//!
//! The binary is a thin layer over these modules; tests drive them directly.

pub mod config;
pub mod decode;
pub mod logging;
pub mod openapi;
pub mod query;

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Reader over `path`, or stdin when `path` is absent or `-`.
pub fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Whole contents of `path`, or of stdin when `path` is absent or `-`.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    let mut text = String::new();
    open_input(path)?
        .read_to_string(&mut text)
        .context("failed to read input")?;
    Ok(text)
}
