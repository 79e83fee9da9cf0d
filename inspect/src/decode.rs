//! Decoding newline-delimited WebSocket frames.

use std::io::{BufRead, Write};
use std::str::Utf8Error;

use anyhow::Context;
use jellyfin_types::{EnvelopeError, InboundWebSocketMessage, OutboundWebSocketMessage};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{Config, Direction};

/// How frames are decoded and printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub direction: Direction,
    /// Trial-parse frames without a usable `MessageType`.
    pub allow_untagged: bool,
    /// Print each frame re-encoded instead of a summary line.
    pub json: bool,
    pub pretty: bool,
}

impl From<&Config> for DecodeOptions {
    fn from(config: &Config) -> Self {
        Self {
            direction: config.direction,
            allow_untagged: config.allow_untagged,
            json: false,
            pretty: config.pretty,
        }
    }
}

/// A frame decoded through either envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedFrame {
    Outbound(OutboundWebSocketMessage),
    Inbound(InboundWebSocketMessage),
}

impl DecodedFrame {
    pub fn message_type(&self) -> jellyfin_types::SessionMessageType {
        match self {
            Self::Outbound(m) => m.message_type(),
            Self::Inbound(m) => m.message_type(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::Outbound(m) => m.description(),
            Self::Inbound(m) => m.description(),
        }
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        match self {
            Self::Outbound(m) => m.to_value(),
            Self::Inbound(m) => m.to_value(),
        }
    }
}

/// Decode one frame of JSON text.
pub fn decode_frame(text: &str, options: &DecodeOptions) -> Result<DecodedFrame, EnvelopeError> {
    let value: Value = serde_json::from_str(text).map_err(EnvelopeError::Malformed)?;
    match (options.direction, options.allow_untagged) {
        (Direction::Outbound, true) => {
            OutboundWebSocketMessage::from_value(value).map(DecodedFrame::Outbound)
        }
        (Direction::Outbound, false) => {
            OutboundWebSocketMessage::from_value_strict(value).map(DecodedFrame::Outbound)
        }
        (Direction::Inbound, true) => {
            InboundWebSocketMessage::from_value(value).map(DecodedFrame::Inbound)
        }
        (Direction::Inbound, false) => {
            InboundWebSocketMessage::from_value_strict(value).map(DecodedFrame::Inbound)
        }
    }
}

/// Why an input line produced no frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("line is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

impl FrameError {
    pub fn envelope(&self) -> Option<&EnvelopeError> {
        match self {
            Self::Envelope(error) => Some(error),
            Self::Encoding(_) => None,
        }
    }
}

/// A frame that failed to decode.
#[derive(Debug)]
pub struct FrameFailure {
    /// 1-based input line.
    pub line: usize,
    pub error: FrameError,
}

#[derive(Debug, Default)]
pub struct DecodeReport {
    pub decoded: usize,
    pub failures: Vec<FrameFailure>,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Decode every non-blank line of `input`, writing one result per frame to
/// `out`. Frame errors are reported and counted; only I/O errors abort.
pub fn decode_frames<R, W>(
    input: R,
    out: &mut W,
    options: &DecodeOptions,
) -> anyhow::Result<DecodeReport>
where
    R: BufRead,
    W: Write,
{
    let mut report = DecodeReport::default();

    for (index, line) in input.split(b'\n').enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_number}"))?;

        let result = std::str::from_utf8(&line)
            .map_err(FrameError::from)
            .map(str::trim)
            .and_then(|text| {
                if text.is_empty() {
                    Ok(None)
                } else {
                    decode_frame(text, options).map(Some).map_err(FrameError::from)
                }
            });

        match result {
            Ok(None) => {}
            Ok(Some(frame)) => {
                debug!(line = line_number, message_type = %frame.message_type(), "decoded frame");
                write_frame(out, line_number, &frame, options)?;
                report.decoded += 1;
            }
            Err(error) => {
                warn!(line = line_number, "{error}");
                writeln!(out, "{line_number}: error: {error}")?;
                report.failures.push(FrameFailure {
                    line: line_number,
                    error,
                });
            }
        }
    }

    info!(
        decoded = report.decoded,
        failed = report.failures.len(),
        "Finished decoding frames"
    );
    Ok(report)
}

fn write_frame<W: Write>(
    out: &mut W,
    line_number: usize,
    frame: &DecodedFrame,
    options: &DecodeOptions,
) -> anyhow::Result<()> {
    if options.json {
        let value = frame.to_value()?;
        let text = if options.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        writeln!(out, "{text}")?;
    } else {
        writeln!(
            out,
            "{line_number}: {}: {}",
            frame.message_type(),
            frame.description()
        )?;
    }
    Ok(())
}
