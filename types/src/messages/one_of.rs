//! Decoding a frame into one variant of a closed envelope.
//!
//! A frame with a known `MessageType` decodes straight into that variant.
//! Frames without a usable tag are trial-parsed against every variant in
//! declaration order; exactly one variant must accept the frame.

use std::fmt;

use serde::de::Error as _;
use serde_json::Value;
use tracing::{debug, trace};

use super::frame::{discriminator, fits_frame, Discriminator};
use super::{SessionMessageType, WebSocketMessage};
use crate::error::{EnvelopeError, Result};

/// One variant an envelope may decode into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub name: &'static str,
    pub message_type: SessionMessageType,
    pub carries_data: bool,
}

impl Candidate {
    pub const fn of<M: WebSocketMessage>() -> Self {
        Self {
            name: M::NAME,
            message_type: M::MESSAGE_TYPE,
            carries_data: M::CARRIES_DATA,
        }
    }
}

/// A closed sum of message records.
pub trait Envelope: Sized {
    const NAME: &'static str;

    /// Variants in trial-parse order.
    const CANDIDATES: &'static [Candidate];

    /// Decode `value` as the variant tagged `message_type`, or `None` when
    /// the envelope has no such variant.
    fn decode_as(
        message_type: SessionMessageType,
        value: Value,
    ) -> Option<serde_json::Result<Self>>;
}

/// Apply the single-match rule to a sequence of decode attempts.
///
/// Returns the first successful value when exactly one attempt succeeded,
/// `NoMatch` when none did and `Ambiguous` with the match count otherwise.
pub fn resolve_single<T, E, I>(envelope: &'static str, attempts: I) -> Result<T>
where
    E: fmt::Display,
    I: IntoIterator<Item = (&'static str, std::result::Result<T, E>)>,
{
    let mut first = None;
    let mut matched = Vec::new();

    for (name, attempt) in attempts {
        match attempt {
            Ok(value) => {
                trace!(envelope, candidate = name, "candidate accepted");
                matched.push(name);
                first.get_or_insert(value);
            }
            Err(e) => trace!(envelope, candidate = name, error = %e, "candidate rejected"),
        }
    }

    match first {
        None => Err(EnvelopeError::NoMatch { envelope }),
        Some(value) if matched.len() == 1 => Ok(value),
        Some(_) => Err(EnvelopeError::Ambiguous {
            envelope,
            matches: matched.len(),
            candidates: matched,
        }),
    }
}

/// Decode `value` into `E`, trial-parsing untagged frames when
/// `allow_fallback` is set.
pub fn decode<E: Envelope>(value: Value, allow_fallback: bool) -> Result<E> {
    if value.is_null() {
        return Err(EnvelopeError::Null { envelope: E::NAME });
    }

    match discriminator(&value) {
        Discriminator::Known(message_type) => return decode_tagged(message_type, value),
        Discriminator::Unknown(tag) => {
            debug!(envelope = E::NAME, %tag, "unrecognised MessageType");
        }
        Discriminator::Absent => {}
    }

    if !allow_fallback {
        return Err(EnvelopeError::MissingDiscriminator { envelope: E::NAME });
    }

    debug!(
        envelope = E::NAME,
        candidates = E::CANDIDATES.len(),
        "no usable MessageType, trial-parsing every variant"
    );
    let attempts = E::CANDIDATES
        .iter()
        .map(|candidate| (candidate.name, attempt::<E>(candidate, &value)));
    resolve_single(E::NAME, attempts)
}

fn decode_tagged<E: Envelope>(message_type: SessionMessageType, value: Value) -> Result<E> {
    match E::decode_as(message_type, value) {
        Some(Ok(message)) => Ok(message),
        Some(Err(source)) => Err(EnvelopeError::InvalidPayload {
            message_type,
            source,
        }),
        None => Err(EnvelopeError::UnexpectedMessageType {
            envelope: E::NAME,
            message_type,
        }),
    }
}

fn attempt<E: Envelope>(candidate: &Candidate, value: &Value) -> serde_json::Result<E> {
    if !fits_frame(value, candidate.carries_data) {
        return Err(serde_json::Error::custom(if candidate.carries_data {
            "frame shape requires a Data key and only frame keys"
        } else {
            "frame shape forbids a Data key and allows only frame keys"
        }));
    }
    E::decode_as(candidate.message_type, value.clone())
        .unwrap_or_else(|| Err(serde_json::Error::custom("candidate tag not in envelope")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(name: &'static str, value: u32) -> (&'static str, std::result::Result<u32, String>) {
        (name, Ok(value))
    }

    fn err(name: &'static str) -> (&'static str, std::result::Result<u32, String>) {
        (name, Err("no".to_string()))
    }

    #[test]
    fn test_single_match_wins() {
        let result = resolve_single("Test", vec![err("A"), ok("B", 2), err("C")]);
        assert_eq!(result.unwrap(), 2);
    }

    #[test]
    fn test_no_match() {
        let result = resolve_single("Test", vec![err("A"), err("B")]);
        assert!(matches!(result, Err(EnvelopeError::NoMatch { envelope: "Test" })));

        let empty: Vec<(&'static str, std::result::Result<u32, String>)> = Vec::new();
        assert!(matches!(
            resolve_single("Test", empty),
            Err(EnvelopeError::NoMatch { .. })
        ));
    }

    #[test]
    fn test_two_matches_are_ambiguous() {
        let result = resolve_single("Test", vec![ok("A", 1), err("B"), ok("C", 3)]);
        match result {
            Err(EnvelopeError::Ambiguous {
                matches,
                candidates,
                ..
            }) => {
                assert_eq!(matches, 2);
                assert_eq!(candidates, vec!["A", "C"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }
}
