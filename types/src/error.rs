//! Error types for wire enums and message envelopes.

use crate::messages::SessionMessageType;

/// Result alias for envelope decoding.
pub type Result<T> = std::result::Result<T, EnvelopeError>;

/// A string that does not belong to a wire enum's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Errors raised while decoding or building a WebSocket envelope.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// Input text is not JSON.
    #[error("malformed JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Input is JSON `null`.
    #[error("{envelope} cannot be decoded from null")]
    Null { envelope: &'static str },

    /// No variant accepts the input.
    #[error("input matches no {envelope} variant")]
    NoMatch { envelope: &'static str },

    /// More than one variant accepts the input.
    #[error("input matches {matches} {envelope} variants: {}", candidates.join(", "))]
    Ambiguous {
        envelope: &'static str,
        matches: usize,
        candidates: Vec<&'static str>,
    },

    /// The tag selected a variant but its payload does not fit.
    #[error("invalid {message_type} payload: {source}")]
    InvalidPayload {
        message_type: SessionMessageType,
        #[source]
        source: serde_json::Error,
    },

    /// The tag is a valid message type but not one this envelope carries.
    #[error("{message_type} is not a {envelope} message")]
    UnexpectedMessageType {
        envelope: &'static str,
        message_type: SessionMessageType,
    },

    /// Strict decoding found no `MessageType` it could use.
    #[error("{envelope} frame has no usable MessageType")]
    MissingDiscriminator { envelope: &'static str },

    /// A type-erased value is not one of the envelope's message records.
    #[error("{type_name} is not a {envelope} message record")]
    UnsupportedType {
        envelope: &'static str,
        type_name: &'static str,
    },
}

impl EnvelopeError {
    /// Number of variants that matched, when the error is an ambiguity.
    pub fn match_count(&self) -> Option<usize> {
        match self {
            Self::Ambiguous { matches, .. } => Some(*matches),
            Self::NoMatch { .. } => Some(0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let err = EnvelopeError::Ambiguous {
            envelope: "OutboundWebSocketMessage",
            matches: 2,
            candidates: vec!["TimerCreated", "TimerCancelled"],
        };
        assert_eq!(
            err.to_string(),
            "input matches 2 OutboundWebSocketMessage variants: TimerCreated, TimerCancelled"
        );
        assert_eq!(err.match_count(), Some(2));
    }

    #[test]
    fn test_unknown_variant_display() {
        let err = UnknownVariant::new("VideoRange", "UHD");
        assert_eq!(err.to_string(), "unknown VideoRange value: \"UHD\"");
    }
}
