//! The JSON frame around every message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::SessionMessageType;

const DATA: &str = "Data";
const MESSAGE_ID: &str = "MessageId";
const MESSAGE_TYPE: &str = "MessageType";

/// Frame of a message with a `Data` payload.
#[derive(Serialize, Deserialize)]
pub(crate) struct Frame<D> {
    #[serde(rename = "Data")]
    pub(crate) data: D,

    #[serde(rename = "MessageId", default, skip_serializing_if = "Option::is_none")]
    pub(crate) message_id: Option<Uuid>,

    #[serde(rename = "MessageType", default, skip_serializing_if = "Option::is_none")]
    pub(crate) message_type: Option<SessionMessageType>,
}

/// Frame of a message without payload.
#[derive(Serialize, Deserialize)]
pub(crate) struct EmptyFrame {
    #[serde(rename = "MessageId", default, skip_serializing_if = "Option::is_none")]
    pub(crate) message_id: Option<Uuid>,

    #[serde(rename = "MessageType", default, skip_serializing_if = "Option::is_none")]
    pub(crate) message_type: Option<SessionMessageType>,
}

/// A record accepts a frame without tag, or with its own tag.
pub(crate) fn check_message_type<E: serde::de::Error>(
    found: Option<SessionMessageType>,
    expected: SessionMessageType,
) -> Result<(), E> {
    match found {
        Some(found) if found != expected => Err(E::custom(format_args!(
            "MessageType {found} does not match {expected}"
        ))),
        _ => Ok(()),
    }
}

/// Where a frame's tag stands.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Discriminator {
    Known(SessionMessageType),
    /// Present but not a tag we know, rendered as found.
    Unknown(String),
    Absent,
}

pub(crate) fn discriminator(value: &Value) -> Discriminator {
    match value.get(MESSAGE_TYPE) {
        Some(Value::String(tag)) => match tag.parse() {
            Ok(tag) => Discriminator::Known(tag),
            Err(_) => Discriminator::Unknown(tag.clone()),
        },
        Some(other) => Discriminator::Unknown(other.to_string()),
        None => Discriminator::Absent,
    }
}

/// Whether `value` has the outer shape of a message frame: an object with
/// no keys beyond the frame keys, and `Data` present exactly when the
/// message carries data.
pub(crate) fn fits_frame(value: &Value, carries_data: bool) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    object
        .keys()
        .all(|key| matches!(key.as_str(), DATA | MESSAGE_ID | MESSAGE_TYPE))
        && object.contains_key(DATA) == carries_data
}
