//! WebSocket messages exchanged with a Jellyfin server.
//!
//! Every frame is a JSON object with a `MessageType` tag, an optional
//! `MessageId` and, for most message types, a `Data` payload. Each message
//! type is its own record; [`OutboundWebSocketMessage`] and
//! [`InboundWebSocketMessage`] are the closed sums over the two directions.

pub(crate) mod frame;
mod inbound;
pub mod one_of;
mod outbound;

pub use inbound::*;
pub use outbound::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::wire::wire_enum;

wire_enum! {
    /// Every `MessageType` tag, for both directions.
    pub enum SessionMessageType {
        ForceKeepAlive => "ForceKeepAlive",
        GeneralCommand => "GeneralCommand",
        UserDataChanged => "UserDataChanged",
        Sessions => "Sessions",
        Play => "Play",
        SyncPlayCommand => "SyncPlayCommand",
        SyncPlayGroupUpdate => "SyncPlayGroupUpdate",
        Playstate => "Playstate",
        RestartRequired => "RestartRequired",
        ServerShuttingDown => "ServerShuttingDown",
        ServerRestarting => "ServerRestarting",
        LibraryChanged => "LibraryChanged",
        UserDeleted => "UserDeleted",
        UserUpdated => "UserUpdated",
        SeriesTimerCreated => "SeriesTimerCreated",
        TimerCreated => "TimerCreated",
        SeriesTimerCancelled => "SeriesTimerCancelled",
        TimerCancelled => "TimerCancelled",
        RefreshProgress => "RefreshProgress",
        ScheduledTaskEnded => "ScheduledTaskEnded",
        PackageInstallationCancelled => "PackageInstallationCancelled",
        PackageInstallationFailed => "PackageInstallationFailed",
        PackageInstallationCompleted => "PackageInstallationCompleted",
        PackageInstalling => "PackageInstalling",
        PackageUninstalled => "PackageUninstalled",
        ActivityLogEntry => "ActivityLogEntry",
        ScheduledTasksInfo => "ScheduledTasksInfo",
        ActivityLogEntryStart => "ActivityLogEntryStart",
        ActivityLogEntryStop => "ActivityLogEntryStop",
        SessionsStart => "SessionsStart",
        SessionsStop => "SessionsStop",
        ScheduledTasksInfoStart => "ScheduledTasksInfoStart",
        ScheduledTasksInfoStop => "ScheduledTasksInfoStop",
        KeepAlive => "KeepAlive",
    }
}

/// A concrete WebSocket message record.
pub trait WebSocketMessage: Serialize + DeserializeOwned {
    /// Record name, used when reporting decode candidates.
    const NAME: &'static str;

    /// The tag always written as `MessageType`.
    const MESSAGE_TYPE: SessionMessageType;

    /// Whether the frame has a `Data` key.
    const CARRIES_DATA: bool;

    fn message_id(&self) -> Option<Uuid>;
}

/// Declares a message record with its fixed `MessageType`.
///
/// `Name => Tag, data: Type` declares a record with a `Data` payload;
/// `Name => Tag` declares one without.
macro_rules! websocket_message {
    (
        $(#[$meta:meta])*
        $name:ident => $tag:ident, data: $data:ty
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub data: $data,
            pub message_id: Option<::uuid::Uuid>,
        }

        impl $name {
            pub fn new(data: $data) -> Self {
                Self {
                    data,
                    message_id: None,
                }
            }

            pub fn with_message_id(mut self, message_id: ::uuid::Uuid) -> Self {
                self.message_id = Some(message_id);
                self
            }
        }

        impl $crate::messages::WebSocketMessage for $name {
            const NAME: &'static str = stringify!($name);
            const MESSAGE_TYPE: $crate::messages::SessionMessageType =
                $crate::messages::SessionMessageType::$tag;
            const CARRIES_DATA: bool = true;

            fn message_id(&self) -> Option<::uuid::Uuid> {
                self.message_id
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                let frame = $crate::messages::frame::Frame {
                    data: &self.data,
                    message_id: self.message_id,
                    message_type: Some(
                        <Self as $crate::messages::WebSocketMessage>::MESSAGE_TYPE,
                    ),
                };
                ::serde::Serialize::serialize(&frame, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let frame: $crate::messages::frame::Frame<$data> =
                    ::serde::Deserialize::deserialize(deserializer)?;
                $crate::messages::frame::check_message_type::<D::Error>(
                    frame.message_type,
                    <Self as $crate::messages::WebSocketMessage>::MESSAGE_TYPE,
                )?;
                Ok(Self {
                    data: frame.data,
                    message_id: frame.message_id,
                })
            }
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident => $tag:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            pub message_id: Option<::uuid::Uuid>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn with_message_id(mut self, message_id: ::uuid::Uuid) -> Self {
                self.message_id = Some(message_id);
                self
            }
        }

        impl $crate::messages::WebSocketMessage for $name {
            const NAME: &'static str = stringify!($name);
            const MESSAGE_TYPE: $crate::messages::SessionMessageType =
                $crate::messages::SessionMessageType::$tag;
            const CARRIES_DATA: bool = false;

            fn message_id(&self) -> Option<::uuid::Uuid> {
                self.message_id
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                let frame = $crate::messages::frame::EmptyFrame {
                    message_id: self.message_id,
                    message_type: Some(
                        <Self as $crate::messages::WebSocketMessage>::MESSAGE_TYPE,
                    ),
                };
                ::serde::Serialize::serialize(&frame, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let frame: $crate::messages::frame::EmptyFrame =
                    ::serde::Deserialize::deserialize(deserializer)?;
                $crate::messages::frame::check_message_type::<D::Error>(
                    frame.message_type,
                    <Self as $crate::messages::WebSocketMessage>::MESSAGE_TYPE,
                )?;
                Ok(Self {
                    message_id: frame.message_id,
                })
            }
        }
    };
}

/// Declares a closed envelope over message records.
///
/// Generates the enum, tag dispatch for [`one_of`], the `From`/`TryFrom`
/// conversions and transparent serde impls.
macro_rules! websocket_envelope {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($message:ident)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant($message),
            )+
        }

        impl $name {
            /// Tag of the held message.
            pub fn message_type(&self) -> $crate::messages::SessionMessageType {
                match self {
                    $(Self::$variant(_) => {
                        <$message as $crate::messages::WebSocketMessage>::MESSAGE_TYPE
                    })+
                }
            }

            pub fn message_id(&self) -> Option<::uuid::Uuid> {
                match self {
                    $(Self::$variant(message) => message.message_id,)+
                }
            }

            /// Record name of the held message (e.g. "SessionsMessage").
            pub fn variant_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => {
                        <$message as $crate::messages::WebSocketMessage>::NAME
                    })+
                }
            }

            /// Decode, falling back to trial parsing when the tag is missing
            /// or unknown.
            pub fn from_value(value: ::serde_json::Value) -> $crate::error::Result<Self> {
                $crate::messages::one_of::decode(value, true)
            }

            /// Decode by tag only.
            pub fn from_value_strict(value: ::serde_json::Value) -> $crate::error::Result<Self> {
                $crate::messages::one_of::decode(value, false)
            }

            /// Encode the held message exactly as the record itself encodes.
            pub fn to_value(&self) -> ::serde_json::Result<::serde_json::Value> {
                ::serde_json::to_value(self)
            }

            /// Wrap an arbitrary value, which must be one of this envelope's
            /// records (or the envelope itself).
            pub fn try_from_any<T: ::std::any::Any>(value: T) -> $crate::error::Result<Self> {
                let value: Box<dyn ::std::any::Any> = Box::new(value);
                let value = match value.downcast::<Self>() {
                    Ok(envelope) => return Ok(*envelope),
                    Err(value) => value,
                };
                $(
                    let value = match value.downcast::<$message>() {
                        Ok(message) => return Ok(Self::$variant(*message)),
                        Err(value) => value,
                    };
                )+
                drop(value);
                Err($crate::error::EnvelopeError::UnsupportedType {
                    envelope: stringify!($name),
                    type_name: ::std::any::type_name::<T>(),
                })
            }
        }

        impl $crate::messages::one_of::Envelope for $name {
            const NAME: &'static str = stringify!($name);

            const CANDIDATES: &'static [$crate::messages::one_of::Candidate] = &[
                $($crate::messages::one_of::Candidate::of::<$message>(),)+
            ];

            fn decode_as(
                message_type: $crate::messages::SessionMessageType,
                value: ::serde_json::Value,
            ) -> Option<::serde_json::Result<Self>> {
                $(
                    if message_type
                        == <$message as $crate::messages::WebSocketMessage>::MESSAGE_TYPE
                    {
                        return Some(
                            ::serde_json::from_value::<$message>(value).map(Self::$variant),
                        );
                    }
                )+
                None
            }
        }

        $(
            impl From<$message> for $name {
                fn from(message: $message) -> Self {
                    Self::$variant(message)
                }
            }
        )+

        impl TryFrom<::serde_json::Value> for $name {
            type Error = $crate::error::EnvelopeError;

            fn try_from(value: ::serde_json::Value) -> $crate::error::Result<Self> {
                Self::from_value(value)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::EnvelopeError;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                let value: ::serde_json::Value =
                    ::serde_json::from_str(s).map_err($crate::error::EnvelopeError::Malformed)?;
                Self::from_value(value)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                match self {
                    $(
                        Self::$variant(message) => {
                            ::serde::Serialize::serialize(message, serializer)
                        }
                    )+
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value: ::serde_json::Value = ::serde::Deserialize::deserialize(deserializer)?;
                Self::from_value(value).map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

pub(crate) use websocket_envelope;
pub(crate) use websocket_message;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_is_carried_by_exactly_one_direction_except_keep_alive() {
        use one_of::Envelope;

        for tag in SessionMessageType::ALL {
            let outbound = OutboundWebSocketMessage::CANDIDATES
                .iter()
                .filter(|c| c.message_type == *tag)
                .count();
            let inbound = InboundWebSocketMessage::CANDIDATES
                .iter()
                .filter(|c| c.message_type == *tag)
                .count();
            if *tag == SessionMessageType::KeepAlive {
                assert_eq!((outbound, inbound), (1, 1));
            } else {
                assert_eq!(outbound + inbound, 1, "{tag} must belong to one direction");
            }
        }
    }

    #[test]
    fn test_tag_count() {
        assert_eq!(SessionMessageType::ALL.len(), 34);
    }
}
