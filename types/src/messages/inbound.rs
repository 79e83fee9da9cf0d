//! Messages a client sends to the server.
//!
//! Besides the keep-alive these are subscriptions: a `*Start` message asks
//! for a periodic feed, the matching `*Stop` message ends it. Start payloads
//! are `"<initial delay ms>,<interval ms>"`.

use super::{websocket_envelope, websocket_message};

websocket_message! {
    ActivityLogEntryStartMessage => ActivityLogEntryStart, data: String
}

websocket_message! {
    ActivityLogEntryStopMessage => ActivityLogEntryStop
}

websocket_message! {
    /// Client keep-alive ping.
    InboundKeepAliveMessage => KeepAlive
}

websocket_message! {
    ScheduledTasksInfoStartMessage => ScheduledTasksInfoStart, data: String
}

websocket_message! {
    ScheduledTasksInfoStopMessage => ScheduledTasksInfoStop
}

websocket_message! {
    SessionsStartMessage => SessionsStart, data: String
}

websocket_message! {
    SessionsStopMessage => SessionsStop
}

websocket_envelope! {
    /// Any message a client sends to the server.
    InboundWebSocketMessage {
        ActivityLogEntryStart(ActivityLogEntryStartMessage),
        ActivityLogEntryStop(ActivityLogEntryStopMessage),
        KeepAlive(InboundKeepAliveMessage),
        ScheduledTasksInfoStart(ScheduledTasksInfoStartMessage),
        ScheduledTasksInfoStop(ScheduledTasksInfoStopMessage),
        SessionsStart(SessionsStartMessage),
        SessionsStop(SessionsStopMessage),
    }
}

/// Parse a `*Start` payload into `(initial delay ms, interval ms)`.
pub fn parse_subscription_timing(data: &str) -> Option<(u64, u64)> {
    let (delay, interval) = data.split_once(',')?;
    Some((delay.trim().parse().ok()?, interval.trim().parse().ok()?))
}

impl InboundWebSocketMessage {
    /// The subscription payload, for `*Start` messages.
    pub fn subscription_data(&self) -> Option<&str> {
        match self {
            Self::ActivityLogEntryStart(m) => Some(&m.data),
            Self::ScheduledTasksInfoStart(m) => Some(&m.data),
            Self::SessionsStart(m) => Some(&m.data),
            _ => None,
        }
    }

    pub fn description(&self) -> String {
        let timing = self.subscription_data().map(|data| {
            parse_subscription_timing(data).map_or_else(
                || format!(" ({data})"),
                |(delay, interval)| format!(" every {interval}ms after {delay}ms"),
            )
        });
        let timing = timing.unwrap_or_default();
        match self {
            Self::ActivityLogEntryStart(_) => format!("Subscribe to activity log{timing}"),
            Self::ActivityLogEntryStop(_) => "Unsubscribe from activity log".to_string(),
            Self::KeepAlive(_) => "Keep-alive".to_string(),
            Self::ScheduledTasksInfoStart(_) => format!("Subscribe to scheduled tasks{timing}"),
            Self::ScheduledTasksInfoStop(_) => "Unsubscribe from scheduled tasks".to_string(),
            Self::SessionsStart(_) => format!("Subscribe to sessions{timing}"),
            Self::SessionsStop(_) => "Unsubscribe from sessions".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnvelopeError;
    use crate::messages::SessionMessageType;
    use serde_json::json;

    #[test]
    fn test_sessions_start() {
        let message = InboundWebSocketMessage::from_value(json!({
            "MessageType": "SessionsStart",
            "Data": "0,1500"
        }))
        .unwrap();

        assert_eq!(message.message_type(), SessionMessageType::SessionsStart);
        assert_eq!(message.subscription_data(), Some("0,1500"));
        assert_eq!(message.description(), "Subscribe to sessions every 1500ms after 0ms");
    }

    #[test]
    fn test_keep_alive_encoding() {
        let message = InboundWebSocketMessage::from(InboundKeepAliveMessage::new());
        assert_eq!(
            serde_json::to_string(&message).unwrap(),
            r#"{"MessageType":"KeepAlive"}"#
        );
    }

    #[test]
    fn test_outbound_tag_is_unexpected() {
        let result =
            InboundWebSocketMessage::from_value(json!({ "MessageType": "Sessions", "Data": [] }));
        assert!(matches!(
            result,
            Err(EnvelopeError::UnexpectedMessageType {
                envelope: "InboundWebSocketMessage",
                message_type: SessionMessageType::Sessions,
            })
        ));
    }

    #[test]
    fn test_untagged_frames() {
        let result = InboundWebSocketMessage::from_value(json!({ "Data": "0,1000" }));
        assert_eq!(result.unwrap_err().match_count(), Some(3));

        let result = InboundWebSocketMessage::from_value(json!({}));
        assert_eq!(result.unwrap_err().match_count(), Some(4));

        let result = InboundWebSocketMessage::from_value(json!({ "Data": 5 }));
        assert!(matches!(result, Err(EnvelopeError::NoMatch { .. })));
    }

    #[test]
    fn test_tagged_payload_shape() {
        // Data-less records ignore extra keys when tagged.
        let message = InboundWebSocketMessage::from_value(json!({
            "MessageType": "SessionsStop",
            "Data": "ignored"
        }))
        .unwrap();
        assert_eq!(message.description(), "Unsubscribe from sessions");

        let result = InboundWebSocketMessage::from_value(json!({ "MessageType": "SessionsStart" }));
        assert!(matches!(result, Err(EnvelopeError::InvalidPayload { .. })));
    }

    #[test]
    fn test_parse_subscription_timing() {
        assert_eq!(parse_subscription_timing("0,1500"), Some((0, 1500)));
        assert_eq!(parse_subscription_timing(" 10 , 20 "), Some((10, 20)));
        assert_eq!(parse_subscription_timing("1500"), None);
        assert_eq!(parse_subscription_timing("a,b"), None);

        let message = InboundWebSocketMessage::from(SessionsStartMessage::new("soon".to_string()));
        assert_eq!(message.description(), "Subscribe to sessions (soon)");
    }

    #[test]
    fn test_try_from_any_rejects_outbound_records() {
        let result =
            InboundWebSocketMessage::try_from_any(crate::messages::OutboundKeepAliveMessage::new());
        assert!(matches!(result, Err(EnvelopeError::UnsupportedType { .. })));

        let message =
            InboundWebSocketMessage::try_from_any(InboundKeepAliveMessage::new()).unwrap();
        assert_eq!(message.variant_name(), "InboundKeepAliveMessage");
    }
}
