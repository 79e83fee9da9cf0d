//! Messages the server pushes to clients.

use std::collections::BTreeMap;

use uuid::Uuid;

use super::{websocket_envelope, websocket_message};
use crate::playback::{GeneralCommand, PlayRequest, PlaystateRequest};
use crate::session::SessionInfoDto;
use crate::syncplay::{GroupUpdate, SendCommand};
use crate::system::{
    ActivityLogEntry, InstallationInfo, LibraryUpdateInfo, PluginInfo, TaskInfo, TaskResult,
    TimerEventInfo,
};
use crate::user::{UserDataChangeInfo, UserDto};

websocket_message! {
    /// New activity log entries.
    ActivityLogEntryMessage => ActivityLogEntry, data: Vec<ActivityLogEntry>
}

websocket_message! {
    /// Ask the client to send keep-alives; `data` is the timeout in seconds.
    ForceKeepAliveMessage => ForceKeepAlive, data: i32
}

websocket_message! {
    GeneralCommandMessage => GeneralCommand, data: GeneralCommand
}

websocket_message! {
    /// Result of a library scan.
    LibraryChangedMessage => LibraryChanged, data: LibraryUpdateInfo
}

websocket_message! {
    /// Server reply to a client keep-alive.
    OutboundKeepAliveMessage => KeepAlive
}

websocket_message! {
    PlayMessage => Play, data: PlayRequest
}

websocket_message! {
    PlaystateMessage => Playstate, data: PlaystateRequest
}

websocket_message! {
    PluginInstallationCancelledMessage => PackageInstallationCancelled, data: InstallationInfo
}

websocket_message! {
    PluginInstallationCompletedMessage => PackageInstallationCompleted, data: InstallationInfo
}

websocket_message! {
    PluginInstallationFailedMessage => PackageInstallationFailed, data: InstallationInfo
}

websocket_message! {
    PluginInstallingMessage => PackageInstalling, data: InstallationInfo
}

websocket_message! {
    PluginUninstalledMessage => PackageUninstalled, data: PluginInfo
}

websocket_message! {
    /// Progress of a running task; keys are "TaskId" and "Progress".
    RefreshProgressMessage => RefreshProgress, data: BTreeMap<String, String>
}

websocket_message! {
    RestartRequiredMessage => RestartRequired
}

websocket_message! {
    ScheduledTaskEndedMessage => ScheduledTaskEnded, data: TaskResult
}

websocket_message! {
    /// Periodic task list, sent after a `ScheduledTasksInfoStart` subscription.
    ScheduledTasksInfoMessage => ScheduledTasksInfo, data: Vec<TaskInfo>
}

websocket_message! {
    SeriesTimerCancelledMessage => SeriesTimerCancelled, data: TimerEventInfo
}

websocket_message! {
    SeriesTimerCreatedMessage => SeriesTimerCreated, data: TimerEventInfo
}

websocket_message! {
    ServerRestartingMessage => ServerRestarting
}

websocket_message! {
    ServerShuttingDownMessage => ServerShuttingDown
}

websocket_message! {
    /// Periodic session list, sent after a `SessionsStart` subscription.
    SessionsMessage => Sessions, data: Vec<SessionInfoDto>
}

websocket_message! {
    SyncPlayCommandMessage => SyncPlayCommand, data: SendCommand
}

websocket_message! {
    SyncPlayGroupUpdateMessage => SyncPlayGroupUpdate, data: GroupUpdate
}

websocket_message! {
    TimerCancelledMessage => TimerCancelled, data: TimerEventInfo
}

websocket_message! {
    TimerCreatedMessage => TimerCreated, data: TimerEventInfo
}

websocket_message! {
    UserDataChangedMessage => UserDataChanged, data: UserDataChangeInfo
}

websocket_message! {
    /// `data` is the id of the removed user.
    UserDeletedMessage => UserDeleted, data: Uuid
}

websocket_message! {
    UserUpdatedMessage => UserUpdated, data: UserDto
}

websocket_envelope! {
    /// Any message the server sends to a client.
    ///
    /// Serializes as the held record with no wrapper. Decoding dispatches on
    /// `MessageType`; see [`one_of`](super::one_of) for frames without one.
    OutboundWebSocketMessage {
        ActivityLogEntry(ActivityLogEntryMessage),
        ForceKeepAlive(ForceKeepAliveMessage),
        GeneralCommand(GeneralCommandMessage),
        LibraryChanged(LibraryChangedMessage),
        KeepAlive(OutboundKeepAliveMessage),
        Play(PlayMessage),
        Playstate(PlaystateMessage),
        PackageInstallationCancelled(PluginInstallationCancelledMessage),
        PackageInstallationCompleted(PluginInstallationCompletedMessage),
        PackageInstallationFailed(PluginInstallationFailedMessage),
        PackageInstalling(PluginInstallingMessage),
        PackageUninstalled(PluginUninstalledMessage),
        RefreshProgress(RefreshProgressMessage),
        RestartRequired(RestartRequiredMessage),
        ScheduledTaskEnded(ScheduledTaskEndedMessage),
        ScheduledTasksInfo(ScheduledTasksInfoMessage),
        SeriesTimerCancelled(SeriesTimerCancelledMessage),
        SeriesTimerCreated(SeriesTimerCreatedMessage),
        ServerRestarting(ServerRestartingMessage),
        ServerShuttingDown(ServerShuttingDownMessage),
        Sessions(SessionsMessage),
        SyncPlayCommand(SyncPlayCommandMessage),
        SyncPlayGroupUpdate(SyncPlayGroupUpdateMessage),
        TimerCancelled(TimerCancelledMessage),
        TimerCreated(TimerCreatedMessage),
        UserDataChanged(UserDataChangedMessage),
        UserDeleted(UserDeletedMessage),
        UserUpdated(UserUpdatedMessage),
    }
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("<unknown>")
}

impl OutboundWebSocketMessage {
    /// One-line human-readable summary.
    pub fn description(&self) -> String {
        match self {
            Self::ActivityLogEntry(m) => match m.data.as_slice() {
                [entry] => format!("Activity: {}", or_unknown(&entry.name)),
                entries => format!("{} activity log entries", entries.len()),
            },
            Self::ForceKeepAlive(m) => format!("Keep-alive required every {}s", m.data),
            Self::GeneralCommand(m) => match m.data.name {
                Some(name) => format!("General command {name}"),
                None => "General command".to_string(),
            },
            Self::LibraryChanged(m) => {
                format!("Library changed: {} items", m.data.changed_items())
            }
            Self::KeepAlive(_) => "Keep-alive".to_string(),
            Self::Play(m) => {
                let count = m.data.item_ids.as_ref().map_or(0, Vec::len);
                match m.data.play_command {
                    Some(command) => format!("{command} with {count} items"),
                    None => format!("Play {count} items"),
                }
            }
            Self::Playstate(m) => match (m.data.command, m.data.seek_position_ticks) {
                (Some(command), Some(ticks)) => format!("Playstate {command} to tick {ticks}"),
                (Some(command), None) => format!("Playstate {command}"),
                (None, _) => "Playstate".to_string(),
            },
            Self::PackageInstallationCancelled(m) => {
                format!("Installation of {} cancelled", or_unknown(&m.data.name))
            }
            Self::PackageInstallationCompleted(m) => {
                format!("Installation of {} completed", or_unknown(&m.data.name))
            }
            Self::PackageInstallationFailed(m) => {
                format!("Installation of {} failed", or_unknown(&m.data.name))
            }
            Self::PackageInstalling(m) => format!("Installing {}", or_unknown(&m.data.name)),
            Self::PackageUninstalled(m) => {
                format!("Plugin {} uninstalled", or_unknown(&m.data.name))
            }
            Self::RefreshProgress(m) => match (m.data.get("TaskId"), m.data.get("Progress")) {
                (Some(task), Some(progress)) => format!("Task {task} at {progress}%"),
                _ => "Refresh progress".to_string(),
            },
            Self::RestartRequired(_) => "Server restart required".to_string(),
            Self::ScheduledTaskEnded(m) => match m.data.status {
                Some(status) => format!("Task {} ended: {status}", or_unknown(&m.data.name)),
                None => format!("Task {} ended", or_unknown(&m.data.name)),
            },
            Self::ScheduledTasksInfo(m) => format!("{} scheduled tasks", m.data.len()),
            Self::SeriesTimerCancelled(m) => {
                format!("Series timer {} cancelled", or_unknown(&m.data.id))
            }
            Self::SeriesTimerCreated(m) => {
                format!("Series timer {} created", or_unknown(&m.data.id))
            }
            Self::ServerRestarting(_) => "Server restarting".to_string(),
            Self::ServerShuttingDown(_) => "Server shutting down".to_string(),
            Self::Sessions(m) => {
                let playing = m.data.iter().filter(|s| s.is_playing()).count();
                format!("{} sessions ({playing} playing)", m.data.len())
            }
            Self::SyncPlayCommand(m) => match m.data.command {
                Some(command) => format!("SyncPlay {command}"),
                None => "SyncPlay command".to_string(),
            },
            Self::SyncPlayGroupUpdate(m) => match m.data.group_id() {
                Some(group_id) => format!("SyncPlay {} in group {group_id}", m.data.update_type()),
                None => format!("SyncPlay {}", m.data.update_type()),
            },
            Self::TimerCancelled(m) => format!("Timer {} cancelled", or_unknown(&m.data.id)),
            Self::TimerCreated(m) => format!("Timer {} created", or_unknown(&m.data.id)),
            Self::UserDataChanged(m) => {
                let count = m.data.user_data_list.as_ref().map_or(0, Vec::len);
                format!("User data changed for {count} items")
            }
            Self::UserDeleted(m) => format!("User {} deleted", m.data),
            Self::UserUpdated(m) => format!("User {} updated", or_unknown(&m.data.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnvelopeError;
    use crate::messages::one_of::{resolve_single, Envelope};
    use crate::messages::{SessionMessageType, WebSocketMessage};
    use crate::system::TaskCompletionStatus;
    use serde_json::{json, Value};

    const MESSAGE_ID: &str = "9f6c1d2e-3b4a-4c5d-8e6f-7a8b9c0d1e2f";
    const USER: &str = "4a7c1f0e-2b3d-4e5f-8a9b-0c1d2e3f4a5b";

    /// A structurally valid frame for every outbound tag.
    fn sample_frames() -> Vec<Value> {
        vec![
            json!({ "MessageType": "ActivityLogEntry", "Data": [{ "Id": 1, "Name": "login" }] }),
            json!({ "MessageType": "ForceKeepAlive", "Data": 60 }),
            json!({
                "MessageType": "GeneralCommand",
                "Data": { "Name": "DisplayMessage", "Arguments": { "Header": "hi" } }
            }),
            json!({
                "MessageType": "LibraryChanged",
                "Data": { "ItemsAdded": ["a"], "IsEmpty": false }
            }),
            json!({ "MessageType": "KeepAlive" }),
            json!({
                "MessageType": "Play",
                "Data": { "ItemIds": [USER], "PlayCommand": "PlayNow" }
            }),
            json!({
                "MessageType": "Playstate",
                "Data": { "Command": "Seek", "SeekPositionTicks": 100 }
            }),
            json!({ "MessageType": "PackageInstallationCancelled", "Data": { "Name": "Reports" } }),
            json!({ "MessageType": "PackageInstallationCompleted", "Data": { "Name": "Reports" } }),
            json!({ "MessageType": "PackageInstallationFailed", "Data": { "Name": "Reports" } }),
            json!({ "MessageType": "PackageInstalling", "Data": { "Name": "Reports" } }),
            json!({
                "MessageType": "PackageUninstalled",
                "Data": { "Name": "Reports", "Status": "Deleted" }
            }),
            json!({
                "MessageType": "RefreshProgress",
                "Data": { "TaskId": "t1", "Progress": "42.5" }
            }),
            json!({ "MessageType": "RestartRequired" }),
            json!({
                "MessageType": "ScheduledTaskEnded",
                "Data": { "Name": "Scan", "Status": "Completed" }
            }),
            json!({
                "MessageType": "ScheduledTasksInfo",
                "Data": [{ "Name": "Scan", "State": "Idle" }]
            }),
            json!({ "MessageType": "SeriesTimerCancelled", "Data": { "Id": "s1" } }),
            json!({ "MessageType": "SeriesTimerCreated", "Data": { "Id": "s1" } }),
            json!({ "MessageType": "ServerRestarting" }),
            json!({ "MessageType": "ServerShuttingDown" }),
            json!({ "MessageType": "Sessions", "Data": [{ "Id": "abc", "UserName": "alice" }] }),
            json!({
                "MessageType": "SyncPlayCommand",
                "Data": { "Command": "Pause", "PositionTicks": 5 }
            }),
            json!({
                "MessageType": "SyncPlayGroupUpdate",
                "Data": { "GroupId": USER, "Type": "UserLeft", "Data": "bob" }
            }),
            json!({ "MessageType": "TimerCancelled", "Data": { "Id": "t1" } }),
            json!({ "MessageType": "TimerCreated", "Data": { "Id": "t1" } }),
            json!({
                "MessageType": "UserDataChanged",
                "Data": { "UserId": USER, "UserDataList": [{ "Played": true }] }
            }),
            json!({ "MessageType": "UserDeleted", "Data": USER }),
            json!({ "MessageType": "UserUpdated", "Data": { "Name": "alice", "Id": USER } }),
        ]
    }

    #[test]
    fn test_every_tag_decodes_to_its_variant() {
        let frames = sample_frames();
        assert_eq!(frames.len(), OutboundWebSocketMessage::CANDIDATES.len());

        for (frame, candidate) in frames.into_iter().zip(OutboundWebSocketMessage::CANDIDATES) {
            let message = OutboundWebSocketMessage::from_value(frame.clone())
                .unwrap_or_else(|e| panic!("{} failed: {e}", candidate.name));
            assert_eq!(message.message_type(), candidate.message_type);
            assert_eq!(message.variant_name(), candidate.name);
            assert_eq!(message.to_value().unwrap(), frame, "{} re-encodes", candidate.name);
        }
    }

    #[test]
    fn test_library_changed_example() {
        let frame = json!({
            "MessageType": "LibraryChanged",
            "MessageId": MESSAGE_ID,
            "Data": { "ItemsAdded": ["x", "y"], "ItemsRemoved": [], "IsEmpty": false }
        });
        let message: OutboundWebSocketMessage = serde_json::from_value(frame.clone()).unwrap();

        match &message {
            OutboundWebSocketMessage::LibraryChanged(m) => {
                assert_eq!(m.data.items_added.as_ref().map(Vec::len), Some(2));
            }
            other => panic!("unexpected variant {}", other.variant_name()),
        }
        assert_eq!(message.message_id().unwrap().to_string(), MESSAGE_ID);
        assert_eq!(message.description(), "Library changed: 2 items");
        assert_eq!(serde_json::to_value(&message).unwrap(), frame);
    }

    #[test]
    fn test_group_update_without_group_id() {
        let frame = json!({
            "MessageType": "SyncPlayGroupUpdate",
            "Data": { "Type": "UserLeft", "Data": "bob" }
        });
        let message = OutboundWebSocketMessage::from_value(frame.clone()).unwrap();

        match &message {
            OutboundWebSocketMessage::SyncPlayGroupUpdate(m) => {
                assert_eq!(m.data.group_id(), None);
            }
            other => panic!("unexpected variant {}", other.variant_name()),
        }
        assert_eq!(message.description(), "SyncPlay UserLeft");
        assert_eq!(message.to_value().unwrap(), frame);

        let with_group = OutboundWebSocketMessage::from_value(json!({
            "MessageType": "SyncPlayGroupUpdate",
            "Data": { "GroupId": USER, "Type": "GroupLeft" }
        }))
        .unwrap();
        assert_eq!(with_group.description(), format!("SyncPlay GroupLeft in group {USER}"));
    }

    #[test]
    fn test_encoding_is_unwrapped() {
        let record = ScheduledTaskEndedMessage::new(TaskResult {
            name: Some("Scan".to_string()),
            status: Some(TaskCompletionStatus::Failed),
            ..Default::default()
        });
        let envelope = OutboundWebSocketMessage::from(record.clone());
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            serde_json::to_string(&record).unwrap()
        );
        assert_eq!(envelope.description(), "Task Scan ended: Failed");
    }

    #[test]
    fn test_from_str_and_errors() {
        let message: OutboundWebSocketMessage =
            r#"{"MessageType":"ForceKeepAlive","Data":30}"#.parse().unwrap();
        assert_eq!(message.description(), "Keep-alive required every 30s");

        assert!(matches!(
            "{not json".parse::<OutboundWebSocketMessage>(),
            Err(EnvelopeError::Malformed(_))
        ));
        assert!(matches!(
            "null".parse::<OutboundWebSocketMessage>(),
            Err(EnvelopeError::Null { .. })
        ));
        assert!(serde_json::from_str::<OutboundWebSocketMessage>("null").is_err());
    }

    #[test]
    fn test_tag_with_bad_payload_is_invalid_payload() {
        let result = OutboundWebSocketMessage::from_value(json!({
            "MessageType": "ForceKeepAlive",
            "Data": "soon"
        }));
        match result {
            Err(EnvelopeError::InvalidPayload { message_type, .. }) => {
                assert_eq!(message_type, SessionMessageType::ForceKeepAlive);
            }
            other => panic!("expected invalid payload, got {other:?}"),
        }
    }

    #[test]
    fn test_inbound_tag_is_unexpected() {
        let result = OutboundWebSocketMessage::from_value(json!({
            "MessageType": "SessionsStart",
            "Data": "0,1500"
        }));
        assert!(matches!(
            result,
            Err(EnvelopeError::UnexpectedMessageType {
                message_type: SessionMessageType::SessionsStart,
                ..
            })
        ));
    }

    #[test]
    fn test_untagged_frames_use_trial_parse() {
        let message = OutboundWebSocketMessage::from_value(json!({ "Data": 30 })).unwrap();
        assert_eq!(message.message_type(), SessionMessageType::ForceKeepAlive);

        let message = OutboundWebSocketMessage::from_value(json!({ "Data": USER })).unwrap();
        assert_eq!(message.message_type(), SessionMessageType::UserDeleted);

        let result = OutboundWebSocketMessage::from_value(json!({ "Foo": 1 }));
        assert!(matches!(result, Err(EnvelopeError::NoMatch { .. })));

        let result = OutboundWebSocketMessage::from_value(json!([1, 2, 3]));
        assert!(matches!(result, Err(EnvelopeError::NoMatch { .. })));
    }

    #[test]
    fn test_unknown_tag_falls_back_and_finds_nothing() {
        let result =
            OutboundWebSocketMessage::from_value(json!({ "MessageType": "Bogus", "Data": 1 }));
        assert!(matches!(result, Err(EnvelopeError::NoMatch { .. })));
    }

    // The four data-less outbound records share one shape, so an untagged
    // frame without Data cannot be told apart.
    #[test]
    fn test_dataless_records_overlap_without_tag() {
        let result = OutboundWebSocketMessage::from_value(json!({ "MessageId": MESSAGE_ID }));
        match result {
            Err(EnvelopeError::Ambiguous {
                matches,
                candidates,
                ..
            }) => {
                assert_eq!(matches, 4);
                assert_eq!(
                    candidates,
                    vec![
                        "OutboundKeepAliveMessage",
                        "RestartRequiredMessage",
                        "ServerRestartingMessage",
                        "ServerShuttingDownMessage",
                    ]
                );
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    // Every list of records accepts a list of loose objects.
    #[test]
    fn test_untagged_list_payload_overlaps() {
        let result = OutboundWebSocketMessage::from_value(json!({ "Data": [{ "Name": "x" }] }));
        match result {
            Err(EnvelopeError::Ambiguous { candidates, .. }) => assert_eq!(
                candidates,
                vec![
                    "ActivityLogEntryMessage",
                    "ScheduledTasksInfoMessage",
                    "SessionsMessage",
                ]
            ),
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    // Object payloads are all-optional records, so an untagged object fits
    // many variants at once.
    #[test]
    fn test_untagged_object_payload_is_ambiguous() {
        let result = OutboundWebSocketMessage::from_value(json!({ "Data": { "Id": "t1" } }));
        let matches = result.unwrap_err().match_count().unwrap();
        assert!(matches > 1);
    }

    #[test]
    fn test_two_timer_records_match_the_same_frame() {
        let frame = json!({ "Data": { "Id": "t1" } });
        let attempts = [
            (
                TimerCreatedMessage::NAME,
                serde_json::from_value::<TimerCreatedMessage>(frame.clone())
                    .map(OutboundWebSocketMessage::from),
            ),
            (
                TimerCancelledMessage::NAME,
                serde_json::from_value::<TimerCancelledMessage>(frame)
                    .map(OutboundWebSocketMessage::from),
            ),
        ];
        let err = resolve_single("OutboundWebSocketMessage", attempts).unwrap_err();
        assert_eq!(err.match_count(), Some(2));
    }

    #[test]
    fn test_strict_mode_requires_tag() {
        let result = OutboundWebSocketMessage::from_value_strict(json!({ "Data": 30 }));
        assert!(matches!(result, Err(EnvelopeError::MissingDiscriminator { .. })));

        let frame = json!({ "MessageType": "ServerRestarting" });
        let message = OutboundWebSocketMessage::from_value_strict(frame).unwrap();
        assert_eq!(message.description(), "Server restarting");
    }

    #[test]
    fn test_record_rejects_foreign_tag() {
        let result = serde_json::from_value::<TimerCreatedMessage>(json!({
            "MessageType": "TimerCancelled",
            "Data": { "Id": "t1" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_try_from_any() {
        let message =
            OutboundWebSocketMessage::try_from_any(RestartRequiredMessage::new()).unwrap();
        assert_eq!(message.message_type(), SessionMessageType::RestartRequired);

        let again = OutboundWebSocketMessage::try_from_any(message.clone()).unwrap();
        assert_eq!(again, message);

        match OutboundWebSocketMessage::try_from_any(42u8) {
            Err(EnvelopeError::UnsupportedType { type_name, .. }) => assert_eq!(type_name, "u8"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_try_from_value() {
        let message =
            OutboundWebSocketMessage::try_from(json!({ "MessageType": "KeepAlive" })).unwrap();
        assert_eq!(
            message,
            OutboundWebSocketMessage::from(OutboundKeepAliveMessage::new())
        );
        assert_eq!(message.message_id(), None);
    }

    #[test]
    fn test_descriptions() {
        let user = Uuid::parse_str(USER).unwrap();
        let message: OutboundWebSocketMessage = UserDeletedMessage::new(user).into();
        assert_eq!(message.description(), format!("User {USER} deleted"));

        let message: OutboundWebSocketMessage = SessionsMessage::new(vec![
            SessionInfoDto::default(),
            SessionInfoDto {
                now_playing_item: Some(Default::default()),
                ..Default::default()
            },
        ])
        .into();
        assert_eq!(message.description(), "2 sessions (1 playing)");
    }
}
