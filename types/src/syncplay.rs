//! SyncPlay group playback.
//!
//! The server pushes two kinds of SyncPlay frames: commands that every group
//! member executes at a given wall-clock time, and group updates describing
//! membership, state and play queue changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::wire::wire_enum;

wire_enum! {
    pub enum SendCommandType {
        Unpause => "Unpause",
        Pause => "Pause",
        Stop => "Stop",
        Seek => "Seek",
    }
}

wire_enum! {
    pub enum GroupStateType {
        Idle => "Idle",
        Waiting => "Waiting",
        Paused => "Paused",
        Playing => "Playing",
    }
}

wire_enum! {
    pub enum GroupUpdateType {
        UserJoined => "UserJoined",
        UserLeft => "UserLeft",
        GroupJoined => "GroupJoined",
        GroupLeft => "GroupLeft",
        StateUpdate => "StateUpdate",
        PlayQueue => "PlayQueue",
        NotInGroup => "NotInGroup",
        GroupDoesNotExist => "GroupDoesNotExist",
        CreateGroupDenied => "CreateGroupDenied",
        JoinGroupDenied => "JoinGroupDenied",
        LibraryAccessDenied => "LibraryAccessDenied",
    }
}

wire_enum! {
    pub enum PlayQueueUpdateReason {
        NewPlaylist => "NewPlaylist",
        SetCurrentItem => "SetCurrentItem",
        RemoveItems => "RemoveItems",
        MoveItem => "MoveItem",
        Queue => "Queue",
        QueueNext => "QueueNext",
        NextItem => "NextItem",
        PreviousItem => "PreviousItem",
        RepeatMode => "RepeatMode",
        ShuffleMode => "ShuffleMode",
    }
}

wire_enum! {
    pub enum GroupShuffleMode {
        Sorted => "Sorted",
        Shuffle => "Shuffle",
    }
}

wire_enum! {
    pub enum GroupRepeatMode {
        RepeatOne => "RepeatOne",
        RepeatAll => "RepeatAll",
        RepeatNone => "RepeatNone",
    }
}

/// A scheduled playback command for every member of a group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SendCommand {
    #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,

    #[serde(rename = "PlaylistItemId", default, skip_serializing_if = "Option::is_none")]
    pub playlist_item_id: Option<Uuid>,

    /// UTC time at which clients execute the command
    #[serde(rename = "When", default, skip_serializing_if = "Option::is_none")]
    pub when: Option<DateTime<Utc>>,

    #[serde(rename = "PositionTicks", default, skip_serializing_if = "Option::is_none")]
    pub position_ticks: Option<i64>,

    #[serde(rename = "Command", default, skip_serializing_if = "Option::is_none")]
    pub command: Option<SendCommandType>,

    #[serde(rename = "EmittedAt", default, skip_serializing_if = "Option::is_none")]
    pub emitted_at: Option<DateTime<Utc>>,
}

/// Snapshot of a group, sent to a member that just joined.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GroupInfoDto {
    #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,

    #[serde(rename = "GroupName", default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<GroupStateType>,

    /// User names of the members
    #[serde(rename = "Participants", default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,

    #[serde(rename = "LastUpdatedAt", default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GroupStateUpdate {
    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<GroupStateType>,

    /// Request kind that caused the change (e.g. "Pause", "Seek")
    #[serde(rename = "Reason", default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SyncPlayQueueItem {
    #[serde(rename = "ItemId", default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<Uuid>,

    #[serde(rename = "PlaylistItemId", default, skip_serializing_if = "Option::is_none")]
    pub playlist_item_id: Option<Uuid>,
}

/// The group's play queue after a change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PlayQueueUpdate {
    #[serde(rename = "Reason", default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<PlayQueueUpdateReason>,

    #[serde(rename = "LastUpdate", default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,

    #[serde(rename = "Playlist", default, skip_serializing_if = "Option::is_none")]
    pub playlist: Option<Vec<SyncPlayQueueItem>>,

    #[serde(rename = "PlayingItemIndex", default, skip_serializing_if = "Option::is_none")]
    pub playing_item_index: Option<i32>,

    #[serde(rename = "StartPositionTicks", default, skip_serializing_if = "Option::is_none")]
    pub start_position_ticks: Option<i64>,

    #[serde(rename = "IsPlaying", default, skip_serializing_if = "Option::is_none")]
    pub is_playing: Option<bool>,

    #[serde(rename = "ShuffleMode", default, skip_serializing_if = "Option::is_none")]
    pub shuffle_mode: Option<GroupShuffleMode>,

    #[serde(rename = "RepeatMode", default, skip_serializing_if = "Option::is_none")]
    pub repeat_mode: Option<GroupRepeatMode>,
}

impl PlayQueueUpdate {
    /// The queue entry currently playing.
    pub fn playing_item(&self) -> Option<&SyncPlayQueueItem> {
        let index = usize::try_from(self.playing_item_index?).ok()?;
        self.playlist.as_ref()?.get(index)
    }
}

/// A SyncPlay group update, discriminated by its `Type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(tag = "Type")]
pub enum GroupUpdate {
    /// A user joined; `data` is the user name.
    UserJoined {
        #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
        group_id: Option<Uuid>,
        #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
    /// A user left; `data` is the user name.
    UserLeft {
        #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
        group_id: Option<Uuid>,
        #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
    GroupJoined {
        #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
        group_id: Option<Uuid>,
        #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
        data: Option<GroupInfoDto>,
    },
    GroupLeft {
        #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
        group_id: Option<Uuid>,
        #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
    StateUpdate {
        #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
        group_id: Option<Uuid>,
        #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
        data: Option<GroupStateUpdate>,
    },
    PlayQueue {
        #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
        group_id: Option<Uuid>,
        #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
        data: Option<PlayQueueUpdate>,
    },
    NotInGroup {
        #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
        group_id: Option<Uuid>,
        #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
    GroupDoesNotExist {
        #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
        group_id: Option<Uuid>,
        #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
    LibraryAccessDenied {
        #[serde(rename = "GroupId", default, skip_serializing_if = "Option::is_none")]
        group_id: Option<Uuid>,
        #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
}

impl GroupUpdate {
    pub fn group_id(&self) -> Option<Uuid> {
        match self {
            Self::UserJoined { group_id, .. }
            | Self::UserLeft { group_id, .. }
            | Self::GroupJoined { group_id, .. }
            | Self::GroupLeft { group_id, .. }
            | Self::StateUpdate { group_id, .. }
            | Self::PlayQueue { group_id, .. }
            | Self::NotInGroup { group_id, .. }
            | Self::GroupDoesNotExist { group_id, .. }
            | Self::LibraryAccessDenied { group_id, .. } => *group_id,
        }
    }

    pub fn update_type(&self) -> GroupUpdateType {
        match self {
            Self::UserJoined { .. } => GroupUpdateType::UserJoined,
            Self::UserLeft { .. } => GroupUpdateType::UserLeft,
            Self::GroupJoined { .. } => GroupUpdateType::GroupJoined,
            Self::GroupLeft { .. } => GroupUpdateType::GroupLeft,
            Self::StateUpdate { .. } => GroupUpdateType::StateUpdate,
            Self::PlayQueue { .. } => GroupUpdateType::PlayQueue,
            Self::NotInGroup { .. } => GroupUpdateType::NotInGroup,
            Self::GroupDoesNotExist { .. } => GroupUpdateType::GroupDoesNotExist,
            Self::LibraryAccessDenied { .. } => GroupUpdateType::LibraryAccessDenied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GROUP: &str = "3f2a1b0c-4d5e-6f70-8192-a3b4c5d6e7f8";

    #[test]
    fn test_group_update_dispatches_on_type() {
        let update: GroupUpdate = serde_json::from_value(json!({
            "GroupId": GROUP,
            "Type": "StateUpdate",
            "Data": { "State": "Playing", "Reason": "Unpause" }
        }))
        .unwrap();

        assert_eq!(update.update_type(), GroupUpdateType::StateUpdate);
        assert_eq!(update.group_id(), Uuid::parse_str(GROUP).ok());
        match update {
            GroupUpdate::StateUpdate { data, .. } => {
                assert_eq!(data.and_then(|d| d.state), Some(GroupStateType::Playing));
            }
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[test]
    fn test_group_update_round_trip() {
        let update = GroupUpdate::UserJoined {
            group_id: Uuid::parse_str(GROUP).ok(),
            data: Some("bob".to_string()),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            json!({ "Type": "UserJoined", "GroupId": GROUP, "Data": "bob" })
        );
        let back: GroupUpdate = serde_json::from_value(json).unwrap();
        assert_eq!(back, update);
    }

    #[test]
    fn test_group_update_without_group_id_or_data() {
        let update: GroupUpdate =
            serde_json::from_value(json!({ "Type": "NotInGroup" })).unwrap();
        assert_eq!(
            update,
            GroupUpdate::NotInGroup {
                group_id: None,
                data: None,
            }
        );
        assert_eq!(update.group_id(), None);
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "Type": "NotInGroup" }));

        let update: GroupUpdate =
            serde_json::from_value(json!({ "Type": "UserLeft", "Data": "bob" })).unwrap();
        assert_eq!(
            update,
            GroupUpdate::UserLeft {
                group_id: None,
                data: Some("bob".to_string()),
            }
        );
    }

    #[test]
    fn test_group_update_rejects_unknown_type() {
        let result = serde_json::from_value::<GroupUpdate>(json!({
            "GroupId": GROUP,
            "Type": "CreateGroupDenied",
            "Data": "x"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_playing_item() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let queue = PlayQueueUpdate {
            playlist: Some(vec![
                SyncPlayQueueItem {
                    item_id: Some(first),
                    playlist_item_id: None,
                },
                SyncPlayQueueItem {
                    item_id: Some(second),
                    playlist_item_id: None,
                },
            ]),
            playing_item_index: Some(1),
            ..Default::default()
        };
        assert_eq!(queue.playing_item().and_then(|i| i.item_id), Some(second));

        let out_of_range = PlayQueueUpdate {
            playing_item_index: Some(-1),
            ..queue
        };
        assert!(out_of_range.playing_item().is_none());
    }
}
