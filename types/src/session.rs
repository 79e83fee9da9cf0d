//! Connected client sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::item::{BaseItemDto, MediaType, QueueItem};
use crate::playback::{GeneralCommandType, PlayerStateInfo};

/// A client session known to the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SessionInfoDto {
    #[serde(rename = "PlayState", default, skip_serializing_if = "Option::is_none")]
    pub play_state: Option<PlayerStateInfo>,

    #[serde(rename = "RemoteEndPoint", default, skip_serializing_if = "Option::is_none")]
    pub remote_end_point: Option<String>,

    #[serde(rename = "PlayableMediaTypes", default, skip_serializing_if = "Option::is_none")]
    pub playable_media_types: Option<Vec<MediaType>>,

    /// Session id (not a UUID on the wire)
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "UserId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    #[serde(rename = "UserName", default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Client application name (e.g. "Jellyfin Web")
    #[serde(rename = "Client", default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    #[serde(rename = "LastActivityDate", default, skip_serializing_if = "Option::is_none")]
    pub last_activity_date: Option<DateTime<Utc>>,

    #[serde(rename = "LastPlaybackCheckIn", default, skip_serializing_if = "Option::is_none")]
    pub last_playback_check_in: Option<DateTime<Utc>>,

    #[serde(rename = "LastPausedDate", default, skip_serializing_if = "Option::is_none")]
    pub last_paused_date: Option<DateTime<Utc>>,

    #[serde(rename = "DeviceName", default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    #[serde(rename = "DeviceType", default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,

    #[serde(rename = "NowPlayingItem", default, skip_serializing_if = "Option::is_none")]
    pub now_playing_item: Option<BaseItemDto>,

    #[serde(rename = "NowViewingItem", default, skip_serializing_if = "Option::is_none")]
    pub now_viewing_item: Option<BaseItemDto>,

    #[serde(rename = "DeviceId", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    #[serde(rename = "ApplicationVersion", default, skip_serializing_if = "Option::is_none")]
    pub application_version: Option<String>,

    #[serde(rename = "IsActive", default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(rename = "SupportsMediaControl", default, skip_serializing_if = "Option::is_none")]
    pub supports_media_control: Option<bool>,

    #[serde(rename = "SupportsRemoteControl", default, skip_serializing_if = "Option::is_none")]
    pub supports_remote_control: Option<bool>,

    #[serde(rename = "NowPlayingQueue", default, skip_serializing_if = "Option::is_none")]
    pub now_playing_queue: Option<Vec<QueueItem>>,

    #[serde(rename = "HasCustomDeviceName", default, skip_serializing_if = "Option::is_none")]
    pub has_custom_device_name: Option<bool>,

    #[serde(rename = "PlaylistItemId", default, skip_serializing_if = "Option::is_none")]
    pub playlist_item_id: Option<String>,

    #[serde(rename = "ServerId", default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,

    #[serde(rename = "UserPrimaryImageTag", default, skip_serializing_if = "Option::is_none")]
    pub user_primary_image_tag: Option<String>,

    #[serde(rename = "SupportedCommands", default, skip_serializing_if = "Option::is_none")]
    pub supported_commands: Option<Vec<GeneralCommandType>>,
}

impl SessionInfoDto {
    /// Whether the session currently has an item loaded.
    pub fn is_playing(&self) -> bool {
        self.now_playing_item.is_some()
    }

    pub fn supports(&self, command: GeneralCommandType) -> bool {
        self.supported_commands
            .as_ref()
            .is_some_and(|commands| commands.contains(&command))
    }
}
