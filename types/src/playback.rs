//! Playback reporting and remote-control requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::item::{BaseItemDto, QueueItem};
use crate::query::{QueryWriter, ToQueryString};
use crate::wire::wire_enum;

/// Ticks per second (one tick is 100 ns).
pub const TICKS_PER_SECOND: i64 = 10_000_000;

wire_enum! {
    pub enum PlayMethod {
        Transcode => "Transcode",
        DirectStream => "DirectStream",
        DirectPlay => "DirectPlay",
    }
}

wire_enum! {
    pub enum RepeatMode {
        RepeatNone => "RepeatNone",
        RepeatAll => "RepeatAll",
        RepeatOne => "RepeatOne",
    }
}

wire_enum! {
    pub enum PlaybackOrder {
        Default => "Default",
        Shuffle => "Shuffle",
    }
}

wire_enum! {
    /// Where items of a play request land in the queue.
    pub enum PlayCommand {
        PlayNow => "PlayNow",
        PlayNext => "PlayNext",
        PlayLast => "PlayLast",
        PlayInstantMix => "PlayInstantMix",
        PlayShuffle => "PlayShuffle",
    }
}

wire_enum! {
    pub enum PlaystateCommand {
        Stop => "Stop",
        Pause => "Pause",
        Unpause => "Unpause",
        NextTrack => "NextTrack",
        PreviousTrack => "PreviousTrack",
        Seek => "Seek",
        Rewind => "Rewind",
        FastForward => "FastForward",
        PlayPause => "PlayPause",
    }
}

wire_enum! {
    /// Remote-control commands a session may support.
    pub enum GeneralCommandType {
        MoveUp => "MoveUp",
        MoveDown => "MoveDown",
        MoveLeft => "MoveLeft",
        MoveRight => "MoveRight",
        PageUp => "PageUp",
        PageDown => "PageDown",
        PreviousLetter => "PreviousLetter",
        NextLetter => "NextLetter",
        ToggleOsd => "ToggleOsd",
        ToggleContextMenu => "ToggleContextMenu",
        Select => "Select",
        Back => "Back",
        TakeScreenshot => "TakeScreenshot",
        SendKey => "SendKey",
        SendString => "SendString",
        GoHome => "GoHome",
        GoToSettings => "GoToSettings",
        VolumeUp => "VolumeUp",
        VolumeDown => "VolumeDown",
        Mute => "Mute",
        Unmute => "Unmute",
        ToggleMute => "ToggleMute",
        SetVolume => "SetVolume",
        SetAudioStreamIndex => "SetAudioStreamIndex",
        SetSubtitleStreamIndex => "SetSubtitleStreamIndex",
        ToggleFullscreen => "ToggleFullscreen",
        DisplayContent => "DisplayContent",
        GoToSearch => "GoToSearch",
        DisplayMessage => "DisplayMessage",
        SetRepeatMode => "SetRepeatMode",
        ChannelUp => "ChannelUp",
        ChannelDown => "ChannelDown",
        Guide => "Guide",
        ToggleStats => "ToggleStats",
        PlayMediaSource => "PlayMediaSource",
        PlayTrailers => "PlayTrailers",
        SetShuffleQueue => "SetShuffleQueue",
        PlayState => "PlayState",
        PlayNext => "PlayNext",
        ToggleOsdMenu => "ToggleOsdMenu",
        Play => "Play",
        SetMaxStreamingBitrate => "SetMaxStreamingBitrate",
        SetPlaybackOrder => "SetPlaybackOrder",
    }
}

/// Progress report a client sends while playing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PlaybackProgressInfo {
    #[serde(rename = "CanSeek", default, skip_serializing_if = "Option::is_none")]
    pub can_seek: Option<bool>,

    #[serde(rename = "Item", default, skip_serializing_if = "Option::is_none")]
    pub item: Option<BaseItemDto>,

    #[serde(rename = "ItemId", default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<Uuid>,

    #[serde(rename = "SessionId", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(rename = "MediaSourceId", default, skip_serializing_if = "Option::is_none")]
    pub media_source_id: Option<String>,

    #[serde(rename = "AudioStreamIndex", default, skip_serializing_if = "Option::is_none")]
    pub audio_stream_index: Option<i32>,

    #[serde(rename = "SubtitleStreamIndex", default, skip_serializing_if = "Option::is_none")]
    pub subtitle_stream_index: Option<i32>,

    #[serde(rename = "IsPaused", default, skip_serializing_if = "Option::is_none")]
    pub is_paused: Option<bool>,

    #[serde(rename = "IsMuted", default, skip_serializing_if = "Option::is_none")]
    pub is_muted: Option<bool>,

    #[serde(rename = "PositionTicks", default, skip_serializing_if = "Option::is_none")]
    pub position_ticks: Option<i64>,

    #[serde(rename = "PlaybackStartTimeTicks", default, skip_serializing_if = "Option::is_none")]
    pub playback_start_time_ticks: Option<i64>,

    #[serde(rename = "VolumeLevel", default, skip_serializing_if = "Option::is_none")]
    pub volume_level: Option<i32>,

    #[serde(rename = "Brightness", default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<i32>,

    #[serde(rename = "AspectRatio", default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,

    #[serde(rename = "PlayMethod", default, skip_serializing_if = "Option::is_none")]
    pub play_method: Option<PlayMethod>,

    #[serde(rename = "LiveStreamId", default, skip_serializing_if = "Option::is_none")]
    pub live_stream_id: Option<String>,

    #[serde(rename = "PlaySessionId", default, skip_serializing_if = "Option::is_none")]
    pub play_session_id: Option<String>,

    #[serde(rename = "RepeatMode", default, skip_serializing_if = "Option::is_none")]
    pub repeat_mode: Option<RepeatMode>,

    #[serde(rename = "PlaybackOrder", default, skip_serializing_if = "Option::is_none")]
    pub playback_order: Option<PlaybackOrder>,

    #[serde(rename = "NowPlayingQueue", default, skip_serializing_if = "Option::is_none")]
    pub now_playing_queue: Option<Vec<QueueItem>>,

    #[serde(rename = "PlaylistItemId", default, skip_serializing_if = "Option::is_none")]
    pub playlist_item_id: Option<String>,
}

/// Start-of-playback report; same shape as a progress report.
pub type PlaybackStartInfo = PlaybackProgressInfo;

impl PlaybackProgressInfo {
    pub fn new(item_id: Uuid) -> Self {
        Self {
            item_id: Some(item_id),
            ..Default::default()
        }
    }

    pub fn with_position_ticks(mut self, ticks: i64) -> Self {
        self.position_ticks = Some(ticks);
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.is_paused = Some(paused);
        self
    }

    pub fn with_play_method(mut self, method: PlayMethod) -> Self {
        self.play_method = Some(method);
        self
    }

    /// Playback position in whole seconds.
    pub fn position_seconds(&self) -> Option<i64> {
        self.position_ticks.map(|ticks| ticks / TICKS_PER_SECOND)
    }
}

impl ToQueryString for PlaybackProgressInfo {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("CanSeek", &self.can_seek);
        query.record("Item", &self.item);
        query.value("ItemId", &self.item_id);
        query.value("SessionId", &self.session_id);
        query.value("MediaSourceId", &self.media_source_id);
        query.value("AudioStreamIndex", &self.audio_stream_index);
        query.value("SubtitleStreamIndex", &self.subtitle_stream_index);
        query.value("IsPaused", &self.is_paused);
        query.value("IsMuted", &self.is_muted);
        query.value("PositionTicks", &self.position_ticks);
        query.value("PlaybackStartTimeTicks", &self.playback_start_time_ticks);
        query.value("VolumeLevel", &self.volume_level);
        query.value("Brightness", &self.brightness);
        query.value("AspectRatio", &self.aspect_ratio);
        query.value("PlayMethod", &self.play_method);
        query.value("LiveStreamId", &self.live_stream_id);
        query.value("PlaySessionId", &self.play_session_id);
        query.value("RepeatMode", &self.repeat_mode);
        query.value("PlaybackOrder", &self.playback_order);
        query.records("NowPlayingQueue", &self.now_playing_queue);
        query.value("PlaylistItemId", &self.playlist_item_id);
    }
}

/// Player state of a session as reported by the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PlayerStateInfo {
    #[serde(rename = "PositionTicks", default, skip_serializing_if = "Option::is_none")]
    pub position_ticks: Option<i64>,

    #[serde(rename = "CanSeek", default, skip_serializing_if = "Option::is_none")]
    pub can_seek: Option<bool>,

    #[serde(rename = "IsPaused", default, skip_serializing_if = "Option::is_none")]
    pub is_paused: Option<bool>,

    #[serde(rename = "IsMuted", default, skip_serializing_if = "Option::is_none")]
    pub is_muted: Option<bool>,

    #[serde(rename = "VolumeLevel", default, skip_serializing_if = "Option::is_none")]
    pub volume_level: Option<i32>,

    #[serde(rename = "AudioStreamIndex", default, skip_serializing_if = "Option::is_none")]
    pub audio_stream_index: Option<i32>,

    #[serde(rename = "SubtitleStreamIndex", default, skip_serializing_if = "Option::is_none")]
    pub subtitle_stream_index: Option<i32>,

    #[serde(rename = "MediaSourceId", default, skip_serializing_if = "Option::is_none")]
    pub media_source_id: Option<String>,

    #[serde(rename = "PlayMethod", default, skip_serializing_if = "Option::is_none")]
    pub play_method: Option<PlayMethod>,

    #[serde(rename = "RepeatMode", default, skip_serializing_if = "Option::is_none")]
    pub repeat_mode: Option<RepeatMode>,

    #[serde(rename = "PlaybackOrder", default, skip_serializing_if = "Option::is_none")]
    pub playback_order: Option<PlaybackOrder>,

    #[serde(rename = "LiveStreamId", default, skip_serializing_if = "Option::is_none")]
    pub live_stream_id: Option<String>,
}

/// Ask a client to start playing items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PlayRequest {
    #[serde(rename = "ItemIds", default, skip_serializing_if = "Option::is_none")]
    pub item_ids: Option<Vec<Uuid>>,

    #[serde(rename = "StartPositionTicks", default, skip_serializing_if = "Option::is_none")]
    pub start_position_ticks: Option<i64>,

    #[serde(rename = "PlayCommand", default, skip_serializing_if = "Option::is_none")]
    pub play_command: Option<PlayCommand>,

    #[serde(rename = "ControllingUserId", default, skip_serializing_if = "Option::is_none")]
    pub controlling_user_id: Option<Uuid>,

    #[serde(rename = "SubtitleStreamIndex", default, skip_serializing_if = "Option::is_none")]
    pub subtitle_stream_index: Option<i32>,

    #[serde(rename = "AudioStreamIndex", default, skip_serializing_if = "Option::is_none")]
    pub audio_stream_index: Option<i32>,

    #[serde(rename = "MediaSourceId", default, skip_serializing_if = "Option::is_none")]
    pub media_source_id: Option<String>,

    #[serde(rename = "StartIndex", default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i32>,
}

/// Ask a client to change its playback state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PlaystateRequest {
    #[serde(rename = "Command", default, skip_serializing_if = "Option::is_none")]
    pub command: Option<PlaystateCommand>,

    #[serde(rename = "SeekPositionTicks", default, skip_serializing_if = "Option::is_none")]
    pub seek_position_ticks: Option<i64>,

    #[serde(rename = "ControllingUserId", default, skip_serializing_if = "Option::is_none")]
    pub controlling_user_id: Option<String>,
}

/// A remote-control command with string arguments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GeneralCommand {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<GeneralCommandType>,

    #[serde(rename = "ControllingUserId", default, skip_serializing_if = "Option::is_none")]
    pub controlling_user_id: Option<Uuid>,

    #[serde(rename = "Arguments", default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<BTreeMap<String, String>>,
}

impl GeneralCommand {
    pub fn new(name: GeneralCommandType) -> Self {
        Self {
            name: Some(name),
            ..Default::default()
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.as_ref()?.get(key).map(String::as_str)
    }
}
