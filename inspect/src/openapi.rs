//! OpenAPI component schemas of the DTOs.

use anyhow::Context;
use jellyfin_types::encoding::{
    DeinterlaceMethod, DownMixStereoAlgorithms, EncoderPreset, EncodingOptions,
    HardwareAccelerationType, TonemappingAlgorithm, TonemappingMode, TonemappingRange,
};
use jellyfin_types::item::{BaseItemDto, MediaType, QueueItem};
use jellyfin_types::library::{
    EmbeddedSubtitleOptions, ImageOption, ImageType, LibraryOptions, MediaPathInfo, TypeOptions,
};
use jellyfin_types::media_stream::{
    AudioSpatialFormat, MediaStream, MediaStreamType, SubtitleDeliveryMethod, VideoRange,
    VideoRangeType,
};
use jellyfin_types::media_update::{MediaUpdateInfoDto, MediaUpdateInfoPathDto};
use jellyfin_types::messages::SessionMessageType;
use jellyfin_types::network::NetworkConfiguration;
use jellyfin_types::playback::{
    GeneralCommand, GeneralCommandType, PlayCommand, PlayMethod, PlayRequest,
    PlaybackOrder, PlaybackProgressInfo, PlayerStateInfo, PlaystateCommand, PlaystateRequest,
    RepeatMode,
};
use jellyfin_types::session::SessionInfoDto;
use jellyfin_types::syncplay::{
    GroupInfoDto, GroupRepeatMode, GroupShuffleMode, GroupStateType, GroupStateUpdate,
    GroupUpdate, GroupUpdateType, PlayQueueUpdate, PlayQueueUpdateReason, SendCommand,
    SendCommandType, SyncPlayQueueItem,
};
use jellyfin_types::system::{
    ActivityLogEntry, InstallationInfo, LibraryUpdateInfo, LogLevel, PackageInfo, PluginInfo,
    PluginStatus, TaskCompletionStatus, TaskInfo, TaskResult, TaskState, TaskTriggerInfo,
    TimerEventInfo, VersionInfo,
};
use jellyfin_types::user::{
    SubtitlePlaybackMode, UserConfiguration, UserDataChangeInfo, UserDto, UserItemDataDto,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            EncodingOptions,
            DownMixStereoAlgorithms,
            HardwareAccelerationType,
            TonemappingAlgorithm,
            TonemappingMode,
            TonemappingRange,
            EncoderPreset,
            DeinterlaceMethod,
            LibraryOptions,
            MediaPathInfo,
            TypeOptions,
            ImageOption,
            ImageType,
            EmbeddedSubtitleOptions,
            NetworkConfiguration,
            MediaStream,
            MediaStreamType,
            VideoRange,
            VideoRangeType,
            AudioSpatialFormat,
            SubtitleDeliveryMethod,
            MediaUpdateInfoDto,
            MediaUpdateInfoPathDto,
            BaseItemDto,
            MediaType,
            QueueItem,
            UserConfiguration,
            SubtitlePlaybackMode,
            UserItemDataDto,
            UserDataChangeInfo,
            UserDto,
            PlaybackProgressInfo,
            PlayerStateInfo,
            PlayMethod,
            RepeatMode,
            PlaybackOrder,
            PlayRequest,
            PlayCommand,
            PlaystateRequest,
            PlaystateCommand,
            GeneralCommand,
            GeneralCommandType,
            SessionInfoDto,
            SendCommand,
            SendCommandType,
            GroupUpdate,
            GroupUpdateType,
            GroupInfoDto,
            GroupStateType,
            GroupStateUpdate,
            PlayQueueUpdate,
            PlayQueueUpdateReason,
            SyncPlayQueueItem,
            GroupShuffleMode,
            GroupRepeatMode,
            ActivityLogEntry,
            LogLevel,
            TaskResult,
            TaskCompletionStatus,
            TaskInfo,
            TaskState,
            TaskTriggerInfo,
            InstallationInfo,
            PackageInfo,
            VersionInfo,
            PluginInfo,
            PluginStatus,
            LibraryUpdateInfo,
            TimerEventInfo,
            SessionMessageType,
        )
    ),
    info(
        title = "Jellyfin data transfer objects",
        description = "Component schemas of the Jellyfin REST and WebSocket payloads",
        license(
            name = "MIT OR Apache-2.0"
        )
    )
)]
pub struct ApiDoc;

/// The component schemas as JSON.
pub fn components_json(pretty: bool) -> anyhow::Result<String> {
    let components = ApiDoc::openapi()
        .components
        .context("OpenAPI document has no components")?;
    let json = if pretty {
        serde_json::to_string_pretty(&components)?
    } else {
        serde_json::to_string(&components)?
    };
    Ok(json)
}
