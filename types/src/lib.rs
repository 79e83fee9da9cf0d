//! Data-transfer types for the Jellyfin HTTP and WebSocket APIs.
//!
//! Every record serializes with the server's PascalCase keys and omits
//! unset fields. Records used as request parameters implement
//! [`ToQueryString`]. WebSocket frames are modelled in [`messages`].

pub mod encoding;
pub mod error;
pub mod item;
pub mod library;
pub mod media_stream;
pub mod media_update;
pub mod messages;
pub mod network;
pub mod playback;
pub mod query;
pub mod session;
pub mod syncplay;
pub mod system;
pub mod user;
mod wire;

// Re-export commonly used types
pub use encoding::{EncoderPreset, EncodingOptions, HardwareAccelerationType};
pub use error::{EnvelopeError, UnknownVariant};
pub use item::{BaseItemDto, MediaType, QueueItem};
pub use library::{LibraryOptions, MediaPathInfo, TypeOptions};
pub use media_stream::{MediaStream, MediaStreamType, VideoRange, VideoRangeType};
pub use media_update::{MediaUpdateInfoDto, MediaUpdateInfoPathDto};
pub use messages::{
    InboundWebSocketMessage, OutboundWebSocketMessage, SessionMessageType, WebSocketMessage,
};
pub use network::NetworkConfiguration;
pub use playback::{
    GeneralCommand, GeneralCommandType, PlayRequest, PlaybackProgressInfo, PlaybackStartInfo,
    PlaystateRequest, TICKS_PER_SECOND,
};
pub use query::{QueryValue, QueryWriter, ToQueryString};
pub use session::SessionInfoDto;
pub use syncplay::{GroupUpdate, SendCommand};
pub use system::{ActivityLogEntry, LibraryUpdateInfo, TaskInfo, TaskResult};
pub use user::{UserConfiguration, UserDataChangeInfo, UserDto, UserItemDataDto};
