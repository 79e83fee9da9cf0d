//! Audio, video and subtitle stream descriptors.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::query::{QueryWriter, ToQueryString};
use crate::wire::wire_enum;

wire_enum! {
    /// Dynamic range class of a video stream.
    pub enum VideoRange {
        Unknown => "Unknown",
        Sdr => "SDR",
        Hdr => "HDR",
    }
}

wire_enum! {
    /// Precise HDR format, including Dolby Vision fallback layers.
    pub enum VideoRangeType {
        Unknown => "Unknown",
        Sdr => "SDR",
        Hdr10 => "HDR10",
        Hlg => "HLG",
        Dovi => "DOVI",
        DoviWithHdr10 => "DOVIWithHDR10",
        DoviWithHlg => "DOVIWithHLG",
        DoviWithSdr => "DOVIWithSDR",
        DoviWithEl => "DOVIWithEL",
        DoviWithHdr10Plus => "DOVIWithHDR10Plus",
        DoviWithElHdr10Plus => "DOVIWithELHDR10Plus",
        DoviInvalid => "DOVIInvalid",
        Hdr10Plus => "HDR10Plus",
    }
}

wire_enum! {
    pub enum AudioSpatialFormat {
        None => "None",
        DolbyAtmos => "DolbyAtmos",
        Dtsx => "DTSX",
    }
}

wire_enum! {
    pub enum MediaStreamType {
        Audio => "Audio",
        Video => "Video",
        Subtitle => "Subtitle",
        EmbeddedImage => "EmbeddedImage",
        Data => "Data",
        Lyric => "Lyric",
    }
}

wire_enum! {
    /// How a subtitle stream reaches the client.
    pub enum SubtitleDeliveryMethod {
        Encode => "Encode",
        Embed => "Embed",
        External => "External",
        Hls => "Hls",
        Drop => "Drop",
    }
}

/// One stream inside a media source.
///
/// `Default` starts `VideoRange` and `VideoRangeType` at `Unknown` and
/// `AudioSpatialFormat` at `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MediaStream {
    /// Codec short name (e.g. "h264", "aac", "subrip")
    #[serde(rename = "Codec", default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,

    #[serde(rename = "CodecTag", default, skip_serializing_if = "Option::is_none")]
    pub codec_tag: Option<String>,

    /// ISO 639-2 language code
    #[serde(rename = "Language", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(rename = "ColorRange", default, skip_serializing_if = "Option::is_none")]
    pub color_range: Option<String>,

    #[serde(rename = "ColorSpace", default, skip_serializing_if = "Option::is_none")]
    pub color_space: Option<String>,

    #[serde(rename = "ColorTransfer", default, skip_serializing_if = "Option::is_none")]
    pub color_transfer: Option<String>,

    #[serde(rename = "ColorPrimaries", default, skip_serializing_if = "Option::is_none")]
    pub color_primaries: Option<String>,

    #[serde(rename = "DvVersionMajor", default, skip_serializing_if = "Option::is_none")]
    pub dv_version_major: Option<i32>,

    #[serde(rename = "DvVersionMinor", default, skip_serializing_if = "Option::is_none")]
    pub dv_version_minor: Option<i32>,

    #[serde(rename = "DvProfile", default, skip_serializing_if = "Option::is_none")]
    pub dv_profile: Option<i32>,

    #[serde(rename = "DvLevel", default, skip_serializing_if = "Option::is_none")]
    pub dv_level: Option<i32>,

    #[serde(rename = "RpuPresentFlag", default, skip_serializing_if = "Option::is_none")]
    pub rpu_present_flag: Option<i32>,

    #[serde(rename = "ElPresentFlag", default, skip_serializing_if = "Option::is_none")]
    pub el_present_flag: Option<i32>,

    #[serde(rename = "BlPresentFlag", default, skip_serializing_if = "Option::is_none")]
    pub bl_present_flag: Option<i32>,

    #[serde(rename = "DvBlSignalCompatibilityId", default, skip_serializing_if = "Option::is_none")]
    pub dv_bl_signal_compatibility_id: Option<i32>,

    /// Display rotation in degrees
    #[serde(rename = "Rotation", default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i32>,

    #[serde(rename = "Comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(rename = "TimeBase", default, skip_serializing_if = "Option::is_none")]
    pub time_base: Option<String>,

    #[serde(rename = "CodecTimeBase", default, skip_serializing_if = "Option::is_none")]
    pub codec_time_base: Option<String>,

    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "Hdr10PlusPresentFlag", default, skip_serializing_if = "Option::is_none")]
    pub hdr10_plus_present_flag: Option<bool>,

    #[serde(rename = "VideoRange", default, skip_serializing_if = "Option::is_none")]
    pub video_range: Option<VideoRange>,

    #[serde(rename = "VideoRangeType", default, skip_serializing_if = "Option::is_none")]
    pub video_range_type: Option<VideoRangeType>,

    #[serde(rename = "VideoDoViTitle", default, skip_serializing_if = "Option::is_none")]
    pub video_dovi_title: Option<String>,

    #[serde(rename = "AudioSpatialFormat", default, skip_serializing_if = "Option::is_none")]
    pub audio_spatial_format: Option<AudioSpatialFormat>,

    #[serde(rename = "LocalizedUndefined", default, skip_serializing_if = "Option::is_none")]
    pub localized_undefined: Option<String>,

    #[serde(rename = "LocalizedDefault", default, skip_serializing_if = "Option::is_none")]
    pub localized_default: Option<String>,

    #[serde(rename = "LocalizedForced", default, skip_serializing_if = "Option::is_none")]
    pub localized_forced: Option<String>,

    #[serde(rename = "LocalizedExternal", default, skip_serializing_if = "Option::is_none")]
    pub localized_external: Option<String>,

    #[serde(rename = "LocalizedHearingImpaired", default, skip_serializing_if = "Option::is_none")]
    pub localized_hearing_impaired: Option<String>,

    /// Server-composed label (e.g. "1080p H264 SDR")
    #[serde(rename = "DisplayTitle", default, skip_serializing_if = "Option::is_none")]
    pub display_title: Option<String>,

    #[serde(rename = "NalLengthSize", default, skip_serializing_if = "Option::is_none")]
    pub nal_length_size: Option<String>,

    #[serde(rename = "IsInterlaced", default, skip_serializing_if = "Option::is_none")]
    pub is_interlaced: Option<bool>,

    #[serde(rename = "IsAVC", default, skip_serializing_if = "Option::is_none")]
    pub is_avc: Option<bool>,

    /// Channel layout name (e.g. "5.1")
    #[serde(rename = "ChannelLayout", default, skip_serializing_if = "Option::is_none")]
    pub channel_layout: Option<String>,

    /// Bits per second
    #[serde(rename = "BitRate", default, skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<i32>,

    #[serde(rename = "BitDepth", default, skip_serializing_if = "Option::is_none")]
    pub bit_depth: Option<i32>,

    #[serde(rename = "RefFrames", default, skip_serializing_if = "Option::is_none")]
    pub ref_frames: Option<i32>,

    #[serde(rename = "PacketLength", default, skip_serializing_if = "Option::is_none")]
    pub packet_length: Option<i32>,

    #[serde(rename = "Channels", default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<i32>,

    /// Audio sample rate in Hz
    #[serde(rename = "SampleRate", default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<i32>,

    #[serde(rename = "IsDefault", default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,

    #[serde(rename = "IsForced", default, skip_serializing_if = "Option::is_none")]
    pub is_forced: Option<bool>,

    #[serde(rename = "IsHearingImpaired", default, skip_serializing_if = "Option::is_none")]
    pub is_hearing_impaired: Option<bool>,

    #[serde(rename = "Height", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,

    #[serde(rename = "Width", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,

    #[serde(rename = "AverageFrameRate", default, skip_serializing_if = "Option::is_none")]
    pub average_frame_rate: Option<f32>,

    #[serde(rename = "RealFrameRate", default, skip_serializing_if = "Option::is_none")]
    pub real_frame_rate: Option<f32>,

    #[serde(rename = "ReferenceFrameRate", default, skip_serializing_if = "Option::is_none")]
    pub reference_frame_rate: Option<f32>,

    /// Codec profile (e.g. "High", "Main 10")
    #[serde(rename = "Profile", default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub stream_type: Option<MediaStreamType>,

    #[serde(rename = "AspectRatio", default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,

    /// Position of the stream within its media source
    #[serde(rename = "Index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,

    #[serde(rename = "Score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,

    #[serde(rename = "IsExternal", default, skip_serializing_if = "Option::is_none")]
    pub is_external: Option<bool>,

    #[serde(rename = "DeliveryMethod", default, skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<SubtitleDeliveryMethod>,

    #[serde(rename = "DeliveryUrl", default, skip_serializing_if = "Option::is_none")]
    pub delivery_url: Option<String>,

    #[serde(rename = "IsExternalUrl", default, skip_serializing_if = "Option::is_none")]
    pub is_external_url: Option<bool>,

    #[serde(rename = "IsTextSubtitleStream", default, skip_serializing_if = "Option::is_none")]
    pub is_text_subtitle_stream: Option<bool>,

    #[serde(rename = "SupportsExternalStream", default, skip_serializing_if = "Option::is_none")]
    pub supports_external_stream: Option<bool>,

    /// File path of an external stream
    #[serde(rename = "Path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(rename = "PixelFormat", default, skip_serializing_if = "Option::is_none")]
    pub pixel_format: Option<String>,

    #[serde(rename = "Level", default, skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,

    #[serde(rename = "IsAnamorphic", default, skip_serializing_if = "Option::is_none")]
    pub is_anamorphic: Option<bool>,
}

impl Default for MediaStream {
    fn default() -> Self {
        Self {
            codec: None,
            codec_tag: None,
            language: None,
            color_range: None,
            color_space: None,
            color_transfer: None,
            color_primaries: None,
            dv_version_major: None,
            dv_version_minor: None,
            dv_profile: None,
            dv_level: None,
            rpu_present_flag: None,
            el_present_flag: None,
            bl_present_flag: None,
            dv_bl_signal_compatibility_id: None,
            rotation: None,
            comment: None,
            time_base: None,
            codec_time_base: None,
            title: None,
            hdr10_plus_present_flag: None,
            video_range: Some(VideoRange::Unknown),
            video_range_type: Some(VideoRangeType::Unknown),
            video_dovi_title: None,
            audio_spatial_format: Some(AudioSpatialFormat::None),
            localized_undefined: None,
            localized_default: None,
            localized_forced: None,
            localized_external: None,
            localized_hearing_impaired: None,
            display_title: None,
            nal_length_size: None,
            is_interlaced: None,
            is_avc: None,
            channel_layout: None,
            bit_rate: None,
            bit_depth: None,
            ref_frames: None,
            packet_length: None,
            channels: None,
            sample_rate: None,
            is_default: None,
            is_forced: None,
            is_hearing_impaired: None,
            height: None,
            width: None,
            average_frame_rate: None,
            real_frame_rate: None,
            reference_frame_rate: None,
            profile: None,
            stream_type: None,
            aspect_ratio: None,
            index: None,
            score: None,
            is_external: None,
            delivery_method: None,
            delivery_url: None,
            is_external_url: None,
            is_text_subtitle_stream: None,
            supports_external_stream: None,
            path: None,
            pixel_format: None,
            level: None,
            is_anamorphic: None,
        }
    }
}

impl MediaStream {
    /// A video stream descriptor.
    pub fn video(codec: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            stream_type: Some(MediaStreamType::Video),
            codec: Some(codec.into()),
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    /// An audio stream descriptor.
    pub fn audio(codec: impl Into<String>, channels: i32) -> Self {
        Self {
            stream_type: Some(MediaStreamType::Audio),
            codec: Some(codec.into()),
            channels: Some(channels),
            ..Default::default()
        }
    }

    pub fn with_index(mut self, index: i32) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_video_range(mut self, range: VideoRange, range_type: VideoRangeType) -> Self {
        self.video_range = Some(range);
        self.video_range_type = Some(range_type);
        self
    }
}

impl ToQueryString for MediaStream {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("Codec", &self.codec);
        query.value("CodecTag", &self.codec_tag);
        query.value("Language", &self.language);
        query.value("ColorRange", &self.color_range);
        query.value("ColorSpace", &self.color_space);
        query.value("ColorTransfer", &self.color_transfer);
        query.value("ColorPrimaries", &self.color_primaries);
        query.value("DvVersionMajor", &self.dv_version_major);
        query.value("DvVersionMinor", &self.dv_version_minor);
        query.value("DvProfile", &self.dv_profile);
        query.value("DvLevel", &self.dv_level);
        query.value("RpuPresentFlag", &self.rpu_present_flag);
        query.value("ElPresentFlag", &self.el_present_flag);
        query.value("BlPresentFlag", &self.bl_present_flag);
        query.value(
            "DvBlSignalCompatibilityId",
            &self.dv_bl_signal_compatibility_id,
        );
        query.value("Rotation", &self.rotation);
        query.value("Comment", &self.comment);
        query.value("TimeBase", &self.time_base);
        query.value("CodecTimeBase", &self.codec_time_base);
        query.value("Title", &self.title);
        query.value("Hdr10PlusPresentFlag", &self.hdr10_plus_present_flag);
        query.value("VideoRange", &self.video_range);
        query.value("VideoRangeType", &self.video_range_type);
        query.value("VideoDoViTitle", &self.video_dovi_title);
        query.value("AudioSpatialFormat", &self.audio_spatial_format);
        query.value("LocalizedUndefined", &self.localized_undefined);
        query.value("LocalizedDefault", &self.localized_default);
        query.value("LocalizedForced", &self.localized_forced);
        query.value("LocalizedExternal", &self.localized_external);
        query.value("LocalizedHearingImpaired", &self.localized_hearing_impaired);
        query.value("DisplayTitle", &self.display_title);
        query.value("NalLengthSize", &self.nal_length_size);
        query.value("IsInterlaced", &self.is_interlaced);
        query.value("IsAVC", &self.is_avc);
        query.value("ChannelLayout", &self.channel_layout);
        query.value("BitRate", &self.bit_rate);
        query.value("BitDepth", &self.bit_depth);
        query.value("RefFrames", &self.ref_frames);
        query.value("PacketLength", &self.packet_length);
        query.value("Channels", &self.channels);
        query.value("SampleRate", &self.sample_rate);
        query.value("IsDefault", &self.is_default);
        query.value("IsForced", &self.is_forced);
        query.value("IsHearingImpaired", &self.is_hearing_impaired);
        query.value("Height", &self.height);
        query.value("Width", &self.width);
        query.value("AverageFrameRate", &self.average_frame_rate);
        query.value("RealFrameRate", &self.real_frame_rate);
        query.value("ReferenceFrameRate", &self.reference_frame_rate);
        query.value("Profile", &self.profile);
        query.value("Type", &self.stream_type);
        query.value("AspectRatio", &self.aspect_ratio);
        query.value("Index", &self.index);
        query.value("Score", &self.score);
        query.value("IsExternal", &self.is_external);
        query.value("DeliveryMethod", &self.delivery_method);
        query.value("DeliveryUrl", &self.delivery_url);
        query.value("IsExternalUrl", &self.is_external_url);
        query.value("IsTextSubtitleStream", &self.is_text_subtitle_stream);
        query.value("SupportsExternalStream", &self.supports_external_stream);
        query.value("Path", &self.path);
        query.value("PixelFormat", &self.pixel_format);
        query.value("Level", &self.level);
        query.value("IsAnamorphic", &self.is_anamorphic);
    }
}
