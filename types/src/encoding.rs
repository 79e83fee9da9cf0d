//! Server-wide transcoding settings.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::query::{QueryWriter, ToQueryString};
use crate::wire::wire_enum;

wire_enum! {
    /// Stereo downmix algorithm.
    pub enum DownMixStereoAlgorithms {
        None => "None",
        Dave750 => "Dave750",
        NightmodeDialogue => "NightmodeDialogue",
        Rfc7845 => "Rfc7845",
        Ac4 => "Ac4",
    }
}

wire_enum! {
    /// Hardware acceleration backend used by the encoder.
    pub enum HardwareAccelerationType {
        None => "none",
        Amf => "amf",
        Qsv => "qsv",
        Nvenc => "nvenc",
        V4l2m2m => "v4l2m2m",
        Vaapi => "vaapi",
        VideoToolbox => "videotoolbox",
        Rkmpp => "rkmpp",
    }
}

wire_enum! {
    pub enum TonemappingAlgorithm {
        None => "none",
        Clip => "clip",
        Linear => "linear",
        Gamma => "gamma",
        Reinhard => "reinhard",
        Hable => "hable",
        Mobius => "mobius",
        Bt2390 => "bt2390",
    }
}

wire_enum! {
    pub enum TonemappingMode {
        Auto => "auto",
        Max => "max",
        Rgb => "rgb",
        Lum => "lum",
        Itp => "itp",
    }
}

wire_enum! {
    pub enum TonemappingRange {
        Auto => "auto",
        Tv => "tv",
        Pc => "pc",
    }
}

wire_enum! {
    /// x264/x265 speed preset.
    pub enum EncoderPreset {
        Auto => "auto",
        Placebo => "placebo",
        VerySlow => "veryslow",
        Slower => "slower",
        Slow => "slow",
        Medium => "medium",
        Fast => "fast",
        Faster => "faster",
        VeryFast => "veryfast",
        SuperFast => "superfast",
        UltraFast => "ultrafast",
    }
}

wire_enum! {
    pub enum DeinterlaceMethod {
        Yadif => "yadif",
        Bwdif => "bwdif",
    }
}

/// Transcoding configuration of a Jellyfin server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EncodingOptions {
    /// Number of encoder threads (-1 lets the encoder decide)
    #[serde(rename = "EncodingThreadCount", default, skip_serializing_if = "Option::is_none")]
    pub encoding_thread_count: Option<i32>,

    /// Directory for temporary transcoding output
    #[serde(rename = "TranscodingTempPath", default, skip_serializing_if = "Option::is_none")]
    pub transcoding_temp_path: Option<String>,

    /// Directory holding fallback fonts for subtitle burn-in
    #[serde(rename = "FallbackFontPath", default, skip_serializing_if = "Option::is_none")]
    pub fallback_font_path: Option<String>,

    #[serde(rename = "EnableFallbackFont", default, skip_serializing_if = "Option::is_none")]
    pub enable_fallback_font: Option<bool>,

    #[serde(rename = "EnableAudioVbr", default, skip_serializing_if = "Option::is_none")]
    pub enable_audio_vbr: Option<bool>,

    /// Center channel boost applied when downmixing to stereo
    #[serde(rename = "DownMixAudioBoost", default, skip_serializing_if = "Option::is_none")]
    pub down_mix_audio_boost: Option<f64>,

    #[serde(rename = "DownMixStereoAlgorithm", default, skip_serializing_if = "Option::is_none")]
    pub down_mix_stereo_algorithm: Option<DownMixStereoAlgorithms>,

    #[serde(rename = "MaxMuxingQueueSize", default, skip_serializing_if = "Option::is_none")]
    pub max_muxing_queue_size: Option<i32>,

    /// Pause transcoding when far enough ahead of the player
    #[serde(rename = "EnableThrottling", default, skip_serializing_if = "Option::is_none")]
    pub enable_throttling: Option<bool>,

    #[serde(rename = "ThrottleDelaySeconds", default, skip_serializing_if = "Option::is_none")]
    pub throttle_delay_seconds: Option<i32>,

    /// Delete already-served segments during playback
    #[serde(rename = "EnableSegmentDeletion", default, skip_serializing_if = "Option::is_none")]
    pub enable_segment_deletion: Option<bool>,

    #[serde(rename = "SegmentKeepSeconds", default, skip_serializing_if = "Option::is_none")]
    pub segment_keep_seconds: Option<i32>,

    #[serde(rename = "HardwareAccelerationType", default, skip_serializing_if = "Option::is_none")]
    pub hardware_acceleration_type: Option<HardwareAccelerationType>,

    /// Configured path to the ffmpeg binary
    #[serde(rename = "EncoderAppPath", default, skip_serializing_if = "Option::is_none")]
    pub encoder_app_path: Option<String>,

    /// Path to the ffmpeg binary as shown to users
    #[serde(rename = "EncoderAppPathDisplay", default, skip_serializing_if = "Option::is_none")]
    pub encoder_app_path_display: Option<String>,

    /// VA-API render node (e.g. "/dev/dri/renderD128")
    #[serde(rename = "VaapiDevice", default, skip_serializing_if = "Option::is_none")]
    pub vaapi_device: Option<String>,

    #[serde(rename = "QsvDevice", default, skip_serializing_if = "Option::is_none")]
    pub qsv_device: Option<String>,

    #[serde(rename = "EnableTonemapping", default, skip_serializing_if = "Option::is_none")]
    pub enable_tonemapping: Option<bool>,

    #[serde(rename = "EnableVppTonemapping", default, skip_serializing_if = "Option::is_none")]
    pub enable_vpp_tonemapping: Option<bool>,

    #[serde(
        rename = "EnableVideoToolboxTonemapping",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_video_toolbox_tonemapping: Option<bool>,

    #[serde(rename = "TonemappingAlgorithm", default, skip_serializing_if = "Option::is_none")]
    pub tonemapping_algorithm: Option<TonemappingAlgorithm>,

    #[serde(rename = "TonemappingMode", default, skip_serializing_if = "Option::is_none")]
    pub tonemapping_mode: Option<TonemappingMode>,

    #[serde(rename = "TonemappingRange", default, skip_serializing_if = "Option::is_none")]
    pub tonemapping_range: Option<TonemappingRange>,

    #[serde(rename = "TonemappingDesat", default, skip_serializing_if = "Option::is_none")]
    pub tonemapping_desat: Option<f64>,

    #[serde(rename = "TonemappingPeak", default, skip_serializing_if = "Option::is_none")]
    pub tonemapping_peak: Option<f64>,

    #[serde(rename = "TonemappingParam", default, skip_serializing_if = "Option::is_none")]
    pub tonemapping_param: Option<f64>,

    #[serde(rename = "VppTonemappingBrightness", default, skip_serializing_if = "Option::is_none")]
    pub vpp_tonemapping_brightness: Option<f64>,

    #[serde(rename = "VppTonemappingContrast", default, skip_serializing_if = "Option::is_none")]
    pub vpp_tonemapping_contrast: Option<f64>,

    /// Constant rate factor for H.264 software encoding
    #[serde(rename = "H264Crf", default, skip_serializing_if = "Option::is_none")]
    pub h264_crf: Option<i32>,

    /// Constant rate factor for H.265 software encoding
    #[serde(rename = "H265Crf", default, skip_serializing_if = "Option::is_none")]
    pub h265_crf: Option<i32>,

    #[serde(rename = "EncoderPreset", default, skip_serializing_if = "Option::is_none")]
    pub encoder_preset: Option<EncoderPreset>,

    #[serde(rename = "DeinterlaceDoubleRate", default, skip_serializing_if = "Option::is_none")]
    pub deinterlace_double_rate: Option<bool>,

    #[serde(rename = "DeinterlaceMethod", default, skip_serializing_if = "Option::is_none")]
    pub deinterlace_method: Option<DeinterlaceMethod>,

    #[serde(
        rename = "EnableDecodingColorDepth10Hevc",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_decoding_color_depth10_hevc: Option<bool>,

    #[serde(
        rename = "EnableDecodingColorDepth10Vp9",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_decoding_color_depth10_vp9: Option<bool>,

    #[serde(
        rename = "EnableDecodingColorDepth10HevcRext",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_decoding_color_depth10_hevc_rext: Option<bool>,

    #[serde(
        rename = "EnableDecodingColorDepth12HevcRext",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_decoding_color_depth12_hevc_rext: Option<bool>,

    #[serde(
        rename = "EnableEnhancedNvdecDecoder",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_enhanced_nvdec_decoder: Option<bool>,

    #[serde(
        rename = "PreferSystemNativeHwDecoder",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub prefer_system_native_hw_decoder: Option<bool>,

    #[serde(
        rename = "EnableIntelLowPowerH264HwEncoder",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_intel_low_power_h264_hw_encoder: Option<bool>,

    #[serde(
        rename = "EnableIntelLowPowerHevcHwEncoder",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_intel_low_power_hevc_hw_encoder: Option<bool>,

    #[serde(rename = "EnableHardwareEncoding", default, skip_serializing_if = "Option::is_none")]
    pub enable_hardware_encoding: Option<bool>,

    #[serde(rename = "AllowHevcEncoding", default, skip_serializing_if = "Option::is_none")]
    pub allow_hevc_encoding: Option<bool>,

    #[serde(rename = "AllowAv1Encoding", default, skip_serializing_if = "Option::is_none")]
    pub allow_av1_encoding: Option<bool>,

    #[serde(rename = "EnableSubtitleExtraction", default, skip_serializing_if = "Option::is_none")]
    pub enable_subtitle_extraction: Option<bool>,

    /// Codecs decoded in hardware (e.g. "h264", "hevc")
    #[serde(rename = "HardwareDecodingCodecs", default, skip_serializing_if = "Option::is_none")]
    pub hardware_decoding_codecs: Option<Vec<String>>,

    /// File extensions eligible for on-demand keyframe extraction
    #[serde(
        rename = "AllowOnDemandMetadataBasedKeyframeExtractionForExtensions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_on_demand_metadata_based_keyframe_extraction_for_extensions: Option<Vec<String>>,
}

impl EncodingOptions {
    pub fn with_hardware_acceleration(mut self, kind: HardwareAccelerationType) -> Self {
        self.hardware_acceleration_type = Some(kind);
        self
    }

    pub fn with_encoder_preset(mut self, preset: EncoderPreset) -> Self {
        self.encoder_preset = Some(preset);
        self
    }

    pub fn with_hardware_decoding_codecs<I, S>(mut self, codecs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hardware_decoding_codecs = Some(codecs.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_tonemapping(mut self, algorithm: TonemappingAlgorithm) -> Self {
        self.enable_tonemapping = Some(true);
        self.tonemapping_algorithm = Some(algorithm);
        self
    }
}

impl ToQueryString for EncodingOptions {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("EncodingThreadCount", &self.encoding_thread_count);
        query.value("TranscodingTempPath", &self.transcoding_temp_path);
        query.value("FallbackFontPath", &self.fallback_font_path);
        query.value("EnableFallbackFont", &self.enable_fallback_font);
        query.value("EnableAudioVbr", &self.enable_audio_vbr);
        query.value("DownMixAudioBoost", &self.down_mix_audio_boost);
        query.value("DownMixStereoAlgorithm", &self.down_mix_stereo_algorithm);
        query.value("MaxMuxingQueueSize", &self.max_muxing_queue_size);
        query.value("EnableThrottling", &self.enable_throttling);
        query.value("ThrottleDelaySeconds", &self.throttle_delay_seconds);
        query.value("EnableSegmentDeletion", &self.enable_segment_deletion);
        query.value("SegmentKeepSeconds", &self.segment_keep_seconds);
        query.value("HardwareAccelerationType", &self.hardware_acceleration_type);
        query.value("EncoderAppPath", &self.encoder_app_path);
        query.value("EncoderAppPathDisplay", &self.encoder_app_path_display);
        query.value("VaapiDevice", &self.vaapi_device);
        query.value("QsvDevice", &self.qsv_device);
        query.value("EnableTonemapping", &self.enable_tonemapping);
        query.value("EnableVppTonemapping", &self.enable_vpp_tonemapping);
        query.value(
            "EnableVideoToolboxTonemapping",
            &self.enable_video_toolbox_tonemapping,
        );
        query.value("TonemappingAlgorithm", &self.tonemapping_algorithm);
        query.value("TonemappingMode", &self.tonemapping_mode);
        query.value("TonemappingRange", &self.tonemapping_range);
        query.value("TonemappingDesat", &self.tonemapping_desat);
        query.value("TonemappingPeak", &self.tonemapping_peak);
        query.value("TonemappingParam", &self.tonemapping_param);
        query.value("VppTonemappingBrightness", &self.vpp_tonemapping_brightness);
        query.value("VppTonemappingContrast", &self.vpp_tonemapping_contrast);
        query.value("H264Crf", &self.h264_crf);
        query.value("H265Crf", &self.h265_crf);
        query.value("EncoderPreset", &self.encoder_preset);
        query.value("DeinterlaceDoubleRate", &self.deinterlace_double_rate);
        query.value("DeinterlaceMethod", &self.deinterlace_method);
        query.value(
            "EnableDecodingColorDepth10Hevc",
            &self.enable_decoding_color_depth10_hevc,
        );
        query.value(
            "EnableDecodingColorDepth10Vp9",
            &self.enable_decoding_color_depth10_vp9,
        );
        query.value(
            "EnableDecodingColorDepth10HevcRext",
            &self.enable_decoding_color_depth10_hevc_rext,
        );
        query.value(
            "EnableDecodingColorDepth12HevcRext",
            &self.enable_decoding_color_depth12_hevc_rext,
        );
        query.value("EnableEnhancedNvdecDecoder", &self.enable_enhanced_nvdec_decoder);
        query.value(
            "PreferSystemNativeHwDecoder",
            &self.prefer_system_native_hw_decoder,
        );
        query.value(
            "EnableIntelLowPowerH264HwEncoder",
            &self.enable_intel_low_power_h264_hw_encoder,
        );
        query.value(
            "EnableIntelLowPowerHevcHwEncoder",
            &self.enable_intel_low_power_hevc_hw_encoder,
        );
        query.value("EnableHardwareEncoding", &self.enable_hardware_encoding);
        query.value("AllowHevcEncoding", &self.allow_hevc_encoding);
        query.value("AllowAv1Encoding", &self.allow_av1_encoding);
        query.value("EnableSubtitleExtraction", &self.enable_subtitle_extraction);
        query.values("HardwareDecodingCodecs", &self.hardware_decoding_codecs);
        query.values(
            "AllowOnDemandMetadataBasedKeyframeExtractionForExtensions",
            &self.allow_on_demand_metadata_based_keyframe_extraction_for_extensions,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::{assert_full_dto, string_pair};
    use serde_json::json;

    #[test]
    fn test_decode_server_payload() {
        let options: EncodingOptions = serde_json::from_value(json!({
            "EncodingThreadCount": -1,
            "DownMixAudioBoost": 2,
            "DownMixStereoAlgorithm": "Dave750",
            "HardwareAccelerationType": "vaapi",
            "VaapiDevice": "/dev/dri/renderD128",
            "TonemappingAlgorithm": "bt2390",
            "EncoderPreset": "veryfast",
            "HardwareDecodingCodecs": ["h264", "hevc"],
            "SomeFutureField": true
        }))
        .unwrap();

        assert_eq!(options.encoding_thread_count, Some(-1));
        assert_eq!(options.down_mix_audio_boost, Some(2.0));
        assert_eq!(
            options.hardware_acceleration_type,
            Some(HardwareAccelerationType::Vaapi)
        );
        assert_eq!(options.encoder_preset, Some(EncoderPreset::VeryFast));
        assert_eq!(options.enable_throttling, None);
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let json = serde_json::to_value(EncodingOptions::default()).unwrap();
        assert_eq!(json, json!({}));

        let options = EncodingOptions::default().with_encoder_preset(EncoderPreset::Medium);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json, json!({ "EncoderPreset": "medium" }));
    }

    #[test]
    fn test_round_trip() {
        let options = EncodingOptions::default()
            .with_hardware_acceleration(HardwareAccelerationType::Nvenc)
            .with_tonemapping(TonemappingAlgorithm::Hable)
            .with_hardware_decoding_codecs(["h264", "av1"]);
        let options = EncodingOptions {
            tonemapping_desat: Some(0.5),
            h264_crf: Some(23),
            allow_on_demand_metadata_based_keyframe_extraction_for_extensions: Some(vec![
                "mkv".to_string(),
            ]),
            ..options
        };

        let json = serde_json::to_string(&options).unwrap();
        let back: EncodingOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_query_string() {
        let options = EncodingOptions {
            encoding_thread_count: Some(4),
            down_mix_audio_boost: Some(2.0),
            hardware_acceleration_type: Some(HardwareAccelerationType::Qsv),
            hardware_decoding_codecs: Some(vec!["h264".to_string(), "hevc".to_string()]),
            ..Default::default()
        };

        assert_eq!(
            options.to_query_string(),
            "EncodingThreadCount=4&DownMixAudioBoost=2.0&HardwareAccelerationType=qsv\
             &HardwareDecodingCodecs=h264&HardwareDecodingCodecs=hevc"
        );
        assert_eq!(
            options.to_query_string_with_prefix("enc"),
            "enc[EncodingThreadCount]=4&enc[DownMixAudioBoost]=2.0\
             &enc[HardwareAccelerationType]=qsv\
             &enc[HardwareDecodingCodecs][0]=h264&enc[HardwareDecodingCodecs][1]=hevc"
        );
    }

    #[test]
    fn test_equality_breaks_on_any_field() {
        let a = EncodingOptions::default().with_hardware_decoding_codecs(["h264", "hevc"]);
        let b = EncodingOptions::default().with_hardware_decoding_codecs(["hevc", "h264"]);
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }

    fn full_encoding_options() -> EncodingOptions {
        EncodingOptions {
            encoding_thread_count: Some(1),
            transcoding_temp_path: Some("transcoding temp path".to_string()),
            fallback_font_path: Some("fallback font path".to_string()),
            enable_fallback_font: Some(false),
            enable_audio_vbr: Some(true),
            down_mix_audio_boost: Some(6.5),
            down_mix_stereo_algorithm: Some(DownMixStereoAlgorithms::Dave750),
            max_muxing_queue_size: Some(8),
            enable_throttling: Some(true),
            throttle_delay_seconds: Some(10),
            enable_segment_deletion: Some(true),
            segment_keep_seconds: Some(12),
            hardware_acceleration_type: Some(HardwareAccelerationType::Amf),
            encoder_app_path: Some("encoder app path".to_string()),
            encoder_app_path_display: Some("encoder app path display".to_string()),
            vaapi_device: Some("vaapi device".to_string()),
            qsv_device: Some("qsv device".to_string()),
            enable_tonemapping: Some(false),
            enable_vpp_tonemapping: Some(true),
            enable_video_toolbox_tonemapping: Some(false),
            tonemapping_algorithm: Some(TonemappingAlgorithm::Clip),
            tonemapping_mode: Some(TonemappingMode::Max),
            tonemapping_range: Some(TonemappingRange::Tv),
            tonemapping_desat: Some(24.5),
            tonemapping_peak: Some(25.5),
            tonemapping_param: Some(26.5),
            vpp_tonemapping_brightness: Some(27.5),
            vpp_tonemapping_contrast: Some(28.5),
            h264_crf: Some(29),
            h265_crf: Some(30),
            encoder_preset: Some(EncoderPreset::Placebo),
            deinterlace_double_rate: Some(false),
            deinterlace_method: Some(DeinterlaceMethod::Bwdif),
            enable_decoding_color_depth10_hevc: Some(false),
            enable_decoding_color_depth10_vp9: Some(true),
            enable_decoding_color_depth10_hevc_rext: Some(false),
            enable_decoding_color_depth12_hevc_rext: Some(true),
            enable_enhanced_nvdec_decoder: Some(false),
            prefer_system_native_hw_decoder: Some(true),
            enable_intel_low_power_h264_hw_encoder: Some(false),
            enable_intel_low_power_hevc_hw_encoder: Some(true),
            enable_hardware_encoding: Some(false),
            allow_hevc_encoding: Some(true),
            allow_av1_encoding: Some(false),
            enable_subtitle_extraction: Some(true),
            hardware_decoding_codecs: string_pair("codecs"),
            allow_on_demand_metadata_based_keyframe_extraction_for_extensions: string_pair(
                "extensions",
            ),
        }
    }

    #[test]
    fn test_fully_populated_round_trip_and_query() {
        assert_full_dto(&full_encoding_options(), 47);
    }
}
