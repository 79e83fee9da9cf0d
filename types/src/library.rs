//! Per-library settings.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::query::{QueryWriter, ToQueryString};
use crate::wire::wire_enum;

wire_enum! {
    /// Which embedded subtitle streams are exposed.
    pub enum EmbeddedSubtitleOptions {
        AllowAll => "AllowAll",
        AllowText => "AllowText",
        AllowImage => "AllowImage",
        AllowNone => "AllowNone",
    }
}

wire_enum! {
    /// Kind of artwork attached to an item.
    pub enum ImageType {
        Primary => "Primary",
        Art => "Art",
        Backdrop => "Backdrop",
        Banner => "Banner",
        Logo => "Logo",
        Thumb => "Thumb",
        Disc => "Disc",
        Box => "Box",
        Screenshot => "Screenshot",
        Menu => "Menu",
        Chapter => "Chapter",
        BoxRear => "BoxRear",
        Profile => "Profile",
    }
}

/// A folder that belongs to a library.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MediaPathInfo {
    #[serde(rename = "Path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl MediaPathInfo {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl ToQueryString for MediaPathInfo {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("Path", &self.path);
    }
}

/// Image download limits for one image type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ImageOption {
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub image_type: Option<ImageType>,

    /// Maximum number of images to fetch
    #[serde(rename = "Limit", default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    /// Minimum accepted width in pixels
    #[serde(rename = "MinWidth", default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<i32>,
}

impl ToQueryString for ImageOption {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("Type", &self.image_type);
        query.value("Limit", &self.limit);
        query.value("MinWidth", &self.min_width);
    }
}

/// Metadata and image fetcher selection for one item kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TypeOptions {
    /// Item kind these options apply to (e.g. "Movie", "Series")
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(rename = "MetadataFetchers", default, skip_serializing_if = "Option::is_none")]
    pub metadata_fetchers: Option<Vec<String>>,

    #[serde(rename = "MetadataFetcherOrder", default, skip_serializing_if = "Option::is_none")]
    pub metadata_fetcher_order: Option<Vec<String>>,

    #[serde(rename = "ImageFetchers", default, skip_serializing_if = "Option::is_none")]
    pub image_fetchers: Option<Vec<String>>,

    #[serde(rename = "ImageFetcherOrder", default, skip_serializing_if = "Option::is_none")]
    pub image_fetcher_order: Option<Vec<String>>,

    #[serde(rename = "ImageOptions", default, skip_serializing_if = "Option::is_none")]
    pub image_options: Option<Vec<ImageOption>>,
}

impl ToQueryString for TypeOptions {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("Type", &self.item_type);
        query.values("MetadataFetchers", &self.metadata_fetchers);
        query.values("MetadataFetcherOrder", &self.metadata_fetcher_order);
        query.values("ImageFetchers", &self.image_fetchers);
        query.values("ImageFetcherOrder", &self.image_fetcher_order);
        query.records("ImageOptions", &self.image_options);
    }
}

/// Settings of one media library.
///
/// `Default` sets `SaveLyricsWithMedia`, `SaveTrickplayWithMedia`,
/// `PreferNonstandardArtistsTag` and `UseCustomTagDelimiters` to `false`;
/// everything else starts unset. Decoding never fills these in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LibraryOptions {
    #[serde(rename = "Enabled", default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(rename = "EnablePhotos", default, skip_serializing_if = "Option::is_none")]
    pub enable_photos: Option<bool>,

    /// Watch library folders for file system changes
    #[serde(rename = "EnableRealtimeMonitor", default, skip_serializing_if = "Option::is_none")]
    pub enable_realtime_monitor: Option<bool>,

    /// Run loudness (LUFS) analysis on audio
    #[serde(rename = "EnableLUFSScan", default, skip_serializing_if = "Option::is_none")]
    pub enable_lufs_scan: Option<bool>,

    #[serde(
        rename = "EnableChapterImageExtraction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_chapter_image_extraction: Option<bool>,

    #[serde(
        rename = "ExtractChapterImagesDuringLibraryScan",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub extract_chapter_images_during_library_scan: Option<bool>,

    #[serde(
        rename = "EnableTrickplayImageExtraction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_trickplay_image_extraction: Option<bool>,

    #[serde(
        rename = "ExtractTrickplayImagesDuringLibraryScan",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub extract_trickplay_images_during_library_scan: Option<bool>,

    /// Folders making up the library
    #[serde(rename = "PathInfos", default, skip_serializing_if = "Option::is_none")]
    pub path_infos: Option<Vec<MediaPathInfo>>,

    /// Write NFO files next to the media
    #[serde(rename = "SaveLocalMetadata", default, skip_serializing_if = "Option::is_none")]
    pub save_local_metadata: Option<bool>,

    #[serde(rename = "EnableInternetProviders", default, skip_serializing_if = "Option::is_none")]
    pub enable_internet_providers: Option<bool>,

    #[serde(
        rename = "EnableAutomaticSeriesGrouping",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_automatic_series_grouping: Option<bool>,

    #[serde(rename = "EnableEmbeddedTitles", default, skip_serializing_if = "Option::is_none")]
    pub enable_embedded_titles: Option<bool>,

    #[serde(
        rename = "EnableEmbeddedExtrasTitles",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_embedded_extras_titles: Option<bool>,

    #[serde(
        rename = "EnableEmbeddedEpisodeInfos",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_embedded_episode_infos: Option<bool>,

    /// Days between automatic metadata refreshes (0 disables)
    #[serde(
        rename = "AutomaticRefreshIntervalDays",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub automatic_refresh_interval_days: Option<i32>,

    /// ISO 639 language code (e.g. "en")
    #[serde(rename = "PreferredMetadataLanguage", default, skip_serializing_if = "Option::is_none")]
    pub preferred_metadata_language: Option<String>,

    /// ISO 3166 country code (e.g. "US")
    #[serde(rename = "MetadataCountryCode", default, skip_serializing_if = "Option::is_none")]
    pub metadata_country_code: Option<String>,

    #[serde(rename = "SeasonZeroDisplayName", default, skip_serializing_if = "Option::is_none")]
    pub season_zero_display_name: Option<String>,

    #[serde(rename = "MetadataSavers", default, skip_serializing_if = "Option::is_none")]
    pub metadata_savers: Option<Vec<String>>,

    #[serde(
        rename = "DisabledLocalMetadataReaders",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub disabled_local_metadata_readers: Option<Vec<String>>,

    #[serde(rename = "LocalMetadataReaderOrder", default, skip_serializing_if = "Option::is_none")]
    pub local_metadata_reader_order: Option<Vec<String>>,

    #[serde(rename = "DisabledSubtitleFetchers", default, skip_serializing_if = "Option::is_none")]
    pub disabled_subtitle_fetchers: Option<Vec<String>>,

    #[serde(rename = "SubtitleFetcherOrder", default, skip_serializing_if = "Option::is_none")]
    pub subtitle_fetcher_order: Option<Vec<String>>,

    #[serde(
        rename = "DisabledMediaSegmentProviders",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub disabled_media_segment_providers: Option<Vec<String>>,

    #[serde(rename = "MediaSegmentProviderOrder", default, skip_serializing_if = "Option::is_none")]
    pub media_segment_provider_order: Option<Vec<String>>,

    #[serde(
        rename = "SkipSubtitlesIfEmbeddedSubtitlesPresent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub skip_subtitles_if_embedded_subtitles_present: Option<bool>,

    #[serde(
        rename = "SkipSubtitlesIfAudioTrackMatches",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub skip_subtitles_if_audio_track_matches: Option<bool>,

    #[serde(rename = "SubtitleDownloadLanguages", default, skip_serializing_if = "Option::is_none")]
    pub subtitle_download_languages: Option<Vec<String>>,

    #[serde(
        rename = "RequirePerfectSubtitleMatch",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub require_perfect_subtitle_match: Option<bool>,

    #[serde(rename = "SaveSubtitlesWithMedia", default, skip_serializing_if = "Option::is_none")]
    pub save_subtitles_with_media: Option<bool>,

    #[serde(rename = "SaveLyricsWithMedia", default, skip_serializing_if = "Option::is_none")]
    pub save_lyrics_with_media: Option<bool>,

    #[serde(rename = "SaveTrickplayWithMedia", default, skip_serializing_if = "Option::is_none")]
    pub save_trickplay_with_media: Option<bool>,

    #[serde(rename = "DisabledLyricFetchers", default, skip_serializing_if = "Option::is_none")]
    pub disabled_lyric_fetchers: Option<Vec<String>>,

    #[serde(rename = "LyricFetcherOrder", default, skip_serializing_if = "Option::is_none")]
    pub lyric_fetcher_order: Option<Vec<String>>,

    #[serde(
        rename = "PreferNonstandardArtistsTag",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub prefer_nonstandard_artists_tag: Option<bool>,

    #[serde(rename = "UseCustomTagDelimiters", default, skip_serializing_if = "Option::is_none")]
    pub use_custom_tag_delimiters: Option<bool>,

    /// Characters that split multi-value tags
    #[serde(rename = "CustomTagDelimiters", default, skip_serializing_if = "Option::is_none")]
    pub custom_tag_delimiters: Option<Vec<String>>,

    /// Tag values never split on delimiters (e.g. "AC/DC")
    #[serde(rename = "DelimiterWhitelist", default, skip_serializing_if = "Option::is_none")]
    pub delimiter_whitelist: Option<Vec<String>>,

    #[serde(
        rename = "AutomaticallyAddToCollection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub automatically_add_to_collection: Option<bool>,

    #[serde(rename = "AllowEmbeddedSubtitles", default, skip_serializing_if = "Option::is_none")]
    pub allow_embedded_subtitles: Option<EmbeddedSubtitleOptions>,

    #[serde(rename = "TypeOptions", default, skip_serializing_if = "Option::is_none")]
    pub type_options: Option<Vec<TypeOptions>>,
}

impl Default for LibraryOptions {
    fn default() -> Self {
        Self {
            enabled: None,
            enable_photos: None,
            enable_realtime_monitor: None,
            enable_lufs_scan: None,
            enable_chapter_image_extraction: None,
            extract_chapter_images_during_library_scan: None,
            enable_trickplay_image_extraction: None,
            extract_trickplay_images_during_library_scan: None,
            path_infos: None,
            save_local_metadata: None,
            enable_internet_providers: None,
            enable_automatic_series_grouping: None,
            enable_embedded_titles: None,
            enable_embedded_extras_titles: None,
            enable_embedded_episode_infos: None,
            automatic_refresh_interval_days: None,
            preferred_metadata_language: None,
            metadata_country_code: None,
            season_zero_display_name: None,
            metadata_savers: None,
            disabled_local_metadata_readers: None,
            local_metadata_reader_order: None,
            disabled_subtitle_fetchers: None,
            subtitle_fetcher_order: None,
            disabled_media_segment_providers: None,
            media_segment_provider_order: None,
            skip_subtitles_if_embedded_subtitles_present: None,
            skip_subtitles_if_audio_track_matches: None,
            subtitle_download_languages: None,
            require_perfect_subtitle_match: None,
            save_subtitles_with_media: None,
            save_lyrics_with_media: Some(false),
            save_trickplay_with_media: Some(false),
            disabled_lyric_fetchers: None,
            lyric_fetcher_order: None,
            prefer_nonstandard_artists_tag: Some(false),
            use_custom_tag_delimiters: Some(false),
            custom_tag_delimiters: None,
            delimiter_whitelist: None,
            automatically_add_to_collection: None,
            allow_embedded_subtitles: None,
            type_options: None,
        }
    }
}

impl LibraryOptions {
    /// Append a folder to `PathInfos`.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path_infos
            .get_or_insert_with(Vec::new)
            .push(MediaPathInfo::new(path));
        self
    }

    pub fn with_metadata_language(
        mut self,
        language: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.preferred_metadata_language = Some(language.into());
        self.metadata_country_code = Some(country.into());
        self
    }

    pub fn with_type_options(mut self, options: TypeOptions) -> Self {
        self.type_options.get_or_insert_with(Vec::new).push(options);
        self
    }
}

impl ToQueryString for LibraryOptions {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("Enabled", &self.enabled);
        query.value("EnablePhotos", &self.enable_photos);
        query.value("EnableRealtimeMonitor", &self.enable_realtime_monitor);
        query.value("EnableLUFSScan", &self.enable_lufs_scan);
        query.value(
            "EnableChapterImageExtraction",
            &self.enable_chapter_image_extraction,
        );
        query.value(
            "ExtractChapterImagesDuringLibraryScan",
            &self.extract_chapter_images_during_library_scan,
        );
        query.value(
            "EnableTrickplayImageExtraction",
            &self.enable_trickplay_image_extraction,
        );
        query.value(
            "ExtractTrickplayImagesDuringLibraryScan",
            &self.extract_trickplay_images_during_library_scan,
        );
        query.records("PathInfos", &self.path_infos);
        query.value("SaveLocalMetadata", &self.save_local_metadata);
        query.value("EnableInternetProviders", &self.enable_internet_providers);
        query.value(
            "EnableAutomaticSeriesGrouping",
            &self.enable_automatic_series_grouping,
        );
        query.value("EnableEmbeddedTitles", &self.enable_embedded_titles);
        query.value("EnableEmbeddedExtrasTitles", &self.enable_embedded_extras_titles);
        query.value("EnableEmbeddedEpisodeInfos", &self.enable_embedded_episode_infos);
        query.value(
            "AutomaticRefreshIntervalDays",
            &self.automatic_refresh_interval_days,
        );
        query.value("PreferredMetadataLanguage", &self.preferred_metadata_language);
        query.value("MetadataCountryCode", &self.metadata_country_code);
        query.value("SeasonZeroDisplayName", &self.season_zero_display_name);
        query.values("MetadataSavers", &self.metadata_savers);
        query.values(
            "DisabledLocalMetadataReaders",
            &self.disabled_local_metadata_readers,
        );
        query.values("LocalMetadataReaderOrder", &self.local_metadata_reader_order);
        query.values("DisabledSubtitleFetchers", &self.disabled_subtitle_fetchers);
        query.values("SubtitleFetcherOrder", &self.subtitle_fetcher_order);
        query.values(
            "DisabledMediaSegmentProviders",
            &self.disabled_media_segment_providers,
        );
        query.values("MediaSegmentProviderOrder", &self.media_segment_provider_order);
        query.value(
            "SkipSubtitlesIfEmbeddedSubtitlesPresent",
            &self.skip_subtitles_if_embedded_subtitles_present,
        );
        query.value(
            "SkipSubtitlesIfAudioTrackMatches",
            &self.skip_subtitles_if_audio_track_matches,
        );
        query.values("SubtitleDownloadLanguages", &self.subtitle_download_languages);
        query.value(
            "RequirePerfectSubtitleMatch",
            &self.require_perfect_subtitle_match,
        );
        query.value("SaveSubtitlesWithMedia", &self.save_subtitles_with_media);
        query.value("SaveLyricsWithMedia", &self.save_lyrics_with_media);
        query.value("SaveTrickplayWithMedia", &self.save_trickplay_with_media);
        query.values("DisabledLyricFetchers", &self.disabled_lyric_fetchers);
        query.values("LyricFetcherOrder", &self.lyric_fetcher_order);
        query.value(
            "PreferNonstandardArtistsTag",
            &self.prefer_nonstandard_artists_tag,
        );
        query.value("UseCustomTagDelimiters", &self.use_custom_tag_delimiters);
        query.values("CustomTagDelimiters", &self.custom_tag_delimiters);
        query.values("DelimiterWhitelist", &self.delimiter_whitelist);
        query.value(
            "AutomaticallyAddToCollection",
            &self.automatically_add_to_collection,
        );
        query.value("AllowEmbeddedSubtitles", &self.allow_embedded_subtitles);
        query.records("TypeOptions", &self.type_options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::{assert_full_dto, string_pair};
    use serde_json::json;

    #[test]
    fn test_default_sets_fixed_fields_only() {
        let json = serde_json::to_value(LibraryOptions::default()).unwrap();
        assert_eq!(
            json,
            json!({
                "SaveLyricsWithMedia": false,
                "SaveTrickplayWithMedia": false,
                "PreferNonstandardArtistsTag": false,
                "UseCustomTagDelimiters": false
            })
        );
    }

    #[test]
    fn test_decoding_does_not_apply_defaults() {
        let options: LibraryOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(options.save_lyrics_with_media, None);
        assert_ne!(options, LibraryOptions::default());
    }

    #[test]
    fn test_round_trip_with_nested_records() {
        let options = LibraryOptions::default()
            .with_path("/media/movies")
            .with_path("/media/more movies")
            .with_metadata_language("en", "US")
            .with_type_options(TypeOptions {
                item_type: Some("Movie".to_string()),
                image_options: Some(vec![ImageOption {
                    image_type: Some(ImageType::Backdrop),
                    limit: Some(3),
                    min_width: Some(1280),
                }]),
                ..Default::default()
            });
        let options = LibraryOptions {
            enable_lufs_scan: Some(true),
            allow_embedded_subtitles: Some(EmbeddedSubtitleOptions::AllowText),
            ..options
        };

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["EnableLUFSScan"], json!(true));
        assert_eq!(json["PathInfos"][1]["Path"], json!("/media/more movies"));
        assert_eq!(json["TypeOptions"][0]["ImageOptions"][0]["Type"], json!("Backdrop"));

        let back: LibraryOptions = serde_json::from_value(json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_query_string_with_nested_lists() {
        let options = LibraryOptions {
            enabled: Some(true),
            path_infos: Some(vec![
                MediaPathInfo::new("/a"),
                MediaPathInfo::new("/b"),
            ]),
            ..serde_json::from_value(json!({})).unwrap()
        };

        assert_eq!(
            options.to_query_string(),
            "Enabled=true&PathInfos[Path]=%2Fa&PathInfos[Path]=%2Fb"
        );
        assert_eq!(
            options.to_query_string_with_prefix("lib"),
            "lib[Enabled]=true&lib[PathInfos][0][Path]=%2Fa&lib[PathInfos][1][Path]=%2Fb"
        );
    }

    #[test]
    fn test_type_options_query() {
        let options = TypeOptions {
            item_type: Some("Series".to_string()),
            image_fetchers: Some(vec!["TheMovieDb".to_string()]),
            image_options: Some(vec![ImageOption {
                image_type: Some(ImageType::Primary),
                limit: Some(1),
                min_width: None,
            }]),
            ..Default::default()
        };
        assert_eq!(
            options.to_query_string_with_prefix("t"),
            "t[Type]=Series&t[ImageFetchers][0]=TheMovieDb\
             &t[ImageOptions][0][Type]=Primary&t[ImageOptions][0][Limit]=1"
        );
    }

    fn full_library_options() -> LibraryOptions {
        LibraryOptions {
            enabled: Some(true),
            enable_photos: Some(false),
            enable_realtime_monitor: Some(true),
            enable_lufs_scan: Some(false),
            enable_chapter_image_extraction: Some(true),
            extract_chapter_images_during_library_scan: Some(false),
            enable_trickplay_image_extraction: Some(true),
            extract_trickplay_images_during_library_scan: Some(false),
            path_infos: Some(vec![
                MediaPathInfo {
                    path: Some("/media/movies".to_string()),
                },
                MediaPathInfo {
                    path: Some("/media/more movies".to_string()),
                },
            ]),
            save_local_metadata: Some(false),
            enable_internet_providers: Some(true),
            enable_automatic_series_grouping: Some(false),
            enable_embedded_titles: Some(true),
            enable_embedded_extras_titles: Some(false),
            enable_embedded_episode_infos: Some(true),
            automatic_refresh_interval_days: Some(16),
            preferred_metadata_language: Some("preferred metadata language".to_string()),
            metadata_country_code: Some("metadata country code".to_string()),
            season_zero_display_name: Some("season zero display name".to_string()),
            metadata_savers: string_pair("savers"),
            disabled_local_metadata_readers: string_pair("readers"),
            local_metadata_reader_order: string_pair("order"),
            disabled_subtitle_fetchers: string_pair("fetchers"),
            subtitle_fetcher_order: string_pair("order"),
            disabled_media_segment_providers: string_pair("providers"),
            media_segment_provider_order: string_pair("order"),
            skip_subtitles_if_embedded_subtitles_present: Some(true),
            skip_subtitles_if_audio_track_matches: Some(false),
            subtitle_download_languages: string_pair("languages"),
            require_perfect_subtitle_match: Some(false),
            save_subtitles_with_media: Some(true),
            save_lyrics_with_media: Some(false),
            save_trickplay_with_media: Some(true),
            disabled_lyric_fetchers: string_pair("fetchers"),
            lyric_fetcher_order: string_pair("order"),
            prefer_nonstandard_artists_tag: Some(false),
            use_custom_tag_delimiters: Some(true),
            custom_tag_delimiters: string_pair("delimiters"),
            delimiter_whitelist: string_pair("whitelist"),
            automatically_add_to_collection: Some(false),
            allow_embedded_subtitles: Some(EmbeddedSubtitleOptions::AllowText),
            type_options: Some(vec![TypeOptions {
                item_type: Some("Movie".to_string()),
                metadata_fetchers: string_pair("fetcher"),
                metadata_fetcher_order: string_pair("fetcher"),
                image_fetchers: string_pair("image fetcher"),
                image_fetcher_order: string_pair("image fetcher"),
                image_options: Some(vec![
                    ImageOption {
                        image_type: Some(ImageType::Primary),
                        limit: Some(1),
                        min_width: Some(0),
                    },
                    ImageOption {
                        image_type: Some(ImageType::Art),
                        limit: Some(3),
                        min_width: Some(1280),
                    },
                ]),
            }]),
        }
    }

    #[test]
    fn test_fully_populated_round_trip_and_query() {
        assert_full_dto(&full_library_options(), 42);
    }
}
