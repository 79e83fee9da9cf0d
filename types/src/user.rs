//! Users, their preferences and per-item play state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::query::{QueryWriter, ToQueryString};
use crate::wire::wire_enum;

wire_enum! {
    /// When subtitles are turned on automatically.
    pub enum SubtitlePlaybackMode {
        Default => "Default",
        Always => "Always",
        OnlyForced => "OnlyForced",
        None => "None",
        Smart => "Smart",
    }
}

/// Playback and display preferences of a user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserConfiguration {
    /// Preferred audio language (ISO 639-2)
    #[serde(rename = "AudioLanguagePreference", default, skip_serializing_if = "Option::is_none")]
    pub audio_language_preference: Option<String>,

    #[serde(rename = "PlayDefaultAudioTrack", default, skip_serializing_if = "Option::is_none")]
    pub play_default_audio_track: Option<bool>,

    /// Preferred subtitle language (ISO 639-2)
    #[serde(
        rename = "SubtitleLanguagePreference",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subtitle_language_preference: Option<String>,

    #[serde(rename = "DisplayMissingEpisodes", default, skip_serializing_if = "Option::is_none")]
    pub display_missing_episodes: Option<bool>,

    #[serde(rename = "GroupedFolders", default, skip_serializing_if = "Option::is_none")]
    pub grouped_folders: Option<Vec<Uuid>>,

    #[serde(rename = "SubtitleMode", default, skip_serializing_if = "Option::is_none")]
    pub subtitle_mode: Option<SubtitlePlaybackMode>,

    #[serde(rename = "DisplayCollectionsView", default, skip_serializing_if = "Option::is_none")]
    pub display_collections_view: Option<bool>,

    #[serde(rename = "EnableLocalPassword", default, skip_serializing_if = "Option::is_none")]
    pub enable_local_password: Option<bool>,

    /// Library views in display order
    #[serde(rename = "OrderedViews", default, skip_serializing_if = "Option::is_none")]
    pub ordered_views: Option<Vec<Uuid>>,

    #[serde(rename = "LatestItemsExcludes", default, skip_serializing_if = "Option::is_none")]
    pub latest_items_excludes: Option<Vec<Uuid>>,

    #[serde(rename = "MyMediaExcludes", default, skip_serializing_if = "Option::is_none")]
    pub my_media_excludes: Option<Vec<Uuid>>,

    #[serde(rename = "HidePlayedInLatest", default, skip_serializing_if = "Option::is_none")]
    pub hide_played_in_latest: Option<bool>,

    #[serde(rename = "RememberAudioSelections", default, skip_serializing_if = "Option::is_none")]
    pub remember_audio_selections: Option<bool>,

    #[serde(
        rename = "RememberSubtitleSelections",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub remember_subtitle_selections: Option<bool>,

    #[serde(rename = "EnableNextEpisodeAutoPlay", default, skip_serializing_if = "Option::is_none")]
    pub enable_next_episode_auto_play: Option<bool>,

    #[serde(rename = "CastReceiverId", default, skip_serializing_if = "Option::is_none")]
    pub cast_receiver_id: Option<String>,
}

impl UserConfiguration {
    pub fn with_languages(
        mut self,
        audio: impl Into<String>,
        subtitles: impl Into<String>,
    ) -> Self {
        self.audio_language_preference = Some(audio.into());
        self.subtitle_language_preference = Some(subtitles.into());
        self
    }

    pub fn with_subtitle_mode(mut self, mode: SubtitlePlaybackMode) -> Self {
        self.subtitle_mode = Some(mode);
        self
    }
}

impl ToQueryString for UserConfiguration {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("AudioLanguagePreference", &self.audio_language_preference);
        query.value("PlayDefaultAudioTrack", &self.play_default_audio_track);
        query.value(
            "SubtitleLanguagePreference",
            &self.subtitle_language_preference,
        );
        query.value("DisplayMissingEpisodes", &self.display_missing_episodes);
        query.values("GroupedFolders", &self.grouped_folders);
        query.value("SubtitleMode", &self.subtitle_mode);
        query.value("DisplayCollectionsView", &self.display_collections_view);
        query.value("EnableLocalPassword", &self.enable_local_password);
        query.values("OrderedViews", &self.ordered_views);
        query.values("LatestItemsExcludes", &self.latest_items_excludes);
        query.values("MyMediaExcludes", &self.my_media_excludes);
        query.value("HidePlayedInLatest", &self.hide_played_in_latest);
        query.value("RememberAudioSelections", &self.remember_audio_selections);
        query.value(
            "RememberSubtitleSelections",
            &self.remember_subtitle_selections,
        );
        query.value(
            "EnableNextEpisodeAutoPlay",
            &self.enable_next_episode_auto_play,
        );
        query.value("CastReceiverId", &self.cast_receiver_id);
    }
}

/// A user's play state for one item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserItemDataDto {
    #[serde(rename = "Rating", default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(rename = "PlayedPercentage", default, skip_serializing_if = "Option::is_none")]
    pub played_percentage: Option<f64>,

    #[serde(rename = "UnplayedItemCount", default, skip_serializing_if = "Option::is_none")]
    pub unplayed_item_count: Option<i32>,

    #[serde(rename = "PlaybackPositionTicks", default, skip_serializing_if = "Option::is_none")]
    pub playback_position_ticks: Option<i64>,

    #[serde(rename = "PlayCount", default, skip_serializing_if = "Option::is_none")]
    pub play_count: Option<i32>,

    #[serde(rename = "IsFavorite", default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,

    #[serde(rename = "Likes", default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<bool>,

    #[serde(rename = "LastPlayedDate", default, skip_serializing_if = "Option::is_none")]
    pub last_played_date: Option<DateTime<Utc>>,

    #[serde(rename = "Played", default, skip_serializing_if = "Option::is_none")]
    pub played: Option<bool>,

    #[serde(rename = "Key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(rename = "ItemId", default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<Uuid>,
}

impl ToQueryString for UserItemDataDto {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("Rating", &self.rating);
        query.value("PlayedPercentage", &self.played_percentage);
        query.value("UnplayedItemCount", &self.unplayed_item_count);
        query.value("PlaybackPositionTicks", &self.playback_position_ticks);
        query.value("PlayCount", &self.play_count);
        query.value("IsFavorite", &self.is_favorite);
        query.value("Likes", &self.likes);
        query.value("LastPlayedDate", &self.last_played_date);
        query.value("Played", &self.played);
        query.value("Key", &self.key);
        query.value("ItemId", &self.item_id);
    }
}

/// Play-state changes of one user, pushed after playback or rating updates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserDataChangeInfo {
    #[serde(rename = "UserId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    #[serde(rename = "UserDataList", default, skip_serializing_if = "Option::is_none")]
    pub user_data_list: Option<Vec<UserItemDataDto>>,
}

/// A server user account.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserDto {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "ServerId", default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,

    #[serde(rename = "ServerName", default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,

    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[serde(rename = "PrimaryImageTag", default, skip_serializing_if = "Option::is_none")]
    pub primary_image_tag: Option<String>,

    #[serde(rename = "HasPassword", default, skip_serializing_if = "Option::is_none")]
    pub has_password: Option<bool>,

    #[serde(rename = "HasConfiguredPassword", default, skip_serializing_if = "Option::is_none")]
    pub has_configured_password: Option<bool>,

    #[serde(rename = "HasConfiguredEasyPassword", default, skip_serializing_if = "Option::is_none")]
    pub has_configured_easy_password: Option<bool>,

    #[serde(rename = "EnableAutoLogin", default, skip_serializing_if = "Option::is_none")]
    pub enable_auto_login: Option<bool>,

    #[serde(rename = "LastLoginDate", default, skip_serializing_if = "Option::is_none")]
    pub last_login_date: Option<DateTime<Utc>>,

    #[serde(rename = "LastActivityDate", default, skip_serializing_if = "Option::is_none")]
    pub last_activity_date: Option<DateTime<Utc>>,

    #[serde(rename = "Configuration", default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<UserConfiguration>,

    #[serde(rename = "PrimaryImageAspectRatio", default, skip_serializing_if = "Option::is_none")]
    pub primary_image_aspect_ratio: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::{assert_full_dto};
    use serde_json::json;

    #[test]
    fn test_user_configuration_query() {
        let view = Uuid::parse_str("6f1e3c4a-9a2b-4c1d-8e7f-0a1b2c3d4e5f").unwrap();
        let config = UserConfiguration {
            ordered_views: Some(vec![view]),
            ..UserConfiguration::default()
                .with_languages("eng", "ger")
                .with_subtitle_mode(SubtitlePlaybackMode::OnlyForced)
        };

        assert_eq!(
            config.to_query_string(),
            "AudioLanguagePreference=eng&SubtitleLanguagePreference=ger\
             &SubtitleMode=OnlyForced&OrderedViews=6f1e3c4a-9a2b-4c1d-8e7f-0a1b2c3d4e5f"
        );
    }

    #[test]
    fn test_user_dto_with_nested_configuration() {
        let user: UserDto = serde_json::from_value(json!({
            "Name": "alice",
            "Id": "4a7c1f0e2b3d4e5f8a9b0c1d2e3f4a5b",
            "HasPassword": true,
            "LastLoginDate": "2024-05-01T18:22:10.1234567Z",
            "Configuration": { "SubtitleMode": "Smart", "PlayDefaultAudioTrack": true },
            "Policy": { "IsAdministrator": false }
        }))
        .unwrap();

        let config = user.configuration.as_ref().unwrap();
        assert_eq!(config.subtitle_mode, Some(SubtitlePlaybackMode::Smart));
        assert!(user.last_login_date.is_some());

        let back: UserDto = serde_json::from_value(serde_json::to_value(&user).unwrap()).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_item_data_query_renders_date() {
        let data = UserItemDataDto {
            played: Some(true),
            last_played_date: Some(
                DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
                    .unwrap()
                    .with_timezone(&Utc),
            ),
            ..Default::default()
        };
        assert_eq!(
            data.to_query_string(),
            "LastPlayedDate=2024-01-02T03%3A04%3A05Z&Played=true"
        );
    }

    fn full_user_configuration() -> UserConfiguration {
        UserConfiguration {
            audio_language_preference: Some("audio language preference".to_string()),
            play_default_audio_track: Some(false),
            subtitle_language_preference: Some("subtitle language preference".to_string()),
            display_missing_episodes: Some(false),
            grouped_folders: Some(vec![Uuid::from_u128(10), Uuid::from_u128(11)]),
            subtitle_mode: Some(SubtitlePlaybackMode::Always),
            display_collections_view: Some(true),
            enable_local_password: Some(false),
            ordered_views: Some(vec![Uuid::from_u128(18), Uuid::from_u128(19)]),
            latest_items_excludes: Some(vec![Uuid::from_u128(20), Uuid::from_u128(21)]),
            my_media_excludes: Some(vec![Uuid::from_u128(22), Uuid::from_u128(23)]),
            hide_played_in_latest: Some(false),
            remember_audio_selections: Some(true),
            remember_subtitle_selections: Some(false),
            enable_next_episode_auto_play: Some(true),
            cast_receiver_id: Some("cast receiver id".to_string()),
        }
    }

    #[test]
    fn test_fully_populated_round_trip_and_query() {
        assert_full_dto(&full_user_configuration(), 16);
    }
}
