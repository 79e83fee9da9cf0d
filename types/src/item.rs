//! Library items and play queue entries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::media_stream::MediaStream;
use crate::query::{QueryWriter, ToQueryString};
use crate::user::UserItemDataDto;
use crate::wire::wire_enum;

wire_enum! {
    pub enum MediaType {
        Unknown => "Unknown",
        Video => "Video",
        Audio => "Audio",
        Photo => "Photo",
        Book => "Book",
    }
}

/// A library item.
///
/// Only the playback-relevant part of the server's item schema is modelled;
/// other keys are ignored on decode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BaseItemDto {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "OriginalTitle", default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,

    #[serde(rename = "ServerId", default, skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,

    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[serde(rename = "Etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Container format (e.g. "mkv")
    #[serde(rename = "Container", default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    #[serde(rename = "SortName", default, skip_serializing_if = "Option::is_none")]
    pub sort_name: Option<String>,

    #[serde(rename = "PremiereDate", default, skip_serializing_if = "Option::is_none")]
    pub premiere_date: Option<DateTime<Utc>>,

    #[serde(rename = "Path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(rename = "Overview", default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    /// Item kind (e.g. "Movie", "Episode", "Audio")
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(rename = "MediaType", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,

    /// Duration in 100 ns ticks
    #[serde(rename = "RunTimeTicks", default, skip_serializing_if = "Option::is_none")]
    pub run_time_ticks: Option<i64>,

    #[serde(rename = "ProductionYear", default, skip_serializing_if = "Option::is_none")]
    pub production_year: Option<i32>,

    /// Episode or track number
    #[serde(rename = "IndexNumber", default, skip_serializing_if = "Option::is_none")]
    pub index_number: Option<i32>,

    /// Season or disc number
    #[serde(rename = "ParentIndexNumber", default, skip_serializing_if = "Option::is_none")]
    pub parent_index_number: Option<i32>,

    #[serde(rename = "SeriesName", default, skip_serializing_if = "Option::is_none")]
    pub series_name: Option<String>,

    #[serde(rename = "SeriesId", default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<Uuid>,

    #[serde(rename = "SeasonId", default, skip_serializing_if = "Option::is_none")]
    pub season_id: Option<Uuid>,

    #[serde(rename = "Album", default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    #[serde(rename = "AlbumArtist", default, skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,

    #[serde(rename = "Artists", default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<String>>,

    #[serde(rename = "IsFolder", default, skip_serializing_if = "Option::is_none")]
    pub is_folder: Option<bool>,

    #[serde(rename = "ParentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,

    #[serde(rename = "ChannelId", default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Uuid>,

    #[serde(rename = "MediaStreams", default, skip_serializing_if = "Option::is_none")]
    pub media_streams: Option<Vec<MediaStream>>,

    /// Image tag per image type name
    #[serde(rename = "ImageTags", default, skip_serializing_if = "Option::is_none")]
    pub image_tags: Option<BTreeMap<String, String>>,

    #[serde(rename = "UserData", default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<UserItemDataDto>,
}

impl BaseItemDto {
    /// Human-readable label: "Series S01E02 - Name" for episodes, otherwise
    /// the item name.
    pub fn display_name(&self) -> String {
        let name = self.name.as_deref().unwrap_or("<unnamed>");
        match (&self.series_name, self.parent_index_number, self.index_number) {
            (Some(series), Some(season), Some(episode)) => {
                format!("{series} S{season:02}E{episode:02} - {name}")
            }
            _ => name.to_string(),
        }
    }
}

impl ToQueryString for BaseItemDto {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("Name", &self.name);
        query.value("OriginalTitle", &self.original_title);
        query.value("ServerId", &self.server_id);
        query.value("Id", &self.id);
        query.value("Etag", &self.etag);
        query.value("Container", &self.container);
        query.value("SortName", &self.sort_name);
        query.value("PremiereDate", &self.premiere_date);
        query.value("Path", &self.path);
        query.value("Overview", &self.overview);
        query.value("Type", &self.item_type);
        query.value("MediaType", &self.media_type);
        query.value("RunTimeTicks", &self.run_time_ticks);
        query.value("ProductionYear", &self.production_year);
        query.value("IndexNumber", &self.index_number);
        query.value("ParentIndexNumber", &self.parent_index_number);
        query.value("SeriesName", &self.series_name);
        query.value("SeriesId", &self.series_id);
        query.value("SeasonId", &self.season_id);
        query.value("Album", &self.album);
        query.value("AlbumArtist", &self.album_artist);
        query.values("Artists", &self.artists);
        query.value("IsFolder", &self.is_folder);
        query.value("ParentId", &self.parent_id);
        query.value("ChannelId", &self.channel_id);
        query.records("MediaStreams", &self.media_streams);
        query.map("ImageTags", &self.image_tags);
        query.record("UserData", &self.user_data);
    }
}

/// Entry of a session's play queue.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct QueueItem {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[serde(rename = "PlaylistItemId", default, skip_serializing_if = "Option::is_none")]
    pub playlist_item_id: Option<String>,
}

impl ToQueryString for QueueItem {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("Id", &self.id);
        query.value("PlaylistItemId", &self.playlist_item_id);
    }
}
