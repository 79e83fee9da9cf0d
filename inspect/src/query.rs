//! Rendering DTO documents as request query strings.

use anyhow::Context;
use clap::ValueEnum;
use jellyfin_types::{
    EncodingOptions, LibraryOptions, MediaStream, MediaUpdateInfoDto, NetworkConfiguration,
    PlaybackProgressInfo, ToQueryString, UserConfiguration,
};
use serde::de::DeserializeOwned;

/// DTOs that can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DtoKind {
    EncodingOptions,
    LibraryOptions,
    NetworkConfiguration,
    MediaStream,
    MediaUpdateInfo,
    UserConfiguration,
    PlaybackProgress,
}

impl DtoKind {
    pub fn schema_name(self) -> &'static str {
        match self {
            Self::EncodingOptions => "EncodingOptions",
            Self::LibraryOptions => "LibraryOptions",
            Self::NetworkConfiguration => "NetworkConfiguration",
            Self::MediaStream => "MediaStream",
            Self::MediaUpdateInfo => "MediaUpdateInfoDto",
            Self::UserConfiguration => "UserConfiguration",
            Self::PlaybackProgress => "PlaybackProgressInfo",
        }
    }
}

/// Decode `document` as `kind` and render it, form style without a prefix
/// and deepObject style under `prefix`.
pub fn render_query(kind: DtoKind, document: &str, prefix: Option<&str>) -> anyhow::Result<String> {
    match kind {
        DtoKind::EncodingOptions => render::<EncodingOptions>(kind, document, prefix),
        DtoKind::LibraryOptions => render::<LibraryOptions>(kind, document, prefix),
        DtoKind::NetworkConfiguration => render::<NetworkConfiguration>(kind, document, prefix),
        DtoKind::MediaStream => render::<MediaStream>(kind, document, prefix),
        DtoKind::MediaUpdateInfo => render::<MediaUpdateInfoDto>(kind, document, prefix),
        DtoKind::UserConfiguration => render::<UserConfiguration>(kind, document, prefix),
        DtoKind::PlaybackProgress => render::<PlaybackProgressInfo>(kind, document, prefix),
    }
}

fn render<T>(kind: DtoKind, document: &str, prefix: Option<&str>) -> anyhow::Result<String>
where
    T: DeserializeOwned + ToQueryString,
{
    let dto: T = serde_json::from_str(document)
        .with_context(|| format!("invalid {} document", kind.schema_name()))?;
    Ok(match prefix {
        Some(prefix) => dto.to_query_string_with_prefix(prefix),
        None => dto.to_query_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_form_style() {
        let query = render_query(
            DtoKind::MediaUpdateInfo,
            r#"{"Updates":[{"Path":"/media/a b.mkv","UpdateType":"Created"}]}"#,
            None,
        )
        .unwrap();
        assert_eq!(
            query,
            "Updates[Path]=%2Fmedia%2Fa%20b.mkv&Updates[UpdateType]=Created"
        );
    }

    #[test]
    fn test_render_with_prefix() {
        let query = render_query(
            DtoKind::UserConfiguration,
            r#"{"AudioLanguagePreference":"eng","PlayDefaultAudioTrack":true}"#,
            Some("config"),
        )
        .unwrap();
        assert_eq!(
            query,
            "config[AudioLanguagePreference]=eng&config[PlayDefaultAudioTrack]=true"
        );
    }

    #[test]
    fn test_empty_document_renders_nothing() {
        assert_eq!(render_query(DtoKind::EncodingOptions, "{}", None).unwrap(), "");
    }

    #[test]
    fn test_invalid_document() {
        let err =
            render_query(DtoKind::MediaStream, r#"{"VideoRange":"Bogus"}"#, None).unwrap_err();
        assert_eq!(err.to_string(), "invalid MediaStream document");
    }
}
