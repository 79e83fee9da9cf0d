//! Media change notifications posted to the server.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::query::{QueryWriter, ToQueryString};

/// Body of a "media updated" notification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MediaUpdateInfoDto {
    #[serde(rename = "Updates", default, skip_serializing_if = "Option::is_none")]
    pub updates: Option<Vec<MediaUpdateInfoPathDto>>,
}

impl MediaUpdateInfoDto {
    pub fn with_update(mut self, update: MediaUpdateInfoPathDto) -> Self {
        self.updates.get_or_insert_with(Vec::new).push(update);
        self
    }
}

impl ToQueryString for MediaUpdateInfoDto {
    fn write_query(&self, query: &mut QueryWriter) {
        query.records("Updates", &self.updates);
    }
}

/// A single changed path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MediaUpdateInfoPathDto {
    #[serde(rename = "Path", default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// "Created", "Modified" or "Deleted"
    #[serde(rename = "UpdateType", default, skip_serializing_if = "Option::is_none")]
    pub update_type: Option<String>,
}

impl MediaUpdateInfoPathDto {
    pub fn new(path: impl Into<String>, update_type: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            update_type: Some(update_type.into()),
        }
    }
}

impl ToQueryString for MediaUpdateInfoPathDto {
    fn write_query(&self, query: &mut QueryWriter) {
        query.value("Path", &self.path);
        query.value("UpdateType", &self.update_type);
    }
}
