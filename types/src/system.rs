//! Server activity, scheduled tasks, plugins and library change reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::wire::wire_enum;

wire_enum! {
    pub enum LogLevel {
        Trace => "Trace",
        Debug => "Debug",
        Information => "Information",
        Warning => "Warning",
        Error => "Error",
        Critical => "Critical",
        None => "None",
    }
}

wire_enum! {
    pub enum TaskState {
        Idle => "Idle",
        Cancelling => "Cancelling",
        Running => "Running",
    }
}

wire_enum! {
    pub enum TaskCompletionStatus {
        Completed => "Completed",
        Failed => "Failed",
        Cancelled => "Cancelled",
        Aborted => "Aborted",
    }
}

wire_enum! {
    pub enum PluginStatus {
        Active => "Active",
        Restart => "Restart",
        Deleted => "Deleted",
        NotSupported => "NotSupported",
        Malfunctioned => "Malfunctioned",
        Superseded => "Superseded",
        Disabled => "Disabled",
    }
}

/// One entry of the server activity log.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ActivityLogEntry {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "Overview", default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    #[serde(rename = "ShortOverview", default, skip_serializing_if = "Option::is_none")]
    pub short_overview: Option<String>,

    /// Entry kind (e.g. "SessionStarted", "AuthenticationSucceeded")
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,

    #[serde(rename = "ItemId", default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,

    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    #[serde(rename = "UserId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    #[serde(rename = "UserPrimaryImageTag", default, skip_serializing_if = "Option::is_none")]
    pub user_primary_image_tag: Option<String>,

    #[serde(rename = "Severity", default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<LogLevel>,
}

/// Outcome of one scheduled task run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TaskResult {
    #[serde(rename = "StartTimeUtc", default, skip_serializing_if = "Option::is_none")]
    pub start_time_utc: Option<DateTime<Utc>>,

    #[serde(rename = "EndTimeUtc", default, skip_serializing_if = "Option::is_none")]
    pub end_time_utc: Option<DateTime<Utc>>,

    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskCompletionStatus>,

    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "Key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "ErrorMessage", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(rename = "LongErrorMessage", default, skip_serializing_if = "Option::is_none")]
    pub long_error_message: Option<String>,
}

impl TaskResult {
    /// Wall-clock duration of the run, when both ends are known.
    pub fn duration(&self) -> Option<chrono::Duration> {
        Some(self.end_time_utc? - self.start_time_utc?)
    }
}

/// When a scheduled task fires.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TaskTriggerInfo {
    /// "DailyTrigger", "WeeklyTrigger", "IntervalTrigger" or "StartupTrigger"
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<String>,

    #[serde(rename = "TimeOfDayTicks", default, skip_serializing_if = "Option::is_none")]
    pub time_of_day_ticks: Option<i64>,

    #[serde(rename = "IntervalTicks", default, skip_serializing_if = "Option::is_none")]
    pub interval_ticks: Option<i64>,

    #[serde(rename = "DayOfWeek", default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,

    #[serde(rename = "MaxRuntimeTicks", default, skip_serializing_if = "Option::is_none")]
    pub max_runtime_ticks: Option<i64>,
}

/// A scheduled task and its current state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TaskInfo {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TaskState>,

    /// Progress of a running task, 0-100
    #[serde(rename = "CurrentProgressPercentage", default, skip_serializing_if = "Option::is_none")]
    pub current_progress_percentage: Option<f64>,

    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "LastExecutionResult", default, skip_serializing_if = "Option::is_none")]
    pub last_execution_result: Option<TaskResult>,

    #[serde(rename = "Triggers", default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<TaskTriggerInfo>>,

    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "IsHidden", default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,

    #[serde(rename = "Key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// A release of a package in a plugin repository.
///
/// Repository manifests use camelCase keys, except `VersionNumber`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct VersionInfo {
    #[serde(rename = "version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(rename = "VersionNumber", default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<String>,

    #[serde(rename = "changelog", default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,

    /// Minimum server ABI (e.g. "10.9.0.0")
    #[serde(rename = "targetAbi", default, skip_serializing_if = "Option::is_none")]
    pub target_abi: Option<String>,

    #[serde(rename = "sourceUrl", default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    #[serde(rename = "checksum", default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,

    #[serde(rename = "timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(rename = "repositoryName", default, skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,

    #[serde(rename = "repositoryUrl", default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
}

/// A package listed in a plugin repository.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PackageInfo {
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "overview", default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    #[serde(rename = "owner", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(rename = "category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "guid", default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<Uuid>,

    #[serde(rename = "versions", default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<VersionInfo>>,

    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A plugin installation in progress or just finished.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct InstallationInfo {
    #[serde(rename = "Guid", default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<Uuid>,

    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "Version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(rename = "Changelog", default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,

    #[serde(rename = "SourceUrl", default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    #[serde(rename = "Checksum", default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,

    #[serde(rename = "PackageInfo", default, skip_serializing_if = "Option::is_none")]
    pub package_info: Option<PackageInfo>,
}

/// An installed plugin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PluginInfo {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "Version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(rename = "ConfigurationFileName", default, skip_serializing_if = "Option::is_none")]
    pub configuration_file_name: Option<String>,

    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[serde(rename = "CanUninstall", default, skip_serializing_if = "Option::is_none")]
    pub can_uninstall: Option<bool>,

    #[serde(rename = "HasImage", default, skip_serializing_if = "Option::is_none")]
    pub has_image: Option<bool>,

    #[serde(rename = "Status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PluginStatus>,
}

/// Items and folders touched by a library scan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LibraryUpdateInfo {
    #[serde(rename = "FoldersAddedTo", default, skip_serializing_if = "Option::is_none")]
    pub folders_added_to: Option<Vec<String>>,

    #[serde(rename = "FoldersRemovedFrom", default, skip_serializing_if = "Option::is_none")]
    pub folders_removed_from: Option<Vec<String>>,

    #[serde(rename = "ItemsAdded", default, skip_serializing_if = "Option::is_none")]
    pub items_added: Option<Vec<String>>,

    #[serde(rename = "ItemsRemoved", default, skip_serializing_if = "Option::is_none")]
    pub items_removed: Option<Vec<String>>,

    #[serde(rename = "ItemsUpdated", default, skip_serializing_if = "Option::is_none")]
    pub items_updated: Option<Vec<String>>,

    #[serde(rename = "CollectionFolders", default, skip_serializing_if = "Option::is_none")]
    pub collection_folders: Option<Vec<String>>,

    #[serde(rename = "IsEmpty", default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
}

impl LibraryUpdateInfo {
    /// Total number of added, removed and updated items.
    pub fn changed_items(&self) -> usize {
        [&self.items_added, &self.items_removed, &self.items_updated]
            .into_iter()
            .flatten()
            .map(Vec::len)
            .sum()
    }
}

/// Live TV timer notification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TimerEventInfo {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "ProgramId", default, skip_serializing_if = "Option::is_none")]
    pub program_id: Option<Uuid>,
}
