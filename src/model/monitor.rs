use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// A process monitor (ingest, export, ...)
#[derive(DebugPretty, DisplaySimple, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    /// Monitor identifier
    #[serde(rename = "mid")]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Category, e.g. `Ingest`
    #[serde(default)]
    pub category: Option<String>,
    /// Current status, e.g. `Running`
    #[serde(default)]
    pub status: Option<String>,
    /// When the monitored process started
    #[serde(default)]
    pub started: Option<String>,
    /// Number of items processed so far
    #[serde(default)]
    pub files_processed: Option<u64>,
}

/// `value` of the monitor listing
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MonitorList {
    /// Monitors
    #[serde(default)]
    pub monitors: Vec<Monitor>,
}

/// A message emitted by a monitored process
#[derive(DebugPretty, DisplaySimple, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier
    #[serde(rename = "mmid")]
    pub id: String,
    /// Monitor that produced the message
    #[serde(rename = "mid", default)]
    pub monitor_id: Option<String>,
    /// Severity, e.g. `Info` or `Error`
    #[serde(default)]
    pub status: Option<String>,
    /// Message text
    #[serde(default)]
    pub message: Option<String>,
    /// Timestamp as sent by the server
    #[serde(default)]
    pub date: Option<String>,
    /// Workflow instance that produced the message
    #[serde(default)]
    pub workflow_instance_id: Option<u64>,
    /// Entity the message is about
    #[serde(default)]
    pub entity_ref: Option<String>,
    /// Title of that entity
    #[serde(default)]
    pub entity_title: Option<String>,
}

/// Paging block of a JSON listing
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// Total number of items in the listing
    #[serde(default)]
    pub total_results: u64,
    /// Link to the next page, absent on the last page
    #[serde(default)]
    pub next: Option<String>,
}

/// `value` of the message listing
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MessagePage {
    /// Paging information
    #[serde(default)]
    pub paging: Paging,
    /// Messages of this page
    #[serde(default)]
    pub messages: Vec<Message>,
}
