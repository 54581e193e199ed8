//! Wire types of the scan server's JSON API
//!
//! Timestamps stay as the server's ISO-8601 strings. They are parsed only for
//! display, never for comparison.

use serde::{Deserialize, Serialize};

/// A registered laptop as returned by `GET /api/v1/laptops`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Laptop {
    pub(crate) id: i64,
    pub(crate) hostname: String,
    pub(crate) alias_name: String,
    #[serde(default)]
    pub(crate) first_seen: Option<String>,
    #[serde(default)]
    pub(crate) last_api_contact: Option<String>,
    #[serde(default)]
    pub(crate) last_scan_time: Option<String>,
    #[serde(default)]
    pub(crate) last_scan_type: Option<String>,
    #[serde(default)]
    pub(crate) last_scan_result_message: Option<String>,
    #[serde(default)]
    pub(crate) last_scan_threats_found: Option<bool>,
    #[serde(default)]
    pub(crate) pending_command: Option<String>,
    /// Only sent by servers that expose the queued scan type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) pending_scan_type: Option<String>,
    #[serde(default)]
    pub(crate) command_issue_time: Option<String>,
}

impl Laptop {
    /// Pending command with its scan type, e.g. "START_SCAN (FullScan)"
    pub(crate) fn pending_label(&self) -> Option<String> {
        let command = self.pending_command.as_deref()?;
        Some(match self.pending_scan_type.as_deref() {
            Some(scan_type) => format!("{command} ({scan_type})"),
            None => command.to_string(),
        })
    }
}

/// One scan report from `GET /api/v1/scanreports/laptop/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ScanReport {
    pub(crate) id: i64,
    pub(crate) laptop_id: i64,
    pub(crate) report_time_on_server: String,
    pub(crate) client_scan_time: String,
    pub(crate) scan_type: String,
    pub(crate) scan_result_message: String,
    pub(crate) threats_found: bool,
    #[serde(default)]
    pub(crate) threat_details: Option<String>,
}

/// Body of the status endpoint: `{ "last_update": "<ISO-8601>" | null }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct LastUpdate {
    #[serde(default)]
    pub(crate) last_update: Option<String>,
}

impl LastUpdate {
    /// The token, with an empty string counted as no reports
    pub(crate) fn token(self) -> Option<String> {
        self.last_update.filter(|t| !t.trim().is_empty())
    }
}

/// Acknowledgement returned by trigger/cancel
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommandAck {
    pub(crate) message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Health {
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

/// Error body of FastAPI-style servers. `detail` is a string for most
/// errors and a list of objects for validation failures.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) detail: serde_json::Value,
}

impl ErrorBody {
    pub(crate) fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
