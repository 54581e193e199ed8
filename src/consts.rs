/// Server used when neither the CLI nor the config names one
pub(crate) const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

/// Status endpoint of current servers. Older servers expose
/// `/api/v1/reports/last_update_timestamp` instead.
pub(crate) const DEFAULT_STATUS_PATH: &str = "/api/v1/scanreports/last_update_timestamp";

pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;
pub(crate) const DEFAULT_INITIAL_DELAY_MS: u64 = 2_000;
pub(crate) const DEFAULT_RELOAD_DELAY_MS: u64 = 2_000;
pub(crate) const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

pub(crate) const DEFAULT_SCAN_TYPE: &str = "FullScan";

/// Target name that addresses every registered laptop
pub(crate) const ALL_LAPTOPS: &str = "all";

/// Display format for server timestamps: "2025-01-15 14:03:22"
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Standard date format: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder for absent values in tables
pub(crate) const MISSING: &str = "-";
