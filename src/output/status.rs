//! Scan health classification shown in the overview and daily report

use chrono::{DateTime, Duration, Utc};
use comfy_table::Color;

use crate::api::Laptop;
use crate::utils::parse_server_timestamp;

/// A scan younger than this counts as current in the overview
const CURRENT_SCAN_AGE_HOURS: i64 = 5;

/// Overview status of one laptop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanStatus {
    NoScan,
    Threats,
    Current,
    Stale,
    Unknown,
}

impl ScanStatus {
    pub(crate) fn of(laptop: &Laptop, now: DateTime<Utc>) -> Self {
        let Some(raw) = laptop.last_scan_time.as_deref() else {
            return ScanStatus::NoScan;
        };
        let Some(last_scan) = parse_server_timestamp(raw) else {
            return ScanStatus::Unknown;
        };
        if laptop.last_scan_threats_found == Some(true) {
            ScanStatus::Threats
        } else if now - last_scan <= Duration::hours(CURRENT_SCAN_AGE_HOURS) {
            ScanStatus::Current
        } else {
            ScanStatus::Stale
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            ScanStatus::NoScan => "No scan yet",
            ScanStatus::Threats => "Threats found!",
            ScanStatus::Current => "OK (current)",
            ScanStatus::Stale => "OK (older than 5h)",
            ScanStatus::Unknown => "Unknown",
        }
    }

    pub(crate) fn color(self) -> Option<Color> {
        match self {
            ScanStatus::Threats => Some(Color::Red),
            ScanStatus::Current => Some(Color::Green),
            ScanStatus::Stale => Some(Color::Yellow),
            ScanStatus::NoScan | ScanStatus::Unknown => None,
        }
    }
}

/// Daily report status of one laptop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DailyStatus {
    NoScan,
    Threats,
    ScannedToday,
    Within24h,
    Older,
    Unknown,
}

impl DailyStatus {
    /// Classify against `reference`, the instant the report is taken at
    pub(crate) fn of(laptop: &Laptop, reference: DateTime<Utc>) -> Self {
        let Some(raw) = laptop.last_scan_time.as_deref() else {
            return DailyStatus::NoScan;
        };
        let Some(last_scan) = parse_server_timestamp(raw) else {
            return DailyStatus::Unknown;
        };
        if laptop.last_scan_threats_found == Some(true) {
            return DailyStatus::Threats;
        }
        let age = reference - last_scan;
        if age <= Duration::days(1) && last_scan.date_naive() == reference.date_naive() {
            DailyStatus::ScannedToday
        } else if age <= Duration::days(1) {
            DailyStatus::Within24h
        } else {
            DailyStatus::Older
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            DailyStatus::NoScan => "No scan yet",
            DailyStatus::Threats => "Threats!",
            DailyStatus::ScannedToday => "OK (scan today)",
            DailyStatus::Within24h => "OK (scan <24h)",
            DailyStatus::Older => "OK (scan older)",
            DailyStatus::Unknown => "Unknown",
        }
    }

    pub(crate) fn color(self) -> Option<Color> {
        match self {
            DailyStatus::Threats => Some(Color::Red),
            DailyStatus::ScannedToday | DailyStatus::Within24h => Some(Color::Green),
            DailyStatus::Older => Some(Color::Yellow),
            DailyStatus::NoScan | DailyStatus::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn laptop(last_scan: Option<&str>, threats: Option<bool>) -> Laptop {
        Laptop {
            alias_name: "reception".to_string(),
            last_scan_time: last_scan.map(str::to_string),
            last_scan_threats_found: threats,
            ..Laptop::default()
        }
    }

    #[test]
    fn overview_never_scanned() {
        let now = at("2024-03-01T12:00:00Z");
        assert_eq!(ScanStatus::of(&laptop(None, None), now), ScanStatus::NoScan);
    }

    #[test]
    fn overview_threats_win_over_age() {
        let now = at("2024-03-01T12:00:00Z");
        let l = laptop(Some("2024-03-01T11:00:00Z"), Some(true));
        assert_eq!(ScanStatus::of(&l, now), ScanStatus::Threats);
    }

    #[test]
    fn overview_five_hour_boundary() {
        let now = at("2024-03-01T12:00:00Z");
        let l = laptop(Some("2024-03-01T07:00:00Z"), Some(false));
        assert_eq!(ScanStatus::of(&l, now), ScanStatus::Current);
        let l = laptop(Some("2024-03-01T06:59:59Z"), Some(false));
        assert_eq!(ScanStatus::of(&l, now), ScanStatus::Stale);
    }

    #[test]
    fn overview_naive_scan_time_is_utc() {
        let now = at("2024-03-01T12:00:00Z");
        let l = laptop(Some("2024-03-01T10:00:00"), None);
        assert_eq!(ScanStatus::of(&l, now), ScanStatus::Current);
    }

    #[test]
    fn overview_unparseable_scan_time() {
        let now = at("2024-03-01T12:00:00Z");
        let l = laptop(Some("garbage"), None);
        assert_eq!(ScanStatus::of(&l, now), ScanStatus::Unknown);
        assert_eq!(ScanStatus::Unknown.color(), None);
    }

    #[test]
    fn daily_same_day_and_previous_evening() {
        let reference = at("2024-03-01T09:00:00Z");
        let today = laptop(Some("2024-03-01T01:00:00Z"), Some(false));
        assert_eq!(DailyStatus::of(&today, reference), DailyStatus::ScannedToday);
        let yesterday = laptop(Some("2024-02-29T22:00:00Z"), Some(false));
        assert_eq!(DailyStatus::of(&yesterday, reference), DailyStatus::Within24h);
        let old = laptop(Some("2024-02-27T22:00:00Z"), Some(false));
        assert_eq!(DailyStatus::of(&old, reference), DailyStatus::Older);
    }

    #[test]
    fn daily_threats_and_missing() {
        let reference = at("2024-03-01T09:00:00Z");
        let l = laptop(Some("2024-02-01T00:00:00Z"), Some(true));
        assert_eq!(DailyStatus::of(&l, reference), DailyStatus::Threats);
        assert_eq!(DailyStatus::of(&laptop(None, None), reference), DailyStatus::NoScan);
        assert_eq!(DailyStatus::Threats.color(), Some(Color::Red));
    }
}
