use chrono::{DateTime, Local, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::consts::{DATETIME_FORMAT, MISSING};
use crate::error::AppError;

/// Naive layouts the server emits for columns stored without an offset
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Zone that dashboard timestamps are rendered in
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    /// `None`, empty or "local" mean the machine's zone; "utc"/"z" are accepted
    /// alongside IANA names.
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Timezone::Local),
            Some(name) if name.eq_ignore_ascii_case("local") => Ok(Timezone::Local),
            Some(name) if name.eq_ignore_ascii_case("utc") || name.eq_ignore_ascii_case("z") => {
                Ok(Timezone::Named(chrono_tz::UTC))
            }
            Some(name) => name
                .parse::<Tz>()
                .map(Timezone::Named)
                .map_err(|_| AppError::InvalidTimezone {
                    input: name.to_string(),
                }),
        }
    }

    fn render(self, utc: DateTime<Utc>) -> String {
        match self {
            Timezone::Local => utc.with_timezone(&Local).format(DATETIME_FORMAT).to_string(),
            Timezone::Named(tz) => utc.with_timezone(&tz).format(DATETIME_FORMAT).to_string(),
        }
    }
}

/// Parse a server timestamp. Values without an offset are taken as UTC.
pub(crate) fn parse_server_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .map(|naive| naive.and_utc())
}

/// Render a server timestamp for display in `timezone`.
///
/// Absent values become a dash and unparseable ones are shown verbatim.
pub(crate) fn format_timestamp(raw: Option<&str>, timezone: Timezone) -> String {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return MISSING.to_string();
    };
    match parse_server_timestamp(raw) {
        Some(utc) => timezone.render(utc),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timezone_setting_variants() {
        assert_eq!(Timezone::parse(None).unwrap(), Timezone::Local);
        assert_eq!(Timezone::parse(Some(" Local ")).unwrap(), Timezone::Local);
        assert_eq!(
            Timezone::parse(Some("Z")).unwrap(),
            Timezone::Named(chrono_tz::UTC)
        );
        assert_eq!(
            Timezone::parse(Some("America/New_York")).unwrap(),
            Timezone::Named(chrono_tz::America::New_York)
        );
    }

    #[test]
    fn unknown_zone_name_is_an_error() {
        let err = Timezone::parse(Some("Atlantis/Harbor")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid timezone: Atlantis/Harbor");
    }

    #[test]
    fn winter_time_in_berlin_is_one_hour_ahead() {
        let tz = Timezone::parse(Some("Europe/Berlin")).unwrap();
        assert_eq!(
            format_timestamp(Some("2024-01-15 12:00:00"), tz),
            "2024-01-15 13:00:00"
        );
    }

    #[test]
    fn parse_server_timestamp_with_offset() {
        let dt = parse_server_timestamp("2024-01-01T01:30:00+01:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T00:30:00+00:00");
    }

    #[test]
    fn parse_server_timestamp_zulu_and_fraction() {
        let dt = parse_server_timestamp("2024-01-01T00:05:00.123456Z").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:05:00");
    }

    #[test]
    fn parse_server_timestamp_naive_is_utc() {
        let dt = parse_server_timestamp("2024-01-01T08:00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T08:00:00+00:00");
        let dt = parse_server_timestamp("2024-01-01 08:00:00.5").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "08:00");
    }

    #[test]
    fn parse_server_timestamp_rejects_garbage() {
        assert!(parse_server_timestamp("yesterday").is_none());
    }

    #[test]
    fn format_timestamp_converts_to_named_zone() {
        let tz = Timezone::parse(Some("Europe/Berlin")).unwrap();
        assert_eq!(
            format_timestamp(Some("2024-07-01T10:00:00Z"), tz),
            "2024-07-01 12:00:00"
        );
    }

    #[test]
    fn format_timestamp_absent_and_invalid() {
        let tz = Timezone::Named(chrono_tz::UTC);
        assert_eq!(format_timestamp(None, tz), "-");
        assert_eq!(format_timestamp(Some("  "), tz), "-");
        assert_eq!(format_timestamp(Some("not a date"), tz), "not a date");
    }
}
