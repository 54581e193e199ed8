use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::api::{Laptop, ScanReport};
use crate::output::status::{DailyStatus, ScanStatus};
use crate::output::table::sorted_by_alias;

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn opt(value: Option<&str>) -> String {
    value.map(csv_escape).unwrap_or_default()
}

fn opt_bool(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "true",
        Some(false) => "false",
        None => "",
    }
}

/// Timestamps are written as the server sent them so spreadsheets can reparse them
pub(crate) fn output_laptops_csv(laptops: &[Laptop], now: DateTime<Utc>) -> String {
    let mut out = String::from(
        "alias,hostname,status,last_scan_time,last_scan_type,threats_found,last_scan_result,pending_command,last_api_contact\n",
    );
    for laptop in sorted_by_alias(laptops) {
        let status = ScanStatus::of(laptop, now);
        let pending = laptop.pending_label();
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            csv_escape(&laptop.alias_name),
            csv_escape(&laptop.hostname),
            status.label(),
            opt(laptop.last_scan_time.as_deref()),
            opt(laptop.last_scan_type.as_deref()),
            opt_bool(laptop.last_scan_threats_found),
            opt(laptop.last_scan_result_message.as_deref()),
            opt(pending.as_deref()),
            opt(laptop.last_api_contact.as_deref()),
        );
    }
    out
}

pub(crate) fn output_reports_csv(reports: &[ScanReport]) -> String {
    let mut sorted: Vec<&ScanReport> = reports.iter().collect();
    sorted.sort_by(|a, b| b.report_time_on_server.cmp(&a.report_time_on_server));

    let mut out = String::from(
        "report_time_on_server,client_scan_time,scan_type,threats_found,scan_result_message,threat_details\n",
    );
    for report in sorted {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            csv_escape(&report.report_time_on_server),
            csv_escape(&report.client_scan_time),
            csv_escape(&report.scan_type),
            report.threats_found,
            csv_escape(&report.scan_result_message),
            opt(report.threat_details.as_deref()),
        );
    }
    out
}

pub(crate) fn output_daily_csv(laptops: &[Laptop], reference: DateTime<Utc>) -> String {
    let mut out = String::from("alias,hostname,status,last_scan_time,last_scan_type,last_scan_result\n");
    for laptop in sorted_by_alias(laptops) {
        let status = DailyStatus::of(laptop, reference);
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            csv_escape(&laptop.alias_name),
            csv_escape(&laptop.hostname),
            status.label(),
            opt(laptop.last_scan_time.as_deref()),
            opt(laptop.last_scan_type.as_deref()),
            opt(laptop.last_scan_result_message.as_deref()),
        );
    }
    out
}
