use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Value, json};

use crate::api::{Laptop, ScanReport};
use crate::consts::DATE_FORMAT;
use crate::output::status::{DailyStatus, ScanStatus};
use crate::output::table::sorted_by_alias;

fn to_pretty(value: &Value) -> String {
    // Serializing a Value cannot fail
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Laptop list with the computed overview status added to each entry
pub(crate) fn output_laptops_json(laptops: &[Laptop], now: DateTime<Utc>) -> String {
    let output: Vec<Value> = sorted_by_alias(laptops)
        .into_iter()
        .map(|laptop| {
            let mut entry = serde_json::to_value(laptop).unwrap_or(Value::Null);
            if let Value::Object(map) = &mut entry {
                map.insert(
                    "status".to_string(),
                    json!(ScanStatus::of(laptop, now).label()),
                );
            }
            entry
        })
        .collect();
    to_pretty(&Value::Array(output))
}

pub(crate) fn output_reports_json(reports: &[ScanReport]) -> String {
    let mut sorted: Vec<&ScanReport> = reports.iter().collect();
    sorted.sort_by(|a, b| b.report_time_on_server.cmp(&a.report_time_on_server));
    to_pretty(&json!(sorted))
}

pub(crate) fn output_daily_json(
    date: NaiveDate,
    laptops: &[Laptop],
    reference: DateTime<Utc>,
) -> String {
    let rows: Vec<Value> = sorted_by_alias(laptops)
        .into_iter()
        .map(|laptop| {
            json!({
                "alias": laptop.alias_name,
                "hostname": laptop.hostname,
                "status": DailyStatus::of(laptop, reference).label(),
                "last_scan_time": laptop.last_scan_time,
                "last_scan_type": laptop.last_scan_type,
                "last_scan_result": laptop.last_scan_result_message,
            })
        })
        .collect();
    to_pretty(&json!({
        "date": date.format(DATE_FORMAT).to_string(),
        "laptops": rows,
    }))
}
