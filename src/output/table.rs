use chrono::{DateTime, NaiveDate, Utc};
use comfy_table::{Cell, Color, Table};

use crate::api::{Laptop, ScanReport};
use crate::output::format::{
    create_styled_table, header_cell, or_missing, styled_cell, truncate, yes_no,
};
use crate::output::status::{DailyStatus, ScanStatus};
use crate::utils::{Timezone, format_timestamp};

/// Longest result message shown in a table cell
const MESSAGE_WIDTH: usize = 48;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewOptions {
    pub(crate) use_color: bool,
    pub(crate) timezone: Timezone,
    pub(crate) now: DateTime<Utc>,
}

impl ViewOptions {
    fn status_cell(&self, label: &str, color: Option<Color>) -> Cell {
        let color = if self.use_color { color } else { None };
        styled_cell(label, color, color.is_some())
    }

    fn time(&self, raw: Option<&str>) -> String {
        format_timestamp(raw, self.timezone)
    }
}

fn headers(names: &[&str], use_color: bool) -> Vec<Cell> {
    names.iter().map(|n| header_cell(n, use_color)).collect()
}

pub(crate) fn sorted_by_alias(laptops: &[Laptop]) -> Vec<&Laptop> {
    let mut sorted: Vec<&Laptop> = laptops.iter().collect();
    sorted.sort_by(|a, b| {
        a.alias_name
            .to_lowercase()
            .cmp(&b.alias_name.to_lowercase())
            .then_with(|| a.hostname.cmp(&b.hostname))
    });
    sorted
}

pub(crate) fn render_laptop_table(laptops: &[Laptop], opts: &ViewOptions) -> Table {
    let mut table = create_styled_table();
    table.set_header(headers(
        &[
            "Alias",
            "Hostname",
            "Status",
            "Last Scan",
            "Scan Type",
            "Threats",
            "Pending Command",
            "Last Contact",
        ],
        opts.use_color,
    ));

    for laptop in sorted_by_alias(laptops) {
        let status = ScanStatus::of(laptop, opts.now);
        let pending = laptop.pending_label();
        table.add_row(vec![
            styled_cell(&laptop.alias_name, None, true),
            Cell::new(&laptop.hostname),
            opts.status_cell(status.label(), status.color()),
            Cell::new(opts.time(laptop.last_scan_time.as_deref())),
            Cell::new(or_missing(laptop.last_scan_type.as_deref())),
            Cell::new(yes_no(laptop.last_scan_threats_found)),
            Cell::new(or_missing(pending.as_deref())),
            Cell::new(opts.time(laptop.last_api_contact.as_deref())),
        ]);
    }
    table
}

pub(crate) fn render_report_table(reports: &[ScanReport], opts: &ViewOptions) -> Table {
    let mut table = create_styled_table();
    table.set_header(headers(
        &["Received", "Scanned", "Type", "Threats", "Result", "Details"],
        opts.use_color,
    ));

    let mut sorted: Vec<&ScanReport> = reports.iter().collect();
    sorted.sort_by(|a, b| b.report_time_on_server.cmp(&a.report_time_on_server));

    for report in sorted {
        let threats = if report.threats_found {
            opts.status_cell("Yes", Some(Color::Red))
        } else {
            Cell::new("No")
        };
        table.add_row(vec![
            Cell::new(opts.time(Some(&report.report_time_on_server))),
            Cell::new(opts.time(Some(&report.client_scan_time))),
            Cell::new(&report.scan_type),
            threats,
            Cell::new(truncate(&report.scan_result_message, MESSAGE_WIDTH)),
            Cell::new(truncate(
                or_missing(report.threat_details.as_deref()),
                MESSAGE_WIDTH,
            )),
        ]);
    }
    table
}

pub(crate) fn render_daily_table(
    laptops: &[Laptop],
    reference: DateTime<Utc>,
    opts: &ViewOptions,
) -> Table {
    let mut table = create_styled_table();
    table.set_header(headers(
        &["Alias", "Hostname", "Status", "Last Scan", "Scan Type", "Result"],
        opts.use_color,
    ));

    for laptop in sorted_by_alias(laptops) {
        let status = DailyStatus::of(laptop, reference);
        table.add_row(vec![
            styled_cell(&laptop.alias_name, None, true),
            Cell::new(&laptop.hostname),
            opts.status_cell(status.label(), status.color()),
            Cell::new(opts.time(laptop.last_scan_time.as_deref())),
            Cell::new(or_missing(laptop.last_scan_type.as_deref())),
            Cell::new(truncate(
                or_missing(laptop.last_scan_result_message.as_deref()),
                MESSAGE_WIDTH,
            )),
        ]);
    }
    table
}

pub(crate) fn print_laptop_table(laptops: &[Laptop], opts: &ViewOptions) {
    println!("\n  Laptop Overview ({} laptops)\n", laptops.len());
    println!("{}", render_laptop_table(laptops, opts));
    let threats = laptops
        .iter()
        .filter(|l| ScanStatus::of(l, opts.now) == ScanStatus::Threats)
        .count();
    if threats > 0 {
        let text = format!("{threats} laptop(s) reported threats on their last scan");
        if opts.use_color {
            println!("\n  \x1b[31m{text}\x1b[0m\n");
        } else {
            println!("\n  {text}\n");
        }
    }
}

pub(crate) fn print_report_table(laptop: &str, reports: &[ScanReport], opts: &ViewOptions) {
    println!("\n  Scan Reports for {laptop} ({} reports)\n", reports.len());
    println!("{}", render_report_table(reports, opts));
}

pub(crate) fn print_daily_table(
    date: NaiveDate,
    laptops: &[Laptop],
    reference: DateTime<Utc>,
    opts: &ViewOptions,
) {
    println!("\n  Daily Report for {}\n", date.format("%d.%m.%Y"));
    println!("{}", render_daily_table(laptops, reference, opts));
}
