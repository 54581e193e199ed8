mod csv;
mod format;
mod json;
pub(crate) mod status;
mod table;

pub(crate) use csv::{output_daily_csv, output_laptops_csv, output_reports_csv};
pub(crate) use json::{output_daily_json, output_laptops_json, output_reports_json};
pub(crate) use table::{ViewOptions, print_daily_table, print_laptop_table, print_report_table};
