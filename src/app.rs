use std::io::{BufRead, Write};

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

use crate::api::{ApiClient, StatusEndpoint};
use crate::cli::{Cli, Commands, OutputFormat};
use crate::consts::ALL_LAPTOPS;
use crate::error::AppError;
use crate::output::{
    ViewOptions, output_daily_csv, output_daily_json, output_laptops_csv, output_laptops_json,
    output_reports_csv, output_reports_json, print_daily_table, print_laptop_table,
    print_report_table,
};
use crate::poller::{
    ChangeNotice, ChangeNotifier, PollExit, PollerConfig, Reloader, StopSignal, ThreadTimer,
    UpdatePoller,
};
use crate::utils::{Timezone, format_timestamp, parse_date};

/// Default laptop limit for overview-style listings
const OVERVIEW_LIMIT: u32 = 10_000;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) client: ApiClient,
    pub(crate) timezone: Timezone,
    pub(crate) format: OutputFormat,
}

impl CommandContext<'_> {
    fn view(&self) -> ViewOptions {
        ViewOptions {
            use_color: self.cli.use_color(),
            timezone: self.timezone,
            now: Utc::now(),
        }
    }

    fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            interval: self.cli.poll_interval(),
            initial_delay: self.cli.initial_delay(),
            reload_delay: self.cli.reload_delay(),
        }
    }
}

fn target_label(target: &str) -> String {
    if target.eq_ignore_ascii_case(ALL_LAPTOPS) {
        "ALL laptops".to_string()
    } else {
        target.to_string()
    }
}

fn show_laptops(ctx: &CommandContext<'_>, limit: u32) -> Result<(), AppError> {
    let laptops = ctx.client.laptops(limit)?;
    let view = ctx.view();
    match ctx.format {
        OutputFormat::Json => println!("{}", output_laptops_json(&laptops, view.now)),
        OutputFormat::Csv => print!("{}", output_laptops_csv(&laptops, view.now)),
        OutputFormat::Table => {
            if laptops.is_empty() {
                println!("No laptops registered.");
            } else {
                print_laptop_table(&laptops, &view);
            }
        }
    }
    Ok(())
}

fn show_reports(ctx: &CommandContext<'_>, laptop: &str, limit: u32) -> Result<(), AppError> {
    let reports = ctx.client.reports_for(laptop, limit)?;
    match ctx.format {
        OutputFormat::Json => println!("{}", output_reports_json(&reports)),
        OutputFormat::Csv => print!("{}", output_reports_csv(&reports)),
        OutputFormat::Table => {
            if reports.is_empty() {
                println!("No scan reports for {laptop}.");
            } else {
                print_report_table(laptop, &reports, &ctx.view());
            }
        }
    }
    Ok(())
}

/// Instant a daily report for an explicit date is evaluated at: the end of
/// that UTC day, or now if the day has not ended yet
fn daily_reference(date: NaiveDate, now: DateTime<Utc>) -> DateTime<Utc> {
    let end_of_day = date
        .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default())
        .and_utc();
    end_of_day.min(now)
}

/// Title date and evaluation instant of the daily report. Without `--date`
/// the report is taken at `now`, whatever the local date is.
fn daily_view(date: Option<&str>, now: DateTime<Utc>) -> Result<(NaiveDate, DateTime<Utc>), AppError> {
    match date {
        Some(raw) => {
            let date = parse_date(raw)?;
            Ok((date, daily_reference(date, now)))
        }
        None => Ok((now.with_timezone(&Local).date_naive(), now)),
    }
}

fn show_daily(ctx: &CommandContext<'_>, date: Option<&str>) -> Result<(), AppError> {
    let view = ctx.view();
    let (date, reference) = daily_view(date, view.now)?;
    let laptops = ctx.client.laptops(OVERVIEW_LIMIT)?;
    match ctx.format {
        OutputFormat::Json => println!("{}", output_daily_json(date, &laptops, reference)),
        OutputFormat::Csv => print!("{}", output_daily_csv(&laptops, reference)),
        OutputFormat::Table => print_daily_table(date, &laptops, reference, &view),
    }
    Ok(())
}

fn trigger_scan(ctx: &CommandContext<'_>, target: &str, scan_type: &str) -> Result<(), AppError> {
    eprintln!(
        "Sending command: {scan_type} for {}...",
        target_label(target)
    );
    let ack = ctx.client.trigger_scan(target, scan_type)?;
    if target.eq_ignore_ascii_case(ALL_LAPTOPS) {
        println!(
            "Success: {}. The overview refreshes automatically under `scanwatch watch`.",
            ack.message
        );
    } else {
        println!("Success: {}", ack.message);
    }
    Ok(())
}

fn cancel_command(ctx: &CommandContext<'_>, target: &str) -> Result<(), AppError> {
    eprintln!("Cancelling pending command for {}...", target_label(target));
    let ack = ctx.client.cancel_command(target)?;
    println!("Success: {}", ack.message);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush().map_err(AppError::Prompt)?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(AppError::Prompt)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn delete_laptop(ctx: &CommandContext<'_>, laptop: &str, yes: bool) -> Result<(), AppError> {
    if !yes
        && !confirm(&format!(
            "Really delete laptop '{laptop}' and all of its scan reports?"
        ))?
    {
        return Err(AppError::Aborted);
    }
    ctx.client.delete_laptop(laptop)?;
    println!("Laptop '{laptop}' deleted.");
    Ok(())
}

fn show_last_update(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let token = ctx.client.last_update(ctx.cli.status_path())?.token();
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "last_update": token })),
        OutputFormat::Csv => println!("last_update\n{}", token.unwrap_or_default()),
        OutputFormat::Table => match token.as_deref() {
            Some(raw) => println!("Last report: {}", format_timestamp(Some(raw), ctx.timezone)),
            None => println!("No reports on server."),
        },
    }
    Ok(())
}

fn show_health(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let health = ctx.client.health()?;
    match health.message {
        Some(message) => println!("{} ({}): {message}", ctx.client.base_url(), health.status),
        None => println!("{}: {}", ctx.client.base_url(), health.status),
    }
    Ok(())
}

/// Prints the change notice where the overview is shown
struct ConsoleNotifier {
    use_color: bool,
}

impl ChangeNotifier for ConsoleNotifier {
    fn notify(&mut self, notice: &ChangeNotice) {
        if self.use_color {
            println!("\n  \x1b[36m{}\x1b[0m", notice.message());
        } else {
            println!("\n  {}", notice.message());
        }
    }
}

/// Re-renders the overview table after a change
struct OverviewReloader {
    client: ApiClient,
    view: ViewOptions,
}

impl Reloader for OverviewReloader {
    fn reload(&mut self) {
        self.view.now = Utc::now();
        match self.client.laptops(OVERVIEW_LIMIT) {
            Ok(laptops) => print_laptop_table(&laptops, &self.view),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
}

fn watch(ctx: &CommandContext<'_>, exit_on_change: bool) -> Result<(), AppError> {
    show_laptops(ctx, OVERVIEW_LIMIT)?;

    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_stop.stop()) {
        tracing::warn!("Failed to install Ctrl-C handler: {e}");
    }

    let config = ctx.poller_config();
    eprintln!(
        "Watching {} for new reports (every {:.0}s, Ctrl-C to stop)",
        ctx.client.base_url(),
        config.interval.as_secs_f64()
    );

    loop {
        let poller = UpdatePoller::new(
            StatusEndpoint::new(ctx.client.clone(), ctx.cli.status_path()),
            ConsoleNotifier {
                use_color: ctx.cli.use_color(),
            },
            OverviewReloader {
                client: ctx.client.clone(),
                view: ctx.view(),
            },
            ThreadTimer::new(stop.clone()),
            config,
        );
        match poller.start().join() {
            PollExit::Reloaded(_) if !exit_on_change && !stop.is_stopped() => {
                tracing::debug!("View reloaded, starting a new polling session");
            }
            PollExit::Reloaded(_) => return Ok(()),
            PollExit::Stopped => {
                eprintln!("Stopped watching.");
                return Ok(());
            }
        }
    }
}

pub(crate) fn run_command(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    match &ctx.cli.command {
        None => show_laptops(ctx, OVERVIEW_LIMIT),
        Some(Commands::Laptops { limit }) => show_laptops(ctx, *limit),
        Some(Commands::Reports { laptop, limit }) => show_reports(ctx, laptop, *limit),
        Some(Commands::Daily { date }) => show_daily(ctx, date.as_deref()),
        Some(Commands::Scan { target, scan_type }) => trigger_scan(ctx, target, scan_type),
        Some(Commands::Cancel { target }) => cancel_command(ctx, target),
        Some(Commands::Delete { laptop, yes }) => delete_laptop(ctx, laptop, *yes),
        Some(Commands::LastUpdate) => show_last_update(ctx),
        Some(Commands::Health) => show_health(ctx),
        Some(Commands::Watch { exit_on_change }) => watch(ctx, *exit_on_change),
    }
}
