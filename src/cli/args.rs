//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::Config;
use crate::consts::{
    DEFAULT_INITIAL_DELAY_MS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_RELOAD_DELAY_MS,
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_SERVER, DEFAULT_STATUS_PATH,
};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// How listings are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "scanwatch")]
#[command(about = "Command-line dashboard for the laptop scan server", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Server base URL (e.g., "http://127.0.0.1:8000")
    #[arg(long, global = true, env = "SCANWATCH_SERVER", value_name = "URL")]
    pub(crate) server: Option<String>,

    /// API key sent as X-API-Key
    #[arg(long, global = true, env = "SCANWATCH_API_KEY", hide_env_values = true)]
    pub(crate) api_key: Option<String>,

    /// Dashboard session cookie sent with actions (e.g., "session=abc123")
    #[arg(long, global = true, value_name = "COOKIE")]
    pub(crate) session_cookie: Option<String>,

    /// Path of the last-update status endpoint
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) status_path: Option<String>,

    /// Interval between update checks in milliseconds
    #[arg(long, global = true, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) interval_ms: Option<u64>,

    /// Delay before the first update check in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub(crate) initial_delay_ms: Option<u64>,

    /// Delay between the change notice and the refresh in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub(crate) reload_delay_ms: Option<u64>,

    /// HTTP request timeout in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub(crate) timeout_ms: Option<u64>,

    /// Output as JSON
    #[arg(short, long, global = true, conflicts_with = "csv")]
    pub(crate) json: bool,

    /// Output as CSV
    #[arg(long, global = true)]
    pub(crate) csv: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Timezone for date display (e.g., "Europe/Berlin", "UTC", "local")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        // String and numeric options: only apply if CLI didn't set them
        if self.server.is_none() {
            self.server = config.server.clone();
        }
        if self.api_key.is_none() {
            self.api_key = config.api_key.clone();
        }
        if self.session_cookie.is_none() {
            self.session_cookie = config.session_cookie.clone();
        }
        if self.status_path.is_none() {
            self.status_path = config.status_path.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.interval_ms.is_none() {
            match config.poll_interval_ms {
                Some(0) => eprintln!("Warning: poll_interval_ms must be at least 1, using the default"),
                configured => self.interval_ms = configured,
            }
        }
        self.initial_delay_ms = self.initial_delay_ms.or(config.initial_delay_ms);
        self.reload_delay_ms = self.reload_delay_ms.or(config.reload_delay_ms);
        self.timeout_ms = self.timeout_ms.or(config.request_timeout_ms);

        self
    }

    pub(crate) fn server(&self) -> &str {
        self.server.as_deref().unwrap_or(DEFAULT_SERVER)
    }

    pub(crate) fn status_path(&self) -> &str {
        self.status_path.as_deref().unwrap_or(DEFAULT_STATUS_PATH)
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS))
    }

    pub(crate) fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms.unwrap_or(DEFAULT_INITIAL_DELAY_MS))
    }

    pub(crate) fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms.unwrap_or(DEFAULT_RELOAD_DELAY_MS))
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS))
    }

    pub(crate) fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Table
        }
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["scanwatch"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_without_config() {
        let cli = parse(&["laptops"]).with_config(&Config::default());
        assert_eq!(cli.server(), DEFAULT_SERVER);
        assert_eq!(cli.status_path(), DEFAULT_STATUS_PATH);
        assert_eq!(cli.poll_interval(), Duration::from_secs(30));
        assert_eq!(cli.initial_delay(), Duration::from_secs(2));
        assert_eq!(cli.reload_delay(), Duration::from_secs(2));
        assert_eq!(cli.output_format(), OutputFormat::Table);
    }

    #[test]
    fn config_fills_unset_options() {
        let config = Config {
            server: Some("http://fleet:8000".to_string()),
            poll_interval_ms: Some(5_000),
            initial_delay_ms: Some(0),
            status_path: Some("/api/v1/reports/last_update_timestamp".to_string()),
            no_color: true,
            ..Config::default()
        };
        let cli = parse(&["watch"]).with_config(&config);
        assert_eq!(cli.server(), "http://fleet:8000");
        assert_eq!(cli.poll_interval(), Duration::from_secs(5));
        assert_eq!(cli.initial_delay(), Duration::ZERO);
        assert_eq!(cli.status_path(), "/api/v1/reports/last_update_timestamp");
        assert!(!cli.use_color());
    }

    #[test]
    fn cli_overrides_config() {
        let config = Config {
            server: Some("http://fleet:8000".to_string()),
            poll_interval_ms: Some(5_000),
            ..Config::default()
        };
        let cli = parse(&["--server", "http://other:9000", "--interval-ms", "1000", "watch"])
            .with_config(&config);
        assert_eq!(cli.server(), "http://other:9000");
        assert_eq!(cli.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn output_format_flags() {
        assert_eq!(parse(&["-j", "laptops"]).output_format(), OutputFormat::Json);
        assert_eq!(parse(&["laptops", "--csv"]).output_format(), OutputFormat::Csv);
    }

    #[test]
    fn json_and_csv_conflict() {
        assert!(Cli::try_parse_from(["scanwatch", "--json", "--csv", "laptops"]).is_err());
    }

    #[test]
    fn color_always_without_no_color() {
        let cli = parse(&["--color", "always", "laptops"]);
        assert!(cli.use_color());
        let cli = parse(&["--color", "always", "--no-color", "laptops"]);
        assert!(!cli.use_color());
    }

    #[test]
    fn scan_defaults_to_full_scan() {
        let cli = parse(&["scan", "all"]);
        match cli.command {
            Some(Commands::Scan { target, scan_type }) => {
                assert_eq!(target, "all");
                assert_eq!(scan_type, "FullScan");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Cli::try_parse_from(["scanwatch", "--interval-ms", "0", "watch"]).is_err());
        let cli = parse(&["--interval-ms", "1", "watch"]);
        assert_eq!(cli.poll_interval(), Duration::from_millis(1));
    }

    #[test]
    fn zero_interval_in_config_falls_back_to_default() {
        let config = Config {
            poll_interval_ms: Some(0),
            ..Config::default()
        };
        let cli = parse(&["watch"]).with_config(&config);
        assert_eq!(cli.poll_interval(), Duration::from_millis(DEFAULT_POLL_INTERVAL_MS));
    }
}
