mod api;
mod app;
mod cli;
mod config;
mod consts;
mod error;
mod output;
mod poller;
mod utils;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::{CommandContext, run_command};
use cli::Cli;
use config::Config;
use error::AppError;
use utils::Timezone;

/// Logs go to stderr so table/JSON/CSV output on stdout stays clean.
/// `RUST_LOG` wins over `--debug`.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let client = api::ApiClient::new(
        cli.server(),
        cli.api_key.clone(),
        cli.session_cookie.clone(),
        cli.request_timeout(),
    )?;
    let ctx = CommandContext {
        cli,
        client,
        timezone,
        format: cli.output_format(),
    };
    run_command(&ctx)
}

fn main() {
    let cli = Cli::parse();
    let (config, config_path) = Config::load();
    let cli = cli.with_config(&config);

    init_logging(cli.debug);
    if let Some(path) = config_path {
        tracing::debug!("Loaded config from {}", path.display());
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
