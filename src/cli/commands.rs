//! CLI subcommand definitions
//!
//! One subcommand per dashboard action, plus `watch` for the update poller.

use clap::Subcommand;

use crate::consts::DEFAULT_SCAN_TYPE;

/// Main CLI commands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Show the laptop overview (default)
    Laptops {
        /// Maximum number of laptops to fetch
        #[arg(long, default_value_t = 10_000)]
        limit: u32,
    },
    /// Show scan report history for one laptop
    Reports {
        /// Laptop alias or hostname
        laptop: String,
        /// Maximum number of reports to fetch
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Show the daily scan report for all laptops
    Daily {
        /// Report date (YYYYMMDD or YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Queue a scan on one laptop, or on every laptop with "all"
    Scan {
        /// Laptop alias, or "all"
        target: String,
        /// Scan type passed to the client
        #[arg(long, default_value = DEFAULT_SCAN_TYPE)]
        scan_type: String,
    },
    /// Cancel the pending command of one laptop, or of every laptop with "all"
    Cancel {
        /// Laptop alias, or "all"
        target: String,
    },
    /// Delete a laptop and all of its scan reports
    Delete {
        /// Laptop alias or hostname
        laptop: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the time of the most recent scan report
    LastUpdate,
    /// Check that the server API is up
    Health,
    /// Show the overview and refresh it whenever new reports arrive
    Watch {
        /// Return after the first detected change instead of watching again
        #[arg(long)]
        exit_on_change: bool,
    },
}
