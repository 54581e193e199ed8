//! Update poller
//!
//! Asks the server for the last-update token on a fixed interval and reloads
//! the dashboard view once the token changes. The network call, the notice,
//! the reload and the clock are all injected, so the loop runs without a
//! server or a terminal.

pub(crate) mod runner;
pub(crate) mod state;
pub(crate) mod timer;

use std::time::Duration;

use crate::consts::{DEFAULT_INITIAL_DELAY_MS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_RELOAD_DELAY_MS};
use crate::error::PollError;

pub(crate) use runner::{PollExit, UpdatePoller};
pub(crate) use state::ChangeNotice;
pub(crate) use timer::{StopSignal, ThreadTimer};

/// Source of the server's last-update token
pub(crate) trait UpdateSource {
    /// `Ok(None)` means the server has no reports at all
    fn last_update(&mut self) -> Result<Option<String>, PollError>;
}

/// Shows the transient notice before a reload
pub(crate) trait ChangeNotifier {
    fn notify(&mut self, notice: &ChangeNotice);
}

/// Rebuilds the dashboard view after a detected change
pub(crate) trait Reloader {
    fn reload(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PollerConfig {
    pub(crate) interval: Duration,
    pub(crate) initial_delay: Duration,
    pub(crate) reload_delay: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            reload_delay: Duration::from_millis(DEFAULT_RELOAD_DELAY_MS),
        }
    }
}
