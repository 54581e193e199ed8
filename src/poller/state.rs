//! Change detection over the last-update token
//!
//! Tokens are compared for equality only. A present token that differs from
//! the stored one, or a stored token that disappears, means the report
//! collection changed.

use crate::error::PollError;

/// Where the poller is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollState {
    /// Waiting for the next tick
    Idle,
    /// Status request in flight
    Checking,
    /// Change detected, the session is ending
    Reloading,
}

/// What a change looks like to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChangeNotice {
    /// A new token replaced the stored one
    NewReports { previous: String, current: String },
    /// The server no longer reports any token (all reports removed)
    ReportsRemoved { previous: String },
}

impl ChangeNotice {
    pub(crate) fn message(&self) -> &'static str {
        match self {
            ChangeNotice::NewReports { .. } => "New scan reports available. Refreshing...",
            ChangeNotice::ReportsRemoved { .. } => {
                "Report changes detected (possibly deleted). Refreshing..."
            }
        }
    }
}

/// Outcome of comparing one status response against the stored token
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Same token as before, or still no token at all
    Unchanged,
    /// First token seen in this session; store it without reloading
    FirstObservation(String),
    /// The collection changed; reload
    Changed(ChangeNotice),
    /// The check failed; keep the stored token and poll again
    Failed(PollError),
}

pub(crate) fn evaluate(known: Option<&str>, response: Result<Option<String>, PollError>) -> Transition {
    let latest = match response {
        Ok(latest) => latest,
        Err(err) => return Transition::Failed(err),
    };
    match (known, latest) {
        (None, None) => Transition::Unchanged,
        (None, Some(current)) => Transition::FirstObservation(current),
        (Some(previous), Some(current)) if previous == current => Transition::Unchanged,
        (Some(previous), Some(current)) => Transition::Changed(ChangeNotice::NewReports {
            previous: previous.to_string(),
            current,
        }),
        (Some(previous), None) => Transition::Changed(ChangeNotice::ReportsRemoved {
            previous: previous.to_string(),
        }),
    }
}
