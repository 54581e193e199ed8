use std::thread::{self, JoinHandle};

use super::state::{ChangeNotice, PollState, Transition, evaluate};
use super::timer::{ThreadTimer, Tick, Timer};
use super::{ChangeNotifier, PollerConfig, Reloader, UpdateSource};

/// How a poller session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PollExit {
    /// A change was detected and the view was reloaded
    Reloaded(ChangeNotice),
    /// Stopped from outside before any reload happened
    Stopped,
}

/// One polling session. The stored token lives and dies with the session;
/// a reload ends it and the caller starts a fresh one.
pub(crate) struct UpdatePoller<S, N, R, T> {
    source: S,
    notifier: N,
    reloader: R,
    timer: T,
    config: PollerConfig,
    known: Option<String>,
    state: PollState,
}

impl<S, N, R, T> UpdatePoller<S, N, R, T>
where
    S: UpdateSource,
    N: ChangeNotifier,
    R: Reloader,
    T: Timer,
{
    pub(crate) fn new(source: S, notifier: N, reloader: R, timer: T, config: PollerConfig) -> Self {
        Self {
            source,
            notifier,
            reloader,
            timer,
            config,
            known: None,
            state: PollState::Idle,
        }
    }

    #[cfg(test)]
    pub(crate) fn known(&self) -> Option<&str> {
        self.known.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> PollState {
        self.state
    }

    /// Poll until a change reloads the view or the timer is stopped
    pub(crate) fn run(&mut self) -> PollExit {
        self.timer.schedule(self.config.initial_delay);
        loop {
            self.state = PollState::Idle;
            if self.timer.wait() == Tick::Stopped {
                tracing::debug!("Update polling stopped while {:?}", self.state);
                return PollExit::Stopped;
            }
            if let Some(notice) = self.check() {
                return self.reload(notice);
            }
        }
    }

    /// Run one status check. Schedules the next tick unless a change was found.
    pub(crate) fn check(&mut self) -> Option<ChangeNotice> {
        self.state = PollState::Checking;
        tracing::debug!("Checking for updates...");

        match evaluate(self.known.as_deref(), self.source.last_update()) {
            Transition::Failed(err) => {
                tracing::warn!("Update check failed: {err}");
            }
            Transition::Unchanged => match &self.known {
                Some(known) => tracing::debug!("No new updates since {known}"),
                None => tracing::debug!("No reports on server, nothing changed"),
            },
            Transition::FirstObservation(token) => {
                tracing::info!("Initial last update time set to {token}");
                self.known = Some(token);
            }
            Transition::Changed(notice) => {
                self.state = PollState::Reloading;
                return Some(notice);
            }
        }

        self.schedule_next();
        self.state = PollState::Idle;
        None
    }

    fn schedule_next(&mut self) {
        self.timer.schedule(self.config.interval);
        tracing::debug!(
            "Next update check in {:.1}s",
            self.config.interval.as_secs_f64()
        );
    }

    fn reload(&mut self, notice: ChangeNotice) -> PollExit {
        match &notice {
            ChangeNotice::NewReports { previous, current } => {
                tracing::info!("New report detected (server: {current}, known: {previous}), reloading");
            }
            ChangeNotice::ReportsRemoved { previous } => {
                tracing::info!("Reports appear to be removed (known: {previous}), reloading");
            }
        }
        self.notifier.notify(&notice);
        self.timer.cancel();
        self.timer.schedule(self.config.reload_delay);
        if self.timer.wait() == Tick::Stopped {
            tracing::debug!("Update polling stopped while {:?}", self.state);
            return PollExit::Stopped;
        }
        self.reloader.reload();
        PollExit::Reloaded(notice)
    }
}

impl<S, N, R> UpdatePoller<S, N, R, ThreadTimer>
where
    S: UpdateSource + Send + 'static,
    N: ChangeNotifier + Send + 'static,
    R: Reloader + Send + 'static,
{
    /// Run the session on its own thread. It ends on a reload or once the
    /// timer's [`StopSignal`](super::StopSignal) fires.
    pub(crate) fn start(mut self) -> PollerHandle {
        let thread = thread::spawn(move || self.run());
        PollerHandle { thread }
    }
}

pub(crate) struct PollerHandle {
    thread: JoinHandle<PollExit>,
}

impl PollerHandle {
    /// Wait for the session to end. A panicked poller counts as stopped.
    pub(crate) fn join(self) -> PollExit {
        self.thread.join().unwrap_or(PollExit::Stopped)
    }
}
