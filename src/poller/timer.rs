//! Single pending-deadline timer used by the poll loop

use std::time::{Duration, Instant};

use flume::{Receiver, RecvTimeoutError, Sender};

/// Result of waiting on the pending deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tick {
    Fired,
    Stopped,
}

/// A timer holding at most one pending deadline.
///
/// `schedule` replaces any deadline that is still pending, so two ticks can
/// never be queued at once.
pub(crate) trait Timer {
    fn schedule(&mut self, delay: Duration);

    fn cancel(&mut self);

    /// Block until the pending deadline passes or the timer is stopped.
    /// With nothing scheduled this only returns on stop.
    fn wait(&mut self) -> Tick;
}

/// Shared kill channel; stopping wakes any blocked [`ThreadTimer::wait`].
///
/// The single slot stays filled once stopped, so every later wait and
/// [`StopSignal::is_stopped`] sees it too.
#[derive(Debug, Clone)]
pub(crate) struct StopSignal {
    kill_tx: Sender<()>,
    kill_rx: Receiver<()>,
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal {
    pub(crate) fn new() -> Self {
        let (kill_tx, kill_rx) = flume::bounded::<()>(1);
        Self { kill_tx, kill_rx }
    }

    pub(crate) fn stop(&self) {
        // Full means a stop is already pending
        let _ = self.kill_tx.try_send(());
    }

    pub(crate) fn is_stopped(&self) -> bool {
        !self.kill_rx.is_empty()
    }

    /// Returns true if stopped before `deadline`
    fn wait_until(&self, deadline: Option<Instant>) -> bool {
        let stopped = match deadline {
            Some(deadline) => match self.kill_rx.recv_deadline(deadline) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
                Err(RecvTimeoutError::Timeout) => false,
            },
            None => {
                let _ = self.kill_rx.recv();
                true
            }
        };
        if stopped {
            self.stop();
        }
        stopped
    }
}

/// Wall-clock timer that blocks the calling thread
#[derive(Debug)]
pub(crate) struct ThreadTimer {
    deadline: Option<Instant>,
    stop: StopSignal,
}

impl ThreadTimer {
    pub(crate) fn new(stop: StopSignal) -> Self {
        Self {
            deadline: None,
            stop,
        }
    }
}

impl Timer for ThreadTimer {
    fn schedule(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn wait(&mut self) -> Tick {
        if self.stop.wait_until(self.deadline) {
            return Tick::Stopped;
        }
        self.deadline = None;
        Tick::Fired
    }
}
