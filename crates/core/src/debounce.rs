//! Keystroke-coalescing debounce timer.
//!
//! Every keystroke restarts a quiet window; only when the window elapses
//! untouched does a firing reach the application loop. The timer is a
//! single-slot abortable task: rescheduling aborts the previous sleep, so at
//! most one timer exists and it never double-fires.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Message sent when the quiet window elapses.
///
/// Carries no query text: the receiver reads the current query at fire time,
/// so the last keystroke within the window wins. The generation lets the
/// receiver drop a firing that was already queued when a newer keystroke
/// arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceFired {
    /// Generation of the schedule that produced this firing.
    pub generation: u64,
}

/// Single-slot debounce timer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    tx: UnboundedSender<DebounceFired>,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl Debouncer {
    /// The quiet window used when nothing else is configured.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

    /// Create a timer sending firings into `tx` after `delay` of quiet.
    pub fn new(delay: Duration, tx: UnboundedSender<DebounceFired>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
            generation: 0,
        }
    }

    /// (Re)start the quiet window.
    ///
    /// The previously scheduled firing, if any, is aborted; a firing from it
    /// that already sits in the channel is invalidated by the generation
    /// bump.
    pub fn schedule(&mut self) {
        self.abort_pending();
        self.generation += 1;

        let generation = self.generation;
        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(DebounceFired { generation });
        }));
    }

    /// Abort the pending firing, if any, and invalidate queued ones.
    pub fn cancel(&mut self) {
        self.abort_pending();
        self.generation += 1;
    }

    /// Whether a firing belongs to the most recent schedule.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
