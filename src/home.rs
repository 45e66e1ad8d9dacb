//! The home context: the single thread that owns presentation state.
//!
//! Lookups run on runtime worker threads; their completions are handed to a [`HomeContext`],
//! which runs them on the thread driving the matching [`EventLoop`].

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use tracing::warn;

/// A unit of work bound for the home context.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Somewhere completions can be sent to run later, on the context that owns the UI.
pub trait HomeContext: Send + Sync + 'static {
    fn dispatch(&self, job: Job);
}

/// Queue of jobs, drained by whichever thread calls [`EventLoop::run_until`] or
/// [`EventLoop::run_pending`]. That thread is the home context.
#[derive(Debug)]
pub struct EventLoop {
    tx: Sender<Job>,
    rx: Receiver<Job>,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// A sendable handle other threads dispatch through.
    pub fn handle(&self) -> EventLoopHandle {
        EventLoopHandle {
            tx: self.tx.clone(),
        }
    }

    /// Runs jobs as they arrive until `done` holds after a job. Returns immediately if it
    /// already holds.
    pub fn run_until(&self, mut done: impl FnMut() -> bool) {
        while !done() {
            // The loop keeps its own sender, so recv only returns once a job is queued.
            match self.rx.recv() {
                Ok(job) => job(),
                Err(_) => return,
            }
        }
    }

    /// Like [`run_until`](Self::run_until) but gives up once no job arrived for `idle`.
    /// Returns whether `done` was reached.
    pub fn run_until_timeout(&self, idle: Duration, mut done: impl FnMut() -> bool) -> bool {
        while !done() {
            match self.rx.recv_timeout(idle) {
                Ok(job) => job(),
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    /// Runs whatever is queued right now, without waiting. Returns how many jobs ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}

/// Sending half of an [`EventLoop`].
#[derive(Debug, Clone)]
pub struct EventLoopHandle {
    tx: Sender<Job>,
}

impl HomeContext for EventLoopHandle {
    fn dispatch(&self, job: Job) {
        if self.tx.send(job).is_err() {
            warn!("home event loop is gone, dropping completion");
        }
    }
}
