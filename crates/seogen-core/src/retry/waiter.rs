//! Blocking wait capability used for backoff and inter-task pacing.

use std::cell::RefCell;
use std::time::Duration;

/// Something that can suspend the run for a duration.
///
/// The real implementation blocks the thread; tests swap in
/// [`RecordingWaiter`] to observe delays without sleeping.
pub trait Waiter {
    fn wait(&self, duration: Duration);
}

/// Blocks the current thread with `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadWaiter;

impl Waiter for ThreadWaiter {
    fn wait(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Returns immediately and remembers every requested duration.
#[derive(Debug, Default)]
pub struct RecordingWaiter {
    waits: RefCell<Vec<Duration>>,
}

impl RecordingWaiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations requested so far, in order.
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.borrow().clone()
    }
}

impl Waiter for RecordingWaiter {
    fn wait(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
    }
}

impl<W: Waiter + ?Sized> Waiter for &W {
    fn wait(&self, duration: Duration) {
        (**self).wait(duration)
    }
}
