use std::time::{Duration, Instant};

/// Trailing-edge debouncer driven by the event loop.
///
/// `call` replaces whatever is pending and restarts the window; `poll` hands
/// back the latest argument once the window has elapsed with no further calls.
/// At most one call is ever pending.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    deadline: Instant,
    arg: T,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn call(&mut self, arg: T, now: Instant) {
        self.pending = Some(Pending {
            deadline: now + self.delay,
            arg,
        });
    }

    /// Takes the pending argument if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if due {
            self.pending.take().map(|p| p.arg)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending call fires, if any.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.deadline.saturating_duration_since(now))
    }
}
