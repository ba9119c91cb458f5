//! Single-entry cancellable timers.

use std::time::Instant;

/// Holds at most one pending deadline with its payload.
///
/// Arming always cancels the previous entry first, so a slot can never have
/// two live timers. Timers fire when the owner polls with `take_due`.
#[derive(Debug)]
pub struct TimerSlot<T> {
    armed: Option<Armed<T>>,
}

#[derive(Debug)]
struct Armed<T> {
    deadline: Instant,
    payload: T,
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self { armed: None }
    }
}

impl<T> TimerSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the payload of the entry that was cancelled to make room.
    pub fn arm(&mut self, deadline: Instant, payload: T) -> Option<T> {
        let cancelled = self.cancel();
        self.armed = Some(Armed { deadline, payload });
        cancelled
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.armed.take().map(|armed| armed.payload)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.armed.as_ref().map(|armed| armed.deadline)
    }

    pub fn payload(&self) -> Option<&T> {
        self.armed.as_ref().map(|armed| &armed.payload)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.armed.as_ref().is_some_and(|armed| now >= armed.deadline)
    }

    /// Removes and returns the payload once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        if self.is_due(now) { self.cancel() } else { None }
    }
}
