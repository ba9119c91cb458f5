//! Clock implementations.

use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use crate::common::mutex_lock_or_recover;
use crate::usecases::ports::Clock;

#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Virtual clock for deterministic replay. Time only moves when the runtime
/// sets it and never moves backwards.
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Moves to `at` past the origin. Earlier values are ignored.
    pub fn set_elapsed(&self, at: Duration) {
        let mut offset = mutex_lock_or_recover(&self.offset);
        if at > *offset {
            *offset = at;
        }
    }

    pub fn elapsed_since_origin(&self) -> Duration {
        *mutex_lock_or_recover(&self.offset)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed_since_origin()
    }
}
