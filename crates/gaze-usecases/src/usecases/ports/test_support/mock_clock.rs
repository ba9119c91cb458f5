//! Manually advanced clock for deterministic timer tests.

use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use crate::usecases::ports::Clock;

pub struct MockClock {
    origin: Instant,
    now: Mutex<Instant>,
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClock {
    pub fn new() -> Self {
        let origin = Instant::now();
        Self {
            origin,
            now: Mutex::new(origin),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn elapsed_since_origin(&self) -> Duration {
        *self.now.lock().unwrap() - self.origin
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}
