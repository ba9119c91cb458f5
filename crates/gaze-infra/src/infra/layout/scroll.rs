//! In-memory scroll containers.

use std::sync::Mutex;

use tracing::trace;

use crate::common::mutex_lock_or_recover;
use crate::usecases::ports::ScrollRegion;

#[derive(Debug, Default)]
struct RegionState {
    top: f64,
    ticks: usize,
    travelled: f64,
}

/// A scroll container clamped to `[0, max_scroll]`.
#[derive(Debug)]
pub struct LayoutScrollRegion {
    selector: String,
    max_scroll: f64,
    state: Mutex<RegionState>,
}

impl LayoutScrollRegion {
    pub fn new(selector: impl Into<String>, max_scroll: f64, scroll_top: f64) -> Self {
        let max_scroll = max_scroll.max(0.0);
        Self {
            selector: selector.into(),
            max_scroll,
            state: Mutex::new(RegionState {
                top: scroll_top.clamp(0.0, max_scroll),
                ..RegionState::default()
            }),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    /// Number of `scroll_by` calls, including ones clamped to no movement.
    pub fn ticks(&self) -> usize {
        mutex_lock_or_recover(&self.state).ticks
    }

    /// Total distance actually moved, in pixels.
    pub fn travelled(&self) -> f64 {
        mutex_lock_or_recover(&self.state).travelled
    }
}

impl ScrollRegion for LayoutScrollRegion {
    fn scroll_by(&self, delta: f64) {
        let mut state = mutex_lock_or_recover(&self.state);
        let next = (state.top + delta).clamp(0.0, self.max_scroll);
        state.travelled += (next - state.top).abs();
        state.top = next;
        state.ticks += 1;
        trace!(selector = %self.selector, delta, top = next, "Scrolled");
    }

    fn scroll_top(&self) -> f64 {
        mutex_lock_or_recover(&self.state).top
    }
}
