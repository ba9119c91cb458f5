//! Edge-proximity auto-scrolling.

use std::fmt;
use std::time::Duration;
use std::time::Instant;

use tracing::debug;

use crate::domain::EdgeZones;
use crate::domain::TrackerEvent;
use crate::domain::Viewport;
use crate::usecases::ports::ScrollRegionHandle;
use crate::usecases::ports::ScrollRegionLookupHandle;
use crate::usecases::timer::TimerSlot;

struct Impulse {
    velocity: f64,
    region: ScrollRegionHandle,
}

impl fmt::Debug for Impulse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Impulse")
            .field("velocity", &self.velocity)
            .finish_non_exhaustive()
    }
}

/// Scrolls the designated region while the cursor sits in a top or bottom
/// proximity band.
///
/// Every cursor update cancels the running impulse and, if the cursor is
/// still in a band, arms a fresh one. An impulse emits one scroll step per
/// animation tick and expires unconditionally after its lifetime, so scrolling
/// continues only while new cursor updates keep re-arming it.
pub struct EdgeScroller {
    zones: EdgeZones,
    lifetime: Duration,
    selector: String,
    regions: ScrollRegionLookupHandle,
    impulse: TimerSlot<Impulse>,
}

impl fmt::Debug for EdgeScroller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeScroller")
            .field("zones", &self.zones)
            .field("lifetime", &self.lifetime)
            .field("selector", &self.selector)
            .field("impulse", &self.impulse)
            .finish_non_exhaustive()
    }
}

impl EdgeScroller {
    pub fn new(
        zones: EdgeZones,
        lifetime: Duration,
        selector: impl Into<String>,
        regions: ScrollRegionLookupHandle,
    ) -> Self {
        Self {
            zones,
            lifetime,
            selector: selector.into(),
            regions,
            impulse: TimerSlot::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.impulse.is_armed()
    }

    pub fn velocity(&self) -> Option<f64> {
        self.impulse.payload().map(|impulse| impulse.velocity)
    }

    pub fn on_cursor_moved(&mut self, y: f64, viewport: &Viewport, now: Instant) -> Vec<TrackerEvent> {
        let superseded = self.impulse.cancel().is_some();

        let Some(velocity) = self.zones.velocity_at(y, viewport.height()) else {
            if superseded {
                debug!("Cursor left scroll zone; impulse cancelled");
            }
            return Vec::new();
        };
        let Some(region) = self.regions.find(&self.selector) else {
            debug!(selector = %self.selector, "No scroll region mounted");
            return Vec::new();
        };

        self.impulse
            .arm(now + self.lifetime, Impulse { velocity, region });
        vec![TrackerEvent::ScrollArmed { velocity }]
    }

    /// One animation tick: expire the impulse or apply one scroll step.
    pub fn tick(&mut self, now: Instant) -> Vec<TrackerEvent> {
        if self.impulse.take_due(now).is_some() {
            debug!("Scroll impulse expired");
            return vec![TrackerEvent::ScrollExpired];
        }
        match self.impulse.payload() {
            Some(impulse) => {
                impulse.region.scroll_by(impulse.velocity);
                vec![TrackerEvent::Scrolled {
                    delta: impulse.velocity,
                }]
            }
            None => Vec::new(),
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.impulse.cancel().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::test_support::MockScrollRegions;

    const LIFETIME: Duration = Duration::from_millis(120);

    fn viewport() -> Viewport {
        Viewport::new(800.0, 1000.0)
    }

    fn scroller(regions: &Arc<MockScrollRegions>) -> EdgeScroller {
        EdgeScroller::new(
            EdgeZones::new(0.10, 6.0, 18.0),
            LIFETIME,
            "chat-messages",
            Arc::clone(regions) as ScrollRegionLookupHandle,
        )
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_no_impulse_outside_zones() {
        let regions = Arc::new(MockScrollRegions::mounted("chat-messages"));
        let mut scroller = scroller(&regions);
        assert!(scroller.on_cursor_moved(500.0, &viewport(), Instant::now()).is_empty());
        assert!(!scroller.is_running());
    }

    #[test]
    fn test_top_zone_scrolls_up_each_tick() {
        let regions = Arc::new(MockScrollRegions::mounted("chat-messages"));
        let mut scroller = scroller(&regions);
        let t0 = Instant::now();
        let events = scroller.on_cursor_moved(0.0, &viewport(), t0);
        assert_eq!(events, vec![TrackerEvent::ScrollArmed { velocity: -18.0 }]);

        scroller.tick(t0 + ms(16));
        scroller.tick(t0 + ms(32));
        assert_eq!(regions.region().deltas(), vec![-18.0, -18.0]);
    }

    #[test]
    fn test_impulse_expires_after_lifetime_without_rearm() {
        let regions = Arc::new(MockScrollRegions::mounted("chat-messages"));
        let mut scroller = scroller(&regions);
        let t0 = Instant::now();
        scroller.on_cursor_moved(990.0, &viewport(), t0);

        let mut at = 16;
        while at < 200 {
            scroller.tick(t0 + ms(at));
            at += 16;
        }
        // Ticks at 16..112 emit; the tick at 128 observes expiry.
        assert_eq!(regions.region().tick_count(), 7);
        assert!(!scroller.is_running());
        assert!(regions.region().deltas().iter().all(|d| *d > 0.0));
    }

    #[test]
    fn test_rearm_extends_without_overlapping_loops() {
        let regions = Arc::new(MockScrollRegions::mounted("chat-messages"));
        let mut scroller = scroller(&regions);
        let t0 = Instant::now();
        scroller.on_cursor_moved(10.0, &viewport(), t0);
        scroller.tick(t0 + ms(16));
        scroller.on_cursor_moved(10.0, &viewport(), t0 + ms(100));
        scroller.tick(t0 + ms(150));
        scroller.tick(t0 + ms(210));
        // One step per tick: a single loop is ever active.
        assert_eq!(regions.region().tick_count(), 3);
        assert_eq!(
            scroller.tick(t0 + ms(220)),
            vec![TrackerEvent::ScrollExpired]
        );
    }

    #[test]
    fn test_leaving_zone_cancels_impulse() {
        let regions = Arc::new(MockScrollRegions::mounted("chat-messages"));
        let mut scroller = scroller(&regions);
        let t0 = Instant::now();
        scroller.on_cursor_moved(10.0, &viewport(), t0);
        scroller.on_cursor_moved(500.0, &viewport(), t0 + ms(30));
        assert!(!scroller.is_running());
        assert!(scroller.tick(t0 + ms(40)).is_empty());
        assert_eq!(regions.region().tick_count(), 0);
    }

    #[test]
    fn test_missing_region_is_noop() {
        let regions = Arc::new(MockScrollRegions::unmounted("chat-messages"));
        let mut scroller = scroller(&regions);
        let t0 = Instant::now();
        assert!(scroller.on_cursor_moved(5.0, &viewport(), t0).is_empty());
        assert!(!scroller.is_running());
        assert!(scroller.tick(t0 + ms(16)).is_empty());
    }
}
