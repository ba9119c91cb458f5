//! Scrollable region lookup port.

use std::sync::Arc;

pub trait ScrollRegion: Send + Sync {
    /// Scrolls by `delta` pixels; positive scrolls down. The region clamps to
    /// its own scroll range.
    fn scroll_by(&self, delta: f64);

    fn scroll_top(&self) -> f64;
}

pub type ScrollRegionHandle = Arc<dyn ScrollRegion>;

pub trait ScrollRegionLookup: Send + Sync {
    /// The currently mounted region matching `selector`, if any.
    fn find(&self, selector: &str) -> Option<ScrollRegionHandle>;
}

pub type ScrollRegionLookupHandle = Arc<dyn ScrollRegionLookup>;
