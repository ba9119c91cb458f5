//! Mock scroll container lookup.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::usecases::ports::ScrollRegion;
use crate::usecases::ports::ScrollRegionHandle;
use crate::usecases::ports::ScrollRegionLookup;

#[derive(Default)]
pub struct MockScrollRegion {
    deltas: Mutex<Vec<f64>>,
    scroll_top: Mutex<f64>,
}

impl MockScrollRegion {
    pub fn deltas(&self) -> Vec<f64> {
        self.deltas.lock().unwrap().clone()
    }

    pub fn tick_count(&self) -> usize {
        self.deltas.lock().unwrap().len()
    }
}

impl ScrollRegion for MockScrollRegion {
    fn scroll_by(&self, delta: f64) {
        self.deltas.lock().unwrap().push(delta);
        *self.scroll_top.lock().unwrap() += delta;
    }

    fn scroll_top(&self) -> f64 {
        *self.scroll_top.lock().unwrap()
    }
}

pub struct MockScrollRegions {
    selector: String,
    mounted: AtomicBool,
    region: Arc<MockScrollRegion>,
}

impl MockScrollRegions {
    pub fn mounted(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            mounted: AtomicBool::new(true),
            region: Arc::new(MockScrollRegion::default()),
        }
    }

    pub fn unmounted(selector: &str) -> Self {
        let regions = Self::mounted(selector);
        regions.set_mounted(false);
        regions
    }

    pub fn set_mounted(&self, mounted: bool) {
        self.mounted.store(mounted, Ordering::SeqCst);
    }

    pub fn region(&self) -> Arc<MockScrollRegion> {
        Arc::clone(&self.region)
    }
}

impl ScrollRegionLookup for MockScrollRegions {
    fn find(&self, selector: &str) -> Option<ScrollRegionHandle> {
        if self.mounted.load(Ordering::SeqCst) && selector == self.selector {
            Some(Arc::clone(&self.region) as ScrollRegionHandle)
        } else {
            None
        }
    }
}
