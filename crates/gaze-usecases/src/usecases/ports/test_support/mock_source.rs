//! Mock camera/landmark source with call counters.

use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use crate::domain::CameraSettings;
use crate::usecases::ports::LandmarkSource;
use crate::usecases::ports::SourceError;

#[derive(Default)]
pub struct MockLandmarkSource {
    start_error: Option<SourceError>,
    stop_error: Option<SourceError>,
    tracks_per_start: usize,

    live_tracks: AtomicUsize,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    requested: Mutex<Vec<CameraSettings>>,
}

impl MockLandmarkSource {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> MockLandmarkSourceBuilder {
        MockLandmarkSourceBuilder::new()
    }

    pub fn start_call_count(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stop_call_count(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn requested_settings(&self) -> Vec<CameraSettings> {
        self.requested.lock().unwrap().clone()
    }
}

impl LandmarkSource for MockLandmarkSource {
    fn start(&self, settings: &CameraSettings) -> Result<(), SourceError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(settings.clone());
        if let Some(ref err) = self.start_error {
            return Err(err.clone());
        }
        self.live_tracks
            .store(self.tracks_per_start, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) -> Result<(), SourceError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        // Tracks are released even when the device reports a failure.
        self.live_tracks.store(0, Ordering::SeqCst);
        if let Some(ref err) = self.stop_error {
            return Err(err.clone());
        }
        Ok(())
    }

    fn live_tracks(&self) -> usize {
        self.live_tracks.load(Ordering::SeqCst)
    }
}

pub struct MockLandmarkSourceBuilder {
    source: MockLandmarkSource,
}

impl MockLandmarkSourceBuilder {
    pub fn new() -> Self {
        Self {
            source: MockLandmarkSource {
                tracks_per_start: 1,
                ..MockLandmarkSource::default()
            },
        }
    }

    pub fn with_start_error(mut self, err: SourceError) -> Self {
        self.source.start_error = Some(err);
        self
    }

    pub fn with_stop_error(mut self, err: SourceError) -> Self {
        self.source.stop_error = Some(err);
        self
    }

    pub fn build(self) -> MockLandmarkSource {
        self.source
    }
}

impl Default for MockLandmarkSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
