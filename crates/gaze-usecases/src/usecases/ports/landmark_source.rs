//! Landmark source port.

use std::sync::Arc;

use crate::domain::CameraSettings;
use crate::usecases::ports::SourceError;

/// Camera device plus landmark detector.
///
/// Only the device lifecycle lives here. Frames are delivered by the host in
/// arrival order through `TrackingSession::handle_frame`; the source never
/// calls back into the session concurrently.
pub trait LandmarkSource: Send + Sync {
    fn start(&self, settings: &CameraSettings) -> Result<(), SourceError>;

    /// Releases the device and every media track it opened.
    fn stop(&self) -> Result<(), SourceError>;

    fn live_tracks(&self) -> usize;
}

pub type LandmarkSourceHandle = Arc<dyn LandmarkSource>;
