//! Replay runtimes: drive a tracking session from a recorded trace.

mod realtime;
mod report;
mod virtual_time;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::infra::clock::ManualClock;
use crate::infra::clock::SystemClock;
use crate::infra::config::TrackerConfig;
use crate::infra::layout::LayoutSurface;
use crate::infra::trace::TraceSource;
use crate::usecases::TrackerPorts;
use crate::usecases::TrackingSession;
use crate::usecases::ports::ClockHandle;
use crate::usecases::ports::SessionError;

pub use report::ActivationRecord;
pub use report::FailureRecord;
pub use report::RegionScroll;
pub use report::ReplayReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayMode {
    /// Manual clock; runs as fast as possible and is fully deterministic.
    #[default]
    Virtual,
    /// Frames paced on the wall clock.
    Realtime,
}

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Tracker failed to start: {0}")]
    Start(#[from] SessionError),
    #[error("Failed to spawn trace feeder: {0}")]
    Spawn(#[source] std::io::Error),
}

/// The session clock for `mode`. Virtual replay also hands back the manual
/// clock it steps; realtime runs on the wall clock alone.
fn replay_clock(mode: ReplayMode) -> (ClockHandle, Option<Arc<ManualClock>>) {
    match mode {
        ReplayMode::Virtual => {
            let manual = Arc::new(ManualClock::new());
            (Arc::clone(&manual) as ClockHandle, Some(manual))
        }
        ReplayMode::Realtime => (Arc::new(SystemClock::new()) as ClockHandle, None),
    }
}

/// Replays `trace` against `surface` and reports what the tracker did.
///
/// The session stops once the trace is exhausted, cancelling whatever dwell,
/// scroll or highlight is still pending. It is also stopped on error.
pub fn run_replay(
    surface: Arc<LayoutSurface>,
    trace: &Path,
    config: &TrackerConfig,
    mode: ReplayMode,
) -> Result<ReplayReport, ReplayError> {
    let source = Arc::new(TraceSource::new(trace));
    let (clock, manual) = replay_clock(mode);
    let ports = TrackerPorts {
        clock,
        source: source.clone(),
        surface: surface.clone(),
        scroll_regions: surface.clone(),
    };
    let settings = config.settings();
    let mut session = TrackingSession::new(ports, settings.clone(), config.camera().clone());
    session.start()?;

    let frames = source.take_frames().unwrap_or_default();
    info!(frames = frames.len(), mode = ?mode, "Replaying trace");

    let mut recorder = report::Recorder::new(&surface);
    match manual.as_deref() {
        Some(manual) => virtual_time::replay(
            &mut session,
            manual,
            frames,
            config.tick_interval(),
            &mut recorder,
        ),
        None => realtime::replay(
            &mut session,
            frames,
            config.tick_interval(),
            &mut recorder,
        )?,
    }

    let final_cursor = session.cursor();
    session.stop();
    Ok(recorder.finish(final_cursor))
}
