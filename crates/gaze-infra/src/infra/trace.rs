//! Recorded landmark traces and the source that "acquires" them.
//!
//! A trace is JSON Lines, one detector result per line:
//!
//! ```text
//! {"at_ms": 0, "point": {"x": 0.5, "y": 0.5}}
//! {"at_ms": 33, "point": null}
//! {"at_ms": 66, "faces": [[{"x": 0.1, "y": 0.2}, {"x": 0.5, "y": 0.5}]]}
//! ```
//!
//! `faces` carries full meshes; the configured landmark index is picked from
//! the first face. Timestamps must not decrease, and consecutive lines may
//! be at most [`MAX_FRAME_GAP_MS`] apart.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use tracing::info;

use crate::common::mutex_lock_or_recover;
use crate::domain::CameraSettings;
use crate::domain::LandmarkFrame;
use crate::domain::NormalizedPoint;
use crate::usecases::ports::LandmarkSource;
use crate::usecases::ports::SourceError;

/// Longest silence allowed between two detector results, counted from zero
/// for the first line. Replay ticks through every gap, so this bounds work.
pub const MAX_FRAME_GAP_MS: u64 = 60_000;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to open trace {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read trace line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed trace line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Trace line {line} goes back in time ({at_ms} ms after {previous_ms} ms)")]
    OutOfOrder {
        line: usize,
        at_ms: u64,
        previous_ms: u64,
    },
    #[error("Trace line {line} jumps {gap_ms} ms ahead (at most {MAX_FRAME_GAP_MS} ms)")]
    Gap { line: usize, gap_ms: u64 },
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct PointLine {
    x: f64,
    y: f64,
}

impl From<PointLine> for NormalizedPoint {
    fn from(p: PointLine) -> Self {
        NormalizedPoint::new(p.x, p.y)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TraceLine {
    at_ms: u64,
    #[serde(default)]
    point: Option<PointLine>,
    #[serde(default)]
    faces: Option<Vec<Vec<PointLine>>>,
}

/// One detector result and its offset from the start of the recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceFrame {
    pub at: Duration,
    pub frame: LandmarkFrame,
}

/// Parses a whole trace. Blank lines are skipped.
pub fn parse_trace<R: BufRead>(
    reader: R,
    landmark_index: usize,
) -> Result<Vec<TraceFrame>, TraceError> {
    let mut frames = Vec::new();
    let mut previous_ms = 0;
    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|source| TraceError::Read {
            line: line_no,
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let parsed: TraceLine = serde_json::from_str(&line).map_err(|source| TraceError::Parse {
            line: line_no,
            source,
        })?;
        if parsed.at_ms < previous_ms {
            return Err(TraceError::OutOfOrder {
                line: line_no,
                at_ms: parsed.at_ms,
                previous_ms,
            });
        }
        let gap_ms = parsed.at_ms - previous_ms;
        if gap_ms > MAX_FRAME_GAP_MS {
            return Err(TraceError::Gap {
                line: line_no,
                gap_ms,
            });
        }
        previous_ms = parsed.at_ms;

        let frame = match (parsed.faces, parsed.point) {
            (Some(faces), _) => {
                let meshes: Vec<Vec<NormalizedPoint>> = faces
                    .into_iter()
                    .map(|mesh| mesh.into_iter().map(NormalizedPoint::from).collect())
                    .collect();
                LandmarkFrame::from_faces(&meshes, landmark_index)
            }
            (None, Some(point)) => LandmarkFrame::with_point(point.into()),
            (None, None) => LandmarkFrame::empty(),
        };
        frames.push(TraceFrame {
            at: Duration::from_millis(parsed.at_ms),
            frame,
        });
    }
    Ok(frames)
}

pub fn load_trace(path: &Path, landmark_index: usize) -> Result<Vec<TraceFrame>, TraceError> {
    let file = File::open(path).map_err(|source| TraceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trace(BufReader::new(file), landmark_index)
}

#[derive(Debug, Default)]
struct TraceState {
    live: bool,
    frames: Option<Vec<TraceFrame>>,
}

/// Landmark source backed by a trace file. Starting it reads and validates
/// the whole file; a missing or malformed file is an acquisition failure.
#[derive(Debug)]
pub struct TraceSource {
    path: PathBuf,
    state: Mutex<TraceState>,
}

impl TraceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(TraceState::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hands the loaded frames to the host. Returns `None` before a
    /// successful start or once taken.
    pub fn take_frames(&self) -> Option<Vec<TraceFrame>> {
        mutex_lock_or_recover(&self.state).frames.take()
    }
}

impl LandmarkSource for TraceSource {
    fn start(&self, settings: &CameraSettings) -> Result<(), SourceError> {
        let mut state = mutex_lock_or_recover(&self.state);
        if state.live {
            return Ok(());
        }
        let frames = load_trace(&self.path, settings.landmark_index)
            .map_err(|err| SourceError::Unavailable(err.to_string()))?;
        info!(
            path = %self.path.display(),
            frames = frames.len(),
            width = settings.width,
            height = settings.height,
            "Trace acquired"
        );
        state.live = true;
        state.frames = Some(frames);
        Ok(())
    }

    fn stop(&self) -> Result<(), SourceError> {
        let mut state = mutex_lock_or_recover(&self.state);
        if state.live {
            debug!(path = %self.path.display(), "Trace released");
        }
        state.live = false;
        state.frames = None;
        Ok(())
    }

    fn live_tracks(&self) -> usize {
        usize::from(mutex_lock_or_recover(&self.state).live)
    }
}
