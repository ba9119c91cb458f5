//! Observable outcomes of the tracking pipeline.

use crate::domain::ElementId;

/// Emitted by the session for each frame and animation tick.
///
/// Hosts consume these for reporting; the pipeline never reads them back.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    /// A frame arrived without the tracked landmark; the cursor held still.
    LandmarkLost,
    HoverStarted {
        target: ElementId,
    },
    HoverCancelled {
        target: ElementId,
    },
    Activated {
        target: ElementId,
    },
    ActivationFailed {
        target: ElementId,
        reason: String,
    },
    ScrollArmed {
        velocity: f64,
    },
    Scrolled {
        delta: f64,
    },
    ScrollExpired,
}

impl TrackerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TrackerEvent::LandmarkLost => "landmark_lost",
            TrackerEvent::HoverStarted { .. } => "hover_started",
            TrackerEvent::HoverCancelled { .. } => "hover_cancelled",
            TrackerEvent::Activated { .. } => "activated",
            TrackerEvent::ActivationFailed { .. } => "activation_failed",
            TrackerEvent::ScrollArmed { .. } => "scroll_armed",
            TrackerEvent::Scrolled { .. } => "scrolled",
            TrackerEvent::ScrollExpired => "scroll_expired",
        }
    }
}
