//! Tracking session lifecycle and per-frame pipeline.

use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::domain::CameraSettings;
use crate::domain::CursorSmoother;
use crate::domain::ElementId;
use crate::domain::IndicatorState;
use crate::domain::LandmarkFrame;
use crate::domain::Point;
use crate::domain::TrackerEvent;
use crate::domain::TrackerSettings;
use crate::usecases::dwell::ActivationOutcome;
use crate::usecases::dwell::DwellActivator;
use crate::usecases::dwell::DwellState;
use crate::usecases::edge_scroller::EdgeScroller;
use crate::usecases::hit_classifier::Classification;
use crate::usecases::hit_classifier::HitClassifier;
use crate::usecases::ports::ClockHandle;
use crate::usecases::ports::Indicator;
use crate::usecases::ports::LandmarkSourceHandle;
use crate::usecases::ports::ScrollRegionLookupHandle;
use crate::usecases::ports::SessionError;
use crate::usecases::ports::UiSurface;
use crate::usecases::ports::UiSurfaceHandle;
use crate::usecases::timer::TimerSlot;

/// Capabilities a session needs from its host.
#[derive(Clone)]
pub struct TrackerPorts {
    pub clock: ClockHandle,
    pub source: LandmarkSourceHandle,
    pub surface: UiSurfaceHandle,
    pub scroll_regions: ScrollRegionLookupHandle,
}

/// Everything that exists only while tracking is active. Dropping it drops
/// every pending timer with it.
struct ActiveSession {
    cursor: CursorSmoother,
    indicator: Option<Box<dyn Indicator>>,
    indicator_state: IndicatorState,
    classifier: HitClassifier,
    dwell: DwellActivator,
    scroller: EdgeScroller,
    highlight: TimerSlot<ElementId>,
}

impl ActiveSession {
    fn set_indicator_state(&mut self, state: IndicatorState) {
        if self.indicator_state == state {
            return;
        }
        self.indicator_state = state;
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.set_state(state);
        }
    }

    fn clear_highlight(&mut self, surface: &dyn UiSurface) {
        if let Some(element) = self.highlight.cancel() {
            unhighlight(surface, element);
        }
    }

    fn fire_due_timers(
        &mut self,
        now: Instant,
        surface: &dyn UiSurface,
        settings: &TrackerSettings,
    ) -> Vec<TrackerEvent> {
        let mut events = Vec::new();

        if let Some(element) = self.highlight.take_due(now) {
            unhighlight(surface, element);
        }

        match self.dwell.fire_due(now, surface) {
            Some(ActivationOutcome::Activated(target)) => {
                self.clear_highlight(surface);
                match surface.set_highlight(target, true) {
                    Ok(()) => {
                        self.highlight.arm(now + settings.highlight(), target);
                    }
                    Err(err) => warn!(target = %target, error = %err, "Failed to highlight target"),
                }
                self.set_indicator_state(IndicatorState::Activated);
                events.push(TrackerEvent::Activated { target });
            }
            Some(ActivationOutcome::Failed { target, error }) => {
                events.push(TrackerEvent::ActivationFailed {
                    target,
                    reason: error.to_string(),
                });
            }
            None => {}
        }

        events
    }
}

fn unhighlight(surface: &dyn UiSurface, element: ElementId) {
    if let Err(err) = surface.set_highlight(element, false) {
        warn!(target = %element, error = %err, "Failed to remove highlight");
    }
}

/// Owns the head-tracking session: camera, indicator, cursor and every timer.
///
/// The host calls [`handle_frame`](Self::handle_frame) for each landmark frame
/// in arrival order and [`tick`](Self::tick) once per animation frame. Both
/// are no-ops while the session is inactive.
pub struct TrackingSession {
    ports: TrackerPorts,
    settings: TrackerSettings,
    camera: CameraSettings,
    active: Option<ActiveSession>,
}

impl TrackingSession {
    pub fn new(ports: TrackerPorts, settings: TrackerSettings, camera: CameraSettings) -> Self {
        Self {
            ports,
            settings,
            camera,
            active: None,
        }
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn cursor(&self) -> Option<Point> {
        self.active.as_ref().map(|active| active.cursor.position())
    }

    pub fn dwell_state(&self) -> Option<DwellState> {
        self.active.as_ref().map(|active| active.dwell.state())
    }

    pub fn indicator_state(&self) -> Option<IndicatorState> {
        self.active.as_ref().map(|active| active.indicator_state)
    }

    pub fn is_scrolling(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.scroller.is_running())
    }

    /// Dwell, scroll and highlight timers currently armed.
    pub fn pending_timers(&self) -> usize {
        self.active.as_ref().map_or(0, |active| {
            [
                active.dwell.is_pending(),
                active.scroller.is_running(),
                active.highlight.is_armed(),
            ]
            .into_iter()
            .filter(|armed| *armed)
            .count()
        })
    }

    /// Acquires the camera and injects the cursor indicator.
    ///
    /// On failure nothing stays acquired and the session remains inactive.
    /// Starting an active session is a no-op.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.active.is_some() {
            debug!("Head tracker already active");
            return Ok(());
        }

        if let Err(err) = self.ports.source.start(&self.camera) {
            warn!(error = %err, "Camera failed");
            return Err(SessionError::CameraUnavailable(err));
        }

        let mut indicator = match self.ports.surface.inject_indicator() {
            Ok(indicator) => indicator,
            Err(err) => {
                warn!(error = %err, "Indicator injection failed; releasing camera");
                if let Err(release) = self.ports.source.stop() {
                    warn!(error = %release, "Camera release failed");
                }
                return Err(SessionError::IndicatorUnavailable(err));
            }
        };

        let viewport = self.ports.surface.viewport();
        let cursor = CursorSmoother::new(self.settings.smoothing(), &viewport);
        indicator.set_position(cursor.position());
        indicator.set_state(IndicatorState::Normal);

        self.active = Some(ActiveSession {
            cursor,
            indicator: Some(indicator),
            indicator_state: IndicatorState::Normal,
            classifier: HitClassifier::new(self.ports.surface.clone()),
            dwell: DwellActivator::new(self.settings.dwell()),
            scroller: EdgeScroller::new(
                self.settings.edge_zones(),
                self.settings.impulse_ttl(),
                self.settings.scroll_selector(),
                self.ports.scroll_regions.clone(),
            ),
            highlight: TimerSlot::new(),
        });
        info!(
            width = viewport.width(),
            height = viewport.height(),
            "Head tracker started"
        );
        Ok(())
    }

    /// Tears everything down. Timers are cancelled before the camera is
    /// released so nothing queued can fire against released resources. Each
    /// release is attempted even if an earlier one fails. Idempotent.
    pub fn stop(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        let surface = self.ports.surface.as_ref();

        if let Some(target) = active.dwell.cancel() {
            debug!(target = %target, "Pending dwell cancelled");
        }
        if active.scroller.cancel() {
            debug!("Scroll impulse cancelled");
        }
        active.clear_highlight(surface);

        if let Err(err) = self.ports.source.stop() {
            warn!(error = %err, "Camera release failed");
        }
        if let Some(indicator) = active.indicator.take() {
            if let Err(err) = indicator.dispose() {
                warn!(error = %err, "Indicator removal failed");
            }
        }
        info!("Stopping tracker");
    }

    /// The per-frame callback: smooth, classify, then feed dwell and scroll.
    pub fn handle_frame(&mut self, frame: LandmarkFrame) -> Vec<TrackerEvent> {
        let now = self.ports.clock.now();
        let surface = self.ports.surface.as_ref();
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };

        let mut events = active.fire_due_timers(now, surface, &self.settings);

        let Some(point) = frame.point() else {
            events.push(TrackerEvent::LandmarkLost);
            return events;
        };

        let viewport = surface.viewport();
        let raw = point.to_viewport_mirrored(&viewport);
        let cursor = active.cursor.update(raw, &viewport);
        if let Some(indicator) = active.indicator.as_mut() {
            indicator.set_position(cursor);
        }

        let classification = active.classifier.classify(cursor);
        // The activated style holds for as long as the confirmation highlight.
        let style = match classification {
            _ if active.highlight.is_armed() => IndicatorState::Activated,
            Classification::Actionable(_) => IndicatorState::Hover,
            _ => IndicatorState::Normal,
        };
        active.set_indicator_state(style);

        events.extend(active.dwell.observe(classification.actionable_target(), now));
        events.extend(active.scroller.on_cursor_moved(cursor.y, &viewport, now));
        events
    }

    /// The animation-frame callback: fire due timers and step the scroll.
    pub fn tick(&mut self) -> Vec<TrackerEvent> {
        let now = self.ports.clock.now();
        let surface = self.ports.surface.as_ref();
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };

        let mut events = active.fire_due_timers(now, surface, &self.settings);
        events.extend(active.scroller.tick(now));
        events
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.stop();
    }
}
