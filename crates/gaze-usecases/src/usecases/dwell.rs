//! Dwell-to-activate state machine.

use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::domain::ElementId;
use crate::domain::TrackerEvent;
use crate::usecases::ports::ActivationError;
use crate::usecases::ports::ActivationStep;
use crate::usecases::ports::UiSurface;
use crate::usecases::timer::TimerSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellState {
    Idle,
    Hovering {
        target: ElementId,
        started_at: Instant,
    },
    /// The dwell on `target` already fired; it stays spent until the cursor
    /// leaves it.
    Spent { target: ElementId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    Activated(ElementId),
    Failed {
        target: ElementId,
        error: ActivationError,
    },
}

#[derive(Debug, Clone, Copy)]
struct Hover {
    target: ElementId,
    started_at: Instant,
}

/// Fires a synthetic activation after the same actionable target has been
/// observed without interruption for the dwell duration.
///
/// The pending activation is the only entry in a [`TimerSlot`]; any change of
/// target cancels it before a new one is armed, so dwell never carries over
/// between targets. Once fired, the target is remembered as spent and further
/// frames on it are ignored until a different target (or none) is observed.
#[derive(Debug)]
pub struct DwellActivator {
    dwell: Duration,
    timer: TimerSlot<Hover>,
    spent: Option<ElementId>,
}

impl DwellActivator {
    pub fn new(dwell: Duration) -> Self {
        Self {
            dwell,
            timer: TimerSlot::new(),
            spent: None,
        }
    }

    pub fn state(&self) -> DwellState {
        match self.timer.payload() {
            Some(hover) => DwellState::Hovering {
                target: hover.target,
                started_at: hover.started_at,
            },
            None => match self.spent {
                Some(target) => DwellState::Spent { target },
                None => DwellState::Idle,
            },
        }
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Feeds the actionable target under the cursor for the current frame.
    pub fn observe(&mut self, target: Option<ElementId>, now: Instant) -> Vec<TrackerEvent> {
        let current = self.timer.payload().map(|hover| hover.target);
        if target.is_some() && (target == current || target == self.spent) {
            return Vec::new();
        }
        self.spent = None;

        let mut events = Vec::new();
        if let Some(previous) = self.timer.cancel() {
            debug!(target = %previous.target, "Dwell interrupted");
            events.push(TrackerEvent::HoverCancelled {
                target: previous.target,
            });
        }
        if let Some(target) = target {
            debug!(target = %target, dwell_ms = self.dwell.as_millis() as u64, "Dwell started");
            self.timer.arm(
                now + self.dwell,
                Hover {
                    target,
                    started_at: now,
                },
            );
            events.push(TrackerEvent::HoverStarted { target });
        }
        events
    }

    /// Runs the activation sequence if the dwell deadline has passed.
    ///
    /// Success or failure, the episode is spent: the same target cannot fire
    /// again until the cursor has left it.
    pub fn fire_due(&mut self, now: Instant, surface: &dyn UiSurface) -> Option<ActivationOutcome> {
        let hover = self.timer.take_due(now)?;
        self.spent = Some(hover.target);
        match activate(surface, hover.target) {
            Ok(()) => {
                info!(target = %hover.target, "Dwell activation");
                Some(ActivationOutcome::Activated(hover.target))
            }
            Err(error) => {
                warn!(target = %hover.target, error = %error, "Gaze click failed");
                Some(ActivationOutcome::Failed {
                    target: hover.target,
                    error,
                })
            }
        }
    }

    pub fn cancel(&mut self) -> Option<ElementId> {
        self.spent = None;
        self.timer.cancel().map(|hover| hover.target)
    }
}

/// Focus, pointer-down, then click. Stops at the first failing step.
pub fn activate(surface: &dyn UiSurface, target: ElementId) -> Result<(), ActivationError> {
    surface
        .focus(target)
        .map_err(|source| ActivationError::new(ActivationStep::Focus, source))?;
    surface
        .dispatch_pointer_down(target)
        .map_err(|source| ActivationError::new(ActivationStep::PointerDown, source))?;
    surface
        .click(target)
        .map_err(|source| ActivationError::new(ActivationStep::Click, source))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::Rect;
    use crate::test_support::MockElement;
    use crate::test_support::MockUiSurface;
    use crate::test_support::SurfaceCall;
    use crate::usecases::ports::SurfaceError;

    const DWELL: Duration = Duration::from_millis(900);

    fn surface() -> MockUiSurface {
        MockUiSurface::builder()
            .element(MockElement::button(1, Rect::new(0.0, 0.0, 10.0, 10.0)))
            .element(MockElement::button(2, Rect::new(20.0, 0.0, 10.0, 10.0)))
            .build()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_idle_to_hovering_on_actionable_target() {
        let t0 = Instant::now();
        let mut dwell = DwellActivator::new(DWELL);
        let events = dwell.observe(Some(ElementId::new(1)), t0);
        assert_eq!(
            events,
            vec![TrackerEvent::HoverStarted {
                target: ElementId::new(1)
            }]
        );
        assert_eq!(
            dwell.state(),
            DwellState::Hovering {
                target: ElementId::new(1),
                started_at: t0
            }
        );
    }

    #[test]
    fn test_same_target_keeps_original_start() {
        let t0 = Instant::now();
        let mut dwell = DwellActivator::new(DWELL);
        dwell.observe(Some(ElementId::new(1)), t0);
        assert!(dwell.observe(Some(ElementId::new(1)), t0 + ms(500)).is_empty());
        assert_eq!(
            dwell.state(),
            DwellState::Hovering {
                target: ElementId::new(1),
                started_at: t0
            }
        );
    }

    #[test]
    fn test_fires_exactly_once_after_dwell() {
        let t0 = Instant::now();
        let surface = surface();
        let mut dwell = DwellActivator::new(DWELL);
        dwell.observe(Some(ElementId::new(1)), t0);

        assert_eq!(dwell.fire_due(t0 + ms(899), &surface), None);
        assert_eq!(
            dwell.fire_due(t0 + ms(900), &surface),
            Some(ActivationOutcome::Activated(ElementId::new(1)))
        );
        assert_eq!(dwell.fire_due(t0 + ms(2000), &surface), None);
        assert_eq!(
            dwell.state(),
            DwellState::Spent {
                target: ElementId::new(1)
            }
        );
        assert_eq!(
            surface.calls(),
            vec![
                SurfaceCall::Focus(ElementId::new(1)),
                SurfaceCall::PointerDown(ElementId::new(1)),
                SurfaceCall::Click(ElementId::new(1)),
            ]
        );
    }

    #[test]
    fn test_target_change_cancels_and_restarts() {
        let t0 = Instant::now();
        let surface = surface();
        let mut dwell = DwellActivator::new(DWELL);
        dwell.observe(Some(ElementId::new(1)), t0);
        let events = dwell.observe(Some(ElementId::new(2)), t0 + ms(600));
        assert_eq!(
            events,
            vec![
                TrackerEvent::HoverCancelled {
                    target: ElementId::new(1)
                },
                TrackerEvent::HoverStarted {
                    target: ElementId::new(2)
                },
            ]
        );
        assert_eq!(dwell.fire_due(t0 + ms(1000), &surface), None);
        assert_eq!(
            dwell.fire_due(t0 + ms(1500), &surface),
            Some(ActivationOutcome::Activated(ElementId::new(2)))
        );
        assert_eq!(surface.click_count(1), 0);
    }

    #[test]
    fn test_losing_target_returns_to_idle() {
        let t0 = Instant::now();
        let mut dwell = DwellActivator::new(DWELL);
        dwell.observe(Some(ElementId::new(1)), t0);
        dwell.observe(None, t0 + ms(100));
        assert_eq!(dwell.state(), DwellState::Idle);
        assert!(dwell.observe(None, t0 + ms(200)).is_empty());
    }

    #[test]
    fn test_spent_target_does_not_rearm() {
        let t0 = Instant::now();
        let surface = surface();
        let mut dwell = DwellActivator::new(DWELL);
        dwell.observe(Some(ElementId::new(1)), t0);
        assert!(dwell.fire_due(t0 + DWELL, &surface).is_some());

        for step in 1..=40 {
            assert!(dwell.observe(Some(ElementId::new(1)), t0 + DWELL + ms(step * 33)).is_empty());
        }
        assert!(!dwell.is_pending());
        assert_eq!(dwell.fire_due(t0 + ms(5000), &surface), None);
        assert_eq!(surface.click_count(1), 1);
    }

    #[test]
    fn test_leaving_spent_target_allows_new_episode() {
        let t0 = Instant::now();
        let surface = surface();
        let mut dwell = DwellActivator::new(DWELL);
        dwell.observe(Some(ElementId::new(1)), t0);
        dwell.fire_due(t0 + DWELL, &surface);

        assert!(dwell.observe(None, t0 + ms(1000)).is_empty());
        assert_eq!(dwell.state(), DwellState::Idle);
        assert_eq!(
            dwell.observe(Some(ElementId::new(1)), t0 + ms(1100)),
            vec![TrackerEvent::HoverStarted {
                target: ElementId::new(1)
            }]
        );
        assert_eq!(
            dwell.fire_due(t0 + ms(2000), &surface),
            Some(ActivationOutcome::Activated(ElementId::new(1)))
        );
        assert_eq!(surface.click_count(1), 2);
    }

    #[test]
    fn test_new_target_after_fire_starts_without_cooldown() {
        let t0 = Instant::now();
        let surface = surface();
        let mut dwell = DwellActivator::new(DWELL);
        dwell.observe(Some(ElementId::new(1)), t0);
        dwell.fire_due(t0 + DWELL, &surface);

        let events = dwell.observe(Some(ElementId::new(2)), t0 + DWELL);
        assert_eq!(
            events,
            vec![TrackerEvent::HoverStarted {
                target: ElementId::new(2)
            }]
        );
        assert_eq!(
            dwell.fire_due(t0 + DWELL + DWELL, &surface),
            Some(ActivationOutcome::Activated(ElementId::new(2)))
        );
    }

    #[test]
    fn test_failed_activation_spends_the_episode() {
        let t0 = Instant::now();
        let surface = surface();
        surface.detach(1);
        let mut dwell = DwellActivator::new(DWELL);
        dwell.observe(Some(ElementId::new(1)), t0);

        let outcome = dwell.fire_due(t0 + DWELL, &surface);
        assert_eq!(
            outcome,
            Some(ActivationOutcome::Failed {
                target: ElementId::new(1),
                error: ActivationError::new(
                    ActivationStep::Focus,
                    SurfaceError::Detached(ElementId::new(1))
                ),
            })
        );
        assert_eq!(
            dwell.state(),
            DwellState::Spent {
                target: ElementId::new(1)
            }
        );
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn test_cancel_reports_pending_target() {
        let mut dwell = DwellActivator::new(DWELL);
        dwell.observe(Some(ElementId::new(2)), Instant::now());
        assert_eq!(dwell.cancel(), Some(ElementId::new(2)));
        assert!(!dwell.is_pending());
    }
}
