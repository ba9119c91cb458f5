//! Cursor indicator that records its placement instead of painting.

use std::sync::Arc;
use std::sync::Mutex;

use tracing::debug;
use tracing::trace;

use crate::common::mutex_lock_or_recover;
use crate::domain::INDICATOR_DIAMETER_PX;
use crate::domain::IndicatorState;
use crate::domain::Point;
use crate::usecases::ports::Indicator;
use crate::usecases::ports::SurfaceError;

#[derive(Debug, Default)]
pub(super) struct IndicatorSlot {
    pub(super) attached: bool,
    pub(super) position: Option<Point>,
    pub(super) state: IndicatorState,
}

pub(super) struct LayoutIndicator {
    slot: Arc<Mutex<IndicatorSlot>>,
}

impl LayoutIndicator {
    pub(super) fn attach(slot: Arc<Mutex<IndicatorSlot>>) -> Result<Self, SurfaceError> {
        {
            let mut guard = mutex_lock_or_recover(&slot);
            if guard.attached {
                return Err(SurfaceError::Rejected {
                    operation: "inject_indicator",
                    reason: "indicator already attached".to_string(),
                });
            }
            *guard = IndicatorSlot {
                attached: true,
                ..IndicatorSlot::default()
            };
        }
        debug!(diameter = INDICATOR_DIAMETER_PX, "Indicator attached");
        Ok(Self { slot })
    }
}

impl Indicator for LayoutIndicator {
    fn set_position(&mut self, position: Point) {
        // Centred on the cursor.
        let half = INDICATOR_DIAMETER_PX / 2.0;
        trace!(left = position.x - half, top = position.y - half, "Indicator moved");
        mutex_lock_or_recover(&self.slot).position = Some(position);
    }

    fn set_state(&mut self, state: IndicatorState) {
        let style = state.style();
        debug!(
            state = state.name(),
            scale = style.scale,
            glow_px = style.glow.radius_px,
            "Indicator state"
        );
        mutex_lock_or_recover(&self.slot).state = state;
    }

    fn dispose(self: Box<Self>) -> Result<(), SurfaceError> {
        let mut guard = mutex_lock_or_recover(&self.slot);
        if !guard.attached {
            return Err(SurfaceError::Rejected {
                operation: "dispose_indicator",
                reason: "indicator already removed".to_string(),
            });
        }
        guard.attached = false;
        debug!("Indicator removed");
        Ok(())
    }
}
