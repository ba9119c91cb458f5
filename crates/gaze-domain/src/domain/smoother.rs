//! Exponential cursor smoothing.

use crate::domain::Point;
use crate::domain::Viewport;

/// Damped screen-space cursor.
///
/// Each update moves the position a fixed fraction `alpha` of the way toward
/// the raw input, so the cursor converges monotonically on a steady input and
/// never overshoots it.
#[derive(Debug, Clone)]
pub struct CursorSmoother {
    alpha: f64,
    position: Point,
}

impl CursorSmoother {
    /// Starts centred in `viewport`.
    pub fn new(alpha: f64, viewport: &Viewport) -> Self {
        Self {
            alpha: alpha.clamp(f64::MIN_POSITIVE, 1.0),
            position: viewport.center(),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn reset(&mut self, viewport: &Viewport) {
        self.position = viewport.center();
    }

    pub fn update(&mut self, raw: Point, viewport: &Viewport) -> Point {
        let next = Point::new(
            self.position.x + (raw.x - self.position.x) * self.alpha,
            self.position.y + (raw.y - self.position.y) * self.alpha,
        );
        self.position = viewport.clamp(next);
        self.position
    }

    /// Frames of a constant input needed to close the gap to `epsilon` of
    /// its initial size.
    pub fn frames_to_converge(&self, epsilon: f64) -> u32 {
        if self.alpha >= 1.0 {
            return 1;
        }
        let frames = (epsilon.ln() / (1.0 - self.alpha).ln()).ceil();
        if frames.is_finite() && frames > 0.0 {
            frames as u32
        } else {
            0
        }
    }
}
