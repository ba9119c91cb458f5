//! Owned handle to the on-screen cursor indicator.

use crate::domain::IndicatorState;
use crate::domain::Point;
use crate::usecases::ports::SurfaceError;

/// An always-on-top indicator injected into the interaction surface.
///
/// The session owns exactly one handle while active; `dispose` consumes it so
/// a removed indicator cannot be updated again.
pub trait Indicator: Send {
    fn set_position(&mut self, position: Point);
    fn set_state(&mut self, state: IndicatorState);
    fn dispose(self: Box<Self>) -> Result<(), SurfaceError>;
}
