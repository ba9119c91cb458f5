//! Interaction surface port: hit testing, element traits and activation.

use std::sync::Arc;

use crate::domain::ElementId;
use crate::domain::Point;
use crate::domain::Viewport;
use crate::usecases::ports::Indicator;
use crate::usecases::ports::SurfaceError;

pub trait UiSurface: Send + Sync {
    fn viewport(&self) -> Viewport;

    /// Topmost element under `point`.
    fn element_at(&self, point: Point) -> Option<ElementId>;

    fn parent_of(&self, element: ElementId) -> Option<ElementId>;

    /// Button- or link-class element.
    fn is_natively_interactive(&self, element: ElementId) -> bool;

    fn has_gaze_marker(&self, element: ElementId) -> bool;

    /// Controls that must never be gaze-activated, such as the tracking toggle.
    fn is_exempt_control(&self, element: ElementId) -> bool;

    fn focus(&self, element: ElementId) -> Result<(), SurfaceError>;

    fn dispatch_pointer_down(&self, element: ElementId) -> Result<(), SurfaceError>;

    fn click(&self, element: ElementId) -> Result<(), SurfaceError>;

    fn set_highlight(&self, element: ElementId, highlighted: bool) -> Result<(), SurfaceError>;

    fn inject_indicator(&self) -> Result<Box<dyn Indicator>, SurfaceError>;
}

pub type UiSurfaceHandle = Arc<dyn UiSurface>;
