//! Pure tracker types: geometry, landmark frames, smoothing and edge math.

mod edge_zone;
mod element;
mod events;
mod geometry;
mod indicator;
mod landmark;
mod settings;
mod smoother;

pub use edge_zone::EdgeZones;
pub use edge_zone::ScrollDirection;
pub use element::ElementId;
pub use events::TrackerEvent;
pub use geometry::Point;
pub use geometry::Rect;
pub use geometry::Viewport;
pub use indicator::Glow;
pub use indicator::INDICATOR_DIAMETER_PX;
pub use indicator::IndicatorState;
pub use indicator::IndicatorStyle;
pub use landmark::CameraSettings;
pub use landmark::LandmarkFrame;
pub use landmark::NOSE_TIP_LANDMARK;
pub use landmark::NormalizedPoint;
pub use settings::SettingsError;
pub use settings::TrackerSettings;
pub use settings::TrackerSettingsBuilder;
pub use smoother::CursorSmoother;
