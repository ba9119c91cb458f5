//! Port interfaces owned by use cases.
//!
//! Every capability the pipeline touches (time, the camera, the UI tree, the
//! scroll container, the cursor indicator) is injected through one of these
//! traits so the pipeline runs without hardware or a renderer.

pub mod clock;
pub mod errors;
pub mod indicator;
pub mod landmark_source;
pub mod scroll_region;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod ui_surface;

pub use clock::Clock;
pub use clock::ClockHandle;
pub use errors::ActivationError;
pub use errors::ActivationStep;
pub use errors::SessionError;
pub use errors::SourceError;
pub use errors::SurfaceError;
pub use indicator::Indicator;
pub use landmark_source::LandmarkSource;
pub use landmark_source::LandmarkSourceHandle;
pub use scroll_region::ScrollRegion;
pub use scroll_region::ScrollRegionHandle;
pub use scroll_region::ScrollRegionLookup;
pub use scroll_region::ScrollRegionLookupHandle;
pub use ui_surface::UiSurface;
pub use ui_surface::UiSurfaceHandle;
