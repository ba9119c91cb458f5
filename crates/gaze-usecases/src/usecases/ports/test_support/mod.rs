//! Test-only mocks for use case ports.
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod mock_clock;
mod mock_scroll;
mod mock_source;
mod mock_surface;

pub use mock_clock::MockClock;
pub use mock_scroll::MockScrollRegion;
pub use mock_scroll::MockScrollRegions;
pub use mock_source::MockLandmarkSource;
pub use mock_source::MockLandmarkSourceBuilder;
pub use mock_surface::IndicatorRecord;
pub use mock_surface::MockElement;
pub use mock_surface::MockUiSurface;
pub use mock_surface::MockUiSurfaceBuilder;
pub use mock_surface::SurfaceCall;
