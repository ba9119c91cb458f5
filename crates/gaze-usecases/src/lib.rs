#![deny(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Use-case orchestration crate: the head-tracking pipeline and its ports.

pub mod usecases;
pub use usecases::*;

pub mod common {
    pub use gaze_common::common::*;
}

pub mod domain {
    pub use gaze_domain::domain::*;
}

#[cfg(test)]
pub(crate) mod test_support {
    pub use crate::usecases::ports::test_support::MockClock;
    pub use crate::usecases::ports::test_support::MockElement;
    pub use crate::usecases::ports::test_support::MockLandmarkSource;
    pub use crate::usecases::ports::test_support::MockScrollRegions;
    pub use crate::usecases::ports::test_support::MockUiSurface;
    pub use crate::usecases::ports::test_support::SurfaceCall;
}
