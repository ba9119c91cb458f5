#![deny(clippy::all)]
//! Adapters: clocks, environment configuration, the JSON layout surface, the
//! landmark trace source and the replay runtimes that drive a session.

mod clock;
mod config;
pub mod layout;
pub mod replay;
pub mod trace;

pub use clock::ManualClock;
pub use clock::SystemClock;
pub use config::TrackerConfig;
pub use layout::LayoutError;
pub use layout::LayoutSurface;
pub use replay::ReplayError;
pub use replay::ReplayMode;
pub use replay::ReplayReport;
pub use replay::run_replay;
pub use trace::TraceError;
pub use trace::TraceFrame;
pub use trace::TraceSource;
