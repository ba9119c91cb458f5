pub mod dwell;
pub mod edge_scroller;
pub mod hit_classifier;
pub mod ports;
pub mod session;
pub mod timer;


pub use dwell::ActivationOutcome;
pub use dwell::DwellActivator;
pub use dwell::DwellState;
pub use edge_scroller::EdgeScroller;
pub use hit_classifier::Classification;
pub use hit_classifier::HitClassifier;
pub use session::TrackerPorts;
pub use session::TrackingSession;
pub use timer::TimerSlot;
