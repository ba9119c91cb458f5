//! Deterministic replay on a manual clock.

use std::time::Duration;

use crate::infra::clock::ManualClock;
use crate::infra::replay::report::Recorder;
use crate::infra::trace::TraceFrame;
use crate::usecases::TrackingSession;

/// Ticks every `tick` from zero; a tick due at the same instant as a frame
/// runs first. Returns after the last frame.
pub(super) fn replay(
    session: &mut TrackingSession,
    clock: &ManualClock,
    frames: Vec<TraceFrame>,
    tick: Duration,
    recorder: &mut Recorder<'_>,
) {
    let mut next_tick = Duration::ZERO;
    for TraceFrame { at, frame } in frames {
        while next_tick <= at {
            clock.set_elapsed(next_tick);
            recorder.events(next_tick, session.tick());
            next_tick += tick;
        }
        clock.set_elapsed(at);
        recorder.frame(at, session.handle_frame(frame));
    }
}
