//! Wall-clock replay: a feeder thread paces frames while the host loop
//! selects between frames and a ticker.

use std::thread;
use std::time::Duration;
use std::time::Instant;

use crossbeam_channel as channel;
use tracing::debug;

use crate::domain::LandmarkFrame;
use crate::infra::replay::ReplayError;
use crate::infra::replay::report::Recorder;
use crate::infra::trace::TraceFrame;
use crate::usecases::TrackingSession;

const FEEDER_CHANNEL_CAPACITY: usize = 64;

pub(super) fn replay(
    session: &mut TrackingSession,
    frames: Vec<TraceFrame>,
    tick: Duration,
    recorder: &mut Recorder<'_>,
) -> Result<(), ReplayError> {
    let start = Instant::now();
    let frame_rx = spawn_feeder(frames, start)?;
    let ticker = channel::tick(tick);

    loop {
        channel::select! {
            recv(frame_rx) -> msg => {
                match msg {
                    Ok(frame) => recorder.frame(start.elapsed(), session.handle_frame(frame)),
                    Err(_) => break,
                }
            }
            recv(ticker) -> _ => {
                recorder.events(start.elapsed(), session.tick());
            }
        }
    }
    Ok(())
}

fn spawn_feeder(
    frames: Vec<TraceFrame>,
    start: Instant,
) -> Result<channel::Receiver<LandmarkFrame>, ReplayError> {
    let (tx, rx) = channel::bounded(FEEDER_CHANNEL_CAPACITY);
    let span = tracing::debug_span!("trace_feeder");
    let builder = thread::Builder::new().name("trace-feeder".to_string());
    builder
        .spawn(move || {
            let _guard = span.enter();
            for TraceFrame { at, frame } in frames {
                let due = start + at;
                let now = Instant::now();
                if due > now {
                    thread::sleep(due - now);
                }
                if tx.send(frame).is_err() {
                    break;
                }
            }
            debug!("Trace feeder finished");
        })
        .map_err(ReplayError::Spawn)?;
    Ok(rx)
}
