//! Local segment producer. Replays the reference server's three-segment
//! frame on a timer through an ordinary [`StreamClient`], so the whole
//! decode → viewport → render path runs without a server.

use std::rc::Rc;

use gloo_timers::callback::Interval;

use crate::application::BatchSink;
use crate::domain::{
    errors::{AppResult, DecodeResult},
    logging::LogComponent,
    stream::{Batch, Segment},
};
use crate::log_info;

use super::websocket::{PointFrame, StreamHandle};

/// Endpoint name reported by a client driven by the demo feed
pub const DEMO_ENDPOINT: &str = "demo://segments";

/// Producer tick
pub const DEMO_PERIOD_MS: u32 = 1_000;

pub fn demo_segments() -> [Segment; 3] {
    [
        Segment::new(200.0, 223.0, 210.0, 233.0),
        Segment::new(300.0, 323.0, 310.0, 333.0),
        Segment::new(100.0, 123.0, 110.0, 133.0),
    ]
}

/// Wire text of one producer frame
pub fn demo_frame() -> DecodeResult<String> {
    let batch = Batch::from_segments(&demo_segments())?;
    PointFrame::from(&batch).to_json()
}

/// A running feed. Dropping it stops the ticks; the client state is left
/// to whoever owns the handle.
pub struct DemoFeed {
    _ticker: Interval,
}

impl DemoFeed {
    /// Open `handle`'s client on [`DEMO_ENDPOINT`] and push one frame every
    /// `period_ms`. Frames arriving after the client closes are dropped by it.
    pub fn start<S: BatchSink + 'static>(handle: &StreamHandle<S>, period_ms: u32) -> AppResult<Self> {
        let frame = demo_frame()?;
        {
            let mut client = handle.client().borrow_mut();
            client.begin_connect(DEMO_ENDPOINT)?;
            client.on_open();
        }

        let client = Rc::clone(handle.client());
        let ticker = Interval::new(period_ms, move || {
            // the frame is fixed and known to decode
            let _ = client.borrow_mut().on_message(&frame);
        });

        log_info!(LogComponent::Infrastructure("DemoFeed"), "▶️ Demo feed every {} ms", period_ms);
        Ok(Self { _ticker: ticker })
    }
}
