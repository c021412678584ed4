use derive_more::Display;

use crate::application::BatchSink;
use crate::domain::{
    errors::{ConnectionError, ConnectionResult, DecodeResult},
    logging::{LogComponent, LogLevel, get_logger},
    stream::{Batch, ConnectionState, LifecycleEvent},
};
use crate::{log_debug, log_error, log_info, log_warn};

use super::dto::{decode_binary_frame, decode_frame};

/// What happened to an inbound frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Decoded and handed to the sink
    Delivered { points: usize },
    /// The client is not open; the frame was dropped undecoded
    Dropped,
}

/// Running counters for one client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[display(
    fmt = "frames={} batches={} points={} decode_errors={} connection_errors={}",
    frames_received,
    batches_dispatched,
    points_dispatched,
    decode_errors,
    connection_errors
)]
pub struct StreamStats {
    pub frames_received: u64,
    pub batches_dispatched: u64,
    pub points_dispatched: u64,
    pub decode_errors: u64,
    pub connection_errors: u64,
}

type StateObserver = Box<dyn FnMut(ConnectionState)>;

/// Connection lifecycle plus frame decoding.
///
/// Transport-agnostic: the socket pump calls the `on_*` handlers, one per
/// lifecycle event, and every decoded batch goes synchronously to the sink.
pub struct StreamClient<S: BatchSink> {
    sink: S,
    state: ConnectionState,
    endpoint: Option<String>,
    stats: StreamStats,
    observer: Option<StateObserver>,
}

impl<S: BatchSink> StreamClient<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: ConnectionState::Closed,
            endpoint: None,
            stats: StreamStats::default(),
            observer: None,
        }
    }

    /// Observer called on every state change
    pub fn set_observer(&mut self, observer: impl FnMut(ConnectionState) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// `Closed -> Connecting`. Refused while a connection is active.
    pub fn begin_connect(&mut self, endpoint: &str) -> ConnectionResult<()> {
        if self.state.is_active() {
            log_warn!(
                LogComponent::Infrastructure("StreamClient"),
                "connect({}) ignored: connection is {}",
                endpoint,
                self.state
            );
            return Err(ConnectionError::AlreadyActive);
        }

        log_info!(LogComponent::Infrastructure("StreamClient"), "🔌 Connecting to {}", endpoint);
        self.endpoint = Some(endpoint.to_string());
        self.transition(LifecycleEvent::ConnectRequested);
        Ok(())
    }

    pub fn on_open(&mut self) {
        if self.state != ConnectionState::Connecting {
            log_warn!(
                LogComponent::Infrastructure("StreamClient"),
                "open event while {}, ignoring",
                self.state
            );
            return;
        }
        self.transition(LifecycleEvent::Opened);
        log_info!(
            LogComponent::Infrastructure("StreamClient"),
            "✅ Connected to {}",
            self.endpoint.as_deref().unwrap_or("?")
        );
    }

    /// Decode one text frame and forward it.
    ///
    /// A decode error discards only this frame; the connection stays open.
    pub fn on_message(&mut self, raw: &str) -> DecodeResult<Dispatch> {
        if !self.state.is_open() {
            log_debug!(
                LogComponent::Infrastructure("StreamClient"),
                "dropping frame while {}",
                self.state
            );
            return Ok(Dispatch::Dropped);
        }
        self.stats.frames_received += 1;
        let decoded = decode_frame(raw);
        self.deliver(decoded)
    }

    pub fn on_binary(&mut self, bytes: &[u8]) -> DecodeResult<Dispatch> {
        if !self.state.is_open() {
            return Ok(Dispatch::Dropped);
        }
        self.stats.frames_received += 1;
        let decoded = decode_binary_frame(bytes);
        self.deliver(decoded)
    }

    pub fn on_close(&mut self) {
        if self.state.is_active() {
            log_info!(LogComponent::Infrastructure("StreamClient"), "🔌 Connection closed");
        }
        self.transition(LifecycleEvent::Closed);
    }

    pub fn on_error(&mut self, err: ConnectionError) {
        self.stats.connection_errors += 1;
        log_error!(LogComponent::Infrastructure("StreamClient"), "❌ {}", err);
        self.transition(LifecycleEvent::Failed);
    }

    fn deliver(&mut self, decoded: DecodeResult<Batch>) -> DecodeResult<Dispatch> {
        match decoded {
            Ok(batch) => {
                let points = batch.len();
                self.stats.batches_dispatched += 1;
                self.stats.points_dispatched += points as u64;
                self.sink.dispatch(batch);
                Ok(Dispatch::Delivered { points })
            }
            Err(err) => {
                self.stats.decode_errors += 1;
                log_warn!(
                    LogComponent::Infrastructure("StreamClient"),
                    "⚠️ Discarding frame: {}",
                    err
                );
                Err(err)
            }
        }
    }

    fn transition(&mut self, event: LifecycleEvent) {
        let previous = self.state;
        let next = previous.on(event);
        if next == previous {
            return;
        }
        self.state = next;
        if next == ConnectionState::Closed {
            self.sink.connection_closed();
            get_logger().log_with_metadata(
                LogLevel::Info,
                LogComponent::Infrastructure("StreamClient"),
                &format!("📊 Stream to {} ended", self.endpoint.as_deref().unwrap_or("?")),
                &self.stats.to_string(),
            );
        }
        if let Some(observer) = self.observer.as_mut() {
            observer(next);
        }
    }
}

