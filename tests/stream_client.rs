use std::cell::RefCell;
use std::rc::Rc;

use point_stream_viz::application::ViewportController;
use point_stream_viz::domain::chart::{Bounds, ChartRenderer};
use point_stream_viz::domain::errors::{ConnectionError, DecodeError};
use point_stream_viz::domain::stream::{ConnectionState, Point};
use point_stream_viz::infrastructure::websocket::{Dispatch, StreamClient};

#[derive(Default)]
struct MemoryRenderer {
    bounds: Option<Bounds>,
    points: Vec<Point>,
}

impl ChartRenderer for MemoryRenderer {
    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    fn append(&mut self, points: &[Point]) {
        self.points.extend_from_slice(points);
    }
}

fn open_client() -> StreamClient<ViewportController<MemoryRenderer>> {
    let mut client = StreamClient::new(ViewportController::new(MemoryRenderer::default()));
    client.begin_connect("ws://localhost:3000/ws").unwrap();
    client.on_open();
    client
}

#[test]
fn decode_error_does_not_disturb_the_stream() {
    let mut client = open_client();

    let bad = client.on_message("{\"points\": [oops");
    assert!(matches!(bad, Err(DecodeError::Malformed(_))));
    assert_eq!(client.state(), ConnectionState::Open);

    let good = client.on_message(r#"{"points":[{"x":0,"y":0},{"x":10,"y":4}]}"#);
    assert_eq!(good, Ok(Dispatch::Delivered { points: 2 }));

    let renderer = client.sink().renderer();
    assert_eq!(renderer.bounds, Some(Bounds::new(0.0, 10.0, -3.0, 7.0)));
    assert_eq!(renderer.points.len(), 2);

    let stats = client.stats();
    assert_eq!(stats.frames_received, 2);
    assert_eq!(stats.decode_errors, 1);
    assert_eq!(stats.batches_dispatched, 1);
    assert_eq!(stats.points_dispatched, 2);
}

#[test]
fn missing_points_field_is_reported() {
    let mut client = open_client();
    assert_eq!(client.on_message(r#"{"pts":[]}"#), Err(DecodeError::MissingPoints));
    assert_eq!(client.on_message(r#"{"points":[]}"#), Err(DecodeError::EmptyBatch));
    assert!(client.sink().renderer().points.is_empty());
    assert!(client.state().is_open());
}

#[test]
fn frames_are_dropped_unless_open() {
    let mut client = StreamClient::new(ViewportController::new(MemoryRenderer::default()));
    let frame = r#"{"points":[{"x":1,"y":1}]}"#;

    assert_eq!(client.on_message(frame), Ok(Dispatch::Dropped));
    client.begin_connect("ws://localhost/ws").unwrap();
    assert_eq!(client.on_message(frame), Ok(Dispatch::Dropped));

    client.on_open();
    assert_eq!(client.on_message(frame), Ok(Dispatch::Delivered { points: 1 }));

    client.on_close();
    assert_eq!(client.on_message(frame), Ok(Dispatch::Dropped));
    assert_eq!(client.sink().renderer().points.len(), 1);
}

#[test]
fn error_closes_and_discards_viewport() {
    let mut client = open_client();
    client.on_message(r#"{"points":[{"x":1,"y":1},{"x":3,"y":2}]}"#).unwrap();
    assert!(client.sink().viewport().is_some());

    client.on_error(ConnectionError::Dropped("code 1006".to_string()));

    assert_eq!(client.state(), ConnectionState::Closed);
    assert_eq!(client.sink().viewport(), None);
    assert_eq!(client.stats().connection_errors, 1);
    // the renderer keeps its dataset
    assert_eq!(client.sink().renderer().points.len(), 2);
}

#[test]
fn connect_is_refused_while_active() {
    let mut client = open_client();
    assert_eq!(client.begin_connect("ws://elsewhere/ws"), Err(ConnectionError::AlreadyActive));
    assert_eq!(client.endpoint(), Some("ws://localhost:3000/ws"));
    assert_eq!(client.state(), ConnectionState::Open);
}

#[test]
fn reconnect_after_close_is_allowed() {
    let mut client = open_client();
    client.on_close();
    assert!(client.begin_connect("ws://localhost:3000/ws").is_ok());
    assert_eq!(client.state(), ConnectionState::Connecting);
}

#[test]
fn failed_open_returns_to_closed() {
    let mut client = StreamClient::new(ViewportController::new(MemoryRenderer::default()));
    client.begin_connect("ws://unreachable/ws").unwrap();
    client.on_error(ConnectionError::OpenFailed("refused".to_string()));

    assert_eq!(client.state(), ConnectionState::Closed);
    // a late open event is ignored
    client.on_open();
    assert_eq!(client.state(), ConnectionState::Closed);
}

#[test]
fn observer_sees_each_transition_once() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);

    let mut client = StreamClient::new(ViewportController::new(MemoryRenderer::default()));
    client.set_observer(move |state| log.borrow_mut().push(state));

    client.begin_connect("ws://localhost/ws").unwrap();
    client.on_open();
    client.on_open();
    client.on_close();
    client.on_close();

    assert_eq!(
        *seen.borrow(),
        vec![ConnectionState::Connecting, ConnectionState::Open, ConnectionState::Closed]
    );
}

#[test]
fn binary_frames_are_decoded_as_text() {
    let mut client = open_client();
    assert_eq!(
        client.on_binary(br#"{"points":[{"x":2,"y":null}]}"#),
        Ok(Dispatch::Delivered { points: 1 })
    );
    assert_eq!(client.on_binary(&[0xc3, 0x28]), Err(DecodeError::NotUtf8));
    assert_eq!(client.sink().renderer().points, vec![Point::gap(2.0)]);
    // only a gap so far: no bounds yet
    assert_eq!(client.sink().renderer().bounds, None);
}
