use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable, Either, poll_fn, select};
use futures::{SinkExt, StreamExt};
use gloo_net::websocket::{Message, WebSocketError, futures::WebSocket};
use wasm_bindgen_futures::spawn_local;

use crate::application::BatchSink;
use crate::domain::{
    errors::{ConnectionError, ConnectionResult},
    logging::LogComponent,
    stream::ConnectionState,
};
use crate::log_debug;

use super::stream_client::StreamClient;

/// Binds a [`StreamClient`] to a browser WebSocket.
///
/// Frames are pumped by a `spawn_local` task on the page's event loop. The
/// client is borrowed once per frame and never across an `.await`.
pub struct StreamHandle<S: BatchSink + 'static> {
    client: Rc<RefCell<StreamClient<S>>>,
    pump: Rc<RefCell<Option<AbortHandle>>>,
}

impl<S: BatchSink + 'static> Clone for StreamHandle<S> {
    fn clone(&self) -> Self {
        Self { client: Rc::clone(&self.client), pump: Rc::clone(&self.pump) }
    }
}

impl<S: BatchSink + 'static> StreamHandle<S> {
    pub fn new(client: StreamClient<S>) -> Self {
        Self { client: Rc::new(RefCell::new(client)), pump: Rc::new(RefCell::new(None)) }
    }

    pub fn client(&self) -> &Rc<RefCell<StreamClient<S>>> {
        &self.client
    }

    pub fn state(&self) -> ConnectionState {
        self.client.borrow().state()
    }

    /// Open `endpoint` and start pumping frames.
    ///
    /// On failure the client is back in `Closed` and stays there until
    /// `connect` is called again.
    pub fn connect(&self, endpoint: &str) -> ConnectionResult<()> {
        self.client.borrow_mut().begin_connect(endpoint)?;

        let ws = match WebSocket::open(endpoint) {
            Ok(ws) => ws,
            Err(e) => {
                let err = ConnectionError::OpenFailed(e.to_string());
                self.client.borrow_mut().on_error(err.clone());
                return Err(err);
            }
        };

        let (handle, registration) = AbortHandle::new_pair();
        if let Some(stale) = self.pump.borrow_mut().replace(handle) {
            stale.abort();
        }

        let client = Rc::clone(&self.client);
        spawn_local(async move {
            if Abortable::new(pump(client, ws), registration).await.is_err() {
                log_debug!(LogComponent::Infrastructure("StreamHandle"), "pump aborted");
            }
        });
        Ok(())
    }

    /// Stop dispatch and drop the socket
    pub fn close(&self) {
        if let Some(handle) = self.pump.borrow_mut().take() {
            handle.abort();
        }
        self.client.borrow_mut().on_close();
    }
}

async fn pump<S: BatchSink>(client: Rc<RefCell<StreamClient<S>>>, ws: WebSocket) {
    let (mut sink, mut stream) = ws.split();

    // The sink turns ready once the socket leaves CONNECTING, which also
    // covers a socket that went straight to CLOSED. The stream is polled
    // first so a queued error or close wins over a ready sink.
    let early = {
        let ready = poll_fn(|cx| sink.poll_ready_unpin(cx));
        match select(stream.next(), Box::pin(ready)).await {
            Either::Left((item, _)) => Some(item),
            Either::Right((Ok(()), _)) => None,
            Either::Right((Err(e), _)) => {
                client.borrow_mut().on_error(ConnectionError::OpenFailed(e.to_string()));
                return;
            }
        }
    };

    match early {
        None => client.borrow_mut().on_open(),
        Some(None) => {
            client.borrow_mut().on_error(ConnectionError::OpenFailed(
                "socket closed during handshake".to_string(),
            ));
            return;
        }
        Some(Some(Err(e))) => {
            client.borrow_mut().on_error(ConnectionError::OpenFailed(e.to_string()));
            return;
        }
        Some(Some(Ok(message))) => {
            client.borrow_mut().on_open();
            if !handle_frame(&client, Ok(message)) {
                return;
            }
        }
    }

    while let Some(item) = stream.next().await {
        if !handle_frame(&client, item) {
            return;
        }
    }
    client.borrow_mut().on_close();
}

/// One pipeline pass. Returns false once the client stops being open.
fn handle_frame<S: BatchSink>(
    client: &RefCell<StreamClient<S>>,
    item: Result<Message, WebSocketError>,
) -> bool {
    let mut client = client.borrow_mut();
    match item {
        // decode errors are logged by the client and do not end the stream
        Ok(Message::Text(raw)) => {
            let _ = client.on_message(&raw);
        }
        Ok(Message::Bytes(bytes)) => {
            let _ = client.on_binary(&bytes);
        }
        Err(WebSocketError::ConnectionClose(event)) if event.was_clean => {
            client.on_close();
        }
        Err(WebSocketError::ConnectionClose(event)) => {
            client.on_error(ConnectionError::Dropped(format!(
                "code {}: {}",
                event.code, event.reason
            )));
        }
        Err(e) => {
            client.on_error(ConnectionError::Dropped(e.to_string()));
        }
    }
    client.state().is_open()
}
