use leptos::html::Canvas;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::application::{BatchSink, ViewportController};
use crate::domain::{
    logging::{LogComponent, get_logger},
    stream::{Batch, ConnectionState},
};
use crate::infrastructure::{
    config::ClientConfig,
    demo_feed::{DEMO_PERIOD_MS, DemoFeed},
    websocket::{StreamClient, StreamHandle},
};
use crate::presentation::{CanvasPipeline, build_renderer};

/// Pipeline wrapper that mirrors the dataset size into a Leptos signal
struct SignalSink {
    inner: CanvasPipeline,
    point_count: WriteSignal<usize>,
}

impl BatchSink for SignalSink {
    fn dispatch(&mut self, batch: Batch) {
        self.inner.update(&batch);
        self.point_count.set(self.inner.renderer().dataset().len());
    }

    fn connection_closed(&mut self) {
        self.inner.connection_closed();
    }
}

/// Everything that keeps the app's stream running
struct StreamSession {
    handle: StreamHandle<SignalSink>,
    demo: Option<DemoFeed>,
}

impl StreamSession {
    fn close(&mut self) {
        self.demo = None;
        self.handle.close();
    }
}

/// 🦀 Canvas, connection status and point counter
#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::load();
    let (status, set_status) = create_signal(ConnectionState::Closed);
    let (point_count, set_point_count) = create_signal(0usize);
    let canvas_ref = create_node_ref::<Canvas>();
    let session: Rc<RefCell<Option<StreamSession>>> = Rc::new(RefCell::new(None));

    let canvas_id = config.canvas_id.clone();
    let width = config.width.to_string();
    let height = config.height.to_string();

    let running = Rc::clone(&session);
    create_effect(move |_| {
        if canvas_ref.get().is_none() || running.borrow().is_some() {
            return;
        }
        let started = start_stream(&config, set_status, set_point_count);
        *running.borrow_mut() = Some(started);
    });

    on_cleanup(move || {
        if let Some(mut session) = session.borrow_mut().take() {
            session.close();
        }
    });

    view! {
        <div class="point-stream">
            <canvas id=canvas_id node_ref=canvas_ref width=width height=height />
            <div class="status">
                {move || format!("WebSocket: {}", status.get())}
            </div>
            <div class="points">
                {move || format!("{} points", point_count.get())}
            </div>
        </div>
    }
}

fn start_stream(
    config: &ClientConfig,
    set_status: WriteSignal<ConnectionState>,
    set_point_count: WriteSignal<usize>,
) -> StreamSession {
    let sink = SignalSink {
        inner: ViewportController::new(build_renderer(config)),
        point_count: set_point_count,
    };
    let mut client = StreamClient::new(sink);
    client.set_observer(move |state| set_status.set(state));
    let handle = StreamHandle::new(client);

    if config.demo_feed {
        let demo = match DemoFeed::start(&handle, DEMO_PERIOD_MS) {
            Ok(feed) => Some(feed),
            Err(e) => {
                get_logger().error(LogComponent::Presentation("App"), &format!("❌ {e}"));
                None
            }
        };
        return StreamSession { handle, demo };
    }

    let result = config.endpoint_url().and_then(|url| handle.connect(&url));
    if let Err(e) = result {
        get_logger().error(LogComponent::Presentation("App"), &format!("❌ {e}"));
    }
    StreamSession { handle, demo: None }
}

/// Mount [`App`] into `<body>`
pub fn mount() {
    mount_to_body(|| view! { <App/> });
}
