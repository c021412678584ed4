use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::application::{BatchSink, ViewportController};
use crate::domain::{
    errors::AppError,
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::{
    config::ClientConfig,
    demo_feed::{DEMO_PERIOD_MS, DemoFeed},
    rendering::CanvasLineRenderer,
    websocket::{StreamClient, StreamHandle, decode_frame},
};

/// The full pipeline behind one canvas
pub type CanvasPipeline = ViewportController<CanvasLineRenderer>;

/// Renderer for the configured canvas; headless if the canvas is missing
pub fn build_renderer(config: &ClientConfig) -> CanvasLineRenderer {
    match CanvasLineRenderer::attach(&config.canvas_id, config.chart_config()) {
        Ok(renderer) => renderer,
        Err(e) => {
            get_logger().warn(
                LogComponent::Presentation("WASM"),
                &format!("⚠️ {e}; rendering headless"),
            );
            CanvasLineRenderer::headless(config.chart_config())
        }
    }
}

/// JS-facing handle: one connection, one viewport, one canvas
#[wasm_bindgen]
pub struct PointStreamApi {
    handle: StreamHandle<CanvasPipeline>,
    demo: RefCell<Option<DemoFeed>>,
    config: ClientConfig,
}

#[wasm_bindgen]
impl PointStreamApi {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: Option<String>) -> PointStreamApi {
        let mut config = ClientConfig::load();
        if let Some(id) = canvas_id {
            config.canvas_id = id;
        }
        let controller = ViewportController::new(build_renderer(&config));
        Self {
            handle: StreamHandle::new(StreamClient::new(controller)),
            demo: RefCell::new(None),
            config,
        }
    }

    /// Connect to `endpoint`, or to the configured path on this host
    pub fn connect(&self, endpoint: Option<String>) -> Result<(), JsValue> {
        let url = match endpoint {
            Some(url) => url,
            None => self.config.endpoint_url().map_err(AppError::from)?,
        };
        self.handle.connect(&url).map_err(AppError::from)?;
        Ok(())
    }

    /// Feed the segment demo frame every `period_ms` (default 1000)
    #[wasm_bindgen(js_name = startDemo)]
    pub fn start_demo(&self, period_ms: Option<u32>) -> Result<(), JsValue> {
        let feed = DemoFeed::start(&self.handle, period_ms.unwrap_or(DEMO_PERIOD_MS))?;
        self.demo.replace(Some(feed));
        Ok(())
    }

    /// Stop the socket or demo feed
    pub fn close(&self) {
        self.demo.replace(None);
        self.handle.close();
    }

    /// `"closed"`, `"connecting"` or `"open"`
    pub fn state(&self) -> String {
        self.handle.state().to_string()
    }

    #[wasm_bindgen(js_name = pointCount)]
    pub fn point_count(&self) -> usize {
        self.handle.client().borrow().sink().renderer().dataset().len()
    }

    /// `[x_min, x_max, y_min, y_max]`, or `undefined` before the first valid batch
    pub fn viewport(&self) -> Option<Vec<f64>> {
        let client = self.handle.client().borrow();
        client.sink().viewport().map(|vp| vp.bounds().as_array().to_vec())
    }

    /// Run one frame through the pipeline without a socket
    #[wasm_bindgen(js_name = pushFrame)]
    pub fn push_frame(&self, raw: &str) -> Result<usize, JsValue> {
        let batch = decode_frame(raw).map_err(AppError::from)?;
        let points = batch.len();
        self.handle.client().borrow_mut().sink_mut().dispatch(batch);
        Ok(points)
    }

    /// Static chart configuration as JSON
    #[wasm_bindgen(js_name = chartConfig)]
    pub fn chart_config(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.config.chart_config())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
