use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::domain::{
    chart::{Bounds, ChartConfig, ChartRenderer, ChartType},
    errors::RenderError,
    logging::{LogComponent, get_logger},
    stream::{Dataset, Point},
};
use crate::log_trace;

/// Smallest axis extent drawn; a zero-radius viewport is widened to this
pub const MIN_VISIBLE_EXTENT: f64 = 1.0;

const PADDING: f64 = 30.0;
const GRID_DIVISIONS: u32 = 5;
const POINT_RADIUS: f64 = 2.0;

/// Data → pixel mapping for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapping {
    pub bounds: Bounds,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl ScreenMapping {
    pub fn new(bounds: Bounds, width: u32, height: u32, padding: f64) -> Self {
        Self {
            bounds: bounds.clamped(MIN_VISIBLE_EXTENT),
            width: width as f64,
            height: height as f64,
            padding,
        }
    }

    fn plot_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (self.height - 2.0 * self.padding).max(1.0)
    }

    pub fn x_to_px(&self, x: f64) -> f64 {
        let normalized = (x - self.bounds.x_min) / self.bounds.width();
        self.padding + normalized * self.plot_width()
    }

    /// Screen Y grows downwards
    pub fn y_to_px(&self, y: f64) -> f64 {
        let normalized = (y - self.bounds.y_min) / self.bounds.height();
        self.padding + (1.0 - normalized) * self.plot_height()
    }

    pub fn to_px(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (self.x_to_px(x), self.y_to_px(y))
    }
}

/// Canvas 2D line chart. Owns the dataset and the current axis domains.
///
/// Without a canvas (`headless`) it still accumulates points and tracks
/// bounds, which is what the pipeline relies on; drawing is skipped.
pub struct CanvasLineRenderer {
    context: Option<CanvasRenderingContext2d>,
    config: ChartConfig,
    bounds: Bounds,
    dataset: Dataset,
    redraws: u64,
}

impl CanvasLineRenderer {
    pub fn headless(config: ChartConfig) -> Self {
        Self {
            context: None,
            bounds: config.initial_bounds,
            config,
            dataset: Dataset::new(),
            redraws: 0,
        }
    }

    /// Look the canvas up by element id
    pub fn attach(canvas_id: &str, config: ChartConfig) -> Result<Self, RenderError> {
        let window = web_sys::window().ok_or_else(|| RenderError("no window".to_string()))?;
        let document =
            window.document().ok_or_else(|| RenderError("no document".to_string()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| RenderError(format!("canvas '{canvas_id}' not found")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RenderError(format!("'{canvas_id}' is not a canvas")))?;
        Self::from_canvas(canvas, config)
    }

    pub fn from_canvas(canvas: HtmlCanvasElement, config: ChartConfig) -> Result<Self, RenderError> {
        canvas.set_width(config.width);
        canvas.set_height(config.height);

        let context = canvas
            .get_context("2d")
            .map_err(|_| RenderError("Failed to get 2D context".to_string()))?
            .ok_or_else(|| RenderError("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError("Failed to cast to 2D context".to_string()))?;

        let mut renderer = Self::headless(config);
        renderer.context = Some(context);
        renderer.redraw()?;
        Ok(renderer)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn is_headless(&self) -> bool {
        self.context.is_none()
    }

    pub fn mapping(&self) -> ScreenMapping {
        ScreenMapping::new(self.bounds, self.config.width, self.config.height, PADDING)
    }

    /// Full repaint: background, grid, then the dataset
    pub fn redraw(&mut self) -> Result<(), RenderError> {
        let Some(context) = self.context.as_ref() else {
            return Ok(());
        };
        let mapping = self.mapping();
        let (width, height) = (mapping.width, mapping.height);

        context.clear_rect(0.0, 0.0, width, height);
        context.set_fill_style(&JsValue::from("#1a1a1a"));
        context.fill_rect(0.0, 0.0, width, height);

        self.draw_grid(context, &mapping).map_err(js_render_error)?;
        match self.config.chart_type {
            ChartType::Line => self.draw_lines(context, &mapping),
            ChartType::Point => self.draw_points(context, &mapping).map_err(js_render_error)?,
        }

        self.redraws += 1;
        Ok(())
    }

    fn draw_grid(
        &self,
        context: &CanvasRenderingContext2d,
        mapping: &ScreenMapping,
    ) -> Result<(), JsValue> {
        let b = mapping.bounds;
        context.set_line_width(1.0);
        context.set_font("10px monospace");
        context.set_fill_style(&JsValue::from("#a0a0a0"));

        for i in 0..=GRID_DIVISIONS {
            let t = i as f64 / GRID_DIVISIONS as f64;

            let x = b.x_min + t * b.width();
            let px = mapping.x_to_px(x);
            if self.config.x_axis.grid {
                context.set_stroke_style(&JsValue::from("#333333"));
                context.begin_path();
                context.move_to(px, mapping.padding);
                context.line_to(px, mapping.height - mapping.padding);
                context.stroke();
            }
            context.fill_text(&format!("{x:.1}"), px - 10.0, mapping.height - 10.0)?;

            let y = b.y_min + t * b.height();
            let py = mapping.y_to_px(y);
            if self.config.y_axis.grid {
                context.set_stroke_style(&JsValue::from("#333333"));
                context.begin_path();
                context.move_to(mapping.padding, py);
                context.line_to(mapping.width - mapping.padding, py);
                context.stroke();
            }
            context.fill_text(&format!("{y:.1}"), 2.0, py + 3.0)?;
        }
        Ok(())
    }

    fn draw_lines(&self, context: &CanvasRenderingContext2d, mapping: &ScreenMapping) {
        context.set_stroke_style(&JsValue::from("#00ff88"));
        context.set_fill_style(&JsValue::from("#00ff88"));
        context.set_line_width(2.0);

        for run in self.dataset.polylines() {
            if let [single] = run.as_slice() {
                let (x, y) = mapping.to_px(*single);
                let _ = draw_dot(context, x, y);
                continue;
            }
            context.begin_path();
            for (i, xy) in run.iter().enumerate() {
                let (x, y) = mapping.to_px(*xy);
                if i == 0 {
                    context.move_to(x, y);
                } else {
                    context.line_to(x, y);
                }
            }
            context.stroke();
        }
    }

    fn draw_points(
        &self,
        context: &CanvasRenderingContext2d,
        mapping: &ScreenMapping,
    ) -> Result<(), JsValue> {
        context.set_fill_style(&JsValue::from("#00ff88"));
        for xy in self.dataset.points().iter().filter_map(Point::coords) {
            let (x, y) = mapping.to_px(xy);
            draw_dot(context, x, y)?;
        }
        Ok(())
    }
}

fn draw_dot(context: &CanvasRenderingContext2d, x: f64, y: f64) -> Result<(), JsValue> {
    context.begin_path();
    context.arc(x, y, POINT_RADIUS, 0.0, std::f64::consts::TAU)?;
    context.fill();
    Ok(())
}

fn js_render_error(err: JsValue) -> RenderError {
    RenderError(format!("{err:?}"))
}

impl ChartRenderer for CanvasLineRenderer {
    fn set_bounds(&mut self, bounds: Bounds) {
        log_trace!(
            LogComponent::Infrastructure("CanvasRenderer"),
            "bounds x=[{}, {}] y=[{}, {}]",
            bounds.x_min,
            bounds.x_max,
            bounds.y_min,
            bounds.y_max
        );
        self.bounds = bounds;
    }

    fn append(&mut self, points: &[Point]) {
        self.dataset.append(points);
        if let Err(e) = self.redraw() {
            get_logger().error(LogComponent::Infrastructure("CanvasRenderer"), &e.to_string());
        }
    }
}
