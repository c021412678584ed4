use derive_more::{Constructor, Display};
use serde::Serialize;
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, AsRefStr, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[display(fmt = "Line")]
    #[strum(serialize = "line")]
    Line,
    #[display(fmt = "Point")]
    #[strum(serialize = "point")]
    Point,
}

/// Value Object - Axis domains handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }

    /// Widen any zero-size axis to `min_extent` around its midpoint
    pub fn clamped(&self, min_extent: f64) -> Self {
        let widen = |lo: f64, hi: f64| {
            if hi - lo >= min_extent {
                (lo, hi)
            } else {
                let mid = (lo + hi) / 2.0;
                (mid - min_extent / 2.0, mid + min_extent / 2.0)
            }
        };
        let (x_min, x_max) = widen(self.x_min, self.x_max);
        let (y_min, y_max) = widen(self.y_min, self.y_max);
        Self { x_min, x_max, y_min, y_max }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.x_min, self.x_max, self.y_min, self.y_max]
    }
}

/// Value Object - Square viewport: a center and one radius shared by both axes
#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct Viewport {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Viewport {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x_min: self.center_x - self.radius,
            x_max: self.center_x + self.radius,
            y_min: self.center_y - self.radius,
            y_max: self.center_y + self.radius,
        }
    }
}

/// Value Object - One quantitative axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisConfig {
    pub field: &'static str,
    pub grid: bool,
}

/// How the user may move the chart independently of programmatic updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    #[display(fmt = "pan/zoom bound to scales")]
    PanZoomScales,
    #[display(fmt = "static")]
    Static,
}

/// Static chart configuration, passed once at startup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub width: u32,
    pub height: u32,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub interaction: Interaction,
    pub initial_bounds: Bounds,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Line,
            width: 360,
            height: 360,
            x_axis: AxisConfig { field: "x", grid: true },
            y_axis: AxisConfig { field: "y", grid: true },
            interaction: Interaction::PanZoomScales,
            initial_bounds: Bounds::new(0.0, 1000.0, 0.0, 1000.0),
        }
    }
}

impl ChartConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self { width, height, ..Default::default() }
    }
}
