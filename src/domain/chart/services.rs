use super::value_objects::{Bounds, Viewport};
use crate::domain::stream::{Batch, Point};

/// Renderer capability consumed by the viewport pipeline.
pub trait ChartRenderer {
    /// Update both axis domains
    fn set_bounds(&mut self, bounds: Bounds);

    /// Insert points into the backing dataset and redraw
    fn append(&mut self, points: &[Point]);
}

impl<R: ChartRenderer + ?Sized> ChartRenderer for Box<R> {
    fn set_bounds(&mut self, bounds: Bounds) {
        (**self).set_bounds(bounds);
    }

    fn append(&mut self, points: &[Point]) {
        (**self).append(points);
    }
}

/// Axis-aligned extremes of the valid points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Fold over `(x, y)` pairs. `None` when the iterator is empty.
    pub fn fold<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        coords.into_iter().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => BoundingBox { min_x: x, max_x: x, min_y: y, max_y: y },
                Some(b) => BoundingBox {
                    min_x: b.min_x.min(x),
                    max_x: b.max_x.max(x),
                    min_y: b.min_y.min(y),
                    max_y: b.max_y.max(y),
                },
            })
        })
    }

    pub fn of_batch(batch: &Batch) -> Option<Self> {
        Self::fold(batch.valid_points())
    }

    /// Smallest square viewport centered on this box.
    ///
    /// Midpoints are taken as `min + half_span` so same-sign extremes near
    /// `f64::MAX` stay finite. A span wider than `f64::MAX` still overflows.
    pub fn enclosing_square(&self) -> Viewport {
        let half_w = (self.max_x - self.min_x) / 2.0;
        let half_h = (self.max_y - self.min_y) / 2.0;
        let center_x = self.min_x + half_w;
        let center_y = self.min_y + half_h;
        let radius = half_w.max(half_h);
        Viewport { center_x, center_y, radius }
    }
}
