use crate::domain::{
    chart::{BoundingBox, ChartRenderer, Viewport},
    logging::LogComponent,
    stream::Batch,
};
use crate::{log_debug, log_trace};

/// Outcome of feeding one batch through the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportUpdate {
    /// Bounds were recomputed and pushed to the renderer
    Recomputed(Viewport),
    /// The batch had no valid point; the previous viewport stays
    Retained,
}

/// Keeps the renderer framed on the latest batch.
///
/// Owns the derived [`Viewport`] and the renderer handle it drives. Each call
/// to [`update`](Self::update) runs to completion: bounds first, then the
/// append, so new points are never drawn against a stale frame.
pub struct ViewportController<R: ChartRenderer> {
    renderer: R,
    viewport: Option<Viewport>,
    batches_seen: u64,
}

impl<R: ChartRenderer> ViewportController<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer, viewport: None, batches_seen: 0 }
    }

    pub fn update(&mut self, batch: &Batch) -> ViewportUpdate {
        self.batches_seen += 1;

        let outcome = match BoundingBox::of_batch(batch) {
            Some(bbox) => {
                let viewport = bbox.enclosing_square();
                self.renderer.set_bounds(viewport.bounds());
                self.viewport = Some(viewport);
                log_trace!(
                    LogComponent::Application("ViewportController"),
                    "batch #{} -> center=({}, {}) radius={}",
                    self.batches_seen,
                    viewport.center_x,
                    viewport.center_y,
                    viewport.radius
                );
                ViewportUpdate::Recomputed(viewport)
            }
            None => {
                log_debug!(
                    LogComponent::Application("ViewportController"),
                    "batch #{} has no valid points, keeping viewport",
                    self.batches_seen
                );
                ViewportUpdate::Retained
            }
        };

        // null-y points go through as gaps
        self.renderer.append(batch.points());
        outcome
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn batches_seen(&self) -> u64 {
        self.batches_seen
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Drop the derived viewport, e.g. when the connection closes
    pub fn reset(&mut self) {
        self.viewport = None;
        self.batches_seen = 0;
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

/// Downstream consumer of decoded batches
pub trait BatchSink {
    fn dispatch(&mut self, batch: Batch);

    /// The connection went away; drop any per-connection state
    fn connection_closed(&mut self) {}
}

impl<R: ChartRenderer> BatchSink for ViewportController<R> {
    fn dispatch(&mut self, batch: Batch) {
        self.update(&batch);
    }

    fn connection_closed(&mut self) {
        self.reset();
    }
}
