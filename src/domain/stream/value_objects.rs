use derive_more::Constructor;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DecodeError;

/// One 2-D sample. A `None` y is a gap: skipped by the viewport math,
/// still handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    #[serde(default)]
    pub y: Option<f64>,
}

impl Point {
    pub fn valued(x: f64, y: f64) -> Self {
        Self { x, y: Some(y) }
    }

    pub fn gap(x: f64) -> Self {
        Self { x, y: None }
    }

    pub fn is_valid(&self) -> bool {
        self.y.is_some()
    }

    /// `(x, y)` for points that take part in bounding-box computation
    pub fn coords(&self) -> Option<(f64, f64)> {
        self.y.map(|y| (self.x, y))
    }
}

/// Ordered, non-empty group of points delivered by one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    points: Vec<Point>,
}

impl Batch {
    pub fn new(points: Vec<Point>) -> Result<Self, DecodeError> {
        if points.is_empty() {
            return Err(DecodeError::EmptyBatch);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn valid_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().filter_map(Point::coords)
    }

    pub fn valid_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_valid()).count()
    }

    /// Flatten segments into one polyline batch.
    ///
    /// Consecutive segments are separated by a gap point placed at the mean
    /// of the segments' starting x, so the line breaks between them.
    pub fn from_segments(segments: &[Segment]) -> Result<Self, DecodeError> {
        if segments.is_empty() {
            return Err(DecodeError::EmptyBatch);
        }
        let mean_x = segments.iter().map(|s| s.x0).sum::<f64>() / segments.len() as f64;

        let mut points = Vec::with_capacity(segments.len() * 3 - 1);
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                points.push(Point::gap(mean_x));
            }
            points.push(Point::valued(segment.x0, segment.y0));
            points.push(Point::valued(segment.x1, segment.y1));
        }
        Self::new(points)
    }
}

/// Line segment from `(x0, y0)` to `(x1, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct Segment {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}
