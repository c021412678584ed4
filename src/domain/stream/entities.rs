use super::value_objects::{Batch, Point};

/// Cumulative, insertion-ordered points held for display.
/// Append-only while a connection lives; `clear` is a full reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<Point>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, points: &[Point]) {
        self.points.extend_from_slice(points);
    }

    pub fn append_batch(&mut self, batch: &Batch) {
        self.append(batch.points());
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Split into drawable runs; a gap point ends the current run.
    pub fn polylines(&self) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point.coords() {
                Some(xy) => current.push(xy),
                None => {
                    if !current.is_empty() {
                        runs.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}
