use point_stream_viz::application::{ViewportController, ViewportUpdate};
use point_stream_viz::domain::chart::{Bounds, ChartRenderer};
use point_stream_viz::domain::stream::{Batch, Point};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

const EPS: f64 = 1e-9;

#[derive(Default)]
struct BoundsOnly {
    bounds: Option<Bounds>,
    appended: usize,
}

impl ChartRenderer for BoundsOnly {
    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    fn append(&mut self, points: &[Point]) {
        self.appended += points.len();
    }
}

/// Integer samples scaled down keep the arithmetic finite; every third
/// sample with an odd y becomes a gap.
fn to_batch(samples: &[(i16, i16)]) -> Option<Batch> {
    let points = samples
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            let x = x as f64 / 8.0;
            if i % 3 == 2 && y % 2 != 0 { Point::gap(x) } else { Point::valued(x, y as f64 / 8.0) }
        })
        .collect();
    Batch::new(points).ok()
}

fn run(batch: &Batch) -> (ViewportUpdate, Option<Bounds>) {
    let mut controller = ViewportController::new(BoundsOnly::default());
    let update = controller.update(batch);
    (update, controller.renderer().bounds)
}

#[quickcheck]
fn viewport_is_square(samples: Vec<(i16, i16)>) -> TestResult {
    let Some(batch) = to_batch(&samples) else { return TestResult::discard() };
    match run(&batch) {
        (ViewportUpdate::Recomputed(_), Some(b)) => {
            TestResult::from_bool((b.width() - b.height()).abs() <= EPS)
        }
        _ => TestResult::from_bool(batch.valid_count() == 0),
    }
}

#[quickcheck]
fn viewport_contains_every_valid_point(samples: Vec<(i16, i16)>) -> TestResult {
    let Some(batch) = to_batch(&samples) else { return TestResult::discard() };
    let Some(b) = run(&batch).1 else { return TestResult::discard() };
    TestResult::from_bool(batch.valid_points().all(|(x, y)| {
        b.x_min - EPS <= x && x <= b.x_max + EPS && b.y_min - EPS <= y && y <= b.y_max + EPS
    }))
}

#[quickcheck]
fn viewport_is_centered_on_bounding_box(samples: Vec<(i16, i16)>) -> TestResult {
    let Some(batch) = to_batch(&samples) else { return TestResult::discard() };
    let Some(b) = run(&batch).1 else { return TestResult::discard() };

    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in batch.valid_points() {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    TestResult::from_bool(
        ((b.x_min + b.x_max) / 2.0 - (min_x + max_x) / 2.0).abs() <= EPS
            && ((b.y_min + b.y_max) / 2.0 - (min_y + max_y) / 2.0).abs() <= EPS,
    )
}

#[quickcheck]
fn repeated_batch_is_idempotent(samples: Vec<(i16, i16)>) -> TestResult {
    let Some(batch) = to_batch(&samples) else { return TestResult::discard() };
    let mut controller = ViewportController::new(BoundsOnly::default());

    controller.update(&batch);
    let first = controller.renderer().bounds;
    controller.update(&batch);

    TestResult::from_bool(
        controller.renderer().bounds == first && controller.renderer().appended == 2 * batch.len(),
    )
}
