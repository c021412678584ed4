use point_stream_viz::application::{ViewportController, ViewportUpdate};
use point_stream_viz::domain::chart::{Bounds, ChartRenderer, Viewport};
use point_stream_viz::domain::stream::{Batch, Point};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SetBounds(Bounds),
    Append(Vec<Point>),
}

#[derive(Default)]
struct RecordingRenderer {
    calls: Vec<Call>,
    dataset: Vec<Point>,
    bounds: Option<Bounds>,
}

impl ChartRenderer for RecordingRenderer {
    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
        self.calls.push(Call::SetBounds(bounds));
    }

    fn append(&mut self, points: &[Point]) {
        self.dataset.extend_from_slice(points);
        self.calls.push(Call::Append(points.to_vec()));
    }
}

fn batch(points: &[(f64, Option<f64>)]) -> Batch {
    Batch::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
}

#[test]
fn example_batch_produces_square_viewport() {
    let mut controller = ViewportController::new(RecordingRenderer::default());
    let update = controller.update(&batch(&[(0.0, Some(0.0)), (10.0, Some(4.0))]));

    assert_eq!(update, ViewportUpdate::Recomputed(Viewport::new(5.0, 2.0, 5.0)));
    assert_eq!(controller.renderer().bounds, Some(Bounds::new(0.0, 10.0, -3.0, 7.0)));
}

#[test]
fn bounds_are_set_before_points_are_appended() {
    let mut controller = ViewportController::new(RecordingRenderer::default());
    let input = batch(&[(0.0, Some(0.0)), (10.0, Some(4.0))]);
    controller.update(&input);

    assert_eq!(
        controller.renderer().calls,
        vec![
            Call::SetBounds(Bounds::new(0.0, 10.0, -3.0, 7.0)),
            Call::Append(input.points().to_vec()),
        ]
    );
}

#[test]
fn y_max_uses_center_y() {
    // wide spread in x, offset in y: a center_x-based y_max would be 60
    let mut controller = ViewportController::new(RecordingRenderer::default());
    controller.update(&batch(&[(50.0, Some(-100.0)), (60.0, Some(-90.0))]));

    let bounds = controller.renderer().bounds.unwrap();
    assert_eq!(bounds.y_max, -90.0);
    assert_eq!(bounds.y_min, -100.0);
}

#[test]
fn null_points_are_skipped_for_geometry_but_rendered() {
    let mut controller = ViewportController::new(RecordingRenderer::default());
    let input = batch(&[(0.0, Some(0.0)), (500.0, None), (2.0, Some(2.0))]);
    controller.update(&input);

    assert_eq!(controller.viewport(), Some(Viewport::new(1.0, 1.0, 1.0)));
    assert_eq!(controller.renderer().dataset.len(), 3);
    assert_eq!(controller.renderer().dataset[1], Point::gap(500.0));
}

#[test]
fn repeating_a_batch_keeps_viewport_and_grows_dataset() {
    let mut controller = ViewportController::new(RecordingRenderer::default());
    let input = batch(&[(1.0, Some(3.0)), (7.0, Some(-2.0)), (4.0, None)]);

    controller.update(&input);
    let first = controller.renderer().bounds;
    controller.update(&input);

    assert_eq!(controller.renderer().bounds, first);
    assert_eq!(controller.renderer().dataset.len(), 2 * input.len());
}

#[test]
fn all_null_batch_retains_previous_bounds_exactly() {
    let mut controller = ViewportController::new(RecordingRenderer::default());
    controller.update(&batch(&[(0.1, Some(0.2)), (0.7, Some(1.3))]));
    let before = controller.renderer().bounds.unwrap();

    let update = controller.update(&batch(&[(9.0, None), (12.0, None)]));
    let after = controller.renderer().bounds.unwrap();

    assert_eq!(update, ViewportUpdate::Retained);
    assert_eq!(before.as_array().map(f64::to_bits), after.as_array().map(f64::to_bits));
    assert_eq!(controller.renderer().dataset.len(), 4);
    assert_eq!(controller.renderer().calls.last(), Some(&Call::Append(vec![
        Point::gap(9.0),
        Point::gap(12.0)
    ])));
}

#[test]
fn all_null_first_batch_sets_no_bounds() {
    let mut controller = ViewportController::new(RecordingRenderer::default());
    controller.update(&batch(&[(1.0, None)]));

    assert_eq!(controller.viewport(), None);
    assert_eq!(controller.renderer().bounds, None);
    assert_eq!(controller.renderer().dataset.len(), 1);
}

#[test]
fn single_location_gives_zero_radius() {
    let mut controller = ViewportController::new(RecordingRenderer::default());
    controller.update(&batch(&[(3.0, Some(4.0)), (3.0, Some(4.0))]));

    assert_eq!(controller.viewport(), Some(Viewport::new(3.0, 4.0, 0.0)));
    assert_eq!(controller.renderer().bounds, Some(Bounds::new(3.0, 3.0, 4.0, 4.0)));
}

#[test]
fn viewport_follows_the_latest_batch_only() {
    let mut controller = ViewportController::new(RecordingRenderer::default());
    controller.update(&batch(&[(0.0, Some(0.0)), (100.0, Some(100.0))]));
    controller.update(&batch(&[(10.0, Some(10.0)), (12.0, Some(11.0))]));

    assert_eq!(controller.viewport(), Some(Viewport::new(11.0, 10.5, 1.0)));
    assert_eq!(controller.batches_seen(), 2);
}

#[test]
fn reset_discards_viewport() {
    let mut controller = ViewportController::new(RecordingRenderer::default());
    controller.update(&batch(&[(0.0, Some(0.0))]));
    controller.reset();

    assert_eq!(controller.viewport(), None);
    // the renderer keeps what it was given
    assert_eq!(controller.into_renderer().dataset.len(), 1);
}

#[test]
fn extremes_near_f64_max_stay_finite() {
    let mut controller = ViewportController::new(RecordingRenderer::default());
    controller.update(&batch(&[(1.0e308, Some(0.0)), (1.5e308, Some(0.0))]));

    let bounds = controller.renderer().bounds.unwrap();
    assert!(bounds.as_array().iter().all(|v| v.is_finite()));
    let close = |a: f64, b: f64| ((a - b) / b).abs() < 1e-12;
    assert!(close(bounds.x_min, 1.0e308));
    assert!(close(bounds.x_max, 1.5e308));
    assert!(close(bounds.width(), bounds.height()));
}
