use approx::assert_abs_diff_eq;
use grid_graph::api::{AxisBound, Guideline, GridGraph, GridGraphConfig, PerAxis};
use grid_graph::core::axis_datetime::date_convert;
use grid_graph::core::{AxisOrientation, DataItem, ValueSeries, Viewport};
use grid_graph::ChartError;

fn config() -> GridGraphConfig {
    GridGraphConfig::new(Viewport::new(400, 300)).with_axes_visible(false)
}

fn seconds(date: &str) -> f64 {
    date_convert(date).expect("valid date") as f64
}

#[test]
fn value_axis_includes_zero() {
    let values = ValueSeries::from_values(&[5.0, 8.0, 12.0]);
    let mut graph = GridGraph::new(config(), &values).expect("valid config");
    let ends = graph.compute_axis_ends().expect("ends");

    let y = ends.y_range(0).expect("y axis 0");
    assert_eq!(y.min, Some(0.0));
    assert_eq!(y.max, Some(12.0));
    assert_eq!(ends.x[0].min, Some(0.0));
    assert_eq!(ends.x[0].max, Some(2.0));
}

#[test]
fn negative_values_extend_the_minimum() {
    let values = ValueSeries::from_values(&[-4.0, 6.0]);
    let mut graph = GridGraph::new(config(), &values).expect("valid config");
    let y = graph.compute_axis_ends().expect("ends").y_range(0).expect("y axis 0");
    assert_eq!(y.min, Some(-4.0));
    assert_eq!(y.max, Some(6.0));
}

#[test]
fn log_axis_does_not_include_zero() {
    let values = ValueSeries::from_values(&[5.0, 50.0]);
    let config = config().with_log_axis_y(Some(PerAxis::All(true)), None);
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    let y = graph.compute_axis_ends().expect("ends").y_range(0).expect("y axis 0");
    assert_eq!(y.min, Some(5.0));
    assert_eq!(y.max, Some(50.0));
}

#[test]
fn lone_right_axis_reads_the_first_axis_options() {
    let values = ValueSeries::from_values(&[5.0, 27.0]);
    let config = config()
        .with_axis_right(true)
        .with_axis_range_v(0, Some(-50.0), None);
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    let ends = graph.compute_axis_ends().expect("ends");

    assert_eq!(ends.y_range(0), None);
    let y = ends.y_range(1).expect("right-hand axis");
    assert_eq!(y.min, Some(-50.0));
    assert_eq!(y.max, Some(27.0));
}

#[test]
fn lone_right_axis_builds_from_the_first_log_option() {
    let values = ValueSeries::from_values(&[5.0, 50.0]);
    let config = config()
        .with_axis_right(true)
        .with_log_axis_y(Some(PerAxis::Each(vec![Some(true)])), None);
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    let y = graph.compute_axis_ends().expect("ends").y_range(1).expect("right-hand axis");
    assert_eq!(y.min, Some(5.0));

    graph.prepare().expect("prepared");
    let low = graph.grid_y(1.0, None).expect("main axis").expect("on axis");
    let mid = graph.grid_y(10.0, None).expect("main axis").expect("on axis");
    let high = graph.grid_y(100.0, None).expect("main axis").expect("on axis");
    assert_abs_diff_eq!(mid, (low + high) / 2.0, epsilon = 1e-6);
}

#[test]
fn guidelines_widen_the_range() {
    let values = ValueSeries::from_values(&[1.0, 2.0]);
    let config = config()
        .with_guideline(Guideline::value_line(30.0))
        .with_guideline(Guideline::key_line(6.0));
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    let ends = graph.compute_axis_ends().expect("ends");

    assert_eq!(ends.y_range(0).expect("y axis 0").max, Some(30.0));
    assert_eq!(ends.x[0].max, Some(6.0));
}

#[test]
fn inverted_fixed_range_is_rejected() {
    let values = ValueSeries::from_values(&[1.0, 2.0]);
    let config = config().with_axis_range_v(0, Some(10.0), Some(5.0));
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    assert!(matches!(
        graph.compute_axis_ends(),
        Err(ChartError::InvalidAxisOptions {
            axis: AxisOrientation::Vertical,
            ..
        })
    ));
}

#[test]
fn fixed_minimum_above_the_data_is_rejected() {
    let values = ValueSeries::from_values(&[1.0, 20.0]);
    let config = config().with_axis_range_v(0, Some(50.0), None);
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    assert!(matches!(
        graph.compute_axis_ends(),
        Err(ChartError::InvalidAxisRange { .. })
    ));
}

#[test]
fn datetime_fixed_end_is_inclusive() {
    let values = ValueSeries::new(vec![vec![
        DataItem::new(seconds("2024-01-01"), Some(1.0)),
        DataItem::new(seconds("2024-01-05"), Some(3.0)),
    ]])
    .expect("numeric keys");
    let config = config()
        .with_datetime_keys(true, None)
        .with_axis_range_h(None::<f64>, Some("2024-01-09"));
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    let x = graph.compute_axis_ends().expect("ends").x[0];

    assert_eq!(x.min, Some(seconds("2024-01-01")));
    assert_eq!(x.max, Some(seconds("2024-01-09") - 1.0));
}

#[test]
fn unparseable_datetime_end_is_an_error() {
    let values = ValueSeries::from_values(&[1.0, 2.0]);
    let config = config()
        .with_datetime_keys(true, None)
        .with_axis_range_h(Some("someday"), None::<f64>);
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    assert!(matches!(
        graph.compute_axis_ends(),
        Err(ChartError::DateConversion(text)) if text == "someday"
    ));
}

#[test]
fn datetime_axis_builds_from_the_ends() {
    let values = ValueSeries::new(vec![vec![
        DataItem::new(seconds("2024-01-01"), Some(1.0)),
        DataItem::new(seconds("2024-01-08"), Some(3.0)),
    ]])
    .expect("numeric keys");
    let config = config().with_datetime_keys(true, Some("%d %b".to_owned()));
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    graph.prepare().expect("prepared");

    let points = graph.x_grid_points(0).expect("x grid");
    assert_eq!(points[0].text, "01 Jan");
    assert_eq!(points.last().expect("points").value, seconds("2024-01-08"));
}

#[test]
fn category_text_bounds_are_not_numbers() {
    let bound = AxisBound::from("north");
    assert_eq!(bound.as_number(), None);
    assert_eq!(AxisBound::from(2.5).as_number(), Some(2.5));
}
