use std::sync::Arc;

use approx::assert_relative_eq;
use grid_graph::ChartError;
use grid_graph::core::axis_datetime::date_convert;
use grid_graph::core::{AxisBuilder, AxisLabelFormat, AxisTextCallback, ValueSeries};

fn seconds(date: &str) -> f64 {
    date_convert(date).expect("valid date") as f64
}

#[test]
fn log_axis_places_powers_evenly() {
    let mut axis = AxisBuilder::log(300.0, 1000.0, 1.0, 10.0)
        .expect("valid log range")
        .with_min_space(20.0)
        .build()
        .expect("axis builds");
    axis.prepare_grid().expect("grid fits");

    assert!(axis.is_log());
    assert_relative_eq!(axis.position(100.0, None).expect("positive"), 200.0);
    assert_eq!(axis.position(0.0, None), None);
    assert_eq!(axis.position(-5.0, None), None);
    assert_relative_eq!(axis.value(150.0), 10_f64.powf(1.5), max_relative = 1e-12);
    assert_eq!(axis.origin(), 0.0);

    let points = axis.grid_points(0.0).expect("grid points");
    let labels: Vec<&str> = points.iter().map(|point| point.text.as_str()).collect();
    assert_eq!(labels, vec!["1", "10", "100", "1,000"]);
}

#[test]
fn log_axis_rounds_range_out_to_powers() {
    let axis = AxisBuilder::log(200.0, 800.0, 3.0, 10.0)
        .expect("valid log range")
        .build()
        .expect("axis builds");
    assert_relative_eq!(axis.min_value(), 1.0);
    assert_relative_eq!(axis.max_value(), 1000.0, max_relative = 1e-12);
}

#[test]
fn log_axis_with_fixed_power_step() {
    let mut axis = AxisBuilder::log(400.0, 10_000.0, 1.0, 10.0)
        .expect("valid log range")
        .with_log_divisions(Some(2.0))
        .build()
        .expect("axis builds");
    axis.prepare_grid().expect("grid fits");

    let values: Vec<f64> = axis
        .grid_points(0.0)
        .expect("grid points")
        .iter()
        .map(|point| point.value)
        .collect();
    assert_eq!(values, vec![1.0, 100.0, 10_000.0]);
}

#[test]
fn log_axis_rejects_non_positive_minimum() {
    assert!(matches!(
        AxisBuilder::log(300.0, 100.0, 0.0, 10.0),
        Err(ChartError::InvalidLogRange { .. })
    ));
}

#[test]
fn datetime_axis_uses_calendar_steps() {
    let min = seconds("2024-01-01");
    let max = seconds("2024-01-08");
    let mut axis = AxisBuilder::datetime(700.0, max, min)
        .expect("valid range")
        .with_min_space(40.0)
        .build()
        .expect("axis builds");
    axis.prepare_grid().expect("grid fits");

    let points = axis.grid_points(0.0).expect("grid points");
    assert_eq!(points.len(), 15);
    assert_eq!(points[0].value, min);
    assert_eq!(points[14].value, max);
    assert_eq!(points[1].text, "12:00");
    assert_relative_eq!(points[2].position, 100.0, epsilon = 1e-6);
}

#[test]
fn datetime_axis_with_fixed_seconds_step() {
    let min = seconds("2024-01-01");
    let max = seconds("2024-01-08");
    let mut axis = AxisBuilder::datetime(700.0, max, min)
        .expect("valid range")
        .with_datetime_grid(None, Some(86_400.0))
        .build()
        .expect("axis builds");
    axis.prepare_grid().expect("grid fits");

    let points = axis.grid_points(0.0).expect("grid points");
    assert_eq!(points.len(), 8);
    assert_eq!(points[1].text, "2024-01-02");
}

#[test]
fn datetime_axis_honours_text_format() {
    let min = seconds("2024-01-01");
    let max = seconds("2024-03-01");
    let mut axis = AxisBuilder::datetime(600.0, max, min)
        .expect("valid range")
        .with_min_space(40.0)
        .with_datetime_grid(Some("%d/%m".to_owned()), None)
        .build()
        .expect("axis builds");
    axis.prepare_grid().expect("grid fits");

    let points = axis.grid_points(0.0).expect("grid points");
    assert_eq!(points[0].text, "01/01");
    assert_eq!(points.last().expect("points").text, "01/03");
}

#[test]
fn fixed_axis_snaps_range_to_steps() {
    let mut axis = AxisBuilder::fixed(300.0, 17.0, -3.0, 0.0, 5.0)
        .expect("valid step")
        .build()
        .expect("axis builds");
    axis.prepare_grid().expect("grid fits");

    assert_eq!(axis.min_value(), -5.0);
    assert_eq!(axis.max_value(), 20.0);
    assert_relative_eq!(axis.zero(), 60.0);
    let values: Vec<f64> = axis
        .grid_points(0.0)
        .expect("grid points")
        .iter()
        .map(|point| point.value)
        .collect();
    assert_eq!(values, vec![-5.0, 0.0, 5.0, 10.0, 15.0, 20.0]);
}

#[test]
fn fixed_axis_rejects_non_positive_step() {
    assert!(matches!(
        AxisBuilder::fixed(300.0, 10.0, 0.0, 0.0, -1.0),
        Err(ChartError::InvalidGridDivision(_))
    ));
}

#[test]
fn callback_overrides_numeric_labels() {
    let callback: AxisTextCallback = Arc::new(|value, _| format!("<{value}>"));
    let axis = AxisBuilder::new(200.0, 100.0, 0.0, 0.0)
        .expect("valid range")
        .with_labels(
            AxisLabelFormat::default()
                .with_units("$", "")
                .with_callback(Some(callback)),
        )
        .build()
        .expect("axis builds");
    assert_eq!(axis.text_for(20.0), "<20>");
}

#[test]
fn category_keys_label_their_index() {
    let series = ValueSeries::from_labelled(&[("north", 3.0), ("south", 5.0), ("east", 1.0)]);
    let mut builder = AxisBuilder::new(300.0, 2.0, 0.0, 1.0)
        .expect("valid range")
        .with_values(&series);
    builder.bar();
    let axis = builder.build().expect("axis builds");

    assert_eq!(axis.text_for(2.0), "east");
    assert_relative_eq!(
        axis.position_by_key("south").expect("known key"),
        axis.position(1.0, None).expect("numeric")
    );
    assert_eq!(axis.position_by_key("west"), None);
}
