use approx::assert_relative_eq;
use grid_graph::core::{AxisBuilder, is_nice, linear_division};

#[test]
fn integer_range_gets_decade_divisions() {
    let result = linear_division(500.0, 0.0, 97.0, 1.0, 30.0, false);

    assert!(!result.uneven);
    assert_eq!(result.division.magnitude, 10.0);
    assert_eq!(result.division.count, 10.0);
    assert_relative_eq!(result.grid_spacing, 50.0);
    assert_relative_eq!(result.unit_size, 5.0);
    assert_relative_eq!(result.zero, 0.0);
}

#[test]
fn integer_range_grid_runs_to_the_next_decade() {
    let mut axis = AxisBuilder::new(500.0, 97.0, 0.0, 1.0)
        .expect("valid range")
        .with_min_space(30.0)
        .build()
        .expect("axis builds");
    axis.prepare_grid().expect("grid fits");

    let points = axis.grid_points(0.0).expect("grid points");
    let values: Vec<f64> = points.iter().map(|point| point.value).collect();
    let expected: Vec<f64> = (0..=10).map(|step| f64::from(step) * 10.0).collect();
    assert_eq!(values, expected);
    assert_relative_eq!(points[10].position, 500.0);
}

#[test]
fn zero_crossing_range_puts_zero_on_a_grid_line() {
    let result = linear_division(500.0, -3.0, 7.0, 1.0, 30.0, false);

    assert_eq!(result.division.magnitude, 1.0);
    assert_eq!(result.division.count, 10.0);
    assert_eq!(result.division.neg_count, 3.0);
    assert_relative_eq!(result.zero, 150.0);
    let lines_below_zero = result.zero / result.grid_spacing;
    assert_relative_eq!(lines_below_zero, lines_below_zero.round());
}

#[test]
fn crowded_zero_crossing_range_keeps_zero_aligned() {
    let result = linear_division(120.0, -3.0, 7.0, 0.0, 30.0, false);

    assert!(result.grid_spacing >= 30.0);
    let lines_below_zero = result.zero / result.grid_spacing;
    assert_relative_eq!(lines_below_zero, lines_below_zero.round(), epsilon = 1e-9);
}

#[test]
fn division_geometry_spans_the_axis_length() {
    for (length, min, max) in [(500.0, 0.0, 97.0), (333.0, -12.0, 45.0), (80.0, 2.0, 3.0)] {
        let result = linear_division(length, min, max, 0.0, 15.0, false);
        let spanned = result.unit_size * result.division.magnitude * result.division.count;
        assert_relative_eq!(spanned, length, max_relative = 1e-9);
    }
}

#[test]
fn nice_multipliers() {
    assert!(is_nice(5.0, 0.0));
    assert!(is_nice(0.5, 0.0));
    assert!(is_nice(1.5, 0.0));
    assert!(!is_nice(0.7, 0.0));
    assert!(!is_nice(0.5, 1.0));
}

#[test]
fn spacing_wider_than_the_axis_falls_back_to_uneven_halving() {
    let result = linear_division(100.0, 0.0, 10.0, 0.0, 200.0, false);

    assert!(result.uneven);
    assert!(result.grid_spacing >= 200.0 || result.division.count <= 1.0);
    assert_relative_eq!(result.division.magnitude, 16.0);
    assert_relative_eq!(result.division.count, 0.625);
    assert_relative_eq!(result.grid_spacing, 160.0);
    assert_relative_eq!(result.unit_size, 10.0);
}

#[test]
fn uneven_linear_axis_closes_with_a_boundary_point() {
    let mut axis = AxisBuilder::new(100.0, 10.0, 0.0, 0.0)
        .expect("valid range")
        .with_min_space(200.0)
        .build()
        .expect("axis builds");
    assert!(axis.uneven());
    axis.prepare_grid().expect("grid fits");

    let points = axis.grid_points(0.0).expect("grid points");
    assert_relative_eq!(points[0].position, 0.0);
    let boundary = points
        .iter()
        .find(|point| (point.position - 100.0).abs() < 1e-9)
        .expect("boundary point at the axis length");
    assert_relative_eq!(boundary.value, 10.0);
}
