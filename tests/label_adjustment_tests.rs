use approx::assert_relative_eq;
use grid_graph::api::{GridGraph, GridGraphConfig, MAX_PADDING_ITERATIONS, TextMeasurer};
use grid_graph::core::{Padding, ValueSeries, Viewport};
use grid_graph::ChartError;

/// Every label measures the same, whatever its text.
struct FixedWidth(f64);

impl TextMeasurer for FixedWidth {
    fn measure(&self, text: &str, font_size_px: f64) -> (f64, f64) {
        if text.is_empty() {
            (0.0, 0.0)
        } else {
            (self.0, font_size_px)
        }
    }
}

fn series() -> ValueSeries {
    ValueSeries::from_values(&[3.0, 14.0, 27.0, 41.0, 8.0, 19.0])
}

#[test]
fn hidden_axes_settle_immediately() {
    let values = series();
    let config = GridGraphConfig::new(Viewport::new(400, 300)).with_axes_visible(false);
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    let report = graph.adjust_padding().expect("padding");

    assert_eq!(report.iterations, 1);
    assert!(report.converged);
    assert_eq!(graph.padding(), Padding::uniform(25.0));
}

#[test]
fn visible_axes_inside_the_grid_settle_in_one_pass() {
    let values = series();
    let mut config = GridGraphConfig::new(Viewport::new(400, 300)).with_axis_text_visible(false, false);
    config.show_divisions = false;
    let mut graph = GridGraph::new(config, &values)
        .expect("valid config")
        .with_text_measurer(FixedWidth(0.0));
    let report = graph.adjust_padding().expect("padding");

    assert_eq!(report.iterations, 1);
    assert!(report.converged);
    assert_eq!(graph.padding(), Padding::uniform(25.0));
}

#[test]
fn overflowing_labels_need_a_second_pass() {
    let values = series();
    let config = GridGraphConfig::new(Viewport::new(600, 400)).with_axis_text_visible(false, true);
    let mut graph = GridGraph::new(config, &values)
        .expect("valid config")
        .with_text_measurer(FixedWidth(20.0));
    let report = graph.adjust_padding().expect("padding");

    assert!(report.iterations >= 2);
    assert!(report.converged);
}

#[test]
fn visible_labels_grow_left_and_bottom_padding() {
    let values = series();
    let config = GridGraphConfig::new(Viewport::new(600, 400));
    let mut graph = GridGraph::new(config, &values)
        .expect("valid config")
        .with_text_measurer(FixedWidth(20.0));
    let report = graph.adjust_padding().expect("padding");

    assert!(report.converged);
    assert!(report.iterations <= MAX_PADDING_ITERATIONS);
    let padding = graph.padding();
    assert!(padding.left >= 25.0 + 20.0);
    assert!(padding.bottom > 25.0);
    assert_relative_eq!(graph.grid_width(), 600.0 - padding.left - padding.right);
    assert_relative_eq!(graph.grid_height(), 400.0 - padding.top - padding.bottom);
}

#[test]
fn fixed_grid_edge_is_kept() {
    let values = series();
    let config = GridGraphConfig::new(Viewport::new(600, 400)).with_grid_edges(
        Some(80.0),
        None,
        None,
        Some(-40.0),
    );
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    graph.prepare().expect("prepared");

    assert_eq!(graph.padding().left, 80.0);
    assert_eq!(graph.padding().bottom, 40.0);
}

#[test]
fn huge_labels_leave_no_room_for_the_grid() {
    let values = series();
    let config = GridGraphConfig::new(Viewport::new(300, 200));
    let mut graph = GridGraph::new(config, &values)
        .expect("valid config")
        .with_text_measurer(FixedWidth(1_000.0));
    assert!(matches!(
        graph.prepare(),
        Err(ChartError::NotEnoughSpace { axis_count: 1 })
    ));
}

#[test]
fn hidden_vertical_text_keeps_left_padding_small() {
    let values = series();
    let config = GridGraphConfig::new(Viewport::new(600, 400)).with_axis_text_visible(true, false);
    let mut graph = GridGraph::new(config, &values)
        .expect("valid config")
        .with_text_measurer(FixedWidth(20.0));
    graph.prepare().expect("prepared");

    // only the tick marks and half of the first x label stick out
    assert!(graph.padding().left < 25.0 + 20.0);
}
