use grid_graph::api::{CrosshairConfig, Guideline, GridGraph, GridGraphConfig};
use grid_graph::core::{AxisOrientation, ValueSeries, Viewport};
use grid_graph::render::{
    Color, FrameLayer, NullRenderer, PathCommand, Primitive, Renderer, SvgFragmentRenderer,
};

fn config() -> GridGraphConfig {
    GridGraphConfig::new(Viewport::new(400, 300)).with_axes_visible(false)
}

fn series() -> ValueSeries {
    ValueSeries::from_values(&[1.0, 4.0, 9.0, 16.0, 20.0])
}

fn paths(primitives: &[Primitive]) -> Vec<&grid_graph::render::PathPrimitive> {
    primitives
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Path(path) => Some(path),
            _ => None,
        })
        .collect()
}

fn group(primitive: &Primitive) -> &grid_graph::render::GroupPrimitive {
    match primitive {
        Primitive::Group(group) => group,
        other => panic!("expected a group, got {other:?}"),
    }
}

#[test]
fn matching_styles_share_one_grid_path() {
    let values = series();
    let mut graph = GridGraph::new(config(), &values).expect("valid config");
    let grid = graph.grid().expect("grid");

    assert_eq!(grid.class.as_deref(), Some("grid"));
    let lines = paths(&grid.children);
    assert_eq!(lines.len(), 1);
    // 11 rows then 5 columns, two commands each
    let commands = lines[0].data.commands();
    assert_eq!(commands.len(), 32);
    assert_eq!(commands[0], PathCommand::MoveTo(25.0, 275.0));
    assert_eq!(commands[1], PathCommand::HorizontalTo(375.0));
    assert_eq!(commands[22], PathCommand::MoveTo(25.0, 25.0));
    assert_eq!(commands[23], PathCommand::VerticalTo(275.0));
}

#[test]
fn distinct_styles_split_columns_and_rows() {
    let values = series();
    let config = config().with_grid_colours(
        Some(Color::rgb(1.0, 0.0, 0.0)),
        Some(Color::rgb(0.0, 0.0, 1.0)),
    );
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    let grid = graph.grid().expect("grid");

    let lines = paths(&grid.children);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].data.commands().len(), 10);
    assert_eq!(lines[1].data.commands().len(), 22);
    let column_stroke = lines[0].stroke.as_ref().expect("stroked");
    assert_eq!(column_stroke.color, Color::rgb(1.0, 0.0, 0.0));
}

#[test]
fn hidden_grid_draws_no_lines() {
    let values = series();
    let mut config = config();
    config.show_grid = false;
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    assert!(graph.grid().expect("grid").is_empty());
}

#[test]
fn stripes_alternate_between_grid_lines() {
    let values = series();
    let config = config().with_grid_stripes(vec![None, Some(Color::rgb(0.9, 0.9, 0.9))], 0.5);
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    graph.prepare().expect("prepared");

    let stripes = graph.grid_stripes().expect("stripes").expect("some stripes");
    assert_eq!(stripes.children.len(), 5);
    match &stripes.children[0] {
        Primitive::Rect(rect) => {
            assert_eq!(rect.x, 25.0);
            assert_eq!(rect.y, 225.0);
            assert_eq!(rect.width, 350.0);
            assert_eq!(rect.height, 25.0);
            assert_eq!(rect.fill.expect("filled").alpha, 0.5);
        }
        other => panic!("expected a rect, got {other:?}"),
    }
}

#[test]
fn background_and_stripes_share_the_background_layer() {
    let values = series();
    let config = config()
        .with_grid_back(Some(Color::rgb(1.0, 1.0, 0.9)), 0.8)
        .with_grid_stripes(vec![Some(Color::rgb(0.9, 0.9, 0.9))], 1.0);
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    let frame = graph.render_frame().expect("frame");

    let background = frame.layer(FrameLayer::Background);
    assert_eq!(background.len(), 1);
    let back = group(&background[0]);
    assert_eq!(back.class.as_deref(), Some("grid-back"));
    assert_eq!(back.children.len(), 2);
}

#[test]
fn static_crosshairs_cross_at_the_data_point() {
    let values = series();
    let config = config().with_crosshairs(Some(CrosshairConfig::at(Some(2.0), Some(10.0))));
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    graph.prepare().expect("prepared");

    let crosshairs = graph.crosshairs().expect("crosshairs").expect("drawn");
    let lines = paths(&crosshairs.children);
    assert_eq!(
        lines[0].data.commands(),
        &[
            PathCommand::MoveTo(200.0, 25.0),
            PathCommand::VerticalTo(275.0),
            PathCommand::MoveTo(25.0, 150.0),
            PathCommand::HorizontalTo(375.0),
        ]
    );
}

#[test]
fn crosshair_text_uses_axis_labels() {
    let values = series();
    let config = config()
        .with_crosshairs(Some(CrosshairConfig::at(None, Some(10.0)).with_text(true)))
        .with_units_y(None, Some("%".to_owned()));
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    graph.prepare().expect("prepared");

    let crosshairs = graph.crosshairs().expect("crosshairs").expect("drawn");
    let text = crosshairs
        .children
        .iter()
        .find_map(|primitive| match primitive {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
        .expect("crosshair text");
    assert_eq!(text.text, "10%");
}

#[test]
fn guidelines_are_clipped_to_the_grid() {
    let values = series();
    let config = config()
        .with_guideline(Guideline::value_line(10.0).with_title("target"))
        .with_guideline(Guideline::key_line(3.0).with_above(true));
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    let frame = graph.render_frame().expect("frame");

    assert_eq!(frame.defs.len(), 1);
    assert_eq!(frame.defs[0].id, "grid-clip");
    assert_eq!(frame.defs[0].x, 25.0);
    assert_eq!(frame.defs[0].width, 350.0);

    let grid_layer = frame.layer(FrameLayer::Grid);
    assert_eq!(grid_layer.len(), 2);
    let below = group(&grid_layer[1]);
    assert_eq!(below.class.as_deref(), Some("guidelines-below"));
    assert_eq!(below.clip_path.as_deref(), Some("grid-clip"));
    assert_eq!(below.children.len(), 2);

    let overlay = frame.layer(FrameLayer::Overlay);
    assert_eq!(overlay.len(), 1);
    let above = group(&overlay[0]);
    let line = paths(&above.children)[0];
    assert_eq!(
        line.data.commands(),
        &[PathCommand::MoveTo(287.5, 25.0), PathCommand::VerticalTo(275.0)]
    );
}

#[test]
fn clip_path_id_is_stable() {
    let values = series();
    let mut graph = GridGraph::new(config(), &values).expect("valid config");
    let first = graph.grid_clip_path().expect("clip");
    let second = graph.grid_clip_path().expect("clip");
    assert_eq!(first, second);
    assert_eq!(graph.grid_clip_def().expect("defined").height, 250.0);
}

#[test]
fn visible_axes_are_drawn_as_groups() {
    let values = series();
    let config = GridGraphConfig::new(Viewport::new(500, 350))
        .with_axis_titles(Some("Week".to_owned()), Some("Sales".to_owned().into()));
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    let axes = graph.axes().expect("axes");

    let classes: Vec<&str> = axes.iter().filter_map(|axis| axis.class.as_deref()).collect();
    assert_eq!(classes, vec!["axis axis-x0", "axis axis-y0"]);
    let titles: Vec<&str> = axes
        .iter()
        .flat_map(|axis| axis.children.iter())
        .filter_map(|primitive| match primitive {
            Primitive::Text(text) if text.rotation != 0.0 || text.text == "Week" => {
                Some(text.text.as_str())
            }
            _ => None,
        })
        .collect();
    assert_eq!(titles, vec!["Week", "Sales"]);

    let (x, y) = graph
        .axis_location(AxisOrientation::Horizontal, 0)
        .expect("located");
    assert_eq!(x, graph.padding().left);
    assert_eq!(y, graph.padding().top + graph.grid_height());
}

#[test]
fn svg_fragment_contains_clip_and_grid() {
    let values = series();
    let mut graph = GridGraph::new(config(), &values).expect("valid config");
    let mut renderer = SvgFragmentRenderer::new();
    graph.render(&mut renderer).expect("rendered");

    let svg = renderer.output();
    assert!(svg.contains(r#"<clipPath id="grid-clip">"#));
    assert!(svg.contains(r#"class="grid""#));
    assert!(svg.contains("M25 275H375"));
}

#[test]
fn null_renderer_counts_leaf_primitives() {
    let values = series();
    let config = GridGraphConfig::new(Viewport::new(500, 350));
    let mut graph = GridGraph::new(config, &values).expect("valid config");
    let frame = graph.render_frame().expect("frame");

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("valid frame");
    assert!(renderer.last_primitive_count > 2);
    assert_eq!(renderer.last_def_count, 1);
}
