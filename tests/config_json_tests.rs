use grid_graph::api::{AxisBound, GridGraphConfig, Guideline, PerAxis, TextCallback, per_axis};
use grid_graph::core::{Padding, Viewport};
use grid_graph::render::Color;
use grid_graph::ChartError;

#[test]
fn config_json_round_trip_keeps_layout_options() {
    let config = GridGraphConfig::new(Viewport::new(640, 480))
        .with_padding(Padding::new(10.0, 20.0, 30.0, 40.0))
        .with_axis_range_v(1, Some(-5.0), Some(5.0))
        .with_grid_division_v(Some(PerAxis::Each(vec![None, Some(2.5)])))
        .with_guideline(Guideline::key_line("2024-02-01").with_title("launch"))
        .with_grid_stripes(vec![None, Some(Color::rgb(0.9, 0.9, 0.9))], 0.6);

    let json = config.to_json_pretty().expect("serialize");
    let restored = GridGraphConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn missing_fields_take_defaults() {
    let config = GridGraphConfig::from_json_str(r#"{"viewport":{"width":300,"height":200}}"#)
        .expect("parse");
    assert_eq!(config, GridGraphConfig::new(Viewport::new(300, 200)));
    assert_eq!(config.minimum_grid_spacing, 15.0);
    assert!(config.show_axes);
    assert!(!config.show_subdivisions);
}

#[test]
fn per_axis_options_accept_scalars_and_lists() {
    let config = GridGraphConfig::from_json_str(
        r#"{
            "viewport": {"width": 300, "height": 200},
            "minimum_units_y": 1,
            "axis_max_v": [10, null, "20"],
            "log_axis_y": [false, true]
        }"#,
    )
    .expect("parse");

    assert_eq!(per_axis(&config.minimum_units_y, 4), Some(1.0));
    assert_eq!(per_axis(&config.axis_max_v, 0), Some(AxisBound::Number(10.0)));
    assert_eq!(per_axis(&config.axis_max_v, 1), None);
    assert_eq!(per_axis(&config.axis_max_v, 2), Some(AxisBound::Text("20".to_owned())));
    assert_eq!(per_axis(&config.log_axis_y, 1), Some(true));
}

#[test]
fn invalid_json_is_reported_as_invalid_data() {
    let result = GridGraphConfig::from_json_str("{not json");
    assert!(matches!(result, Err(ChartError::InvalidData(message)) if message.starts_with("failed to parse config")));
}

#[test]
fn callbacks_are_not_serialized() {
    let config = GridGraphConfig::new(Viewport::new(300, 200))
        .with_axis_text_callback(Some(TextCallback::new(|value, _| format!("#{value}"))));
    let json = config.to_json_pretty().expect("serialize");
    assert!(!json.contains("axis_text_callback"));

    let restored = GridGraphConfig::from_json_str(&json).expect("parse");
    assert!(restored.axis_text_callback.is_none());
}

#[test]
fn validation_rejects_bad_values() {
    let mut config = GridGraphConfig::new(Viewport::new(300, 200));
    config.grid_back_opacity = 1.5;
    assert!(matches!(config.validate(), Err(ChartError::InvalidData(_))));

    let config = GridGraphConfig::new(Viewport::new(0, 200));
    assert!(matches!(
        config.validate(),
        Err(ChartError::InvalidViewport { width: 0, height: 200 })
    ));

    let config = GridGraphConfig::new(Viewport::new(300, 200)).with_minimum_grid_spacing(0.0);
    assert!(config.validate().is_err());
}
