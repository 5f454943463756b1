use std::fs;
use std::path::PathBuf;

use grid_graph::api::{CrosshairConfig, GridGraph, GridGraphConfig, Guideline};
use grid_graph::core::{ValueSeries, Viewport};
use grid_graph::render::{Color, SvgFragmentRenderer};

const DEFAULT_VALUES: [f64; 8] = [12.0, 18.5, 9.0, 27.0, 31.5, 22.0, 40.0, 35.5];

struct CliArgs {
    config_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    values: Vec<f64>,
}

fn main() {
    let _ = grid_graph::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            GridGraphConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => demo_config(),
    };

    let series = ValueSeries::from_values(&args.values);
    let mut graph = GridGraph::new(config.clone(), &series).map_err(|err| err.to_string())?;
    let mut renderer = SvgFragmentRenderer::new();
    graph.render(&mut renderer).map_err(|err| err.to_string())?;

    let svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n{}</svg>\n",
        config.viewport.width,
        config.viewport.height,
        renderer.output()
    );
    match &args.output_path {
        Some(path) => fs::write(path, svg)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?,
        None => print!("{svg}"),
    }
    Ok(())
}

fn demo_config() -> GridGraphConfig {
    GridGraphConfig::new(Viewport::new(640, 400))
        .with_grid_subdivisions(true)
        .with_grid_stripes(vec![Some(Color::rgb(0.94, 0.94, 0.97)), None], 1.0)
        .with_units_y(None, Some("%".to_owned()))
        .with_axis_titles(Some("Sample".to_owned()), None)
        .with_guideline(Guideline::value_line(30.0).with_title("target"))
        .with_crosshairs(Some(CrosshairConfig::at(Some(4.0), Some(31.5)).with_text(true)))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut config_path = None;
    let mut output_path = None;
    let mut values = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = Some(PathBuf::from(value));
            }
            "-h" | "--help" => {
                println!(
                    "Usage: cargo run --bin grid_demo_svg -- [--config <path>] [--output <path>] [value ...]"
                );
                std::process::exit(0);
            }
            _ => {
                let value = arg
                    .parse::<f64>()
                    .map_err(|_| format!("unknown argument `{arg}`"))?;
                values.push(value);
            }
        }
    }

    if values.is_empty() {
        values.extend_from_slice(&DEFAULT_VALUES);
    }
    Ok(CliArgs {
        config_path,
        output_path,
        values,
    })
}
