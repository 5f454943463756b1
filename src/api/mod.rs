mod axis_ends;
mod axis_factory;
mod config;
mod coordinates;
mod dataset_axes;
mod display_axis;
mod grid_drawing;
mod grid_graph;
mod guidelines;
mod label_adjustment;
mod text_measure;

pub use axis_ends::{AxisEnds, AxisRange};
pub use config::{
    AxisBound, AxisStyle, CrosshairConfig, GridGraphConfig, Guideline, PerAxis, TextCallback,
    per_axis, resolve,
};
pub use display_axis::{DisplayAxis, DisplayAxisOptions, SubdivisionRule};
pub use grid_graph::{GraphStage, GridGraph};
pub use label_adjustment::{MAX_PADDING_ITERATIONS, PaddingReport};
pub use text_measure::{HeuristicTextMeasurer, TextMeasurer};
