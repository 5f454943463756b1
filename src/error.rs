use thiserror::Error;

use crate::core::AxisOrientation;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("zero length axis (min >= max): min={min}, max={max}")]
    ZeroLengthAxis { min: f64, max: f64 },

    #[error("non-numeric min/max for {axis} axis {index}")]
    NonNumericAxisRange {
        axis: AxisOrientation,
        index: usize,
    },

    #[error("invalid {axis} axis options: min > max ({min} > {max})")]
    InvalidAxisOptions {
        axis: AxisOrientation,
        min: f64,
        max: f64,
    },

    #[error("invalid {axis} axis: min > max ({min} > {max})")]
    InvalidAxisRange {
        axis: AxisOrientation,
        min: f64,
        max: f64,
    },

    #[error("could not convert [{0}] to datetime")]
    DateConversion(String),

    #[error("unused axis: {}", join_axis_numbers(.0))]
    UnusedAxis(Vec<usize>),

    #[error("not enough space for {axis_count} axes")]
    NotEnoughSpace { axis_count: usize },

    #[error(
        "too many grid points ({min}->{max} = {count} points @ {spacing}px separation)"
    )]
    TooManyGridPoints {
        min: f64,
        max: f64,
        count: f64,
        spacing: f64,
    },

    #[error("grid spacing not set")]
    GridSpacingNotSet,

    #[error("invalid grid division: {0}")]
    InvalidGridDivision(f64),

    #[error("invalid log axis range: min={min}, max={max}, base={base}")]
    InvalidLogRange { min: f64, max: f64, base: f64 },

    #[error("axis {axis}{index} does not exist")]
    AxisNotFound {
        axis: AxisOrientation,
        index: usize,
    },

    #[error("grid graph axes have not been built")]
    AxesNotBuilt,
}

fn join_axis_numbers(axes: &[usize]) -> String {
    axes.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
