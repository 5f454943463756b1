pub mod axis;
pub mod axis_datetime;
pub mod axis_division;
pub mod axis_fixed;
pub mod axis_log;
pub mod grid_point;
pub mod number;
pub mod types;
pub mod values;

pub use axis::{Axis, AxisBuilder, AxisGeometry, AxisKind, AxisLabelFormat, AxisTextCallback};
pub use axis_division::{LinearDivision, is_nice, linear_division};
pub use grid_point::GridPoint;
pub use number::{NumberStyle, format_coordinate, format_number};
pub use types::{AxisOrientation, BBox, Padding, Viewport};
pub use values::{DataItem, Key, SeriesSource, ValueSeries};
