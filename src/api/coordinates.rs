use crate::core::{AxisOrientation, DataItem};
use crate::error::ChartResult;

use super::GridGraph;

/// Offsets this far below zero still count as on the grid.
const GRID_START_TOLERANCE: f64 = -0.01;

impl GridGraph<'_> {
    /// Distance of `x` from the start of an X axis; `None` for values the
    /// axis cannot place.
    pub fn units_x(&self, x: f64, axis_no: Option<usize>) -> ChartResult<Option<f64>> {
        Ok(self
            .resolve_axis(AxisOrientation::Horizontal, axis_no)?
            .position(x, None))
    }

    /// Distance of `y` from the bottom of a Y axis.
    pub fn units_y(&self, y: f64, axis_no: Option<usize>) -> ChartResult<Option<f64>> {
        Ok(self
            .resolve_axis(AxisOrientation::Vertical, axis_no)?
            .position(y, None))
    }

    /// Canvas x coordinate of `x`.
    pub fn grid_x(&self, x: f64, axis_no: Option<usize>) -> ChartResult<Option<f64>> {
        Ok(self
            .units_x(x, axis_no)?
            .map(|units| self.padding.left + units))
    }

    /// Canvas y coordinate of `y`.
    pub fn grid_y(&self, y: f64, axis_no: Option<usize>) -> ChartResult<Option<f64>> {
        let bottom = self.height() - self.padding.bottom;
        Ok(self.units_y(y, axis_no)?.map(|units| bottom - units))
    }

    /// Canvas x coordinate bars grow from.
    pub fn origin_x(&self, axis_no: Option<usize>) -> ChartResult<f64> {
        let axis = self.resolve_axis(AxisOrientation::Horizontal, axis_no)?;
        Ok(self.padding.left + axis.origin())
    }

    /// Canvas y coordinate bars grow from.
    pub fn origin_y(&self, axis_no: Option<usize>) -> ChartResult<f64> {
        let axis = self.resolve_axis(AxisOrientation::Vertical, axis_no)?;
        Ok(self.height() - self.padding.bottom - axis.origin())
    }

    /// Canvas x coordinate of a data item at `index`, or `None` when it falls
    /// outside the grid and should not be drawn.
    pub fn grid_position(&self, item: Option<&DataItem>, index: f64) -> ChartResult<Option<f64>> {
        let axis = self.resolve_axis(AxisOrientation::Horizontal, None)?;
        Ok(axis
            .position(index, item)
            .filter(|offset| *offset >= GRID_START_TOLERANCE && offset.floor() <= self.grid_limit)
            .map(|offset| self.padding.left + offset))
    }

    /// Right-most on-grid offset, less half a unit for centred labels.
    #[must_use]
    pub fn grid_limit(&self) -> f64 {
        self.grid_limit
    }

    /// Clamps a canvas y coordinate to the grid.
    #[must_use]
    pub fn clamp_vertical(&self, y: f64) -> f64 {
        y.min(self.height() - self.padding.bottom).max(self.padding.top)
    }

    /// Clamps a canvas x coordinate to the grid.
    #[must_use]
    pub fn clamp_horizontal(&self, x: f64) -> f64 {
        x.min(self.width() - self.padding.right).max(self.padding.left)
    }
}
