use tracing::{trace, warn};

use crate::core::{Axis, AxisOrientation, BBox, Padding};
use crate::error::{ChartError, ChartResult};

use super::GridGraph;
use super::axis_ends::AxisEnds;
use super::config::GridGraphConfig;

/// Upper bound on label measurement passes.
pub const MAX_PADDING_ITERATIONS: usize = 10;

/// Outcome of the padding loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingReport {
    /// Measurement passes run, including the one that confirmed the result.
    pub iterations: usize,
    /// False when the iteration bound was reached with padding still moving.
    pub converged: bool,
}

/// Grid edges fixed by configuration, as padding.
#[derive(Debug, Clone, Copy, Default)]
struct FixedEdges {
    left: Option<f64>,
    right: Option<f64>,
    top: Option<f64>,
    bottom: Option<f64>,
}

impl FixedEdges {
    /// Zero means unset; negative right and bottom edges count from the far
    /// side of the canvas.
    fn from_config(config: &GridGraphConfig, width: f64, height: f64) -> Self {
        let set = |edge: Option<f64>| edge.filter(|v| *v != 0.0 && v.is_finite());
        let far = |edge: f64, size: f64| if edge < 0.0 { edge.abs() } else { size - edge };
        Self {
            left: set(config.grid_left).map(f64::abs),
            right: set(config.grid_right).map(|edge| far(edge, width)),
            top: set(config.grid_top).map(f64::abs),
            bottom: set(config.grid_bottom).map(|edge| far(edge, height)),
        }
    }

    fn horizontal(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}

impl<'a> GridGraph<'a> {
    /// Grows padding to fit the axis labels, measuring tentative axes until
    /// the overflow stops changing.
    pub(super) fn label_adjustment(&mut self, ends: &AxisEnds) -> ChartResult<PaddingReport> {
        let width = self.width();
        let height = self.height();
        let fixed = FixedEdges::from_config(&self.config, width, height);
        if let Some(left) = fixed.left {
            self.padding.left = left;
        }
        if let Some(right) = fixed.right {
            self.padding.right = right;
        }
        if let Some(top) = fixed.top {
            self.padding.top = top;
        }
        if let Some(bottom) = fixed.bottom {
            self.padding.bottom = bottom;
        }

        let space_x = width - self.padding.left - self.padding.right;
        let space_y = height - self.padding.top - self.padding.bottom;
        let mut extra = Padding::uniform(0.0);
        let mut positions = Vec::new();
        let mut report = PaddingReport {
            iterations: 0,
            converged: false,
        };

        for iteration in 0..MAX_PADDING_ITERATIONS {
            report.iterations = iteration + 1;
            let x_len = space_x - extra.left - extra.right;
            let y_len = space_y - extra.top - extra.bottom;
            if x_len <= 0.0 || y_len <= 0.0 {
                return Err(ChartError::NotEnoughSpace {
                    axis_count: self.y_axis_count(),
                });
            }

            let (mut x_axes, mut y_axes) = self.create_axes(ends, x_len, y_len)?;
            for axis in x_axes.iter_mut().chain(y_axes.iter_mut()).flatten() {
                axis.prepare_grid()?;
            }
            let bbox = self.find_axis_bbox(x_len, y_len, &x_axes, &y_axes, &mut positions)?;
            let measured = overflow(bbox, x_len, y_len);
            trace!(
                iteration,
                x_len,
                y_len,
                left = measured.left,
                right = measured.right,
                top = measured.top,
                bottom = measured.bottom,
                "measured axis label overflow"
            );

            if measured == extra {
                report.converged = true;
                break;
            }
            extra = measured;
        }
        if !report.converged {
            warn!(
                iterations = report.iterations,
                "axis label padding did not converge, using last measurement"
            );
        }

        if fixed.left.is_none() {
            self.padding.left += extra.left;
        }
        if fixed.right.is_none() {
            self.padding.right += extra.right;
        }
        if fixed.top.is_none() {
            self.padding.top += extra.top;
        }
        if fixed.bottom.is_none() {
            self.padding.bottom += extra.bottom;
        }

        if fixed.horizontal() {
            // the first right-hand axis sits on the fixed grid edge
            let grid_width = width - self.padding.left - self.padding.right;
            let mut offset = None;
            for position in positions.iter_mut().skip(1) {
                match offset {
                    Some(offset) => *position += offset,
                    None => {
                        offset = Some(grid_width - *position);
                        *position = grid_width;
                    }
                }
            }
        }

        if positions.iter().skip(1).any(|position| *position <= 0.0) {
            return Err(ChartError::NotEnoughSpace {
                axis_count: self.y_axis_count(),
            });
        }
        self.y_axis_positions = positions;
        Ok(report)
    }

    /// Bounding box of all axes, relative to the top-left grid corner.
    ///
    /// Records the offset of each right-hand Y axis in `positions`.
    fn find_axis_bbox(
        &self,
        x_len: f64,
        y_len: f64,
        x_axes: &[Option<Axis<'a>>],
        y_axes: &[Option<Axis<'a>>],
        positions: &mut Vec<f64>,
    ) -> ChartResult<BBox> {
        let mut bbox = BBox::new(self.width(), self.height(), 0.0, 0.0);
        if let Some(Some(x_axis)) = x_axes.first() {
            let measured = self
                .display_axis(x_axis, AxisOrientation::Horizontal, 0)
                .measure()?;
            bbox.include(measured.translate(0.0, y_len));
        }

        positions.clear();
        positions.resize(y_axes.len(), 0.0);
        let mut right_pos = x_len;
        for (axis_no, y_axis) in y_axes.iter().enumerate() {
            let Some(y_axis) = y_axis else {
                continue;
            };
            let mut measured = self
                .display_axis(y_axis, AxisOrientation::Vertical, axis_no)
                .measure()?
                .translate(0.0, y_len);

            if axis_no > 0 {
                let (outer, inner) = if measured.is_empty() {
                    (0.0, 0.0)
                } else if axis_no > 1 {
                    (measured.max_x, measured.min_x.abs())
                } else {
                    (measured.max_x, 0.0)
                };
                positions[axis_no] = right_pos + inner;
                measured = measured.translate(right_pos + inner, 0.0);
                right_pos += inner + outer + self.config.axis_space;
            }
            bbox.include(measured);
        }
        Ok(bbox)
    }
}

/// Whole pixels the box spills past each side of an `x_len` by `y_len` grid.
fn overflow(bbox: BBox, x_len: f64, y_len: f64) -> Padding {
    Padding::new(
        if bbox.min_x < 0.0 { bbox.min_x.abs().ceil() } else { 0.0 },
        if bbox.max_x > x_len { (bbox.max_x - x_len).ceil() } else { 0.0 },
        if bbox.min_y < 0.0 { bbox.min_y.abs().ceil() } else { 0.0 },
        if bbox.max_y > y_len { (bbox.max_y - y_len).ceil() } else { 0.0 },
    )
}
