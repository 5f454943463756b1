use crate::core::AxisOrientation;
use crate::core::axis_datetime::date_convert;
use crate::error::ChartResult;
use crate::render::{GroupPrimitive, LineStrokeStyle, PathData, PathPrimitive, TextHAlign, TextPrimitive};

use super::GridGraph;
use super::config::{AxisBound, Guideline};

/// Guideline extents, folded into the axis ends.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct GuidelineExtrema {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
}

const TITLE_OFFSET: f64 = 3.0;

impl GridGraph<'_> {
    /// Data value a guideline marks; `None` when it cannot be placed.
    pub(super) fn guideline_value(&self, guideline: &Guideline) -> Option<f64> {
        match guideline.axis {
            AxisOrientation::Vertical => guideline.value.as_number(),
            AxisOrientation::Horizontal => match &guideline.value {
                AxisBound::Text(key) if self.values.associative_keys() => {
                    self.values.position_of_key(key).map(|index| index as f64)
                }
                AxisBound::Text(text) if self.config.datetime_keys => {
                    date_convert(text).map(|seconds| seconds as f64)
                }
                bound => bound.as_number(),
            },
        }
    }

    pub(super) fn guideline_extrema(&self) -> GuidelineExtrema {
        let mut extrema = GuidelineExtrema::default();
        for guideline in &self.config.guidelines {
            let Some(value) = self.guideline_value(guideline) else {
                continue;
            };
            let (min, max) = match guideline.axis {
                AxisOrientation::Horizontal => (&mut extrema.min_x, &mut extrema.max_x),
                AxisOrientation::Vertical => (&mut extrema.min_y, &mut extrema.max_y),
            };
            *min = Some(min.map_or(value, |current| current.min(value)));
            *max = Some(max.map_or(value, |current| current.max(value)));
        }
        extrema
    }

    /// Guidelines drawn under the series.
    pub fn guidelines_below(&self) -> ChartResult<Option<GroupPrimitive>> {
        self.guideline_group(false)
    }

    /// Guidelines drawn over the series.
    pub fn guidelines_above(&self) -> ChartResult<Option<GroupPrimitive>> {
        self.guideline_group(true)
    }

    fn guideline_group(&self, above: bool) -> ChartResult<Option<GroupPrimitive>> {
        self.require_axes()?;
        let mut group = GroupPrimitive::new(if above {
            "guidelines-above"
        } else {
            "guidelines-below"
        });
        for guideline in self.config.guidelines.iter().filter(|g| g.above == above) {
            self.push_guideline(&mut group, guideline)?;
        }
        Ok((!group.is_empty()).then_some(group))
    }

    fn push_guideline(&self, group: &mut GroupPrimitive, guideline: &Guideline) -> ChartResult<()> {
        let Some(value) = self.guideline_value(guideline) else {
            return Ok(());
        };
        let left = self.padding.left;
        let top = self.padding.top;
        let font_size = self.config.axis_style.axis_font_size;

        let mut path = PathData::new();
        let title_anchor = match guideline.axis {
            AxisOrientation::Vertical => {
                let Some(y) = self.grid_y(value, None)? else {
                    return Ok(());
                };
                if y < top || y > top + self.grid_height {
                    return Ok(());
                }
                path.move_to(left, y).horizontal_to(left + self.grid_width);
                (left + TITLE_OFFSET, y - TITLE_OFFSET, 0.0)
            }
            AxisOrientation::Horizontal => {
                let Some(x) = self.grid_x(value, None)? else {
                    return Ok(());
                };
                if x < left || x > left + self.grid_width {
                    return Ok(());
                }
                path.move_to(x, top).vertical_to(top + self.grid_height);
                (x - TITLE_OFFSET, top + self.grid_height - TITLE_OFFSET, -90.0)
            }
        };

        let stroke = LineStrokeStyle::new(guideline.colour, guideline.stroke_width)
            .with_dash(guideline.dash.clone());
        group.push(PathPrimitive::stroked(path, stroke));

        if let Some(title) = guideline.title.as_deref().filter(|t| !t.is_empty()) {
            let (x, y, rotation) = title_anchor;
            group.push(
                TextPrimitive::new(title, x, y, font_size, guideline.colour, TextHAlign::Left)
                    .with_font_family(self.config.axis_style.axis_font.clone())
                    .with_rotation(rotation),
            );
        }
        Ok(())
    }
}
