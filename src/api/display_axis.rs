use crate::api::config::AxisStyle;
use crate::api::text_measure::TextMeasurer;
use crate::core::{Axis, AxisOrientation, BBox, GridPoint};
use crate::error::ChartResult;
use crate::render::{
    GroupPrimitive, LineStrokeStyle, PathData, PathPrimitive, TextHAlign, TextPrimitive,
};

/// Arguments forwarded to [`Axis::grid_subdivisions`] for minor ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubdivisionRule {
    pub min_space: f64,
    pub min_unit: f64,
    pub fixed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayAxisOptions {
    pub show_axis: bool,
    pub show_text: bool,
    pub show_divisions: bool,
    pub subdivisions: Option<SubdivisionRule>,
    /// Labels sit between ticks; the last grid point gets no label.
    pub label_centre: bool,
    pub title: Option<String>,
}

/// Axis line, ticks, labels and title for one built axis.
///
/// Horizontal axes grow downwards from their start point. Vertical axis 0
/// puts ticks and labels on its left, other vertical axes on their right.
pub struct DisplayAxis<'g, 'a> {
    axis: &'g Axis<'a>,
    orientation: AxisOrientation,
    axis_no: usize,
    style: &'g AxisStyle,
    options: DisplayAxisOptions,
    measurer: &'g dyn TextMeasurer,
}

struct AxisLayout {
    line: Option<PathData>,
    ticks: PathData,
    texts: Vec<TextPrimitive>,
    bbox: BBox,
}

impl<'g, 'a> DisplayAxis<'g, 'a> {
    pub fn new(
        axis: &'g Axis<'a>,
        orientation: AxisOrientation,
        axis_no: usize,
        style: &'g AxisStyle,
        options: DisplayAxisOptions,
        measurer: &'g dyn TextMeasurer,
    ) -> Self {
        Self {
            axis,
            orientation,
            axis_no,
            style,
            options,
            measurer,
        }
    }

    /// Bounding box of everything drawn, relative to the axis start point.
    /// Empty when nothing is visible.
    pub fn measure(&self) -> ChartResult<BBox> {
        Ok(self.layout(0.0, 0.0)?.bbox)
    }

    /// Draws the axis with its start point at `(x, y)`.
    pub fn draw(&self, x: f64, y: f64) -> ChartResult<GroupPrimitive> {
        let layout = self.layout(x, y)?;
        let mut group = GroupPrimitive::new(format!("axis axis-{}{}", self.orientation, self.axis_no));
        let stroke = LineStrokeStyle::new(self.style.axis_colour, self.style.axis_stroke_width);

        if let Some(line) = layout.line {
            group.push(PathPrimitive::stroked(line, stroke.clone()));
        }
        if !layout.ticks.is_empty() {
            group.push(PathPrimitive::stroked(layout.ticks, stroke));
        }
        for text in layout.texts {
            group.push(text);
        }
        Ok(group)
    }

    fn horizontal(&self) -> bool {
        self.orientation == AxisOrientation::Horizontal
    }

    /// +1 when ticks point down or right, -1 when they point left.
    fn side(&self) -> f64 {
        if self.horizontal() || self.axis_no > 0 {
            1.0
        } else {
            -1.0
        }
    }

    fn layout(&self, ox: f64, oy: f64) -> ChartResult<AxisLayout> {
        let length = self.axis.length();
        let horizontal = self.horizontal();
        let side = self.side();
        let mut bbox = BBox::empty();

        let line = self.options.show_axis.then(|| {
            let mut path = PathData::new();
            if horizontal {
                path.move_to(ox, oy).horizontal_to(ox + length);
                bbox.include(BBox::new(ox, oy, ox + length, oy));
            } else {
                path.move_to(ox, oy).vertical_to(oy - length);
                bbox.include(BBox::new(ox, oy - length, ox, oy));
            }
            path
        });

        let start = if horizontal { ox } else { oy };
        let points = self.axis.grid_points(start)?;
        let division = if self.options.show_divisions {
            self.style.division_size
        } else {
            0.0
        };

        let mut ticks = PathData::new();
        if division > 0.0 {
            for point in &points {
                self.push_tick(&mut ticks, &mut bbox, ox, oy, point.position, division * side);
            }
        }
        let minor_rule = self
            .options
            .subdivisions
            .filter(|_| self.style.subdivision_size > 0.0);
        if let Some(rule) = minor_rule {
            let minors = self
                .axis
                .grid_subdivisions(rule.min_space, rule.min_unit, start, rule.fixed)?;
            for point in &minors {
                self.push_tick(
                    &mut ticks,
                    &mut bbox,
                    ox,
                    oy,
                    point.position,
                    self.style.subdivision_size * side,
                );
            }
        }

        let mut texts = Vec::new();
        if self.options.show_text {
            let gap = division + self.style.axis_text_space;
            for (position, text) in self.label_positions(&points) {
                let (width, height) = self.measurer.measure(&text, self.style.axis_font_size);
                let (x, y, align) = if horizontal {
                    (position, oy + gap + height, TextHAlign::Center)
                } else {
                    let align = if side < 0.0 {
                        TextHAlign::Right
                    } else {
                        TextHAlign::Left
                    };
                    (ox + gap * side, position + height / 3.0, align)
                };
                bbox.include(text_bbox(x, y, width, height, align));
                texts.push(
                    TextPrimitive::new(
                        text,
                        x,
                        y,
                        self.style.axis_font_size,
                        self.style.axis_text_colour,
                        align,
                    )
                    .with_font_family(self.style.axis_font.clone()),
                );
            }
        }

        if let Some(title) = self.options.title.as_deref().filter(|t| !t.is_empty()) {
            let text = self.title(title, ox, oy, &mut bbox);
            texts.push(text);
        }

        Ok(AxisLayout {
            line,
            ticks,
            texts,
            bbox,
        })
    }

    fn push_tick(
        &self,
        ticks: &mut PathData,
        bbox: &mut BBox,
        ox: f64,
        oy: f64,
        position: f64,
        extent: f64,
    ) {
        if self.horizontal() {
            ticks.move_to(position, oy).vertical_to(oy + extent);
            bbox.include(BBox::new(
                position,
                oy.min(oy + extent),
                position,
                oy.max(oy + extent),
            ));
        } else {
            ticks.move_to(ox, position).horizontal_to(ox + extent);
            bbox.include(BBox::new(
                ox.min(ox + extent),
                position,
                ox.max(ox + extent),
                position,
            ));
        }
    }

    fn label_positions(&self, points: &[GridPoint]) -> Vec<(f64, String)> {
        if self.horizontal() && self.options.label_centre {
            return points
                .windows(2)
                .filter(|pair| !pair[0].text.is_empty())
                .map(|pair| ((pair[0].position + pair[1].position) * 0.5, pair[0].text.clone()))
                .collect();
        }
        points
            .iter()
            .filter(|point| !point.text.is_empty())
            .map(|point| (point.position, point.text.clone()))
            .collect()
    }

    fn title(&self, title: &str, ox: f64, oy: f64, bbox: &mut BBox) -> TextPrimitive {
        let font_size = self.style.label_font_size;
        let (width, height) = self.measurer.measure(title, font_size);
        let length = self.axis.length();
        let space = self.style.label_space;

        let (x, y, rotation, extent) = if self.horizontal() {
            let edge = if bbox.is_empty() { oy } else { bbox.max_y };
            let x = ox + length * 0.5;
            let y = edge + space + height;
            (x, y, 0.0, BBox::new(x - width * 0.5, y - height, x + width * 0.5, y))
        } else {
            let y = oy - length * 0.5;
            if self.side() < 0.0 {
                // reads bottom to top, glyphs extend left of the baseline
                let edge = if bbox.is_empty() { ox } else { bbox.min_x };
                let x = edge - space;
                (x, y, -90.0, BBox::new(x - height, y - width * 0.5, x, y + width * 0.5))
            } else {
                let edge = if bbox.is_empty() { ox } else { bbox.max_x };
                let x = edge + space;
                (x, y, 90.0, BBox::new(x, y - width * 0.5, x + height, y + width * 0.5))
            }
        };
        bbox.include(extent);

        TextPrimitive::new(
            title,
            x,
            y,
            font_size,
            self.style.axis_text_colour,
            TextHAlign::Center,
        )
        .with_font_family(self.style.axis_font.clone())
        .with_rotation(rotation)
    }
}

/// Text box from a baseline anchor; descenders are ignored.
fn text_bbox(x: f64, y: f64, width: f64, height: f64, align: TextHAlign) -> BBox {
    let left = match align {
        TextHAlign::Left => x,
        TextHAlign::Center => x - width * 0.5,
        TextHAlign::Right => x - width,
    };
    BBox::new(left, y - height, left + width, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::text_measure::HeuristicTextMeasurer;
    use crate::core::AxisBuilder;

    fn options() -> DisplayAxisOptions {
        DisplayAxisOptions {
            show_axis: true,
            show_text: true,
            show_divisions: true,
            subdivisions: None,
            label_centre: false,
            title: None,
        }
    }

    #[test]
    fn left_axis_labels_extend_left_and_above() {
        let mut builder = AxisBuilder::new(200.0, 10.0, 0.0, 0.0)
            .expect("valid range")
            .with_min_space(20.0);
        builder.reverse();
        let axis = builder.build().expect("axis builds");
        let style = AxisStyle::default();
        let display = DisplayAxis::new(
            &axis,
            AxisOrientation::Vertical,
            0,
            &style,
            options(),
            &HeuristicTextMeasurer,
        );

        let bbox = display.measure().expect("measures");
        assert!(bbox.min_x < -style.division_size);
        assert_eq!(bbox.max_x, 0.0);
        // top label overhangs the axis end
        assert!(bbox.min_y < -200.0);
    }

    #[test]
    fn hidden_axis_measures_empty() {
        let axis = AxisBuilder::new(200.0, 10.0, 0.0, 0.0)
            .expect("valid range")
            .build()
            .expect("axis builds");
        let style = AxisStyle::default();
        let display = DisplayAxis::new(
            &axis,
            AxisOrientation::Horizontal,
            0,
            &style,
            DisplayAxisOptions {
                show_axis: false,
                show_text: false,
                show_divisions: false,
                ..options()
            },
            &HeuristicTextMeasurer,
        );
        assert!(display.measure().expect("measures").is_empty());
    }
}
