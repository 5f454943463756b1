use crate::core::{Axis, AxisOrientation, GridPoint};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ClipPathDef, Color, FrameLayer, GroupPrimitive, LineStrokeStyle, PathData, PathPrimitive,
    Primitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::GridGraph;
use super::config::per_axis;
use super::display_axis::{DisplayAxis, DisplayAxisOptions, SubdivisionRule};

const GRID_CLIP_ID: &str = "grid-clip";
const GRID_LINE_WIDTH: f64 = 1.0;

/// Grid output split by paint layer.
struct GridParts {
    background: Vec<Primitive>,
    lines: Vec<Primitive>,
    crosshairs: Option<GroupPrimitive>,
}

impl<'a> GridGraph<'a> {
    pub(super) fn display_axis<'g>(
        &'g self,
        axis: &'g Axis<'a>,
        orientation: AxisOrientation,
        axis_no: usize,
    ) -> DisplayAxis<'g, 'a> {
        let config = &self.config;
        let shown = config.show_axes;
        let horizontal = orientation == AxisOrientation::Horizontal;
        let title = if horizontal {
            config.label_h.clone()
        } else {
            self.y_axis_title(axis_no)
        };

        let options = DisplayAxisOptions {
            show_axis: shown && if horizontal { config.show_axis_h } else { config.show_axis_v },
            show_text: shown
                && if horizontal {
                    config.show_axis_text_h
                } else {
                    config.show_axis_text_v
                },
            show_divisions: shown && config.show_divisions,
            subdivisions: (shown && config.show_subdivisions)
                .then(|| self.subdivision_rule(orientation, axis_no)),
            label_centre: horizontal && config.label_centre,
            title: title.filter(|_| shown),
        };
        DisplayAxis::new(
            axis,
            orientation,
            axis_no,
            &config.axis_style,
            options,
            self.measurer.as_ref(),
        )
    }

    fn y_axis_title(&self, axis_no: usize) -> Option<String> {
        per_axis(&self.config.label_v, self.y_option_index(axis_no))
    }

    fn subdivision_rule(&self, orientation: AxisOrientation, axis_no: usize) -> SubdivisionRule {
        let config = &self.config;
        match orientation {
            AxisOrientation::Horizontal => SubdivisionRule {
                min_space: config.minimum_subdivision,
                min_unit: 1.0,
                fixed: per_axis(&config.subdivision_h, axis_no),
            },
            AxisOrientation::Vertical => {
                let option = self.y_option_index(axis_no);
                SubdivisionRule {
                    min_space: config.minimum_subdivision,
                    min_unit: per_axis(&config.minimum_units_y, option).unwrap_or(0.0),
                    fixed: per_axis(&config.subdivision_v, option),
                }
            }
        }
    }

    /// Start point of an axis on the canvas.
    ///
    /// The X axis crosses at Y zero when that lies on the grid; Y axis 0
    /// crosses at X zero, other Y axes sit at their computed offsets.
    pub fn axis_location(&self, orientation: AxisOrientation, axis_no: usize) -> ChartResult<(f64, f64)> {
        let mut x = self.padding.left;
        let mut y = self.padding.top + self.grid_height;
        match orientation {
            AxisOrientation::Horizontal => {
                let y0 = self.resolve_axis(AxisOrientation::Vertical, None)?.zero();
                if self.config.show_axis_h && (0.0..=self.grid_height).contains(&y0) {
                    y -= y0;
                }
            }
            AxisOrientation::Vertical if axis_no == 0 => {
                let x0 = self.resolve_axis(AxisOrientation::Horizontal, None)?.zero();
                if x0 >= 1.0 && x0 < self.grid_width {
                    x += x0;
                }
            }
            AxisOrientation::Vertical => {
                x += self.y_axis_positions.get(axis_no).copied().ok_or(
                    ChartError::AxisNotFound {
                        axis: orientation,
                        index: axis_no,
                    },
                )?;
            }
        }
        Ok((x, y))
    }

    /// One group per axis, X axes first.
    pub fn axes(&mut self) -> ChartResult<Vec<GroupPrimitive>> {
        self.prepare()?;
        self.axis_groups()
    }

    fn axis_groups(&self) -> ChartResult<Vec<GroupPrimitive>> {
        let mut groups = Vec::new();
        for (orientation, axes) in [
            (AxisOrientation::Horizontal, &self.x_axes),
            (AxisOrientation::Vertical, &self.y_axes),
        ] {
            for (axis_no, axis) in axes.iter().enumerate() {
                let Some(axis) = axis else {
                    continue;
                };
                let (x, y) = self.axis_location(orientation, axis_no)?;
                let group = self.display_axis(axis, orientation, axis_no).draw(x, y)?;
                if !group.is_empty() {
                    groups.push(group);
                }
            }
        }
        Ok(groups)
    }

    /// Background, stripes, grid lines and crosshairs in one group.
    pub fn grid(&mut self) -> ChartResult<GroupPrimitive> {
        self.prepare()?;
        let parts = self.grid_parts()?;
        let mut group = GroupPrimitive::new("grid");
        group.children.extend(parts.background);
        group.children.extend(parts.lines);
        if let Some(crosshairs) = parts.crosshairs {
            group.push(crosshairs);
        }
        Ok(group)
    }

    fn grid_parts(&self) -> ChartResult<GridParts> {
        let config = &self.config;
        let crosshairs = self.crosshairs()?;
        if !config.show_grid || (!config.show_grid_h && !config.show_grid_v) {
            return Ok(GridParts {
                background: Vec::new(),
                lines: Vec::new(),
                crosshairs,
            });
        }

        let left = self.padding.left;
        let top = self.padding.top;
        let mut background = Vec::new();
        if let Some(colour) = config.grid_back_colour {
            background.push(
                RectPrimitive::filled(
                    left,
                    top,
                    self.grid_width,
                    self.grid_height,
                    colour.with_alpha(colour.alpha * config.grid_back_opacity),
                )
                .into(),
            );
        }
        if let Some(stripes) = self.grid_stripes()? {
            background.push(stripes.into());
        }

        let mut lines = Vec::new();
        if config.show_grid_subdivisions {
            let mut rows = PathData::new();
            let mut columns = PathData::new();
            if config.show_grid_h {
                for point in self.y_subdivisions(self.main_y_axis)? {
                    self.row(&mut rows, point.position);
                }
            }
            if config.show_grid_v {
                for point in self.x_subdivisions(self.main_x_axis)? {
                    self.column(&mut columns, point.position);
                }
            }
            push_grid_lines(
                &mut lines,
                columns,
                (config.horizontal_subdivision_colour(), config.horizontal_subdivision_dash()),
                rows,
                (config.vertical_subdivision_colour(), config.vertical_subdivision_dash()),
            );
        }

        let mut rows = PathData::new();
        let mut columns = PathData::new();
        if config.show_grid_h {
            for point in self.y_grid_points(self.main_y_axis)? {
                self.row(&mut rows, point.position);
            }
        }
        if config.show_grid_v {
            for point in self.x_grid_points(self.main_x_axis)? {
                self.column(&mut columns, point.position);
            }
        }
        push_grid_lines(
            &mut lines,
            columns,
            (config.horizontal_grid_colour(), config.horizontal_grid_dash()),
            rows,
            (config.vertical_grid_colour(), config.vertical_grid_dash()),
        );

        Ok(GridParts {
            background,
            lines,
            crosshairs,
        })
    }

    fn row(&self, path: &mut PathData, y: f64) {
        path.move_to(self.padding.left, y)
            .horizontal_to(self.padding.left + self.grid_width);
    }

    fn column(&self, path: &mut PathData, x: f64) {
        path.move_to(x, self.padding.top)
            .vertical_to(self.padding.top + self.grid_height);
    }

    /// Grid points of a Y axis, from the bottom of the grid upwards.
    pub fn y_grid_points(&self, axis_no: usize) -> ChartResult<Vec<GridPoint>> {
        let axis = self.resolve_axis(AxisOrientation::Vertical, Some(axis_no))?;
        axis.grid_points(self.height() - self.padding.bottom)
    }

    /// Grid points of an X axis, from the left of the grid.
    pub fn x_grid_points(&self, axis_no: usize) -> ChartResult<Vec<GridPoint>> {
        let axis = self.resolve_axis(AxisOrientation::Horizontal, Some(axis_no))?;
        axis.grid_points(self.padding.left)
    }

    fn y_subdivisions(&self, axis_no: usize) -> ChartResult<Vec<GridPoint>> {
        let rule = self.subdivision_rule(AxisOrientation::Vertical, axis_no);
        let axis = self.resolve_axis(AxisOrientation::Vertical, Some(axis_no))?;
        axis.grid_subdivisions(
            rule.min_space,
            rule.min_unit,
            self.height() - self.padding.bottom,
            rule.fixed,
        )
    }

    fn x_subdivisions(&self, axis_no: usize) -> ChartResult<Vec<GridPoint>> {
        let rule = self.subdivision_rule(AxisOrientation::Horizontal, axis_no);
        let axis = self.resolve_axis(AxisOrientation::Horizontal, Some(axis_no))?;
        axis.grid_subdivisions(rule.min_space, rule.min_unit, self.padding.left, rule.fixed)
    }

    /// Alternating background bands between the main Y axis grid lines.
    pub fn grid_stripes(&self) -> ChartResult<Option<GroupPrimitive>> {
        let config = &self.config;
        let colours = &config.grid_back_stripe_colour;
        if !config.grid_back_stripe || colours.is_empty() {
            return Ok(None);
        }

        let points = self.y_grid_points(self.main_y_axis)?;
        let Some(first) = points.first() else {
            return Ok(None);
        };
        let mut group = GroupPrimitive::new("grid-stripes");
        let mut last_pos = first.position;
        for (index, point) in points.iter().skip(1).enumerate() {
            if let Some(colour) = colours[index % colours.len()] {
                group.push(RectPrimitive::filled(
                    self.padding.left,
                    point.position,
                    self.grid_width,
                    last_pos - point.position,
                    colour.with_alpha(colour.alpha * config.grid_back_stripe_opacity),
                ));
            }
            last_pos = point.position;
        }
        Ok((!group.is_empty()).then_some(group))
    }

    /// Static crosshair lines through the configured data point.
    pub fn crosshairs(&self) -> ChartResult<Option<GroupPrimitive>> {
        let Some(crosshairs) = &self.config.crosshairs else {
            return Ok(None);
        };
        let style = &self.config.axis_style;
        let left = self.padding.left;
        let top = self.padding.top;
        let right = left + self.grid_width;
        let bottom = top + self.grid_height;

        let mut path = PathData::new();
        let mut texts = Vec::new();
        if let Some(x) = crosshairs.x {
            let position = self.grid_x(x, None)?.filter(|gx| (left..=right).contains(gx));
            if let Some(gx) = position {
                path.move_to(gx, top).vertical_to(bottom);
                if crosshairs.show_text {
                    let text = self
                        .resolve_axis(AxisOrientation::Horizontal, None)?
                        .text_for(x);
                    texts.push((text, gx, bottom + style.axis_font_size, TextHAlign::Center));
                }
            }
        }
        if let Some(y) = crosshairs.y {
            let position = self.grid_y(y, None)?.filter(|gy| (top..=bottom).contains(gy));
            if let Some(gy) = position {
                path.move_to(left, gy).horizontal_to(right);
                if crosshairs.show_text {
                    let text = self
                        .resolve_axis(AxisOrientation::Vertical, None)?
                        .text_for(y);
                    texts.push((
                        text,
                        left - style.axis_text_space,
                        gy + style.axis_font_size / 3.0,
                        TextHAlign::Right,
                    ));
                }
            }
        }

        let mut group = GroupPrimitive::new("crosshairs");
        if !path.is_empty() {
            let stroke = LineStrokeStyle::new(crosshairs.colour, crosshairs.stroke_width)
                .with_dash(crosshairs.dash.clone());
            group.push(PathPrimitive::stroked(path, stroke));
        }
        for (text, x, y, align) in texts.into_iter().filter(|(text, ..)| !text.is_empty()) {
            group.push(
                TextPrimitive::new(text, x, y, style.axis_font_size, style.axis_text_colour, align)
                    .with_font_family(style.axis_font.clone()),
            );
        }
        Ok((!group.is_empty()).then_some(group))
    }

    /// Id of the clip path covering the grid area, created on first use.
    pub fn grid_clip_path(&mut self) -> ChartResult<String> {
        if let Some(def) = &self.grid_clip {
            return Ok(def.id.clone());
        }
        self.adjust_padding()?;
        let def = ClipPathDef {
            id: GRID_CLIP_ID.to_owned(),
            x: self.padding.left,
            y: self.padding.top,
            width: self.width() - self.padding.left - self.padding.right,
            height: self.height() - self.padding.top - self.padding.bottom,
        };
        let id = def.id.clone();
        self.grid_clip = Some(def);
        Ok(id)
    }

    #[must_use]
    pub fn grid_clip_def(&self) -> Option<&ClipPathDef> {
        self.grid_clip.as_ref()
    }

    /// Everything the grid graph draws, by layer. The series layer is left
    /// for the chart type.
    pub fn render_frame(&mut self) -> ChartResult<RenderFrame> {
        self.prepare()?;
        let clip_id = self.grid_clip_path()?;

        let mut frame = RenderFrame::new(self.config.viewport);
        if let Some(def) = &self.grid_clip {
            frame.add_def(def.clone());
        }

        let parts = self.grid_parts()?;
        if !parts.background.is_empty() {
            let mut group = GroupPrimitive::new("grid-back");
            group.children = parts.background;
            frame.push(FrameLayer::Background, group);
        }
        if !parts.lines.is_empty() {
            let mut group = GroupPrimitive::new("grid");
            group.children = parts.lines;
            frame.push(FrameLayer::Grid, group);
        }
        if let Some(below) = self.guidelines_below()? {
            frame.push(FrameLayer::Grid, below.with_clip_path(Some(clip_id.clone())));
        }
        if let Some(above) = self.guidelines_above()? {
            frame.push(FrameLayer::Overlay, above.with_clip_path(Some(clip_id)));
        }
        if let Some(crosshairs) = parts.crosshairs {
            frame.push(FrameLayer::Crosshair, crosshairs);
        }
        for axis in self.axis_groups()? {
            frame.push(FrameLayer::Axis, axis);
        }
        Ok(frame)
    }

    pub fn render<R: Renderer>(&mut self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.render_frame()?;
        renderer.render(&frame)
    }
}

/// Adds vertical (`columns`) and horizontal (`rows`) grid lines, as one path
/// when their colour and dash match.
fn push_grid_lines(
    lines: &mut Vec<Primitive>,
    columns: PathData,
    column_style: (Color, Option<&str>),
    mut rows: PathData,
    row_style: (Color, Option<&str>),
) {
    let stroke = |(colour, dash): (Color, Option<&str>)| {
        LineStrokeStyle::new(colour, GRID_LINE_WIDTH).with_dash(dash.map(str::to_owned))
    };
    if column_style == row_style {
        rows.append(&columns);
        if !rows.is_empty() {
            lines.push(PathPrimitive::stroked(rows, stroke(column_style)).into());
        }
        return;
    }
    if !columns.is_empty() {
        lines.push(PathPrimitive::stroked(columns, stroke(column_style)).into());
    }
    if !rows.is_empty() {
        lines.push(PathPrimitive::stroked(rows, stroke(row_style)).into());
    }
}
