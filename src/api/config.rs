use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{AxisOrientation, AxisTextCallback, NumberStyle, Padding, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Option given either once for every axis or per axis index.
///
/// `Each` entries may be `null` to fall through to the global option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerAxis<T> {
    Each(Vec<Option<T>>),
    All(T),
}

impl<T: Clone> PerAxis<T> {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        match self {
            Self::All(value) => Some(value.clone()),
            Self::Each(values) => values.get(index).cloned().flatten(),
        }
    }
}

impl<T> From<T> for PerAxis<T> {
    fn from(value: T) -> Self {
        Self::All(value)
    }
}

/// Value of an optional per-axis setting at `index`.
#[must_use]
pub fn per_axis<T: Clone>(option: &Option<PerAxis<T>>, index: usize) -> Option<T> {
    option.as_ref().and_then(|values| values.get(index))
}

/// Per-axis value, else the global value, else the default.
#[must_use]
pub fn resolve<T>(per_axis: Option<T>, global: Option<T>, default: T) -> T {
    per_axis.or(global).unwrap_or(default)
}

/// Fixed axis end: a number, or a date string for date-time keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisBound {
    Number(f64),
    Text(String),
}

impl AxisBound {
    /// Numeric value, accepting numeric strings.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Number(_) => None,
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for AxisBound {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AxisBound {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Label callback wrapper so configurations stay `Debug` and comparable.
#[derive(Clone)]
pub struct TextCallback(pub AxisTextCallback);

impl TextCallback {
    pub fn new(callback: impl Fn(f64, Option<&str>) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }
}

impl fmt::Debug for TextCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TextCallback(..)")
    }
}

impl PartialEq for TextCallback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A horizontal (value) or vertical (key) reference line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guideline {
    /// `Vertical` places the line at a value on the Y axis.
    #[serde(default = "default_guideline_axis")]
    pub axis: AxisOrientation,
    pub value: AxisBound,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_guideline_colour")]
    pub colour: Color,
    #[serde(default)]
    pub dash: Option<String>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Drawn over the series instead of under them.
    #[serde(default)]
    pub above: bool,
}

impl Guideline {
    #[must_use]
    pub fn value_line(value: f64) -> Self {
        Self {
            axis: AxisOrientation::Vertical,
            value: AxisBound::Number(value),
            title: None,
            colour: default_guideline_colour(),
            dash: None,
            stroke_width: default_stroke_width(),
            above: false,
        }
    }

    #[must_use]
    pub fn key_line(value: impl Into<AxisBound>) -> Self {
        Self {
            axis: AxisOrientation::Horizontal,
            ..Self::value_line(0.0)
        }
        .with_value(value)
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<AxisBound>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_above(mut self, above: bool) -> Self {
        self.above = above;
        self
    }
}

/// Static crosshair guide drawn through one data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosshairConfig {
    /// Key value of the vertical line.
    #[serde(default)]
    pub x: Option<f64>,
    /// Value of the horizontal line.
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default = "default_crosshair_colour")]
    pub colour: Color,
    #[serde(default)]
    pub dash: Option<String>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Show the axis text for the crosshair position at the grid edges.
    #[serde(default)]
    pub show_text: bool,
}

impl CrosshairConfig {
    #[must_use]
    pub fn at(x: Option<f64>, y: Option<f64>) -> Self {
        Self {
            x,
            y,
            colour: default_crosshair_colour(),
            dash: None,
            stroke_width: default_stroke_width(),
            show_text: false,
        }
    }

    #[must_use]
    pub fn with_text(mut self, show_text: bool) -> Self {
        self.show_text = show_text;
        self
    }
}

/// Appearance of axis lines, ticks and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    #[serde(default = "default_axis_colour")]
    pub axis_colour: Color,
    #[serde(default = "default_stroke_width")]
    pub axis_stroke_width: f64,
    #[serde(default = "default_axis_font_size")]
    pub axis_font_size: f64,
    #[serde(default)]
    pub axis_font: Option<String>,
    #[serde(default = "default_axis_colour")]
    pub axis_text_colour: Color,
    /// Gap between tick ends and label text.
    #[serde(default = "default_axis_text_space")]
    pub axis_text_space: f64,
    #[serde(default = "default_division_size")]
    pub division_size: f64,
    #[serde(default = "default_subdivision_size")]
    pub subdivision_size: f64,
    #[serde(default = "default_label_font_size")]
    pub label_font_size: f64,
    /// Gap between the tick labels and the axis title.
    #[serde(default = "default_label_space")]
    pub label_space: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            axis_colour: default_axis_colour(),
            axis_stroke_width: default_stroke_width(),
            axis_font_size: default_axis_font_size(),
            axis_font: None,
            axis_text_colour: default_axis_colour(),
            axis_text_space: default_axis_text_space(),
            division_size: default_division_size(),
            subdivision_size: default_subdivision_size(),
            label_font_size: default_label_font_size(),
            label_space: default_label_space(),
        }
    }
}

/// Grid graph configuration.
///
/// Per-axis settings resolve through [`resolve`]: the indexed value, then the
/// global value, then the built-in default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGraphConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub padding: Padding,

    #[serde(default)]
    pub axis_min_h: Option<PerAxis<AxisBound>>,
    #[serde(default)]
    pub axis_max_h: Option<PerAxis<AxisBound>>,
    #[serde(default)]
    pub axis_min_v: Option<PerAxis<AxisBound>>,
    #[serde(default)]
    pub axis_max_v: Option<PerAxis<AxisBound>>,

    #[serde(default = "default_minimum_grid_spacing")]
    pub minimum_grid_spacing: f64,
    #[serde(default)]
    pub minimum_grid_spacing_h: Option<PerAxis<f64>>,
    #[serde(default)]
    pub minimum_grid_spacing_v: Option<PerAxis<f64>>,
    #[serde(default)]
    pub grid_division_h: Option<PerAxis<f64>>,
    #[serde(default)]
    pub grid_division_v: Option<PerAxis<f64>>,
    #[serde(default)]
    pub minimum_units_y: Option<PerAxis<f64>>,
    #[serde(default)]
    pub log_axis_y: Option<PerAxis<bool>>,
    #[serde(default)]
    pub log_axis_y_base: Option<PerAxis<f64>>,

    #[serde(default)]
    pub decimal_digits: Option<usize>,
    #[serde(default)]
    pub decimal_digits_x: Option<PerAxis<usize>>,
    #[serde(default)]
    pub decimal_digits_y: Option<PerAxis<usize>>,
    #[serde(default)]
    pub units_x: Option<PerAxis<String>>,
    #[serde(default)]
    pub units_before_x: Option<PerAxis<String>>,
    #[serde(default)]
    pub units_y: Option<PerAxis<String>>,
    #[serde(default)]
    pub units_before_y: Option<PerAxis<String>>,
    #[serde(default)]
    pub number_style: NumberStyle,
    #[serde(skip)]
    pub axis_text_callback: Option<TextCallback>,
    #[serde(skip)]
    pub axis_text_callback_x: Option<TextCallback>,
    #[serde(skip)]
    pub axis_text_callback_y: Option<TextCallback>,

    /// Labels and bars sit between grid lines instead of on them.
    #[serde(default)]
    pub label_centre: bool,
    /// Chart types that cannot plot against several Y axes.
    #[serde(default)]
    pub single_axis: bool,
    /// Y axis number per dataset index.
    #[serde(default)]
    pub dataset_axis: Option<Vec<usize>>,
    /// Datasets to plot; all datasets when unset.
    #[serde(default)]
    pub enabled_datasets: Option<Vec<usize>>,
    #[serde(default)]
    pub axis_right: bool,
    #[serde(default = "default_axis_fallback_max")]
    pub axis_fallback_max: f64,

    #[serde(default = "default_true")]
    pub show_axes: bool,
    #[serde(default = "default_true")]
    pub show_axis_h: bool,
    #[serde(default = "default_true")]
    pub show_axis_v: bool,
    #[serde(default = "default_true")]
    pub show_axis_text_h: bool,
    #[serde(default = "default_true")]
    pub show_axis_text_v: bool,
    #[serde(default = "default_true")]
    pub show_divisions: bool,
    #[serde(default)]
    pub show_subdivisions: bool,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    #[serde(default = "default_true")]
    pub show_grid_h: bool,
    #[serde(default = "default_true")]
    pub show_grid_v: bool,
    #[serde(default)]
    pub show_grid_subdivisions: bool,

    #[serde(default)]
    pub grid_back_colour: Option<Color>,
    #[serde(default = "default_opacity")]
    pub grid_back_opacity: f64,
    #[serde(default)]
    pub grid_back_stripe: bool,
    /// Stripe colours cycled from the bottom division; `null` leaves a gap.
    #[serde(default = "default_stripe_colours")]
    pub grid_back_stripe_colour: Vec<Option<Color>>,
    #[serde(default = "default_opacity")]
    pub grid_back_stripe_opacity: f64,

    #[serde(default = "default_grid_colour")]
    pub grid_colour: Color,
    #[serde(default)]
    pub grid_colour_h: Option<Color>,
    #[serde(default)]
    pub grid_colour_v: Option<Color>,
    #[serde(default)]
    pub grid_dash: Option<String>,
    #[serde(default)]
    pub grid_dash_h: Option<String>,
    #[serde(default)]
    pub grid_dash_v: Option<String>,
    #[serde(default)]
    pub grid_subdivision_colour: Option<Color>,
    #[serde(default)]
    pub grid_subdivision_colour_h: Option<Color>,
    #[serde(default)]
    pub grid_subdivision_colour_v: Option<Color>,
    #[serde(default)]
    pub grid_subdivision_dash: Option<String>,
    #[serde(default)]
    pub grid_subdivision_dash_h: Option<String>,
    #[serde(default)]
    pub grid_subdivision_dash_v: Option<String>,
    #[serde(default = "default_minimum_subdivision")]
    pub minimum_subdivision: f64,
    #[serde(default)]
    pub subdivision_h: Option<PerAxis<f64>>,
    #[serde(default)]
    pub subdivision_v: Option<PerAxis<f64>>,

    /// Fixed grid edges; negative right/bottom values count from the far edge.
    #[serde(default)]
    pub grid_left: Option<f64>,
    #[serde(default)]
    pub grid_right: Option<f64>,
    #[serde(default)]
    pub grid_top: Option<f64>,
    #[serde(default)]
    pub grid_bottom: Option<f64>,
    /// Gap between stacked right-hand Y axes.
    #[serde(default = "default_axis_space")]
    pub axis_space: f64,

    #[serde(default)]
    pub axis_style: AxisStyle,
    #[serde(default)]
    pub label_h: Option<String>,
    #[serde(default)]
    pub label_v: Option<PerAxis<String>>,

    #[serde(default)]
    pub guidelines: Vec<Guideline>,
    #[serde(default)]
    pub crosshairs: Option<CrosshairConfig>,

    #[serde(default)]
    pub datetime_keys: bool,
    #[serde(default)]
    pub datetime_text_format: Option<String>,
}

impl GridGraphConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            padding: Padding::default(),
            axis_min_h: None,
            axis_max_h: None,
            axis_min_v: None,
            axis_max_v: None,
            minimum_grid_spacing: default_minimum_grid_spacing(),
            minimum_grid_spacing_h: None,
            minimum_grid_spacing_v: None,
            grid_division_h: None,
            grid_division_v: None,
            minimum_units_y: None,
            log_axis_y: None,
            log_axis_y_base: None,
            decimal_digits: None,
            decimal_digits_x: None,
            decimal_digits_y: None,
            units_x: None,
            units_before_x: None,
            units_y: None,
            units_before_y: None,
            number_style: NumberStyle::default(),
            axis_text_callback: None,
            axis_text_callback_x: None,
            axis_text_callback_y: None,
            label_centre: false,
            single_axis: false,
            dataset_axis: None,
            enabled_datasets: None,
            axis_right: false,
            axis_fallback_max: default_axis_fallback_max(),
            show_axes: true,
            show_axis_h: true,
            show_axis_v: true,
            show_axis_text_h: true,
            show_axis_text_v: true,
            show_divisions: true,
            show_subdivisions: false,
            show_grid: true,
            show_grid_h: true,
            show_grid_v: true,
            show_grid_subdivisions: false,
            grid_back_colour: None,
            grid_back_opacity: default_opacity(),
            grid_back_stripe: false,
            grid_back_stripe_colour: default_stripe_colours(),
            grid_back_stripe_opacity: default_opacity(),
            grid_colour: default_grid_colour(),
            grid_colour_h: None,
            grid_colour_v: None,
            grid_dash: None,
            grid_dash_h: None,
            grid_dash_v: None,
            grid_subdivision_colour: None,
            grid_subdivision_colour_h: None,
            grid_subdivision_colour_v: None,
            grid_subdivision_dash: None,
            grid_subdivision_dash_h: None,
            grid_subdivision_dash_v: None,
            minimum_subdivision: default_minimum_subdivision(),
            subdivision_h: None,
            subdivision_v: None,
            grid_left: None,
            grid_right: None,
            grid_top: None,
            grid_bottom: None,
            axis_space: default_axis_space(),
            axis_style: AxisStyle::default(),
            label_h: None,
            label_v: None,
            guidelines: Vec::new(),
            crosshairs: None,
            datetime_keys: false,
            datetime_text_format: None,
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Fixes the value range of Y axis `index`.
    #[must_use]
    pub fn with_axis_range_v(mut self, index: usize, min: Option<f64>, max: Option<f64>) -> Self {
        set_per_axis(&mut self.axis_min_v, index, min.map(AxisBound::Number));
        set_per_axis(&mut self.axis_max_v, index, max.map(AxisBound::Number));
        self
    }

    /// Fixes the key range of the X axis; date strings are accepted for
    /// date-time keys.
    #[must_use]
    pub fn with_axis_range_h(
        mut self,
        min: Option<impl Into<AxisBound>>,
        max: Option<impl Into<AxisBound>>,
    ) -> Self {
        self.axis_min_h = min.map(|bound| PerAxis::All(bound.into()));
        self.axis_max_h = max.map(|bound| PerAxis::All(bound.into()));
        self
    }

    #[must_use]
    pub fn with_minimum_grid_spacing(mut self, spacing: f64) -> Self {
        self.minimum_grid_spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_grid_division_h(mut self, division: Option<f64>) -> Self {
        self.grid_division_h = division.map(PerAxis::All);
        self
    }

    #[must_use]
    pub fn with_grid_division_v(mut self, division: Option<PerAxis<f64>>) -> Self {
        self.grid_division_v = division;
        self
    }

    #[must_use]
    pub fn with_minimum_units_y(mut self, units: Option<PerAxis<f64>>) -> Self {
        self.minimum_units_y = units;
        self
    }

    #[must_use]
    pub fn with_log_axis_y(mut self, log: Option<PerAxis<bool>>, base: Option<PerAxis<f64>>) -> Self {
        self.log_axis_y = log;
        self.log_axis_y_base = base;
        self
    }

    #[must_use]
    pub fn with_decimal_digits(mut self, digits: Option<usize>) -> Self {
        self.decimal_digits = digits;
        self
    }

    #[must_use]
    pub fn with_units_y(mut self, before: Option<String>, after: Option<String>) -> Self {
        self.units_before_y = before.map(PerAxis::All);
        self.units_y = after.map(PerAxis::All);
        self
    }

    #[must_use]
    pub fn with_units_x(mut self, before: Option<String>, after: Option<String>) -> Self {
        self.units_before_x = before.map(PerAxis::All);
        self.units_x = after.map(PerAxis::All);
        self
    }

    #[must_use]
    pub fn with_axis_text_callback(mut self, callback: Option<TextCallback>) -> Self {
        self.axis_text_callback = callback;
        self
    }

    #[must_use]
    pub fn with_label_centre(mut self, label_centre: bool) -> Self {
        self.label_centre = label_centre;
        self
    }

    #[must_use]
    pub fn with_single_axis(mut self, single_axis: bool) -> Self {
        self.single_axis = single_axis;
        self
    }

    #[must_use]
    pub fn with_dataset_axis(mut self, axes: Option<Vec<usize>>) -> Self {
        self.dataset_axis = axes;
        self
    }

    #[must_use]
    pub fn with_enabled_datasets(mut self, datasets: Option<Vec<usize>>) -> Self {
        self.enabled_datasets = datasets;
        self
    }

    #[must_use]
    pub fn with_axis_right(mut self, axis_right: bool) -> Self {
        self.axis_right = axis_right;
        self
    }

    /// Hides every axis; the grid keeps its configured padding.
    #[must_use]
    pub fn with_axes_visible(mut self, show_axes: bool) -> Self {
        self.show_axes = show_axes;
        self
    }

    #[must_use]
    pub fn with_axis_text_visible(mut self, horizontal: bool, vertical: bool) -> Self {
        self.show_axis_text_h = horizontal;
        self.show_axis_text_v = vertical;
        self
    }

    #[must_use]
    pub fn with_grid_back(mut self, colour: Option<Color>, opacity: f64) -> Self {
        self.grid_back_colour = colour;
        self.grid_back_opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_grid_stripes(mut self, colours: Vec<Option<Color>>, opacity: f64) -> Self {
        self.grid_back_stripe = true;
        self.grid_back_stripe_colour = colours;
        self.grid_back_stripe_opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_grid_colours(mut self, horizontal: Option<Color>, vertical: Option<Color>) -> Self {
        self.grid_colour_h = horizontal;
        self.grid_colour_v = vertical;
        self
    }

    #[must_use]
    pub fn with_grid_subdivisions(mut self, show: bool) -> Self {
        self.show_grid_subdivisions = show;
        self
    }

    #[must_use]
    pub fn with_grid_edges(
        mut self,
        left: Option<f64>,
        right: Option<f64>,
        top: Option<f64>,
        bottom: Option<f64>,
    ) -> Self {
        self.grid_left = left;
        self.grid_right = right;
        self.grid_top = top;
        self.grid_bottom = bottom;
        self
    }

    #[must_use]
    pub fn with_axis_titles(mut self, label_h: Option<String>, label_v: Option<PerAxis<String>>) -> Self {
        self.label_h = label_h;
        self.label_v = label_v;
        self
    }

    #[must_use]
    pub fn with_guideline(mut self, guideline: Guideline) -> Self {
        self.guidelines.push(guideline);
        self
    }

    #[must_use]
    pub fn with_crosshairs(mut self, crosshairs: Option<CrosshairConfig>) -> Self {
        self.crosshairs = crosshairs;
        self
    }

    #[must_use]
    pub fn with_datetime_keys(mut self, datetime_keys: bool, text_format: Option<String>) -> Self {
        self.datetime_keys = datetime_keys;
        self.datetime_text_format = text_format;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (name, value) in [
            ("padding.left", self.padding.left),
            ("padding.right", self.padding.right),
            ("padding.top", self.padding.top),
            ("padding.bottom", self.padding.bottom),
            ("axis_space", self.axis_space),
            ("minimum_subdivision", self.minimum_subdivision),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.minimum_grid_spacing.is_finite() || self.minimum_grid_spacing <= 0.0 {
            return Err(ChartError::InvalidData(
                "`minimum_grid_spacing` must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("grid_back_opacity", self.grid_back_opacity),
            ("grid_back_stripe_opacity", self.grid_back_stripe_opacity),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be in [0, 1]"
                )));
            }
        }
        for colour in [Some(self.grid_colour), self.grid_back_colour, self.grid_colour_h, self.grid_colour_v]
            .into_iter()
            .flatten()
        {
            colour.validate()?;
        }
        for guideline in &self.guidelines {
            guideline.colour.validate()?;
        }
        if let Some(crosshairs) = &self.crosshairs {
            crosshairs.colour.validate()?;
        }
        Ok(())
    }

    /// Serializes config to pretty JSON. Label callbacks are not serialized.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }

    pub(crate) fn horizontal_grid_colour(&self) -> Color {
        self.grid_colour_h.unwrap_or(self.grid_colour)
    }

    pub(crate) fn vertical_grid_colour(&self) -> Color {
        self.grid_colour_v.unwrap_or(self.grid_colour)
    }

    pub(crate) fn horizontal_grid_dash(&self) -> Option<&str> {
        self.grid_dash_h.as_deref().or(self.grid_dash.as_deref())
    }

    pub(crate) fn vertical_grid_dash(&self) -> Option<&str> {
        self.grid_dash_v.as_deref().or(self.grid_dash.as_deref())
    }

    pub(crate) fn horizontal_subdivision_colour(&self) -> Color {
        self.grid_subdivision_colour_h
            .or(self.grid_subdivision_colour)
            .unwrap_or_else(|| self.horizontal_grid_colour())
    }

    pub(crate) fn vertical_subdivision_colour(&self) -> Color {
        self.grid_subdivision_colour_v
            .or(self.grid_subdivision_colour)
            .unwrap_or_else(|| self.vertical_grid_colour())
    }

    pub(crate) fn horizontal_subdivision_dash(&self) -> Option<&str> {
        self.grid_subdivision_dash_h
            .as_deref()
            .or(self.grid_subdivision_dash.as_deref())
            .or_else(|| self.horizontal_grid_dash())
    }

    pub(crate) fn vertical_subdivision_dash(&self) -> Option<&str> {
        self.grid_subdivision_dash_v
            .as_deref()
            .or(self.grid_subdivision_dash.as_deref())
            .or_else(|| self.vertical_grid_dash())
    }
}

fn set_per_axis<T: Clone>(slot: &mut Option<PerAxis<T>>, index: usize, value: Option<T>) {
    let mut values = match slot.take() {
        Some(PerAxis::Each(values)) => values,
        Some(PerAxis::All(value)) => vec![Some(value); index.max(1)],
        None => Vec::new(),
    };
    if values.len() <= index {
        values.resize(index + 1, None);
    }
    values[index] = value;
    *slot = Some(PerAxis::Each(values));
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

fn default_minimum_grid_spacing() -> f64 {
    15.0
}

fn default_minimum_subdivision() -> f64 {
    5.0
}

fn default_axis_fallback_max() -> f64 {
    1.0
}

fn default_axis_space() -> f64 {
    10.0
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_axis_font_size() -> f64 {
    10.0
}

fn default_axis_text_space() -> f64 {
    2.0
}

fn default_division_size() -> f64 {
    3.0
}

fn default_subdivision_size() -> f64 {
    2.0
}

fn default_label_font_size() -> f64 {
    12.0
}

fn default_label_space() -> f64 {
    5.0
}

fn default_guideline_axis() -> AxisOrientation {
    AxisOrientation::Vertical
}

fn default_axis_colour() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

fn default_grid_colour() -> Color {
    Color::rgb(0.6, 0.6, 0.6)
}

fn default_guideline_colour() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

fn default_crosshair_colour() -> Color {
    Color::rgba(0.0, 0.0, 0.0, 0.6)
}

fn default_stripe_colours() -> Vec<Option<Color>> {
    vec![None, Some(Color::rgb(0.93, 0.93, 0.93))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_per_axis_then_global() {
        assert_eq!(resolve(Some(1), Some(2), 3), 1);
        assert_eq!(resolve(None, Some(2), 3), 2);
        assert_eq!(resolve(None::<i32>, None, 3), 3);
    }

    #[test]
    fn per_axis_entries_fall_through() {
        let option = Some(PerAxis::Each(vec![Some(5.0), None]));
        assert_eq!(per_axis(&option, 0), Some(5.0));
        assert_eq!(per_axis(&option, 1), None);
        assert_eq!(per_axis(&option, 7), None);
        assert_eq!(per_axis(&Some(PerAxis::All(2.0)), 7), Some(2.0));
    }

    #[test]
    fn axis_range_setter_keeps_other_axes() {
        let config = GridGraphConfig::new(Viewport::new(400, 300))
            .with_axis_range_v(1, Some(-5.0), None)
            .with_axis_range_v(0, None, Some(50.0));
        assert_eq!(per_axis(&config.axis_min_v, 1), Some(AxisBound::Number(-5.0)));
        assert_eq!(per_axis(&config.axis_max_v, 0), Some(AxisBound::Number(50.0)));
        assert_eq!(per_axis(&config.axis_min_v, 0), None);
    }
}
