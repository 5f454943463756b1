use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::number::format_coordinate;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(text: &str) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidData(format!("invalid hex color `{text}`"));
        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        let channel = |range: std::ops::Range<usize>| -> ChartResult<f64> {
            let hex = digits.get(range).ok_or_else(invalid)?;
            let value = u8::from_str_radix(hex, 16).map_err(|_| invalid())?;
            Ok(f64::from(value) / 255.0)
        };

        match digits.len() {
            3 => {
                let short = |index: usize| -> ChartResult<f64> {
                    let hex = digits.get(index..=index).ok_or_else(invalid)?;
                    let value = u8::from_str_radix(hex, 16).map_err(|_| invalid())?;
                    Ok(f64::from(value * 17) / 255.0)
                };
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid()),
        }
    }

    /// `#rrggbb` text; alpha is written separately as an opacity attribute.
    #[must_use]
    pub fn to_svg(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Stroke settings shared by paths and rectangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStrokeStyle {
    pub color: Color,
    pub width: f64,
    /// SVG dash array, e.g. `"4,2"`.
    pub dash: Option<String>,
}

impl LineStrokeStyle {
    #[must_use]
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    #[must_use]
    pub fn with_dash(mut self, dash: Option<String>) -> Self {
        self.dash = dash;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    HorizontalTo(f64),
    VerticalTo(f64),
    Close,
}

/// Absolute-coordinate path commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: SmallVec<[PathCommand; 8]>,
}

impl PathData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(x, y));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::LineTo(x, y));
        self
    }

    pub fn horizontal_to(&mut self, x: f64) -> &mut Self {
        self.commands.push(PathCommand::HorizontalTo(x));
        self
    }

    pub fn vertical_to(&mut self, y: f64) -> &mut Self {
        self.commands.push(PathCommand::VerticalTo(y));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Appends another path's commands.
    pub fn append(&mut self, other: &PathData) -> &mut Self {
        self.commands.extend(other.commands.iter().copied());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn to_svg_d(&self) -> String {
        let mut parts = Vec::with_capacity(self.commands.len());
        for command in &self.commands {
            parts.push(match *command {
                PathCommand::MoveTo(x, y) => {
                    format!("M{} {}", format_coordinate(x), format_coordinate(y))
                }
                PathCommand::LineTo(x, y) => {
                    format!("L{} {}", format_coordinate(x), format_coordinate(y))
                }
                PathCommand::HorizontalTo(x) => format!("H{}", format_coordinate(x)),
                PathCommand::VerticalTo(y) => format!("V{}", format_coordinate(y)),
                PathCommand::Close => "z".to_owned(),
            });
        }
        parts.join("")
    }

    fn is_finite(&self) -> bool {
        self.commands.iter().all(|command| match *command {
            PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => x.is_finite() && y.is_finite(),
            PathCommand::HorizontalTo(v) | PathCommand::VerticalTo(v) => v.is_finite(),
            PathCommand::Close => true,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub data: PathData,
    pub stroke: Option<LineStrokeStyle>,
    pub fill: Option<Color>,
}

impl PathPrimitive {
    #[must_use]
    pub fn stroked(data: PathData, stroke: LineStrokeStyle) -> Self {
        Self {
            data,
            stroke: Some(stroke),
            fill: None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.data.is_finite() {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        if let Some(stroke) = &self.stroke {
            stroke.validate()?;
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Color>,
    pub stroke: Option<LineStrokeStyle>,
}

impl RectPrimitive {
    #[must_use]
    pub fn filled(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "rect coordinates must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = &self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

impl TextHAlign {
    #[must_use]
    pub fn svg_anchor(self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "middle",
            Self::Right => "end",
        }
    }
}

/// Draw command for one label in pixel space. `y` is the text baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub font_family: Option<String>,
    /// Clockwise rotation in degrees around `(x, y)`.
    pub rotation: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            font_family: None,
            rotation: 0.0,
        }
    }

    #[must_use]
    pub fn with_font_family(mut self, family: Option<String>) -> Self {
        self.font_family = family;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Nested primitives sharing an optional clip path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupPrimitive {
    pub class: Option<String>,
    pub clip_path: Option<String>,
    pub children: Vec<Primitive>,
}

impl GroupPrimitive {
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            clip_path: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clip_path(mut self, clip_id: Option<String>) -> Self {
        self.clip_path = clip_id;
        self
    }

    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.children.push(primitive.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.children.iter().try_for_each(Primitive::validate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Group(GroupPrimitive),
    Path(PathPrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Group(group) => group.validate(),
            Self::Path(path) => path.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Text(text) => text.validate(),
        }
    }

    /// Number of leaf primitives below this one.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Group(group) => group.children.iter().map(Self::leaf_count).sum(),
            _ => 1,
        }
    }
}

impl From<GroupPrimitive> for Primitive {
    fn from(value: GroupPrimitive) -> Self {
        Self::Group(value)
    }
}

impl From<PathPrimitive> for Primitive {
    fn from(value: PathPrimitive) -> Self {
        Self::Path(value)
    }
}

impl From<RectPrimitive> for Primitive {
    fn from(value: RectPrimitive) -> Self {
        Self::Rect(value)
    }
}

impl From<TextPrimitive> for Primitive {
    fn from(value: TextPrimitive) -> Self {
        Self::Text(value)
    }
}

/// Rectangular clip region referenced by id.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPathDef {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
