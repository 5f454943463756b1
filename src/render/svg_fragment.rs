//! SVG fragment output.
//!
//! Produces the `<defs>` block and layer elements for embedding in a host
//! document; the outer `<svg>` element is left to the caller.

use std::fmt::Write as _;

use crate::core::number::format_coordinate;
use crate::error::ChartResult;
use crate::render::{
    ClipPathDef, Color, GroupPrimitive, LineStrokeStyle, PathPrimitive, Primitive, RectPrimitive,
    RenderFrame, Renderer, TextPrimitive,
};

#[derive(Debug, Default)]
pub struct SvgFragmentRenderer {
    output: String,
}

impl SvgFragmentRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup written by the last render call.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }
}

impl Renderer for SvgFragmentRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut out = String::new();

        if !frame.defs.is_empty() {
            out.push_str("<defs>");
            for def in &frame.defs {
                write_clip_path(&mut out, def);
            }
            out.push_str("</defs>\n");
        }
        for primitive in frame.primitives() {
            write_primitive(&mut out, primitive);
            out.push('\n');
        }

        self.output = out;
        Ok(())
    }
}

fn write_clip_path(out: &mut String, def: &ClipPathDef) {
    let _ = write!(
        out,
        r#"<clipPath id="{}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
        escape_xml(&def.id),
        format_coordinate(def.x),
        format_coordinate(def.y),
        format_coordinate(def.width),
        format_coordinate(def.height),
    );
}

fn write_primitive(out: &mut String, primitive: &Primitive) {
    match primitive {
        Primitive::Group(group) => write_group(out, group),
        Primitive::Path(path) => write_path(out, path),
        Primitive::Rect(rect) => write_rect(out, rect),
        Primitive::Text(text) => write_text(out, text),
    }
}

fn write_group(out: &mut String, group: &GroupPrimitive) {
    out.push_str("<g");
    if let Some(class) = &group.class {
        let _ = write!(out, r#" class="{}""#, escape_xml(class));
    }
    if let Some(clip) = &group.clip_path {
        let _ = write!(out, r#" clip-path="url(#{})""#, escape_xml(clip));
    }
    out.push('>');
    for child in &group.children {
        write_primitive(out, child);
    }
    out.push_str("</g>");
}

fn write_path(out: &mut String, path: &PathPrimitive) {
    let _ = write!(out, r#"<path d="{}""#, path.data.to_svg_d());
    match path.fill {
        Some(fill) => write_paint(out, "fill", fill),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &path.stroke {
        write_stroke(out, stroke);
    }
    out.push_str("/>");
}

fn write_rect(out: &mut String, rect: &RectPrimitive) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        format_coordinate(rect.x),
        format_coordinate(rect.y),
        format_coordinate(rect.width),
        format_coordinate(rect.height),
    );
    match rect.fill {
        Some(fill) => write_paint(out, "fill", fill),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &rect.stroke {
        write_stroke(out, stroke);
    }
    out.push_str("/>");
}

fn write_text(out: &mut String, text: &TextPrimitive) {
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" text-anchor="{}""#,
        format_coordinate(text.x),
        format_coordinate(text.y),
        format_coordinate(text.font_size_px),
        text.h_align.svg_anchor(),
    );
    if let Some(family) = &text.font_family {
        let _ = write!(out, r#" font-family="{}""#, escape_xml(family));
    }
    if text.rotation != 0.0 {
        let _ = write!(
            out,
            r#" transform="rotate({} {} {})""#,
            format_coordinate(text.rotation),
            format_coordinate(text.x),
            format_coordinate(text.y),
        );
    }
    write_paint(out, "fill", text.color);
    out.push('>');
    out.push_str(&escape_xml(&text.text));
    out.push_str("</text>");
}

fn write_stroke(out: &mut String, stroke: &LineStrokeStyle) {
    write_paint(out, "stroke", stroke.color);
    let _ = write!(out, r#" stroke-width="{}""#, format_coordinate(stroke.width));
    if let Some(dash) = &stroke.dash {
        let _ = write!(out, r#" stroke-dasharray="{}""#, escape_xml(dash));
    }
}

fn write_paint(out: &mut String, attribute: &str, color: Color) {
    let _ = write!(out, r#" {attribute}="{}""#, color.to_svg());
    if color.alpha < 1.0 {
        let _ = write!(
            out,
            r#" {attribute}-opacity="{}""#,
            format_coordinate(color.alpha)
        );
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Viewport;
    use crate::render::{FrameLayer, TextHAlign};

    #[test]
    fn writes_clip_defs_and_escaped_text() {
        let mut frame = RenderFrame::new(Viewport::new(100, 50));
        frame.add_def(ClipPathDef {
            id: "clip1".to_owned(),
            x: 10.0,
            y: 5.0,
            width: 80.0,
            height: 40.5,
        });
        frame.push(
            FrameLayer::Axis,
            TextPrimitive::new("a<b", 10.0, 20.0, 10.0, Color::rgb(0.0, 0.0, 0.0), TextHAlign::Center),
        );

        let mut renderer = SvgFragmentRenderer::new();
        renderer.render(&frame).expect("valid frame");
        let svg = renderer.output();
        assert!(svg.contains(r#"<clipPath id="clip1"><rect x="10" y="5" width="80" height="40.5"/>"#));
        assert!(svg.contains(r##"text-anchor="middle" fill="#000000">a&lt;b</text>"##));
    }
}
