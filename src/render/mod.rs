mod frame;
mod null_renderer;
mod primitives;
mod svg_fragment;

pub use frame::{FrameLayer, LayerPrimitives, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    ClipPathDef, Color, GroupPrimitive, LineStrokeStyle, PathCommand, PathData, PathPrimitive,
    Primitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use svg_fragment::SvgFragmentRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from axis layout.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
