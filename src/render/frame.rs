use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{ClipPathDef, Primitive};

/// Paint order of the grid graph output, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameLayer {
    Background,
    Grid,
    /// Chart-type series drawn by the caller.
    Series,
    Overlay,
    Crosshair,
    Axis,
}

impl FrameLayer {
    pub const ORDER: [Self; 6] = [
        Self::Background,
        Self::Grid,
        Self::Series,
        Self::Overlay,
        Self::Crosshair,
        Self::Axis,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: FrameLayer,
    pub primitives: Vec<Primitive>,
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub defs: Vec<ClipPathDef>,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let layers = FrameLayer::ORDER
            .into_iter()
            .map(|kind| LayerPrimitives {
                kind,
                primitives: Vec::new(),
            })
            .collect();
        Self {
            viewport,
            defs: Vec::new(),
            layers,
        }
    }

    pub fn push(&mut self, kind: FrameLayer, primitive: impl Into<Primitive>) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.kind == kind) {
            layer.primitives.push(primitive.into());
        }
    }

    #[must_use]
    pub fn with_primitive(mut self, kind: FrameLayer, primitive: impl Into<Primitive>) -> Self {
        self.push(kind, primitive);
        self
    }

    /// Adds a clip definition unless one with the same id exists.
    pub fn add_def(&mut self, def: ClipPathDef) {
        if !self.defs.iter().any(|existing| existing.id == def.id) {
            self.defs.push(def);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: FrameLayer) -> &[Primitive] {
        self.layers
            .iter()
            .find(|layer| layer.kind == kind)
            .map_or(&[], |layer| layer.primitives.as_slice())
    }

    /// All primitives in paint order.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.layers.iter().flat_map(|layer| layer.primitives.iter())
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for def in &self.defs {
            if def.id.is_empty() || !def.width.is_finite() || !def.height.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "invalid clip path definition `{}`",
                    def.id
                )));
            }
        }
        self.primitives().try_for_each(Primitive::validate)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.primitives.is_empty())
    }
}
