//! grid-graph: axis and grid layout for SVG charts.
//!
//! Picks "nice" axis divisions, grows padding until axis labels fit, maps
//! data values to pixel coordinates and emits backend-agnostic drawing
//! primitives for the grid, axes and guides. Chart types plot their series
//! through the coordinate mappers on [`GridGraph`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{GridGraph, GridGraphConfig};
pub use error::{ChartError, ChartResult};
