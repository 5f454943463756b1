use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::{Axis, AxisOrientation, Padding, SeriesSource};
use crate::error::{ChartError, ChartResult};
use crate::render::ClipPathDef;

use super::axis_ends::AxisEnds;
use super::config::GridGraphConfig;
use super::dataset_axes::assign_dataset_axes;
use super::label_adjustment::PaddingReport;
use super::text_measure::{HeuristicTextMeasurer, TextMeasurer};

/// Lifecycle of one graph layout. Each stage runs once, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GraphStage {
    Uninitialized,
    EndsComputed,
    PaddingConverged,
    AxesBuilt,
    GridComputed,
}

/// Axis layout and grid drawing for charts plotted on X/Y grids.
///
/// The graph borrows its value series and owns the axes it builds from it.
/// Coordinate queries are available once [`GridGraph::build_axes`] (or
/// [`GridGraph::prepare`]) has run.
pub struct GridGraph<'a> {
    pub(super) config: GridGraphConfig,
    pub(super) values: &'a dyn SeriesSource,
    pub(super) measurer: Box<dyn TextMeasurer>,
    pub(super) stage: GraphStage,
    pub(super) dataset_axes: IndexMap<usize, usize>,
    pub(super) ends: Option<AxisEnds>,
    pub(super) padding: Padding,
    pub(super) grid_width: f64,
    pub(super) grid_height: f64,
    pub(super) y_axis_positions: Vec<f64>,
    pub(super) x_axes: Vec<Option<Axis<'a>>>,
    pub(super) y_axes: Vec<Option<Axis<'a>>>,
    pub(super) main_x_axis: usize,
    pub(super) main_y_axis: usize,
    pub(super) padding_report: Option<PaddingReport>,
    pub(super) grid_limit: f64,
    pub(super) grid_clip: Option<ClipPathDef>,
}

impl<'a> GridGraph<'a> {
    pub fn new(config: GridGraphConfig, values: &'a dyn SeriesSource) -> ChartResult<Self> {
        config.validate()?;
        let dataset_axes = assign_dataset_axes(&config, values)?;
        let main_y_axis = usize::from(config.axis_right);
        let padding = config.padding;
        let width = f64::from(config.viewport.width);
        let height = f64::from(config.viewport.height);

        Ok(Self {
            config,
            values,
            measurer: Box::new(HeuristicTextMeasurer),
            stage: GraphStage::Uninitialized,
            dataset_axes,
            ends: None,
            padding,
            grid_width: width - padding.left - padding.right,
            grid_height: height - padding.top - padding.bottom,
            y_axis_positions: Vec::new(),
            x_axes: Vec::new(),
            y_axes: Vec::new(),
            main_x_axis: 0,
            main_y_axis,
            padding_report: None,
            grid_limit: 0.0,
            grid_clip: None,
        })
    }

    /// Replaces the label measurer used for padding. Only effective before
    /// padding has been computed.
    #[must_use]
    pub fn with_text_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    #[must_use]
    pub fn stage(&self) -> GraphStage {
        self.stage
    }

    #[must_use]
    pub fn config(&self) -> &GridGraphConfig {
        &self.config
    }

    #[must_use]
    pub fn values(&self) -> &'a dyn SeriesSource {
        self.values
    }

    /// Current padding; final once the padding stage has run.
    #[must_use]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    #[must_use]
    pub fn grid_width(&self) -> f64 {
        self.grid_width
    }

    #[must_use]
    pub fn grid_height(&self) -> f64 {
        self.grid_height
    }

    #[must_use]
    pub fn padding_report(&self) -> Option<PaddingReport> {
        self.padding_report
    }

    /// Offsets of each Y axis from the left grid edge.
    #[must_use]
    pub fn y_axis_positions(&self) -> &[f64] {
        &self.y_axis_positions
    }

    #[must_use]
    pub fn main_y_axis(&self) -> usize {
        self.main_y_axis
    }

    pub(super) fn width(&self) -> f64 {
        f64::from(self.config.viewport.width)
    }

    pub(super) fn height(&self) -> f64 {
        f64::from(self.config.viewport.height)
    }

    /// Computes the value and key range of every axis.
    pub fn compute_axis_ends(&mut self) -> ChartResult<AxisEnds> {
        if let Some(ends) = &self.ends {
            return Ok(ends.clone());
        }
        let ends = self.resolve_axis_ends()?;
        debug!(
            x_axes = ends.x.len(),
            y_axes = ends.y.len(),
            "grid graph axis ends computed"
        );
        self.ends = Some(ends.clone());
        self.stage = self.stage.max(GraphStage::EndsComputed);
        Ok(ends)
    }

    /// Grows padding until the axis labels fit.
    pub fn adjust_padding(&mut self) -> ChartResult<PaddingReport> {
        if let Some(report) = self.padding_report {
            return Ok(report);
        }
        let ends = self.compute_axis_ends()?;
        let report = self.label_adjustment(&ends)?;
        self.grid_width = self.width() - self.padding.left - self.padding.right;
        self.grid_height = self.height() - self.padding.top - self.padding.bottom;
        self.padding_report = Some(report);
        self.stage = self.stage.max(GraphStage::PaddingConverged);
        debug!(
            iterations = report.iterations,
            converged = report.converged,
            left = self.padding.left,
            right = self.padding.right,
            top = self.padding.top,
            bottom = self.padding.bottom,
            "grid graph padding settled"
        );
        Ok(report)
    }

    /// Builds the final axes for the settled grid size.
    pub fn build_axes(&mut self) -> ChartResult<()> {
        if self.stage >= GraphStage::AxesBuilt {
            return Ok(());
        }
        self.adjust_padding()?;
        let ends = self.compute_axis_ends()?;
        let (x_axes, y_axes) = self.create_axes(&ends, self.grid_width, self.grid_height)?;

        let x_unit = x_axes
            .get(self.main_x_axis)
            .and_then(Option::as_ref)
            .map_or(0.0, Axis::unit);
        self.grid_limit = 0.01 + self.grid_width;
        if self.config.label_centre {
            self.grid_limit -= x_unit * 0.5;
        }

        self.x_axes = x_axes;
        self.y_axes = y_axes;
        self.stage = GraphStage::AxesBuilt;
        debug!(
            grid_width = self.grid_width,
            grid_height = self.grid_height,
            grid_limit = self.grid_limit,
            "grid graph axes built"
        );
        Ok(())
    }

    /// Validates grid spacing on every axis.
    pub fn compute_grid(&mut self) -> ChartResult<()> {
        if self.stage >= GraphStage::GridComputed {
            return Ok(());
        }
        self.build_axes()?;
        for axis in self.x_axes.iter_mut().chain(self.y_axes.iter_mut()).flatten() {
            axis.prepare_grid()?;
        }
        self.stage = GraphStage::GridComputed;
        debug!("grid graph grid computed");
        Ok(())
    }

    /// Runs every remaining stage.
    pub fn prepare(&mut self) -> ChartResult<()> {
        self.compute_grid()
    }

    pub(super) fn require_axes(&self) -> ChartResult<()> {
        if self.stage < GraphStage::AxesBuilt {
            return Err(ChartError::AxesNotBuilt);
        }
        Ok(())
    }

    /// An axis by number, or the main axis for `None`. Returns `None` when the
    /// axis does not exist or axes are not built yet.
    #[must_use]
    pub fn axis(&self, orientation: AxisOrientation, index: Option<usize>) -> Option<&Axis<'a>> {
        let (axes, main) = self.axes_of(orientation);
        axes.get(index.unwrap_or(main))?.as_ref()
    }

    /// Like [`GridGraph::axis`] but a placeholder resolves to the main axis
    /// and a missing axis is an error.
    pub(super) fn resolve_axis(
        &self,
        orientation: AxisOrientation,
        index: Option<usize>,
    ) -> ChartResult<&Axis<'a>> {
        self.require_axes()?;
        let (axes, main) = self.axes_of(orientation);
        let index = index.unwrap_or(main);
        let not_found = ChartError::AxisNotFound {
            axis: orientation,
            index,
        };
        match axes.get(index) {
            None => Err(not_found),
            Some(Some(axis)) => Ok(axis),
            Some(None) => axes.get(main).and_then(Option::as_ref).ok_or(not_found),
        }
    }

    fn axes_of(&self, orientation: AxisOrientation) -> (&[Option<Axis<'a>>], usize) {
        match orientation {
            AxisOrientation::Horizontal => (&self.x_axes, self.main_x_axis),
            AxisOrientation::Vertical => (&self.y_axes, self.main_y_axis),
        }
    }
}

impl fmt::Debug for GridGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridGraph")
            .field("stage", &self.stage)
            .field("dataset_axes", &self.dataset_axes)
            .field("padding", &self.padding)
            .field("grid_width", &self.grid_width)
            .field("grid_height", &self.grid_height)
            .field("y_axis_positions", &self.y_axis_positions)
            .field("x_axes", &self.x_axes)
            .field("y_axes", &self.y_axes)
            .finish_non_exhaustive()
    }
}
