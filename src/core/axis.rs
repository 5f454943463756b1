use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::core::axis_datetime::{self, TimeStep};
use crate::core::axis_division::{find_subdivision, is_integral, linear_division};
use crate::core::axis_fixed::fixed_division;
use crate::core::axis_log::{LogDivision, log_base, log_division, log_subdivisions};
use crate::core::grid_point::GridPoint;
use crate::core::number::{NumberStyle, format_with_units};
use crate::core::values::{DataItem, SeriesSource};
use crate::error::{ChartError, ChartResult};

/// Upper bound on the grid points one axis may produce.
pub const MAX_GRID_POINTS: f64 = 10_000.0;

/// Label override: receives the axis value (a rounded index for associative
/// keys) and the category key at that value, if any.
pub type AxisTextCallback = Arc<dyn Fn(f64, Option<&str>) -> String + Send + Sync + 'static>;

/// How grid point values are turned into label text.
#[derive(Clone, Default)]
pub struct AxisLabelFormat {
    pub units_before: String,
    pub units_after: String,
    pub decimal_digits: Option<usize>,
    pub number_style: NumberStyle,
    pub callback: Option<AxisTextCallback>,
}

impl AxisLabelFormat {
    #[must_use]
    pub fn with_units(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.units_before = before.into();
        self.units_after = after.into();
        self
    }

    #[must_use]
    pub fn with_decimal_digits(mut self, digits: Option<usize>) -> Self {
        self.decimal_digits = digits;
        self
    }

    #[must_use]
    pub fn with_number_style(mut self, style: NumberStyle) -> Self {
        self.number_style = style;
        self
    }

    #[must_use]
    pub fn with_callback(mut self, callback: Option<AxisTextCallback>) -> Self {
        self.callback = callback;
        self
    }
}

impl fmt::Debug for AxisLabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisLabelFormat")
            .field("units_before", &self.units_before)
            .field("units_after", &self.units_after)
            .field("decimal_digits", &self.decimal_digits)
            .field("number_style", &self.number_style)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Division strategy, chosen once when the builder is created.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisKind {
    /// Automatic "nice number" divisions.
    Linear,
    /// Grid lines every `step` data units.
    Fixed { step: f64 },
    /// Logarithmic scale; `divisions` is powers of the base per grid line.
    Log { base: f64, divisions: Option<f64> },
    /// Unix-second keys on calendar boundaries; `step` overrides the ladder
    /// with a step in seconds.
    DateTime {
        text_format: Option<String>,
        step: Option<f64>,
    },
}

/// Mutable axis description. Nothing is computed until [`AxisBuilder::build`].
#[derive(Clone)]
pub struct AxisBuilder<'a> {
    kind: AxisKind,
    length: f64,
    max_value: f64,
    min_value: f64,
    min_unit: f64,
    min_space: f64,
    fit: bool,
    labels: AxisLabelFormat,
    values: Option<&'a dyn SeriesSource>,
    direction: f64,
    rounded_up: bool,
}

impl<'a> AxisBuilder<'a> {
    /// Linear axis over `[min_value, max_value]`.
    ///
    /// A flat or inverted range is only accepted when `min_unit` is non-zero
    /// and the range is flat.
    pub fn new(length: f64, max_value: f64, min_value: f64, min_unit: f64) -> ChartResult<Self> {
        Self::with_kind(AxisKind::Linear, length, max_value, min_value, min_unit)
    }

    pub fn fixed(
        length: f64,
        max_value: f64,
        min_value: f64,
        min_unit: f64,
        step: f64,
    ) -> ChartResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ChartError::InvalidGridDivision(step));
        }
        Self::with_kind(AxisKind::Fixed { step }, length, max_value, min_value, min_unit)
    }

    pub fn log(length: f64, max_value: f64, min_value: f64, base: f64) -> ChartResult<Self> {
        if !base.is_finite() || base <= 1.0 || min_value <= 0.0 {
            return Err(ChartError::InvalidLogRange {
                min: min_value,
                max: max_value,
                base,
            });
        }
        let kind = AxisKind::Log {
            base,
            divisions: None,
        };
        // a flat log range still spans one power of the base
        Self::with_kind(kind, length, max_value, min_value, 1.0)
    }

    /// Date-time axis over Unix seconds; the minimum unit is one second.
    pub fn datetime(length: f64, max_value: f64, min_value: f64) -> ChartResult<Self> {
        let kind = AxisKind::DateTime {
            text_format: None,
            step: None,
        };
        Self::with_kind(kind, length, max_value, min_value, 1.0)
    }

    fn with_kind(
        kind: AxisKind,
        length: f64,
        max_value: f64,
        min_value: f64,
        min_unit: f64,
    ) -> ChartResult<Self> {
        if !max_value.is_finite() || !min_value.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "axis range must be finite: min={min_value}, max={max_value}"
            )));
        }
        // a minimum unit only widens flat ranges, never inverted ones
        if max_value < min_value || (max_value == min_value && min_unit == 0.0) {
            return Err(ChartError::ZeroLengthAxis {
                min: min_value,
                max: max_value,
            });
        }

        Ok(Self {
            kind,
            length,
            max_value,
            min_value,
            min_unit,
            min_space: 0.0,
            fit: false,
            labels: AxisLabelFormat::default(),
            values: None,
            direction: 1.0,
            rounded_up: false,
        })
    }

    #[must_use]
    pub fn with_min_space(mut self, min_space: f64) -> Self {
        self.min_space = min_space;
        self
    }

    /// Requires the divisions to span exactly `[min, max]`.
    #[must_use]
    pub fn with_fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: AxisLabelFormat) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_values(mut self, values: &'a dyn SeriesSource) -> Self {
        self.values = Some(values);
        self
    }

    /// Powers of the base per grid line, for logarithmic axes.
    #[must_use]
    pub fn with_log_divisions(mut self, divisions: Option<f64>) -> Self {
        if let AxisKind::Log { divisions: slot, .. } = &mut self.kind {
            *slot = divisions;
        }
        self
    }

    /// Label pattern and step override, for date-time axes.
    #[must_use]
    pub fn with_datetime_grid(mut self, text_format: Option<String>, step: Option<f64>) -> Self {
        if let AxisKind::DateTime {
            text_format: format_slot,
            step: step_slot,
        } = &mut self.kind
        {
            *format_slot = text_format;
            *step_slot = step;
        }
        self
    }

    /// Leaves room for one more unit at the end of the axis. Idempotent.
    pub fn bar(&mut self) -> &mut Self {
        if !self.rounded_up {
            self.max_value += self.min_unit;
            self.rounded_up = true;
        }
        self
    }

    /// Runs grid points from the far end back towards the start.
    pub fn reverse(&mut self) -> &mut Self {
        self.direction = -1.0;
        self
    }

    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    #[must_use]
    pub fn direction(&self) -> f64 {
        self.direction
    }

    #[must_use]
    pub fn kind(&self) -> &AxisKind {
        &self.kind
    }

    /// Computes the division geometry once and freezes the axis.
    pub fn build(&self) -> ChartResult<Axis<'a>> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "axis length must be positive, got {}",
                self.length
            )));
        }

        let mut min_value = self.min_value;
        let mut max_value = self.max_value;
        if max_value == min_value {
            max_value += self.min_unit;
        }

        let (geometry, scale) = match &self.kind {
            AxisKind::Linear => {
                let division = linear_division(
                    self.length,
                    min_value,
                    max_value,
                    self.min_unit,
                    self.min_space,
                    self.fit,
                );
                let geometry = AxisGeometry {
                    unit_size: division.unit_size,
                    zero: division.zero,
                    grid_spacing: division.grid_spacing,
                    uneven: division.uneven,
                };
                (geometry, AxisScale::Linear)
            }
            AxisKind::Fixed { step } => {
                let division =
                    fixed_division(self.length, min_value, max_value, *step, self.fit)?;
                min_value = division.min_value;
                max_value = division.max_value;
                let geometry = AxisGeometry {
                    unit_size: division.unit_size,
                    zero: division.zero,
                    grid_spacing: division.grid_spacing,
                    uneven: division.uneven,
                };
                (geometry, AxisScale::Linear)
            }
            AxisKind::Log { base, divisions } => {
                let division = log_division(
                    self.length,
                    min_value,
                    max_value,
                    *base,
                    self.min_space,
                    *divisions,
                )?;
                min_value = division.min_value();
                max_value = division.max_value();
                let geometry = AxisGeometry {
                    unit_size: division.unit_size,
                    zero: division.zero,
                    grid_spacing: division.grid_spacing,
                    uneven: division.uneven,
                };
                (geometry, AxisScale::Log(division))
            }
            AxisKind::DateTime { text_format, step } => {
                let range = max_value - min_value;
                let grid = match step {
                    Some(seconds) if !seconds.is_finite() || *seconds <= 0.0 => {
                        return Err(ChartError::InvalidGridDivision(*seconds));
                    }
                    Some(seconds) => DateTimeGrid::Seconds(*seconds),
                    None => DateTimeGrid::Calendar(axis_datetime::choose_step(
                        range,
                        self.length,
                        self.min_space,
                    )),
                };
                let unit_size = self.length / range;
                let geometry = AxisGeometry {
                    unit_size,
                    zero: -min_value * unit_size,
                    grid_spacing: grid.nominal_seconds() * unit_size,
                    uneven: true,
                };
                let scale = AxisScale::DateTime {
                    grid,
                    text_format: text_format.clone(),
                };
                (geometry, scale)
            }
        };

        debug!(
            kind = ?self.kind,
            length = self.length,
            min_value,
            max_value,
            unit_size = geometry.unit_size,
            grid_spacing = geometry.grid_spacing,
            uneven = geometry.uneven,
            "built axis"
        );

        Ok(Axis {
            length: self.length,
            min_value,
            max_value,
            min_unit: self.min_unit,
            direction: self.direction,
            labels: self.labels.clone(),
            values: self.values,
            geometry,
            scale,
            grid_established: false,
        })
    }
}

impl fmt::Debug for AxisBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisBuilder")
            .field("kind", &self.kind)
            .field("length", &self.length)
            .field("max_value", &self.max_value)
            .field("min_value", &self.min_value)
            .field("min_unit", &self.min_unit)
            .field("min_space", &self.min_space)
            .field("fit", &self.fit)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// Derived scale of a built axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisGeometry {
    /// Pixels per data unit (per power of the base on log axes).
    pub unit_size: f64,
    /// Pixel offset of value 0 (value 1 on log axes).
    pub zero: f64,
    pub grid_spacing: f64,
    /// Divisions do not tile the length; a closing point is added at the end.
    pub uneven: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DateTimeGrid {
    Calendar(TimeStep),
    Seconds(f64),
}

impl DateTimeGrid {
    fn nominal_seconds(self) -> f64 {
        match self {
            Self::Calendar(step) => step.nominal_seconds(),
            Self::Seconds(seconds) => seconds,
        }
    }

    fn label_format(self) -> &'static str {
        match self {
            Self::Calendar(step) => step.label_format(),
            Self::Seconds(seconds) => axis_datetime::seconds_label_format(seconds),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum AxisScale {
    Linear,
    Log(LogDivision),
    DateTime {
        grid: DateTimeGrid,
        text_format: Option<String>,
    },
}

/// Built axis: an immutable value-to-pixel mapping with grid output.
#[derive(Clone)]
pub struct Axis<'a> {
    length: f64,
    min_value: f64,
    max_value: f64,
    min_unit: f64,
    direction: f64,
    labels: AxisLabelFormat,
    values: Option<&'a dyn SeriesSource>,
    geometry: AxisGeometry,
    scale: AxisScale,
    grid_established: bool,
}

impl<'a> Axis<'a> {
    /// Pixel offset from the axis start of `index`, or of the item's key
    /// when the series has numeric keys. `None` for non-numeric input.
    #[must_use]
    pub fn position(&self, index: f64, item: Option<&DataItem>) -> Option<f64> {
        let value = match (item, self.values) {
            (Some(item), Some(values)) if !values.associative_keys() => item.key.as_number()?,
            (Some(item), None) => item.key.as_number()?,
            _ => index,
        };
        self.position_of_value(value)
    }

    /// Position of an associative key, by its index in dataset 0.
    #[must_use]
    pub fn position_by_key(&self, key: &str) -> Option<f64> {
        let index = self.values?.position_of_key(key)?;
        self.position_of_value(index as f64)
    }

    fn position_of_value(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self.scale {
            AxisScale::Log(division) => {
                if value <= 0.0 {
                    return None;
                }
                Some(self.geometry.zero + log_base(value, division.base) * self.geometry.unit_size)
            }
            _ => Some(self.geometry.zero + value * self.geometry.unit_size),
        }
    }

    /// Inverse of [`Axis::position`].
    #[must_use]
    pub fn value(&self, position: f64) -> f64 {
        let units = (position - self.geometry.zero) / self.geometry.unit_size;
        match self.scale {
            AxisScale::Log(division) => division.base.powf(units),
            _ => units,
        }
    }

    /// Offset bars and areas grow from.
    #[must_use]
    pub fn origin(&self) -> f64 {
        match self.scale {
            AxisScale::Log(_) => 0.0,
            _ => self.geometry.zero,
        }
    }

    #[must_use]
    pub fn zero(&self) -> f64 {
        self.geometry.zero
    }

    #[must_use]
    pub fn unit(&self) -> f64 {
        self.geometry.unit_size
    }

    #[must_use]
    pub fn uneven(&self) -> bool {
        self.geometry.uneven
    }

    #[must_use]
    pub fn grid_spacing(&self) -> f64 {
        self.geometry.grid_spacing
    }

    #[must_use]
    pub fn geometry(&self) -> AxisGeometry {
        self.geometry
    }

    #[must_use]
    pub fn direction(&self) -> f64 {
        self.direction
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn before_units(&self) -> &str {
        &self.labels.units_before
    }

    #[must_use]
    pub fn after_units(&self) -> &str {
        &self.labels.units_after
    }

    #[must_use]
    pub fn is_log(&self) -> bool {
        matches!(self.scale, AxisScale::Log(_))
    }

    /// Validates the projected point count and marks the grid spacing as
    /// established, without producing any points.
    pub fn prepare_grid(&mut self) -> ChartResult<()> {
        self.check_point_count()?;
        self.grid_established = true;
        Ok(())
    }

    fn check_point_count(&self) -> ChartResult<f64> {
        let spacing = self.geometry.grid_spacing;
        let extended = self.length + spacing * 0.5;
        let count = extended / spacing;
        if !spacing.is_finite() || spacing <= 0.0 || count > MAX_GRID_POINTS {
            return Err(ChartError::TooManyGridPoints {
                min: self.min_value,
                max: self.max_value,
                count,
                spacing,
            });
        }
        Ok(extended)
    }

    /// Grid points from axis start to end, offset by `start` and ordered along
    /// the axis direction.
    pub fn grid_points(&self, start: f64) -> ChartResult<Vec<GridPoint>> {
        let extended = self.check_point_count()?;
        let mut points = match &self.scale {
            AxisScale::DateTime { grid, text_format } => {
                self.datetime_points(start, *grid, text_format.as_deref())
            }
            _ => self.division_points(start, extended),
        };

        if self.direction < 0.0 {
            points.sort_by(|a, b| b.position.total_cmp(&a.position));
        } else {
            points.sort_by(|a, b| a.position.total_cmp(&b.position));
        }
        Ok(points)
    }

    fn division_points(&self, start: f64, extended: f64) -> Vec<GridPoint> {
        let spacing = self.geometry.grid_spacing;
        let mut points = Vec::new();
        let mut count = 0.0;
        let mut pos = 0.0;
        while pos < extended {
            let value = snap_value(self.value(pos));
            points.push(GridPoint::new(
                start + self.direction * pos,
                self.text_for(value),
                value,
            ));
            count += 1.0;
            pos = count * spacing;
        }

        if self.geometry.uneven {
            let value = snap_value(self.value(self.length));
            points.push(GridPoint::new(
                start + self.direction * self.length,
                self.text_for(value),
                value,
            ));
        }
        points
    }

    fn datetime_points(
        &self,
        start: f64,
        grid: DateTimeGrid,
        text_format: Option<&str>,
    ) -> Vec<GridPoint> {
        let limit = MAX_GRID_POINTS as usize;
        let inner = match grid {
            DateTimeGrid::Calendar(step) => {
                axis_datetime::boundaries(self.min_value, self.max_value, step, limit)
            }
            DateTimeGrid::Seconds(seconds) => {
                let mut values = Vec::new();
                let mut value = self.min_value + seconds;
                while value < self.max_value && values.len() < limit {
                    values.push(value);
                    value += seconds;
                }
                values
            }
        };

        let pattern = text_format.unwrap_or_else(|| grid.label_format());
        let mut values = Vec::with_capacity(inner.len() + 2);
        values.push(self.min_value);
        values.extend(
            inner
                .into_iter()
                .filter(|value| *value > self.min_value && *value < self.max_value),
        );
        values.push(self.max_value);

        values
            .into_iter()
            .map(|value| {
                let pos = self.geometry.zero + value * self.geometry.unit_size;
                let text = self
                    .override_text(value)
                    .unwrap_or_else(|| axis_datetime::format_timestamp(value, pattern));
                GridPoint::new(start + self.direction * pos, text, value)
            })
            .collect()
    }

    /// Label text for a grid value.
    #[must_use]
    pub fn text_for(&self, value: f64) -> String {
        if let Some(text) = self.override_text(value) {
            return text;
        }
        format_with_units(
            value,
            self.labels.decimal_digits,
            &self.labels.units_before,
            &self.labels.units_after,
            &self.labels.number_style,
        )
    }

    /// Structured item text, then a differing category key, then the callback.
    fn override_text(&self, value: f64) -> Option<String> {
        let key = match self.values {
            Some(values) => {
                if let Some(text) = values.axis_text_for(value) {
                    return Some(text);
                }
                values.key_for(value)
            }
            None => None,
        };

        if let Some(key) = &key {
            return Some(key.clone());
        }

        let callback = self.labels.callback.as_ref()?;
        let associative = self.values.is_some_and(|values| values.associative_keys());
        let value = if associative { value.round() } else { value };
        let key = if associative {
            self.values.and_then(|values| values.key_for(value))
        } else {
            None
        };
        Some(callback(value, key.as_deref()))
    }

    /// Minor tick points between the major grid lines.
    ///
    /// `fixed` is a sub-interval in data units. Fails until
    /// [`Axis::prepare_grid`] has run.
    pub fn grid_subdivisions(
        &self,
        min_space: f64,
        min_unit: f64,
        start: f64,
        fixed: Option<f64>,
    ) -> ChartResult<Vec<GridPoint>> {
        if !self.grid_established || self.geometry.grid_spacing <= 0.0 {
            return Err(ChartError::GridSpacingNotSet);
        }

        let offsets = match &self.scale {
            AxisScale::Log(division) => log_subdivisions(division, min_space.max(1.0)),
            AxisScale::DateTime { .. } => self.datetime_subdivisions(min_space, min_unit, fixed)?,
            AxisScale::Linear => self.linear_subdivisions(min_space, min_unit, fixed),
        };

        Ok(offsets
            .into_iter()
            .filter(|pos| *pos > 0.0 && *pos < self.length)
            .map(|pos| GridPoint::unlabelled(start + pos * self.direction))
            .collect())
    }

    fn linear_subdivisions(&self, min_space: f64, min_unit: f64, fixed: Option<f64>) -> Vec<f64> {
        let grid = self.geometry.grid_spacing;
        let Some(spacing) =
            find_subdivision(grid, self.geometry.unit_size, min_space, min_unit, fixed)
        else {
            return Vec::new();
        };
        if spacing <= 0.0 || grid / spacing > MAX_GRID_POINTS {
            return Vec::new();
        }

        let mut offsets = Vec::new();
        let mut division = 0.0;
        let mut base = 0.0;
        while base + spacing < self.length {
            let mut step = 1.0;
            let mut offset = spacing;
            while offset < grid && !is_integral(offset / grid) {
                offsets.push(base + offset);
                step += 1.0;
                offset = step * spacing;
            }
            division += 1.0;
            base = division * grid;
        }
        offsets
    }

    fn datetime_subdivisions(
        &self,
        min_space: f64,
        min_unit: f64,
        fixed: Option<f64>,
    ) -> ChartResult<Vec<f64>> {
        let majors = self.grid_points(0.0)?;
        let mut positions: Vec<f64> = majors
            .iter()
            .map(|point| point.position * self.direction)
            .collect();
        positions.sort_by(f64::total_cmp);

        let min_gap = min_space.max(min_unit * self.geometry.unit_size);
        let mut offsets = Vec::new();
        for pair in positions.windows(2) {
            let gap = pair[1] - pair[0];
            if let Some(seconds) = fixed {
                let spacing = seconds * self.geometry.unit_size;
                if spacing <= 0.0 || gap / spacing > MAX_GRID_POINTS {
                    continue;
                }
                let mut offset = spacing;
                while offset < gap {
                    offsets.push(pair[0] + offset);
                    offset += spacing;
                }
                continue;
            }

            if let Some(pieces) = [4.0, 3.0, 2.0]
                .into_iter()
                .find(|pieces| gap / pieces >= min_gap)
            {
                let spacing = gap / pieces;
                let mut piece = 1.0;
                while piece < pieces {
                    offsets.push(pair[0] + piece * spacing);
                    piece += 1.0;
                }
            }
        }
        Ok(offsets)
    }

    /// Minimum unit the axis was built with.
    #[must_use]
    pub fn min_unit(&self) -> f64 {
        self.min_unit
    }
}

impl fmt::Debug for Axis<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Axis")
            .field("length", &self.length)
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("direction", &self.direction)
            .field("geometry", &self.geometry)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

/// Snaps values within float noise of an integer to that integer.
#[must_use]
pub fn snap_value(value: f64) -> f64 {
    if is_integral(value) {
        let rounded = value.round();
        if rounded == 0.0 { 0.0 } else { rounded }
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::values::ValueSeries;

    #[test]
    fn labels_prefer_item_text_then_keys_then_callback() {
        let series = ValueSeries::from_labelled(&[("mon", 1.0), ("tue", 2.0), ("wed", 3.0)]);
        let callback: AxisTextCallback = Arc::new(|value, key| format!("{value}:{key:?}"));
        let mut builder = AxisBuilder::new(300.0, 2.0, 0.0, 1.0)
            .expect("valid range")
            .with_values(&series)
            .with_labels(AxisLabelFormat::default().with_callback(Some(callback)));
        builder.bar();
        let axis = builder.build().expect("axis builds");

        assert_eq!(axis.text_for(1.0), "tue");
        // past the keys the callback sees a rounded index
        assert_eq!(axis.text_for(2.6), "3:None");
    }

    #[test]
    fn inverted_range_is_rejected_whatever_the_minimum_unit() {
        assert!(matches!(
            AxisBuilder::new(200.0, 1.0, 5.0, 1.0),
            Err(ChartError::ZeroLengthAxis { min, max }) if min == 5.0 && max == 1.0
        ));
        // a flat range is widened by the minimum unit instead
        assert!(AxisBuilder::new(200.0, 5.0, 5.0, 1.0).is_ok());
        assert!(AxisBuilder::new(200.0, 5.0, 5.0, 0.0).is_err());
    }

    #[test]
    fn numeric_labels_use_units() {
        let axis = AxisBuilder::new(200.0, 100.0, 0.0, 0.0)
            .expect("valid range")
            .with_labels(AxisLabelFormat::default().with_units("$", "k"))
            .build()
            .expect("axis builds");
        assert_eq!(axis.text_for(20.0), "$20k");
    }

    #[test]
    fn subdivisions_need_prepared_grid() {
        let mut axis = AxisBuilder::new(200.0, 10.0, 0.0, 0.0)
            .expect("valid range")
            .with_min_space(20.0)
            .build()
            .expect("axis builds");
        assert!(matches!(
            axis.grid_subdivisions(5.0, 0.0, 0.0, None),
            Err(ChartError::GridSpacingNotSet)
        ));
        axis.prepare_grid().expect("grid fits");
        let minors = axis
            .grid_subdivisions(5.0, 0.0, 0.0, None)
            .expect("grid prepared");
        assert!(!minors.is_empty());
    }

    #[test]
    fn snap_value_removes_float_noise() {
        assert_eq!(snap_value(2.999_999_999_999_9), 3.0);
        assert_eq!(snap_value(-0.000_000_000_01), 0.0);
        assert_eq!(snap_value(0.25), 0.25);
    }
}
