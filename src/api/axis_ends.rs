use crate::core::AxisOrientation;
use crate::core::axis_datetime::date_convert;
use crate::error::{ChartError, ChartResult};

use super::GridGraph;
use super::config::{AxisBound, per_axis};

/// Resolved data range of one axis. `None` ends have no numeric source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Ranges of every X axis and every Y axis slot.
///
/// Y slots below the default axis number are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisEnds {
    pub x: Vec<AxisRange>,
    pub y: Vec<Option<AxisRange>>,
}

impl AxisEnds {
    #[must_use]
    pub fn y_range(&self, axis: usize) -> Option<AxisRange> {
        self.y.get(axis).copied().flatten()
    }
}

impl GridGraph<'_> {
    /// Smallest value plotted against Y axis `axis`.
    #[must_use]
    pub fn axis_min_value(&self, axis: usize) -> Option<f64> {
        self.axis_datasets(axis)
            .into_iter()
            .filter_map(|dataset| self.values.min_value(dataset))
            .reduce(f64::min)
    }

    /// Largest value plotted against Y axis `axis`.
    #[must_use]
    pub fn axis_max_value(&self, axis: usize) -> Option<f64> {
        self.axis_datasets(axis)
            .into_iter()
            .filter_map(|dataset| self.values.max_value(dataset))
            .reduce(f64::max)
    }

    fn axis_datasets(&self, axis: usize) -> Vec<usize> {
        if self.y_axis_count() <= 1 {
            self.dataset_axes.keys().copied().collect()
        } else {
            self.datasets_on_axis(axis).collect()
        }
    }

    pub(super) fn resolve_axis_ends(&self) -> ChartResult<AxisEnds> {
        let guides = self.guideline_extrema();
        let numbers = self.y_axis_numbers();
        let mut y = vec![None; numbers.end];

        for axis in numbers {
            let option = self.y_option_index(axis);
            let fixed_min = per_axis(&self.config.axis_min_v, option).and_then(|b| b.as_number());
            let fixed_max = per_axis(&self.config.axis_max_v, option).and_then(|b| b.as_number());
            check_fixed(AxisOrientation::Vertical, fixed_min, fixed_max)?;

            // value axes start at zero unless logarithmic
            let zero = if per_axis(&self.config.log_axis_y, option).unwrap_or(false) {
                None
            } else {
                Some(0.0)
            };
            let min = fixed_min.or_else(|| {
                [self.axis_min_value(axis), guides.min_y, zero]
                    .into_iter()
                    .flatten()
                    .reduce(f64::min)
            });
            let max = fixed_max.or_else(|| {
                [self.axis_max_value(axis), guides.max_y, zero]
                    .into_iter()
                    .flatten()
                    .reduce(f64::max)
            });
            check_resolved(AxisOrientation::Vertical, min, max)?;
            y[axis] = Some(AxisRange { min, max });
        }

        let mut x = Vec::with_capacity(self.x_axis_count());
        for axis in 0..self.x_axis_count() {
            let bound_min = per_axis(&self.config.axis_min_h, axis);
            let bound_max = per_axis(&self.config.axis_max_h, axis);

            let range = if self.config.datetime_keys {
                let max = match datetime_bound(bound_max.as_ref())? {
                    // fixed end is inclusive
                    Some(seconds) => Some(seconds - 1.0),
                    None => [self.values.max_key(), guides.max_x]
                        .into_iter()
                        .flatten()
                        .reduce(f64::max),
                };
                let min = match datetime_bound(bound_min.as_ref())? {
                    Some(seconds) => Some(seconds),
                    None => [self.values.min_key(), guides.min_x]
                        .into_iter()
                        .flatten()
                        .reduce(f64::min),
                };
                AxisRange { min, max }
            } else {
                let fixed_min = bound_min.and_then(|b| b.as_number());
                let fixed_max = bound_max.and_then(|b| b.as_number());
                check_fixed(AxisOrientation::Horizontal, fixed_min, fixed_max)?;
                let max = fixed_max.or_else(|| {
                    [Some(0.0), self.values.max_key(), guides.max_x]
                        .into_iter()
                        .flatten()
                        .reduce(f64::max)
                });
                let min = fixed_min.or_else(|| {
                    [Some(0.0), self.values.min_key(), guides.min_x]
                        .into_iter()
                        .flatten()
                        .reduce(f64::min)
                });
                AxisRange { min, max }
            };
            check_resolved(AxisOrientation::Horizontal, range.min, range.max)?;
            x.push(range);
        }

        Ok(AxisEnds { x, y })
    }
}

fn check_fixed(axis: AxisOrientation, min: Option<f64>, max: Option<f64>) -> ChartResult<()> {
    match (min, max) {
        (Some(min), Some(max)) if max < min => Err(ChartError::InvalidAxisOptions { axis, min, max }),
        _ => Ok(()),
    }
}

fn check_resolved(axis: AxisOrientation, min: Option<f64>, max: Option<f64>) -> ChartResult<()> {
    match (min, max) {
        (Some(min), Some(max)) if max < min => Err(ChartError::InvalidAxisRange { axis, min, max }),
        _ => Ok(()),
    }
}

/// Unix seconds of a fixed date-time axis end; blank text means unset.
fn datetime_bound(bound: Option<&AxisBound>) -> ChartResult<Option<f64>> {
    match bound {
        None => Ok(None),
        Some(AxisBound::Number(seconds)) if seconds.is_finite() => Ok(Some(*seconds)),
        Some(AxisBound::Number(seconds)) => Err(ChartError::DateConversion(seconds.to_string())),
        Some(AxisBound::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(AxisBound::Text(text)) => date_convert(text)
            .map(|seconds| Some(seconds as f64))
            .ok_or_else(|| ChartError::DateConversion(text.clone())),
    }
}
