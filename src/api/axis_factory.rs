use tracing::debug;

use crate::core::{Axis, AxisBuilder, AxisLabelFormat, AxisOrientation};
use crate::error::{ChartError, ChartResult};

use super::GridGraph;
use super::axis_ends::{AxisEnds, AxisRange};
use super::config::{per_axis, resolve};

pub(super) type AxisSet<'a> = (Vec<Option<Axis<'a>>>, Vec<Option<Axis<'a>>>);

impl<'a> GridGraph<'a> {
    /// Builds X and Y axes for the given axis lengths.
    ///
    /// Y slots below the default axis number are left empty so axis numbers
    /// index the vector directly.
    pub(super) fn create_axes(&self, ends: &AxisEnds, x_len: f64, y_len: f64) -> ChartResult<AxisSet<'a>> {
        let mut x_axes = Vec::with_capacity(self.x_axis_count());
        for index in 0..self.x_axis_count() {
            let range = ends.x.get(index).copied().unwrap_or(AxisRange {
                min: None,
                max: None,
            });
            x_axes.push(Some(self.x_axis(index, range, x_len)?));
        }

        let numbers = self.y_axis_numbers();
        let mut y_axes: Vec<Option<Axis<'a>>> = (0..numbers.start).map(|_| None).collect();
        for index in numbers {
            let range = ends.y_range(index).unwrap_or(AxisRange {
                min: None,
                max: None,
            });
            y_axes.push(Some(self.y_axis(index, range, y_len)?));
        }
        Ok((x_axes, y_axes))
    }

    fn x_axis(&self, index: usize, range: AxisRange, length: f64) -> ChartResult<Axis<'a>> {
        let config = &self.config;
        let mut min_space = resolve(
            per_axis(&config.minimum_grid_spacing_h, index),
            None,
            config.minimum_grid_spacing,
        );
        let division = per_axis(&config.grid_division_h, index);
        if let Some(step) = division {
            if step <= 0.0 {
                return Err(ChartError::InvalidGridDivision(step));
            }
            min_space = 1.0;
        }

        let (Some(min), Some(max)) = (range.min, range.max) else {
            return Err(ChartError::NonNumericAxisRange {
                axis: AxisOrientation::Horizontal,
                index,
            });
        };

        // category labels carry no units
        let (before, after) = if self.values.associative_keys() {
            (String::new(), String::new())
        } else {
            (
                per_axis(&config.units_before_x, index).unwrap_or_default(),
                per_axis(&config.units_x, index).unwrap_or_default(),
            )
        };
        let callback = resolve(
            config.axis_text_callback_x.as_ref().map(Some),
            Some(config.axis_text_callback.as_ref()),
            None,
        )
        .map(|callback| callback.0.clone());
        let labels = AxisLabelFormat::default()
            .with_units(before, after)
            .with_decimal_digits(resolve(
                per_axis(&config.decimal_digits_x, index).map(Some),
                Some(config.decimal_digits),
                None,
            ))
            .with_number_style(config.number_style.clone())
            .with_callback(callback);

        let builder = if config.datetime_keys {
            AxisBuilder::datetime(length, max, min)?
                .with_datetime_grid(config.datetime_text_format.clone(), division)
        } else if let Some(step) = division {
            AxisBuilder::fixed(length, max, min, 1.0, step)?
        } else {
            AxisBuilder::new(length, max, min, 1.0)?.with_fit(true)
        };
        let mut builder = builder
            .with_min_space(min_space)
            .with_labels(labels)
            .with_values(self.values);
        if config.label_centre {
            builder.bar();
        }
        debug!(index, min, max, length, "building x axis");
        builder.build()
    }

    fn y_axis(&self, index: usize, range: AxisRange, length: f64) -> ChartResult<Axis<'a>> {
        let config = &self.config;
        let option = self.y_option_index(index);
        let mut min_space = resolve(
            per_axis(&config.minimum_grid_spacing_v, option),
            None,
            config.minimum_grid_spacing,
        );
        let division = per_axis(&config.grid_division_v, option);
        if let Some(step) = division {
            if step <= 0.0 {
                return Err(ChartError::InvalidGridDivision(step));
            }
            min_space = 1.0;
        }

        let (Some(min), Some(mut max)) = (range.min, range.max) else {
            return Err(ChartError::NonNumericAxisRange {
                axis: AxisOrientation::Vertical,
                index,
            });
        };

        let min_unit = per_axis(&config.minimum_units_y, option).unwrap_or(0.0);
        if min == max {
            max += if min_unit > 0.0 {
                min_unit
            } else if config.axis_fallback_max > 0.0 {
                config.axis_fallback_max
            } else {
                1.0
            };
        }

        let callback = resolve(
            config.axis_text_callback_y.as_ref().map(Some),
            Some(config.axis_text_callback.as_ref()),
            None,
        )
        .map(|callback| callback.0.clone());
        let labels = AxisLabelFormat::default()
            .with_units(
                per_axis(&config.units_before_y, option).unwrap_or_default(),
                per_axis(&config.units_y, option).unwrap_or_default(),
            )
            .with_decimal_digits(resolve(
                per_axis(&config.decimal_digits_y, option).map(Some),
                Some(config.decimal_digits),
                None,
            ))
            .with_number_style(config.number_style.clone())
            .with_callback(callback);

        let builder = if per_axis(&config.log_axis_y, option).unwrap_or(false) {
            let base = per_axis(&config.log_axis_y_base, option).unwrap_or(10.0);
            AxisBuilder::log(length, max, min, base)?.with_log_divisions(division)
        } else if let Some(step) = division {
            AxisBuilder::fixed(length, max, min, min_unit, step)?
        } else {
            AxisBuilder::new(length, max, min, min_unit)?
        };
        let mut builder = builder.with_min_space(min_space).with_labels(labels);
        // grid points run from the bottom of the grid upwards
        builder.reverse();
        debug!(index, min, max, length, min_unit, "building y axis");
        builder.build()
    }
}
