use crate::core::axis_division::is_integral;
use crate::error::{ChartError, ChartResult};

/// Geometry of an axis with a caller-chosen grid step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDivision {
    pub min_value: f64,
    pub max_value: f64,
    pub unit_size: f64,
    pub zero: f64,
    pub grid_spacing: f64,
    pub uneven: bool,
}

/// Lays out grid lines every `step` data units.
///
/// Unless `fit` is set the range is widened outward to whole steps, so the
/// divisions always tile the axis and zero sits on a grid line.
pub fn fixed_division(
    length: f64,
    min_value: f64,
    max_value: f64,
    step: f64,
    fit: bool,
) -> ChartResult<FixedDivision> {
    if !step.is_finite() || step <= 0.0 {
        return Err(ChartError::InvalidGridDivision(step));
    }

    let (min_value, mut max_value) = if fit {
        (min_value, max_value)
    } else {
        (
            snap_down(min_value / step) * step,
            snap_up(max_value / step) * step,
        )
    };
    if max_value <= min_value {
        max_value = min_value + step;
    }

    let scale = max_value - min_value;
    let unit_size = length / scale;
    Ok(FixedDivision {
        min_value,
        max_value,
        unit_size,
        zero: -min_value * unit_size,
        grid_spacing: step * unit_size,
        uneven: !is_integral(scale / step),
    })
}

fn snap_down(value: f64) -> f64 {
    if is_integral(value) {
        value.round()
    } else {
        value.floor()
    }
}

fn snap_up(value: f64) -> f64 {
    if is_integral(value) {
        value.round()
    } else {
        value.ceil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_snaps_outward_to_steps() {
        let division = fixed_division(300.0, -3.0, 17.0, 5.0, false).expect("valid step");
        assert_eq!(division.min_value, -5.0);
        assert_eq!(division.max_value, 20.0);
        assert!(!division.uneven);
        assert!((division.grid_spacing - 60.0).abs() < 1e-9);
        assert!((division.zero - 60.0).abs() < 1e-9);
    }

    #[test]
    fn fitted_range_may_be_uneven() {
        let division = fixed_division(90.0, 0.0, 9.0, 2.0, true).expect("valid step");
        assert!(division.uneven);
        assert!((division.grid_spacing - 20.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_step_is_rejected() {
        assert!(matches!(
            fixed_division(100.0, 0.0, 10.0, 0.0, false),
            Err(ChartError::InvalidGridDivision(_))
        ));
    }
}
