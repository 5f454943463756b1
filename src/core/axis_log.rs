use crate::core::axis_division::is_integral;
use crate::error::{ChartError, ChartResult};

/// Geometry of a logarithmic axis.
///
/// `unit_size` is pixels per power of the base and `zero` is the offset of
/// value 1, so `position(v) = zero + log_base(v) * unit_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogDivision {
    pub base: f64,
    /// Exponent at the axis start.
    pub lg_min: f64,
    /// Exponent at the axis end.
    pub lg_max: f64,
    /// Powers of the base between grid lines.
    pub powers_per_line: f64,
    pub unit_size: f64,
    pub zero: f64,
    pub grid_spacing: f64,
    pub uneven: bool,
}

impl LogDivision {
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.base.powf(self.lg_min)
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.base.powf(self.lg_max)
    }
}

/// Logarithm that snaps to exact integers for exact powers of the base.
#[must_use]
pub fn log_base(value: f64, base: f64) -> f64 {
    let lg = value.ln() / base.ln();
    if is_integral(lg) { lg.round() } else { lg }
}

/// Rounds the range outward to whole powers of `base` and picks how many
/// powers each grid line spans.
pub fn log_division(
    length: f64,
    min_value: f64,
    max_value: f64,
    base: f64,
    min_space: f64,
    divisions: Option<f64>,
) -> ChartResult<LogDivision> {
    let invalid = || ChartError::InvalidLogRange {
        min: min_value,
        max: max_value,
        base,
    };
    if !base.is_finite() || base <= 1.0 {
        return Err(invalid());
    }
    if !min_value.is_finite() || !max_value.is_finite() || min_value <= 0.0 {
        return Err(invalid());
    }

    let lg_min = log_base(min_value, base).floor();
    let mut lg_max = log_base(max_value, base).ceil();
    if lg_max <= lg_min {
        lg_max = lg_min + 1.0;
    }
    let powers = lg_max - lg_min;
    let unit_size = length / powers;

    let powers_per_line = match divisions {
        Some(step) if !step.is_finite() || step <= 0.0 => {
            return Err(ChartError::InvalidGridDivision(step));
        }
        Some(step) => step,
        None => {
            let mut step = 1.0;
            while step * unit_size < min_space && step < powers {
                step += 1.0;
            }
            step
        }
    };

    Ok(LogDivision {
        base,
        lg_min,
        lg_max,
        powers_per_line,
        unit_size,
        zero: -lg_min * unit_size,
        grid_spacing: powers_per_line * unit_size,
        uneven: !is_integral(powers / powers_per_line),
    })
}

/// Offsets of the `k * base^e` minor lines, `k = 2..base`, when the
/// narrowest gap still meets `min_space`.
#[must_use]
pub fn log_subdivisions(division: &LogDivision, min_space: f64) -> Vec<f64> {
    let multiples = division.base.floor() as u32;
    if multiples < 3 || division.powers_per_line > 1.0 {
        return power_subdivisions(division);
    }

    let top = f64::from(multiples);
    let narrowest = log_base(top / (top - 1.0), division.base) * division.unit_size;
    if narrowest < min_space {
        return Vec::new();
    }

    let mut offsets = Vec::new();
    let mut exponent = division.lg_min;
    while exponent < division.lg_max {
        for k in 2..multiples {
            let lg = exponent + log_base(f64::from(k), division.base);
            offsets.push(division.zero + lg * division.unit_size);
        }
        exponent += 1.0;
    }
    offsets
}

/// Powers skipped between grid lines that span more than one power.
fn power_subdivisions(division: &LogDivision) -> Vec<f64> {
    if division.powers_per_line <= 1.0 {
        return Vec::new();
    }
    let mut offsets = Vec::new();
    let mut exponent = division.lg_min + 1.0;
    let mut index = 1.0;
    while exponent < division.lg_max {
        if !is_integral(index / division.powers_per_line) {
            offsets.push(division.zero + exponent * division.unit_size);
        }
        exponent += 1.0;
        index += 1.0;
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_rounds_out_to_powers() {
        let division = log_division(300.0, 3.0, 800.0, 10.0, 20.0, None).expect("valid range");
        assert_eq!(division.lg_min, 0.0);
        assert_eq!(division.lg_max, 3.0);
        assert!((division.unit_size - 100.0).abs() < 1e-9);
        assert_eq!(division.powers_per_line, 1.0);
        assert!(!division.uneven);
    }

    #[test]
    fn exact_powers_are_not_widened() {
        assert_eq!(log_base(1000.0, 10.0), 3.0);
        let division = log_division(100.0, 10.0, 1000.0, 10.0, 20.0, None).expect("valid range");
        assert_eq!(division.lg_min, 1.0);
        assert_eq!(division.lg_max, 3.0);
    }

    #[test]
    fn non_positive_minimum_is_rejected() {
        assert!(matches!(
            log_division(100.0, 0.0, 10.0, 10.0, 20.0, None),
            Err(ChartError::InvalidLogRange { .. })
        ));
        assert!(log_division(100.0, 1.0, 10.0, 1.0, 20.0, None).is_err());
    }

    #[test]
    fn minor_lines_need_room() {
        let wide = log_division(600.0, 1.0, 100.0, 10.0, 20.0, None).expect("valid range");
        assert_eq!(log_subdivisions(&wide, 5.0).len(), 16);
        let narrow = log_division(60.0, 1.0, 100.0, 10.0, 20.0, None).expect("valid range");
        assert!(log_subdivisions(&narrow, 5.0).is_empty());
    }
}
