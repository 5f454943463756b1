//! "Nice number" division selection for linear axes.
//!
//! The axis range is split into `count` divisions of `magnitude` units each.
//! The starting magnitude is the power of ten below the range; when the
//! resulting divisions are closer than the minimum spacing, candidate counts
//! are searched downwards for a visually clean multiplier, keeping the zero
//! line on a division boundary for ranges that cross zero.

use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use crate::core::number::round_significant;

/// Multipliers below 10 that still read as round numbers.
const NICE_FRACTIONS: [&str; 7] = ["0.1", "0.2", "0.3", "0.4", "0.5", "1.5", "2.5"];

/// Passes through the division search before falling back to halving.
const DIVISION_RETRIES: u32 = 10;

const INTEGRAL_TOLERANCE: f64 = 1e-9;

/// Division state shared between the search passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Division {
    /// Data units per division.
    pub magnitude: f64,
    /// Number of divisions across the axis.
    pub count: f64,
    /// Divisions below zero, for ranges that cross it.
    pub neg_count: f64,
}

/// Result of the linear division selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDivision {
    pub division: Division,
    /// Pixel distance between grid lines.
    pub grid_spacing: f64,
    /// Pixels per data unit.
    pub unit_size: f64,
    /// Pixel offset of value 0 from the axis start.
    pub zero: f64,
    /// Set when no nice division fitted and the halving fallback was used.
    pub uneven: bool,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    cost: f64,
    increment: f64,
    multiplier: f64,
    magnitude: f64,
    count: f64,
    neg_count: f64,
}

pub(crate) fn is_integral(value: f64) -> bool {
    value.is_finite() && (value - value.round()).abs() <= INTEGRAL_TOLERANCE * value.abs().max(1.0)
}

/// Returns `true` when `n` is a visually clean division multiplier.
#[must_use]
pub fn is_nice(n: f64, min_unit: f64) -> bool {
    if !n.is_finite() {
        return false;
    }
    if n.fract() == 0.0 && n % 5.0 == 0.0 {
        return true;
    }

    if min_unit != 0.0 && !is_integral(n / min_unit) {
        return false;
    }

    let Some(rounded) = round_significant(n, 4) else {
        return false;
    };
    if rounded.fract().is_zero() {
        return true;
    }
    let text = rounded.to_string();
    NICE_FRACTIONS.contains(&text.as_str())
}

/// Picks the cheapest nice division whose spacing is at least `min_space`.
///
/// Leaves `division` untouched when no candidate is acceptable.
pub(crate) fn find_division(
    length: f64,
    min_space: f64,
    fit: bool,
    min_unit: f64,
    division: &mut Division,
) {
    let count = division.count;
    if length / count >= min_space {
        return;
    }

    let max_inc = if fit { 0.0 } else { (count / 5.0).floor() };
    let mut candidates = Vec::new();
    let mut c = count - 1.0;
    let mut inc = 0.0;
    while c > 1.0 {
        let m = (count + inc) / c;
        let l = length / c;
        let mut nc = division.neg_count;

        let mut accept = false;
        if is_nice(m, min_unit) && l >= min_space {
            accept = true;

            // the negative section must also divide cleanly
            if nc != 0.0 {
                accept = false;
                let nm = nc / m;
                if is_integral(nm) {
                    nc = nm.round();
                    accept = true;
                } else {
                    let mut i = 1.0;
                    while i <= inc {
                        let nm = (nc + i) / m;
                        if is_integral(nm) {
                            nc = nm.round();
                            accept = true;
                            break;
                        }
                        i += 1.0;
                    }
                }
            }
        }

        if accept {
            candidates.push(Candidate {
                cost: inc * 1.5 + m,
                increment: inc,
                multiplier: m,
                magnitude: division.magnitude * m,
                count: c,
                neg_count: nc,
            });
        }

        if inc < max_inc {
            inc += 1.0;
            continue;
        }
        c -= 1.0;
        inc = 0.0;
    }

    let Some(winner) = candidates.into_iter().min_by_key(|candidate| {
        (
            OrderedFloat(candidate.cost),
            OrderedFloat(candidate.increment),
            OrderedFloat(candidate.multiplier),
        )
    }) else {
        return;
    };

    division.magnitude = winner.magnitude;
    division.count = winner.count;
    division.neg_count = winner.neg_count;
}

/// Chooses grid divisions for a linear axis.
///
/// `max_value` must already include any minimum-unit extension for flat ranges.
#[must_use]
pub fn linear_division(
    length: f64,
    min_value: f64,
    max_value: f64,
    min_unit: f64,
    min_space: f64,
    fit: bool,
) -> LinearDivision {
    let negative = min_value < 0.0;
    let min_sub = min_space.max(length / 200.0);
    let scale = max_value - min_value;

    let mut magnitude = 10_f64.powf(scale.log10().floor()).max(min_unit);
    let mut count = if min_value > 0.0 || fit {
        (scale / magnitude).ceil()
    } else {
        (max_value / magnitude).ceil() - (min_value / magnitude).floor()
    };

    if count <= 5.0 && magnitude > min_unit {
        magnitude *= 0.1;
        count = (max_value / magnitude).ceil() - (min_value / magnitude).floor();
    }

    let neg_count = if negative {
        (min_value.abs() / magnitude).ceil()
    } else {
        0.0
    };
    let mut division = Division {
        magnitude,
        count,
        neg_count,
    };

    find_division(length, min_sub, fit, min_unit, &mut division);
    let mut grid = length / division.count;

    let mut guard = DIVISION_RETRIES;
    while grid < min_space {
        guard -= 1;
        if guard == 0 {
            break;
        }
        find_division(length, min_sub, fit, min_unit, &mut division);
        grid = length / division.count;
    }

    let mut uneven = false;
    if guard == 0 {
        while grid < min_space && division.count > 1.0 {
            division.count *= 0.5;
            division.neg_count *= 0.5;
            division.magnitude *= 2.0;
            grid = length / division.count;
            uneven = true;
        }
        warn!(
            length,
            min_value,
            max_value,
            count = division.count,
            "no nice axis division fits, using uneven fallback"
        );
    }

    let unit_size = length / (division.magnitude * division.count);
    let zero = if negative {
        division.neg_count * grid
    } else {
        -min_value * grid / division.magnitude
    };
    debug!(
        length,
        magnitude = division.magnitude,
        count = division.count,
        neg_count = division.neg_count,
        grid,
        "selected linear axis division"
    );

    LinearDivision {
        division,
        grid_spacing: grid,
        unit_size,
        zero,
        uneven,
    }
}

/// Finds the subdivision spacing inside one grid division.
///
/// `grid_div` is the grid spacing in pixels; `fixed` is a sub-interval in data
/// units. Returns `None` when the division cannot be split.
#[must_use]
pub fn find_subdivision(
    grid_div: f64,
    unit_size: f64,
    min_space: f64,
    min_unit: f64,
    fixed: Option<f64>,
) -> Option<f64> {
    if let Some(fixed) = fixed {
        return Some(unit_size * fixed);
    }

    // actual division size in data units
    let d = grid_div / unit_size;
    let min_space = min_space.max(min_unit * unit_size);
    if !d.is_finite() || d <= 0.0 || min_space <= 0.0 {
        return None;
    }
    let max_divisions = (grid_div / min_space).floor();
    if max_divisions <= 1.0 {
        return None;
    }

    // scale the division size to an integer in the hundreds
    let d1 = (100.0 * 10_f64.powf(-d.log10().floor()) * d).round();
    let mut divisions = max_divisions;
    while divisions > 1.0 {
        let dq = d1 / divisions;
        if dq - dq.floor() == 0.0 {
            return Some(grid_div / divisions);
        }
        divisions -= 1.0;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_numbers_follow_whitelist() {
        assert!(is_nice(10.0, 0.0));
        assert!(is_nice(2.0, 0.0));
        assert!(is_nice(2.5, 0.0));
        assert!(is_nice(0.2, 0.0));
        assert!(!is_nice(1.25, 0.0));
        assert!(!is_nice(10.0 / 9.0, 0.0));
        assert!(!is_nice(2.5, 1.0));
        assert!(is_nice(3.0, 1.0));
    }

    #[test]
    fn search_keeps_zero_on_a_boundary() {
        let result = linear_division(200.0, -3.0, 7.0, 0.0, 30.0, false);
        let division = result.division;
        assert!(!result.uneven);
        assert_eq!(division.count, 6.0);
        assert_eq!(division.magnitude, 2.0);
        assert_eq!(division.neg_count, 2.0);
        assert!(is_integral(result.zero / result.grid_spacing));
    }

    #[test]
    fn subdivision_uses_largest_clean_divisor() {
        // 50px per 10 units; 5px minimum allows 10 pieces of 1 unit
        let spacing = find_subdivision(50.0, 5.0, 5.0, 0.0, None).expect("subdivides");
        assert!((spacing - 5.0).abs() < 1e-9);
        assert_eq!(find_subdivision(8.0, 1.0, 5.0, 0.0, None), None);
        assert_eq!(find_subdivision(50.0, 5.0, 5.0, 0.0, Some(2.0)), Some(10.0));
    }
}
