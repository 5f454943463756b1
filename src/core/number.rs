use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Significant digits kept when a label is formatted without explicit decimals.
const AUTO_SIGNIFICANT_DIGITS: u32 = 10;

/// Decimal places used for numeric SVG attributes.
pub const COORDINATE_PRECISION: usize = 4;

/// Separators used when turning numbers into label text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberStyle {
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
}

impl Default for NumberStyle {
    fn default() -> Self {
        Self {
            decimal_separator: default_decimal_separator(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

fn default_decimal_separator() -> String {
    ".".to_owned()
}

fn default_thousands_separator() -> String {
    ",".to_owned()
}

/// Rounds `value` to `digits` significant digits, dropping trailing zeros.
///
/// Returns `None` for values `rust_decimal` cannot represent (non-finite or
/// beyond its 96-bit mantissa).
#[must_use]
pub fn round_significant(value: f64, digits: u32) -> Option<Decimal> {
    let decimal = Decimal::from_f64(value)?;
    if decimal.is_zero() {
        return Some(Decimal::ZERO);
    }
    Some(decimal.round_sf(digits)?.normalize())
}

/// Formats a label value with optional fixed decimal digits.
#[must_use]
pub fn format_number(value: f64, decimal_digits: Option<usize>, style: &NumberStyle) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let plain = match decimal_digits {
        Some(digits) => format!("{value:.digits$}"),
        None => match round_significant(value, AUTO_SIGNIFICANT_DIGITS) {
            Some(decimal) => decimal.to_string(),
            None => value.to_string(),
        },
    };
    let plain = strip_negative_zero(plain);
    group_thousands(&plain, style)
}

/// Formats a label value surrounded by unit text.
#[must_use]
pub fn format_with_units(
    value: f64,
    decimal_digits: Option<usize>,
    units_before: &str,
    units_after: &str,
    style: &NumberStyle,
) -> String {
    format!(
        "{units_before}{}{units_after}",
        format_number(value, decimal_digits, style)
    )
}

/// Formats a pixel coordinate for SVG output with bounded precision.
#[must_use]
pub fn format_coordinate(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let text = format!("{value:.precision$}", precision = COORDINATE_PRECISION);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    };
    strip_negative_zero(text)
}

fn strip_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|ch| ch == '0' || ch == '.') => rest.to_owned(),
        _ => text,
    }
}

fn group_thousands(plain: &str, style: &NumberStyle) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        let remaining = digits.len() - index;
        if index > 0 && remaining % 3 == 0 {
            grouped.push_str(&style.thousands_separator);
        }
        grouped.push(*digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}{}{fraction}", style.decimal_separator),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_precision_hides_float_noise() {
        let style = NumberStyle::default();
        assert_eq!(format_number(0.1 + 0.2, None, &style), "0.3");
        assert_eq!(format_number(-0.0, None, &style), "0");
        assert_eq!(format_number(1_234_567.0, None, &style), "1,234,567");
    }

    #[test]
    fn fixed_digits_pad_and_keep_separators() {
        let style = NumberStyle {
            decimal_separator: ",".to_owned(),
            thousands_separator: ".".to_owned(),
        };
        assert_eq!(format_number(1234.5, Some(2), &style), "1.234,50");
        assert_eq!(format_number(-0.0001, Some(2), &style), "0,00");
    }

    #[test]
    fn coordinates_are_trimmed() {
        assert_eq!(format_coordinate(12.0), "12");
        assert_eq!(format_coordinate(12.345_678), "12.3457");
        assert_eq!(format_coordinate(-0.000_01), "0");
    }

    #[test]
    fn significant_rounding_normalizes() {
        let rounded = round_significant(0.300_000_000_000_000_04, 4).expect("representable");
        assert_eq!(rounded.to_string(), "0.3");
        assert_eq!(
            round_significant(12_344.0, 4).expect("representable").to_string(),
            "12340"
        );
    }
}
