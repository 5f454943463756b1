//! Calendar-aware divisions for date-time key axes.
//!
//! Keys are Unix seconds (UTC). Grid lines fall on calendar boundaries of the
//! smallest step from a fixed ladder whose nominal spacing fits the minimum
//! grid spacing.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const WEEK: i64 = 7 * DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// One rung of the date-time division ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStep {
    pub unit: TimeUnit,
    pub count: u32,
}

const fn step(unit: TimeUnit, count: u32) -> TimeStep {
    TimeStep { unit, count }
}

const LADDER: [TimeStep; 27] = [
    step(TimeUnit::Second, 1),
    step(TimeUnit::Second, 2),
    step(TimeUnit::Second, 5),
    step(TimeUnit::Second, 10),
    step(TimeUnit::Second, 15),
    step(TimeUnit::Second, 30),
    step(TimeUnit::Minute, 1),
    step(TimeUnit::Minute, 2),
    step(TimeUnit::Minute, 5),
    step(TimeUnit::Minute, 10),
    step(TimeUnit::Minute, 15),
    step(TimeUnit::Minute, 30),
    step(TimeUnit::Hour, 1),
    step(TimeUnit::Hour, 2),
    step(TimeUnit::Hour, 3),
    step(TimeUnit::Hour, 6),
    step(TimeUnit::Hour, 12),
    step(TimeUnit::Day, 1),
    step(TimeUnit::Day, 2),
    step(TimeUnit::Week, 1),
    step(TimeUnit::Month, 1),
    step(TimeUnit::Month, 2),
    step(TimeUnit::Month, 3),
    step(TimeUnit::Month, 6),
    step(TimeUnit::Year, 1),
    step(TimeUnit::Year, 2),
    step(TimeUnit::Year, 5),
];

impl TimeStep {
    /// Approximate length in seconds, used for spacing decisions only.
    #[must_use]
    pub fn nominal_seconds(self) -> f64 {
        let unit = match self.unit {
            TimeUnit::Second => 1,
            TimeUnit::Minute => MINUTE,
            TimeUnit::Hour => HOUR,
            TimeUnit::Day => DAY,
            TimeUnit::Week => WEEK,
            TimeUnit::Month => 30 * DAY,
            TimeUnit::Year => 365 * DAY,
        };
        (unit * i64::from(self.count)) as f64
    }

    /// Default label pattern for points on this step.
    #[must_use]
    pub fn label_format(self) -> &'static str {
        match self.unit {
            TimeUnit::Second => "%H:%M:%S",
            TimeUnit::Minute | TimeUnit::Hour => "%H:%M",
            TimeUnit::Day | TimeUnit::Week => "%Y-%m-%d",
            TimeUnit::Month => "%b %Y",
            TimeUnit::Year => "%Y",
        }
    }

    /// Latest boundary at or before `seconds`.
    fn floor(self, seconds: i64) -> Option<i64> {
        let count = i64::from(self.count);
        match self.unit {
            TimeUnit::Second => Some(seconds.div_euclid(count) * count),
            TimeUnit::Minute => Some(seconds.div_euclid(MINUTE * count) * MINUTE * count),
            TimeUnit::Hour => Some(seconds.div_euclid(HOUR * count) * HOUR * count),
            TimeUnit::Day => Some(seconds.div_euclid(DAY * count) * DAY * count),
            // 1970-01-01 was a Thursday; weeks start on Monday
            TimeUnit::Week => {
                let monday_offset = 3 * DAY;
                Some((seconds + monday_offset).div_euclid(WEEK) * WEEK - monday_offset)
            }
            TimeUnit::Month => {
                let date = DateTime::<Utc>::from_timestamp(seconds, 0)?.date_naive();
                let month0 = date.month0() / self.count * self.count;
                midnight(NaiveDate::from_ymd_opt(date.year(), month0 + 1, 1)?)
            }
            TimeUnit::Year => {
                let year = DateTime::<Utc>::from_timestamp(seconds, 0)?.year();
                let year = year.div_euclid(self.count as i32) * self.count as i32;
                midnight(NaiveDate::from_ymd_opt(year, 1, 1)?)
            }
        }
    }

    /// The boundary following `seconds`, which must itself be a boundary.
    fn advance(self, seconds: i64) -> Option<i64> {
        let count = i64::from(self.count);
        match self.unit {
            TimeUnit::Second => seconds.checked_add(count),
            TimeUnit::Minute => seconds.checked_add(MINUTE * count),
            TimeUnit::Hour => seconds.checked_add(HOUR * count),
            TimeUnit::Day => seconds.checked_add(DAY * count),
            TimeUnit::Week => seconds.checked_add(WEEK),
            TimeUnit::Month | TimeUnit::Year => {
                let months = if self.unit == TimeUnit::Year {
                    self.count * 12
                } else {
                    self.count
                };
                let date = DateTime::<Utc>::from_timestamp(seconds, 0)?.date_naive();
                midnight(date.checked_add_months(Months::new(months))?)
            }
        }
    }
}

fn midnight(date: NaiveDate) -> Option<i64> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}

/// Smallest ladder step whose nominal spacing reaches `min_space` pixels.
///
/// Ranges too long for the ladder use multiples of ten years.
#[must_use]
pub fn choose_step(range_seconds: f64, length: f64, min_space: f64) -> TimeStep {
    let unit_size = length / range_seconds;
    if let Some(found) = LADDER
        .iter()
        .copied()
        .find(|candidate| candidate.nominal_seconds() * unit_size >= min_space)
    {
        return found;
    }

    let mut decades = 10_u32;
    while step(TimeUnit::Year, decades).nominal_seconds() * unit_size < min_space
        && decades < 100_000
    {
        decades = decades.saturating_mul(2);
    }
    step(TimeUnit::Year, decades)
}

/// Label pattern for a grid stepping by a fixed number of seconds.
#[must_use]
pub fn seconds_label_format(seconds: f64) -> &'static str {
    if seconds < MINUTE as f64 {
        "%H:%M:%S"
    } else if seconds < DAY as f64 {
        "%H:%M"
    } else {
        "%Y-%m-%d"
    }
}

/// Calendar boundaries within `[min, max]`, in Unix seconds.
#[must_use]
pub fn boundaries(min: f64, max: f64, time_step: TimeStep, limit: usize) -> Vec<f64> {
    let mut points = Vec::new();
    let (Some(start), end) = (time_step.floor(min.floor() as i64), max.ceil() as i64) else {
        return points;
    };

    let mut current = start;
    while current <= end && points.len() < limit {
        if (current as f64) >= min {
            points.push(current as f64);
        }
        match time_step.advance(current) {
            Some(next) if next > current => current = next,
            _ => break,
        }
    }
    points
}

/// Formats a Unix-seconds value with a chrono pattern.
#[must_use]
pub fn format_timestamp(seconds: f64, pattern: &str) -> String {
    match DateTime::<Utc>::from_timestamp(seconds.round() as i64, 0) {
        Some(time) => time.format(pattern).to_string(),
        None => String::new(),
    }
}

/// Converts a date string or numeric timestamp to Unix seconds.
#[must_use]
pub fn date_convert(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.timestamp());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(Utc.from_utc_datetime(&time).timestamp());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return midnight(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d") {
        return midnight(date);
    }
    if let Ok(seconds) = text.parse::<f64>() {
        if seconds.is_finite() {
            return Some(seconds.floor() as i64);
        }
    }
    None
}
