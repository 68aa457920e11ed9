//! Duration and percentage converters.
//!
//! Profiler reports print times as a number followed by `s`, `ms` or `us`
//! and shares as a number followed by `%`. Everything is normalized to
//! milliseconds and plain percentage numbers.

use crate::utils::error::ParseError;
use std::str::FromStr;

/// Time units that occur in profiler reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
}

impl TimeUnit {
    /// Convert a value in this unit to milliseconds
    pub fn to_ms(self, value: f64) -> f64 {
        match self {
            TimeUnit::Seconds => value * 1000.0,
            TimeUnit::Milliseconds => value,
            TimeUnit::Microseconds => value / 1000.0,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(TimeUnit::Seconds),
            "ms" => Ok(TimeUnit::Milliseconds),
            "us" => Ok(TimeUnit::Microseconds),
            other => Err(ParseError::UnknownDurationUnit(other.to_string())),
        }
    }
}

/// Convert a duration such as `"12.345us"` to milliseconds
///
/// **Public** - used by the text parser for every duration column
///
/// # Errors
/// * `ParseError::UnknownDurationUnit` - suffix is missing or not s/ms/us
/// * `ParseError::InvalidNumber` - numeric part does not parse
pub fn duration_to_ms(text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    let (number, unit) = split_unit(text);

    if unit.is_empty() {
        return Err(ParseError::UnknownDurationUnit(text.to_string()));
    }
    let unit: TimeUnit = unit
        .parse()
        .map_err(|_| ParseError::UnknownDurationUnit(text.to_string()))?;

    let value = parse_number(number)?;
    Ok(unit.to_ms(value))
}

/// Convert `"12.5%"` to `12.5`; text without a trailing `%` is `0.0`
///
/// The profiler prints `0.000%` for zero shares, so a value with no `%`
/// at all (an empty cell, `--`) is read as zero rather than an error.
/// A `%`-suffixed value that is not a number is still reported as zero;
/// use [`try_percent_to_number`] to surface it.
pub fn percent_to_number(text: &str) -> f64 {
    try_percent_to_number(text).unwrap_or(0.0)
}

/// Strict variant of [`percent_to_number`]
///
/// # Errors
/// * `ParseError::InvalidNumber` - the text ends in `%` but is not a number
pub fn try_percent_to_number(text: &str) -> Result<f64, ParseError> {
    match text.trim().strip_suffix('%') {
        Some(number) => parse_number(number),
        None => Ok(0.0),
    }
}

/// Round to two decimals (the precision of derived percentages)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Split `"1.5ms"` into `("1.5", "ms")`
///
/// **Private** - the unit starts at the first character that cannot be
/// part of a float literal
fn split_unit(text: &str) -> (&str, &str) {
    let split_at = text
        .char_indices()
        .find(|&(i, c)| !is_number_char(c, i, text))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text.split_at(split_at)
}

fn is_number_char(c: char, index: usize, text: &str) -> bool {
    match c {
        '0'..='9' | '.' | '+' | '-' => true,
        // Exponent marker only when followed by a digit or sign ("1e-3s")
        'e' | 'E' => text[index + 1..]
            .chars()
            .next()
            .is_some_and(|n| n.is_ascii_digit() || n == '-' || n == '+'),
        _ => false,
    }
}

fn parse_number(number: &str) -> Result<f64, ParseError> {
    number
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(number.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_duration_units() {
        assert_close(duration_to_ms("250us").unwrap(), 0.25);
        assert_close(duration_to_ms("12.345ms").unwrap(), 12.345);
        assert_close(duration_to_ms("1.5s").unwrap(), 1500.0);
        assert_close(duration_to_ms("  3.000us ").unwrap(), 0.003);
    }

    #[test]
    fn test_duration_exponent() {
        assert_close(duration_to_ms("1e-3s").unwrap(), 1.0);
    }

    #[test]
    fn test_duration_unknown_unit_is_error() {
        assert!(matches!(
            duration_to_ms("10ns"),
            Err(ParseError::UnknownDurationUnit(_))
        ));
        assert!(matches!(
            duration_to_ms("10"),
            Err(ParseError::UnknownDurationUnit(_))
        ));
        assert!(matches!(
            duration_to_ms("10min"),
            Err(ParseError::UnknownDurationUnit(_))
        ));
    }

    #[test]
    fn test_duration_bad_number() {
        assert!(matches!(
            duration_to_ms("ms"),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            duration_to_ms("1.2.3ms"),
            Err(ParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent_to_number("45.12%"), 45.12);
        assert_eq!(percent_to_number("0.000%"), 0.0);
        assert_eq!(percent_to_number("100%"), 100.0);
        assert_eq!(percent_to_number("45.12"), 0.0);
        assert_eq!(percent_to_number(""), 0.0);
    }

    #[test]
    fn test_try_percent_rejects_garbage() {
        assert!(try_percent_to_number("abc%").is_err());
        assert_eq!(try_percent_to_number("--").unwrap(), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.33333), 33.33);
        assert_eq!(round2(66.666), 66.67);
    }
}
