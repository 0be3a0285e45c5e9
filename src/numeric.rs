//! Numeric helpers shared by the aggregator and the scenario calculator
//!
//! Amounts are plain `f64` values understood to be thousands of currency
//! units. Person-months (MM) are fractional and kept to two decimals at the
//! input boundary. Everything here is total: degenerate inputs (division by
//! zero, non-finite results) collapse to zero instead of producing NaN or
//! infinity.
//!
//! The `lenient_*` functions are serde `deserialize_with` helpers for input
//! documents. They accept JSON/YAML numbers as well as numeric strings with
//! grouping separators (`"1,250,000"`), treat null as zero and reject any
//! other text.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Characters accepted as digit-grouping separators
const GROUPING_SEPARATORS: [char; 3] = [',', '_', ' '];

/// Error returned when a numeric string cannot be sanitized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberParseError {
    /// A character that is neither a digit, a sign, a decimal point nor a separator
    UnexpectedCharacter(String, char),
    /// More than one decimal point or a misplaced sign
    InvalidFormat(String),
}

impl fmt::Display for NumberParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberParseError::UnexpectedCharacter(s, c) => {
                write!(f, "Invalid number '{}': unexpected character '{}'", s, c)
            }
            NumberParseError::InvalidFormat(s) => write!(f, "Invalid number format: {}", s),
        }
    }
}

impl std::error::Error for NumberParseError {}

/// Parse an amount typed by a user
///
/// Accepts formats: "1250", "1,250", "-1,250.5", "+12.75", "1 250".
/// Blank input parses as zero.
pub fn parse_amount(s: &str) -> Result<f64, NumberParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let mut cleaned = String::with_capacity(trimmed.len());
    let mut seen_point = false;
    let mut seen_digit = false;

    for (i, c) in trimmed.chars().enumerate() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                cleaned.push(c);
            }
            '.' if !seen_point => {
                seen_point = true;
                cleaned.push(c);
            }
            '-' | '+' if i == 0 => cleaned.push(c),
            c if GROUPING_SEPARATORS.contains(&c) => {}
            '.' | '-' | '+' => return Err(NumberParseError::InvalidFormat(trimmed.to_string())),
            other => {
                return Err(NumberParseError::UnexpectedCharacter(
                    trimmed.to_string(),
                    other,
                ))
            }
        }
    }

    if !seen_digit {
        return Err(NumberParseError::InvalidFormat(trimmed.to_string()));
    }

    cleaned
        .parse::<f64>()
        .map_err(|_| NumberParseError::InvalidFormat(trimmed.to_string()))
}

/// Parse an amount, falling back to zero for anything malformed
pub fn sanitize_amount(s: &str) -> f64 {
    parse_amount(s).unwrap_or(0.0)
}

/// Replace non-finite values with zero
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Round to the nearest integer currency unit (half away from zero)
pub fn round_to_unit(value: f64) -> f64 {
    finite_or_zero(value).round()
}

/// Round a person-month figure to two decimals
pub fn round_mm(value: f64) -> f64 {
    (finite_or_zero(value) * 100.0).round() / 100.0
}

/// `numerator / denominator`, or zero when the denominator is zero
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    finite_or_zero(numerator / denominator)
}

/// `part / total × 100`, or zero when the total is zero
pub fn percent_of_total(part: f64, total: f64) -> f64 {
    ratio(part, total) * 100.0
}

/// `part / total × 100` for a strictly positive total, otherwise zero
pub fn percent_of_positive(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        percent_of_total(part, total)
    } else {
        0.0
    }
}

/// `base × pct / 100`
pub fn percent_of(base: f64, pct: f64) -> f64 {
    finite_or_zero(base * pct / 100.0)
}

/// `base × pct / (100 + pct)`
///
/// The share X of `base` such that X is exactly `pct` percent of the
/// remainder `base − X`.
pub fn markup_share(base: f64, pct: f64) -> f64 {
    let divisor = 100.0 + pct;
    if divisor == 0.0 {
        return 0.0;
    }
    finite_or_zero(base * pct / divisor)
}

/// Sum the values of a month-keyed map
pub fn sum_monthly(values: &BTreeMap<String, f64>) -> f64 {
    values.values().copied().map(finite_or_zero).sum()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn into_amount<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            RawNumber::Number(n) => Ok(finite_or_zero(n)),
            RawNumber::Text(s) => parse_amount(&s).map_err(E::custom),
        }
    }

    fn into_option<E: serde::de::Error>(self) -> Result<Option<f64>, E> {
        match self {
            RawNumber::Text(s) if s.trim().is_empty() => Ok(None),
            other => other.into_amount().map(Some),
        }
    }
}

/// Deserialize an amount from a number or numeric string; null becomes zero
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawNumber> = Option::deserialize(deserializer)?;
    match raw {
        Some(raw) => raw.into_amount(),
        None => Ok(0.0),
    }
}

/// Deserialize an optional amount; null and blank strings become `None`
pub fn lenient_option_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawNumber> = Option::deserialize(deserializer)?;
    match raw {
        Some(raw) => raw.into_option(),
        None => Ok(None),
    }
}

/// Deserialize a person-month figure, rounded to two decimals
pub fn lenient_mm<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let mm = lenient_amount(deserializer)?;
    if mm < 0.0 {
        return Err(D::Error::custom(format!(
            "person-months must not be negative: {}",
            mm
        )));
    }
    Ok(round_mm(mm))
}

fn lenient_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<RawNumber>>> = Option::deserialize(deserializer)?;
    let mut values = BTreeMap::new();
    for (month, value) in raw.unwrap_or_default() {
        let amount = match value {
            Some(v) => v.into_amount()?,
            None => 0.0,
        };
        values.insert(month, amount);
    }
    Ok(values)
}

/// Deserialize a month → amount map
pub fn lenient_amount_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_map(deserializer)
}

/// Deserialize a month → person-months map, each value rounded to two decimals
pub fn lenient_mm_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = lenient_map(deserializer)?;
    values
        .into_iter()
        .map(|(month, mm)| {
            if mm < 0.0 {
                Err(D::Error::custom(format!(
                    "person-months for {} must not be negative: {}",
                    month, mm
                )))
            } else {
                Ok((month, round_mm(mm)))
            }
        })
        .collect()
}
