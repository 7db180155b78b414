//! Lenient numeric input handling
//!
//! Estimation screens hand over whatever the text fields contained. A value
//! that does not parse as a number, or that lies beyond the accepted range,
//! degrades to zero so the receipt still renders.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Largest magnitude accepted for a weight, rate, charge or amount (10 crore)
pub const MAX_INPUT_MAGNITUDE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);
/// Largest piece count accepted on one line
pub const MAX_PIECES: u32 = 9999;

/// Zero out a figure beyond `MAX_INPUT_MAGNITUDE`
pub fn bounded(value: Decimal) -> Decimal {
    if value.abs() > MAX_INPUT_MAGNITUDE {
        tracing::warn!(value = %value, max = %MAX_INPUT_MAGNITUDE, "Numeric input out of range, using zero");
        return Decimal::ZERO;
    }
    value
}

/// Parse a user-entered numeric string, falling back to zero
///
/// Surrounding whitespace and `,` digit separators are ignored.
pub fn parse_decimal_or_zero(raw: &str) -> Decimal {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or_else(|_| {
            tracing::warn!(raw = %raw, "Unparsable numeric input, using zero");
            Decimal::ZERO
        })
}

/// Convert f64 to Decimal, mapping NaN/Infinity to zero
#[inline]
pub fn decimal_from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::warn!(value = ?value, "Non-finite numeric input, using zero");
        Decimal::ZERO
    })
}

/// Return the trimmed value when it carries any text
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl RawNumber {
    fn into_decimal(self) -> Decimal {
        let value = match self {
            RawNumber::Int(v) => Decimal::from(v),
            RawNumber::Float(v) => decimal_from_f64(v),
            RawNumber::Text(s) => parse_decimal_or_zero(&s),
            RawNumber::Other(_) => {
                tracing::warn!("Non-numeric JSON value in numeric field, using zero");
                Decimal::ZERO
            }
        };
        bounded(value)
    }
}

/// Serde helper: number, numeric string or null → `Decimal`
///
/// Zero on failure or when out of range.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawNumber> = Option::deserialize(deserializer)?;
    Ok(raw.map(RawNumber::into_decimal).unwrap_or(Decimal::ZERO))
}

/// Serde helper: piece counts, negative or fractional input truncated into `u32`
///
/// Counts above `MAX_PIECES` become zero.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use rust_decimal::prelude::ToPrimitive;

    let value = lenient_decimal(deserializer)?;
    let count = value.trunc().to_u32().unwrap_or(0);
    if count > MAX_PIECES {
        tracing::warn!(count, max = MAX_PIECES, "Piece count out of range, using zero");
        return Ok(0);
    }
    Ok(count)
}
