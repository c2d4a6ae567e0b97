//! Lenient numeric deserialization.
//!
//! Collections may be hand-edited or written by older clients that stored
//! counters as strings, left them `null`, or omitted them. Every counter reads
//! as a non-negative integer and anything unusable becomes 0.
//!
//! Use with `#[serde(default, deserialize_with = "...")]` so that a missing
//! field also lands on the default.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a required counter. Missing, `null`, negative, or malformed
/// input yields 0.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, coerce_count))
}

/// Deserialize an optional counter. `null` stays absent; anything else is
/// coerced like [`count`].
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value.
pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(other) => Some(coerce_count(&other)),
    })
}

/// Coerce an arbitrary JSON value into a counter.
///
/// Fractions truncate toward zero, values above `u32::MAX` saturate.
#[must_use]
pub fn coerce_count(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_u64().map_or_else(
            || n.as_f64().map_or(0, float_to_count),
            |v| u32::try_from(v).unwrap_or(u32::MAX),
        ),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<u64>().map_or_else(
                |_| trimmed.parse::<f64>().map_or(0, float_to_count),
                |v| u32::try_from(v).unwrap_or(u32::MAX),
            )
        }
        _ => 0,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_count(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        // `as` saturates at u32::MAX
        v.trunc() as u32
    } else {
        0
    }
}
