//! Lenient request-field decoding for the JSON routes.

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

/// Integer field coerced the way JS `Number()` does before an integer check.
///
/// Absent stays `None`. `null`, `false` and blank strings become `0`, `true` becomes `1`,
/// and numeric strings (`"2"`, `"2.0"`, `"0x10"`, `"1e2"`) are parsed. Anything that is
/// not an integer afterwards (`1.5`, `"abc"`, arrays, objects) is rejected.
pub fn js_integer_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(value) => js_number_as_i64(&value).map(Some).ok_or_else(|| D::Error::custom(format!("expected an integer, got {value}"))),
    }
}

pub fn js_number_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Null => Some(0),
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::Number(number) => number.as_i64().or_else(|| number.as_f64().and_then(integral_f64)),
        Value::String(text) => parse_js_numeric(text.trim()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_js_numeric(text: &str) -> Option<i64> {
    if text.is_empty() {
        return Some(0);
    }
    let hex = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"));
    if let Some(digits) = hex {
        return i64::from_str_radix(digits, 16).ok();
    }
    text.parse::<i64>().ok().or_else(|| text.parse::<f64>().ok().and_then(integral_f64))
}

fn integral_f64(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// `Some(list)` only when the field is an array; any other shape means "use the default".
pub fn string_list_or_default<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(text) => Ok(text),
                other => Err(D::Error::custom(format!("options[{index}] must be a string, got {other}"))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        _ => Ok(None),
    }
}

/// Absent, `null`, `false`, `0` and `""` all count as missing.
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => !flag,
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Number(number)) => number.as_f64() == Some(0.0),
        Some(_) => false,
    }
}
