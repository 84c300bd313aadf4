//! Company property validation and coercion.
//!
//! Only fields with an entry in `FIELD_RULES` survive; everything else in
//! the input is dropped without error.

use serde_json::Value;

use crate::error::{IntegrationError, Result};
use crate::types::Properties;

type FieldRule = fn(&Value) -> Result<Value>;

const FIELD_RULES: &[(&str, FieldRule)] = &[
    ("merchant_id", merchant_id),
    ("company_risk_tag", company_risk_tag),
    ("domain", domain),
];

/// Separator used when a list of risk tags is sent as one string.
pub const RISK_TAG_SEPARATOR: &str = ";";

/// Validate the recognised fields of `properties` and return them coerced,
/// in input order. Unrecognised fields are left out.
pub fn validate_and_filter_properties(properties: &Properties) -> Result<Properties> {
    let mut filtered = Properties::new();
    for (name, value) in properties {
        if let Some((_, rule)) = FIELD_RULES.iter().find(|(field, _)| *field == name.as_str()) {
            filtered.insert(name.clone(), rule(value)?);
        }
    }
    Ok(filtered)
}

/// Whether a value counts as "not provided": null, `false`, zero, `""`,
/// `"0"`, or an empty list or object.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn merchant_id(value: &Value) -> Result<Value> {
    match parse_integer(value) {
        Some(id) if id != 0 => Ok(Value::from(id)),
        _ => Err(IntegrationError::new(
            "`merchant_id` field did not pass validation!",
        )),
    }
}

fn company_risk_tag(value: &Value) -> Result<Value> {
    if is_empty_value(value) {
        return Err(IntegrationError::new("`company_risk_tag` empty provided!"));
    }
    match value {
        Value::Array(tags) => {
            let joined = tags
                .iter()
                .map(|tag| match tag {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(RISK_TAG_SEPARATOR);
            Ok(Value::String(joined))
        }
        other => Ok(other.clone()),
    }
}

fn domain(value: &Value) -> Result<Value> {
    if is_empty_value(value) {
        return Err(IntegrationError::new("`domain` empty provided!"));
    }
    Ok(value.clone())
}

/// Accepts JSON integers, whole floats, and strings of an optional sign
/// followed by digits without leading zeros. Surrounding whitespace is
/// ignored.
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => {
            let s = s.trim();
            let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
            let well_formed = !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit())
                && (digits == "0" || !digits.starts_with('0'));
            if well_formed {
                s.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}
