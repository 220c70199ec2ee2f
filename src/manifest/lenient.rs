//! Forgiving scalar conversions for manifest fields.
//!
//! Numbers may arrive as JSON numbers or numeric strings; anything else becomes the type's zero
//! value instead of rejecting the document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn value_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
    .filter(|x| x.is_finite())
}

pub(crate) fn f64_or_zero<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(value_to_f64(&v).unwrap_or(0.0))
}

pub(crate) fn opt_f64<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(value_to_f64(&v))
}

pub(crate) fn i64_or_zero<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(value_to_f64(&v).map(|x| x.trunc() as i64).unwrap_or(0))
}

pub(crate) fn bool_or_false<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1"),
        _ => false,
    })
}

/// Strings pass through; numbers are stringified; everything else is `None`.
pub(crate) fn opt_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn string_or_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(d)?.unwrap_or_default())
}

/// Offsets array; non-numeric entries become 0 so the length still reflects the input.
pub(crate) fn f64_vec<'de, D>(d: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Array(items) => items
            .iter()
            .map(|x| value_to_f64(x).unwrap_or(0.0))
            .collect(),
        other => value_to_f64(&other).into_iter().collect(),
    })
}

/// Decode an optional structured node. Null and `{}` are absent; a node of the wrong shape is
/// logged and treated as absent.
pub(crate) fn node_from_value<T: DeserializeOwned>(v: Value) -> Option<T> {
    match v {
        Value::Null => None,
        Value::Object(ref m) if m.is_empty() => None,
        v => match serde_json::from_value(v) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed manifest node");
                None
            }
        },
    }
}

pub(crate) fn opt_node<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(d)?;
    Ok(node_from_value(v))
}

pub(crate) fn node_or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(opt_node(d)?.unwrap_or_default())
}

/// Array of structured nodes; malformed entries are dropped individually.
pub(crate) fn node_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Array(items) => items.into_iter().filter_map(node_from_value).collect(),
        _ => Vec::new(),
    })
}
