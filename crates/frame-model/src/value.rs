//! Dynamically typed cell values.
//!
//! Data sources hand over loosely typed values (numbers, strings, booleans,
//! nested arrays or objects). [`Value`] names every variant explicitly so the
//! numeric and text channels used by display processing are total functions
//! instead of implicit casts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Largest integer an `f64` represents exactly (`2^53 - 1`).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A single cell value.
///
/// The JSON wire form is the plain JSON value. Integral numbers serialize
/// without a fraction (`1`, not `1.0`) and `NaN` numbers serialize as
/// `null`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value.
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for null values and `NaN` numbers.
    pub fn is_null_or_nan(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Returns the number if this is a [`Value::Number`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerces the value into the numeric channel.
    ///
    /// - numbers pass through (including `NaN`)
    /// - `true` is 1, `false` is 0
    /// - null, arrays and objects are `NaN`
    /// - strings are trimmed and parsed; unparseable text is `NaN`
    pub fn coerce_numeric(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(true) => 1.0,
            Value::Bool(false) => 0.0,
            Value::Null | Value::Array(_) | Value::Object(_) => f64::NAN,
            Value::String(s) => parse_number(s).unwrap_or(f64::NAN),
        }
    }

    /// Coerces the value into the text channel.
    ///
    /// Null and `NaN` become the empty string, arrays are joined with `,`
    /// and objects render as compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) if n.is_nan() => String::new(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(*n, serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Object(map) => serializer.collect_map(map),
        }
    }
}

/// Serialize a number the way JSON sources write it: exact integers as
/// integers, everything else as a float.
pub(crate) fn serialize_number<S>(value: f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

/// [`serialize_number`] for optional config numbers.
pub(crate) fn serialize_optional_number<S>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serialize_number(*value, serializer),
        None => serializer.serialize_none(),
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Parses a trimmed string as a number.
///
/// Empty strings are not numbers. Accepts the `Infinity` spellings data
/// sources emit in addition to Rust float syntax.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        // Rust accepts "inf"/"nan" spellings that data sources never mean as numbers.
        t if t.eq_ignore_ascii_case("inf")
            || t.eq_ignore_ascii_case("infinity")
            || t.eq_ignore_ascii_case("nan") =>
        {
            return None;
        }
        _ => {}
    }
    trimmed.parse::<f64>().ok()
}

/// Formats a number without trailing `.0` for integral values.
///
/// # Examples
///
/// ```
/// use frame_model::format_number;
///
/// assert_eq!(format_number(40.0), "40");
/// assert_eq!(format_number(1.5), "1.5");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
/// ```
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        // Drops the sign of negative zero.
        return "0".to_string();
    }
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_numeric_covers_every_variant() {
        assert_eq!(Value::Number(2.5).coerce_numeric(), 2.5);
        assert_eq!(Value::Bool(true).coerce_numeric(), 1.0);
        assert_eq!(Value::Bool(false).coerce_numeric(), 0.0);
        assert!(Value::Null.coerce_numeric().is_nan());
        assert!(Value::Array(vec![Value::Number(1.0)]).coerce_numeric().is_nan());
        assert!(Value::Object(BTreeMap::new()).coerce_numeric().is_nan());
        assert_eq!(Value::from(" 12.5 ").coerce_numeric(), 12.5);
        assert!(Value::from("abc").coerce_numeric().is_nan());
        assert!(Value::from("").coerce_numeric().is_nan());
    }

    #[test]
    fn to_text_matches_generic_stringification() {
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::Number(f64::NAN).to_text(), "");
        assert_eq!(Value::Number(3.0).to_text(), "3");
        assert_eq!(Value::Bool(false).to_text(), "false");
        assert_eq!(
            Value::Array(vec![Value::Number(1.0), Value::from("a")]).to_text(),
            "1,a"
        );
    }

    #[test]
    fn nan_serializes_as_null() {
        let json = serde_json::to_string(&Value::Number(f64::NAN)).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn integral_numbers_serialize_without_fraction() {
        let values = vec![
            Value::Number(1.0),
            Value::Number(-2.0),
            Value::Number(1.5),
            Value::Array(vec![Value::Number(3.0)]),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, "[1,-2,1.5,[3]]");
    }

    #[test]
    fn untagged_round_trip() {
        let raw = r#"[null, true, 1.5, "x", [1], {"k": "v"}]"#;
        let values: Vec<Value> = serde_json::from_str(raw).unwrap();
        assert_eq!(values[0], Value::Null);
        assert_eq!(values[1], Value::Bool(true));
        assert_eq!(values[2], Value::Number(1.5));
        assert_eq!(values[3], Value::from("x"));
        assert!(matches!(values[4], Value::Array(_)));
        assert!(matches!(values[5], Value::Object(_)));
    }

    #[test]
    fn parse_number_rejects_rust_only_spellings() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number("1e3"), Some(1000.0));
    }
}
