//! Typed columns.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;
use crate::value::{Value, parse_number};

/// Closed set of field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Time,
    Number,
    String,
    Boolean,
    #[default]
    Other,
}

impl FieldType {
    /// Returns the wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Time => "time",
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Other => "other",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(FieldType::Time),
            "number" => Ok(FieldType::Number),
            "string" => Ok(FieldType::String),
            "boolean" => Ok(FieldType::Boolean),
            "other" => Ok(FieldType::Other),
            _ => Err(format!("Unknown field type: {s}")),
        }
    }
}

/// Guesses a field type from a single value.
///
/// Numeric strings count as numbers and `true`/`false` strings as booleans.
/// Null values carry no type information and return `None`.
pub fn guess_field_type_from_value(value: &Value) -> Option<FieldType> {
    match value {
        Value::Null => None,
        Value::Number(_) => Some(FieldType::Number),
        Value::Bool(_) => Some(FieldType::Boolean),
        Value::String(s) => {
            if parse_number(s).is_some() {
                Some(FieldType::Number)
            } else if matches!(s.as_str(), "true" | "TRUE" | "True" | "false" | "FALSE" | "False")
            {
                Some(FieldType::Boolean)
            } else {
                Some(FieldType::String)
            }
        }
        Value::Array(_) | Value::Object(_) => Some(FieldType::Other),
    }
}

/// Guesses a field type from its name and the first non-null value.
///
/// Fields named `time` or `date` (any case) are time fields.
pub fn guess_field_type(name: &str, values: &[Value]) -> FieldType {
    let lower = name.to_ascii_lowercase();
    if lower == "time" || lower == "date" {
        return FieldType::Time;
    }
    values
        .iter()
        .find_map(guess_field_type_from_value)
        .unwrap_or(FieldType::Other)
}

/// A named, typed column of a [`DataFrame`](crate::DataFrame).
///
/// The value storage is reference counted: cloning a field, or deriving a
/// renamed or reconfigured copy, shares the underlying values instead of
/// duplicating them. Values are never mutated through a shared handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    field_type: FieldType,
    values: Arc<[Value]>,
    config: FieldConfig,
    labels: Option<BTreeMap<String, String>>,
}

impl Field {
    /// Create a field with an explicit type and default config.
    pub fn new(name: impl Into<String>, field_type: FieldType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            field_type,
            values: values.into(),
            config: FieldConfig::default(),
            labels: None,
        }
    }

    /// Create a field whose type is guessed from its name and values.
    pub fn inferred(name: impl Into<String>, values: Vec<Value>) -> Self {
        let name = name.into();
        let field_type = guess_field_type(&name, &values);
        Self::new(name, field_type, values)
    }

    /// Create a number field.
    pub fn numbers<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().map(Value::Number).collect();
        Self::new(name, FieldType::Number, values)
    }

    /// Create a string field.
    pub fn strings<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(|s| Value::String(s.into())).collect();
        Self::new(name, FieldType::String, values)
    }

    /// Create a time field from epoch milliseconds.
    pub fn times<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().map(Value::Number).collect();
        Self::new(name, FieldType::Time, values)
    }

    /// Replace the display config.
    #[must_use]
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Returns a copy with a new name that shares this field's values.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with the same name, type, config and labels but
    /// new values.
    #[must_use]
    pub fn with_values(&self, values: Vec<Value>) -> Self {
        Self {
            name: self.name.clone(),
            field_type: self.field_type,
            values: values.into(),
            config: self.config.clone(),
            labels: self.labels.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn labels(&self) -> Option<&BTreeMap<String, String>> {
        self.labels.as_ref()
    }

    /// Number of values in the field.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a row, `None` when out of range.
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Name shown to users: `config.displayName` when set, else the name.
    pub fn display_name(&self) -> &str {
        self.config
            .display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }

    /// Returns true when both fields point at the same value storage.
    pub fn shares_values_with(&self, other: &Field) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_guessed_from_first_non_null_value() {
        let values = vec![Value::Null, Value::Number(1.0), Value::from("x")];
        assert_eq!(guess_field_type("value", &values), FieldType::Number);
        assert_eq!(guess_field_type("value", &[Value::Null]), FieldType::Other);
    }

    #[test]
    fn time_name_wins_over_values() {
        let values = vec![Value::Number(1_700_000_000_000.0)];
        assert_eq!(guess_field_type("Time", &values), FieldType::Time);
        assert_eq!(guess_field_type("date", &values), FieldType::Time);
    }

    #[test]
    fn string_values_guess_number_and_boolean() {
        assert_eq!(
            guess_field_type_from_value(&Value::from("12")),
            Some(FieldType::Number)
        );
        assert_eq!(
            guess_field_type_from_value(&Value::from("True")),
            Some(FieldType::Boolean)
        );
        assert_eq!(
            guess_field_type_from_value(&Value::from("hello")),
            Some(FieldType::String)
        );
    }

    #[test]
    fn renamed_shares_value_storage() {
        let field = Field::numbers("a", [1.0, 2.0]);
        let renamed = field.renamed("b");
        assert_eq!(renamed.name(), "b");
        assert!(renamed.shares_values_with(&field));
    }

    #[test]
    fn display_name_prefers_config() {
        let field = Field::numbers("raw", [1.0]).with_config(FieldConfig {
            display_name: Some("Pretty".to_string()),
            ..FieldConfig::default()
        });
        assert_eq!(field.display_name(), "Pretty");
    }

    #[test]
    fn field_type_parses_case_insensitive() {
        assert_eq!("NUMBER".parse::<FieldType>().unwrap(), FieldType::Number);
        assert!("decimal".parse::<FieldType>().is_err());
    }
}
