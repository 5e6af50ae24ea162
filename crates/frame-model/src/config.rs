//! Per-field display configuration.
//!
//! Authored outside this workspace (panel editors) and read-only here.
//! Absent optional keys are omitted on serialization so an empty config
//! round-trips as `{}`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::{serialize_number, serialize_optional_number};

/// Display contract attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Unit id understood by the unit formatters (`none` when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Pinned decimal count; disables decimal inference when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i32>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_number"
    )]
    pub min: Option<f64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_number"
    )]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings: Option<Vec<ValueMapping>>,

    /// Text shown when a value renders empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<DataLink>>,

    /// Visualization-specific properties, opaque to this workspace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<serde_json::Value>,
}

impl FieldConfig {
    /// Returns true when no key is set.
    pub fn is_empty(&self) -> bool {
        *self == FieldConfig::default()
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_decimals(mut self, decimals: i32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ThresholdsConfig) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    #[must_use]
    pub fn with_mappings(mut self, mappings: Vec<ValueMapping>) -> Self {
        self.mappings = Some(mappings);
        self
    }

    #[must_use]
    pub fn with_no_value(mut self, text: impl Into<String>) -> Self {
        self.no_value = Some(text.into());
        self
    }
}

/// How threshold step values are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdsMode {
    /// Step values compare directly against the value.
    #[default]
    Absolute,
    /// Step values are percentages of the field's `min..max` range.
    Percentage,
}

/// Ordered threshold steps plus their interpretation mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default)]
    pub mode: ThresholdsMode,
    pub steps: Vec<Threshold>,
}

impl ThresholdsConfig {
    /// Absolute thresholds from steps.
    pub fn absolute(steps: Vec<Threshold>) -> Self {
        Self {
            mode: ThresholdsMode::Absolute,
            steps,
        }
    }

    /// Percentage thresholds from steps.
    pub fn percentage(steps: Vec<Threshold>) -> Self {
        Self {
            mode: ThresholdsMode::Percentage,
            steps,
        }
    }
}

/// A `(value, color)` step. The base step uses negative infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    #[serde(
        default = "negative_infinity",
        serialize_with = "serialize_step_value",
        deserialize_with = "deserialize_step_value"
    )]
    pub value: f64,
    pub color: String,
}

impl Threshold {
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }

    /// Base step at negative infinity.
    pub fn base(color: impl Into<String>) -> Self {
        Self::new(f64::NEG_INFINITY, color)
    }
}

fn negative_infinity() -> f64 {
    f64::NEG_INFINITY
}

// JSON has no infinity: the base step travels as `null`.
fn serialize_step_value<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_infinite() && value.is_sign_negative() {
        serializer.serialize_none()
    } else {
        serialize_number(*value, serializer)
    }
}

fn deserialize_step_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NEG_INFINITY))
}

/// Replaces a raw value with display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ValueMapping {
    /// Exact match against the raw value's text, or numerically when both
    /// sides parse as numbers.
    Value {
        value: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    /// Inclusive numeric range; an open bound matches everything on that side.
    Range {
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_optional_number"
        )]
        from: Option<f64>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_optional_number"
        )]
        to: Option<f64>,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    /// Matches a class of special values.
    Special {
        #[serde(rename = "match")]
        matches: SpecialMatch,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
}

impl ValueMapping {
    pub fn text(&self) -> &str {
        match self {
            ValueMapping::Value { text, .. }
            | ValueMapping::Range { text, .. }
            | ValueMapping::Special { text, .. } => text,
        }
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            ValueMapping::Value { color, .. }
            | ValueMapping::Range { color, .. }
            | ValueMapping::Special { color, .. } => color.as_deref(),
        }
    }
}

/// Special value classes for [`ValueMapping::Special`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialMatch {
    Null,
    #[serde(rename = "nan")]
    NaN,
    #[serde(rename = "nullAndNaN")]
    NullAndNaN,
    True,
    False,
    Empty,
}

/// Link attached to a field; propagated, never interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLink {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_blank: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_serializes_as_empty_object() {
        let json = serde_json::to_string(&FieldConfig::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn base_threshold_round_trips_through_null() {
        let config = ThresholdsConfig::absolute(vec![
            Threshold::base("green"),
            Threshold::new(80.0, "red"),
        ]);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["steps"][0]["value"], serde_json::Value::Null);
        assert_eq!(json["mode"], "absolute");

        let back: ThresholdsConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.steps[0].value, f64::NEG_INFINITY);
        assert_eq!(back, config);
    }

    #[test]
    fn value_mappings_are_tagged_by_type() {
        let raw = r#"[
            {"type": "value", "value": "1", "text": "On"},
            {"type": "range", "from": 10, "to": 20, "text": "Mid"},
            {"type": "special", "match": "nullAndNaN", "text": "N/A"}
        ]"#;
        let mappings: Vec<ValueMapping> = serde_json::from_str(raw).unwrap();
        assert_eq!(mappings[0].text(), "On");
        assert!(matches!(
            mappings[1],
            ValueMapping::Range {
                from: Some(10.0),
                ..
            }
        ));
        assert!(matches!(
            mappings[2],
            ValueMapping::Special {
                matches: SpecialMatch::NullAndNaN,
                ..
            }
        ));
    }
}
