//! Display processor: raw value to text, number and color.

use std::fmt;

use serde::Serialize;

use frame_model::{Field, FieldConfig, FieldType, Value, parse_number};

use crate::decimals::get_decimals_for_value;
use crate::mappings::get_mapped_value;
use crate::theme::Theme;
use crate::thresholds::get_threshold_color;
use crate::units::{ValueFormatter, get_value_formatter};

/// Unit used for time fields without an explicit unit.
pub const TIME_UNIT: &str = "dateTimeAsIso";

/// Formatted value ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayValue {
    pub text: String,
    /// Numeric channel; `NaN` serializes as `null`.
    pub numeric: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.prefix.as_deref().unwrap_or_default(),
            self.text,
            self.suffix.as_deref().unwrap_or_default()
        )
    }
}

/// Formats values for one field config.
///
/// The unit formatter is resolved once, so one processor formats every
/// value of a column.
#[derive(Debug, Clone)]
pub struct DisplayProcessor {
    config: FieldConfig,
    formatter: ValueFormatter,
    theme: Theme,
    is_utc: bool,
}

impl DisplayProcessor {
    pub fn new(config: FieldConfig, theme: Theme) -> Self {
        let formatter = get_value_formatter(config.unit.as_deref());
        Self {
            config,
            formatter,
            theme,
            is_utc: false,
        }
    }

    /// Processor for a field; time fields without a unit render as dates.
    pub fn for_field(field: &Field, theme: Theme) -> Self {
        let mut config = field.config().clone();
        if field.field_type() == FieldType::Time && config.unit.is_none() {
            config.unit = Some(TIME_UNIT.to_string());
        }
        Self::new(config, theme)
    }

    /// Render dates in UTC instead of local time.
    #[must_use]
    pub fn with_utc(mut self, is_utc: bool) -> Self {
        self.is_utc = is_utc;
        self
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Process one raw value.
    pub fn display(&self, raw: &Value) -> DisplayValue {
        let mut text = raw.to_text();
        let mut numeric = raw.coerce_numeric();
        let mut color = None;
        let mut prefix = None;
        let mut suffix = None;
        let mut should_format = true;

        if let Some(mapped) = self
            .config
            .mappings
            .as_deref()
            .and_then(|mappings| get_mapped_value(mappings, raw))
        {
            if let Some(n) = parse_number(&mapped.text) {
                numeric = n;
            }
            text = mapped.text;
            color = mapped.color.map(|c| self.theme.resolve_color(&c));
            should_format = false;
        }

        if !numeric.is_nan() {
            if should_format && !matches!(raw, Value::Bool(_)) {
                let info = get_decimals_for_value(numeric.abs(), self.config.decimals);
                let formatted = self.formatter.format(
                    numeric,
                    Some(info.decimals),
                    info.scaled_decimals,
                    self.is_utc,
                );
                text = formatted.text;
                prefix = formatted.prefix;
                suffix = formatted.suffix;
            }
            if color.is_none() {
                color = get_threshold_color(numeric, &self.config, &self.theme);
            }
        }

        if text.is_empty() {
            text = self.config.no_value.clone().unwrap_or_default();
        }

        DisplayValue {
            text,
            numeric,
            color,
            prefix,
            suffix,
        }
    }
}

/// Build a display closure for a field config.
pub fn get_display_processor(
    config: &FieldConfig,
    theme: Option<Theme>,
) -> impl Fn(&Value) -> DisplayValue + use<> {
    let processor = DisplayProcessor::new(config.clone(), theme.unwrap_or_default());
    move |value| processor.display(value)
}
