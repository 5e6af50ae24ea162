//! Unit formatters.
//!
//! Each unit id maps to a [`Unit`] variant that knows how to turn a number
//! plus inferred decimals into display text. Scaling units (`short`,
//! `bytes`, time units) divide the value by their factor until it fits and
//! then render with `scaled_decimals` headroom.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use frame_model::format_number;

/// Text produced by a formatter, split into prefix, number and suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormattedValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl FormattedValue {
    fn plain(text: String) -> Self {
        Self {
            prefix: None,
            text,
            suffix: None,
        }
    }

    fn with_suffix(text: String, suffix: &str) -> Self {
        Self {
            prefix: None,
            text,
            suffix: (!suffix.is_empty()).then(|| suffix.to_string()),
        }
    }
}

impl std::fmt::Display for FormattedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.prefix.as_deref().unwrap_or_default(),
            self.text,
            self.suffix.as_deref().unwrap_or_default()
        )
    }
}

const SHORT_SUFFIXES: &[&str] = &[
    "", " K", " Mil", " Bil", " Tri", " Quadr", " Quint", " Sext", " Sept",
];
const IEC_BYTES: &[&str] = &[
    " B", " KiB", " MiB", " GiB", " TiB", " PiB", " EiB", " ZiB", " YiB",
];
const SI_BYTES: &[&str] = &[" B", " kB", " MB", " GB", " TB", " PB", " EB", " ZB", " YB"];

/// Known units. Unknown ids resolve to [`Unit::None`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    None,
    Short,
    Percent,
    PercentUnit,
    Bytes,
    DecBytes,
    Milliseconds,
    Seconds,
    Celsius,
    Fahrenheit,
    DateTimeIso,
    /// `prefix:<text>`
    Prefix(String),
    /// `suffix:<text>`
    Suffix(String),
}

impl Unit {
    /// Resolve a unit id.
    pub fn from_id(id: &str) -> Self {
        if let Some(prefix) = id.strip_prefix("prefix:") {
            return Unit::Prefix(prefix.to_string());
        }
        if let Some(suffix) = id.strip_prefix("suffix:") {
            return Unit::Suffix(suffix.to_string());
        }
        match id {
            "" | "none" => Unit::None,
            "short" => Unit::Short,
            "percent" => Unit::Percent,
            "percentunit" => Unit::PercentUnit,
            "bytes" => Unit::Bytes,
            "decbytes" => Unit::DecBytes,
            "ms" => Unit::Milliseconds,
            "s" => Unit::Seconds,
            "celsius" => Unit::Celsius,
            "fahrenheit" => Unit::Fahrenheit,
            "dateTimeAsIso" => Unit::DateTimeIso,
            other => {
                tracing::debug!(unit = %other, "unknown unit, formatting as none");
                Unit::None
            }
        }
    }

    /// Format a value.
    pub fn format(
        &self,
        value: f64,
        decimals: Option<i32>,
        scaled_decimals: Option<i32>,
        is_utc: bool,
    ) -> FormattedValue {
        match self {
            Unit::None => FormattedValue::plain(to_fixed(value, decimals)),
            Unit::Short => scaled_units(1000.0, SHORT_SUFFIXES, value, decimals, scaled_decimals),
            Unit::Percent => FormattedValue::with_suffix(to_fixed(value, decimals), "%"),
            Unit::PercentUnit => {
                FormattedValue::with_suffix(to_fixed(100.0 * value, decimals), "%")
            }
            Unit::Bytes => scaled_units(1024.0, IEC_BYTES, value, decimals, scaled_decimals),
            Unit::DecBytes => scaled_units(1000.0, SI_BYTES, value, decimals, scaled_decimals),
            Unit::Milliseconds => to_milliseconds(value, decimals, scaled_decimals),
            Unit::Seconds => to_seconds(value, decimals, scaled_decimals),
            Unit::Celsius => FormattedValue::with_suffix(to_fixed(value, decimals), "°C"),
            Unit::Fahrenheit => FormattedValue::with_suffix(to_fixed(value, decimals), "°F"),
            Unit::DateTimeIso => FormattedValue::plain(date_time_as_iso(value, is_utc)),
            Unit::Prefix(prefix) => FormattedValue {
                prefix: Some(prefix.clone()),
                text: to_fixed(value, decimals),
                suffix: None,
            },
            Unit::Suffix(suffix) => FormattedValue::with_suffix(to_fixed(value, decimals), suffix),
        }
    }
}

/// Formatter bound to a unit id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFormatter {
    unit: Unit,
}

impl ValueFormatter {
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn format(
        &self,
        value: f64,
        decimals: Option<i32>,
        scaled_decimals: Option<i32>,
        is_utc: bool,
    ) -> FormattedValue {
        self.unit.format(value, decimals, scaled_decimals, is_utc)
    }
}

/// Look up the formatter for a unit id (`none` when absent or unknown).
pub fn get_value_formatter(unit_id: Option<&str>) -> ValueFormatter {
    ValueFormatter {
        unit: Unit::from_id(unit_id.unwrap_or("none")),
    }
}

/// Round half up, matching how dashboards have always rendered ties.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Most digits rendered after the point; larger requests are clamped.
pub const MAX_DECIMALS: i32 = 20;

/// Render with exactly `decimals` digits after the point.
///
/// `None` or `Some(0)` rounds to an integer without padding. Exponent
/// notation and zero are returned as-is. Requests above [`MAX_DECIMALS`]
/// render with `MAX_DECIMALS` digits.
pub fn to_fixed(value: f64, decimals: Option<i32>) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        return format_number(value);
    }
    let decimals = decimals.map(|d| d.min(MAX_DECIMALS));
    let factor = match decimals {
        Some(d) if d > 0 => 10f64.powi(d),
        _ => 1.0,
    };
    let scaled = value * factor;
    let rounded = if scaled.is_finite() {
        round_half_up(scaled) / factor
    } else {
        value
    };
    let formatted = format_number(rounded);
    if formatted.contains('e') || value == 0.0 {
        return formatted;
    }
    let Some(decimals) = decimals.filter(|d| *d > 0) else {
        return formatted;
    };
    let decimals = decimals as usize;
    let precision = formatted
        .find('.')
        .map_or(0, |pos| formatted.len() - pos - 1);
    if precision >= decimals {
        return formatted;
    }
    let mut padded = formatted;
    if precision == 0 {
        padded.push('.');
    }
    padded.extend(std::iter::repeat_n('0', decimals - precision));
    padded
}

/// Render with `scaled_decimals + additional` digits when scaled headroom is
/// known, else with `decimals`.
pub fn to_fixed_scaled(
    value: f64,
    decimals: Option<i32>,
    scaled_decimals: Option<i32>,
    additional_decimals: i32,
    suffix: &str,
) -> FormattedValue {
    let text = match scaled_decimals {
        Some(scaled) => to_fixed(value, Some(scaled + additional_decimals)),
        None => to_fixed(value, decimals),
    };
    FormattedValue::with_suffix(text, suffix)
}

/// Divide by `factor` until the value fits, picking the matching suffix.
fn scaled_units(
    factor: f64,
    suffixes: &[&str],
    value: f64,
    decimals: Option<i32>,
    scaled_decimals: Option<i32>,
) -> FormattedValue {
    let mut size = value;
    let mut steps = 0usize;
    while size.abs() >= factor {
        steps += 1;
        size /= factor;
        if steps >= suffixes.len() {
            return FormattedValue::plain("NA".to_string());
        }
    }
    let decimals = match scaled_decimals {
        Some(scaled) if steps > 0 => Some(scaled + 3 * steps as i32),
        _ => decimals,
    };
    FormattedValue::with_suffix(to_fixed(size, decimals), suffixes[steps])
}

fn to_milliseconds(
    value: f64,
    decimals: Option<i32>,
    scaled_decimals: Option<i32>,
) -> FormattedValue {
    let abs = value.abs();
    if abs < 1000.0 {
        FormattedValue::with_suffix(to_fixed(value, decimals), " ms")
    } else if abs < 60_000.0 {
        to_fixed_scaled(value / 1000.0, decimals, scaled_decimals, 3, " s")
    } else if abs < 3_600_000.0 {
        to_fixed_scaled(value / 60_000.0, decimals, scaled_decimals, 5, " min")
    } else if abs < 86_400_000.0 {
        to_fixed_scaled(value / 3_600_000.0, decimals, scaled_decimals, 7, " hour")
    } else if abs < 31_536_000_000.0 {
        to_fixed_scaled(value / 86_400_000.0, decimals, scaled_decimals, 8, " day")
    } else {
        to_fixed_scaled(value / 31_536_000_000.0, decimals, scaled_decimals, 10, " year")
    }
}

fn to_seconds(value: f64, decimals: Option<i32>, scaled_decimals: Option<i32>) -> FormattedValue {
    let abs = value.abs();
    if abs < 1.0 && abs > 0.0 {
        to_milliseconds(value * 1000.0, decimals, scaled_decimals)
    } else if abs < 60.0 {
        FormattedValue::with_suffix(to_fixed(value, decimals), " s")
    } else if abs < 3600.0 {
        to_fixed_scaled(value / 60.0, decimals, scaled_decimals, 1, " min")
    } else if abs < 86_400.0 {
        to_fixed_scaled(value / 3600.0, decimals, scaled_decimals, 4, " hour")
    } else if abs < 604_800.0 {
        to_fixed_scaled(value / 86_400.0, decimals, scaled_decimals, 5, " day")
    } else if abs < 31_536_000.0 {
        to_fixed_scaled(value / 604_800.0, decimals, scaled_decimals, 6, " week")
    } else {
        to_fixed_scaled(value / 3.155_69e7, decimals, scaled_decimals, 7, " year")
    }
}

/// Format epoch milliseconds as `YYYY-MM-DD HH:MM:SS`.
fn date_time_as_iso(epoch_ms: f64, is_utc: bool) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp_millis(epoch_ms as i64) else {
        return format_number(epoch_ms);
    };
    if is_utc {
        utc.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        utc.with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}
