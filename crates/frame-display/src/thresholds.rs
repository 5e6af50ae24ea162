//! Threshold step resolution.
//!
//! Color is a step function of the value: the step with the highest floor
//! the value has reached applies. No interpolation.

use frame_model::{FieldConfig, Threshold, ThresholdsConfig, ThresholdsMode};

use crate::theme::Theme;

/// Default range for percentage thresholds when the config sets no min/max.
const DEFAULT_MIN: f64 = 0.0;
const DEFAULT_MAX: f64 = 100.0;

/// Pick the step that applies to `value`.
///
/// Steps are assumed sorted ascending. Returns `None` only for an empty list.
///
/// 1. a single step always applies
/// 2. the first step equal to `value` applies
/// 3. otherwise the greatest step strictly below `value`
/// 4. otherwise (below every step, or `NaN`) the first step
pub fn get_active_threshold(value: f64, steps: &[Threshold]) -> Option<&Threshold> {
    let first = steps.first()?;
    if steps.len() == 1 {
        return Some(first);
    }
    if let Some(exact) = steps.iter().find(|step| step.value == value) {
        return Some(exact);
    }

    let mut active: Option<&Threshold> = None;
    for step in steps.iter().filter(|step| step.value < value) {
        if active.is_none_or(|current| step.value > current.value) {
            active = Some(step);
        }
    }
    Some(active.unwrap_or(first))
}

/// Resolve the raw color name of the step that applies to `value`.
pub fn resolve_threshold_color<'a>(value: f64, steps: &'a [Threshold]) -> Option<&'a str> {
    get_active_threshold(value, steps).map(|step| step.color.as_str())
}

/// Resolve a final render color through the theme.
pub fn resolve_color(value: f64, steps: &[Threshold], theme: &Theme) -> Option<String> {
    resolve_threshold_color(value, steps).map(|color| theme.resolve_color(color))
}

/// Map a value into the comparison space of the thresholds config.
///
/// Absolute mode returns the value unchanged. Percentage mode returns
/// `(value - min) / (max - min) * 100` using the field's `min`/`max`
/// (0 and 100 when unset); a zero-width range maps everything to 0.
pub fn threshold_probe(value: f64, thresholds: &ThresholdsConfig, config: &FieldConfig) -> f64 {
    match thresholds.mode {
        ThresholdsMode::Absolute => value,
        ThresholdsMode::Percentage => {
            let min = config.min.unwrap_or(DEFAULT_MIN);
            let max = config.max.unwrap_or(DEFAULT_MAX);
            let range = max - min;
            if range == 0.0 {
                0.0
            } else {
                (value - min) / range * 100.0
            }
        }
    }
}

/// Resolve the themed threshold color for a field value.
pub fn get_threshold_color(value: f64, config: &FieldConfig, theme: &Theme) -> Option<String> {
    let thresholds = config.thresholds.as_ref()?;
    let probe = threshold_probe(value, thresholds, config);
    resolve_color(probe, &thresholds.steps, theme)
}
