//! Decimal inference.
//!
//! Picks how many digits to render for a value when the field config does
//! not pin `decimals`. The value is bucketed into a "nice" step size
//! (1, 2, 2.5, 5 or 10 times a power of ten) and the digit count follows
//! from that step. Visual output depends on the exact digit counts, so the
//! rules below are deliberately literal.

use serde::Serialize;

/// Digits to render for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecimalInfo {
    /// Decimals for the literal value.
    pub decimals: i32,
    /// Decimals when a unit scales the value (`1.2 K`, `3.4 MiB`).
    /// `None` when decimals were pinned explicitly.
    pub scaled_decimals: Option<i32>,
}

impl DecimalInfo {
    /// Explicit decimals, no scaled headroom.
    pub fn pinned(decimals: i32) -> Self {
        Self {
            decimals,
            scaled_decimals: None,
        }
    }
}

/// Infer decimals for a representative positive magnitude.
///
/// - an explicit `decimal_override` wins immediately
/// - `norm = value / 10^floor(log10(value))` lies in `[1, 10)` and picks the
///   step: `< 1.5` → 1, `< 3` → 2 (2.5 above 2.25, one extra digit),
///   `< 7.5` → 5, else 10
/// - integral values always render with 0 decimals
/// - `scaled_decimals = decimals - floor(log10(step)) + 2`
///
/// Zero, negative and non-finite inputs have no logarithm; they get 0
/// decimals. Callers pass the absolute value of signed numbers.
pub fn get_decimals_for_value(value: f64, decimal_override: Option<i32>) -> DecimalInfo {
    if let Some(decimals) = decimal_override {
        return DecimalInfo::pinned(decimals);
    }
    if !value.is_finite() || value <= 0.0 {
        return DecimalInfo::pinned(0);
    }

    let exponent = value.log10().floor();
    let mut dec = -(exponent as i32) + 1;
    let magn = 10f64.powi(exponent as i32);
    let norm = value / magn;

    let mut size = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        if norm > 2.25 {
            dec += 1;
            2.5
        } else {
            2.0
        }
    } else if norm < 7.5 {
        5.0
    } else {
        10.0
    };
    size *= magn;

    if value % 1.0 == 0.0 {
        dec = 0;
    }

    let decimals = dec.max(0);
    let scaled_decimals = decimals - size.log10().floor() as i32 + 2;
    DecimalInfo {
        decimals,
        scaled_decimals: Some(scaled_decimals),
    }
}
