//! Value display processing.
//!
//! Turns a raw cell value plus its field config into a [`DisplayValue`]:
//!
//! - **decimals**: digit-count inference for unpinned configs
//! - **units**: unit formatters (`short`, `bytes`, `ms`, `percent`, ...)
//! - **mappings**: value, range and special-value text replacement
//! - **thresholds**: step-function color resolution
//! - **theme**: named color lookup per light/dark mode
//! - **processor**: the per-field pipeline tying the above together

pub mod decimals;
pub mod mappings;
pub mod processor;
pub mod theme;
pub mod thresholds;
pub mod units;

pub use decimals::{DecimalInfo, get_decimals_for_value};
pub use mappings::{MappedValue, get_mapped_value};
pub use processor::{DisplayProcessor, DisplayValue, get_display_processor};
pub use theme::{Theme, ThemeMode};
pub use thresholds::{
    get_active_threshold, get_threshold_color, resolve_color, resolve_threshold_color,
};
pub use units::{
    FormattedValue, MAX_DECIMALS, Unit, ValueFormatter, get_value_formatter, to_fixed,
};
