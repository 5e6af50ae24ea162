//! Columnar data frame model.
//!
//! This crate provides the data model every other crate in the workspace
//! operates on:
//!
//! - **value**: dynamically typed cells with total numeric/text coercion
//! - **field**: typed columns with shared, immutable value storage
//! - **config**: per-field display configuration (units, thresholds, mappings)
//! - **frame**: [`DataFrame`], an ordered list of equally long fields
//! - **dto**: the wire form frames round-trip through
//! - **adapter**: row-oriented JSON to frame conversion

pub mod adapter;
pub mod config;
pub mod dto;
pub mod error;
pub mod field;
pub mod frame;
pub mod value;

pub use adapter::array_to_data_frame;
pub use config::{
    DataLink, FieldConfig, SpecialMatch, Threshold, ThresholdsConfig, ThresholdsMode, ValueMapping,
};
pub use dto::{
    DataFrameDto, FieldDto, frames_from_json, frames_to_json, from_data_frame_dto,
    to_data_frame_dto,
};
pub use error::{FrameError, Result};
pub use field::{Field, FieldType, guess_field_type, guess_field_type_from_value};
pub use frame::DataFrame;
pub use value::{Value, format_number, parse_number};
