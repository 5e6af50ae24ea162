//! Serialization form of data frames.
//!
//! The DTO is the shape frames take on the wire and in persisted documents:
//!
//! ```json
//! { "name": "cpu", "refId": "A", "fields": [
//!     { "name": "time", "type": "time", "config": {}, "values": [1, 2] } ] }
//! ```
//!
//! Converting a well-formed DTO to a [`DataFrame`] and back reproduces it
//! exactly; absent optional keys stay absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;
use crate::error::{FrameError, Result};
use crate::field::{Field, FieldType, guess_field_type};
use crate::frame::DataFrame;
use crate::value::Value;

/// Wire form of a [`DataFrame`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFrameDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub fields: Vec<FieldDto>,
}

/// Wire form of a [`Field`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDto {
    pub name: String,
    /// Guessed from name and values when absent.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub config: FieldConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub values: Vec<Value>,
}

/// Serialize a frame into its DTO.
pub fn to_data_frame_dto(frame: &DataFrame) -> DataFrameDto {
    DataFrameDto {
        name: frame.name().map(str::to_string),
        ref_id: frame.ref_id().map(str::to_string),
        meta: frame.meta().cloned(),
        fields: frame.fields().iter().map(to_field_dto).collect(),
    }
}

fn to_field_dto(field: &Field) -> FieldDto {
    FieldDto {
        name: field.name().to_string(),
        field_type: Some(field.field_type()),
        config: field.config().clone(),
        labels: field.labels().cloned(),
        values: field.values().to_vec(),
    }
}

/// Build a frame from its DTO.
///
/// # Errors
///
/// Returns [`FrameError::LengthMismatch`] when the fields carry different
/// numbers of values.
pub fn from_data_frame_dto(dto: DataFrameDto) -> Result<DataFrame> {
    let DataFrameDto {
        name,
        ref_id,
        meta,
        fields,
    } = dto;

    let fields: Vec<Field> = fields.into_iter().map(from_field_dto).collect();
    let mut frame = DataFrame::new(fields)?;
    if let Some(name) = name {
        frame = frame.with_name(name);
    }
    if let Some(ref_id) = ref_id {
        frame = frame.with_ref_id(ref_id);
    }
    if let Some(meta) = meta {
        frame = frame.with_meta(meta);
    }
    tracing::trace!(
        name = frame.name().unwrap_or_default(),
        fields = frame.width(),
        rows = frame.length(),
        "frame decoded"
    );
    Ok(frame)
}

fn from_field_dto(dto: FieldDto) -> Field {
    let field_type = dto
        .field_type
        .unwrap_or_else(|| guess_field_type(&dto.name, &dto.values));
    let mut field = Field::new(dto.name, field_type, dto.values).with_config(dto.config);
    if let Some(labels) = dto.labels {
        field = field.with_labels(labels);
    }
    field
}

impl From<&DataFrame> for DataFrameDto {
    fn from(frame: &DataFrame) -> Self {
        to_data_frame_dto(frame)
    }
}

impl TryFrom<DataFrameDto> for DataFrame {
    type Error = FrameError;

    fn try_from(dto: DataFrameDto) -> Result<Self> {
        from_data_frame_dto(dto)
    }
}

/// Parse a JSON array of DTOs into frames.
///
/// # Errors
///
/// Returns [`FrameError::Json`] for malformed JSON and
/// [`FrameError::LengthMismatch`] for ragged frames.
pub fn frames_from_json(raw: &str) -> Result<Vec<DataFrame>> {
    let dtos: Vec<DataFrameDto> = serde_json::from_str(raw)?;
    dtos.into_iter().map(from_data_frame_dto).collect()
}

/// Serialize frames as a pretty JSON array of DTOs.
///
/// # Errors
///
/// Returns [`FrameError::Json`] if serialization fails.
pub fn frames_to_json(frames: &[DataFrame]) -> Result<String> {
    let dtos: Vec<DataFrameDto> = frames.iter().map(to_data_frame_dto).collect();
    Ok(serde_json::to_string_pretty(&dtos)?)
}
