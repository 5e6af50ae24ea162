//! Data frame type shared across data sources.
//!
//! A [`DataFrame`] is an ordered list of [`Field`]s sharing one row count.
//! Field names need not be unique; name lookups return the first match.
//! Name, `refId` and `meta` are provenance: transformers carry them along
//! without interpreting them.

use crate::error::{FrameError, Result};
use crate::field::Field;
use crate::value::Value;

/// Columnar table of equally long fields.
///
/// Construction validates the length invariant, so every frame handed to a
/// transformer satisfies it. Frames are immutable; reshaping builds a new
/// frame (see [`DataFrame::with_fields`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFrame {
    name: Option<String>,
    ref_id: Option<String>,
    meta: Option<serde_json::Value>,
    fields: Vec<Field>,
    length: usize,
}

impl DataFrame {
    /// Create a frame, taking the row count from the first field.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::LengthMismatch`] if fields differ in length.
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        let length = fields.first().map_or(0, Field::len);
        Self::with_length(fields, length)
    }

    /// Create a frame with an explicit row count.
    ///
    /// Used for frames whose field list may be empty but whose row count
    /// must still be reported.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::LengthMismatch`] if any field has a different length.
    pub fn with_length(fields: Vec<Field>, length: usize) -> Result<Self> {
        check_lengths(&fields, length)?;
        Ok(Self {
            name: None,
            ref_id: None,
            meta: None,
            fields,
            length,
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Build a sibling frame with the same provenance and row count but a
    /// different field list.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::LengthMismatch`] if a field does not have
    /// [`DataFrame::length`] values.
    pub fn with_fields(&self, fields: Vec<Field>) -> Result<Self> {
        check_lengths(&fields, self.length)?;
        Ok(Self {
            name: self.name.clone(),
            ref_id: self.ref_id.clone(),
            meta: self.meta.clone(),
            fields,
            length: self.length,
        })
    }

    /// Build a frame with the same name, `refId` and `meta` but a new
    /// field list and row count.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::LengthMismatch`] if a field does not have
    /// `length` values.
    pub fn reshaped(&self, fields: Vec<Field>, length: usize) -> Result<Self> {
        check_lengths(&fields, length)?;
        Ok(Self {
            name: self.name.clone(),
            ref_id: self.ref_id.clone(),
            meta: self.meta.clone(),
            fields,
            length,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn ref_id(&self) -> Option<&str> {
        self.ref_id.as_deref()
    }

    pub fn meta(&self) -> Option<&serde_json::Value> {
        self.meta.as_ref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Row count shared by all fields.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns true when the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of fields.
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    /// First field with the given name.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Index of the first field with the given name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(Field::name).collect()
    }

    /// Values of one row in field order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.length {
            return None;
        }
        Some(
            self.fields
                .iter()
                .filter_map(|field| field.get(index))
                .collect(),
        )
    }

    /// Consume the frame, returning its fields.
    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

fn check_lengths(fields: &[Field], expected: usize) -> Result<()> {
    for field in fields {
        if field.len() != expected {
            return Err(FrameError::LengthMismatch {
                field: field.name().to_string(),
                expected,
                actual: field.len(),
            });
        }
    }
    Ok(())
}
