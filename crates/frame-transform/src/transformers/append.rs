//! Merge all frames into one by field name.

use std::collections::HashMap;

use frame_model::{DataFrame, Field, Value};

use crate::error::Result;
use crate::registry::Transformer;

/// `append`
///
/// Fields are unioned by name in first-seen order across frames; rows are
/// concatenated in frame order. A frame lacking a field contributes null
/// for it. The first field seen under a name supplies type, config and
/// labels. Every field of the first frame is kept; in later frames only the
/// first field with a given name contributes values, and repeats are skipped.
pub struct AppendTransformer;

impl Transformer for AppendTransformer {
    fn id(&self) -> &'static str {
        "append"
    }

    fn name(&self) -> &'static str {
        "Merge series"
    }

    fn description(&self) -> &'static str {
        "Merge all frames into a single frame, unioning fields by name"
    }

    fn apply(&self, _options: &serde_json::Value, frames: &[DataFrame]) -> Result<Vec<DataFrame>> {
        if frames.len() < 2 {
            return Ok(frames.to_vec());
        }
        Ok(vec![append_frames(frames)?])
    }
}

fn append_frames(frames: &[DataFrame]) -> Result<DataFrame> {
    let total_rows: usize = frames.iter().map(DataFrame::length).sum();

    // Union of fields. The first frame's fields are all kept, in order.
    let mut templates: Vec<&Field> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();
    for (frame_index, frame) in frames.iter().enumerate() {
        for field in frame.fields() {
            if frame_index == 0 {
                index_by_name.entry(field.name()).or_insert(templates.len());
                templates.push(field);
            } else if !index_by_name.contains_key(field.name()) {
                index_by_name.insert(field.name(), templates.len());
                templates.push(field);
            }
        }
    }

    let mut columns: Vec<Vec<Value>> = (0..templates.len())
        .map(|_| Vec::with_capacity(total_rows))
        .collect();

    for (frame_index, frame) in frames.iter().enumerate() {
        let mut sources: Vec<Option<&Field>> = vec![None; templates.len()];
        if frame_index == 0 {
            for (position, field) in frame.fields().iter().enumerate() {
                sources[position] = Some(field);
            }
        } else {
            for field in frame.fields() {
                let Some(&position) = index_by_name.get(field.name()) else {
                    continue;
                };
                if sources[position].is_none() {
                    sources[position] = Some(field);
                } else {
                    tracing::debug!(
                        frame_index,
                        field = %field.name(),
                        "skipping repeated field name"
                    );
                }
            }
        }

        for (column, source) in columns.iter_mut().zip(&sources) {
            match source {
                Some(field) => column.extend_from_slice(field.values()),
                None => column.extend(std::iter::repeat_n(Value::Null, frame.length())),
            }
        }
    }

    let fields = templates
        .into_iter()
        .zip(columns)
        .map(|(template, values)| template.with_values(values))
        .collect();

    tracing::debug!(
        frames = frames.len(),
        rows = total_rows,
        "appended frames"
    );
    Ok(DataFrame::with_length(fields, total_rows)?)
}
