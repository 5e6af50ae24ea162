//! Reorder, drop and rename fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use frame_model::{DataFrame, Field};

use crate::error::{Result, TransformError};
use crate::registry::{Transformer, parse_options};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizeFieldsOptions {
    #[serde(default)]
    pub index_by_name: BTreeMap<String, i64>,
    #[serde(default)]
    pub exclude_by_name: BTreeMap<String, bool>,
    #[serde(default)]
    pub rename_by_name: BTreeMap<String, String>,
}

/// `organize`
pub struct OrganizeFieldsTransformer;

impl Transformer for OrganizeFieldsTransformer {
    fn id(&self) -> &'static str {
        "organize"
    }

    fn name(&self) -> &'static str {
        "Organize fields"
    }

    fn description(&self) -> &'static str {
        "Order, exclude and rename fields"
    }

    fn apply(&self, options: &serde_json::Value, frames: &[DataFrame]) -> Result<Vec<DataFrame>> {
        let options: OrganizeFieldsOptions = parse_options(self.id(), options)?;
        frames
            .iter()
            .map(|frame| {
                frame
                    .with_fields(organize_fields(frame.fields(), &options))
                    .map_err(TransformError::from)
            })
            .collect()
    }
}

/// Drop excluded fields, then stable-sort: indexed fields by their index,
/// unindexed fields after them in source order. Renames apply last.
fn organize_fields(fields: &[Field], options: &OrganizeFieldsOptions) -> Vec<Field> {
    let mut kept: Vec<&Field> = fields
        .iter()
        .filter(|field| {
            !options
                .exclude_by_name
                .get(field.name())
                .copied()
                .unwrap_or(false)
        })
        .collect();

    kept.sort_by_key(|field| match options.index_by_name.get(field.name()) {
        Some(index) => (0, *index),
        None => (1, 0),
    });

    kept.into_iter()
        .map(|field| match options.rename_by_name.get(field.name()) {
            Some(name) if !name.is_empty() => field.renamed(name.as_str()),
            _ => field.clone(),
        })
        .collect()
}
