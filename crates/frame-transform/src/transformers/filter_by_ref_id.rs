//! Keep frames whose `refId` matches.

use serde::{Deserialize, Serialize};

use frame_model::DataFrame;

use crate::error::Result;
use crate::matcher::{FieldMatcher, validate_pattern};
use crate::registry::{Transformer, parse_options};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterByRefIdOptions {
    /// Name or `/pattern/` matched against each frame's `refId`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
}

/// `filterByRefId`
pub struct FilterByRefIdTransformer;

impl Transformer for FilterByRefIdTransformer {
    fn id(&self) -> &'static str {
        "filterByRefId"
    }

    fn name(&self) -> &'static str {
        "Filter data by query"
    }

    fn description(&self) -> &'static str {
        "Keep only frames produced by the matching queries"
    }

    fn apply(&self, options: &serde_json::Value, frames: &[DataFrame]) -> Result<Vec<DataFrame>> {
        let options: FilterByRefIdOptions = parse_options(self.id(), options)?;
        let Some(include) = options.include.filter(|s| !s.is_empty()) else {
            return Ok(frames.to_vec());
        };
        let matcher = FieldMatcher::parse_or_nothing(&include);
        Ok(frames
            .iter()
            .filter(|frame| frame.ref_id().is_some_and(|ref_id| matcher.is_match(ref_id)))
            .cloned()
            .collect())
    }

    fn diagnostics(&self, options: &serde_json::Value) -> Vec<String> {
        let Ok(options) = parse_options::<FilterByRefIdOptions>(self.id(), options) else {
            return Vec::new();
        };
        match options.include.as_deref().filter(|s| !s.is_empty()).map(validate_pattern) {
            Some(Err(error)) => vec![error.to_string()],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_model::Field;
    use serde_json::json;

    fn frames() -> Vec<DataFrame> {
        ["A", "B", "C"]
            .into_iter()
            .map(|ref_id| {
                DataFrame::new(vec![Field::numbers("v", [1.0])])
                    .unwrap()
                    .with_ref_id(ref_id)
            })
            .collect()
    }

    #[test]
    fn keeps_matching_frames() {
        let output = FilterByRefIdTransformer
            .apply(&json!({"include": "/^(A|C)$/"}), &frames())
            .unwrap();
        let ids: Vec<_> = output.iter().filter_map(DataFrame::ref_id).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn no_include_is_identity() {
        let input = frames();
        assert_eq!(
            FilterByRefIdTransformer.apply(&json!({}), &input).unwrap(),
            input
        );
    }

    #[test]
    fn invalid_include_keeps_nothing_and_is_diagnosed() {
        let options = json!({"include": "/[A/"});
        assert!(FilterByRefIdTransformer.apply(&options, &frames()).unwrap().is_empty());
        assert_eq!(FilterByRefIdTransformer.diagnostics(&options).len(), 1);
        assert!(FilterByRefIdTransformer.diagnostics(&json!({"include": "A"})).is_empty());
    }

    #[test]
    fn frames_without_ref_id_are_dropped() {
        let input = vec![DataFrame::new(vec![Field::numbers("v", [1.0])]).unwrap()];
        let output = FilterByRefIdTransformer
            .apply(&json!({"include": "A"}), &input)
            .unwrap();
        assert!(output.is_empty());
    }
}
