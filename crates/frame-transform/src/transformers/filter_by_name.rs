//! Keep fields whose names pass an include/exclude rule.

use serde::{Deserialize, Serialize};

use frame_model::DataFrame;

use crate::error::Result;
use crate::matcher::NameFilter;
use crate::registry::{Transformer, parse_options};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFieldsByNameOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_pattern: Option<String>,
}

/// `filterFieldsByName`
pub struct FilterFieldsByNameTransformer;

impl Transformer for FilterFieldsByNameTransformer {
    fn id(&self) -> &'static str {
        "filterFieldsByName"
    }

    fn name(&self) -> &'static str {
        "Filter by name"
    }

    fn description(&self) -> &'static str {
        "Keep only fields whose names match the include pattern and not the exclude pattern"
    }

    fn apply(&self, options: &serde_json::Value, frames: &[DataFrame]) -> Result<Vec<DataFrame>> {
        let options: FilterFieldsByNameOptions = parse_options(self.id(), options)?;
        if options.include_pattern.is_none() && options.exclude_pattern.is_none() {
            return Ok(frames.to_vec());
        }
        let filter = NameFilter::new(
            options.include_pattern.as_deref(),
            options.exclude_pattern.as_deref(),
        );

        let mut output = Vec::with_capacity(frames.len());
        for frame in frames {
            let fields = frame
                .fields()
                .iter()
                .filter(|field| filter.passes(field.name()))
                .cloned()
                .collect();
            output.push(frame.with_fields(fields)?);
        }
        Ok(output)
    }

    fn diagnostics(&self, options: &serde_json::Value) -> Vec<String> {
        let Ok(options) = parse_options::<FilterFieldsByNameOptions>(self.id(), options) else {
            return Vec::new();
        };
        let (_, errors) = NameFilter::compile(
            options.include_pattern.as_deref(),
            options.exclude_pattern.as_deref(),
        );
        errors.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_model::Field;
    use serde_json::json;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Field::numbers("startsWithA", [1.0]),
            Field::numbers("B", [2.0]),
        ])
        .unwrap()
    }

    #[test]
    fn frames_left_without_fields_are_kept() {
        let output = FilterFieldsByNameTransformer
            .apply(&json!({"includePattern": "nothing"}), &[frame()])
            .unwrap();
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].width(), 0);
        assert_eq!(output[0].length(), 1);
    }

    #[test]
    fn kept_fields_share_values() {
        let input = frame();
        let output = FilterFieldsByNameTransformer
            .apply(&json!({"includePattern": "B"}), std::slice::from_ref(&input))
            .unwrap();
        assert!(output[0].fields()[0].shares_values_with(&input.fields()[1]));
    }

    #[test]
    fn invalid_patterns_are_diagnosed() {
        let options = json!({"includePattern": "/(startsWith/", "excludePattern": "B"});
        let diagnostics = FilterFieldsByNameTransformer.diagnostics(&options);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("(startsWith"));
        assert!(
            FilterFieldsByNameTransformer
                .diagnostics(&json!({"includePattern": "/^B$/"}))
                .is_empty()
        );
    }

    #[test]
    fn malformed_options_are_rejected() {
        assert!(
            FilterFieldsByNameTransformer
                .apply(&json!({"includePattern": 3}), &[frame()])
                .is_err()
        );
    }
}
