//! Pipeline execution.
//!
//! Stages run in order, each over the previous stage's output. A stage that
//! cannot run (unknown id, malformed options, runtime failure) is dropped:
//! frames pass through unchanged and a [`StageWarning`] is recorded. A stage
//! that runs but reports diagnostics, such as a filter pattern that does not
//! compile, keeps its output and records one warning per diagnostic. The
//! pipeline itself never fails.

use serde::{Deserialize, Serialize};

use frame_model::DataFrame;

use crate::error::TransformError;
use crate::registry::{TransformerRegistry, standard_registry};

/// One serialized pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformerConfig {
    pub id: String,
    /// Transformer-specific options, validated by the transformer.
    #[serde(default)]
    pub options: serde_json::Value,
    /// Disabled stages are skipped silently.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl TransformerConfig {
    pub fn new(id: impl Into<String>, options: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            options,
            disabled: false,
        }
    }
}

/// Why a stage was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    UnknownTransformer,
    InvalidOptions,
    StageFailed,
    /// The stage ran, but a pattern failed to compile and matched nothing.
    InvalidPattern,
}

/// Non-fatal report about one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageWarning {
    /// Position of the stage in the config list.
    pub index: usize,
    pub id: String,
    pub kind: WarningKind,
    pub message: String,
}

impl std::fmt::Display for StageWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stage {} ({}): {}", self.index, self.id, self.message)
    }
}

/// Output of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineResult {
    pub frames: Vec<DataFrame>,
    pub warnings: Vec<StageWarning>,
}

impl PipelineResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run a pipeline against an explicit registry.
pub fn transform_with_registry(
    registry: &TransformerRegistry,
    configs: &[TransformerConfig],
    frames: &[DataFrame],
) -> PipelineResult {
    let span = tracing::info_span!("pipeline", stages = configs.len(), frames = frames.len());
    let _guard = span.enter();

    let mut current = frames.to_vec();
    let mut warnings = Vec::new();

    for (index, config) in configs.iter().enumerate() {
        if config.disabled {
            tracing::debug!(index, id = %config.id, "skipping disabled stage");
            continue;
        }

        let transformer = match registry.get(&config.id) {
            Ok(transformer) => transformer,
            Err(error) => {
                tracing::warn!(index, id = %config.id, "unknown transformer, stage dropped");
                warnings.push(StageWarning {
                    index,
                    id: config.id.clone(),
                    kind: WarningKind::UnknownTransformer,
                    message: error.to_string(),
                });
                continue;
            }
        };

        match transformer.apply(&config.options, &current) {
            Ok(next) => {
                tracing::debug!(
                    index,
                    id = %config.id,
                    frames_in = current.len(),
                    frames_out = next.len(),
                    "applied stage"
                );
                for message in transformer.diagnostics(&config.options) {
                    tracing::warn!(index, id = %config.id, %message, "stage reported a problem");
                    warnings.push(StageWarning {
                        index,
                        id: config.id.clone(),
                        kind: WarningKind::InvalidPattern,
                        message,
                    });
                }
                current = next;
            }
            Err(error) => {
                let kind = match &error {
                    TransformError::InvalidOptions { .. } => WarningKind::InvalidOptions,
                    _ => WarningKind::StageFailed,
                };
                tracing::warn!(index, id = %config.id, %error, "stage failed, dropped");
                warnings.push(StageWarning {
                    index,
                    id: config.id.clone(),
                    kind,
                    message: error.to_string(),
                });
            }
        }
    }

    tracing::info!(
        frames = current.len(),
        warnings = warnings.len(),
        "pipeline complete"
    );
    PipelineResult {
        frames: current,
        warnings,
    }
}

/// Run a pipeline against the standard registry, returning only frames.
///
/// An empty config list returns the input unchanged.
pub fn transform(configs: &[TransformerConfig], frames: &[DataFrame]) -> Vec<DataFrame> {
    transform_with_registry(standard_registry(), configs, frames).frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_model::Field;
    use serde_json::json;

    fn frames() -> Vec<DataFrame> {
        vec![
            DataFrame::new(vec![
                Field::numbers("a", [1.0]),
                Field::numbers("b", [2.0]),
            ])
            .unwrap(),
        ]
    }

    #[test]
    fn unknown_stage_is_skipped_with_warning() {
        let configs = vec![
            TransformerConfig::new("doesNotExist", json!({})),
            TransformerConfig::new("organize", json!({"excludeByName": {"a": true}})),
        ];
        let result = transform_with_registry(standard_registry(), &configs, &frames());
        assert_eq!(result.frames[0].field_names(), vec!["b"]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].index, 0);
        assert_eq!(result.warnings[0].kind, WarningKind::UnknownTransformer);
    }

    #[test]
    fn invalid_options_drop_only_that_stage() {
        let configs = vec![
            TransformerConfig::new("organize", json!({"indexByName": "nope"})),
            TransformerConfig::new("filterFieldsByName", json!({"includePattern": "a"})),
        ];
        let result = transform_with_registry(standard_registry(), &configs, &frames());
        assert_eq!(result.frames[0].field_names(), vec!["a"]);
        assert_eq!(result.warnings[0].kind, WarningKind::InvalidOptions);
    }

    #[test]
    fn invalid_pattern_is_reported_but_stage_runs() {
        let configs = vec![TransformerConfig::new(
            "filterFieldsByName",
            json!({"includePattern": "/(a/"}),
        )];
        let result = transform_with_registry(standard_registry(), &configs, &frames());
        assert_eq!(result.frames[0].width(), 0);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::InvalidPattern);
        assert_eq!(result.warnings[0].index, 0);
    }

    #[test]
    fn disabled_stage_is_silent() {
        let mut config = TransformerConfig::new("organize", json!({"excludeByName": {"a": true}}));
        config.disabled = true;
        let result = transform_with_registry(standard_registry(), &[config], &frames());
        assert_eq!(result.frames, frames());
        assert!(!result.has_warnings());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: TransformerConfig = serde_json::from_value(json!({"id": "append"})).unwrap();
        assert_eq!(config.options, serde_json::Value::Null);
        assert!(!config.disabled);
        assert_eq!(serde_json::to_value(&config).unwrap(), json!({"id": "append", "options": null}));
    }
}
