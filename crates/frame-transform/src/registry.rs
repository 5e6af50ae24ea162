//! Transformer trait and registry.
//!
//! The [`Transformer`] trait defines the interface every pipeline stage
//! implements. Transformers are registered in a [`TransformerRegistry`]
//! keyed by their stable string id, and the pipeline executor resolves each
//! configured stage against it.
//!
//! # Example
//!
//! ```ignore
//! use frame_transform::registry::standard_registry;
//!
//! let organize = standard_registry().get("organize")?;
//! let frames = organize.apply(&options, &frames)?;
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;

use frame_model::DataFrame;

use crate::error::{RegistryError, Result, TransformError};
use crate::transformers::{
    AppendTransformer, FilterByRefIdTransformer, FilterFieldsByNameTransformer,
    OrganizeFieldsTransformer, ReduceTransformer,
};

/// A pure pipeline stage.
///
/// Implementors must not keep state between calls: the same options and
/// input frames always produce the same output. Input frames are borrowed
/// and never mutated; output frames may share field value storage with
/// them.
pub trait Transformer: Send + Sync {
    /// Stable id used in serialized pipeline configs (e.g. `"organize"`).
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "Transformer"
    }

    /// Apply the stage.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidOptions`] when `options` does not
    /// decode into the transformer's options type, or another
    /// [`TransformError`] when the frames cannot be reshaped.
    fn apply(&self, options: &serde_json::Value, frames: &[DataFrame]) -> Result<Vec<DataFrame>>;

    /// Non-fatal problems with `options` that [`Transformer::apply`] works
    /// around instead of failing, such as a pattern that matches nothing
    /// because it does not compile.
    fn diagnostics(&self, _options: &serde_json::Value) -> Vec<String> {
        Vec::new()
    }
}

/// Decode a transformer's options; `null` decodes as the default.
///
/// # Errors
///
/// Returns [`TransformError::InvalidOptions`] on a shape mismatch.
pub fn parse_options<T>(id: &'static str, options: &serde_json::Value) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if options.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(options.clone())
        .map_err(|source| TransformError::InvalidOptions { id, source })
}

/// Transformers indexed by id.
///
/// Registration happens before any lookups; afterwards the registry is
/// read-only and safe to share across threads.
#[derive(Default)]
pub struct TransformerRegistry {
    transformers: BTreeMap<&'static str, Box<dyn Transformer>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transformer under its id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] if the id is taken.
    pub fn register(
        &mut self,
        transformer: Box<dyn Transformer>,
    ) -> std::result::Result<(), RegistryError> {
        let id = transformer.id();
        if self.transformers.contains_key(id) {
            return Err(RegistryError::DuplicateId(id.to_string()));
        }
        self.transformers.insert(id, transformer);
        Ok(())
    }

    /// Look up a transformer.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unregistered id.
    pub fn get(&self, id: &str) -> std::result::Result<&dyn Transformer, RegistryError> {
        self.transformers
            .get(id)
            .map(AsRef::as_ref)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.transformers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Registered transformers ordered by id.
    pub fn list(&self) -> impl Iterator<Item = &dyn Transformer> + '_ {
        self.transformers.values().map(AsRef::as_ref)
    }
}

impl std::fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformerRegistry")
            .field("ids", &self.transformers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Cached registry of the built-in transformers.
static STANDARD_REGISTRY: OnceLock<TransformerRegistry> = OnceLock::new();

/// Returns the registry with every built-in transformer.
///
/// Built on first access.
///
/// # Registered Transformers
///
/// `append`, `filterByRefId`, `filterFieldsByName`, `organize`, `reduce`
pub fn standard_registry() -> &'static TransformerRegistry {
    STANDARD_REGISTRY.get_or_init(build_standard_registry)
}

fn build_standard_registry() -> TransformerRegistry {
    let mut registry = TransformerRegistry::new();
    let builtins: [Box<dyn Transformer>; 5] = [
        Box::new(FilterFieldsByNameTransformer),
        Box::new(FilterByRefIdTransformer),
        Box::new(OrganizeFieldsTransformer),
        Box::new(AppendTransformer),
        Box::new(ReduceTransformer),
    ];
    for transformer in builtins {
        if let Err(error) = registry.register(transformer) {
            tracing::error!(%error, "built-in transformer registration failed");
        }
    }
    tracing::debug!(count = registry.len(), "standard transformer registry built");
    registry
}
