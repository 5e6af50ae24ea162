//! Data frame transformers and pipeline execution.
//!
//! - **matcher**: name / `/regex/` field matching and include/exclude filters
//! - **reducers**: per-field statistics (`min`, `max`, `delta`, ...)
//! - **registry**: the [`Transformer`] trait and id-keyed registry
//! - **transformers**: built-in stages (`filterFieldsByName`, `filterByRefId`,
//!   `organize`, `append`, `reduce`)
//! - **pipeline**: ordered stage execution that degrades instead of failing
//!
//! Transformers are pure: they borrow input frames, never mutate them, and
//! build new frames that may share field value storage with the input.

pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod reducers;
pub mod registry;
pub mod transformers;

pub use error::{MatcherError, RegistryError, Result, TransformError};
pub use matcher::{FieldMatcher, NameFilter, validate_pattern};
pub use pipeline::{
    PipelineResult, StageWarning, TransformerConfig, WarningKind, transform,
    transform_with_registry,
};
pub use reducers::ReducerId;
pub use registry::{Transformer, TransformerRegistry, parse_options, standard_registry};
