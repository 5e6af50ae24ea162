//! Pipeline documents and frame inputs.
//!
//! A pipeline document lists stages under `transformations`, in JSON or
//! TOML (picked by file extension):
//!
//! ```toml
//! [[transformations]]
//! id = "organize"
//! options = { excludeByName = { time = true } }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use frame_model::{DataFrame, array_to_data_frame, frames_from_json};
use frame_transform::TransformerConfig;

/// Serialized pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineDocument {
    #[serde(default)]
    pub transformations: Vec<TransformerConfig>,
}

/// Syntax of a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// `.toml` files are TOML; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Parse a pipeline document.
///
/// # Errors
///
/// Returns an error when the text is not a valid document in `format`.
pub fn parse_pipeline(raw: &str, format: DocumentFormat) -> Result<PipelineDocument> {
    match format {
        DocumentFormat::Json => serde_json::from_str(raw).context("parse pipeline JSON"),
        DocumentFormat::Toml => toml::from_str(raw).context("parse pipeline TOML"),
    }
}

/// Read a pipeline document from disk.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_pipeline(path: &Path) -> Result<PipelineDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read pipeline {}", path.display()))?;
    let document = parse_pipeline(&raw, DocumentFormat::from_path(path))
        .with_context(|| format!("load pipeline {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        stages = document.transformations.len(),
        "loaded pipeline"
    );
    Ok(document)
}

/// Parse frames: a JSON array of frame DTOs, or with `rows` an array of
/// flat objects turned into a single frame.
///
/// # Errors
///
/// Returns an error when the JSON is malformed or does not have the
/// expected shape.
pub fn parse_frames(raw: &str, rows: bool) -> Result<Vec<DataFrame>> {
    if !rows {
        return frames_from_json(raw).context("parse frames JSON");
    }
    let value: serde_json::Value = serde_json::from_str(raw).context("parse rows JSON")?;
    let serde_json::Value::Array(items) = value else {
        bail!("rows input must be a JSON array");
    };
    let frame = array_to_data_frame(&items).context("convert rows to frame")?;
    Ok(vec![frame])
}

/// Read frames from disk.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_frames(path: &Path, rows: bool) -> Result<Vec<DataFrame>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read frames {}", path.display()))?;
    let frames = parse_frames(&raw, rows).with_context(|| format!("load {}", path.display()))?;
    tracing::debug!(path = %path.display(), frames = frames.len(), "loaded frames");
    Ok(frames)
}
