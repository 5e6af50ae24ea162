use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use frame_display::{DisplayProcessor, DisplayValue, Theme, ThemeMode};
use frame_model::{FieldConfig, Value, frames_to_json};
use frame_transform::{PipelineResult, standard_registry, transform_with_registry};
use frame_cli::config::{PipelineDocument, load_frames, load_pipeline};
use frame_cli::summary::{RenderOptions, print_frames, print_warnings, transformers_table};

use crate::cli::{DisplayArgs, FormatArgs, OutputArg, RunArgs, ThemeArg};

pub fn run_pipeline(args: &RunArgs) -> Result<PipelineResult> {
    let span = info_span!("run", frames = %args.frames.display());
    let _guard = span.enter();

    let frames = load_frames(&args.frames, args.rows)?;
    let document = match &args.pipeline {
        Some(path) => load_pipeline(path)?,
        None => PipelineDocument::default(),
    };
    info!(
        frames = frames.len(),
        stages = document.transformations.len(),
        "running pipeline"
    );

    let result = transform_with_registry(standard_registry(), &document.transformations, &frames);
    print_warnings(&result.warnings);

    match args.output {
        OutputArg::Json => println!("{}", frames_to_json(&result.frames)?),
        OutputArg::Table => {
            let options = RenderOptions {
                display: !args.no_display,
                theme: theme(&args.display),
                utc: args.display.utc,
            };
            print_frames(&result.frames, &options);
        }
    }
    Ok(result)
}

pub fn run_transformers() -> Result<()> {
    println!("{}", transformers_table(standard_registry()));
    Ok(())
}

pub fn run_format(args: &FormatArgs) -> Result<DisplayValue> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read field config {}", path.display()))?;
            serde_json::from_str::<FieldConfig>(&raw)
                .with_context(|| format!("parse field config {}", path.display()))?
        }
        None => FieldConfig::default(),
    };
    if let Some(unit) = &args.unit {
        config.unit = Some(unit.clone());
    }
    if let Some(decimals) = args.decimals {
        config.decimals = Some(decimals);
    }

    let value = parse_raw_value(&args.value);
    debug!(?value, "formatting value");
    let processor = DisplayProcessor::new(config, theme(&args.display)).with_utc(args.display.utc);
    let display = processor.display(&value);
    println!("{}", serde_json::to_string_pretty(&display)?);
    Ok(display)
}

/// JSON when it parses, otherwise the literal string.
fn parse_raw_value(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw)
        .map_or_else(|_| Value::from(raw), Value::from)
}

fn theme(args: &DisplayArgs) -> Theme {
    let mode = match args.theme {
        ThemeArg::Dark => ThemeMode::Dark,
        ThemeArg::Light => ThemeMode::Light,
    };
    Theme { mode }
}
