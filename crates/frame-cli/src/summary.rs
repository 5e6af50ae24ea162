//! Terminal rendering of frames, warnings and the transformer list.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use frame_display::{DisplayProcessor, Theme};
use frame_model::{DataFrame, FieldType};
use frame_transform::{StageWarning, TransformerRegistry};

/// How cell values are rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Run values through the field's display processor.
    pub display: bool,
    pub theme: Theme,
    pub utc: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            display: true,
            theme: Theme::default(),
            utc: false,
        }
    }
}

/// Title line for a frame: `name (refId)`, falling back to its position.
pub fn frame_title(frame: &DataFrame, index: usize) -> String {
    match (frame.name(), frame.ref_id()) {
        (Some(name), Some(ref_id)) => format!("{name} ({ref_id})"),
        (Some(name), None) => name.to_string(),
        (None, Some(ref_id)) => format!("Frame {index} ({ref_id})"),
        (None, None) => format!("Frame {index}"),
    }
}

/// Text and resolved color of one rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub text: String,
    pub color: Option<String>,
}

/// Cells of a frame, row-major, as they would be printed.
pub fn frame_rows(frame: &DataFrame, options: &RenderOptions) -> Vec<Vec<RenderedCell>> {
    let processors: Vec<DisplayProcessor> = frame
        .fields()
        .iter()
        .map(|field| DisplayProcessor::for_field(field, options.theme).with_utc(options.utc))
        .collect();
    (0..frame.length())
        .map(|row| {
            frame
                .fields()
                .iter()
                .zip(&processors)
                .map(|(field, processor)| {
                    let value = field.get(row).cloned().unwrap_or_default();
                    if !options.display {
                        return RenderedCell {
                            text: value.to_text(),
                            color: None,
                        };
                    }
                    let display = processor.display(&value);
                    RenderedCell {
                        text: display.to_string(),
                        color: display.color,
                    }
                })
                .collect()
        })
        .collect()
}

/// Build the table for one frame.
pub fn frame_table(frame: &DataFrame, options: &RenderOptions) -> Table {
    let mut table = Table::new();
    table.set_header(
        frame
            .fields()
            .iter()
            .map(|field| header_cell(field.display_name()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);

    for row in frame_rows(frame, options) {
        let cells: Vec<Cell> = row
            .into_iter()
            .map(|rendered| {
                let color = rendered.color.as_deref().and_then(parse_hex_color);
                let cell = Cell::new(rendered.text);
                match color {
                    Some(color) => cell.fg(color),
                    None => cell,
                }
            })
            .collect();
        table.add_row(cells);
    }

    for (index, field) in frame.fields().iter().enumerate() {
        if field.field_type() == FieldType::Number {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    table
}

pub fn print_frames(frames: &[DataFrame], options: &RenderOptions) {
    for (index, frame) in frames.iter().enumerate() {
        println!("{}", frame_title(frame, index));
        if frame.width() == 0 {
            println!("  (no fields, {} rows)", frame.length());
            continue;
        }
        println!("{}", frame_table(frame, options));
    }
}

pub fn print_warnings(warnings: &[StageWarning]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}

/// Table of registered transformers.
pub fn transformers_table(registry: &TransformerRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for transformer in registry.list() {
        table.add_row(vec![
            Cell::new(transformer.id()).add_attribute(Attribute::Bold),
            Cell::new(transformer.name()),
            dim_cell(transformer.description()),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// `#RRGGBB` to a terminal color; other color strings are not rendered.
pub fn parse_hex_color(color: &str) -> Option<Color> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
