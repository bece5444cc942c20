// ABOUTME: Layout engine for the deck-slides application
// ABOUTME: Maps slide elements onto a fixed canvas with column partitioning

use crate::model::{Slide, SlideElement};
use serde::Serialize;
use serde_json::{Map, Value};

pub const EMU_PER_INCH: i64 = 914_400;

/// Canvas geometry and spacing knobs, in EMU. Defaults describe a 16:9
/// canvas matching the generated presentation size.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub canvas_width: i64,
    pub canvas_height: i64,
    pub margin: i64,
    pub title_top: i64,
    pub title_height: i64,
    pub body_top: i64,
    pub bottom_margin: i64,
    pub min_usable_height: i64,
    pub gutter: i64,
    pub spacing: i64,
    pub line_height: i64,
    pub text_padding: i64,
    pub image_height: i64,
    pub table_base_height: i64,
    pub table_row_height: i64,
    pub shape_default_height: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 9_144_000,
            canvas_height: 5_143_500,
            margin: 457_200,
            title_top: 228_600,
            title_height: 800_100,
            body_top: 1_143_000,
            bottom_margin: 228_600,
            min_usable_height: 274_320,
            gutter: 228_600,
            spacing: 171_450,
            line_height: 342_900,
            text_padding: 91_440,
            image_height: 2_286_000,
            table_base_height: 137_160,
            table_row_height: 342_900,
            shape_default_height: 914_400,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// A slide element annotated with its final absolute box on the canvas.
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedElement {
    pub element: SlideElement,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Layout output for one slide: the fixed title band plus the placed
/// elements, column order preserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideLayout {
    pub title: String,
    pub title_box: Rect,
    pub notes: Option<String>,
    pub elements: Vec<PositionedElement>,
}

/// Lay out one slide. Pure function of the slide and the config: re-running
/// it on the same inputs yields identical output.
pub fn layout_slide(slide: &Slide, config: &LayoutConfig) -> SlideLayout {
    let content_width = config.canvas_width - 2 * config.margin;
    let title_box = Rect {
        x: config.margin,
        y: config.title_top,
        width: content_width,
        height: config.title_height,
    };

    let (first, second) = partition_columns(&slide.elements);

    let mut elements = Vec::new();
    match second {
        None => {
            place_column(&first, config.margin, content_width, config, &mut elements);
        }
        Some(second) => {
            let column_width = (content_width - config.gutter) / 2;
            place_column(&first, config.margin, column_width, config, &mut elements);
            place_column(
                &second,
                config.margin + column_width + config.gutter,
                column_width,
                config,
                &mut elements,
            );
        }
    }

    SlideLayout {
        title: slide.title.clone(),
        title_box,
        notes: slide.notes.clone(),
        elements,
    }
}

/// Split at the first column break. Everything after it belongs to column 2;
/// later breaks are consumed as no-ops rather than opening further columns.
fn partition_columns(elements: &[SlideElement]) -> (Vec<&SlideElement>, Option<Vec<&SlideElement>>) {
    let mut first = Vec::new();
    let mut second: Option<Vec<&SlideElement>> = None;
    for element in elements {
        if matches!(element, SlideElement::ColumnBreak) {
            if second.is_none() {
                second = Some(Vec::new());
            }
            continue;
        }
        match second.as_mut() {
            Some(column) => column.push(element),
            None => first.push(element),
        }
    }
    (first, second)
}

/// Top-to-bottom placement within one column. Elements that no longer fit
/// the vertical budget are silently dropped.
fn place_column(
    elements: &[&SlideElement],
    x: i64,
    column_width: i64,
    config: &LayoutConfig,
    out: &mut Vec<PositionedElement>,
) {
    let mut cursor = config.body_top;
    for element in elements {
        let remaining = config.canvas_height - config.bottom_margin - cursor;
        if remaining < config.min_usable_height {
            break;
        }

        let (width, height) = match element {
            SlideElement::TextBlock { runs } => {
                let lines = 1 + runs.iter().filter(|r| r.style.breaks_line).count() as i64;
                let estimate = lines * config.line_height + 2 * config.text_padding;
                (column_width, estimate.min(remaining))
            }
            SlideElement::Image { .. } => (column_width, config.image_height),
            SlideElement::Table { rows, .. } => {
                let height =
                    config.table_base_height + (1 + rows.len() as i64) * config.table_row_height;
                (column_width, height)
            }
            SlideElement::Shape { options, .. } => {
                // Author-specified size wins; author-specified origin never
                // does, since free-form coordinates would break two-column
                // placement.
                let width = shape_extent(options, "width", "w").unwrap_or(column_width);
                let height =
                    shape_extent(options, "height", "h").unwrap_or(config.shape_default_height);
                (width, height)
            }
            // Breaks were consumed during partitioning.
            SlideElement::ColumnBreak => continue,
        };

        out.push(PositionedElement {
            element: (*element).clone(),
            x,
            y: cursor,
            width,
            height,
        });
        cursor += height + config.spacing;
    }
}

/// Numeric size option from a shape's property bag, in author inches,
/// converted to EMU. Accepts the long key or its short alias.
fn shape_extent(options: &Map<String, Value>, key: &str, alias: &str) -> Option<i64> {
    options
        .get(key)
        .or_else(|| options.get(alias))
        .and_then(Value::as_f64)
        .map(|inches| (inches * EMU_PER_INCH as f64) as i64)
}
