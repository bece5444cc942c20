// ABOUTME: Slide model types and builder for the deck-slides application
// ABOUTME: Walks the block-token stream and assembles the ordered slide sequence

use crate::runs::{resolve_runs, RunStyle, StyledRun};
use crate::tokens::{BlockToken, InlineToken, ListItemToken};
use log::warn;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// The closed set of drawable shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShapeKind {
    Rectangle,
    Oval,
    Ellipse,
    Line,
    Triangle,
}

/// One content element of a slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SlideElement {
    TextBlock {
        runs: Vec<StyledRun>,
    },
    Image {
        href: String,
        alt: String,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Shape {
        kind: ShapeKind,
        options: Map<String, Value>,
    },
    /// Sentinel marking the split point for two-column layout. Carries no
    /// data and is never placed on the canvas.
    ColumnBreak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub title: String,
    pub elements: Vec<SlideElement>,
    pub notes: Option<String>,
}

/// Builder output: the ordered slide sequence plus any diagnostics raised
/// while classifying paragraphs. Diagnostics are advisory; the model is
/// always produced.
#[derive(Debug, Default, Serialize)]
pub struct DocumentModel {
    pub slides: Vec<Slide>,
    pub diagnostics: Vec<String>,
}

fn built_in(pattern: &'static str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid built-in pattern: {err}"))
}

fn note_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| built_in(r"^>\s*Note:\s*(.*)"))
}

fn image_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| built_in(r"^!\[([^\]]*)\]\(([^)]+)\)$"))
}

fn shape_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| built_in(r"^!shape\[(.*)\]\((.*)\)$"))
}

/// Consume the block-token stream in order and assemble the slide sequence.
///
/// Each depth-1 heading finalizes the slide under construction and starts a
/// new one; content arriving before the first depth-1 heading has no slide to
/// attach to and is dropped.
pub fn build_slides(tokens: &[BlockToken]) -> DocumentModel {
    let mut model = DocumentModel::default();
    let mut current: Option<Slide> = None;

    for token in tokens {
        match token {
            BlockToken::Heading { depth: 1, text } => {
                if let Some(slide) = current.take() {
                    model.slides.push(slide);
                }
                current = Some(Slide {
                    title: text.trim().to_string(),
                    elements: Vec::new(),
                    notes: None,
                });
            }
            // Deeper headings do not start slides and produce no elements.
            BlockToken::Heading { .. } => {}
            BlockToken::Paragraph { text, inline } => {
                let Some(slide) = current.as_mut() else { continue };
                process_paragraph(slide, text, inline, &mut model.diagnostics);
            }
            BlockToken::List { items } => {
                let Some(slide) = current.as_mut() else { continue };
                for item in items {
                    slide.elements.push(list_item_block(item));
                }
            }
            BlockToken::Table { headers, rows } => {
                let Some(slide) = current.as_mut() else { continue };
                slide.elements.push(SlideElement::Table {
                    headers: headers.clone(),
                    rows: rows.clone(),
                });
            }
            BlockToken::HorizontalRule => {
                if let Some(slide) = current.as_mut() {
                    slide.elements.push(SlideElement::ColumnBreak);
                }
            }
        }
    }

    if let Some(slide) = current.take() {
        model.slides.push(slide);
    }
    model
}

/// Classify a paragraph, in priority order: speaker note, standalone image,
/// embedded shape, ordinary text.
fn process_paragraph(
    slide: &mut Slide,
    text: &str,
    inline: &[InlineToken],
    diagnostics: &mut Vec<String>,
) {
    let trimmed = text.trim();

    if let Some(caps) = note_pattern().captures(trimmed) {
        // Last note wins.
        slide.notes = Some(caps[1].trim().to_string());
        return;
    }

    if let Some(caps) = image_pattern().captures(trimmed) {
        slide.elements.push(SlideElement::Image {
            alt: caps[1].to_string(),
            href: caps[2].to_string(),
        });
        return;
    }

    if let Some(caps) = shape_pattern().captures(trimmed) {
        match parse_shape(&caps[1], &caps[2]) {
            Ok(element) => slide.elements.push(element),
            Err(message) => {
                warn!("{}", message);
                diagnostics.push(message);
            }
        }
        return;
    }

    let runs = resolve_runs(inline, &RunStyle::default());
    if !runs.is_empty() {
        slide.elements.push(SlideElement::TextBlock { runs });
    }
}

/// Parse `!shape[name]({json-options})`. Unknown names and malformed options
/// are reported to the caller as diagnostics; the paragraph is then dropped.
fn parse_shape(name: &str, options_src: &str) -> std::result::Result<SlideElement, String> {
    let kind = match name {
        "rect" => ShapeKind::Rectangle,
        "oval" => ShapeKind::Oval,
        "ellipse" => ShapeKind::Ellipse,
        "line" => ShapeKind::Line,
        "triangle" => ShapeKind::Triangle,
        other => return Err(format!("unknown shape name: '{}'", other)),
    };

    let options = match serde_json::from_str::<Value>(options_src) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return Err(format!(
                "shape options must be a JSON object, got: {}",
                options_src
            ));
        }
        Err(err) => {
            return Err(format!(
                "malformed shape options '{}': {}",
                options_src, err
            ));
        }
    };

    Ok(SlideElement::Shape { kind, options })
}

/// Turn one list item into its own text block, preserving per-item styling.
fn list_item_block(item: &ListItemToken) -> SlideElement {
    let mut runs = resolve_runs(&item.inline, &RunStyle::default());

    if item.is_task {
        let glyph = if item.checked { "☑ " } else { "☐ " };
        match runs.first_mut() {
            Some(first) => first.text.insert_str(0, glyph),
            None => runs.push(StyledRun {
                text: glyph.to_string(),
                style: RunStyle::default(),
            }),
        }
    } else {
        match runs.first_mut() {
            Some(first) => first.style.bullet = true,
            None => runs.push(StyledRun {
                text: String::new(),
                style: RunStyle {
                    bullet: true,
                    ..RunStyle::default()
                },
            }),
        }
    }

    SlideElement::TextBlock { runs }
}
