// ABOUTME: Inline run resolution for the deck-slides application
// ABOUTME: Flattens nested inline-markup trees into flat sequences of styled runs

use crate::tokens::InlineToken;
use serde::Serialize;

/// Hyperlink target attached to a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkRef {
    pub url: String,
    pub tooltip: String,
}

/// Style flags for a run. Flags compose: a run may be bold, italic and part
/// of a hyperlink at the same time, because inline formatting nests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
    pub bullet: bool,
    pub breaks_line: bool,
    pub hyperlink: Option<LinkRef>,
}

/// A contiguous span of text sharing one style combination. Concatenating the
/// `text` of all runs of a block, in order, reproduces the rendered text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
}

impl StyledRun {
    fn new(text: &str, style: &RunStyle) -> Self {
        let mut style = style.clone();
        style.breaks_line = text.ends_with('\n');
        Self {
            text: text.to_string(),
            style,
        }
    }
}

/// Flatten an inline token tree into styled runs, each run carrying the union
/// of all formatting spans it was nested inside.
pub fn resolve_runs(tokens: &[InlineToken], inherited: &RunStyle) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    collect_runs(tokens, inherited, &mut runs);
    runs
}

fn collect_runs(tokens: &[InlineToken], style: &RunStyle, out: &mut Vec<StyledRun>) {
    for token in tokens {
        match token {
            InlineToken::Bold(children) => {
                let style = RunStyle {
                    bold: true,
                    ..style.clone()
                };
                collect_runs(children, &style, out);
            }
            InlineToken::Italic(children) => {
                let style = RunStyle {
                    italic: true,
                    ..style.clone()
                };
                collect_runs(children, &style, out);
            }
            // Code spans are literal: one run, padded for visual separation,
            // never recursed into.
            InlineToken::CodeSpan(literal) => {
                let style = RunStyle {
                    monospace: true,
                    ..style.clone()
                };
                out.push(StyledRun::new(&format!(" {} ", literal), &style));
            }
            InlineToken::Hyperlink {
                url,
                title,
                children,
            } => {
                let style = RunStyle {
                    hyperlink: Some(LinkRef {
                        url: url.clone(),
                        tooltip: title.clone().unwrap_or_else(|| url.clone()),
                    }),
                    ..style.clone()
                };
                collect_runs(children, &style, out);
            }
            // Overlapping spans can leave a nested sub-tree inside a text
            // token; the sub-tree wins over the literal text.
            InlineToken::PlainText { text, children } => {
                if children.is_empty() {
                    out.push(StyledRun::new(text, style));
                } else {
                    collect_runs(children, style, out);
                }
            }
            // Verbatim fallback: unknown constructs keep their source text so
            // nothing authored is ever lost.
            InlineToken::Other { raw } => {
                if !raw.is_empty() {
                    out.push(StyledRun::new(raw, &RunStyle::default()));
                }
            }
        }
    }
}
