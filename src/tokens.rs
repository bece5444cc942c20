// ABOUTME: Block and inline token model for the deck-slides application
// ABOUTME: Adapts the comrak markdown AST into a typed block-token stream

use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// A nested inline-markup token. Inline trees nest arbitrarily, so style
/// information is carried by the path from the root to each leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineToken {
    Bold(Vec<InlineToken>),
    Italic(Vec<InlineToken>),
    CodeSpan(String),
    Hyperlink {
        url: String,
        title: Option<String>,
        children: Vec<InlineToken>,
    },
    /// Plain text. `children` is normally empty; overlapping spans can leave a
    /// nested sub-tree here, in which case the sub-tree wins over `text`.
    PlainText {
        text: String,
        children: Vec<InlineToken>,
    },
    /// Anything the pipeline has no specific handling for. Carries the raw
    /// source text so no authored content is ever dropped.
    Other { raw: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItemToken {
    pub inline: Vec<InlineToken>,
    pub is_task: bool,
    pub checked: bool,
}

/// A block-level structural unit of the source document.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockToken {
    Heading {
        depth: u8,
        text: String,
    },
    Paragraph {
        /// Raw source text, reconstructed so the authoring syntaxes
        /// (notes, shapes, standalone images) can be matched bit-exactly.
        text: String,
        inline: Vec<InlineToken>,
    },
    List {
        items: Vec<ListItemToken>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    HorizontalRule,
}

/// Tokenize a markdown document into the block-token stream consumed by the
/// slide model builder.
pub fn tokenize(markdown: &str) -> Vec<BlockToken> {
    let arena = Arena::new();
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.tasklist = true;

    let root = parse_document(&arena, markdown, &options);

    let mut blocks = Vec::new();
    for node in root.children() {
        convert_block(node, &mut blocks);
    }
    blocks
}

fn convert_block<'a>(node: &'a AstNode<'a>, out: &mut Vec<BlockToken>) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            out.push(BlockToken::Heading {
                depth: heading.level,
                text: literal_text(node),
            });
        }
        NodeValue::Paragraph => {
            out.push(BlockToken::Paragraph {
                text: reconstruct_children(node),
                inline: convert_inlines(node),
            });
        }
        // Block quotes are flattened into quote-prefixed paragraphs so that
        // the speaker-note syntax (`> Note: ...`) survives markdown's own
        // blockquote handling.
        NodeValue::BlockQuote => {
            for child in node.children() {
                if let NodeValue::Paragraph = &child.data.borrow().value {
                    out.push(BlockToken::Paragraph {
                        text: format!("> {}", reconstruct_children(child)),
                        inline: convert_inlines(child),
                    });
                }
            }
        }
        NodeValue::List(_) => {
            let mut items = Vec::new();
            for item in node.children() {
                let (is_task, checked) = match &item.data.borrow().value {
                    NodeValue::TaskItem(symbol) => (true, symbol.is_some()),
                    NodeValue::Item(_) => (false, false),
                    _ => continue,
                };
                items.push(ListItemToken {
                    inline: item_inlines(item),
                    is_task,
                    checked,
                });
            }
            out.push(BlockToken::List { items });
        }
        NodeValue::Table(..) => {
            let mut headers = Vec::new();
            let mut rows = Vec::new();
            for row in node.children() {
                let is_header = matches!(&row.data.borrow().value, NodeValue::TableRow(true));
                let cells: Vec<String> = row.children().map(literal_text).collect();
                if is_header && headers.is_empty() {
                    headers = cells;
                } else {
                    rows.push(cells);
                }
            }
            out.push(BlockToken::Table { headers, rows });
        }
        NodeValue::ThematicBreak => out.push(BlockToken::HorizontalRule),
        // Other block kinds (code blocks, raw HTML blocks, nested structures)
        // carry nothing the slide model understands.
        _ => {}
    }
}

/// Inline content of a list item: the item's first paragraph.
fn item_inlines<'a>(item: &'a AstNode<'a>) -> Vec<InlineToken> {
    for child in item.children() {
        if let NodeValue::Paragraph = &child.data.borrow().value {
            return convert_inlines(child);
        }
    }
    Vec::new()
}

fn convert_inlines<'a>(parent: &'a AstNode<'a>) -> Vec<InlineToken> {
    parent.children().map(convert_inline).collect()
}

fn convert_inline<'a>(node: &'a AstNode<'a>) -> InlineToken {
    match &node.data.borrow().value {
        NodeValue::Strong => InlineToken::Bold(convert_inlines(node)),
        NodeValue::Emph => InlineToken::Italic(convert_inlines(node)),
        NodeValue::Code(code) => InlineToken::CodeSpan(code.literal.clone()),
        NodeValue::Link(link) => InlineToken::Hyperlink {
            url: link.url.clone(),
            title: if link.title.is_empty() {
                None
            } else {
                Some(link.title.clone())
            },
            children: convert_inlines(node),
        },
        NodeValue::Text(text) => InlineToken::PlainText {
            text: text.clone(),
            children: Vec::new(),
        },
        NodeValue::SoftBreak => InlineToken::PlainText {
            text: " ".to_string(),
            children: Vec::new(),
        },
        NodeValue::LineBreak => InlineToken::Other {
            raw: "\n".to_string(),
        },
        NodeValue::HtmlInline(html) => InlineToken::Other { raw: html.clone() },
        // Inline images and anything else fall back to their reconstructed
        // source text; the run resolver passes that through verbatim.
        _ => InlineToken::Other {
            raw: reconstruct_inline(node),
        },
    }
}

fn reconstruct_children<'a>(parent: &'a AstNode<'a>) -> String {
    parent.children().map(reconstruct_inline).collect()
}

/// Restore the markdown source text of an inline node. Used both to classify
/// paragraphs against the authoring syntaxes and as the verbatim
/// fallback for unrecognized inline constructs.
fn reconstruct_inline<'a>(node: &'a AstNode<'a>) -> String {
    match &node.data.borrow().value {
        NodeValue::Text(text) => text.clone(),
        NodeValue::Code(code) => format!("`{}`", code.literal),
        NodeValue::Strong => format!("**{}**", reconstruct_children(node)),
        NodeValue::Emph => format!("*{}*", reconstruct_children(node)),
        NodeValue::Strikethrough => format!("~~{}~~", reconstruct_children(node)),
        NodeValue::Link(link) => {
            if link.title.is_empty() {
                format!("[{}]({})", reconstruct_children(node), link.url)
            } else {
                format!(
                    "[{}]({} \"{}\")",
                    reconstruct_children(node),
                    link.url,
                    link.title
                )
            }
        }
        NodeValue::Image(link) => format!("![{}]({})", reconstruct_children(node), link.url),
        NodeValue::SoftBreak => " ".to_string(),
        NodeValue::LineBreak => "\n".to_string(),
        NodeValue::HtmlInline(html) => html.clone(),
        _ => literal_text(node),
    }
}

/// Collect only the literal text of a node's subtree, dropping all markup.
fn literal_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    collect_literal_text(node, &mut text);
    text
}

fn collect_literal_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => out.push_str(&code.literal),
        NodeValue::SoftBreak => out.push(' '),
        NodeValue::LineBreak => out.push('\n'),
        _ => {}
    }
    for child in node.children() {
        collect_literal_text(child, out);
    }
}
