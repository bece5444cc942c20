// ABOUTME: Library module for the deck-slides program.
// ABOUTME: Contains the slide model builder, layout engine, and PPTX writer.

// Reexport modules
pub mod config;
pub mod errors;
pub mod layout;
pub mod model;
pub mod pptx;
pub mod runs;
pub mod tokens;
pub mod utils;

// Reexport common types and functions
pub use config::Config;
pub use errors::{DeckError, Result};
pub use layout::{layout_slide, LayoutConfig, PositionedElement, Rect, SlideLayout};
pub use model::{build_slides, DocumentModel, ShapeKind, Slide, SlideElement};
pub use pptx::{generate_pptx, PptxConfig};
pub use runs::{resolve_runs, LinkRef, RunStyle, StyledRun};
pub use tokens::{tokenize, BlockToken, InlineToken, ListItemToken};

#[cfg(test)]
mod tests;
