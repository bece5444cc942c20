// ABOUTME: Configuration module for the deck-slides application
// ABOUTME: Provides configuration settings and environment variable handling

use crate::layout::LayoutConfig;
use crate::pptx::{slide_size, PptxConfig};
use std::env;
use std::path::PathBuf;

/// Global configuration for the application
pub struct Config {
    pub default_title: String,
    pub default_aspect_ratio: String,
    pub media_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_title: "Presentation".to_string(),
            default_aspect_ratio: "16:9".to_string(),
            media_dir: None,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default_title =
            env::var("DECK_TITLE").unwrap_or_else(|_| "Presentation".to_string());
        let default_aspect_ratio =
            env::var("DECK_ASPECT_RATIO").unwrap_or_else(|_| "16:9".to_string());
        let media_dir = env::var("DECK_MEDIA_DIR").ok().map(PathBuf::from);

        Self {
            default_title,
            default_aspect_ratio,
            media_dir,
        }
    }

    /// Get a PPTX configuration with defaults from this config
    pub fn get_pptx_config(
        &self,
        title: Option<String>,
        aspect_ratio: Option<String>,
        media_dir: Option<PathBuf>,
    ) -> PptxConfig {
        PptxConfig {
            title: title.unwrap_or_else(|| self.default_title.clone()),
            aspect_ratio: aspect_ratio.unwrap_or_else(|| self.default_aspect_ratio.clone()),
            media_dir: media_dir
                .or_else(|| self.media_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Get a layout configuration whose canvas matches an aspect ratio
    pub fn get_layout_config(&self, aspect_ratio: Option<&str>) -> LayoutConfig {
        let (cx, cy) = slide_size(aspect_ratio.unwrap_or(&self.default_aspect_ratio));
        LayoutConfig {
            canvas_width: cx,
            canvas_height: cy,
            ..LayoutConfig::default()
        }
    }
}
