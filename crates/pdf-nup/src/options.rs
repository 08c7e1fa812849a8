use crate::constants::{DEFAULT_RENDER_SCALE, MAX_RENDER_SCALE, SUPPORTED_MINI_PAGES};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for one combine run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NupOptions {
    /// Source pages per output page (4 or 6)
    pub mini_pages_per_page: usize,

    /// Output page size
    pub paper_size: PaperSize,

    /// Rasterization scale factor (1.0 = 72 DPI)
    pub render_scale: f32,

    /// Where finalized groups wait for the merge
    pub staging: Staging,

    /// Directory holding the Pdfium shared library, if not in the default locations
    pub pdfium_library_dir: Option<PathBuf>,
}

impl Default for NupOptions {
    fn default() -> Self {
        Self {
            mini_pages_per_page: 6,
            paper_size: PaperSize::A4,
            render_scale: DEFAULT_RENDER_SCALE,
            staging: Staging::Memory,
            pdfium_library_dir: None,
        }
    }
}

impl NupOptions {
    /// Options for the given grid size with everything else defaulted
    pub fn with_mini_pages(mini_pages_per_page: usize) -> Self {
        Self {
            mini_pages_per_page,
            ..Default::default()
        }
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| NupError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NupError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_MINI_PAGES.contains(&self.mini_pages_per_page) {
            return Err(NupError::Config(format!(
                "Unsupported number of mini-pages per page: {}. Supported values are 4 and 6.",
                self.mini_pages_per_page
            )));
        }

        if !self.render_scale.is_finite()
            || self.render_scale <= 0.0
            || self.render_scale > MAX_RENDER_SCALE
        {
            return Err(NupError::Config(format!(
                "Render scale must be greater than 0 and at most {}, got {}",
                MAX_RENDER_SCALE, self.render_scale
            )));
        }

        let (width, height) = self.paper_size.dimensions_pt();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(NupError::Config(format!(
                "Paper size must be positive, got {}x{} pt",
                width, height
            )));
        }

        Ok(())
    }
}
