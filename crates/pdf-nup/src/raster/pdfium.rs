//! Pdfium rendering backend

use super::{PageRasterizer, rgba_to_rgb};
use crate::constants::DEFAULT_RENDER_SCALE;
use crate::source::{SourceDocument, SourcePage};
use crate::types::{NupError, PageError, Result};
use image::RgbImage;
use pdfium_render::prelude::*;
use std::path::Path;

/// Bind Pdfium, trying `library_dir` first, then the vendored library, then the system.
pub fn init_pdfium(library_dir: Option<&Path>) -> std::result::Result<Pdfium, PdfiumError> {
    if let Some(dir) = library_dir {
        return Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            .map(Pdfium::new);
    }

    // Try to load from vendor directory (relative to the working directory)
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

/// A bound Pdfium library and the scale pages are rendered at
pub struct PdfiumBackend {
    pdfium: Pdfium,
    scale: f32,
}

impl PdfiumBackend {
    /// Bind Pdfium and render at `scale` (1.0 = one pixel per point)
    pub fn new(library_dir: Option<&Path>, scale: f32) -> Result<Self> {
        let pdfium = init_pdfium(library_dir)
            .map_err(|e| NupError::Rasterizer(format!("failed to bind Pdfium: {}", e)))?;
        Ok(Self { pdfium, scale })
    }

    /// Bind Pdfium from the default locations and render at 72 DPI
    pub fn with_defaults() -> Result<Self> {
        Self::new(None, DEFAULT_RENDER_SCALE)
    }

    /// Parse `source` once and return a rasterizer for its pages
    pub fn open<'a>(&'a self, source: &'a SourceDocument) -> Result<PdfiumRasterizer<'a>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(source.bytes(), None)
            .map_err(|e| NupError::Load(format!("Pdfium could not open the document: {}", e)))?;

        Ok(PdfiumRasterizer {
            source,
            document,
            scale: self.scale,
        })
    }
}

/// Renders the pages of one source document with Pdfium
pub struct PdfiumRasterizer<'a> {
    source: &'a SourceDocument,
    document: PdfDocument<'a>,
    scale: f32,
}

impl PdfiumRasterizer<'_> {
    fn render(&self, index: u16) -> std::result::Result<(u32, u32, Vec<u8>), PdfiumError> {
        let pdf_page = self.document.pages().get(index)?;

        let config = PdfRenderConfig::new().scale_page_by_factor(self.scale);
        let bitmap = pdf_page.render_with_config(&config)?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        Ok((width, height, bitmap.as_rgba_bytes().to_vec()))
    }
}

impl PageRasterizer for PdfiumRasterizer<'_> {
    fn rasterize(&self, page: &SourcePage<'_>) -> std::result::Result<RgbImage, PageError> {
        let raster_error = |reason: String| PageError::Raster {
            page: page.index,
            reason,
        };

        if !std::ptr::eq(page.source(), self.source) {
            return Err(raster_error(
                "page belongs to a different document".to_string(),
            ));
        }
        let index = u16::try_from(page.index)
            .map_err(|_| raster_error("page index exceeds Pdfium's page limit".to_string()))?;

        let (width, height, rgba) = self
            .render(index)
            .map_err(|e| raster_error(e.to_string()))?;
        rgba_to_rgb(width, height, rgba, page.index)
    }
}
