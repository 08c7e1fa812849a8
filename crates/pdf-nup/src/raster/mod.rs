//! Page rasterization
//!
//! The composer only sees the `PageRasterizer` trait. The production backend
//! renders through Pdfium and is compiled in with the `pdfium` feature.

#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
mod pdfium;

#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
pub use pdfium::{PdfiumBackend, PdfiumRasterizer, init_pdfium};

use crate::source::SourcePage;
use crate::types::PageError;
use image::RgbImage;

/// Renders a single source page to an RGB bitmap.
///
/// Implementations must not keep state between calls that changes the
/// result; the same page always renders the same way.
pub trait PageRasterizer {
    fn rasterize(&self, page: &SourcePage<'_>) -> Result<RgbImage, PageError>;
}

impl<R: PageRasterizer + ?Sized> PageRasterizer for Box<R> {
    fn rasterize(&self, page: &SourcePage<'_>) -> Result<RgbImage, PageError> {
        (**self).rasterize(page)
    }
}

impl<R: PageRasterizer + ?Sized> PageRasterizer for &R {
    fn rasterize(&self, page: &SourcePage<'_>) -> Result<RgbImage, PageError> {
        (**self).rasterize(page)
    }
}

/// Convert a tightly packed RGBA buffer to RGB, compositing onto white.
pub(crate) fn rgba_to_rgb(
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    page: usize,
) -> Result<RgbImage, PageError> {
    let rgba = image::RgbaImage::from_raw(width, height, rgba).ok_or_else(|| PageError::Raster {
        page,
        reason: format!("bitmap buffer does not match {}x{} pixels", width, height),
    })?;

    Ok(RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as u16;
        let blend = |c: u8| ((c as u16 * alpha + 255 * (255 - alpha)) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    }))
}
