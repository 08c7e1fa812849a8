//! Composition of a single output page
//!
//! One group is `mini_pages_per_page` consecutive source pages. Cell `j` of
//! group `g` always shows source page `g * mini_pages_per_page + j`; a page
//! that is skipped leaves its cell empty and the following pages keep their
//! cells.

use crate::blank::is_blank;
use crate::diagnostics::DiagnosticSink;
use crate::layout::{LayoutConfig, place_image};
use crate::raster::PageRasterizer;
use crate::render::GroupCanvas;
use crate::source::{SourceDocument, SourcePage};
use crate::types::*;
use image::RgbImage;
use lopdf::Document;
use log::Level;

/// A source page drawn onto an output page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCell {
    pub page_index: usize,
    pub cell_index: usize,
    pub placement: crate::layout::Placement,
}

/// One finished output page
#[derive(Debug)]
pub struct OutputGroup {
    pub group_index: usize,
    /// One-page document holding the composed page
    pub document: Document,
    /// Cells that received an image, in cell order
    pub placed: Vec<PlacedCell>,
    /// Pages of this group that were skipped, in cell order
    pub skipped: Vec<SkippedPage>,
}

/// What happened to one cell
enum CellOutcome {
    Placed(PlacedCell),
    Skipped(SkipReason),
}

/// Compose output page `group_index`.
///
/// Per-page failures are recorded in the returned group and never fail
/// the call.
pub fn compose_group(
    source: &SourceDocument,
    group_index: usize,
    config: &LayoutConfig,
    rasterizer: &dyn PageRasterizer,
    sink: &dyn DiagnosticSink,
) -> OutputGroup {
    let mut canvas = GroupCanvas::new(config.page_width, config.page_height);
    let mut placed = Vec::new();
    let mut skipped = Vec::new();

    let total_pages = source.page_count();
    let first_page = group_index * config.mini_pages_per_page;

    for cell_index in 0..config.mini_pages_per_page {
        let page_index = first_page + cell_index;
        let Some(page) = source.page(page_index) else {
            break;
        };

        match compose_cell(&page, cell_index, config, rasterizer, &mut canvas) {
            CellOutcome::Placed(cell) => {
                sink.record(
                    Level::Debug,
                    &format!(
                        "Processed page {} (group {}, cell {})",
                        page_index + 1,
                        group_index,
                        cell_index
                    ),
                );
                placed.push(cell);
            }
            CellOutcome::Skipped(reason) => {
                report_skip(sink, page_index, &reason);
                skipped.push(SkippedPage {
                    page_index,
                    group_index,
                    cell_index,
                    reason,
                });
            }
        }
    }

    sink.record(
        Level::Debug,
        &format!(
            "Composed group {} from pages {:?} of {} ({} placed)",
            group_index,
            config.group_pages(group_index, total_pages),
            total_pages,
            placed.len()
        ),
    );

    OutputGroup {
        group_index,
        document: canvas.finish(),
        placed,
        skipped,
    }
}

fn compose_cell(
    page: &SourcePage<'_>,
    cell_index: usize,
    config: &LayoutConfig,
    rasterizer: &dyn PageRasterizer,
    canvas: &mut GroupCanvas,
) -> CellOutcome {
    match is_blank(page) {
        Ok(true) => return CellOutcome::Skipped(SkipReason::Blank),
        Ok(false) => {}
        Err(e) => return CellOutcome::Skipped(SkipReason::Failed(e)),
    }

    let image: RgbImage = match rasterizer.rasterize(page) {
        Ok(image) => image,
        Err(e) => return CellOutcome::Skipped(SkipReason::Failed(e)),
    };

    // Scale from the page's own size so the layout does not depend on render DPI
    let cell = config.cell(cell_index);
    let Some(placement) = place_image(&cell, page.width, page.height) else {
        return CellOutcome::Skipped(SkipReason::DegenerateSize);
    };

    canvas.draw_image(cell_index, &image, &placement);

    CellOutcome::Placed(PlacedCell {
        page_index: page.index,
        cell_index,
        placement,
    })
}

fn report_skip(sink: &dyn DiagnosticSink, page_index: usize, reason: &SkipReason) {
    match reason {
        SkipReason::Blank => {
            sink.record(Level::Debug, &format!("Skipping blank page: {}", page_index + 1))
        }
        SkipReason::DegenerateSize => sink.record(
            Level::Warn,
            &format!("Skipping page {} with zero or invalid size", page_index + 1),
        ),
        SkipReason::Failed(e) => sink.record(Level::Error, &format!("Skipping {}", e)),
    }
}
