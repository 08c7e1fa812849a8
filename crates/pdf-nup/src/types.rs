use crate::constants::{A4_DIMENSIONS_PT, LETTER_DIMENSIONS_PT, mm_to_pt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NupError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Failed to load input PDF: {0}")]
    Load(String),
    #[error("Failed to write output PDF: {0}")]
    Write(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Rasterizer unavailable: {0}")]
    Rasterizer(String),
    #[error("No pages to combine")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, NupError>;

/// Failure confined to a single source page.
///
/// These never abort a combine; the page's cell is left empty.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageError {
    #[error("page {}: rasterization failed: {reason}", .page + 1)]
    Raster { page: usize, reason: String },
    #[error("page {}: text extraction failed: {reason}", .page + 1)]
    TextExtraction { page: usize, reason: String },
}

impl PageError {
    /// Zero-based index of the source page that failed
    pub fn page_index(&self) -> usize {
        match self {
            PageError::Raster { page, .. } | PageError::TextExtraction { page, .. } => *page,
        }
    }
}

/// Output paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Portrait dimensions (width, height) in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => A4_DIMENSIONS_PT,
            PaperSize::Letter => LETTER_DIMENSIONS_PT,
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (mm_to_pt(width_mm), mm_to_pt(height_mm)),
        }
    }
}

/// How finalized groups are held until the final merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Staging {
    /// Keep every group as an in-memory document
    #[default]
    Memory,
    /// Serialize every group to its own file in a private temporary directory
    TempDir,
}

/// Why a source page did not end up on the output
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No extractable text
    Blank,
    /// Page size is zero, negative or not finite
    DegenerateSize,
    /// Rasterization or text extraction failed
    Failed(PageError),
}

/// A source page whose cell was left empty
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPage {
    pub page_index: usize,
    pub group_index: usize,
    pub cell_index: usize,
    pub reason: SkipReason,
}

/// Outcome of a combine run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombineReport {
    /// Pages in the input document
    pub source_pages: usize,
    /// Pages in the written document (one per group)
    pub output_pages: usize,
    /// Source pages drawn onto the output
    pub placed_pages: usize,
    /// Source pages skipped, in source order
    pub skipped: Vec<SkippedPage>,
}

impl CombineReport {
    pub fn blank_pages(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| s.reason == SkipReason::Blank)
            .count()
    }

    pub fn failed_pages(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::Failed(_)))
            .count()
    }
}

/// Statistics about a combine, computed without rendering
#[derive(Debug, Clone, PartialEq)]
pub struct NupStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Number of output pages (groups)
    pub output_pages: usize,
    /// Source pages that will be skipped as blank
    pub blank_pages: usize,
    /// Source pages whose text could not be read
    pub unreadable_pages: usize,
    /// Cells on the last output page with no source page behind them
    pub trailing_empty_slots: usize,
}
