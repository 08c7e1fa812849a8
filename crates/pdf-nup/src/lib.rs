pub mod assemble;
pub mod blank;
pub mod compose;
mod constants;
pub mod diagnostics;
pub mod layout;
mod options;
pub mod raster;
pub mod render;
pub mod source;
mod stats;
mod types;

#[cfg(all(feature = "pdfium", not(target_arch = "wasm32")))]
pub use assemble::combine;
pub use assemble::{assemble_document, combine_with, load_pdf, save_pdf};
pub use compose::{OutputGroup, PlacedCell, compose_group};
pub use constants::{A4_DIMENSIONS_PT, LETTER_DIMENSIONS_PT, SUPPORTED_MINI_PAGES};
pub use diagnostics::{DiagnosticSink, LogSink, MemorySink, NullSink};
pub use layout::{CellGeometry, LayoutConfig, Placement};
pub use options::*;
pub use raster::PageRasterizer;
pub use source::{SourceDocument, SourcePage};
pub use stats::calculate_statistics;
pub use types::*;
