//! Shared constants for n-up composition
//!
//! This module centralizes magic numbers and constants used throughout
//! the combine process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Paper Sizes
// =============================================================================

/// ISO A4 (210mm × 297mm) in points
pub const A4_DIMENSIONS_PT: (f32, f32) = (595.2756, 841.8898);

/// US Letter (8.5" × 11") in points
pub const LETTER_DIMENSIONS_PT: (f32, f32) = (612.0, 792.0);

/// Assumed source page size when a page carries no usable MediaBox
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = LETTER_DIMENSIONS_PT;

// =============================================================================
// Grid
// =============================================================================

/// Supported mini-pages per output page
pub const SUPPORTED_MINI_PAGES: [usize; 2] = [4, 6];

// =============================================================================
// Rasterization
// =============================================================================

/// One output pixel per point (72 DPI)
pub const DEFAULT_RENDER_SCALE: f32 = 1.0;

/// Upper bound on the render scale factor (576 DPI)
pub const MAX_RENDER_SCALE: f32 = 8.0;

// =============================================================================
// Staging
// =============================================================================

/// Prefix of the per-group files written under `Staging::TempDir`
pub const STAGED_GROUP_PREFIX: &str = "group-";
