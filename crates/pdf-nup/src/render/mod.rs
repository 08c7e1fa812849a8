//! PDF writing for composed pages
//!
//! This module handles all PDF-specific output operations:
//! - Embedding raster images as image XObjects
//! - Building the one-page document behind each output group
//! - Merging finished groups into the combined document

mod canvas;
mod image;
mod merge;

pub use canvas::GroupCanvas;
pub use image::create_image_xobject;
pub use merge::merge_documents;
