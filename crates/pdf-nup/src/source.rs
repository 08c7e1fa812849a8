//! Source document access
//!
//! Wraps the parsed input PDF together with its raw bytes. The parsed form
//! serves text extraction and page geometry; the bytes are handed to the
//! rasterizer backend, which parses the file on its own.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::*;
use lopdf::{Document, Object, ObjectId};

/// Maximum depth followed when resolving inherited page attributes
const MAX_INHERITANCE_DEPTH: usize = 32;

/// A loaded, read-only input document
pub struct SourceDocument {
    document: Document,
    bytes: Vec<u8>,
    page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Parse a PDF from its bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let document = Document::load_mem(&bytes).map_err(|e| NupError::Load(e.to_string()))?;
        let page_ids = document.get_pages().values().copied().collect();
        Ok(Self {
            document,
            bytes,
            page_ids,
        })
    }

    /// Wrap an already-built document, serializing it for the rasterizer
    pub fn from_document(mut document: Document) -> Result<Self> {
        let mut bytes = Vec::new();
        document
            .save_to(&mut bytes)
            .map_err(|e| NupError::Load(e.to_string()))?;
        let page_ids = document.get_pages().values().copied().collect();
        Ok(Self {
            document,
            bytes,
            page_ids,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// The parsed document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The raw file contents
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the page at `index`, or `None` past the end
    pub fn page(&self, index: usize) -> Option<SourcePage<'_>> {
        let id = *self.page_ids.get(index)?;
        let (width, height) = page_dimensions(&self.document, id);
        Some(SourcePage {
            source: self,
            index,
            id,
            width,
            height,
        })
    }

    /// Iterate over all pages in document order
    pub fn pages(&self) -> impl Iterator<Item = SourcePage<'_>> {
        (0..self.page_count()).filter_map(|index| self.page(index))
    }
}

/// One page of a `SourceDocument`
#[derive(Clone, Copy)]
pub struct SourcePage<'a> {
    source: &'a SourceDocument,
    /// Zero-based position in the document
    pub index: usize,
    /// Object id of the page dictionary
    pub id: ObjectId,
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
}

impl<'a> SourcePage<'a> {
    /// The document this page belongs to
    pub fn source(&self) -> &'a SourceDocument {
        self.source
    }

    /// Extract the page's text content
    pub fn text(&self) -> std::result::Result<String, PageError> {
        let page_number = u32::try_from(self.index + 1).map_err(|e| PageError::TextExtraction {
            page: self.index,
            reason: e.to_string(),
        })?;

        self.source
            .document
            .extract_text(&[page_number])
            .map_err(|e| PageError::TextExtraction {
                page: self.index,
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Debug for SourcePage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourcePage")
            .field("index", &self.index)
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// Get the displayed page size (width, height) in points.
///
/// This is the CropBox clipped to the MediaBox, turned by the page's
/// `/Rotate`. All three are inheritable from the page tree. Without a CropBox
/// the MediaBox is used, and without either the size falls back to US Letter.
pub fn page_dimensions(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let media_box = inherited_attribute(doc, page_id, b"MediaBox").and_then(page_box);
    let crop_box = inherited_attribute(doc, page_id, b"CropBox").and_then(page_box);

    let visible = match (crop_box, media_box) {
        (Some(crop), Some(media)) => crop.intersect(&media),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => {
            let (width, height) = DEFAULT_PAGE_DIMENSIONS;
            PageBox::new(0.0, 0.0, width, height)
        }
    };

    let (width, height) = (visible.width(), visible.height());
    match page_rotation(doc, page_id) {
        90 | 270 => (height, width),
        _ => (width, height),
    }
}

/// Clockwise page rotation normalized to 0, 90, 180 or 270
pub fn page_rotation(doc: &Document, page_id: ObjectId) -> i64 {
    inherited_attribute(doc, page_id, b"Rotate")
        .and_then(|obj| obj.as_i64().ok())
        .map(|degrees| degrees.rem_euclid(360))
        .unwrap_or(0)
}

/// Look up `key` on the page, then on its ancestors, following references
fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut dict = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Ok(value) = dict.get(key) {
            return match value {
                Object::Reference(id) => doc.get_object(*id).ok(),
                other => Some(other),
            };
        }
        dict = dict
            .get(b"Parent")
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_dictionary(id))
            .ok()?;
    }

    None
}

/// A normalized rectangle from a MediaBox or CropBox array
#[derive(Debug, Clone, Copy, PartialEq)]
struct PageBox {
    llx: f32,
    lly: f32,
    urx: f32,
    ury: f32,
}

impl PageBox {
    fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            llx: x0.min(x1),
            lly: y0.min(y1),
            urx: x0.max(x1),
            ury: y0.max(y1),
        }
    }

    /// Overlap of two boxes; empty when they do not overlap
    fn intersect(&self, other: &PageBox) -> PageBox {
        let llx = self.llx.max(other.llx);
        let lly = self.lly.max(other.lly);
        PageBox {
            llx,
            lly,
            urx: self.urx.min(other.urx).max(llx),
            ury: self.ury.min(other.ury).max(lly),
        }
    }

    fn width(&self) -> f32 {
        self.urx - self.llx
    }

    fn height(&self) -> f32 {
        self.ury - self.lly
    }
}

fn page_box(obj: &Object) -> Option<PageBox> {
    let values: Vec<f32> = obj.as_array().ok()?.iter().filter_map(extract_number).collect();

    match values.as_slice() {
        [llx, lly, urx, ury] => Some(PageBox::new(*llx, *lly, *urx, *ury)),
        _ => None,
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
