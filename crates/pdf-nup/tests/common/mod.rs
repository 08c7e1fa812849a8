#![allow(dead_code)]

use image::RgbImage;
use lopdf::{Dictionary, Document, Object, Stream};
use pdf_nup::{PageError, PageRasterizer, SourcePage};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// What to put on one synthesized page
#[derive(Debug, Clone)]
pub enum PageSpec {
    /// A US Letter page showing the given text
    Text(String),
    /// A US Letter page with an empty content stream
    Blank,
    /// A page of the given size showing the given text
    Sized(i64, i64, String),
}

pub fn text_pages(count: usize) -> Vec<PageSpec> {
    (0..count)
        .map(|i| PageSpec::Text(format!("Page {}", i + 1)))
        .collect()
}

pub fn create_test_pdf(specs: &[PageSpec]) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let mut kids = Vec::new();
    for spec in specs {
        let (width, height, content) = match spec {
            PageSpec::Text(text) => (612, 792, text_content(text)),
            PageSpec::Blank => (612, 792, b"q Q".to_vec()),
            PageSpec::Sized(w, h, text) => (*w, *h, text_content(text)),
        };

        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        let mut fonts = Dictionary::new();
        fonts.set("F1", Object::Reference(font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

fn text_content(text: &str) -> Vec<u8> {
    format!("BT /F1 24 Tf 72 700 Td ({}) Tj ET", text).into_bytes()
}

pub fn write_test_pdf(path: &Path, specs: &[PageSpec]) {
    let mut doc = create_test_pdf(specs);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    std::fs::write(path, bytes).unwrap();
}

/// Renders every page as a flat gray image at a tenth of its size and
/// records the order pages were requested in.
#[derive(Clone, Default)]
pub struct TestRasterizer {
    fail_on: Vec<usize>,
    pub rendered: Arc<Mutex<Vec<usize>>>,
}

impl TestRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(pages: &[usize]) -> Self {
        Self {
            fail_on: pages.to_vec(),
            ..Default::default()
        }
    }

    pub fn rendered(&self) -> Vec<usize> {
        self.rendered.lock().unwrap().clone()
    }
}

impl PageRasterizer for TestRasterizer {
    fn rasterize(&self, page: &SourcePage<'_>) -> Result<RgbImage, PageError> {
        self.rendered.lock().unwrap().push(page.index);
        if self.fail_on.contains(&page.index) {
            return Err(PageError::Raster {
                page: page.index,
                reason: "corrupt content stream".to_string(),
            });
        }
        let width = (page.width / 10.0).max(1.0) as u32;
        let height = (page.height / 10.0).max(1.0) as u32;
        Ok(RgbImage::from_pixel(width, height, image::Rgb([128, 128, 128])))
    }
}

/// Names of the XObjects drawn on each page of `doc`, in page order
pub fn xobject_names(doc: &Document) -> Vec<Vec<String>> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let page = doc.get_dictionary(page_id).unwrap();
            let resources = match page.get(b"Resources").unwrap() {
                Object::Reference(id) => doc.get_dictionary(*id).unwrap(),
                other => other.as_dict().unwrap(),
            };
            let xobjects = match resources.get(b"XObject").unwrap() {
                Object::Reference(id) => doc.get_dictionary(*id).unwrap(),
                other => other.as_dict().unwrap(),
            };
            let mut names: Vec<String> = xobjects
                .iter()
                .map(|(name, _)| String::from_utf8_lossy(name).into_owned())
                .collect();
            names.sort();
            names
        })
        .collect()
}

/// MediaBox width and height of every page of `doc`
pub fn page_sizes(doc: &Document) -> Vec<(f32, f32)> {
    doc.get_pages()
        .values()
        .map(|&page_id| pdf_nup::source::page_dimensions(doc, page_id))
        .collect()
}
