//! The backing page of one output group

use super::image::create_image_xobject;
use crate::layout::Placement;
use image::RgbImage;
use lopdf::{Dictionary, Document, Object, Stream};

/// Collects placed images and finalizes them into a one-page document
pub struct GroupCanvas {
    output: Document,
    width_pt: f32,
    height_pt: f32,
    xobjects: Dictionary,
    content_ops: Vec<String>,
}

impl GroupCanvas {
    pub fn new(width_pt: f32, height_pt: f32) -> Self {
        Self {
            output: Document::with_version("1.7"),
            width_pt,
            height_pt,
            xobjects: Dictionary::new(),
            content_ops: Vec::new(),
        }
    }

    /// Draw `image` stretched over the placed rectangle.
    ///
    /// `slot` names the XObject and must be unique within the canvas.
    pub fn draw_image(&mut self, slot: usize, image: &RgbImage, placement: &Placement) {
        let name = format!("Im{}", slot);
        let image_id = create_image_xobject(&mut self.output, image);
        self.xobjects.set(name.as_bytes(), Object::Reference(image_id));
        self.content_ops.push(placement_command(&name, placement));
    }

    /// Number of images drawn so far
    pub fn image_count(&self) -> usize {
        self.content_ops.len()
    }

    /// Finish the page and return it as a standalone document
    pub fn finish(self) -> Document {
        let Self {
            mut output,
            width_pt,
            height_pt,
            xobjects,
            content_ops,
        } = self;

        let pages_tree_id = output.new_object_id();

        let content = content_ops.join("");
        let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let page_id = output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_tree_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width_pt),
                    Object::Real(height_pt),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Dictionary(resources)),
        ]));

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
        ]);
        output
            .objects
            .insert(pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_tree_id)),
        ]));
        output.trailer.set("Root", catalog_id);

        output.compress();
        output
    }
}

/// Generate the content stream command that paints an image XObject.
///
/// Images occupy the unit square, so the matrix scales it to the drawn size.
fn placement_command(xobject_name: &str, placement: &Placement) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        placement.draw_width,
        placement.draw_height,
        placement.draw_x,
        placement.draw_y,
        xobject_name
    )
}
