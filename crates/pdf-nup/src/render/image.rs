//! Image XObject creation

use image::RgbImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Add `image` to `output` as an 8-bit DeviceRGB image XObject.
///
/// The pixel data is stored uncompressed; `Document::compress` applies
/// FlateDecode when the document is finalized.
pub fn create_image_xobject(output: &mut Document, image: &RgbImage) -> ObjectId {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(image.width() as i64));
    dict.set("Height", Object::Integer(image.height() as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));

    output.add_object(Stream::new(dict, image.as_raw().clone()))
}
