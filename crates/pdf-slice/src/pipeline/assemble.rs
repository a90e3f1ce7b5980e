//! PDF assembly from staged slices

use super::PageReport;
use super::io::decode_rgb;
use crate::constants::{PAGE_IMAGE_NAME, PRODUCER};
use crate::options::ExportOptions;
use crate::types::Result;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::{ImageReader, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;
use std::path::PathBuf;

/// Build a document with one full-page image per staged file, in order.
pub(crate) fn assemble_document(
    staged: &[PathBuf],
    options: &ExportOptions,
) -> Result<(Document, Vec<PageReport>)> {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();

    let mut page_refs = Vec::with_capacity(staged.len());
    let mut reports = Vec::with_capacity(staged.len());

    for (index, path) in staged.iter().enumerate() {
        let image = decode_rgb(ImageReader::open(path)?.with_guessed_format()?)?;
        let (page_id, report) =
            render_image_page(&mut output, &image, index, pages_tree_id, options)?;
        page_refs.push(Object::Reference(page_id));
        reports.push(report);
    }

    finalize_document(&mut output, pages_tree_id, page_refs, options);
    Ok((output, reports))
}

fn render_image_page(
    output: &mut Document,
    image: &RgbImage,
    index: usize,
    parent_pages_id: ObjectId,
    options: &ExportOptions,
) -> Result<(ObjectId, PageReport)> {
    let (width, height) = image.dimensions();
    let width_pt = options.px_to_pt(width);
    let height_pt = options.px_to_pt(height);

    let image_id = output.add_object(image_xobject(image)?);

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ]),
    );

    // Image space is the unit square; scale it to cover the page.
    let content = format!(
        "q {} 0 0 {} 0 0 cm /{} Do Q\n",
        width_pt, height_pt, PAGE_IMAGE_NAME
    );
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut xobjects = Dictionary::new();
    xobjects.set(PAGE_IMAGE_NAME, Object::Reference(image_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    let page_id = output.add_object(page_dict);
    Ok((
        page_id,
        PageReport {
            index,
            width,
            padded_height: height,
            width_pt,
            height_pt,
        },
    ))
}

/// Losslessly deflated RGB image XObject
fn image_xobject(image: &RgbImage) -> Result<Stream> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(image.as_raw())?;
    let data = encoder.finish()?;

    let dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(image.width() as i64)),
        ("Height", Object::Integer(image.height() as i64)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(b"FlateDecode".to_vec())),
    ]);
    Ok(Stream::new(dict, data))
}

/// Create pages tree, catalog and info dictionary
fn finalize_document(
    output: &mut Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    options: &ExportOptions,
) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    let mut info = Dictionary::new();
    info.set("Producer", Object::string_literal(PRODUCER));
    if let Some(title) = &options.title {
        info.set("Title", Object::string_literal(title.as_str()));
    }
    let info_id = output.add_object(info);
    output.trailer.set("Info", info_id);
}
