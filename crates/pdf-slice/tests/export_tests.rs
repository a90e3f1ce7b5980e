use flate2::read::ZlibDecoder;
use image::{Rgb, RgbImage};
use lopdf::{Document, Object};
use pdf_slice::*;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn load_output(path: &Path) -> Document {
    let bytes = std::fs::read(path).unwrap();
    Document::load_mem(&bytes).unwrap()
}

fn media_box(doc: &Document, page_number: u32) -> (f32, f32) {
    let page_id = doc.get_pages()[&page_number];
    let page = doc.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    (
        media_box[2].as_float().unwrap(),
        media_box[3].as_float().unwrap(),
    )
}

/// Decoded (width, height, rgb samples) of the image drawn on a page
fn page_image(doc: &Document, page_number: u32) -> (i64, i64, Vec<u8>) {
    let page_id = doc.get_pages()[&page_number];
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let image_id = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
    let stream = doc.get_object(image_id).unwrap().as_stream().unwrap();

    match stream.dict.get(b"Filter").unwrap() {
        Object::Name(name) => assert_eq!(name, b"FlateDecode"),
        other => panic!("unexpected filter {:?}", other),
    }
    let width = stream.dict.get(b"Width").unwrap().as_i64().unwrap();
    let height = stream.dict.get(b"Height").unwrap().as_i64().unwrap();

    let mut samples = Vec::new();
    ZlibDecoder::new(stream.content.as_slice())
        .read_to_end(&mut samples)
        .unwrap();
    (width, height, samples)
}

fn staging_options(root: &Path) -> ExportOptions {
    ExportOptions {
        staging_dir: Some(root.to_owned()),
        ..Default::default()
    }
}

fn dir_is_empty(path: &Path) -> bool {
    std::fs::read_dir(path).unwrap().next().is_none()
}

#[tokio::test]
async fn test_export_one_page_per_slice() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out.pdf");
    let slices = vec![gradient(90, 127), gradient(90, 127), gradient(90, 200)];

    let report = export_pdf(slices, &output, &ExportOptions::default())
        .await
        .unwrap();

    assert_eq!(report.page_count, 3);
    assert_eq!(report.output_path, output);
    let doc = load_output(&output);
    assert_eq!(doc.get_pages().len(), 3);

    let (w, h, _) = page_image(&doc, 3);
    assert_eq!((w, h), (90, 200));
}

#[tokio::test]
async fn test_export_page_size_follows_dpi() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out.pdf");
    let options = ExportOptions {
        dpi: 72.0,
        ..Default::default()
    };

    let report = export_pdf(vec![gradient(90, 127)], &output, &options)
        .await
        .unwrap();

    assert_eq!(report.pages[0].width_pt, 90.0);
    assert_eq!(report.pages[0].height_pt, 127.0);
    let doc = load_output(&output);
    assert_eq!(media_box(&doc, 1), (90.0, 127.0));
}

#[tokio::test]
async fn test_export_embeds_pixels_losslessly() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out.pdf");
    let slice = gradient(64, 91);

    export_pdf(vec![slice.clone()], &output, &ExportOptions::default())
        .await
        .unwrap();

    let doc = load_output(&output);
    let (w, h, samples) = page_image(&doc, 1);
    assert_eq!((w, h), (64, 91));
    assert_eq!(samples, slice.into_raw());
}

#[tokio::test]
async fn test_export_sets_info_dictionary() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out.pdf");
    let options = ExportOptions {
        title: Some("Scan".to_string()),
        ..Default::default()
    };

    export_pdf(vec![gradient(10, 14)], &output, &options)
        .await
        .unwrap();

    let doc = load_output(&output);
    let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = doc.get_dictionary(info_id).unwrap();
    match info.get(b"Title").unwrap() {
        Object::String(bytes, _) => assert_eq!(bytes, b"Scan"),
        other => panic!("unexpected title {:?}", other),
    }
    assert!(info.get(b"Producer").is_ok());
}

#[tokio::test]
async fn test_export_removes_staged_files_on_success() {
    let work = TempDir::new().unwrap();
    let staging_root = TempDir::new().unwrap();
    let output = work.path().join("out.pdf");

    export_pdf(
        vec![gradient(20, 28), gradient(20, 28)],
        &output,
        &staging_options(staging_root.path()),
    )
    .await
    .unwrap();

    assert!(output.exists());
    assert!(dir_is_empty(staging_root.path()));
}

#[tokio::test]
async fn test_export_removes_staged_files_on_failure() {
    let work = TempDir::new().unwrap();
    let staging_root = TempDir::new().unwrap();
    let output = work.path().join("missing-dir").join("out.pdf");

    let result = export_pdf(
        vec![gradient(20, 28), gradient(20, 28)],
        &output,
        &staging_options(staging_root.path()),
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExportIo);
    assert!(!output.exists());
    assert!(dir_is_empty(staging_root.path()));
}

#[tokio::test]
async fn test_export_failure_leaves_no_partial_output() {
    let work = TempDir::new().unwrap();
    // A directory where the PDF should go cannot be replaced by a file
    let output = work.path().join("taken");
    std::fs::create_dir(&output).unwrap();
    std::fs::write(output.join("keep.txt"), b"x").unwrap();

    let result = export_pdf(vec![gradient(20, 28)], &output, &ExportOptions::default()).await;

    assert!(result.is_err());
    assert!(output.is_dir());
    let leftovers: Vec<_> = std::fs::read_dir(work.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("taken")]);
}

#[tokio::test]
async fn test_export_rejects_empty_slice_list() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out.pdf");

    let result = export_pdf(Vec::new(), &output, &ExportOptions::default()).await;

    assert!(matches!(result, Err(SliceError::NoSlices)));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_export_rejects_invalid_dpi() {
    let work = TempDir::new().unwrap();
    let output = work.path().join("out.pdf");
    let options = ExportOptions {
        dpi: 0.0,
        ..Default::default()
    };

    let result = export_pdf(vec![gradient(10, 14)], &output, &options).await;

    assert!(matches!(result, Err(SliceError::Config(_))));
}

#[tokio::test]
async fn test_load_image_png() {
    let work = TempDir::new().unwrap();
    let path = work.path().join("scan.png");
    gradient(33, 77).save(&path).unwrap();

    let loaded = load_image(&path).await.unwrap();

    assert_eq!(loaded.dimensions(), ImageDimensions::new(33, 77));
    assert_eq!(loaded.path, path);
    assert_eq!(*loaded.image, gradient(33, 77));
}

#[tokio::test]
async fn test_load_image_missing_file() {
    let work = TempDir::new().unwrap();
    let path = work.path().join("nope.png");

    let err = load_image(&path).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
}

#[tokio::test]
async fn test_load_image_undecodable() {
    let work = TempDir::new().unwrap();
    let path = work.path().join("broken.png");
    std::fs::write(&path, b"definitely not an image").unwrap();

    let err = load_image(&path).await.unwrap_err();
    assert!(matches!(err, SliceError::Load { .. }));
}

#[tokio::test]
async fn test_load_image_larger_than_decoder_default_allocation() {
    // 180M pixels, 540 MB of RGB samples
    let work = TempDir::new().unwrap();
    let path = work.path().join("long-scan.png");
    RgbImage::new(9000, 20000).save(&path).unwrap();

    let loaded = load_image(&path).await.unwrap();

    assert_eq!(loaded.dimensions(), ImageDimensions::new(9000, 20000));
}
