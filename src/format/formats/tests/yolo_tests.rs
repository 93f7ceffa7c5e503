//! Tests for the YOLO box export.

use std::io::{Cursor, Read};

use super::Fixture;
use crate::format::formats::YoloFormat;
use crate::format::traits::{AnnotationFormat, ExportOptions, ExportScope, WarningSeverity};
use crate::model::EditorMode;

fn two_image_fixture() -> Fixture {
    let mut fx = Fixture::new(&[("a.png", 100, 50), ("b.jpg", 64, 64), ("c.png", 10, 10)], &["cat", "dog"]);
    fx.add_box("a.png", "dog", (0.5, 0.5, 0.25, 0.5));
    fx.add_polygon("a.png", "cat", &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    fx.add_box("a.png", "cat", (0.1, 0.2, 0.05, 0.1));
    fx.add_box("b.jpg", "cat", (0.75, 0.25, 0.5, 0.5));
    fx
}

#[test]
fn test_yolo_format_metadata() {
    let format = YoloFormat;

    assert_eq!(format.id(), "yolo");
    assert!(format.extensions().contains(&"txt"));
    assert!(format.available_in(EditorMode::Box));
    assert!(format.available_in(EditorMode::Polygon));
}

#[test]
fn test_current_image_lines() {
    let fx = two_image_fixture();
    let output = YoloFormat
        .export(&fx.view(), &ExportOptions::new())
        .unwrap()
        .unwrap();

    assert_eq!(output.files.len(), 1);
    let file = output.file("a.txt").unwrap();
    assert_eq!(file.as_text(), Some("1 0.5 0.5 0.25 0.5\n0 0.1 0.2 0.05 0.1\n"));
    assert_eq!(output.result.annotations_exported, 2);
}

#[test]
fn test_current_image_without_boxes_is_empty_file() {
    let mut fx = two_image_fixture();
    fx.current = Some(2);
    let output = YoloFormat
        .export(&fx.view(), &ExportOptions::new())
        .unwrap()
        .unwrap();
    assert_eq!(output.file("c.txt").and_then(|f| f.as_text()), Some(""));
}

#[test]
fn test_no_current_image_exports_nothing() {
    let fx = Fixture::new(&[], &["cat"]);
    assert!(YoloFormat
        .export(&fx.view(), &ExportOptions::new())
        .unwrap()
        .is_none());
}

#[test]
fn test_all_images_skips_unannotated() {
    let fx = two_image_fixture();
    let output = YoloFormat
        .export(&fx.view(), &ExportOptions::new().scope(ExportScope::AllImages))
        .unwrap()
        .unwrap();

    let names: Vec<&str> = output.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
    assert_eq!(output.result.images_exported, 2);
    assert_eq!(output.result.annotations_exported, 3);
}

#[test]
fn test_batch_zip_bundle() {
    let fx = two_image_fixture();
    let output = YoloFormat
        .export(&fx.view(), &ExportOptions::batch())
        .unwrap()
        .unwrap();

    assert_eq!(output.files.len(), 1);
    let archive = &output.files[0];
    assert_eq!(archive.name, "annotations.zip");

    let mut reader = zip::ZipArchive::new(Cursor::new(archive.bytes.clone())).unwrap();
    assert_eq!(reader.len(), 2);
    let mut text = String::new();
    reader
        .by_name("b.txt")
        .unwrap()
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, "0 0.75 0.25 0.5 0.5\n");
}

#[test]
fn test_batch_with_no_shapes_exports_nothing() {
    let fx = Fixture::new(&[("a.png", 10, 10)], &["cat"]);
    assert!(YoloFormat
        .export(&fx.view(), &ExportOptions::batch())
        .unwrap()
        .is_none());
}

#[test]
fn test_unknown_label_skipped_with_warning() {
    let mut fx = Fixture::new(&[("a.png", 10, 10)], &["cat"]);
    fx.add_box("a.png", "ghost", (0.5, 0.5, 0.1, 0.1));
    fx.add_box("a.png", "cat", (0.5, 0.5, 0.2, 0.2));

    let output = YoloFormat
        .export(&fx.view(), &ExportOptions::new())
        .unwrap()
        .unwrap();
    assert_eq!(output.files[0].as_text(), Some("0 0.5 0.5 0.2 0.2\n"));
    assert!(output.result.has_warnings());
    assert_eq!(output.result.warnings[0].image.as_deref(), Some("a.png"));
    assert_eq!(output.result.problems().count(), 1);
}

#[test]
fn test_polygons_noted_not_exported() {
    let fx = two_image_fixture();
    let output = YoloFormat
        .export(&fx.view(), &ExportOptions::new())
        .unwrap()
        .unwrap();

    assert_eq!(output.result.warnings.len(), 1);
    assert_eq!(output.result.warnings[0].severity, WarningSeverity::Info);
    assert_eq!(output.result.problems().count(), 0);
}
