//! Tests for the COCO JSON export.

use serde_json::{Value, json};

use super::Fixture;
use crate::format::formats::CocoFormat;
use crate::format::traits::{AnnotationFormat, ExportOptions, ExportResult};
use crate::model::EditorMode;

fn export_json(fx: &Fixture) -> Value {
    let output = CocoFormat
        .export(&fx.view(), &ExportOptions::new())
        .unwrap()
        .unwrap();
    assert_eq!(output.files.len(), 1);
    assert_eq!(output.files[0].name, "annotations_coco.json");
    serde_json::from_slice(&output.files[0].bytes).unwrap()
}

#[test]
fn test_coco_format_metadata() {
    let format = CocoFormat;
    assert_eq!(format.id(), "coco");
    assert!(!format.available_in(EditorMode::Box));
    assert!(format.available_in(EditorMode::Polygon));
}

#[test]
fn test_triangle_in_true_pixels() {
    let mut fx = Fixture::new(&[("A.png", 100, 50)], &["x"]);
    fx.add_polygon("A.png", "x", &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);

    let doc = export_json(&fx);
    assert_eq!(
        doc["images"],
        json!([{"id": 1, "file_name": "A.png", "width": 100, "height": 50}])
    );
    assert_eq!(doc["categories"], json!([{"id": 1, "name": "x"}]));

    let annotations = doc["annotations"].as_array().unwrap();
    assert_eq!(annotations.len(), 1);
    let ann = &annotations[0];
    assert_eq!(ann["id"], "1_1");
    assert_eq!(ann["image_id"], 1);
    assert_eq!(ann["category_id"], 1);
    assert_eq!(ann["iscrowd"], 0);
    assert_eq!(
        ann["segmentation"],
        json!([[0.0, 0.0, 100.0, 0.0, 100.0, 50.0]])
    );
}

#[test]
fn test_ids_follow_shape_index_and_skip_boxes() {
    let mut fx = Fixture::new(&[("a.png", 10, 10), ("b.png", 20, 40)], &["cat", "dog"]);
    fx.add_box("b.png", "cat", (0.5, 0.5, 0.1, 0.1));
    fx.add_polygon("b.png", "dog", &[(0.0, 0.0), (0.5, 0.0), (0.5, 0.5)]);

    let doc = export_json(&fx);
    assert_eq!(doc["images"].as_array().unwrap().len(), 2);

    let ann = &doc["annotations"][0];
    assert_eq!(ann["id"], "2_2");
    assert_eq!(ann["image_id"], 2);
    assert_eq!(ann["category_id"], 2);
    assert_eq!(
        ann["segmentation"],
        json!([[0.0, 0.0, 10.0, 0.0, 10.0, 20.0]])
    );
}

#[test]
fn test_section_order_and_pretty_print() {
    let fx = Fixture::new(&[], &[]);
    let output = CocoFormat
        .export(&fx.view(), &ExportOptions::new())
        .unwrap()
        .unwrap();
    let text = output.files[0].as_text().unwrap();

    let images = text.find("\"images\"").unwrap();
    let annotations = text.find("\"annotations\"").unwrap();
    let categories = text.find("\"categories\"").unwrap();
    assert!(images < annotations && annotations < categories);
    assert!(text.contains("\n  \"images\""));
}

#[test]
fn test_unknown_label_skipped() {
    let mut fx = Fixture::new(&[("a.png", 10, 10)], &["cat"]);
    fx.add_polygon("a.png", "gone", &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);

    let mut result = ExportResult::new();
    let doc = CocoFormat.build_document(&fx.view(), &mut result);
    assert!(doc.annotations.is_empty());
    assert_eq!(result.warnings.len(), 1);
}
