//! Tests for the binary mask export.

use super::Fixture;
use crate::format::formats::{MaskFormat, rasterize};
use crate::format::traits::{AnnotationFormat, ExportOptions};

#[test]
fn test_mask_uses_true_image_size() {
    let mut fx = Fixture::new(&[("scan.png", 8, 4)], &["x"]);
    // Left half of the image.
    fx.add_polygon(
        "scan.png",
        "x",
        &[(0.0, 0.0), (0.5, 0.0), (0.5, 1.0), (0.0, 1.0)],
    );

    let view = fx.view();
    let mask = rasterize(&view, &fx.images[0]).unwrap();
    assert_eq!((mask.width, mask.height), (8, 4));
    assert_eq!(mask.count_foreground(), 16);
    assert_eq!(mask.get(3, 3), 1);
    assert_eq!(mask.get(4, 0), 0);
}

#[test]
fn test_boxes_do_not_reach_the_mask() {
    let mut fx = Fixture::new(&[("a.png", 10, 10)], &["x"]);
    fx.add_box("a.png", "x", (0.5, 0.5, 1.0, 1.0));
    assert!(rasterize(&fx.view(), &fx.images[0]).is_none());
    assert!(MaskFormat
        .export(&fx.view(), &ExportOptions::new())
        .unwrap()
        .is_none());
}

#[test]
fn test_mask_png_output() {
    let mut fx = Fixture::new(&[("photo.jpg", 6, 6)], &["x"]);
    fx.add_polygon(
        "photo.jpg",
        "x",
        &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
    );

    let output = MaskFormat
        .export(&fx.view(), &ExportOptions::new())
        .unwrap()
        .unwrap();
    let file = output.file("photo_mask.png").unwrap();

    let decoded = image::load_from_memory(&file.bytes).unwrap().to_luma8();
    assert_eq!(decoded.dimensions(), (6, 6));
    assert!(decoded.pixels().all(|p| p.0[0] == 255));
    assert_eq!(output.result.annotations_exported, 1);
}

#[test]
fn test_only_current_image() {
    let mut fx = Fixture::new(&[("a.png", 4, 4), ("b.png", 4, 4)], &["x"]);
    fx.add_polygon("b.png", "x", &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    assert!(MaskFormat
        .export(&fx.view(), &ExportOptions::new())
        .unwrap()
        .is_none());

    fx.current = Some(1);
    assert!(MaskFormat
        .export(&fx.view(), &ExportOptions::new())
        .unwrap()
        .is_some());
}

#[test]
fn test_later_polygons_overwrite_in_order() {
    let mut fx = Fixture::new(&[("a.png", 10, 10)], &["x"]);
    fx.add_polygon("a.png", "x", &[(0.0, 0.0), (0.6, 0.0), (0.6, 1.0), (0.0, 1.0)]);
    fx.add_polygon("a.png", "x", &[(0.4, 0.0), (1.0, 0.0), (1.0, 1.0), (0.4, 1.0)]);
    let mask = rasterize(&fx.view(), &fx.images[0]).unwrap();
    assert_eq!(mask.count_foreground(), 100);
}
