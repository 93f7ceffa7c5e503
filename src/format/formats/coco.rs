//! COCO JSON polygon export.
//!
//! Produces a single `annotations_coco.json` with `images`, `annotations`
//! and `categories`. Segmentation coordinates are absolute pixels of each
//! image's true size, not the display surface.

use serde::Serialize;

use crate::constants::COCO_FILE_NAME;
use crate::format::error::FormatError;
use crate::format::project::ProjectView;
use crate::format::traits::{
    AnnotationFormat, ExportFile, ExportOptions, ExportOutput, ExportResult, FormatWarning,
};
use crate::geometry;
use crate::model::EditorMode;

/// COCO JSON format.
///
/// Supports:
/// - Polygons (segmentation)
///
/// Does not support:
/// - Bounding boxes (left out, this export is offered in polygon mode)
/// - Category colors (not part of standard COCO)
pub struct CocoFormat;

/// Root COCO document. Field order is the serialized order.
#[derive(Debug, Serialize)]
pub struct CocoDocument {
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,
    pub categories: Vec<CocoCategory>,
}

#[derive(Debug, Serialize)]
pub struct CocoImage {
    pub id: usize,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct CocoAnnotation {
    /// `"<imageId>_<shapeIndex + 1>"`
    pub id: String,
    pub image_id: usize,
    pub category_id: usize,
    pub segmentation: Vec<Vec<f64>>,
    pub iscrowd: u8,
}

#[derive(Debug, Serialize)]
pub struct CocoCategory {
    pub id: usize,
    pub name: String,
}

impl CocoFormat {
    /// Build the document without encoding it.
    pub fn build_document(&self, project: &ProjectView<'_>, result: &mut ExportResult) -> CocoDocument {
        let categories = project
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| CocoCategory {
                id: i + 1,
                name: label.name.clone(),
            })
            .collect();

        let mut images = Vec::with_capacity(project.images.len());
        let mut annotations = Vec::new();

        for (i, image) in project.images.iter().enumerate() {
            let image_id = i + 1;
            images.push(CocoImage {
                id: image_id,
                file_name: image.name.clone(),
                width: image.width,
                height: image.height,
            });

            for (j, annotation) in project.annotations(image).iter().enumerate() {
                let Some(vertices) = annotation.shape.as_polygon() else {
                    continue;
                };

                let Some(index) = project.labels.index_of(&annotation.label) else {
                    log::warn!(
                        "Skipping polygon with unknown label '{}' on {}",
                        annotation.label,
                        image.name
                    );
                    result.add_warning(
                        FormatWarning::warning(format!(
                            "Polygon label '{}' not found",
                            annotation.label
                        ))
                        .with_image(&image.name),
                    );
                    continue;
                };

                let ring = geometry::denormalize_polygon(
                    vertices,
                    f64::from(image.width),
                    f64::from(image.height),
                );
                let flat = ring.into_iter().flat_map(|(x, y)| [x, y]).collect();

                annotations.push(CocoAnnotation {
                    id: format!("{}_{}", image_id, j + 1),
                    image_id,
                    category_id: index + 1,
                    segmentation: vec![flat],
                    iscrowd: 0,
                });
            }
        }

        result.images_exported = images.len();
        result.annotations_exported = annotations.len();

        CocoDocument {
            images,
            annotations,
            categories,
        }
    }
}

impl AnnotationFormat for CocoFormat {
    fn id(&self) -> &'static str {
        "coco"
    }

    fn display_name(&self) -> &'static str {
        "COCO (JSON)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["json"]
    }

    fn modes(&self) -> &[EditorMode] {
        &[EditorMode::Polygon]
    }

    fn export(
        &self,
        project: &ProjectView<'_>,
        _options: &ExportOptions,
    ) -> Result<Option<ExportOutput>, FormatError> {
        let mut result = ExportResult::new();
        let document = self.build_document(project, &mut result);
        let json = serde_json::to_string_pretty(&document)?;

        log::info!(
            "COCO export: {} polygons across {} images, {} categories",
            document.annotations.len(),
            document.images.len(),
            document.categories.len()
        );
        Ok(Some(ExportOutput::new(
            vec![ExportFile::new(COCO_FILE_NAME, json)],
            result,
        )))
    }
}
