//! YOLO TXT box export.
//!
//! One line per box: `<labelIndex> <xc> <yc> <w> <h>`, all values normalized.
//! Label indices are 0-based positions in the label set. Polygons are not
//! part of this format; they are left out with an info note.

use crate::constants::BOX_ARCHIVE_NAME;
use crate::format::error::FormatError;
use crate::format::project::ProjectView;
use crate::format::traits::{
    AnnotationFormat, ExportFile, ExportOptions, ExportOutput, ExportResult, ExportScope,
    FormatWarning,
};
use crate::format::writer::bundle_zip;
use crate::model::{EditorMode, ImageRecord};

/// YOLO TXT format.
///
/// Current-image scope always yields one `<base>.txt`, empty when the image
/// has no boxes. All-images scope yields one file per image holding at least
/// one shape, optionally zipped into `annotations.zip`.
pub struct YoloFormat;

impl AnnotationFormat for YoloFormat {
    fn id(&self) -> &'static str {
        "yolo"
    }

    fn display_name(&self) -> &'static str {
        "YOLO (TXT)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["txt", "zip"]
    }

    fn modes(&self) -> &[EditorMode] {
        EditorMode::all()
    }

    fn export(
        &self,
        project: &ProjectView<'_>,
        options: &ExportOptions,
    ) -> Result<Option<ExportOutput>, FormatError> {
        let mut result = ExportResult::new();

        let files = match options.scope {
            ExportScope::CurrentImage => {
                let Some(image) = project.current_image() else {
                    log::debug!("YOLO export skipped: no current image");
                    return Ok(None);
                };
                vec![image_file(project, image, &mut result)]
            }
            ExportScope::AllImages => project
                .annotated_images()
                .map(|image| image_file(project, image, &mut result))
                .collect::<Vec<_>>(),
        };

        if files.is_empty() {
            log::debug!("YOLO export skipped: no annotated images");
            return Ok(None);
        }

        let files = if options.bundle {
            vec![bundle_zip(BOX_ARCHIVE_NAME, &files)?]
        } else {
            files
        };

        log::info!(
            "YOLO export: {} boxes from {} images",
            result.annotations_exported,
            result.images_exported
        );
        Ok(Some(ExportOutput::new(files, result)))
    }
}

fn image_file(project: &ProjectView<'_>, image: &ImageRecord, result: &mut ExportResult) -> ExportFile {
    let text = box_lines(project, image, result);
    result.images_exported += 1;
    ExportFile::new(format!("{}.txt", image.base_name()), text)
}

/// Render the box lines of one image.
///
/// Boxes whose label is no longer in the label set are skipped with a
/// warning.
pub fn box_lines(project: &ProjectView<'_>, image: &ImageRecord, result: &mut ExportResult) -> String {
    let mut lines = String::new();
    let mut polygons = 0;

    for annotation in project.annotations(image) {
        let Some(b) = annotation.shape.as_box() else {
            polygons += 1;
            continue;
        };

        let Some(index) = project.labels.index_of(&annotation.label) else {
            log::warn!(
                "Skipping box with unknown label '{}' on {}",
                annotation.label,
                image.name
            );
            result.add_warning(
                FormatWarning::warning(format!("Box label '{}' not found", annotation.label))
                    .with_image(&image.name),
            );
            continue;
        };

        lines.push_str(&format!("{} {} {} {} {}\n", index, b.xc, b.yc, b.w, b.h));
        result.annotations_exported += 1;
    }

    if polygons > 0 {
        result.add_warning(
            FormatWarning::info(format!("{} polygons left out", polygons)).with_image(&image.name),
        );
    }
    lines
}
