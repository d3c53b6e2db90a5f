//! Builders producing normalized annotation records from either input
//! direction: one line of the Dataturks export, or one parsed VOC XML
//! document.

use std::path::Path;

use log::debug;

use crate::error::{ConvertError, Result};
use crate::geometry::resolve_bndbox;
use crate::types::{AnnotationRecord, BndBox, LabeledItem, LabeledObject, UNSPECIFIED};
use crate::voc::XmlAnnotation;

/// Build a record from one line of the Dataturks export.
///
/// Returns `Ok(None)` for an item with an empty annotation array, which the
/// export uses as an explicit skip signal. The declared image dimensions are
/// a hint only; the opened image file is ground truth.
pub fn record_from_labeled_item(
    line: &str,
    image_dir: &Path,
) -> Result<Option<AnnotationRecord>> {
    let item: LabeledItem = serde_json::from_str(line)?;
    if item.annotation.is_empty() {
        return Ok(None);
    }

    let filename = image_file_name(&item.content);
    let path = image_dir.join(&filename);
    let (width, height) = read_image_dimensions(&path)?;

    let declared = item
        .annotation
        .iter()
        .flatten()
        .next()
        .and_then(|entry| entry.image_width.zip(entry.image_height));
    if let Some((dw, dh)) = declared {
        if (dw, dh) != (width, height) {
            debug!(
                "declared size {}x{} differs from actual {}x{} for {}",
                dw, dh, width, height, filename
            );
        }
    }

    let mut objects = Vec::new();
    for entry in item.annotation.iter().flatten() {
        // PASCAL VOC only supports rectangles; polygons, lines and other
        // shapes are dropped.
        if matches!(&entry.shape, Some(shape) if shape != "rectangle") {
            continue;
        }

        let bndbox = resolve_bndbox(&entry.points, width, height)?;
        // A multi-label entry fans out into one object per label, all
        // sharing the same geometry.
        for label in entry.label.as_slice() {
            objects.push(LabeledObject {
                label: label.clone(),
                bndbox,
                pose: UNSPECIFIED.to_string(),
                truncated: None,
                difficult: None,
            });
        }
    }

    let folder = image_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Some(AnnotationRecord {
        filename,
        folder,
        path: path.to_string_lossy().into_owned(),
        width,
        height,
        objects,
    }))
}

/// Build a record with fractional-coordinate boxes from a parsed VOC XML
/// document.
///
/// Objects whose difficulty field is the "Unspecified" sentinel are dropped
/// entirely, not retained as non-difficult. When `ignore_difficult` is set,
/// difficult objects are dropped as well.
pub fn record_from_voc(data: &XmlAnnotation, ignore_difficult: bool) -> Result<AnnotationRecord> {
    let width = parse_field::<u32>("width", &data.size.width)?;
    let height = parse_field::<u32>("height", &data.size.height)?;

    let mut objects = Vec::new();
    for object in &data.objects {
        if object.difficult == UNSPECIFIED {
            continue;
        }
        let difficult = parse_field::<i64>("difficult", &object.difficult)? != 0;
        if ignore_difficult && difficult {
            continue;
        }
        let truncated = parse_field::<i64>("truncated", &object.truncated)?;

        let bndbox = BndBox {
            xmin: parse_field::<f64>("xmin", &object.bndbox.xmin)? / width as f64,
            ymin: parse_field::<f64>("ymin", &object.bndbox.ymin)? / height as f64,
            xmax: parse_field::<f64>("xmax", &object.bndbox.xmax)? / width as f64,
            ymax: parse_field::<f64>("ymax", &object.bndbox.ymax)? / height as f64,
        };

        objects.push(LabeledObject {
            label: object.name.clone(),
            bndbox,
            pose: object.pose.clone(),
            truncated: Some(truncated),
            difficult: Some(difficult),
        });
    }

    Ok(AnnotationRecord {
        filename: data.filename.clone(),
        folder: data.folder.clone(),
        path: data.path.clone(),
        width,
        height,
        objects,
    })
}

/// Derive the image file name from the `content` reference of a Dataturks
/// item: the portion after the export's `___Total_` marker when present,
/// then the last path segment.
pub fn image_file_name(content: &str) -> String {
    let trimmed = match content.split_once("___Total_") {
        Some((_, rest)) => rest,
        None => content,
    };
    trimmed
        .rsplit('/')
        .next()
        .unwrap_or(trimmed)
        .to_string()
}

fn read_image_dimensions(path: &Path) -> Result<(u32, u32)> {
    let reader = image::ImageReader::open(path)?
        .with_guessed_format()?;
    reader.into_dimensions().map_err(|source| ConvertError::Image {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| ConvertError::malformed(field, value))
}
