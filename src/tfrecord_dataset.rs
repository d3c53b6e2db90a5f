//! Flat feature encoding and the PASCAL VOC to TFRecord pipeline.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use image::ImageFormat;
use log::info;
use sha2::{Digest, Sha256};
use tfrecord::{Example, ExampleWriter, Feature};

use crate::config::TfRecordArgs;
use crate::conversion::record_from_voc;
use crate::error::{ConvertError, Result};
use crate::io::{ensure_dir_exists, list_annotation_files, load_label_map};
use crate::types::AnnotationRecord;
use crate::utils::create_progress_bar;
use crate::voc::parse_voc_annotation;

/// Map a record with fractional-coordinate boxes, its raw image bytes, and
/// a label map into the flat feature schema of the training format.
///
/// The five per-object lists are parallel and share the record's object
/// order. An unknown label aborts the run; an unmapped label means the
/// label map and the data disagree, which must not be papered over.
pub fn encode_example(
    record: &AnnotationRecord,
    image_bytes: &[u8],
    label_map: &HashMap<String, i64>,
) -> Result<Example> {
    let key = hex::encode(Sha256::digest(image_bytes));

    let count = record.objects.len();
    let mut xmin = Vec::with_capacity(count);
    let mut xmax = Vec::with_capacity(count);
    let mut ymin = Vec::with_capacity(count);
    let mut ymax = Vec::with_capacity(count);
    let mut classes_text = Vec::with_capacity(count);
    let mut classes = Vec::with_capacity(count);
    let mut difficult = Vec::with_capacity(count);
    let mut truncated = Vec::with_capacity(count);
    let mut views = Vec::with_capacity(count);

    for object in &record.objects {
        let class_id = *label_map
            .get(&object.label)
            .ok_or_else(|| ConvertError::UnknownLabel(object.label.clone()))?;

        xmin.push(object.bndbox.xmin as f32);
        xmax.push(object.bndbox.xmax as f32);
        ymin.push(object.bndbox.ymin as f32);
        ymax.push(object.bndbox.ymax as f32);
        classes_text.push(object.label.clone().into_bytes());
        classes.push(class_id);
        difficult.push(i64::from(object.difficult.unwrap_or(false)));
        truncated.push(object.truncated.unwrap_or(0));
        views.push(object.pose.clone().into_bytes());
    }

    let filename = record.filename.clone().into_bytes();
    let example: Example = vec![
        (
            "image/height".to_string(),
            Feature::from_i64_list(vec![i64::from(record.height)]),
        ),
        (
            "image/width".to_string(),
            Feature::from_i64_list(vec![i64::from(record.width)]),
        ),
        (
            "image/filename".to_string(),
            Feature::from_bytes_iter([filename.clone()]),
        ),
        (
            "image/source_id".to_string(),
            Feature::from_bytes_iter([filename]),
        ),
        (
            "image/key/sha256".to_string(),
            Feature::from_bytes_iter([key.into_bytes()]),
        ),
        (
            "image/encoded".to_string(),
            Feature::from_bytes_iter([image_bytes.to_vec()]),
        ),
        // The format tag is a constant, even for PNG input.
        (
            "image/format".to_string(),
            Feature::from_bytes_iter([b"jpeg".to_vec()]),
        ),
        (
            "image/object/bbox/xmin".to_string(),
            Feature::from_f32_list(xmin),
        ),
        (
            "image/object/bbox/xmax".to_string(),
            Feature::from_f32_list(xmax),
        ),
        (
            "image/object/bbox/ymin".to_string(),
            Feature::from_f32_list(ymin),
        ),
        (
            "image/object/bbox/ymax".to_string(),
            Feature::from_f32_list(ymax),
        ),
        (
            "image/object/class/text".to_string(),
            Feature::from_bytes_iter(classes_text),
        ),
        (
            "image/object/class/label".to_string(),
            Feature::from_i64_list(classes),
        ),
        (
            "image/object/difficult".to_string(),
            Feature::from_i64_list(difficult),
        ),
        (
            "image/object/truncated".to_string(),
            Feature::from_i64_list(truncated),
        ),
        (
            "image/object/view".to_string(),
            Feature::from_bytes_iter(views),
        ),
    ]
    .into_iter()
    .collect();

    Ok(example)
}

/// Run the full PASCAL VOC XML to TFRecord conversion.
///
/// One writer is held for the whole run and every record is appended
/// sequentially; any failure aborts the run with the partially written
/// output left behind.
pub fn run_tfrecord_export(args: &TfRecordArgs) -> Result<()> {
    ensure_dir_exists(&args.image_data_dir)?;
    let label_map = load_label_map(&args.label_map)?;
    let xml_files = list_annotation_files(&args.annotations_dir)?;
    info!(
        "Reading {} annotation files from {}.",
        xml_files.len(),
        args.annotations_dir.display()
    );

    let mut writer = ExampleWriter::create(&args.output_path)?;
    let pb = create_progress_bar(xml_files.len() as u64, "Encode");
    for path in &xml_files {
        let xml = fs::read_to_string(path)?;
        let data = parse_voc_annotation(&xml)?;
        let record = record_from_voc(&data, args.ignore_difficult_instances)?;

        let image_path = args.image_data_dir.join(&record.filename);
        let image_bytes = fs::read(&image_path)?;
        ensure_jpeg_or_png(&image_bytes, &image_path)?;

        let example = encode_example(&record, &image_bytes, &label_map)?;
        writer.send(example)?;
        pb.inc(1);
    }
    pb.finish_with_message("Encoding complete");
    info!(
        "Wrote {} records to {}.",
        xml_files.len(),
        args.output_path.display()
    );

    Ok(())
}

fn ensure_jpeg_or_png(bytes: &[u8], path: &Path) -> Result<()> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) | Ok(ImageFormat::Png) => Ok(()),
        _ => Err(ConvertError::UnsupportedImageFormat(path.to_path_buf())),
    }
}
