//! Dataturks annotation converters for object-detection training pipelines.
//!
//! This library converts between three dataset representations: the
//! line-delimited JSON export produced by Dataturks, PASCAL VOC XML
//! annotation files, and TFRecord files of flat feature records. The two
//! binaries, `dataturks2voc` and `voc2tfrecord`, cover the JSON to XML and
//! XML to TFRecord directions respectively.

pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod io;
pub mod tfrecord_dataset;
pub mod types;
pub mod utils;
pub mod voc;

// Re-export commonly used types and functions
pub use config::{TfRecordArgs, VocExportArgs};
pub use conversion::{image_file_name, record_from_labeled_item, record_from_voc};
pub use dataset::{run_voc_export, validation_indices};
pub use error::{ConvertError, Result};
pub use geometry::resolve_bndbox;
pub use tfrecord_dataset::{encode_example, run_tfrecord_export};
pub use types::{AnnotationRecord, BndBox, LabeledObject, ProcessingStats};
pub use voc::{parse_voc_annotation, render_voc_xml};
