use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Failure taxonomy shared by both converters.
///
/// Setup problems (`MissingPath`, `EmptyInput`) are fatal before any item is
/// processed. The remaining variants are recovered per item in the JSON to
/// XML direction and abort the run in the XML to TFRecord direction.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("required path does not exist: {0}")]
    MissingPath(PathBuf),

    #[error("input file is empty: {0}")]
    EmptyInput(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to read image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("image format of {0} is neither JPEG nor PNG")]
    UnsupportedImageFormat(PathBuf),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse annotation XML: {0}")]
    XmlParse(#[from] serde_xml_rs::Error),

    #[error("failed to render annotation XML: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error("malformed {field} field: {value:?}")]
    MalformedField { field: &'static str, value: String },

    #[error("label {0:?} is missing from the label map")]
    UnknownLabel(String),

    #[error("failed to write record: {0}")]
    Record(#[from] tfrecord::Error),
}

impl ConvertError {
    pub(crate) fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        ConvertError::MalformedField {
            field,
            value: value.into(),
        }
    }
}
