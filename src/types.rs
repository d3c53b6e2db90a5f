use serde::Deserialize;

/// Sentinel for fields the converter intentionally does not compute.
/// Distinct from a numeric 0 in the emitted XML.
pub const UNSPECIFIED: &str = "Unspecified";

/// Constant `<source><database>` value in every emitted annotation.
pub const SOURCE_DATABASE: &str = "Unknown";

/// One point of a bounding-box entry in the Dataturks export.
///
/// Regular boxes list four `[x, y]` pairs forming a (possibly unordered)
/// quadrilateral; the OCR box format lists exactly two `{x, y}` objects,
/// top-left then bottom-right. Both encodings are fractional in [0, 1].
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum PointEntry {
    Pair(f64, f64),
    Offset { x: f64, y: f64 },
}

impl PointEntry {
    pub fn coords(&self) -> (f64, f64) {
        match *self {
            PointEntry::Pair(x, y) => (x, y),
            PointEntry::Offset { x, y } => (x, y),
        }
    }
}

/// Label of one bounding-box entry, either a single string or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LabelField {
    Single(String),
    Multiple(Vec<String>),
}

impl LabelField {
    pub fn as_slice(&self) -> &[String] {
        match self {
            LabelField::Single(label) => std::slice::from_ref(label),
            LabelField::Multiple(labels) => labels,
        }
    }
}

/// One entry of the `annotation` array in a Dataturks line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxEntry {
    pub label: LabelField,
    pub points: Vec<PointEntry>,
    #[serde(default)]
    pub shape: Option<String>,
    /// Advisory only; the opened image file is ground truth.
    #[serde(default)]
    pub image_width: Option<u32>,
    #[serde(default)]
    pub image_height: Option<u32>,
}

/// One line of the line-delimited Dataturks JSON export.
#[derive(Debug, Clone, Deserialize)]
pub struct LabeledItem {
    /// Image reference or URL.
    pub content: String,
    /// An empty array is the skip signal for the whole item. Individual
    /// entries may be `null` in real exports; those are dropped, not errors.
    pub annotation: Vec<Option<BoxEntry>>,
}

/// Axis-aligned box. Whether the coordinates are absolute pixels or [0, 1]
/// fractions is tracked by context and never mixed within one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BndBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

/// One detected instance within an image.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledObject {
    pub label: String,
    pub bndbox: BndBox,
    pub pose: String,
    /// `None` renders as the "Unspecified" sentinel.
    pub truncated: Option<i64>,
    pub difficult: Option<bool>,
}

/// One image's full annotation, normalized from either input direction.
/// Object order is source order and is preserved through every transform.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRecord {
    pub filename: String,
    pub folder: String,
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub objects: Vec<LabeledObject>,
}

// Struct to hold processing statistics for a conversion run
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    pub total_items: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_converted(&mut self) {
        self.total_items += 1;
        self.converted += 1;
    }

    pub fn record_skipped(&mut self) {
        self.total_items += 1;
        self.skipped += 1;
    }

    pub fn record_failed(&mut self) {
        self.total_items += 1;
        self.failed += 1;
    }

    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Total items: {}", self.total_items);
        log::info!("Converted: {}", self.converted);
        log::info!("Skipped (empty annotation): {}", self.skipped);
        log::info!("Failed: {}", self.failed);

        if self.failed > 0 {
            log::warn!(
                "{} items were ignored due to errors; see the log above for details",
                self.failed
            );
        }
    }
}
