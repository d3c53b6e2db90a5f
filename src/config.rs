use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Command-line arguments for converting a Dataturks JSON export to
/// PASCAL VOC XML annotation files.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct VocExportArgs {
    /// Path to the line-delimited JSON file downloaded from Dataturks
    #[arg(long = "json_file")]
    pub json_file: PathBuf,

    /// Directory containing the downloaded images
    #[arg(long = "image_dir")]
    pub image_dir: PathBuf,

    /// Directory for the training split XML files
    #[arg(long = "train_dir")]
    pub train_dir: PathBuf,

    /// Directory for the validation split XML files
    #[arg(long = "val_dir")]
    pub val_dir: PathBuf,

    /// Fraction of items assigned to the validation split
    #[arg(long = "validation_split", default_value_t = 0.2, value_parser = validate_split)]
    pub validation_split: f32,

    /// Seed for the validation split sampler
    #[arg(long = "seed", default_value_t = 42)]
    pub seed: u64,
}

/// Command-line arguments for converting PASCAL VOC XML annotations to a
/// TFRecord file.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct TfRecordArgs {
    /// Directory containing the PASCAL VOC XML annotation files
    #[arg(long = "annotations_dir")]
    pub annotations_dir: PathBuf,

    /// Directory containing the image files referenced by the annotations
    #[arg(long = "image_data_dir")]
    pub image_data_dir: PathBuf,

    /// Path to the JSON label map (label name to integer class id)
    #[arg(long = "label_map")]
    pub label_map: PathBuf,

    /// Path of the TFRecord file to write
    #[arg(long = "output_path")]
    pub output_path: PathBuf,

    /// Drop instances whose difficult flag is set
    #[arg(long = "ignore_difficult_instances")]
    pub ignore_difficult_instances: bool,
}

// Validate that the split fraction is between 0.0 and 1.0
fn validate_split(s: &str) -> Result<f32, String> {
    match f32::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("SPLIT must be between 0.0 and 1.0".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_fraction_bounds() {
        assert!(validate_split("0.0").is_ok());
        assert!(validate_split("0.2").is_ok());
        assert!(validate_split("1.0").is_ok());
        assert!(validate_split("-0.1").is_err());
        assert!(validate_split("1.1").is_err());
        assert!(validate_split("abc").is_err());
    }
}
