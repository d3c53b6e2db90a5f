use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use glob::glob;

use crate::error::{ConvertError, Result};

/// Fail fast when a required input path is missing.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConvertError::MissingPath(path.to_path_buf()))
    }
}

/// Create the train and validation output directories if they are missing.
/// Existing directories are left untouched.
pub fn setup_split_directories(train_dir: &Path, val_dir: &Path) -> Result<()> {
    fs::create_dir_all(train_dir)?;
    fs::create_dir_all(val_dir)?;
    Ok(())
}

/// Read the line-delimited Dataturks export. An empty file is a setup error,
/// same as a missing one.
pub fn read_labeled_lines(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(ConvertError::MissingPath(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
    if lines.is_empty() {
        return Err(ConvertError::EmptyInput(path.to_path_buf()));
    }
    Ok(lines)
}

/// List the XML annotation files under a directory, sorted for a stable
/// processing order.
pub fn list_annotation_files(dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_dir_exists(dir)?;
    let pattern = format!("{}/*.xml", dir.display());
    let mut files = glob(&pattern)?
        .map(|entry| entry.map_err(|e| ConvertError::Io(e.into_error())))
        .collect::<Result<Vec<_>>>()?;
    files.sort();
    Ok(files)
}

/// Load the label map: a JSON object from label name to integer class id.
/// Malformed or missing entries surface at first lookup in the encoder.
pub fn load_label_map(path: &Path) -> Result<HashMap<String, i64>> {
    if !path.is_file() {
        return Err(ConvertError::MissingPath(path.to_path_buf()));
    }
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
