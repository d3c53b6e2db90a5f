//! Validation split sampling and the Dataturks to PASCAL VOC pipeline.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::VocExportArgs;
use crate::conversion::record_from_labeled_item;
use crate::error::Result;
use crate::io::{ensure_dir_exists, read_labeled_lines, setup_split_directories};
use crate::types::ProcessingStats;
use crate::utils::create_progress_bar;
use crate::voc::render_voc_xml;

/// Draw `floor(total * fraction)` distinct validation indices from
/// `[0, total)` uniformly without replacement. Every index outside the
/// returned set belongs to the training split, so the partition is total
/// and disjoint.
pub fn validation_indices<R: Rng>(rng: &mut R, total: usize, fraction: f32) -> HashSet<usize> {
    let count = ((total as f64) * f64::from(fraction)).floor() as usize;
    let count = count.min(total);
    rand::seq::index::sample(rng, total, count)
        .into_iter()
        .collect()
}

enum ItemOutcome {
    Written,
    Skipped,
}

/// Run the full Dataturks JSON to PASCAL VOC XML conversion.
///
/// Items are processed strictly in order; each item is committed to exactly
/// one of the two output directories based on its index. Per-item failures
/// are logged and counted, and the run continues.
pub fn run_voc_export(args: &VocExportArgs) -> Result<ProcessingStats> {
    ensure_dir_exists(&args.image_dir)?;
    setup_split_directories(&args.train_dir, &args.val_dir)?;
    let lines = read_labeled_lines(&args.json_file)?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let val_indices = validation_indices(&mut rng, lines.len(), args.validation_split);
    info!(
        "Read {} items; {} assigned to the validation split.",
        lines.len(),
        val_indices.len()
    );

    let pb = create_progress_bar(lines.len() as u64, "Convert");
    let mut stats = ProcessingStats::new();
    for (idx, line) in lines.iter().enumerate() {
        let out_dir = if val_indices.contains(&idx) {
            &args.val_dir
        } else {
            &args.train_dir
        };
        match convert_item(line, &args.image_dir, out_dir) {
            Ok(ItemOutcome::Written) => stats.record_converted(),
            Ok(ItemOutcome::Skipped) => stats.record_skipped(),
            Err(e) => {
                error!("Failed to convert item {}: {}", idx, e);
                stats.record_failed();
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Conversion complete");

    stats.print_summary();
    Ok(stats)
}

fn convert_item(line: &str, image_dir: &Path, out_dir: &Path) -> Result<ItemOutcome> {
    let record = match record_from_labeled_item(line, image_dir)? {
        Some(record) => record,
        None => return Ok(ItemOutcome::Skipped),
    };

    let xml = render_voc_xml(&record)?;
    let file_name = format!("{}.xml", sanitize_filename::sanitize(&record.filename));
    fs::write(out_dir.join(file_name), xml)?;
    Ok(ItemOutcome::Written)
}
