use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use dataturks2voc::{run_tfrecord_export, TfRecordArgs};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = TfRecordArgs::parse();

    info!("Starting PASCAL VOC to TFRecord conversion...");
    match run_tfrecord_export(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Conversion failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
