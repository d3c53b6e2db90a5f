use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use dataturks2voc::{run_voc_export, VocExportArgs};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = VocExportArgs::parse();

    info!("Starting Dataturks to PASCAL VOC conversion...");
    match run_voc_export(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Conversion failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
