mod columns;
mod error;
mod mapping;
mod output;
mod pipeline;
mod records;
mod transactions;
mod workbook;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert a mapping workbook into normalized activity/program/link CSV files
#[derive(Parser, Debug)]
#[command(name = "extractor", version, about)]
struct Cli {
    /// Folder holding the workbook (.xlsx, .xlsm or .xls)
    input_folder: PathBuf,

    /// Folder the CSV files are written to (created if missing)
    output_folder: PathBuf,

    /// Log file, appended to
    log_file: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = links_logging::init(&cli.log_file) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    log::info!("Starting processing with:");
    log::info!("- Input folder: {}", cli.input_folder.display());
    log::info!("- Output folder: {}", cli.output_folder.display());
    log::info!("- Log file: {}", cli.log_file.display());

    if !cli.input_folder.is_dir() {
        log::error!("Input folder {} not found", cli.input_folder.display());
        return ExitCode::FAILURE;
    }

    match pipeline::process_workbook(&cli.input_folder, &cli.output_folder) {
        Ok(summary) => {
            summary.log();
            log::info!("Processing completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Processing failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
