mod db;
mod error;
mod import;
mod input;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::db::ConnectionParams;

/// Log file, relative to the working directory
const LOG_FILE: &str = "linksData_import.log";

/// Load linksData.csv into <schema>.linksdata on the `postgres` database
#[derive(Parser, Debug)]
#[command(
    name = "loader",
    version,
    about,
    after_help = "Example: loader /path/to/linksData.csv public localhost 5432 postgres mypassword"
)]
struct Cli {
    /// CSV produced by the extractor (columns ACTIVITY, TYPE, PGMID)
    csv_file: PathBuf,

    /// Target schema; the table is always named linksdata
    schema: String,

    host: String,

    port: u16,

    username: String,

    password: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = links_logging::init(LOG_FILE) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    let params = ConnectionParams {
        host: cli.host,
        port: cli.port,
        username: cli.username,
        password: cli.password,
    };
    log::debug!("Connection parameters: {:?}", params);

    match import::import_links_data(&cli.csv_file, &cli.schema, &params.connect_options()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Error during data import: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
