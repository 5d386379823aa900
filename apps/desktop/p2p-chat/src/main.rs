use p2p_chat::app;
use p2p_chat::error::ChatAppError;
use p2p_chat::logger::initialize as LoggerInitialize;
use p2p_chat::settings;

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::process::ExitCode;

use log::{error, info};
use tokio::io::{BufReader, stdin};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ChatAppError> {
    let dotenv = settings::load_dotenv();

    let config_dir = settings::config_dir()?;
    let log_dir = settings::log_dir(&config_dir);

    // Ensure log directory exists
    create_dir_all(&log_dir).map_err(|e| ChatAppError::App {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&log_dir)?;

    info!("P2P chat console starting");
    info!("Log directory: {}", log_dir.display());
    dotenv.log();

    let config = settings::load(&config_dir)?;
    info!("Backend: {}", config.backend.url);

    app::run(&config, BufReader::new(stdin())).await
}
