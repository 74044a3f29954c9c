use ferry_core::logging;
use ferry_core::FerryError;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the
    // state dir is unwritable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        if let Some(FerryError::AlreadyRunning(pid)) = err.downcast_ref::<FerryError>() {
            eprintln!("ferry: worker already running (pid {pid})");
            std::process::exit(1);
        }
        eprintln!("ferry error: {:#}", err);
        std::process::exit(1);
    }
}
