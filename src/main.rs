use std::{panic, process::ExitCode};

use atlas_terminal::{AnalysisError, Cli, app};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("atlas_terminal"), my_code_level)
        .parse_default_env()
        .init();

    let args = Cli::parse();

    match app::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            // Bad input is distinguished from internal faults, like a 4xx vs a 5xx.
            let client_error = e
                .chain()
                .filter_map(|cause| cause.downcast_ref::<AnalysisError>())
                .any(AnalysisError::is_client_error);
            if client_error {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
