//! shift-dl CLI - bulk downloader for the SHIFT dataset.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::process::ExitCode;

use clap::Parser;
use shift_dl::cli::{self, Args};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    match cli::run(args).await {
        Ok(status) => ExitCode::from(cli::exit_code(status)),
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(cli::CONFIGURATION_EXIT_CODE)
        }
    }
}
