mod cli;
mod config;
mod host;

use std::process::ExitCode;

use clap::Parser;
use export_core::Phase;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match host::run_app(cli) {
        Ok(Phase::Done) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("wiki-export: {err:#}");
            ExitCode::FAILURE
        }
    }
}
