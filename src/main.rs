//! taskplan - dependency-aware task scheduling

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = taskplan::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::from(taskplan::cli::exit_code(&e))
    } else {
        ExitCode::SUCCESS
    }
}
