use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use workout_sorter::cli::{Cli, RunStatus, run_cli};
use workout_sorter::output::OutputFormatter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Ctrl-C only raises the flag; the organizer stops before the next file.
    let stop_flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&stop_flag);
    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        OutputFormatter::warning(&format!("Could not install Ctrl-C handler: {}", e));
    }

    match run_cli(
        cli.organize_command(),
        cli.base_dir.as_deref(),
        cli.config.as_deref(),
        stop_flag,
    ) {
        Ok(RunStatus::Completed) => ExitCode::SUCCESS,
        Ok(RunStatus::Interrupted) => {
            OutputFormatter::warning("Operation cancelled by user");
            ExitCode::SUCCESS
        }
        Err(e) => {
            OutputFormatter::error(&format!("Unexpected error: {}", e));
            OutputFormatter::plain("Please check the paths and try again.");
            ExitCode::FAILURE
        }
    }
}
