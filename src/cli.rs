//! Command-line interface module for workout-sorter.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Configuration loading and base directory overrides
//! - Organization orchestration and progress output
//! - The verification pass

use crate::classify::Gender;
use crate::config::{CompiledConfig, SorterConfig};
use crate::organizer::{OrganizeEvent, Organizer};
use crate::output::OutputFormatter;
use crate::report::{CleanupStatus, MoveStatus, RunReport};
use crate::verify::{VerificationReport, Verifier};
use clap::Parser;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Sort workout videos into Male/Female category folders.
#[derive(Debug, Parser)]
#[command(name = "workout-sorter", version, about)]
pub struct Cli {
    /// Directory holding the category folders (overrides the configured base_dir).
    pub base_dir: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show where every video would go without moving anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the verification report after organizing.
    #[arg(long, conflicts_with = "verify_only")]
    pub no_verify: bool,

    /// Only print the verification report.
    #[arg(long)]
    pub verify_only: bool,
}

impl Cli {
    pub fn organize_command(&self) -> OrganizeCommand {
        if self.verify_only {
            OrganizeCommand::Verify
        } else {
            OrganizeCommand::Organize {
                dry_run: self.dry_run,
                verify: !self.no_verify,
            }
        }
    }
}

/// Represents a CLI command to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeCommand {
    /// Sort the videos, optionally followed by the verification report.
    Organize {
        /// If true, simulate the operation without making changes.
        dry_run: bool,
        verify: bool,
    },
    /// Only report what the gender roots contain.
    Verify,
}

/// How a CLI run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// A stop was requested (Ctrl-C); work done so far is kept.
    Interrupted,
}

/// Runs the CLI application with the given command.
///
/// # Arguments
///
/// * `command` - The command to execute
/// * `base_dir` - Optional base directory overriding the configured one
/// * `config_path` - Optional path to configuration file
/// * `stop_flag` - Set from the interrupt handler to stop between files
///
/// # Examples
///
/// ```no_run
/// use workout_sorter::cli::{OrganizeCommand, run_cli};
/// use std::path::Path;
/// use std::sync::Arc;
/// use std::sync::atomic::AtomicBool;
///
/// let result = run_cli(
///     OrganizeCommand::Organize { dry_run: false, verify: true },
///     Some(Path::new("/path/to/WorkOuts")),
///     None,
///     Arc::new(AtomicBool::new(false)),
/// );
/// if let Err(e) = result {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(
    command: OrganizeCommand,
    base_dir: Option<&Path>,
    config_path: Option<&Path>,
    stop_flag: Arc<AtomicBool>,
) -> Result<RunStatus, String> {
    let config = load_config(base_dir, config_path)?;

    match command {
        OrganizeCommand::Organize { dry_run, verify } => {
            let report = organize_videos(&config, dry_run, Arc::clone(&stop_flag))?;
            if report.interrupted || stop_flag.load(Ordering::SeqCst) {
                return Ok(RunStatus::Interrupted);
            }
            if verify {
                verify_organization(&config);
            }
            Ok(RunStatus::Completed)
        }
        OrganizeCommand::Verify => {
            verify_organization(&config);
            Ok(RunStatus::Completed)
        }
    }
}

/// Loads and validates configuration, applying the base directory override.
pub fn load_config(
    base_dir: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<CompiledConfig, String> {
    let mut config = SorterConfig::load(config_path)
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    if let Some(dir) = base_dir {
        config = config.with_base_dir(dir);
    }
    config
        .compile()
        .map_err(|e| format!("Error in configuration: {}", e))
}

/// Sorts every category folder, printing progress as it goes.
///
/// Per-file failures are printed and counted; only a failure to set up the
/// destination tree is returned as an error.
pub fn organize_videos(
    config: &CompiledConfig,
    dry_run: bool,
    stop_flag: Arc<AtomicBool>,
) -> Result<RunReport, String> {
    OutputFormatter::plain("Workout Video Organizer Started");
    OutputFormatter::rule();
    OutputFormatter::info(&format!("Base directory: {}", config.base_dir().display()));
    if dry_run {
        OutputFormatter::dry_run_notice("Nothing will be created, moved or removed.");
    } else {
        OutputFormatter::plain("Creating category subdirectories...");
    }

    let organizer = Organizer::new(config.clone())
        .dry_run(dry_run)
        .with_stop_flag(stop_flag);

    let mut bar: Option<ProgressBar> = None;
    let mut cleanup_started = false;

    let report = organizer
        .organize(|event| match event {
            OrganizeEvent::DirectoriesPrepared { categories } => {
                for category in categories {
                    OutputFormatter::success(&format!("Created: {}", category));
                }
                OutputFormatter::header("Moving workout videos...");
            }
            OrganizeEvent::CategoryStarted { category, files } => {
                OutputFormatter::info(&format!("\nProcessing: {}", category));
                bar = Some(OutputFormatter::create_progress_bar(files as u64));
            }
            OrganizeEvent::FileProcessed(outcome) => {
                let print = || match &outcome.status {
                    MoveStatus::Moved => OutputFormatter::plain(
                        &OutputFormatter::classification_line(
                            outcome.classification,
                            &outcome.file_name,
                        ),
                    ),
                    MoveStatus::Planned => OutputFormatter::plain(&format!(
                        "{}\n      → would move to {}",
                        OutputFormatter::classification_line(
                            outcome.classification,
                            &outcome.file_name,
                        ),
                        outcome.destination.display()
                    )),
                    MoveStatus::Failed(e) => OutputFormatter::error(&format!(
                        "  ERROR moving {}: {}",
                        outcome.file_name, e
                    )),
                };
                match &bar {
                    Some(pb) => {
                        pb.suspend(print);
                        pb.inc(1);
                    }
                    None => print(),
                }
            }
            OrganizeEvent::CategoryFinished { .. } => {
                if let Some(pb) = bar.take() {
                    pb.finish_and_clear();
                }
            }
            OrganizeEvent::ScanFailed { category, error } => {
                OutputFormatter::error(&format!("Could not read {}: {}", category, error));
            }
            OrganizeEvent::DirectoryCleaned(outcome) => {
                if !cleanup_started {
                    OutputFormatter::header("Cleaning up empty directories...");
                    cleanup_started = true;
                }
                match &outcome.status {
                    CleanupStatus::Removed => {
                        OutputFormatter::success(&format!("Removed empty: {}", outcome.category))
                    }
                    CleanupStatus::Retained { remaining } => OutputFormatter::warning(&format!(
                        "{} still contains {} items",
                        outcome.category, remaining
                    )),
                    CleanupStatus::Failed(e) => OutputFormatter::error(&format!(
                        "Could not remove {}: {}",
                        outcome.category, e
                    )),
                }
            }
        })
        .map_err(|e| e.to_string())?;

    if report.interrupted {
        return Ok(report);
    }

    OutputFormatter::run_summary(&report);

    if dry_run {
        OutputFormatter::dry_run_notice("Dry run complete. No files were modified.");
    } else {
        OutputFormatter::success("Workout video organization completed!");
        OutputFormatter::structure(
            config.root_name(Gender::Male),
            config.root_name(Gender::Female),
        );
    }

    Ok(report)
}

/// Prints and returns the verification report.
pub fn verify_organization(config: &CompiledConfig) -> VerificationReport {
    let report = Verifier::new(config).verify();
    OutputFormatter::verification(&report);
    report
}
