//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status lines,
//! per-category progress bars, the run summary and the verification report.

use crate::classify::Classification;
use crate::report::{CleanupStatus, MoveStatus, RunReport};
use crate::verify::VerificationReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Longest file name shown in progress lines before it is truncated.
pub const MAX_DISPLAY_NAME: usize = 60;

const RULE_WIDTH: usize = 50;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use workout_sorter::output::OutputFormatter;
    /// OutputFormatter::success("Created: Arms Workout");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a horizontal rule.
    pub fn rule() {
        println!("{}", "=".repeat(RULE_WIDTH));
    }

    /// Creates a progress bar for the videos of one category.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use workout_sorter::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(12);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Formats the line printed for one processed video.
    pub fn classification_line(classification: Classification, file_name: &str) -> String {
        let label = match classification {
            Classification::Female => classification.label().magenta(),
            Classification::Male => classification.label().blue(),
            Classification::Unspecified => classification.label().yellow(),
        };
        format!("   {}: {}", label, display_name(file_name))
    }

    /// Prints the end-of-run statistics, followed by everything left behind.
    pub fn run_summary(report: &RunReport) {
        let stats = &report.stats;
        println!();
        Self::rule();
        println!("{}", "ORGANIZATION SUMMARY".bold());
        Self::rule();
        println!("Total video files processed: {}", stats.total_files);
        println!("Male workout videos: {}", stats.male_files);
        println!("Female workout videos: {}", stats.female_files);
        println!(
            "Unspecified videos (moved to Male): {}",
            stats.unspecified_files
        );
        println!(
            "Successfully moved files: {}",
            stats.moved_files.to_string().green()
        );
        println!("Empty directories cleaned: {}", stats.empty_dirs_removed);

        if stats.has_errors() {
            Self::warning(&format!("Errors encountered: {}", stats.errors));
        }

        let problems = problem_lines(report);
        if !problems.is_empty() {
            Self::header("Left in place:");
            for line in &problems {
                println!("   {}", line);
            }
        }
    }

    /// Prints the layout of the sorted tree.
    pub fn structure(male_root: &str, female_root: &str) {
        Self::header("New structure:");
        println!("   {}/", male_root);
        println!("      └── [All workout categories with male videos]");
        println!("   {}/", female_root);
        println!("      └── [All workout categories with female videos]");
    }

    /// Prints the verification report.
    pub fn verification(report: &VerificationReport) {
        Self::header("VERIFICATION REPORT");
        println!("{}", "=".repeat(30));

        for root in &report.roots {
            let name = root
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.gender.to_string());
            if !root.exists {
                Self::warning(&format!("{}: not found at {}", name, root.path.display()));
                continue;
            }
            if let Some(error) = &root.read_error {
                Self::error(&format!("{}: could not be read: {}", name, error));
                continue;
            }
            println!(
                "{}: {} categories, {} videos",
                name.bold(),
                root.categories.len(),
                root.total_videos().to_string().green()
            );
            if root.unreadable_entries > 0 {
                Self::warning(&format!(
                    "{}: {} unreadable entries were not counted",
                    name, root.unreadable_entries
                ));
            }
        }
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}

/// One line per failed move, unreadable folder and folder that could not be cleaned up.
pub fn problem_lines(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();
    for outcome in &report.moves {
        if let MoveStatus::Failed(e) = &outcome.status {
            lines.push(format!("{}: {}", outcome.source.display(), e));
        }
    }
    for error in &report.scan_failures {
        lines.push(error.to_string());
    }
    for outcome in &report.cleanup {
        if let CleanupStatus::Failed(e) = &outcome.status {
            lines.push(format!("{}: {}", outcome.path.display(), e));
        }
    }
    lines
}

/// Shortens long file names to `MAX_DISPLAY_NAME` characters followed by `...`.
pub fn display_name(file_name: &str) -> String {
    if file_name.chars().count() > MAX_DISPLAY_NAME {
        let truncated: String = file_name.chars().take(MAX_DISPLAY_NAME).collect();
        format!("{}...", truncated)
    } else {
        file_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classification;
    use crate::organizer::OrganizeError;
    use crate::report::{CleanupOutcome, MoveOutcome};
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_problem_lines_name_the_affected_paths() {
        let mut report = RunReport::default();
        report.moves.push(MoveOutcome {
            category: "Arms Workout".to_string(),
            file_name: "curl.mp4".to_string(),
            source: PathBuf::from("/w/Arms Workout/curl.mp4"),
            destination: PathBuf::from("/w/Male Workout/Arms Workout/curl.mp4"),
            classification: Classification::Unspecified,
            status: MoveStatus::Failed(OrganizeError::DestinationExists {
                source: PathBuf::from("/w/Arms Workout/curl.mp4"),
                destination: PathBuf::from("/w/Male Workout/Arms Workout/curl.mp4"),
            }),
        });
        report.moves.push(MoveOutcome {
            category: "Arms Workout".to_string(),
            file_name: "row.mp4".to_string(),
            source: PathBuf::from("/w/Arms Workout/row.mp4"),
            destination: PathBuf::from("/w/Male Workout/Arms Workout/row.mp4"),
            classification: Classification::Unspecified,
            status: MoveStatus::Moved,
        });
        report.record_scan_failure(OrganizeError::ReadDirFailed {
            path: PathBuf::from("/w/Leg Workout"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        report.cleanup.push(CleanupOutcome {
            category: "Hips Workout".to_string(),
            path: PathBuf::from("/w/Hips Workout"),
            status: CleanupStatus::Failed(OrganizeError::CleanupFailed {
                path: PathBuf::from("/w/Hips Workout"),
                source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            }),
        });

        let lines = problem_lines(&report);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("/w/Arms Workout/curl.mp4: "));
        assert!(lines[1].contains("/w/Leg Workout"));
        assert!(lines[2].starts_with("/w/Hips Workout: "));
    }

    #[test]
    fn test_display_name_keeps_short_names() {
        assert_eq!(display_name("curl.mp4"), "curl.mp4");
        let exact = "a".repeat(MAX_DISPLAY_NAME);
        assert_eq!(display_name(&exact), exact);
    }

    #[test]
    fn test_display_name_truncates_long_names() {
        let long = format!("{}.mp4", "x".repeat(70));
        let shown = display_name(&long);
        assert_eq!(shown, format!("{}...", "x".repeat(60)));
    }

    #[test]
    fn test_display_name_counts_characters_not_bytes() {
        let long = "é".repeat(61);
        let shown = display_name(&long);
        assert_eq!(shown, format!("{}...", "é".repeat(60)));
    }
}
