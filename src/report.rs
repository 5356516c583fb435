//! Records produced by an organizer run.

use crate::classify::Classification;
use crate::organizer::OrganizeError;
use std::path::PathBuf;

/// Counters for a single run. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Video files found in the category source folders.
    pub total_files: usize,
    /// Files carrying an explicit male marker.
    pub male_files: usize,
    /// Files carrying a female marker.
    pub female_files: usize,
    /// Files without any marker (sorted as male).
    pub unspecified_files: usize,
    /// Files actually moved.
    pub moved_files: usize,
    /// Failed moves plus unreadable category folders.
    pub errors: usize,
    /// Source folders removed during cleanup.
    pub empty_dirs_removed: usize,
}

impl RunStatistics {
    /// Counts a classified file. Called before the move is attempted.
    pub fn record_classification(&mut self, classification: Classification) {
        self.total_files += 1;
        match classification {
            Classification::Female => self.female_files += 1,
            Classification::Male => self.male_files += 1,
            Classification::Unspecified => self.unspecified_files += 1,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// What happened to a single video file.
#[derive(Debug)]
pub enum MoveStatus {
    Moved,
    /// Dry run: the file would have been moved.
    Planned,
    Failed(OrganizeError),
}

/// A single processed video file.
#[derive(Debug)]
pub struct MoveOutcome {
    pub category: String,
    pub file_name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub classification: Classification,
    pub status: MoveStatus,
}

impl MoveOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, MoveStatus::Failed(_))
    }
}

/// What happened to a category source folder during cleanup.
#[derive(Debug)]
pub enum CleanupStatus {
    Removed,
    /// Folder still holds entries and was left alone.
    Retained {
        remaining: usize,
    },
    Failed(OrganizeError),
}

#[derive(Debug)]
pub struct CleanupOutcome {
    pub category: String,
    pub path: PathBuf,
    pub status: CleanupStatus,
}

/// Everything an organizer run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    pub stats: RunStatistics,
    pub moves: Vec<MoveOutcome>,
    pub cleanup: Vec<CleanupOutcome>,
    /// Folders or folder entries that could not be listed.
    pub scan_failures: Vec<OrganizeError>,
    /// The run stopped early on a stop request; cleanup was skipped.
    pub interrupted: bool,
    pub dry_run: bool,
}

impl RunReport {
    /// Records a folder or entry that could not be listed.
    pub fn record_scan_failure(&mut self, error: OrganizeError) {
        self.stats.errors += 1;
        self.scan_failures.push(error);
    }

    pub fn failed_moves(&self) -> impl Iterator<Item = &MoveOutcome> {
        self.moves.iter().filter(|outcome| outcome.is_failure())
    }
}
