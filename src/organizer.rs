//! Sorting of workout videos into the gender trees.
//!
//! The organizer prepares `<base>/<root>/<category>` for both roots, moves every
//! matching video out of `<base>/<category>` according to its classification and
//! finally removes category folders that ended up empty. Failures on a single
//! file or folder are recorded in the [`RunReport`] and never stop the run.

use crate::classify::{Gender, classify};
use crate::config::CompiledConfig;
use crate::report::{
    CleanupOutcome, CleanupStatus, MoveOutcome, MoveStatus, RunReport, RunStatistics,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Errors that can occur while organizing.
#[derive(Debug)]
pub enum OrganizeError {
    /// The base directory is missing or not a directory.
    InvalidBasePath { path: PathBuf, source: io::Error },
    /// Failed to create a gender root or category directory.
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
    /// A category folder, or an entry in it, could not be read.
    ReadDirFailed { path: PathBuf, source: io::Error },
    /// A file with the same name is already at the destination.
    DestinationExists {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Failed to move a file into its destination directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: io::Error,
    },
    /// Failed to inspect or remove a category folder during cleanup.
    CleanupFailed { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid base path {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::ReadDirFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::DestinationExists {
                source,
                destination,
            } => {
                write!(
                    f,
                    "Cannot move {}: {} already exists",
                    source.display(),
                    destination.display()
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::CleanupFailed { path, source } => {
                write!(f, "Could not remove {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBasePath { source, .. }
            | Self::DirectoryCreationFailed { source, .. }
            | Self::ReadDirFailed { source, .. }
            | Self::CleanupFailed { source, .. } => Some(source),
            Self::FileMoveFailure { source_error, .. } => Some(source_error),
            Self::DestinationExists { .. } => None,
        }
    }
}

/// Result type for organizer operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Progress notifications emitted while a run is in flight.
#[derive(Debug)]
pub enum OrganizeEvent<'a> {
    /// The destination tree exists for every listed category.
    DirectoriesPrepared { categories: &'a [String] },
    /// A category folder exists and is about to be processed.
    CategoryStarted { category: &'a str, files: usize },
    FileProcessed(&'a MoveOutcome),
    CategoryFinished { category: &'a str },
    /// A category folder, or one of its entries, could not be read.
    ScanFailed { category: &'a str, error: &'a OrganizeError },
    DirectoryCleaned(&'a CleanupOutcome),
}

/// Contents of one category source folder.
#[derive(Debug, Default)]
pub struct CategoryScan {
    /// Matching videos, sorted by path.
    pub videos: Vec<PathBuf>,
    /// Entries that could not be read while listing the folder.
    pub unreadable: Vec<OrganizeError>,
}

/// Moves workout videos from category folders into the gender trees.
pub struct Organizer {
    config: CompiledConfig,
    dry_run: bool,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl Organizer {
    pub fn new(config: CompiledConfig) -> Self {
        Self {
            config,
            dry_run: false,
            stop_flag: None,
        }
    }

    /// Only classify and report; never touch the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Flag checked before every file. Once set, the run stops and skips cleanup.
    pub fn with_stop_flag(mut self, stop_flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(stop_flag);
        self
    }

    fn stop_requested(&self) -> bool {
        self.stop_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Fails unless the base directory exists and is a directory.
    pub fn validate_base_path(&self) -> OrganizeResult<()> {
        let base = self.config.base_dir();
        let metadata = fs::metadata(base).map_err(|e| OrganizeError::InvalidBasePath {
            path: base.to_path_buf(),
            source: e,
        })?;

        if !metadata.is_dir() {
            return Err(OrganizeError::InvalidBasePath {
                path: base.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            });
        }
        Ok(())
    }

    /// Creates both gender roots and a subdirectory per category under each.
    ///
    /// Existing directories are left as they are, so this is safe to repeat.
    pub fn prepare_directories(&self) -> OrganizeResult<()> {
        self.validate_base_path()?;

        for gender in Gender::ALL {
            create_dir(&self.config.root_dir(gender))?;
        }
        for category in self.config.categories() {
            for gender in Gender::ALL {
                create_dir(&self.config.destination_dir(gender, category))?;
            }
        }
        Ok(())
    }

    /// Lists the videos directly inside a category's source folder, sorted by name.
    ///
    /// Returns `Ok(None)` when the folder does not exist. Subdirectories and files
    /// not matching the video pattern are ignored. Symlinks are listed unless they
    /// point at a directory; moving one moves the link itself.
    pub fn scan_category(&self, category: &str) -> OrganizeResult<Option<CategoryScan>> {
        let source_dir = self.config.source_dir(category);
        if !source_dir.is_dir() {
            return Ok(None);
        }

        let entries = fs::read_dir(&source_dir).map_err(|e| OrganizeError::ReadDirFailed {
            path: source_dir.clone(),
            source: e,
        })?;

        let mut scan = CategoryScan::default();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if !path.is_dir() && self.config.is_video(&entry.file_name().to_string_lossy())
                    {
                        scan.videos.push(path);
                    }
                }
                Err(e) => scan.unreadable.push(OrganizeError::ReadDirFailed {
                    path: source_dir.clone(),
                    source: e,
                }),
            }
        }
        scan.videos.sort();

        Ok(Some(scan))
    }

    /// Runs the whole pass: prepare, move every video, clean up emptied folders.
    ///
    /// `on_event` is called as the run progresses. Per-file and per-folder
    /// failures are recorded in the returned report; only a failure to prepare
    /// the destination tree aborts the run with an error.
    pub fn organize<F>(&self, mut on_event: F) -> OrganizeResult<RunReport>
    where
        F: FnMut(OrganizeEvent<'_>),
    {
        if self.dry_run {
            self.validate_base_path()?;
        } else {
            self.prepare_directories()?;
            on_event(OrganizeEvent::DirectoriesPrepared {
                categories: self.config.categories(),
            });
        }

        let mut report = RunReport {
            dry_run: self.dry_run,
            ..Default::default()
        };

        'categories: for category in self.config.categories() {
            if self.stop_requested() {
                report.interrupted = true;
                break;
            }

            let scan = match self.scan_category(category) {
                Ok(Some(scan)) => scan,
                Ok(None) => continue,
                Err(e) => {
                    on_event(OrganizeEvent::ScanFailed {
                        category,
                        error: &e,
                    });
                    report.record_scan_failure(e);
                    continue;
                }
            };
            for e in scan.unreadable {
                on_event(OrganizeEvent::ScanFailed {
                    category,
                    error: &e,
                });
                report.record_scan_failure(e);
            }
            let videos = scan.videos;

            on_event(OrganizeEvent::CategoryStarted {
                category,
                files: videos.len(),
            });

            for video in &videos {
                if self.stop_requested() {
                    report.interrupted = true;
                    on_event(OrganizeEvent::CategoryFinished { category });
                    break 'categories;
                }

                let outcome = self.process_file(category, video, &mut report.stats);
                on_event(OrganizeEvent::FileProcessed(&outcome));
                report.moves.push(outcome);
            }

            on_event(OrganizeEvent::CategoryFinished { category });
        }

        if report.interrupted || self.dry_run {
            return Ok(report);
        }

        for category in self.config.categories() {
            if let Some(outcome) = self.cleanup_category(category, &mut report.stats) {
                on_event(OrganizeEvent::DirectoryCleaned(&outcome));
                report.cleanup.push(outcome);
            }
        }

        Ok(report)
    }

    /// Classifies one video and moves it (unless dry-running).
    fn process_file(&self, category: &str, path: &Path, stats: &mut RunStatistics) -> MoveOutcome {
        let file_name = path.file_name().unwrap_or_default();
        let display_name = file_name.to_string_lossy().into_owned();
        let classification = classify(&display_name);
        stats.record_classification(classification);

        let destination_dir = self.config.destination_dir(classification.gender(), category);
        let destination = destination_dir.join(file_name);

        let status = if self.dry_run {
            MoveStatus::Planned
        } else {
            match Self::move_video(path, &destination_dir) {
                Ok(_) => {
                    stats.moved_files += 1;
                    MoveStatus::Moved
                }
                Err(e) => {
                    stats.errors += 1;
                    MoveStatus::Failed(e)
                }
            }
        };

        MoveOutcome {
            category: category.to_string(),
            file_name: display_name,
            source: path.to_path_buf(),
            destination,
            classification,
            status,
        }
    }

    /// Moves a file into `destination_dir`, keeping its name.
    ///
    /// Refuses to overwrite an existing entry. Falls back to copy and remove
    /// when the destination is on another filesystem. On failure the file is
    /// left at its source path.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use workout_sorter::organizer::Organizer;
    /// use std::path::Path;
    ///
    /// let result = Organizer::move_video(
    ///     Path::new("/videos/Leg Workout/lunge-female.mp4"),
    ///     Path::new("/videos/Female Workout/Leg Workout"),
    /// );
    /// match result {
    ///     Ok(dest) => println!("Moved to {}", dest.display()),
    ///     Err(e) => eprintln!("Move failed: {}", e),
    /// }
    /// ```
    pub fn move_video(file_path: &Path, destination_dir: &Path) -> OrganizeResult<PathBuf> {
        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: destination_dir.to_path_buf(),
                source_error: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;
        let destination = destination_dir.join(file_name);

        if fs::symlink_metadata(&destination).is_ok() {
            return Err(OrganizeError::DestinationExists {
                source: file_path.to_path_buf(),
                destination,
            });
        }

        match fs::rename(file_path, &destination) {
            Ok(()) => Ok(destination),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                copy_then_remove(file_path, &destination)?;
                Ok(destination)
            }
            Err(e) => Err(OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination,
                source_error: e,
            }),
        }
    }

    /// Removes a category source folder if it is empty.
    ///
    /// Returns `None` when the folder does not exist.
    pub fn cleanup_category(
        &self,
        category: &str,
        stats: &mut RunStatistics,
    ) -> Option<CleanupOutcome> {
        let path = self.config.source_dir(category);
        if !path.exists() {
            return None;
        }

        let status = match fs::read_dir(&path) {
            Ok(entries) => match entries.count() {
                0 => match fs::remove_dir(&path) {
                    Ok(()) => {
                        stats.empty_dirs_removed += 1;
                        CleanupStatus::Removed
                    }
                    Err(e) => CleanupStatus::Failed(OrganizeError::CleanupFailed {
                        path: path.clone(),
                        source: e,
                    }),
                },
                remaining => CleanupStatus::Retained { remaining },
            },
            Err(e) => CleanupStatus::Failed(OrganizeError::CleanupFailed {
                path: path.clone(),
                source: e,
            }),
        };

        Some(CleanupOutcome {
            category: category.to_string(),
            path,
            status,
        })
    }
}

fn create_dir(path: &Path) -> OrganizeResult<()> {
    fs::create_dir_all(path).map_err(|e| OrganizeError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Cross-filesystem move. A partial copy is removed again on failure.
fn copy_then_remove(source: &Path, destination: &Path) -> OrganizeResult<()> {
    let failure = |e: io::Error| OrganizeError::FileMoveFailure {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source_error: e,
    };

    if let Err(e) = fs::copy(source, destination) {
        let _ = fs::remove_file(destination);
        return Err(failure(e));
    }
    if let Err(e) = fs::remove_file(source) {
        let _ = fs::remove_file(destination);
        return Err(failure(e));
    }
    Ok(())
}
