/// Integration tests for workout-sorter
///
/// These tests build real category trees in a temporary directory and run the
/// organizer, the verifier and the CLI entry point against them.
///
/// Test categories:
/// 1. Classification and placement
/// 2. Cleanup of source folders
/// 3. Failures and idempotence
/// 4. Dry run and verification
/// 5. CLI with configuration files
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tempfile::TempDir;
use workout_sorter::classify::Classification;
use workout_sorter::cli::{OrganizeCommand, RunStatus, run_cli};
use workout_sorter::config::{CompiledConfig, SorterConfig};
use workout_sorter::organizer::{OrganizeError, Organizer};
use workout_sorter::report::{CleanupStatus, MoveStatus, RunReport};
use workout_sorter::verify::Verifier;
use workout_sorter::Gender;

// ============================================================================
// Test Utilities
// ============================================================================

/// A temporary workout directory with helpers to lay out category folders.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file (and its parent folders) at a path relative to the base.
    fn create_file(&self, rel_path: &str, content: &str) {
        let file_path = self.path().join(rel_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        let mut file = File::create(&file_path).expect("Failed to create file");
        file.write_all(content.as_bytes())
            .expect("Failed to write file content");
    }

    fn create_dir(&self, rel_path: &str) {
        fs::create_dir_all(self.path().join(rel_path)).expect("Failed to create directory");
    }

    fn config(&self, categories: &[&str]) -> CompiledConfig {
        SorterConfig {
            categories: categories.iter().map(|c| c.to_string()).collect(),
            ..SorterConfig::default()
        }
        .with_base_dir(self.path())
        .compile()
        .expect("valid config")
    }

    fn organize(&self, categories: &[&str]) -> RunReport {
        Organizer::new(self.config(categories))
            .organize(|_| {})
            .expect("run completes")
    }

    /// Write a TOML config into the fixture and return its path.
    fn write_config(&self, categories: &[&str]) -> std::path::PathBuf {
        let list = categories
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(", ");
        let content = format!(
            "base_dir = '{}'\ncategories = [{}]\n",
            self.path().display(),
            list
        );
        let config_path = self.path().join("sorter.toml");
        fs::write(&config_path, content).expect("Failed to write config");
        config_path
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(
            path.exists() && path.is_file(),
            "File should exist: {}",
            path.display()
        );
    }

    fn assert_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "Path should not exist: {}", path.display());
    }

    fn assert_dir_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(
            path.exists() && path.is_dir(),
            "Directory should exist: {}",
            path.display()
        );
    }
}

// ============================================================================
// Classification and placement
// ============================================================================

#[test]
fn test_female_and_unspecified_example() {
    let fixture = TestFixture::new();
    fixture.create_file("Biceps Workout/curl-female.mp4", "f");
    fixture.create_file("Biceps Workout/curl.mp4", "u");

    let report = fixture.organize(&["Biceps Workout"]);

    fixture.assert_file_exists("Female Workout/Biceps Workout/curl-female.mp4");
    fixture.assert_file_exists("Male Workout/Biceps Workout/curl.mp4");
    fixture.assert_not_exists("Biceps Workout");
    assert_eq!(report.stats.female_files, 1);
    assert_eq!(report.stats.unspecified_files, 1);
    assert_eq!(report.stats.male_files, 0);
    assert_eq!(report.stats.moved_files, 2);
    assert_eq!(report.stats.empty_dirs_removed, 1);
}

#[test]
fn test_markers_are_case_insensitive_and_female_first() {
    let fixture = TestFixture::new();
    fixture.create_file("Leg Workout/Lunge (FEMALE).mp4", "");
    fixture.create_file("Leg Workout/Squat-Male.mp4", "");
    fixture.create_file("Leg Workout/pair-male-female.mp4", "");
    fixture.create_file("Leg Workout/female coach.mp4", "");

    let report = fixture.organize(&["Leg Workout"]);

    fixture.assert_file_exists("Female Workout/Leg Workout/Lunge (FEMALE).mp4");
    fixture.assert_file_exists("Female Workout/Leg Workout/pair-male-female.mp4");
    fixture.assert_file_exists("Male Workout/Leg Workout/Squat-Male.mp4");
    fixture.assert_file_exists("Male Workout/Leg Workout/female coach.mp4");
    assert_eq!(report.stats.total_files, 4);
    assert_eq!(report.stats.female_files, 2);
    assert_eq!(report.stats.male_files, 1);
    assert_eq!(report.stats.unspecified_files, 1);
}

#[test]
fn test_preserves_file_content() {
    let fixture = TestFixture::new();
    fixture.create_file("Neck Workout/roll-male.mp4", "frames");

    fixture.organize(&["Neck Workout"]);

    let moved = fixture.path().join("Male Workout/Neck Workout/roll-male.mp4");
    assert_eq!(fs::read_to_string(moved).unwrap(), "frames");
}

#[test]
fn test_destination_tree_created_for_every_category() {
    let fixture = TestFixture::new();
    let config = SorterConfig::default()
        .with_base_dir(fixture.path())
        .compile()
        .unwrap();

    let report = Organizer::new(config.clone())
        .organize(|_| {})
        .expect("run completes");

    assert_eq!(report.stats.total_files, 0);
    for category in config.categories() {
        fixture.assert_dir_exists(&format!("Male Workout/{}", category));
        fixture.assert_dir_exists(&format!("Female Workout/{}", category));
    }
    assert!(report.cleanup.is_empty());
}

#[test]
fn test_only_top_level_videos_are_moved() {
    let fixture = TestFixture::new();
    fixture.create_file("Arms Workout/curl.mp4", "");
    fixture.create_file("Arms Workout/extra/nested-female.mp4", "");
    fixture.create_file("Arms Workout/curl.mov", "");

    let report = fixture.organize(&["Arms Workout"]);

    assert_eq!(report.stats.total_files, 1);
    fixture.assert_file_exists("Arms Workout/extra/nested-female.mp4");
    fixture.assert_file_exists("Arms Workout/curl.mov");
    assert!(matches!(
        report.cleanup[0].status,
        CleanupStatus::Retained { remaining: 2 }
    ));
}

// ============================================================================
// Cleanup
// ============================================================================

#[test]
fn test_cleanup_removes_empty_and_keeps_non_video_folders() {
    let fixture = TestFixture::new();
    fixture.create_file("Back Workout/row-male.mp4", "");
    fixture.create_file("Chest Workout/press.mp4", "");
    fixture.create_file("Chest Workout/notes.txt", "");
    fixture.create_file("Chest Workout/thumb.jpg", "");
    fixture.create_dir("Hips Workout");

    let report = fixture.organize(&["Back Workout", "Chest Workout", "Hips Workout"]);

    fixture.assert_not_exists("Back Workout");
    fixture.assert_not_exists("Hips Workout");
    fixture.assert_dir_exists("Chest Workout");
    assert_eq!(report.stats.empty_dirs_removed, 2);

    let chest = report
        .cleanup
        .iter()
        .find(|outcome| outcome.category == "Chest Workout")
        .expect("chest folder reported");
    assert!(matches!(chest.status, CleanupStatus::Retained { remaining: 2 }));
}

#[test]
fn test_cleanup_failure_is_reported_and_run_completes() {
    let fixture = TestFixture::new();
    fixture.create_file("Arms Workout", "not a folder");
    fixture.create_file("Leg Workout/squat.mp4", "");

    let report = fixture.organize(&["Arms Workout", "Leg Workout"]);

    assert_eq!(report.stats.moved_files, 1);
    assert_eq!(report.stats.empty_dirs_removed, 1);
    assert_eq!(report.cleanup.len(), 2);

    let arms = &report.cleanup[0];
    assert_eq!(arms.category, "Arms Workout");
    assert_eq!(arms.path, fixture.path().join("Arms Workout"));
    assert!(matches!(
        &arms.status,
        CleanupStatus::Failed(OrganizeError::CleanupFailed { path, .. }) if path == &arms.path
    ));
    assert!(fixture.path().join("Arms Workout").is_file());
    fixture.assert_not_exists("Leg Workout");
}

#[test]
fn test_missing_category_folders_are_skipped() {
    let fixture = TestFixture::new();
    fixture.create_file("Cardio Workout/run.mp4", "");

    let report = fixture.organize(&["Calves Workout", "Cardio Workout"]);

    assert_eq!(report.stats.total_files, 1);
    assert_eq!(report.cleanup.len(), 1);
    assert_eq!(report.cleanup[0].category, "Cardio Workout");
}

#[cfg(unix)]
#[test]
fn test_symlinked_video_is_moved_as_a_link() {
    let fixture = TestFixture::new();
    fixture.create_file("library/curl-female.mp4", "video");
    fixture.create_dir("Arms Workout");
    std::os::unix::fs::symlink(
        fixture.path().join("library/curl-female.mp4"),
        fixture.path().join("Arms Workout/curl-female.mp4"),
    )
    .unwrap();

    let report = fixture.organize(&["Arms Workout"]);

    assert_eq!(report.stats.total_files, 1);
    assert_eq!(report.stats.female_files, 1);
    assert_eq!(report.stats.moved_files, 1);
    assert_eq!(report.stats.empty_dirs_removed, 1);
    fixture.assert_not_exists("Arms Workout");

    let moved = fixture.path().join("Female Workout/Arms Workout/curl-female.mp4");
    assert!(fs::symlink_metadata(&moved).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&moved).unwrap(), "video");
    fixture.assert_file_exists("library/curl-female.mp4");
}

// ============================================================================
// Failures and idempotence
// ============================================================================

#[test]
fn test_collision_is_counted_and_run_continues() {
    let fixture = TestFixture::new();
    fixture.create_file("Squat Workout/a-female.mp4", "new");
    fixture.create_file("Squat Workout/b-female.mp4", "b");
    fixture.create_file("Female Workout/Squat Workout/a-female.mp4", "old");

    let report = fixture.organize(&["Squat Workout"]);

    assert_eq!(report.stats.errors, 1);
    assert_eq!(report.stats.moved_files, 1);
    assert_eq!(report.stats.female_files, 2);
    fixture.assert_file_exists("Squat Workout/a-female.mp4");
    fixture.assert_file_exists("Female Workout/Squat Workout/b-female.mp4");
    assert_eq!(
        fs::read_to_string(fixture.path().join("Female Workout/Squat Workout/a-female.mp4"))
            .unwrap(),
        "old"
    );

    let failed: Vec<_> = report.failed_moves().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].file_name, "a-female.mp4");
    assert_eq!(
        failed[0].source,
        fixture.path().join("Squat Workout/a-female.mp4")
    );
    assert!(matches!(
        report.cleanup[0].status,
        CleanupStatus::Retained { remaining: 1 }
    ));
}

#[test]
fn test_second_run_is_a_no_op() {
    let fixture = TestFixture::new();
    fixture.create_file("Waist Workout/twist-female.mp4", "");
    fixture.create_file("Waist Workout/twist.mp4", "");
    fixture.create_file("Random Workout/misc.mp4", "");

    let categories = ["Waist Workout", "Random Workout"];
    let first = fixture.organize(&categories);
    let second = fixture.organize(&categories);

    assert_eq!(first.stats.moved_files, 3);
    assert_eq!(second.stats.total_files, 0);
    assert_eq!(second.stats.moved_files, 0);
    assert_eq!(second.stats.errors, 0);
    assert!(second.cleanup.is_empty());
}

#[test]
fn test_missing_base_directory_aborts() {
    let fixture = TestFixture::new();
    let missing = fixture.path().join("nope");
    let config = SorterConfig::default()
        .with_base_dir(&missing)
        .compile()
        .unwrap();

    let result = Organizer::new(config).organize(|_| {});

    assert!(result.is_err());
    assert!(!missing.exists());
}

// ============================================================================
// Dry run and verification
// ============================================================================

#[test]
fn test_dry_run_leaves_tree_untouched() {
    let fixture = TestFixture::new();
    fixture.create_file("Triceps Workout/dip-male.mp4", "");
    fixture.create_file("Triceps Workout/kickback-female.mp4", "");

    let report = Organizer::new(fixture.config(&["Triceps Workout"]))
        .dry_run(true)
        .organize(|_| {})
        .expect("dry run completes");

    assert!(report.dry_run);
    assert_eq!(report.stats.total_files, 2);
    assert_eq!(report.stats.moved_files, 0);
    assert!(report
        .moves
        .iter()
        .all(|outcome| matches!(outcome.status, MoveStatus::Planned)));
    let female = report
        .moves
        .iter()
        .find(|outcome| outcome.classification == Classification::Female)
        .unwrap();
    assert_eq!(
        female.destination,
        fixture
            .path()
            .join("Female Workout/Triceps Workout/kickback-female.mp4")
    );
    fixture.assert_file_exists("Triceps Workout/dip-male.mp4");
    fixture.assert_not_exists("Male Workout");
    fixture.assert_not_exists("Female Workout");
}

#[test]
fn test_verify_after_organize() {
    let fixture = TestFixture::new();
    fixture.create_file("Hamstrings Workout/curl-female.mp4", "");
    fixture.create_file("Hamstrings Workout/curl(male).mp4", "");
    fixture.create_file("Jumping Workout/jacks.mp4", "");

    let config = fixture.config(&["Hamstrings Workout", "Jumping Workout"]);
    Organizer::new(config.clone())
        .organize(|_| {})
        .expect("run completes");
    let report = Verifier::new(&config).verify();

    let male = report.root(Gender::Male).unwrap();
    let female = report.root(Gender::Female).unwrap();
    assert_eq!(male.categories.len(), 2);
    assert_eq!(male.total_videos(), 2);
    assert_eq!(female.categories.len(), 2);
    assert_eq!(female.total_videos(), 1);
}

// ============================================================================
// CLI with configuration files
// ============================================================================

#[test]
fn test_run_cli_with_config_file() {
    let fixture = TestFixture::new();
    fixture.create_file("Dumbbell Workout/row-female.mp4", "");
    fixture.create_file("Dumbbell Workout/press.mp4", "");
    let config_path = fixture.write_config(&["Dumbbell Workout"]);

    let status = run_cli(
        OrganizeCommand::Organize {
            dry_run: false,
            verify: true,
        },
        None,
        Some(config_path.as_path()),
        Arc::new(AtomicBool::new(false)),
    )
    .expect("cli run succeeds");

    assert_eq!(status, RunStatus::Completed);
    fixture.assert_file_exists("Female Workout/Dumbbell Workout/row-female.mp4");
    fixture.assert_file_exists("Male Workout/Dumbbell Workout/press.mp4");
    fixture.assert_not_exists("Dumbbell Workout");
    fixture.assert_not_exists("Male Workout/Arms Workout");
}

#[test]
fn test_run_cli_base_dir_overrides_config() {
    let fixture = TestFixture::new();
    let other = TestFixture::new();
    other.create_file("Body Workout/burpee.mp4", "");
    let config_path = fixture.write_config(&["Body Workout"]);

    run_cli(
        OrganizeCommand::Organize {
            dry_run: false,
            verify: false,
        },
        Some(other.path()),
        Some(config_path.as_path()),
        Arc::new(AtomicBool::new(false)),
    )
    .expect("cli run succeeds");

    other.assert_file_exists("Male Workout/Body Workout/burpee.mp4");
    fixture.assert_not_exists("Male Workout");
}

#[test]
fn test_run_cli_interrupted_before_start() {
    let fixture = TestFixture::new();
    fixture.create_file("Forearms Workout/wrist.mp4", "");
    let config_path = fixture.write_config(&["Forearms Workout"]);

    let status = run_cli(
        OrganizeCommand::Organize {
            dry_run: false,
            verify: true,
        },
        None,
        Some(config_path.as_path()),
        Arc::new(AtomicBool::new(true)),
    )
    .expect("interrupt is not an error");

    assert_eq!(status, RunStatus::Interrupted);
    fixture.assert_file_exists("Forearms Workout/wrist.mp4");
}

#[test]
fn test_run_cli_invalid_config_file() {
    let fixture = TestFixture::new();
    let config_path = fixture.path().join("broken.toml");
    fs::write(&config_path, "categories = [\"a/b\"]").unwrap();

    let result = run_cli(
        OrganizeCommand::Verify,
        Some(fixture.path()),
        Some(config_path.as_path()),
        Arc::new(AtomicBool::new(false)),
    );

    assert!(result.is_err());
}
