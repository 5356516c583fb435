//! Sorter configuration.
//!
//! The base directory, the names of the two gender roots, the list of workout
//! categories and the video file pattern are all read from an optional TOML
//! file. Every key falls back to a default, so an empty file (or no file at
//! all) reproduces the stock layout.
//!
//! # Configuration File Format
//!
//! ```toml
//! base_dir = "/home/me/WorkOuts"
//! male_root = "Male Workout"
//! female_root = "Female Workout"
//! video_pattern = "*.mp4"
//! categories = ["Arms Workout", "Back Workout"]
//! ```

use crate::classify::Gender;
use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".workout-sorter.toml";

/// Categories sorted when no configuration overrides them, in processing order.
pub const DEFAULT_CATEGORIES: [&str; 21] = [
    "3D Fitness Reels Format",
    "Arms Workout",
    "Back Workout",
    "Biceps Workout",
    "Body Workout",
    "Calves Workout",
    "Cardio Workout",
    "Chest Workout",
    "Dumbbell Workout",
    "Forearms Workout",
    "Hamstrings Workout",
    "Hips Workout",
    "Jumping Workout",
    "Leg Workout",
    "Neck Workout",
    "Quadriceps Workout",
    "Random Workout",
    "Shoulders Workout",
    "Squat Workout",
    "Triceps Workout",
    "Waist Workout",
];

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// The video pattern is not a valid glob.
    InvalidPattern {
        pattern: String,
        reason: String,
    },
    /// A category name cannot be used as a single directory name.
    InvalidCategory {
        name: String,
        reason: String,
    },
    /// The same category is listed twice.
    DuplicateCategory(String),
    /// A gender root name is unusable.
    InvalidRoot {
        name: String,
        reason: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid video pattern '{}': {}", pattern, reason)
            }
            ConfigError::InvalidCategory { name, reason } => {
                write!(f, "Invalid category '{}': {}", name, reason)
            }
            ConfigError::DuplicateCategory(name) => {
                write!(f, "Category '{}' is listed more than once", name)
            }
            ConfigError::InvalidRoot { name, reason } => {
                write!(f, "Invalid root directory '{}': {}", name, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Raw configuration as deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SorterConfig {
    /// Directory holding the category folders and the two gender roots.
    pub base_dir: PathBuf,
    /// Name of the male destination root inside `base_dir`.
    pub male_root: String,
    /// Name of the female destination root inside `base_dir`.
    pub female_root: String,
    /// Glob matched against file names, case-insensitively.
    pub video_pattern: String,
    /// Category folder names, processed in this order.
    pub categories: Vec<String>,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            male_root: "Male Workout".to_string(),
            female_root: "Female Workout".to_string(),
            video_pattern: "*.mp4".to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl SorterConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.workout-sorter.toml` in the current directory
    /// 3. Look for `~/.config/workout-sorter/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but cannot be read,
    /// or if any discovered file fails to parse.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("workout-sorter")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Replaces the base directory, e.g. with one given on the command line.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Validate the configuration and compile the video pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern does not compile, a root or category name
    /// is not a plain directory name, the roots collide, or a category repeats.
    pub fn compile(self) -> Result<CompiledConfig, ConfigError> {
        CompiledConfig::new(self)
    }
}

/// Validated configuration, ready for the organizer and verifier.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    base_dir: PathBuf,
    male_root: String,
    female_root: String,
    categories: Vec<String>,
    video_pattern: Pattern,
}

impl CompiledConfig {
    fn new(config: SorterConfig) -> Result<Self, ConfigError> {
        let video_pattern =
            Pattern::new(&config.video_pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: config.video_pattern.clone(),
                reason: e.to_string(),
            })?;

        for root in [&config.male_root, &config.female_root] {
            if let Some(reason) = invalid_dir_name(root) {
                return Err(ConfigError::InvalidRoot {
                    name: root.clone(),
                    reason: reason.to_string(),
                });
            }
        }
        if config.male_root == config.female_root {
            return Err(ConfigError::InvalidRoot {
                name: config.male_root.clone(),
                reason: "male and female roots must differ".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for category in &config.categories {
            if let Some(reason) = invalid_dir_name(category) {
                return Err(ConfigError::InvalidCategory {
                    name: category.clone(),
                    reason: reason.to_string(),
                });
            }
            if *category == config.male_root || *category == config.female_root {
                return Err(ConfigError::InvalidCategory {
                    name: category.clone(),
                    reason: "collides with a gender root".to_string(),
                });
            }
            if !seen.insert(category.as_str()) {
                return Err(ConfigError::DuplicateCategory(category.clone()));
            }
        }

        Ok(Self {
            base_dir: config.base_dir,
            male_root: config.male_root,
            female_root: config.female_root,
            categories: config.categories,
            video_pattern,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Directory name of the given gender root.
    pub fn root_name(&self, gender: Gender) -> &str {
        match gender {
            Gender::Male => &self.male_root,
            Gender::Female => &self.female_root,
        }
    }

    /// `<base>/<root>`
    pub fn root_dir(&self, gender: Gender) -> PathBuf {
        self.base_dir.join(self.root_name(gender))
    }

    /// `<base>/<category>`
    pub fn source_dir(&self, category: &str) -> PathBuf {
        self.base_dir.join(category)
    }

    /// `<base>/<root>/<category>`
    pub fn destination_dir(&self, gender: Gender, category: &str) -> PathBuf {
        self.root_dir(gender).join(category)
    }

    /// Returns true if the file name matches the video pattern (case-insensitive).
    pub fn is_video(&self, file_name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.video_pattern.matches_with(file_name, options)
    }
}

/// Returns why `name` cannot be used as a single directory component, if it can't.
fn invalid_dir_name(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name refers to a relative directory")
    } else if name.contains('/') || name.contains('\\') {
        Some("name contains a path separator")
    } else {
        None
    }
}
