//! Read-only check of the sorted tree.
//!
//! Walks both gender roots and counts the videos in each category folder so a
//! run can be sanity-checked by eye. Nothing is created, moved or removed.

use crate::classify::Gender;
use crate::config::CompiledConfig;
use std::fs;
use std::path::PathBuf;

/// Video count for one category folder inside a gender root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub videos: usize,
}

/// Summary of one gender root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSummary {
    pub gender: Gender,
    pub path: PathBuf,
    /// False when the root directory does not exist (or is not a directory).
    pub exists: bool,
    /// Every subdirectory of the root, sorted by name.
    pub categories: Vec<CategoryCount>,
    /// Set when the root exists but could not be listed.
    pub read_error: Option<String>,
    /// Category folders or entries that could not be read and were left out of the counts.
    pub unreadable_entries: usize,
}

impl RootSummary {
    pub fn total_videos(&self) -> usize {
        self.categories.iter().map(|c| c.videos).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub roots: Vec<RootSummary>,
}

impl VerificationReport {
    pub fn root(&self, gender: Gender) -> Option<&RootSummary> {
        self.roots.iter().find(|root| root.gender == gender)
    }

    pub fn total_videos(&self) -> usize {
        self.roots.iter().map(RootSummary::total_videos).sum()
    }
}

pub struct Verifier<'a> {
    config: &'a CompiledConfig,
}

impl<'a> Verifier<'a> {
    pub fn new(config: &'a CompiledConfig) -> Self {
        Self { config }
    }

    /// Counts category folders and videos under both roots.
    ///
    /// Unreadable folders and entries are left out of the counts and tallied
    /// in `unreadable_entries`.
    pub fn verify(&self) -> VerificationReport {
        let roots = Gender::ALL
            .iter()
            .map(|&gender| self.summarize_root(gender))
            .collect();
        VerificationReport { roots }
    }

    fn summarize_root(&self, gender: Gender) -> RootSummary {
        let path = self.config.root_dir(gender);
        let mut summary = RootSummary {
            gender,
            path,
            exists: false,
            categories: Vec::new(),
            read_error: None,
            unreadable_entries: 0,
        };
        if !summary.path.is_dir() {
            return summary;
        }
        summary.exists = true;

        let entries = match fs::read_dir(&summary.path) {
            Ok(entries) => entries,
            Err(e) => {
                summary.read_error = Some(e.to_string());
                return summary;
            }
        };

        for entry in entries {
            let Ok(entry) = entry else {
                summary.unreadable_entries += 1;
                continue;
            };
            let category_dir = entry.path();
            if !category_dir.is_dir() {
                continue;
            }
            let videos = self.count_videos(category_dir, &mut summary.unreadable_entries);
            summary.categories.push(CategoryCount {
                name: entry.file_name().to_string_lossy().into_owned(),
                videos,
            });
        }
        summary.categories.sort_by(|a, b| a.name.cmp(&b.name));

        summary
    }

    fn count_videos(&self, dir: PathBuf, unreadable: &mut usize) -> usize {
        let Ok(entries) = fs::read_dir(dir) else {
            *unreadable += 1;
            return 0;
        };

        let mut videos = 0;
        for entry in entries {
            match entry {
                Ok(entry) => {
                    if !entry.path().is_dir()
                        && self.config.is_video(&entry.file_name().to_string_lossy())
                    {
                        videos += 1;
                    }
                }
                Err(_) => *unreadable += 1,
            }
        }
        videos
    }
}
