//! Filename-based gender classification for workout videos.
//!
//! A video is sorted by looking for explicit gender markers in its file name.
//! Female markers are checked first, so a name carrying both markers is female.
//! Names without any marker are `Unspecified` and end up in the male tree.
//!
//! # Examples
//!
//! ```
//! use workout_sorter::classify::{Classification, Gender, classify};
//!
//! assert_eq!(classify("Curl-Female.mp4"), Classification::Female);
//! assert_eq!(classify("curl (male).mp4"), Classification::Male);
//! assert_eq!(classify("curl.mp4"), Classification::Unspecified);
//! assert_eq!(classify("curl.mp4").gender(), Gender::Male);
//! ```

use std::fmt;

const FEMALE_MARKERS: [&str; 2] = ["(female)", "-female"];
const MALE_MARKERS: [&str; 2] = ["(male)", "-male"];

/// One of the two destination trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Both genders, in the order their roots are prepared and verified.
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of matching a file name against the gender markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Name contains `(female)` or `-female`.
    Female,
    /// Name contains `(male)` or `-male` and no female marker.
    Male,
    /// No marker at all. Sorted as male but counted on its own.
    Unspecified,
}

impl Classification {
    /// Returns the gender tree this classification is moved into.
    pub fn gender(&self) -> Gender {
        match self {
            Classification::Female => Gender::Female,
            Classification::Male | Classification::Unspecified => Gender::Male,
        }
    }

    /// Returns the label shown next to each processed file.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Female => "FEMALE",
            Classification::Male => "MALE",
            Classification::Unspecified => "UNSPECIFIED (→ Male)",
        }
    }
}

/// Classifies a file name. Matching is case-insensitive and the first rule wins.
pub fn classify(file_name: &str) -> Classification {
    let name = file_name.to_lowercase();

    if FEMALE_MARKERS.iter().any(|marker| name.contains(marker)) {
        Classification::Female
    } else if MALE_MARKERS.iter().any(|marker| name.contains(marker)) {
        Classification::Male
    } else {
        Classification::Unspecified
    }
}
