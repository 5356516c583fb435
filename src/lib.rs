//! workout-sorter - sort workout videos by gender marker
//!
//! This library classifies workout videos by the gender markers in their file
//! names, moves them from per-category folders into `Male Workout/<category>`
//! or `Female Workout/<category>`, removes emptied category folders and
//! verifies the resulting tree.

pub mod classify;
pub mod cli;
pub mod config;
pub mod organizer;
pub mod output;
pub mod report;
pub mod verify;

pub use classify::{Classification, Gender, classify};
pub use config::{CompiledConfig, ConfigError, SorterConfig};
pub use organizer::{OrganizeError, OrganizeEvent, Organizer};
pub use report::{RunReport, RunStatistics};
pub use verify::{VerificationReport, Verifier};

pub use cli::{OrganizeCommand, RunStatus, run_cli};
