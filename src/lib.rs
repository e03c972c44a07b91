//! foldersort - sort a folder's files into category subfolders
//!
//! This library scans the top level of a directory, classifies each file by
//! extension, builds a collision-free move plan, and either prints that plan
//! (simulation) or executes it.

pub mod cli;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod planner;
pub mod report;
pub mod scanner;

pub use file_category::{Category, FileMapper};
pub use file_organizer::{ExecutionReport, FileOrganizer, OrganizeError};
pub use planner::{Plan, PlannedMove, build_plan};
pub use scanner::{DirectorySnapshot, FileEntry, ScanError, scan_directory};

pub use cli::{OrganizeCommand, RunOutcome, run_cli};
