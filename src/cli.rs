//! Command-line interface module for foldersort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Logging setup
//! - Orchestration of scan, plan and simulate or execute
//! - Mapping run results to a process exit status

use crate::file_organizer::{ExecutionEvent, FileOrganizer, MoveStatus};
use crate::output::OutputFormatter;
use crate::planner::build_plan;
use crate::report;
use crate::scanner::{ScanError, scan_directory};
use clap::{ArgAction, Parser};
use log::{LevelFilter, info};
use std::env;
use std::path::{Path, PathBuf};

/// Sort the files of a folder into Images, Documents, Videos, Audio,
/// Archives and Others subfolders.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The path to the folder to organize
    pub folder: PathBuf,

    /// Show what would happen without moving files
    #[arg(short, long)]
    pub simulate: bool,

    /// Exit with a failure status if any file could not be moved
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The command selected by the flags.
    pub fn organize_command(&self) -> OrganizeCommand {
        if self.simulate {
            OrganizeCommand::Simulate
        } else {
            OrganizeCommand::Organize
        }
    }
}

/// Represents a CLI command to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeCommand {
    /// Move files into their category folders.
    Organize,
    /// Print the plan without touching the filesystem.
    Simulate,
}

/// Counts describing how a run went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Files in the plan.
    pub planned: usize,
    /// Files actually moved; always 0 when simulating.
    pub moved: usize,
    /// Move attempts that failed.
    pub failed_moves: usize,
    /// Category folders that could not be created.
    pub failed_folders: usize,
}

impl RunOutcome {
    /// Whether the run should exit successfully.
    ///
    /// Per-file failures only count when `strict` is set; a category folder
    /// that could not be created always fails the run.
    pub fn is_success(&self, strict: bool) -> bool {
        self.failed_folders == 0 && !(strict && self.failed_moves > 0)
    }
}

/// Initializes the `log` backend at a level derived from `-v` occurrences.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .try_init()
        .ok();
}

/// Expands a leading `~` and canonicalizes the target path.
///
/// If the path cannot be canonicalized (typically because it does not
/// exist) the expanded path is returned unchanged and scanning reports it.
pub fn resolve_target(path: &Path) -> PathBuf {
    let expanded = expand_home(path);
    expanded.canonicalize().unwrap_or(expanded)
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match env::var_os("HOME").or_else(|| env::var_os("USERPROFILE")) {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}

/// Runs the CLI application with the given command and directory path.
///
/// # Errors
///
/// Only a target that is missing, not a directory, or unreadable is an
/// error. Problems with individual folders or files are printed and counted
/// in the returned [`RunOutcome`].
///
/// # Examples
///
/// ```no_run
/// use foldersort::cli::{run_cli, OrganizeCommand};
/// use std::path::Path;
///
/// match run_cli(OrganizeCommand::Simulate, Path::new("/path/to/directory")) {
///     Ok(outcome) => println!("{} file(s) planned", outcome.planned),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(command: OrganizeCommand, dir_path: &Path) -> Result<RunOutcome, ScanError> {
    let target = resolve_target(dir_path);

    // Validate before printing anything about the folder.
    let snapshot = scan_directory(&target)?;

    OutputFormatter::info(&format!("Folder: {}", target.display()));
    OutputFormatter::plain(&format!(
        "Scanned: {} eligible file(s)\n",
        snapshot.entries.len()
    ));

    let plan = build_plan(&snapshot);
    info!("Planned {} move(s) in {}", plan.total(), target.display());

    let mut outcome = RunOutcome {
        planned: plan.total(),
        ..RunOutcome::default()
    };

    let counts = match command {
        OrganizeCommand::Simulate => {
            OutputFormatter::section("SIMULATION MODE");
            OutputFormatter::plain(&report::format_simulation(&plan));
            report::planned_counts(&plan)
        }
        OrganizeCommand::Organize => {
            OutputFormatter::section("EXECUTING ORGANIZATION");

            let progress = OutputFormatter::create_progress_bar(plan.total() as u64);
            let execution = FileOrganizer::execute_with(&plan, &progress, |event| {
                progress.suspend(|| match event {
                    ExecutionEvent::FolderFailed(e) => OutputFormatter::error(&e.to_string()),
                    ExecutionEvent::Finished(outcome) => {
                        let line = report::format_outcome(outcome);
                        if matches!(outcome.status, MoveStatus::Moved) {
                            OutputFormatter::success(&line);
                        } else {
                            OutputFormatter::error(&line);
                        }
                    }
                })
            });
            progress.finish_and_clear();

            OutputFormatter::plain(&report::format_execution_totals(&execution));

            outcome.moved = execution.moved_count();
            outcome.failed_moves = execution.failed_count();
            outcome.failed_folders = execution.folder_failures.len();

            if outcome.failed_folders > 0 || outcome.failed_moves > 0 {
                OutputFormatter::warning(
                    "Some files could not be organized. Please review errors above.",
                );
            }

            execution.moved_by_category()
        }
    };

    OutputFormatter::section("SUMMARY");
    OutputFormatter::plain(&report::format_summary(&counts));
    OutputFormatter::rule();

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simulate_flag() {
        let cli = Cli::try_parse_from(["foldersort", "/tmp/downloads", "-s"]).expect("parse");
        assert_eq!(cli.folder, PathBuf::from("/tmp/downloads"));
        assert_eq!(cli.organize_command(), OrganizeCommand::Simulate);
        assert!(!cli.strict);

        let cli = Cli::try_parse_from(["foldersort", "--simulate", "x"]).expect("parse");
        assert!(cli.simulate);
    }

    #[test]
    fn test_parse_defaults_to_organize() {
        let cli = Cli::try_parse_from(["foldersort", "x", "-vv", "--strict"]).expect("parse");
        assert_eq!(cli.organize_command(), OrganizeCommand::Organize);
        assert_eq!(cli.verbose, 2);
        assert!(cli.strict);
    }

    #[test]
    fn test_parse_requires_folder() {
        assert!(Cli::try_parse_from(["foldersort"]).is_err());
        assert!(Cli::try_parse_from(["foldersort", "-s"]).is_err());
    }

    #[test]
    fn test_run_outcome_exit_policy() {
        let clean = RunOutcome {
            planned: 2,
            moved: 2,
            ..RunOutcome::default()
        };
        assert!(clean.is_success(false));
        assert!(clean.is_success(true));

        let partial = RunOutcome {
            planned: 2,
            moved: 1,
            failed_moves: 1,
            failed_folders: 0,
        };
        assert!(partial.is_success(false));
        assert!(!partial.is_success(true));

        let blocked = RunOutcome {
            failed_folders: 1,
            ..RunOutcome::default()
        };
        assert!(!blocked.is_success(false));
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home(Path::new("/a/b")), PathBuf::from("/a/b"));
        assert_eq!(expand_home(Path::new("rel/~x")), PathBuf::from("rel/~x"));
    }

    #[test]
    fn test_expand_home_replaces_tilde() {
        if let Some(home) = env::var_os("HOME") {
            assert_eq!(
                expand_home(Path::new("~/Downloads")),
                PathBuf::from(home).join("Downloads")
            );
        }
    }
}
