/// Plan execution: creating category folders and moving files into them.
///
/// Failures are contained. A category folder that cannot be created skips
/// that category's moves, and a file that cannot be moved is recorded and
/// skipped. Nothing already moved is rolled back.
use crate::file_category::Category;
use crate::planner::{Plan, PlannedMove};
use indicatif::ProgressBar;
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while executing a plan.
#[derive(Debug)]
pub enum OrganizeError {
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its category directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// The planned destination appeared after the plan was built.
    DestinationOccupied {
        source: PathBuf,
        destination: PathBuf,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
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
            Self::DestinationOccupied {
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
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryCreationFailed { source, .. } => Some(source),
            Self::FileMoveFailure { source_error, .. } => Some(source_error),
            Self::DestinationOccupied { .. } => None,
        }
    }
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// What happened to one planned move.
#[derive(Debug)]
pub enum MoveStatus {
    /// The file now lives at the planned destination.
    Moved,
    /// The move was attempted and failed.
    Failed(OrganizeError),
    /// The move was not attempted because its category folder is missing.
    Skipped,
}

/// A planned move paired with its result.
#[derive(Debug)]
pub struct MoveOutcome {
    pub planned: PlannedMove,
    pub status: MoveStatus,
}

/// Reported to the caller of [`FileOrganizer::execute_with`] as the run
/// progresses, in plan order.
#[derive(Debug)]
pub enum ExecutionEvent<'a> {
    /// A category folder could not be created; its moves follow as skipped.
    FolderFailed(&'a OrganizeError),
    /// One planned move has been handled.
    Finished(&'a MoveOutcome),
}

/// Everything that happened during one real run.
#[derive(Debug, Default)]
pub struct ExecutionReport {
    /// Per-move results, in plan order.
    pub outcomes: Vec<MoveOutcome>,
    /// Category folders that could not be created.
    pub folder_failures: Vec<OrganizeError>,
}

impl ExecutionReport {
    /// Number of files successfully moved.
    pub fn moved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, MoveStatus::Moved))
            .count()
    }

    /// Number of files left in place because of an error.
    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.moved_count()
    }

    /// Successfully moved files per category; categories with none are absent.
    pub fn moved_by_category(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for outcome in &self.outcomes {
            if matches!(outcome.status, MoveStatus::Moved) {
                *counts.entry(outcome.planned.category).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Number of move attempts that failed.
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, MoveStatus::Failed(_)))
            .count()
    }

    /// Returns true if any move attempt failed.
    pub fn has_move_failures(&self) -> bool {
        self.failed_count() > 0
    }
}

/// Executes plans against the filesystem.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Ensures the folder for `category` exists under `base_path`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use foldersort::file_category::Category;
    /// use foldersort::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let folder = FileOrganizer::ensure_category_dir(Path::new("/downloads"), Category::Images)
    ///     .expect("could not create folder");
    /// assert!(folder.ends_with("Images"));
    /// ```
    pub fn ensure_category_dir(base_path: &Path, category: Category) -> OrganizeResult<PathBuf> {
        let category_path = base_path.join(category.dir_name());

        if !category_path.is_dir() {
            fs::create_dir(&category_path).map_err(|e| OrganizeError::DirectoryCreationFailed {
                path: category_path.clone(),
                source: e,
            })?;
            debug!("Created {}", category_path.display());
        }

        Ok(category_path)
    }

    /// Moves one file to its planned destination without overwriting.
    ///
    /// Falls back to copy and delete when the destination folder is on
    /// another filesystem.
    pub fn move_file(planned: &PlannedMove) -> OrganizeResult<()> {
        let destination = planned.destination();

        // Only checked here: fs::rename would silently replace the target.
        // symlink_metadata so a dangling link still counts as taken.
        if fs::symlink_metadata(&destination).is_ok() {
            return Err(OrganizeError::DestinationOccupied {
                source: planned.source.clone(),
                destination,
            });
        }

        let result = match fs::rename(&planned.source, &destination) {
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                debug!(
                    "{} is on another device, copying instead",
                    destination.display()
                );
                copy_then_remove(&planned.source, &destination)
            }
            other => other,
        };

        result.map_err(|e| OrganizeError::FileMoveFailure {
            source: planned.source.clone(),
            destination: destination.clone(),
            source_error: e,
        })
    }

    /// Executes every move in `plan`, in order, ticking `progress` per file.
    ///
    /// Never fails as a whole; every problem is recorded in the returned
    /// report.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use foldersort::file_organizer::FileOrganizer;
    /// use foldersort::planner::build_plan;
    /// use foldersort::scanner::scan_directory;
    /// use indicatif::ProgressBar;
    /// use std::path::Path;
    ///
    /// let snapshot = scan_directory(Path::new("/downloads")).unwrap();
    /// let plan = build_plan(&snapshot);
    /// let report = FileOrganizer::execute(&plan, &ProgressBar::hidden());
    /// println!("moved {} file(s)", report.moved_count());
    /// ```
    pub fn execute(plan: &Plan, progress: &ProgressBar) -> ExecutionReport {
        Self::execute_with(plan, progress, |_| {})
    }

    /// Like [`FileOrganizer::execute`], calling `on_event` as each folder
    /// failure or move result happens so it can be shown live.
    pub fn execute_with(
        plan: &Plan,
        progress: &ProgressBar,
        mut on_event: impl FnMut(ExecutionEvent<'_>),
    ) -> ExecutionReport {
        let mut report = ExecutionReport::default();

        for (category, moves) in plan.categories() {
            let folder_ok = match Self::ensure_category_dir(plan.root(), category) {
                Ok(_) => true,
                Err(e) => {
                    debug!("{}", e);
                    on_event(ExecutionEvent::FolderFailed(&e));
                    report.folder_failures.push(e);
                    false
                }
            };

            for planned in moves {
                progress.set_message(planned.source_name());
                let status = if !folder_ok {
                    MoveStatus::Skipped
                } else {
                    match Self::move_file(planned) {
                        Ok(()) => MoveStatus::Moved,
                        Err(e) => {
                            debug!("{}", e);
                            MoveStatus::Failed(e)
                        }
                    }
                };
                let outcome = MoveOutcome {
                    planned: planned.clone(),
                    status,
                };
                on_event(ExecutionEvent::Finished(&outcome));
                report.outcomes.push(outcome);
                progress.inc(1);
            }
        }

        info!(
            "Moved {} of {} planned file(s)",
            report.moved_count(),
            plan.total()
        );

        report
    }
}

/// Copies `source` to `destination` and deletes `source`.
///
/// On failure nothing is left at `destination` and `source` is untouched.
fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    if let Err(e) = fs::copy(source, destination) {
        let _ = fs::remove_file(destination);
        return Err(e);
    }
    if let Err(e) = fs::remove_file(source) {
        let _ = fs::remove_file(destination);
        return Err(e);
    }
    Ok(())
}
