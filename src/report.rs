//! Plain-text rendering of plans and execution results.
//!
//! Everything here returns strings so the exact wording can be tested; the
//! `output` module decides how they reach the terminal. Per-category sections
//! list categories alphabetically by folder name.

use crate::file_category::Category;
use crate::file_organizer::{ExecutionReport, MoveOutcome, MoveStatus};
use crate::planner::{Plan, PlannedMove};
use std::collections::BTreeMap;
use std::fmt::Write;

fn file_word(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

fn alphabetical<T>(items: impl IntoIterator<Item = (Category, T)>) -> Vec<(Category, T)> {
    let mut items: Vec<_> = items.into_iter().collect();
    items.sort_by_key(|(category, _)| category.dir_name());
    items
}

/// Renders the simulation listing for a plan.
///
/// # Examples
///
/// ```
/// use foldersort::planner::build_plan;
/// use foldersort::report::format_simulation;
/// use foldersort::scanner::DirectorySnapshot;
///
/// let plan = build_plan(&DirectorySnapshot::new("/empty"));
/// assert_eq!(format_simulation(&plan), "No files would be moved.\n");
/// ```
pub fn format_simulation(plan: &Plan) -> String {
    let mut out = String::new();

    if plan.is_empty() {
        out.push_str("No files would be moved.\n");
        return out;
    }

    let total = plan.total();
    let _ = writeln!(out, "Planned moves: {} {}", total, file_word(total));
    for (category, moves) in alphabetical(plan.categories()) {
        let _ = writeln!(out, "  {} ({}):", category, moves.len());
        for planned in moves {
            let _ = writeln!(
                out,
                "    - {} -> {}",
                planned.source_name(),
                planned.destination_name
            );
        }
    }
    let _ = writeln!(out, "\nTotal files that would be moved: {}", total);

    out
}

fn moved_line(planned: &PlannedMove) -> String {
    format!(
        "Moved '{}' -> '{}/{}'",
        planned.source_name(),
        planned.category,
        planned.destination_name
    )
}

/// Renders the result line for one planned move.
pub fn format_outcome(outcome: &MoveOutcome) -> String {
    match &outcome.status {
        MoveStatus::Moved => moved_line(&outcome.planned),
        MoveStatus::Failed(e) => format!(
            "  [SKIPPED] Could not move '{}'. Reason: {}",
            outcome.planned.source_name(),
            e
        ),
        MoveStatus::Skipped => format!(
            "  [SKIPPED] Could not move '{}'. Reason: folder {} is unavailable",
            outcome.planned.source_name(),
            outcome.planned.category
        ),
    }
}

/// Renders the totals printed after a real run.
pub fn format_execution_totals(report: &ExecutionReport) -> String {
    let mut out = String::new();

    if report.outcomes.is_empty() {
        out.push_str("No files to organize.\n");
        return out;
    }

    let _ = writeln!(out, "\nTotal files moved: {}", report.moved_count());
    let skipped = report.skipped_count();
    if skipped > 0 {
        let _ = writeln!(out, "Total files skipped: {}", skipped);
    }

    out
}

/// Renders the per-category summary table body.
///
/// Categories with a zero count are omitted.
///
/// # Examples
///
/// ```
/// use foldersort::file_category::Category;
/// use foldersort::report::format_summary;
/// use std::collections::BTreeMap;
///
/// let counts = BTreeMap::from([(Category::Images, 2), (Category::Archives, 1)]);
/// assert_eq!(
///     format_summary(&counts),
///     "  Archives: 1 file\n  Images: 2 files\n\n  TOTAL: 3 files\n"
/// );
/// ```
pub fn format_summary(counts: &BTreeMap<Category, usize>) -> String {
    let mut out = String::new();

    let rows = alphabetical(counts.iter().map(|(c, n)| (*c, *n)).filter(|(_, n)| *n > 0));
    if rows.is_empty() {
        out.push_str("No files were categorized.\n");
        return out;
    }

    let mut total = 0;
    for (category, count) in rows {
        let _ = writeln!(out, "  {}: {} {}", category, count, file_word(count));
        total += count;
    }
    let _ = writeln!(out, "\n  TOTAL: {} {}", total, file_word(total));

    out
}

/// Planned file counts per category, for the simulation summary.
pub fn planned_counts(plan: &Plan) -> BTreeMap<Category, usize> {
    plan.categories()
        .map(|(category, moves)| (category, moves.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_organizer::OrganizeError;
    use crate::planner::build_plan;
    use crate::scanner::{DirectorySnapshot, FileEntry};
    use std::path::{Path, PathBuf};

    fn plan_for(names: &[&str]) -> Plan {
        let root = Path::new("/target");
        let mut snapshot = DirectorySnapshot::new(root);
        for name in names {
            snapshot.entries.push(FileEntry::new(root, name));
        }
        build_plan(&snapshot)
    }

    #[test]
    fn test_simulation_listing() {
        let plan = plan_for(&["report.pdf", "image.png", "archive.zip"]);

        let expected = "Planned moves: 3 files\n\
                        \x20 Archives (1):\n\
                        \x20   - archive.zip -> archive.zip\n\
                        \x20 Documents (1):\n\
                        \x20   - report.pdf -> report.pdf\n\
                        \x20 Images (1):\n\
                        \x20   - image.png -> image.png\n\
                        \n\
                        Total files that would be moved: 3\n";
        assert_eq!(format_simulation(&plan), expected);
    }

    #[test]
    fn test_simulation_shows_renamed_destination() {
        let root = Path::new("/target");
        let mut snapshot = DirectorySnapshot::new(root);
        snapshot.entries.push(FileEntry::new(root, "a.txt"));
        snapshot
            .occupied
            .entry(Category::Documents)
            .or_default()
            .insert("a.txt".to_string());

        let output = format_simulation(&build_plan(&snapshot));
        assert!(output.contains("    - a.txt -> a (1).txt\n"));
        assert!(output.starts_with("Planned moves: 1 file\n"));
    }

    #[test]
    fn test_summary_omits_zero_counts() {
        let counts = BTreeMap::from([(Category::Videos, 0), (Category::Audio, 4)]);
        assert_eq!(format_summary(&counts), "  Audio: 4 files\n\n  TOTAL: 4 files\n");
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(format_summary(&BTreeMap::new()), "No files were categorized.\n");
    }

    #[test]
    fn test_summary_is_alphabetical() {
        let plan = plan_for(&["a.zip", "b.mp4", "c.png", "d.mp3", "e.bin", "f.txt"]);
        let summary = format_summary(&planned_counts(&plan));
        let order: Vec<_> = summary
            .lines()
            .filter_map(|line| line.trim().split(':').next())
            .filter(|name| !name.is_empty() && *name != "TOTAL")
            .collect();
        assert_eq!(
            order,
            vec!["Archives", "Audio", "Documents", "Images", "Others", "Videos"]
        );
    }

    #[test]
    fn test_outcomes_and_totals() {
        let plan = plan_for(&["a.txt", "b.txt"]);
        let mut moves = plan.iter().cloned();
        let first = moves.next().expect("first move");
        let second = moves.next().expect("second move");

        let report = ExecutionReport {
            outcomes: vec![
                MoveOutcome {
                    planned: first,
                    status: MoveStatus::Moved,
                },
                MoveOutcome {
                    planned: second.clone(),
                    status: MoveStatus::Failed(OrganizeError::DestinationOccupied {
                        source: second.source.clone(),
                        destination: PathBuf::from("/target/Documents/b.txt"),
                    }),
                },
            ],
            folder_failures: Vec::new(),
        };

        let lines: Vec<_> = report.outcomes.iter().map(format_outcome).collect();
        assert_eq!(lines[0], "Moved 'a.txt' -> 'Documents/a.txt'");
        assert!(lines[1].starts_with("  [SKIPPED] Could not move 'b.txt'. Reason: "));

        assert_eq!(
            format_execution_totals(&report),
            "\nTotal files moved: 1\nTotal files skipped: 1\n"
        );
    }

    #[test]
    fn test_totals_for_empty_run() {
        let report = ExecutionReport::default();
        assert_eq!(format_execution_totals(&report), "No files to organize.\n");
    }
}
