//! Turns a directory snapshot into an immutable move plan.
//!
//! Planning is a pure computation over a [`DirectorySnapshot`]: it classifies
//! every entry, orders the result deterministically and assigns each file a
//! destination name that collides neither with files already in the category
//! folder nor with names handed out earlier in the same plan.

use crate::file_category::{Category, FileMapper};
use crate::scanner::{DirectorySnapshot, FileEntry, split_name};
use log::debug;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// A single file move decided by the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    /// Where the file is now.
    pub source: PathBuf,
    /// The category the file was classified as.
    pub category: Category,
    /// The category folder the file goes into.
    pub destination_folder: PathBuf,
    /// The collision-free name inside `destination_folder`.
    pub destination_name: String,
}

impl PlannedMove {
    /// Full path the file will be moved to.
    pub fn destination(&self) -> PathBuf {
        self.destination_folder.join(&self.destination_name)
    }

    /// Name of the source file, for display.
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// The complete, ordered set of moves for one run.
///
/// Only categories with at least one move are present. Iteration follows
/// category order, and moves within a category follow file name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    root: PathBuf,
    moves: BTreeMap<Category, Vec<PlannedMove>>,
}

impl Plan {
    /// The directory this plan organizes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Total number of planned moves.
    pub fn total(&self) -> usize {
        self.moves.values().map(Vec::len).sum()
    }

    /// Returns true if nothing would be moved.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves planned for one category, empty if there are none.
    pub fn moves_for(&self, category: Category) -> &[PlannedMove] {
        self.moves.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over non-empty categories and their moves, in category order.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[PlannedMove])> {
        self.moves.iter().map(|(category, moves)| (*category, moves.as_slice()))
    }

    /// Iterates over every move in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &PlannedMove> {
        self.moves.values().flatten()
    }
}

/// Picks the first name of the form `stem (n).ext` that is not taken.
///
/// `name` itself is returned unchanged when it is free. Numbering starts at 1
/// and only the stem is altered.
///
/// # Examples
///
/// ```
/// use foldersort::planner::resolve_collision;
///
/// let taken = ["a.txt", "a (1).txt"];
/// assert_eq!(resolve_collision("a.txt", |n| taken.contains(&n)), "a (2).txt");
/// assert_eq!(resolve_collision("b.txt", |n| taken.contains(&n)), "b.txt");
/// ```
pub fn resolve_collision(name: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(name) {
        return name.to_string();
    }

    let (stem, extension) = split_name(name);
    let mut counter = 1usize;
    loop {
        let candidate = format!("{} ({}){}", stem, counter, extension);
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Builds the plan for a snapshot.
///
/// # Examples
///
/// ```
/// use foldersort::file_category::Category;
/// use foldersort::planner::build_plan;
/// use foldersort::scanner::{DirectorySnapshot, FileEntry};
/// use std::path::Path;
///
/// let root = Path::new("/downloads");
/// let mut snapshot = DirectorySnapshot::new(root);
/// snapshot.entries.push(FileEntry::new(root, "song.mp3"));
///
/// let plan = build_plan(&snapshot);
/// assert_eq!(plan.total(), 1);
/// assert_eq!(plan.moves_for(Category::Audio)[0].destination_name, "song.mp3");
/// ```
pub fn build_plan(snapshot: &DirectorySnapshot) -> Plan {
    let mapper = FileMapper::default();

    let mut grouped: BTreeMap<Category, Vec<&FileEntry>> = BTreeMap::new();
    for entry in &snapshot.entries {
        grouped
            .entry(mapper.classify(&entry.extension))
            .or_default()
            .push(entry);
    }

    let mut moves = BTreeMap::new();
    for (category, mut entries) in grouped {
        entries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });

        let destination_folder = snapshot.root.join(category.dir_name());
        // Names compare case-insensitively: `A.txt` and `a.txt` are the same
        // file on macOS and Windows volumes.
        let mut taken: HashSet<String> = snapshot
            .occupied
            .get(&category)
            .into_iter()
            .flatten()
            .map(|name| name.to_lowercase())
            .collect();
        let mut category_moves = Vec::with_capacity(entries.len());

        for entry in entries {
            let destination_name = resolve_collision(&entry.name, |candidate| {
                taken.contains(&candidate.to_lowercase())
            });
            if destination_name != entry.name {
                debug!(
                    "{}/{} is taken, using {}",
                    category, entry.name, destination_name
                );
            }
            taken.insert(destination_name.to_lowercase());

            category_moves.push(PlannedMove {
                source: entry.path.clone(),
                category,
                destination_folder: destination_folder.clone(),
                destination_name,
            });
        }

        moves.insert(category, category_moves);
    }

    Plan {
        root: snapshot.root.clone(),
        moves,
    }
}
