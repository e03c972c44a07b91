//! Directory scanning and eligibility filtering.
//!
//! A scan validates the target, lists its top level once and records:
//! - the regular files eligible for sorting, as [`FileEntry`] values
//! - the names already present in each existing category folder
//!
//! The resulting [`DirectorySnapshot`] is all the planner needs, so planning
//! never touches the filesystem.

use crate::file_category::Category;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// System and metadata files that are never moved, compared case-insensitively.
pub const IGNORED_FILENAMES: [&str; 4] = [
    "desktop.ini", // Windows folder view settings
    "thumbs.db",   // Windows thumbnail cache
    "ehthumbs.db",
    "autorun.inf",
];

/// Errors that abort a run before anything is planned.
#[derive(Debug)]
pub enum ScanError {
    /// The target path does not exist or is not a directory.
    InvalidTarget { path: PathBuf },
    /// The target directory could not be listed.
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::InvalidTarget { path } => {
                write!(f, "Path '{}' is not a valid directory", path.display())
            }
            ScanError::ReadFailed { path, source } => {
                write!(f, "Error reading directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::InvalidTarget { .. } => None,
            ScanError::ReadFailed { source, .. } => Some(source),
        }
    }
}

/// A top-level file captured at scan time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// The file name, e.g. `report.PDF`.
    pub name: String,
    /// Lower-cased final suffix including the dot (`.pdf`), or empty.
    pub extension: String,
    /// Full path to the file.
    pub path: PathBuf,
}

impl FileEntry {
    /// Builds an entry for `name` located inside `dir`.
    pub fn new(dir: &Path, name: &str) -> Self {
        let (_, extension) = split_name(name);
        Self {
            name: name.to_string(),
            extension: extension.to_lowercase(),
            path: dir.join(name),
        }
    }
}

/// Everything the planner needs to know about the target directory.
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    /// The directory being organized.
    pub root: PathBuf,
    /// Eligible files, in the order the directory listing returned them.
    pub entries: Vec<FileEntry>,
    /// Names already present inside each existing category folder.
    pub occupied: HashMap<Category, HashSet<String>>,
}

impl DirectorySnapshot {
    /// Creates an empty snapshot rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Returns true if `name` already exists in the folder for `category`,
    /// ignoring case.
    pub fn is_occupied(&self, category: Category, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.occupied
            .get(&category)
            .is_some_and(|names| names.iter().any(|n| n.to_lowercase() == wanted))
    }
}

/// Splits a file name into stem and extension.
///
/// The extension keeps its leading dot and original case. A leading dot
/// (`.bashrc`) or a trailing dot (`file.`) does not start an extension.
///
/// # Examples
///
/// ```
/// use foldersort::scanner::split_name;
///
/// assert_eq!(split_name("photo.JPG"), ("photo", ".JPG"));
/// assert_eq!(split_name("backup.tar.gz"), ("backup.tar", ".gz"));
/// assert_eq!(split_name("README"), ("README", ""));
/// assert_eq!(split_name("file."), ("file.", ""));
/// ```
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Returns true if a file with this name may be organized.
///
/// Dotfiles and the names in [`IGNORED_FILENAMES`] are rejected.
pub fn is_eligible_name(name: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }
    let lowered = name.to_lowercase();
    !IGNORED_FILENAMES.contains(&lowered.as_str())
}

/// Scans the top level of `root` once and returns a snapshot of it.
///
/// # Errors
///
/// Returns [`ScanError::InvalidTarget`] before reading anything if `root` is
/// not an existing directory, and [`ScanError::ReadFailed`] if it cannot be
/// listed.
pub fn scan_directory(root: &Path) -> Result<DirectorySnapshot, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::InvalidTarget {
            path: root.to_path_buf(),
        });
    }

    let entries = fs::read_dir(root).map_err(|e| ScanError::ReadFailed {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut snapshot = DirectorySnapshot::new(root);

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                continue;
            }
        };

        let os_name = entry.file_name();
        let Some(name) = os_name.to_str() else {
            warn!(
                "Skipping {}: name is not valid UTF-8",
                entry.path().display()
            );
            continue;
        };

        // fs::metadata follows symlinks, so a link to a file is sorted and a
        // link to a directory is not.
        let is_file = match fs::metadata(entry.path()) {
            Ok(metadata) => metadata.is_file(),
            Err(e) => {
                warn!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        };

        if !is_file {
            debug!("Skipping non-file entry {}", name);
            continue;
        }
        if !is_eligible_name(name) {
            debug!("Skipping ignored file {}", name);
            continue;
        }

        snapshot.entries.push(FileEntry::new(root, name));
    }

    for category in Category::ALL {
        let folder = root.join(category.dir_name());
        if !folder.is_dir() {
            continue;
        }
        match existing_names(&folder) {
            Ok(names) => {
                snapshot.occupied.insert(category, names);
            }
            Err(e) => warn!("Could not list {}: {}", folder.display(), e),
        }
    }

    debug!(
        "Scanned {}: {} eligible file(s)",
        root.display(),
        snapshot.entries.len()
    );

    Ok(snapshot)
}

fn existing_names(folder: &Path) -> std::io::Result<HashSet<String>> {
    let mut names = HashSet::new();
    for entry in fs::read_dir(folder)? {
        names.insert(entry?.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_name_variants() {
        assert_eq!(split_name("a.txt"), ("a", ".txt"));
        assert_eq!(split_name(".hidden"), (".hidden", ""));
        assert_eq!(split_name("noext"), ("noext", ""));
        assert_eq!(split_name("a (1).txt"), ("a (1)", ".txt"));
    }

    #[test]
    fn test_file_entry_lowercases_extension() {
        let entry = FileEntry::new(Path::new("/tmp/x"), "Holiday.JPEG");
        assert_eq!(entry.name, "Holiday.JPEG");
        assert_eq!(entry.extension, ".jpeg");
        assert_eq!(entry.path, PathBuf::from("/tmp/x/Holiday.JPEG"));
    }

    #[test]
    fn test_is_eligible_name() {
        assert!(is_eligible_name("report.pdf"));
        assert!(is_eligible_name("Makefile"));
        assert!(!is_eligible_name(".hidden"));
        assert!(!is_eligible_name(".DS_Store"));
        assert!(!is_eligible_name("desktop.ini"));
        assert!(!is_eligible_name("Desktop.INI"));
        assert!(!is_eligible_name("Thumbs.db"));
        assert!(!is_eligible_name("ehthumbs.db"));
        assert!(!is_eligible_name("AUTORUN.INF"));
    }

    #[test]
    fn test_scan_missing_directory() {
        let result = scan_directory(Path::new("/non/existent/path"));
        assert!(matches!(result, Err(ScanError::InvalidTarget { .. })));
    }

    #[test]
    fn test_scan_file_as_target() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("file.txt");
        fs::write(&file_path, "x").expect("Failed to write test file");

        let result = scan_directory(&file_path);
        assert!(matches!(result, Err(ScanError::InvalidTarget { .. })));
    }

    #[test]
    fn test_scan_filters_entries() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        for name in ["report.pdf", "desktop.ini", ".hidden", "song.mp3"] {
            fs::write(base_path.join(name), "x").expect("Failed to write test file");
        }
        fs::create_dir(base_path.join("nested")).expect("Failed to create dir");
        fs::write(base_path.join("nested").join("inner.png"), "x")
            .expect("Failed to write test file");

        let snapshot = scan_directory(base_path).expect("scan failed");
        let mut names: Vec<_> = snapshot.entries.iter().map(|e| e.name.as_str()).collect();
        names.sort();

        assert_eq!(names, vec!["report.pdf", "song.mp3"]);
        assert!(snapshot.occupied.is_empty());
    }

    #[test]
    fn test_scan_records_occupied_names() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::create_dir(base_path.join("Documents")).expect("Failed to create dir");
        fs::write(base_path.join("Documents").join("a.txt"), "old")
            .expect("Failed to write test file");
        fs::write(base_path.join("a.txt"), "new").expect("Failed to write test file");

        let snapshot = scan_directory(base_path).expect("scan failed");

        assert_eq!(snapshot.entries.len(), 1);
        assert!(snapshot.is_occupied(Category::Documents, "a.txt"));
        assert!(snapshot.is_occupied(Category::Documents, "A.TXT"));
        assert!(!snapshot.is_occupied(Category::Images, "a.txt"));
    }
}
