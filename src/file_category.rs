/// File categorization by extension.
///
/// Every file lands in exactly one [`Category`]. The lookup table is fixed;
/// anything it does not list, including files without an extension, is
/// classified as [`Category::Others`].
///
/// # Examples
///
/// ```
/// use foldersort::file_category::{Category, FileMapper};
///
/// let mapper = FileMapper::default();
/// assert_eq!(mapper.classify(".png"), Category::Images);
/// assert_eq!(mapper.classify(".MP3"), Category::Audio);
/// assert_eq!(mapper.classify(""), Category::Others);
/// ```
use std::collections::HashMap;
use std::fmt;

/// Represents one of the fixed folders files are sorted into.
///
/// Variants are declared in plan order, which is also their `Ord` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Image files (JPG, PNG, GIF, WEBP)
    Images,
    /// Document files (PDF, DOCX, TXT, PPTX, XLSX, CSV)
    Documents,
    /// Video files (MP4, MOV, AVI, MKV, TS)
    Videos,
    /// Audio files (MP3, WAV, AAC)
    Audio,
    /// Archive files (ZIP, RAR, 7Z)
    Archives,
    /// Everything else
    Others,
}

impl Category {
    /// All categories in plan order.
    pub const ALL: [Category; 6] = [
        Category::Images,
        Category::Documents,
        Category::Videos,
        Category::Audio,
        Category::Archives,
        Category::Others,
    ];

    /// Returns the folder name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use foldersort::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Others.dir_name(), "Others");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Documents => "Documents",
            Category::Videos => "Videos",
            Category::Audio => "Audio",
            Category::Archives => "Archives",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Maps file extensions to categories.
///
/// Keys are stored lower-cased without the leading dot, so lookups accept
/// `".PNG"`, `".png"` and `"png"` alike.
#[derive(Debug, Clone)]
pub struct FileMapper {
    extension_map: HashMap<&'static str, Category>,
}

impl FileMapper {
    /// Creates a new `FileMapper` holding the standard extension table.
    pub fn new() -> Self {
        let mut mapper = Self {
            extension_map: HashMap::new(),
        };
        mapper.populate_standard_mappings();
        mapper
    }

    fn populate_standard_mappings(&mut self) {
        self.add_extensions(Category::Images, &["jpg", "jpeg", "png", "gif", "webp"]);
        self.add_extensions(
            Category::Documents,
            &["pdf", "docx", "txt", "pptx", "xlsx", "csv"],
        );
        self.add_extensions(Category::Videos, &["mp4", "mov", "avi", "mkv", "ts"]);
        self.add_extensions(Category::Audio, &["mp3", "wav", "aac"]);
        self.add_extensions(Category::Archives, &["zip", "rar", "7z"]);
    }

    fn add_extensions(&mut self, category: Category, extensions: &[&'static str]) {
        for &ext in extensions {
            self.extension_map.insert(ext, category);
        }
    }

    /// Maps a file extension to a category, if the table lists it.
    ///
    /// # Examples
    ///
    /// ```
    /// use foldersort::file_category::{Category, FileMapper};
    ///
    /// let mapper = FileMapper::default();
    /// assert_eq!(mapper.extension_to_category(".pdf"), Some(Category::Documents));
    /// assert_eq!(mapper.extension_to_category("exe"), None);
    /// ```
    pub fn extension_to_category(&self, ext: &str) -> Option<Category> {
        let key = ext.strip_prefix('.').unwrap_or(ext).to_lowercase();
        self.extension_map.get(key.as_str()).copied()
    }

    /// Determines the category for an extension, defaulting to `Others`.
    pub fn classify(&self, ext: &str) -> Category {
        self.extension_to_category(ext).unwrap_or(Category::Others)
    }
}

impl Default for FileMapper {
    fn default() -> Self {
        Self::new()
    }
}
