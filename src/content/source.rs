//! Content sources - where the raw text of posts comes from

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read-only store of raw content files, keyed by slug
pub trait ContentSource {
    /// Location of the store, for error reporting
    fn location(&self) -> &Path;

    /// Slugs of every content file, in a deterministic order
    fn list_slugs(&self) -> io::Result<Vec<String>>;

    /// Raw text of the file behind `slug`.
    /// Fails with `ErrorKind::NotFound` when there is none.
    fn read_raw(&self, slug: &str) -> io::Result<String>;

    /// Whether a file exists for `slug`. Fails only when existence cannot
    /// be determined.
    fn exists(&self, slug: &str) -> io::Result<bool>;
}

/// A slug maps to exactly one file name: no separators, no extra dots
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '\\', '.'])
}

/// Content files in a single directory, one `<slug>.<extension>` file per post
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
    extension: String,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(dir: P, extension: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Path of the file backing `slug`, if the slug is well-formed
    pub fn path_for(&self, slug: &str) -> Option<PathBuf> {
        is_valid_slug(slug).then(|| self.dir.join(format!("{}.{}", slug, self.extension)))
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.extension)
            .unwrap_or(false)
    }
}

impl ContentSource for DirSource {
    fn location(&self) -> &Path {
        &self.dir
    }

    fn list_slugs(&self) -> io::Result<Vec<String>> {
        if !fs::metadata(&self.dir)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "content path is not a directory",
            ));
        }

        let mut slugs = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;

            let path = entry.path();
            if !entry.file_type().is_file() || !self.has_extension(path) {
                continue;
            }

            match path.file_stem().and_then(|s| s.to_str()) {
                Some(slug) if is_valid_slug(slug) => slugs.push(slug.to_string()),
                _ => tracing::warn!("Ignoring content file with unusable name: {:?}", path),
            }
        }

        Ok(slugs)
    }

    fn read_raw(&self, slug: &str) -> io::Result<String> {
        let path = self
            .path_for(slug)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid slug"))?;
        fs::read_to_string(path)
    }

    fn exists(&self, slug: &str) -> io::Result<bool> {
        let Some(path) = self.path_for(slug) else {
            return Ok(false);
        };
        match fs::metadata(path) {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// In-memory content, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the raw text behind `slug`
    pub fn insert(&mut self, slug: impl Into<String>, raw: impl Into<String>) {
        self.files.insert(slug.into(), raw.into());
    }

    pub fn with(mut self, slug: impl Into<String>, raw: impl Into<String>) -> Self {
        self.insert(slug, raw);
        self
    }
}

impl ContentSource for MemorySource {
    fn location(&self) -> &Path {
        Path::new("<memory>")
    }

    fn list_slugs(&self) -> io::Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read_raw(&self, slug: &str) -> io::Result<String> {
        self.files
            .get(slug)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, slug.to_string()))
    }

    fn exists(&self, slug: &str) -> io::Result<bool> {
        Ok(self.files.contains_key(slug))
    }
}
