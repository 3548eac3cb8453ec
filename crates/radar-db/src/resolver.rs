//! Selection of the active snapshot file.
//!
//! Snapshots are written into a single directory by an external crawler.
//! Filenames embed a fixed-width date token, so the lexicographically
//! greatest name is the most recent snapshot. The directory is re-scanned
//! on every call; nothing is cached between requests.

use std::path::{Path, PathBuf};

/// Default snapshot file extension (without the leading dot).
pub const DEFAULT_EXTENSION: &str = "db";

/// Picks the current snapshot out of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotResolver {
    dir: PathBuf,
    extension: String,
}

impl SnapshotResolver {
    /// Creates a resolver over `dir`, matching `*.db` files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Overrides the snapshot extension. A leading dot is ignored.
    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    /// The configured snapshot directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The snapshot extension, without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether the snapshot directory currently exists.
    pub fn dir_exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// Returns the path of the most recent snapshot, if any.
    ///
    /// A missing directory or an empty listing is a normal state and yields
    /// `None`.
    pub fn resolve(&self) -> Option<PathBuf> {
        let latest = self.candidates().into_iter().next();
        match &latest {
            Some(path) => tracing::debug!(snapshot = %path.display(), "resolved latest snapshot"),
            None => tracing::debug!(dir = %self.dir.display(), "no snapshot available"),
        }
        latest
    }

    /// Lists every matching snapshot, most recent first.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(
                    dir = %self.dir.display(),
                    "snapshot directory not readable: {}",
                    e
                );
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| self.matches(name))
            .collect();

        names.sort_unstable_by(|a, b| b.cmp(a));
        names.into_iter().map(|name| self.dir.join(name)).collect()
    }

    fn matches(&self, name: &str) -> bool {
        if name.starts_with('.') {
            return false;
        }
        name.strip_suffix(self.extension.as_str())
            .and_then(|stem| stem.strip_suffix('.'))
            .is_some()
    }
}
