use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use super::model::SourceFile;
use crate::error::ScanError;

/// Directory names whose subtrees are never descended.
pub const EXCLUDED_DIRS: &[&str] = &["vendor", "node_modules", ".git", ".svn", ".idea"];

pub const SOURCE_EXTENSION: &str = "php";

/// Files found under a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTree {
    /// Canonical absolute root.
    pub root: PathBuf,
    /// Sorted by file name at each directory level.
    pub files: Vec<SourceFile>,
}

impl ScannedTree {
    pub fn relative_paths(&self) -> Vec<String> {
        self.files.iter().map(|f| f.relative.clone()).collect()
    }
}

pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    pub fn scan_directory(&self, root_path: &Path) -> Result<ScannedTree, ScanError> {
        let root = fs::canonicalize(root_path).map_err(|source| ScanError::RootUnreachable {
            path: root_path.to_path_buf(),
            source,
        })?;
        if !root.is_dir() {
            return Err(ScanError::NotADirectory { path: root });
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!("skipping unreadable entry: {err}");
                    continue;
                }
            };
            if !is_source_file(&entry) {
                continue;
            }
            if let Some(relative) = relative_slash_path(&root, entry.path()) {
                files.push(SourceFile::new(relative, entry.path().to_path_buf()));
            }
        }

        info!(root = %root.display(), files = files.len(), "scanned project");
        Ok(ScannedTree { root, files })
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIRS.contains(&name))
            .unwrap_or(false)
}

/// Regular `.php` files, plus symlinks resolving to one. Symlinked
/// directories are not descended.
fn is_source_file(entry: &DirEntry) -> bool {
    let is_file = entry.file_type().is_file()
        || (entry.path_is_symlink() && entry.path().is_file());
    is_file && has_source_extension(entry.path())
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
        .unwrap_or(false)
}

/// `path` relative to `root`, joined with `/` whatever the platform.
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
