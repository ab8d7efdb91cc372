use serde::Serialize;
use std::path::{Path, PathBuf};

use super::index::{ClassIndex, IndexBuilder};
use super::model::{DependencyResult, Framework, PrefixMapping, SourceFile};
use super::resolver::DependencyResolver;
use super::scanner::FileScanner;
use crate::error::ScanError;

/// Everything one scan produced. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectState {
    pub root: PathBuf,
    pub files: Vec<SourceFile>,
    pub index: ClassIndex,
    pub framework: Framework,
    pub mappings: Vec<PrefixMapping>,
}

impl ProjectState {
    pub fn relative_paths(&self) -> Vec<String> {
        self.files.iter().map(|f| f.relative.clone()).collect()
    }

    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            root: self.root.to_string_lossy().into_owned(),
            framework: self.framework,
            file_count: self.files.len(),
            indexed: self.index.len(),
            files: self.relative_paths(),
            class_index: self.index.clone(),
        }
    }
}

/// Serializable view of a scan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub root: String,
    pub framework: Framework,
    pub file_count: usize,
    pub indexed: usize,
    pub files: Vec<String>,
    pub class_index: ClassIndex,
}

/// Runs scan -> index and selection -> dependencies.
pub struct ProjectAnalyzer {
    file_scanner: FileScanner,
    resolver: DependencyResolver,
}

impl ProjectAnalyzer {
    pub fn new() -> Self {
        Self {
            file_scanner: FileScanner::new(),
            resolver: DependencyResolver::new(),
        }
    }

    pub fn with_resolver(resolver: DependencyResolver) -> Self {
        Self {
            file_scanner: FileScanner::new(),
            resolver,
        }
    }

    /// Scan `root_path` and index it. `None` or an empty list of mappings
    /// selects [`PrefixMapping::defaults`].
    pub fn scan(
        &self,
        root_path: &Path,
        framework: Framework,
        mappings: Option<Vec<PrefixMapping>>,
    ) -> Result<ProjectState, ScanError> {
        let mappings = match mappings {
            Some(mappings) if !mappings.is_empty() => mappings,
            _ => PrefixMapping::defaults(),
        };

        let tree = self.file_scanner.scan_directory(root_path)?;
        let index = IndexBuilder::new(framework, mappings.clone()).build(&tree);

        Ok(ProjectState {
            root: tree.root,
            files: tree.files,
            index,
            framework,
            mappings,
        })
    }

    pub fn analyze(
        &self,
        state: &ProjectState,
        selected: &[String],
        parse_includes: bool,
    ) -> DependencyResult {
        self.resolver
            .resolve(selected, &state.index, &state.root, parse_includes)
    }
}

impl Default for ProjectAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
