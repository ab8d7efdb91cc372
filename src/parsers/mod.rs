pub mod common;
pub mod conventions;
pub mod includes;
pub mod references;

use anyhow::Result;
use std::path::Path;

use crate::core::{ClassReference, IncludeReference};

pub use conventions::{class_from_content, NamingConvention};
pub use includes::{extract_includes_from_source, resolve_include_path};
pub use references::{PatternExtractor, PatternFamily};

/// Produces the class references of one PHP source text.
///
/// Implementations return references deduplicated by (name, kind), in first
/// occurrence order, with 1-based line numbers.
pub trait ReferenceExtractor {
    fn extract(&self, source: &str) -> Vec<ClassReference>;

    fn backend_name(&self) -> &str;

    fn extract_file(&self, file_path: &Path) -> Result<Vec<ClassReference>> {
        let source = common::read_source(file_path)?;
        Ok(self.extract(&source))
    }
}

/// Class references of a file, using the default pattern backend.
pub fn extract_references(file_path: &Path) -> Result<Vec<ClassReference>> {
    PatternExtractor::new().extract_file(file_path)
}

/// Include statements of a file, resolved against `project_root`.
pub fn extract_includes(file_path: &Path, project_root: &Path) -> Result<Vec<IncludeReference>> {
    includes::extract_includes(file_path, project_root)
}
