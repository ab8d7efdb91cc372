use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

use super::index::ClassIndex;
use super::model::{ClassReference, Dependency, DependencyResult, IncludeItem};
use crate::parsers::{includes, PatternExtractor, ReferenceExtractor};

/// Prefixes retried when a reference has no exact index match, so a bare
/// `Car` can reach `Model_Car`, `Service_Car`, ...
pub const LEGACY_RETRY_PREFIXES: [&str; 5] = ["Model_", "DbTable_", "Service_", "Parent_", "Form_"];

/// Resolves the class and include dependencies of a file selection.
pub struct DependencyResolver {
    extractor: Box<dyn ReferenceExtractor + Send + Sync>,
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self::with_extractor(Box::new(PatternExtractor::new()))
    }

    pub fn with_extractor(extractor: Box<dyn ReferenceExtractor + Send + Sync>) -> Self {
        Self { extractor }
    }

    /// Dependencies of `selected` (root-relative paths) that live outside the
    /// selection, plus, when `parse_includes` is set, every include statement
    /// found in the selection.
    ///
    /// Files that cannot be read contribute nothing.
    pub fn resolve(
        &self,
        selected: &[String],
        index: &ClassIndex,
        project_root: &Path,
        parse_includes: bool,
    ) -> DependencyResult {
        let selection: HashSet<&str> = selected.iter().map(String::as_str).collect();
        let mut seen_files: HashSet<String> = HashSet::new();
        let mut result = DependencyResult::new();

        for relative in selected {
            let absolute = project_root.join(relative);

            let refs = match self.extractor.extract_file(&absolute) {
                Ok(refs) => refs,
                Err(err) => {
                    warn!(file = %relative, "skipping file: {err:#}");
                    continue;
                }
            };

            for reference in &refs {
                for (class_name, file_path) in lookup(index, reference) {
                    if selection.contains(file_path) || !seen_files.insert(file_path.to_string()) {
                        continue;
                    }
                    result.dependencies.push(Dependency {
                        class_name,
                        file_path: file_path.to_string(),
                        kind: reference.kind,
                        referenced_by: relative.clone(),
                    });
                }
            }

            if parse_includes {
                match includes::extract_includes(&absolute, project_root) {
                    Ok(found) => result.includes.extend(found.into_iter().map(|include| {
                        IncludeItem {
                            include,
                            source_file: relative.clone(),
                        }
                    })),
                    Err(err) => debug!(file = %relative, "include extraction failed: {err:#}"),
                }
            }
        }

        info!(
            backend = self.extractor.backend_name(),
            selected = selected.len(),
            dependencies = result.dependencies.len(),
            includes = result.includes.len(),
            "resolved selection"
        );
        result
    }
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Index hits for one reference: the exact name, or failing that every
/// legacy prefix retry that matches.
fn lookup<'a>(index: &'a ClassIndex, reference: &ClassReference) -> Vec<(String, &'a str)> {
    if let Some(file_path) = index.file_for(&reference.class_name) {
        return vec![(reference.class_name.clone(), file_path)];
    }

    LEGACY_RETRY_PREFIXES
        .iter()
        .filter_map(|prefix| {
            let candidate = format!("{prefix}{}", reference.class_name);
            index
                .file_for(&candidate)
                .map(|file_path| (candidate.clone(), file_path))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReferenceKind;

    #[test]
    fn exact_match_skips_prefix_retries() {
        let mut index = ClassIndex::new();
        index.insert("Car".into(), "lib/Car.php".into());
        index.insert("Model_Car".into(), "application/models/Car.php".into());

        let hits = lookup(&index, &ClassReference::new("Car", ReferenceKind::Instantiation, 1));
        assert_eq!(hits, vec![("Car".to_string(), "lib/Car.php")]);
    }

    #[test]
    fn prefix_retries_fan_out() {
        let mut index = ClassIndex::new();
        index.insert("Model_Car".into(), "application/models/Car.php".into());
        index.insert("Service_Car".into(), "application/services/Car.php".into());

        let hits = lookup(&index, &ClassReference::new("Car", ReferenceKind::StaticAccess, 3));
        assert_eq!(
            hits,
            vec![
                ("Model_Car".to_string(), "application/models/Car.php"),
                ("Service_Car".to_string(), "application/services/Car.php"),
            ]
        );
    }
}
