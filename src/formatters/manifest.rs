use std::collections::BTreeSet;

use crate::core::DependencyResult;

/// Plain file list of an extraction slice, one root-relative path per line:
/// the selection, its resolved dependencies and resolved includes, sorted
/// and de-duplicated. Unresolved includes are listed after a `#` marker
/// line so a copy step can ignore them.
pub struct ManifestFormatter {
    include_unresolved: bool,
}

impl ManifestFormatter {
    pub fn new() -> Self {
        Self {
            include_unresolved: true,
        }
    }

    pub fn with_unresolved(mut self, include: bool) -> Self {
        self.include_unresolved = include;
        self
    }

    pub fn slice(&self, selected: &[String], result: &DependencyResult) -> Vec<String> {
        let mut files: BTreeSet<&str> = selected.iter().map(String::as_str).collect();
        files.extend(result.dependencies.iter().map(|dep| dep.file_path.as_str()));
        files.extend(
            result
                .includes
                .iter()
                .filter(|item| item.include.is_resolved())
                .map(|item| item.include.resolved.as_str()),
        );
        files.into_iter().map(str::to_string).collect()
    }

    pub fn format(&self, selected: &[String], result: &DependencyResult) -> String {
        let mut out = String::new();
        for file in self.slice(selected, result) {
            out.push_str(&file);
            out.push('\n');
        }

        if self.include_unresolved {
            let unresolved: Vec<_> = result.unresolved_includes().collect();
            if !unresolved.is_empty() {
                out.push_str("# unresolved includes\n");
                for item in unresolved {
                    out.push_str(&format!(
                        "# {}:{} {} {}\n",
                        item.source_file, item.include.line, item.include.kind, item.include.raw_path
                    ));
                }
            }
        }
        out
    }
}

impl Default for ManifestFormatter {
    fn default() -> Self {
        Self::new()
    }
}
