use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use crate::core::{DependencyResult, ScanSummary};

/// JSON output for scans and dependency results.
pub struct JsonFormatter {
    /// Single-line output instead of pretty-printed
    compact: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { compact: false }
    }

    pub fn compact() -> Self {
        Self { compact: true }
    }

    pub fn format_scan(&self, summary: &ScanSummary) -> Result<String> {
        self.render(summary)
    }

    /// Dependency result wrapped with counts.
    pub fn format_result(&self, result: &DependencyResult) -> Result<String> {
        let unresolved = result.unresolved_includes().count();
        let output = json!({
            "meta": {
                "dependencies": result.dependencies.len(),
                "includes": result.includes.len(),
                "unresolvedIncludes": unresolved,
            },
            "dependencies": result.dependencies,
            "includes": result.includes,
        });
        self.render(&output)
    }

    pub fn format_value<T: Serialize>(&self, value: &T) -> Result<String> {
        self.render(value)
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let text = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(text)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
