//! Caller-owned project session.
//!
//! A session remembers the settings to scan with and the state of the last
//! successful scan. Scans build a complete [`ProjectState`] before publishing
//! it by swapping an `Arc`, so a concurrent analysis sees either the previous
//! state or the new one, never a partially built index.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

use super::analyzer::{ProjectAnalyzer, ProjectState};
use super::model::{DependencyResult, Framework, PrefixMapping};
use crate::config::Settings;
use crate::error::{SessionError, SessionResult};

pub struct ProjectSession {
    analyzer: ProjectAnalyzer,
    settings: RwLock<Settings>,
    current: RwLock<Option<Arc<ProjectState>>>,
}

impl ProjectSession {
    pub fn new(settings: Settings) -> Self {
        Self::with_analyzer(ProjectAnalyzer::new(), settings)
    }

    pub fn with_analyzer(analyzer: ProjectAnalyzer, settings: Settings) -> Self {
        Self {
            analyzer,
            settings: RwLock::new(settings),
            current: RwLock::new(None),
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the prefix mappings used by the next scan.
    pub fn set_mappings(&self, mappings: Vec<PrefixMapping>) {
        self.settings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .mappings = mappings;
    }

    pub fn set_framework(&self, framework: Framework) {
        self.settings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .framework = framework;
    }

    /// Scan with the session settings and publish the result.
    pub fn scan(&self, root_path: &Path) -> SessionResult<Arc<ProjectState>> {
        let Settings { framework, mappings } = self.settings();
        let state = Arc::new(self.analyzer.scan(root_path, framework, Some(mappings))?);

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&state));
        info!(root = %state.root.display(), "published project state");
        Ok(state)
    }

    /// State of the last successful scan.
    pub fn current(&self) -> Option<Arc<ProjectState>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn analyze(&self, selected: &[String], parse_includes: bool) -> SessionResult<DependencyResult> {
        let state = self.current().ok_or(SessionError::NotScanned)?;
        if selected.is_empty() {
            return Err(SessionError::EmptySelection);
        }
        Ok(self.analyzer.analyze(&state, selected, parse_includes))
    }
}

impl Default for ProjectSession {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
