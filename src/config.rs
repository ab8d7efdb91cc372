//! Scan settings: framework plus ordered prefix mappings.
//!
//! Settings come from an optional TOML file:
//!
//! ```toml
//! framework = "zf1"
//!
//! [[mappings]]
//! prefix = "Model_"
//! dir = "models/"
//! ```
//!
//! Missing keys take their defaults (`zf1` and [`PrefixMapping::defaults`]).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::{Framework, PrefixMapping};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub framework: Framework,
    pub mappings: Vec<PrefixMapping>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            framework: Framework::default(),
            mappings: PrefixMapping::defaults(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        let mut settings: Settings = toml::from_str(text)?;
        if settings.mappings.is_empty() {
            settings.mappings = PrefixMapping::defaults();
        }
        Ok(settings)
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        framework: Option<Framework>,
        mappings: Vec<PrefixMapping>,
    ) -> Self {
        if let Some(framework) = framework {
            self.framework = framework;
        }
        if !mappings.is_empty() {
            self.mappings = mappings;
        }
        self
    }
}

/// Parse a `PREFIX=DIR` command-line mapping.
pub fn parse_mapping(arg: &str) -> Result<PrefixMapping, ConfigError> {
    match arg.split_once('=') {
        Some((prefix, dir)) if !prefix.trim().is_empty() && !dir.trim().is_empty() => {
            Ok(PrefixMapping::new(prefix.trim(), dir.trim()))
        }
        _ => Err(ConfigError::InvalidMapping(arg.to_string())),
    }
}
