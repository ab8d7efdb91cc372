use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A PHP file discovered under the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Root-relative path with `/` separators.
    pub relative: String,
    pub absolute: PathBuf,
}

impl SourceFile {
    pub fn new(relative: String, absolute: PathBuf) -> Self {
        Self { relative, absolute }
    }
}

/// Project layout convention used to derive class names from paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Zend Framework 1: `application/models/Car/Part.php` -> `Model_Car_Part`
    #[default]
    Zf1,
    /// CakePHP: `app/Model/Post.php` -> `Post`
    CakePhp,
    /// Laravel PSR-4: `app/Models/User.php` -> `App\Models\User`
    Laravel,
}

impl Framework {
    pub fn as_str(self) -> &'static str {
        match self {
            Framework::Zf1 => "zf1",
            Framework::CakePhp => "cakephp",
            Framework::Laravel => "laravel",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zf1" | "zend" => Ok(Framework::Zf1),
            "cakephp" | "cake" => Ok(Framework::CakePhp),
            "laravel" => Ok(Framework::Laravel),
            other => Err(format!("unknown framework: {other}")),
        }
    }
}

/// Legacy class prefix bound to a directory under `application/`.
///
/// Mappings are tried in order, so the list order is the precedence among
/// overlapping directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixMapping {
    pub prefix: String,
    pub dir: String,
}

impl PrefixMapping {
    pub fn new(prefix: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            dir: dir.into(),
        }
    }

    /// The five mappings used when the caller supplies none.
    pub fn defaults() -> Vec<PrefixMapping> {
        vec![
            PrefixMapping::new("Parent_", "parents/"),
            PrefixMapping::new("DbTable_", "dbs/"),
            PrefixMapping::new("Service_", "services/"),
            PrefixMapping::new("Model_", "models/"),
            PrefixMapping::new("Form_", "forms/"),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReferenceKind {
    #[serde(rename = "new")]
    Instantiation,
    #[serde(rename = "extends")]
    Inheritance,
    #[serde(rename = "implements")]
    Implementation,
    #[serde(rename = "static")]
    StaticAccess,
    #[serde(rename = "typehint")]
    TypeHint,
    #[serde(rename = "use")]
    Import,
}

impl ReferenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceKind::Instantiation => "new",
            ReferenceKind::Inheritance => "extends",
            ReferenceKind::Implementation => "implements",
            ReferenceKind::StaticAccess => "static",
            ReferenceKind::TypeHint => "typehint",
            ReferenceKind::Import => "use",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class name used by one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassReference {
    pub class_name: String,
    #[serde(rename = "refType")]
    pub kind: ReferenceKind,
    pub line: usize,
}

impl ClassReference {
    pub fn new(class_name: impl Into<String>, kind: ReferenceKind, line: usize) -> Self {
        Self {
            class_name: class_name.into(),
            kind,
            line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludeKind {
    Require,
    RequireOnce,
    Include,
    IncludeOnce,
}

impl IncludeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IncludeKind::Require => "require",
            IncludeKind::RequireOnce => "require_once",
            IncludeKind::Include => "include",
            IncludeKind::IncludeOnce => "include_once",
        }
    }
}

impl fmt::Display for IncludeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncludeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "require" => Ok(IncludeKind::Require),
            "require_once" => Ok(IncludeKind::RequireOnce),
            "include" => Ok(IncludeKind::Include),
            "include_once" => Ok(IncludeKind::IncludeOnce),
            other => Err(format!("not an include keyword: {other}")),
        }
    }
}

/// A `require`/`include` statement. `resolved` is empty when the path
/// expression could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeReference {
    #[serde(rename = "type")]
    pub kind: IncludeKind,
    pub raw_path: String,
    pub resolved: String,
    pub line: usize,
}

impl IncludeReference {
    pub fn is_resolved(&self) -> bool {
        !self.resolved.is_empty()
    }
}

/// A class dependency of the selection, resolved to a file outside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub class_name: String,
    pub file_path: String,
    #[serde(rename = "refType")]
    pub kind: ReferenceKind,
    pub referenced_by: String,
}

/// An include found in a selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeItem {
    #[serde(flatten)]
    pub include: IncludeReference,
    pub source_file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyResult {
    pub dependencies: Vec<Dependency>,
    pub includes: Vec<IncludeItem>,
}

impl DependencyResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.includes.is_empty()
    }

    /// Includes whose path expression could not be resolved.
    pub fn unresolved_includes(&self) -> impl Iterator<Item = &IncludeItem> {
        self.includes.iter().filter(|item| !item.include.is_resolved())
    }
}
