//! Path conventions mapping a source file to its class name.
//!
//! Each supported framework lays out classes differently:
//!
//! - **zf1**: `application/<dir>/A/B.php` becomes `<Prefix>A_B`, where
//!   `<dir>` and `<Prefix>` come from the ordered prefix mappings
//! - **cakephp**: `app/**/Name.php` or `src/**/Name.php` becomes `Name`
//! - **laravel**: `app/A/B.php` becomes `App\A\B`
//!
//! When a convention yields nothing the index builder falls back to
//! [`class_from_content`], which looks for a declaration near the top of the
//! file.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::common::read_head_lines;
use crate::core::{Framework, PrefixMapping};

/// Lines inspected by the content fallback.
pub const CONTENT_SCAN_LINES: usize = 100;

pub const ZF1_APPLICATION_DIR: &str = "application/";
pub const LARAVEL_ROOT_NAMESPACE: &str = "App";

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:abstract|final|readonly)\s+)*(?:class|interface|trait)\s+(\w+)")
        .expect("declaration regex")
});

/// Derives a class name from a root-relative path.
pub trait NamingConvention {
    fn derive(&self, relative_path: &str) -> Option<String>;

    fn framework(&self) -> Framework;
}

pub struct LegacyPrefixConvention {
    mappings: Vec<PrefixMapping>,
}

impl LegacyPrefixConvention {
    pub fn new(mappings: Vec<PrefixMapping>) -> Self {
        Self { mappings }
    }
}

impl NamingConvention for LegacyPrefixConvention {
    fn derive(&self, relative_path: &str) -> Option<String> {
        let app_path = strip_source_extension(relative_path).strip_prefix(ZF1_APPLICATION_DIR)?;

        // First matching directory wins; controllers and other unmapped
        // directories fall through to the content fallback.
        self.mappings.iter().find_map(|mapping| {
            let dir = mapping.dir.trim_end_matches('/');
            if dir.is_empty() {
                return None;
            }
            let rest = app_path.strip_prefix(dir)?.strip_prefix('/')?;
            if rest.is_empty() {
                return None;
            }
            Some(format!("{}{}", mapping.prefix, rest.replace('/', "_")))
        })
    }

    fn framework(&self) -> Framework {
        Framework::Zf1
    }
}

pub struct FlatDirectoryConvention;

impl FlatDirectoryConvention {
    const ROOTS: [&'static str; 2] = ["app/", "src/"];
}

impl NamingConvention for FlatDirectoryConvention {
    fn derive(&self, relative_path: &str) -> Option<String> {
        let path = strip_source_extension(relative_path);
        Self::ROOTS.iter().find_map(|root| {
            let rest = path.strip_prefix(root)?;
            rest.rsplit('/')
                .next()
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        })
    }

    fn framework(&self) -> Framework {
        Framework::CakePhp
    }
}

pub struct NamespacedConvention;

impl NamingConvention for NamespacedConvention {
    fn derive(&self, relative_path: &str) -> Option<String> {
        let rest = strip_source_extension(relative_path).strip_prefix("app/")?;
        if rest.is_empty() {
            return None;
        }
        Some(format!("{}\\{}", LARAVEL_ROOT_NAMESPACE, rest.replace('/', "\\")))
    }

    fn framework(&self) -> Framework {
        Framework::Laravel
    }
}

impl Framework {
    /// Path convention for this framework. `mappings` only affect zf1.
    pub fn convention(self, mappings: &[PrefixMapping]) -> Box<dyn NamingConvention + Send + Sync> {
        match self {
            Framework::Zf1 => Box::new(LegacyPrefixConvention::new(mappings.to_vec())),
            Framework::CakePhp => Box::new(FlatDirectoryConvention),
            Framework::Laravel => Box::new(NamespacedConvention),
        }
    }
}

/// First class, interface or trait declared in the first
/// [`CONTENT_SCAN_LINES`] lines of the file. Unreadable files yield `None`.
pub fn class_from_content(file_path: &Path) -> Option<String> {
    let lines = read_head_lines(file_path, CONTENT_SCAN_LINES).ok()?;
    lines.iter().find_map(|line| declared_class(line))
}

/// Name declared on one line, if the line opens a type declaration.
pub fn declared_class(line: &str) -> Option<String> {
    DECLARATION_RE
        .captures(line)
        .map(|caps| caps[1].to_string())
}

fn strip_source_extension(path: &str) -> &str {
    match path.rsplit_once('.') {
        Some((stem, ext)) if ext.eq_ignore_ascii_case("php") && !stem.ends_with('/') => stem,
        _ => path,
    }
}
