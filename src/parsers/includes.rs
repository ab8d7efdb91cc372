use anyhow::Result;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::common::{clean_path, is_comment_line, normalize_relative, read_source};
use crate::core::scanner::relative_slash_path;
use crate::core::{IncludeKind, IncludeReference};

/// Subdirectory `APPLICATION_PATH` points at in legacy projects.
pub const APPLICATION_DIR: &str = "application";

static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(require_once|include_once|require|include)\b\s*\(?\s*(.+?)\s*\)?\s*;")
        .expect("include regex")
});
static APPLICATION_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^APPLICATION_PATH\s*\.\s*['"]([^'"$]+)['"]$"#).expect("APPLICATION_PATH regex")
});
static FILE_DIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:dirname\s*\(\s*__FILE__\s*\)|__DIR__)\s*\.\s*['"]([^'"$]+)['"]$"#)
        .expect("file directory regex")
});
static STRING_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^['"]([^'"$]+)['"]$"#).expect("string literal regex"));

/// Read a file and extract its include statements. `file_path` and
/// `project_root` must both be absolute (or both relative to the same base).
pub fn extract_includes(file_path: &Path, project_root: &Path) -> Result<Vec<IncludeReference>> {
    let source = read_source(file_path)?;
    let file_dir = file_path.parent().unwrap_or(project_root);
    Ok(extract_includes_from_source(&source, file_dir, project_root))
}

pub fn extract_includes_from_source(
    source: &str,
    file_dir: &Path,
    project_root: &Path,
) -> Vec<IncludeReference> {
    let mut refs = Vec::new();

    for (index, line) in source.lines().enumerate() {
        if is_comment_line(line) {
            continue;
        }
        let Some(caps) = INCLUDE_RE.captures(line) else {
            continue;
        };
        let Ok(kind) = caps[1].parse::<IncludeKind>() else {
            continue;
        };
        let raw_path = caps[2].trim().to_string();
        let resolved = resolve_include_path(&raw_path, file_dir, project_root);

        refs.push(IncludeReference {
            kind,
            raw_path,
            resolved,
            line: index + 1,
        });
    }

    refs
}

/// Best-effort resolution of an include expression to a root-relative path.
/// Computed expressions resolve to the empty string; each form must span the
/// whole expression, so a trailing `. $name` concatenation is unresolved.
pub fn resolve_include_path(raw_path: &str, file_dir: &Path, project_root: &Path) -> String {
    let raw_path = raw_path.trim();
    resolve_application_path(raw_path)
        .or_else(|| resolve_file_dir(raw_path, file_dir, project_root))
        .or_else(|| resolve_literal(raw_path, file_dir, project_root))
        .unwrap_or_default()
}

/// `APPLICATION_PATH . '/models/Car.php'`
fn resolve_application_path(raw_path: &str) -> Option<String> {
    let caps = APPLICATION_PATH_RE.captures(raw_path)?;
    let rest = caps[1].trim_start_matches('/');
    normalize_relative(&format!("{APPLICATION_DIR}/{rest}"))
}

/// `dirname(__FILE__) . '/../config.php'` or `__DIR__ . '/lib.php'`
fn resolve_file_dir(raw_path: &str, file_dir: &Path, project_root: &Path) -> Option<String> {
    let caps = FILE_DIR_RE.captures(raw_path)?;
    let target = clean_path(&file_dir.join(caps[1].trim_start_matches(['/', '\\'])));
    relative_slash_path(&clean_path(project_root), &target)
}

/// `'lib/helpers.php'`; must exist relative to the including file or the root.
fn resolve_literal(raw_path: &str, file_dir: &Path, project_root: &Path) -> Option<String> {
    let caps = STRING_LITERAL_RE.captures(raw_path)?;
    let literal = &caps[1];
    if !(literal.ends_with(".php") || literal.contains('/')) {
        return None;
    }

    let root = clean_path(project_root);
    [file_dir, project_root].iter().find_map(|base| {
        let candidate = clean_path(&base.join(literal));
        if candidate.is_file() {
            relative_slash_path(&root, &candidate)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn root() -> PathBuf {
        PathBuf::from("/srv/legacy")
    }

    #[test]
    fn application_path_resolves_under_application_dir() {
        let dir = root().join("public");
        assert_eq!(
            resolve_include_path("APPLICATION_PATH . '/models/Car.php'", &dir, &root()),
            "application/models/Car.php"
        );
        assert_eq!(
            resolve_include_path("APPLICATION_PATH . '/../library/Util.php'", &dir, &root()),
            "library/Util.php"
        );
    }

    #[test]
    fn file_dir_forms_are_equivalent() {
        let dir = root().join("app").join("controllers");
        assert_eq!(
            resolve_include_path("dirname(__FILE__) . '/../config.php'", &dir, &root()),
            "app/config.php"
        );
        assert_eq!(
            resolve_include_path("__DIR__ . '/../config.php'", &dir, &root()),
            "app/config.php"
        );
    }

    #[test]
    fn file_dir_escaping_root_is_unresolved() {
        let dir = root().join("app");
        assert_eq!(
            resolve_include_path("__DIR__ . '/../../etc/passwd.php'", &dir, &root()),
            ""
        );
    }

    #[test]
    fn dynamic_expressions_are_unresolved() {
        let dir = root().join("app");
        assert_eq!(resolve_include_path("$base . '/x.php'", &dir, &root()), "");
        assert_eq!(resolve_include_path("$file", &dir, &root()), "");
        assert_eq!(resolve_include_path("'lib/' . $name . '.php'", &dir, &root()), "");
        assert_eq!(
            resolve_include_path("APPLICATION_PATH . '/views/' . $name . '.php'", &dir, &root()),
            ""
        );
        assert_eq!(resolve_include_path("__DIR__ . '/' . $file", &dir, &root()), "");
    }

    #[test]
    fn include_statements_capture_kind_and_expression() {
        let source = "<?php\nrequire_once('a.php');\ninclude \"b/c.php\";\n// require 'skip.php';\n$this->include_path = 1;\n";
        let refs = extract_includes_from_source(source, &root(), &root());
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].kind, IncludeKind::RequireOnce);
        assert_eq!(refs[0].raw_path, "'a.php'");
        assert_eq!(refs[0].line, 2);
        assert_eq!(refs[1].kind, IncludeKind::Include);
        assert_eq!(refs[1].raw_path, "\"b/c.php\"");
        assert_eq!(refs[1].line, 3);
    }
}
