use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Component, Path, PathBuf};

/// Built-in PHP classes and type keywords that never resolve to project files.
const BUILTIN_CLASSES: &[&str] = &[
    "self", "static", "parent",
    "stdClass", "Exception", "RuntimeException", "InvalidArgumentException", "LogicException",
    "DateTime", "DateTimeImmutable", "DateInterval",
    "ArrayObject", "ArrayIterator", "Iterator", "Countable", "Serializable", "JsonSerializable",
    "Closure", "Generator", "Throwable", "Error", "TypeError", "ValueError",
    "PDO", "PDOStatement", "PDOException",
    "SplFileInfo", "SplFileObject", "SplHeap", "SplStack", "SplQueue", "SplPriorityQueue",
    "DOMDocument", "DOMElement", "DOMNode",
    "SimpleXMLElement", "XMLReader", "XMLWriter",
    "ReflectionClass", "ReflectionMethod",
    "SoapClient", "SoapServer",
    "mysqli", "mysqli_result",
    "null", "true", "false",
    "int", "float", "string", "bool", "array", "object", "void", "mixed",
    "callable", "iterable", "never",
];

/// Vendor framework namespaces; classes under these ship outside the project.
const FRAMEWORK_PREFIXES: &[&str] = &["Zend_", "ZendX_", "Cake", "Illuminate\\", "Symfony\\", "PHPUnit"];

const COMMENT_MARKERS: &[&str] = &["//", "/*", "*"];

/// True for built-in types and known framework classes.
pub fn is_denied_class(name: &str) -> bool {
    BUILTIN_CLASSES.contains(&name)
        || FRAMEWORK_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
}

/// Line-prefix comment check; multi-line comment bodies only count when each
/// line starts with a marker.
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim();
    COMMENT_MARKERS
        .iter()
        .any(|marker| trimmed.starts_with(marker))
}

/// Read a whole source file. Legacy trees carry Latin-1 files, so invalid
/// UTF-8 is replaced rather than rejected.
pub fn read_source(file_path: &Path) -> Result<String> {
    let file = File::open(file_path)
        .with_context(|| format!("failed to open {}", file_path.display()))?;
    let file_size = file.metadata().map(|m| m.len() as usize).unwrap_or(0);

    let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
    let mut bytes = Vec::with_capacity(file_size);
    reader
        .read_to_end(&mut bytes)
        .with_context(|| format!("failed to read {}", file_path.display()))?;

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Read at most `max_lines` lines from the start of a file.
pub fn read_head_lines(file_path: &Path, max_lines: usize) -> Result<Vec<String>> {
    let file = File::open(file_path)
        .with_context(|| format!("failed to open {}", file_path.display()))?;
    let reader = BufReader::new(file);

    let mut lines = Vec::with_capacity(max_lines);
    for chunk in reader.split(b'\n').take(max_lines) {
        let chunk = chunk.with_context(|| format!("failed to read {}", file_path.display()))?;
        lines.push(String::from_utf8_lossy(&chunk).trim_end_matches('\r').to_string());
    }
    Ok(lines)
}

/// Lexically normalize a `/`-separated relative path, folding `.` and `..`.
/// Returns `None` when the path climbs above its starting point.
pub fn normalize_relative(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Lexically normalize an absolute or relative filesystem path.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push("..");
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denylist_covers_builtins_and_framework_prefixes() {
        assert!(is_denied_class("Exception"));
        assert!(is_denied_class("stdClass"));
        assert!(is_denied_class("Zend_Db_Table_Abstract"));
        assert!(is_denied_class("Illuminate\\Support\\Str"));
        assert!(is_denied_class("CakeRequest"));
        assert!(!is_denied_class("Model_Car"));
        assert!(!is_denied_class("Carrier"));
    }

    #[test]
    fn comment_lines_are_detected_after_indentation() {
        assert!(is_comment_line("   // new Foo()"));
        assert!(is_comment_line("\t* @param Foo $foo"));
        assert!(is_comment_line("/* Foo::bar() */"));
        assert!(!is_comment_line("$x = new Foo(); // trailing"));
    }

    #[test]
    fn normalize_folds_dot_segments() {
        assert_eq!(
            normalize_relative("app/controllers/../config.php").as_deref(),
            Some("app/config.php")
        );
        assert_eq!(
            normalize_relative("./application//models/Car.php").as_deref(),
            Some("application/models/Car.php")
        );
        assert_eq!(normalize_relative("../outside.php"), None);
    }

    #[test]
    fn clean_path_folds_parent_components() {
        assert_eq!(
            clean_path(Path::new("/srv/app/controllers/../config.php")),
            PathBuf::from("/srv/app/config.php")
        );
    }
}
