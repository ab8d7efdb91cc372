use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::common::{is_comment_line, is_denied_class};
use super::conventions::LARAVEL_ROOT_NAMESPACE;
use super::ReferenceExtractor;
use crate::core::{ClassReference, ReferenceKind};

static NEW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bnew\s+([A-Z]\w+)").expect("instantiation regex"));
static EXTENDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bextends\s+([A-Z]\w+)").expect("extends regex"));
static IMPLEMENTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bimplements\s+([\w\\]+(?:\s*,\s*[\w\\]+)*)").expect("implements regex")
});
static STATIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]\w+)::").expect("static access regex"));
static PARAM_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfunction\b[^(]*\(([^)]*)").expect("parameter list regex"));
static TYPE_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]\w+)\s+&?(?:\.\.\.)?\$").expect("type hint regex")
});
static USE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^use\s+({}\\[\w\\]+)", LARAVEL_ROOT_NAMESPACE)).expect("use regex")
});
static CAKE_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"App::import\s*\(\s*['"](\w+)['"]\s*,\s*['"](\w+)['"]"#).expect("App::import regex")
});
static CAKE_USES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"App::uses\s*\(\s*['"](\w+)['"]"#).expect("App::uses regex")
});

/// Scope-resolution targets that name the current class hierarchy.
const PSEUDO_SELECTORS: [&str; 3] = ["self", "static", "parent"];

/// One syntactic pattern denoting class usage.
///
/// Families return raw matches; denylist filtering and deduplication happen
/// in [`PatternExtractor`].
pub trait PatternFamily: Send + Sync {
    fn kind(&self) -> ReferenceKind;

    fn scan_line(&self, line: &str) -> Vec<String>;
}

/// `new Foo`, `new Model_Car_Part`
pub struct InstantiationPattern;

impl PatternFamily for InstantiationPattern {
    fn kind(&self) -> ReferenceKind {
        ReferenceKind::Instantiation
    }

    fn scan_line(&self, line: &str) -> Vec<String> {
        NEW_RE
            .captures_iter(line)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

/// `extends Foo`; one per line.
pub struct InheritancePattern;

impl PatternFamily for InheritancePattern {
    fn kind(&self) -> ReferenceKind {
        ReferenceKind::Inheritance
    }

    fn scan_line(&self, line: &str) -> Vec<String> {
        EXTENDS_RE
            .captures(line)
            .map(|caps| vec![caps[1].to_string()])
            .unwrap_or_default()
    }
}

/// `implements A, B, \C`
pub struct ImplementsPattern;

impl PatternFamily for ImplementsPattern {
    fn kind(&self) -> ReferenceKind {
        ReferenceKind::Implementation
    }

    fn scan_line(&self, line: &str) -> Vec<String> {
        let Some(caps) = IMPLEMENTS_RE.captures(line) else {
            return Vec::new();
        };
        caps[1]
            .split(',')
            .map(|name| name.trim().trim_start_matches('\\'))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// `Foo::bar()`, `Foo::CONSTANT`
pub struct StaticAccessPattern;

impl PatternFamily for StaticAccessPattern {
    fn kind(&self) -> ReferenceKind {
        ReferenceKind::StaticAccess
    }

    fn scan_line(&self, line: &str) -> Vec<String> {
        STATIC_RE
            .captures_iter(line)
            .map(|caps| caps[1].to_string())
            .filter(|name| !PSEUDO_SELECTORS.contains(&name.as_str()))
            .collect()
    }
}

/// `function save(Model_Car $car, ?Logger $log)`; only parameter lists that
/// open on the same line as `function`.
pub struct TypeHintPattern;

impl PatternFamily for TypeHintPattern {
    fn kind(&self) -> ReferenceKind {
        ReferenceKind::TypeHint
    }

    fn scan_line(&self, line: &str) -> Vec<String> {
        PARAM_LIST_RE
            .captures_iter(line)
            .flat_map(|params| {
                let params = params.get(1).map(|m| m.as_str()).unwrap_or("");
                TYPE_HINT_RE
                    .captures_iter(params)
                    .map(|caps| caps[1].to_string())
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// `use App\Models\User;`, `App::import('Model', 'Post')`, `App::uses('Post', 'Model')`
pub struct ImportPattern;

impl PatternFamily for ImportPattern {
    fn kind(&self) -> ReferenceKind {
        ReferenceKind::Import
    }

    fn scan_line(&self, line: &str) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(caps) = USE_RE.captures(line.trim()) {
            names.push(caps[1].trim_end_matches('\\').to_string());
        }
        names.extend(CAKE_USES_RE.captures_iter(line).map(|caps| caps[1].to_string()));
        names.extend(CAKE_IMPORT_RE.captures_iter(line).map(|caps| caps[2].to_string()));
        names
    }
}

/// Regex-backed extractor running every pattern family over each
/// non-comment line.
pub struct PatternExtractor {
    families: Vec<Box<dyn PatternFamily>>,
}

impl PatternExtractor {
    pub fn new() -> Self {
        Self {
            families: vec![
                Box::new(InstantiationPattern),
                Box::new(InheritancePattern),
                Box::new(ImplementsPattern),
                Box::new(StaticAccessPattern),
                Box::new(TypeHintPattern),
                Box::new(ImportPattern),
            ],
        }
    }

    /// Extractor restricted to the given families, in order.
    pub fn with_families(families: Vec<Box<dyn PatternFamily>>) -> Self {
        Self { families }
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceExtractor for PatternExtractor {
    fn extract(&self, source: &str) -> Vec<ClassReference> {
        let mut refs = Vec::new();
        let mut seen: HashSet<(String, ReferenceKind)> = HashSet::new();

        for (index, line) in source.lines().enumerate() {
            if is_comment_line(line) {
                continue;
            }
            let line_number = index + 1;

            for family in &self.families {
                let kind = family.kind();
                for name in family.scan_line(line) {
                    let name = name.trim();
                    if name.is_empty() || is_denied_class(name) {
                        continue;
                    }
                    if seen.insert((name.to_string(), kind)) {
                        refs.push(ClassReference::new(name, kind, line_number));
                    }
                }
            }
        }

        refs
    }

    fn backend_name(&self) -> &str {
        "pattern"
    }
}
