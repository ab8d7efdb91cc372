use phpslice::core::{
    Dependency, DependencyResult, IncludeItem, IncludeKind, IncludeReference, ReferenceKind,
};
use phpslice::formatters::ManifestFormatter;

fn dependency(class_name: &str, file_path: &str, referenced_by: &str) -> Dependency {
    Dependency {
        class_name: class_name.to_string(),
        file_path: file_path.to_string(),
        kind: ReferenceKind::Instantiation,
        referenced_by: referenced_by.to_string(),
    }
}

fn include(raw_path: &str, resolved: &str, line: usize, source_file: &str) -> IncludeItem {
    IncludeItem {
        include: IncludeReference {
            kind: IncludeKind::RequireOnce,
            raw_path: raw_path.to_string(),
            resolved: resolved.to_string(),
            line,
        },
        source_file: source_file.to_string(),
    }
}

#[test]
fn slice_merges_selection_dependencies_and_includes() {
    let selected = vec![
        "application/controllers/IndexController.php".to_string(),
        "application/Bootstrap.php".to_string(),
    ];
    let result = DependencyResult {
        dependencies: vec![
            dependency("Model_User", "application/models/User.php", "application/controllers/IndexController.php"),
            dependency("Form_Login", "application/forms/Login.php", "application/controllers/IndexController.php"),
        ],
        includes: vec![
            include("'../library/Acl.php'", "library/Acl.php", 2, "application/Bootstrap.php"),
            // already a dependency
            include("'models/User.php'", "application/models/User.php", 3, "application/Bootstrap.php"),
            include("$dynamic", "", 4, "application/Bootstrap.php"),
        ],
    };

    let slice = ManifestFormatter::new().slice(&selected, &result);
    assert_eq!(
        slice,
        vec![
            "application/Bootstrap.php",
            "application/controllers/IndexController.php",
            "application/forms/Login.php",
            "application/models/User.php",
            "library/Acl.php",
        ]
    );
}

#[test]
fn unresolved_includes_are_listed_as_comments() {
    let selected = vec!["index.php".to_string()];
    let result = DependencyResult {
        dependencies: Vec::new(),
        includes: vec![include("$base . '/x.php'", "", 7, "index.php")],
    };

    let out = ManifestFormatter::new().format(&selected, &result);
    assert_eq!(
        out,
        "index.php\n# unresolved includes\n# index.php:7 require_once $base . '/x.php'\n"
    );

    let quiet = ManifestFormatter::new()
        .with_unresolved(false)
        .format(&selected, &result);
    assert_eq!(quiet, "index.php\n");
}
