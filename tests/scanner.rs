use phpslice::core::scanner::{FileScanner, EXCLUDED_DIRS};
use phpslice::ScanError;
use std::fs;
use std::path::Path;

fn touch<P: AsRef<Path>>(p: P) {
    let p = p.as_ref();
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, "<?php\n").unwrap();
}

#[test]
fn scanner_collects_php_files_with_slash_paths() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();

    touch(root.join("index.php"));
    touch(root.join("application/models/Car/Part.php"));
    touch(root.join("application/Bootstrap.PHP"));
    touch(root.join("public/readme.txt")); // ignored
    touch(root.join("public/style.css")); // ignored

    let tree = FileScanner::new().scan_directory(root).unwrap();

    assert_eq!(
        tree.relative_paths(),
        vec![
            "application/Bootstrap.PHP",
            "application/models/Car/Part.php",
            "index.php",
        ]
    );
    assert!(tree.root.is_absolute());
    for file in &tree.files {
        assert!(file.absolute.is_file());
        assert!(file.absolute.starts_with(&tree.root));
    }
}

#[test]
fn scanner_never_descends_excluded_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();

    touch(root.join("app/Model/Post.php"));
    for excluded in EXCLUDED_DIRS {
        touch(root.join(excluded).join("Lib.php"));
        touch(root.join("app").join(excluded).join("deep/Nested.php"));
    }

    let tree = FileScanner::new().scan_directory(root).unwrap();

    assert_eq!(tree.relative_paths(), vec!["app/Model/Post.php"]);
    for path in tree.relative_paths() {
        for segment in path.split('/') {
            assert!(!EXCLUDED_DIRS.contains(&segment), "{path} contains {segment}");
        }
    }
}

#[test]
fn rescanning_is_deterministic() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    for name in ["b.php", "a.php", "z/c.php", "m/n/o.php"] {
        touch(root.join(name));
    }

    let scanner = FileScanner::new();
    let first = scanner.scan_directory(root).unwrap();
    let second = scanner.scan_directory(root).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_root_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = FileScanner::new().scan_directory(&missing).unwrap_err();
    assert!(matches!(err, ScanError::RootUnreachable { .. }));
}

#[test]
fn file_root_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("index.php");
    touch(&file);

    let err = FileScanner::new().scan_directory(&file).unwrap_err();
    assert!(matches!(err, ScanError::NotADirectory { .. }));
}

#[cfg(unix)]
#[test]
fn symlinked_files_are_listed_but_linked_dirs_are_not_walked() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    let shared = tempfile::TempDir::new().unwrap();
    touch(shared.path().join("Shared.php"));
    touch(shared.path().join("lib/Deep.php"));

    touch(root.join("app/Local.php"));
    symlink(shared.path().join("Shared.php"), root.join("app/Shared.php")).unwrap();
    symlink(shared.path().join("lib"), root.join("app/lib")).unwrap();

    let tree = FileScanner::new().scan_directory(root).unwrap();

    assert_eq!(tree.relative_paths(), vec!["app/Local.php", "app/Shared.php"]);
    assert!(tree.files[1].absolute.starts_with(&tree.root));
}
