use phpslice::core::{FileScanner, Framework, IndexBuilder, PrefixMapping};
use std::fs;
use std::path::Path;

fn write<P: AsRef<Path>>(p: P, content: &str) {
    let p = p.as_ref();
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, content).unwrap();
}

fn build(root: &Path, framework: Framework, mappings: Vec<PrefixMapping>) -> phpslice::ClassIndex {
    let tree = FileScanner::new().scan_directory(root).unwrap();
    IndexBuilder::new(framework, mappings).build(&tree)
}

#[test]
fn zf1_index_uses_prefix_mappings() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root.join("application/models/Car/Part.php"), "<?php\nclass Model_Car_Part {}\n");
    write(root.join("application/services/Billing.php"), "<?php\n");

    let index = build(
        root,
        Framework::Zf1,
        vec![
            PrefixMapping::new("Model_", "models/"),
            PrefixMapping::new("Service_", "services/"),
        ],
    );

    assert_eq!(index.file_for("Model_Car_Part"), Some("application/models/Car/Part.php"));
    assert_eq!(index.file_for("Service_Billing"), Some("application/services/Billing.php"));
    assert_eq!(
        index.class_for("application/models/Car/Part.php"),
        Some("Model_Car_Part")
    );
}

#[test]
fn unmapped_files_fall_back_to_declarations() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(
        root.join("application/controllers/V3/CustomersController.php"),
        "<?php\n/**\n * Customers\n */\nclass V3_CustomersController extends Zend_Controller_Action\n{\n}\n",
    );
    write(
        root.join("library/Acme/Payable.php"),
        "<?php\n\ninterface Acme_Payable\n{\n}\n",
    );
    write(
        root.join("library/Acme/Loggable.php"),
        "<?php\n  abstract  class Acme_Loggable {}\n",
    );
    write(root.join("public/index.php"), "<?php\n$app->run();\n");

    let index = build(root, Framework::Zf1, PrefixMapping::defaults());

    assert_eq!(
        index.file_for("V3_CustomersController"),
        Some("application/controllers/V3/CustomersController.php")
    );
    assert_eq!(index.file_for("Acme_Payable"), Some("library/Acme/Payable.php"));
    assert_eq!(index.file_for("Acme_Loggable"), Some("library/Acme/Loggable.php"));
    assert_eq!(index.class_for("public/index.php"), None);
    assert_eq!(index.len(), 3);
}

#[test]
fn content_fallback_only_reads_the_first_hundred_lines() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    let mut late = String::from("<?php\n");
    for _ in 0..120 {
        late.push_str("// filler\n");
    }
    late.push_str("class TooLate {}\n");
    write(root.join("lib/TooLate.php"), &late);

    let index = build(root, Framework::Zf1, PrefixMapping::defaults());
    assert!(index.is_empty());
}

#[test]
fn cakephp_index_uses_base_names() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root.join("app/Model/Post.php"), "<?php\n");
    write(root.join("app/Controller/PostsController.php"), "<?php\n");
    write(root.join("lib/Cake/Core/App.php"), "<?php\nclass App {}\n");

    let index = build(root, Framework::CakePhp, Vec::new());

    assert_eq!(index.file_for("Post"), Some("app/Model/Post.php"));
    assert_eq!(
        index.file_for("PostsController"),
        Some("app/Controller/PostsController.php")
    );
    assert_eq!(index.file_for("App"), Some("lib/Cake/Core/App.php"));
}

#[test]
fn laravel_index_uses_namespaces() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root.join("app/Models/User.php"), "<?php\n");
    write(root.join("app/Http/Controllers/UserController.php"), "<?php\n");

    let index = build(root, Framework::Laravel, Vec::new());

    assert_eq!(index.file_for("App\\Models\\User"), Some("app/Models/User.php"));
    assert_eq!(
        index.file_for("App\\Http\\Controllers\\UserController"),
        Some("app/Http/Controllers/UserController.php")
    );
}

#[test]
fn name_collisions_keep_the_last_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root.join("a/Helper.php"), "<?php\nclass Helper {}\n");
    write(root.join("b/Helper.php"), "<?php\nclass Helper {}\n");

    let index = build(root, Framework::Zf1, PrefixMapping::defaults());

    assert_eq!(index.file_for("Helper"), Some("b/Helper.php"));
    assert_eq!(index.class_for("a/Helper.php"), Some("Helper"));
    assert_eq!(index.class_for("b/Helper.php"), Some("Helper"));
}

#[test]
fn rebuilding_yields_an_equal_index() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root.join("application/models/Car.php"), "<?php\n");
    write(root.join("application/forms/Login.php"), "<?php\n");
    write(root.join("library/Util.php"), "<?php\nfinal class Util {}\n");

    let first = build(root, Framework::Zf1, PrefixMapping::defaults());
    let second = build(root, Framework::Zf1, PrefixMapping::defaults());
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}
