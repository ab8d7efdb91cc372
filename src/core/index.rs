use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::model::{Framework, PrefixMapping};
use super::scanner::ScannedTree;
use crate::parsers::class_from_content;

/// Class name <-> file lookup for one scan.
///
/// A name maps to one file (the last file deriving it wins); each file
/// records at most one name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassIndex {
    pub class_to_file: BTreeMap<String, String>,
    pub file_to_class: BTreeMap<String, String>,
}

impl ClassIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class_name: String, relative_path: String) {
        self.file_to_class
            .insert(relative_path.clone(), class_name.clone());
        self.class_to_file.insert(class_name, relative_path);
    }

    pub fn file_for(&self, class_name: &str) -> Option<&str> {
        self.class_to_file.get(class_name).map(String::as_str)
    }

    pub fn class_for(&self, relative_path: &str) -> Option<&str> {
        self.file_to_class.get(relative_path).map(String::as_str)
    }

    /// Number of distinct class names.
    pub fn len(&self) -> usize {
        self.class_to_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.class_to_file.is_empty()
    }
}

pub struct IndexBuilder {
    framework: Framework,
    mappings: Vec<PrefixMapping>,
}

impl IndexBuilder {
    pub fn new(framework: Framework, mappings: Vec<PrefixMapping>) -> Self {
        Self { framework, mappings }
    }

    /// Build a fresh index from a scanned tree.
    pub fn build(&self, tree: &ScannedTree) -> ClassIndex {
        let convention = self.framework.convention(&self.mappings);
        let mut index = ClassIndex::new();
        let mut from_content = 0usize;

        for file in &tree.files {
            let class_name = match convention.derive(&file.relative) {
                Some(name) => Some(name),
                None => {
                    let name = class_from_content(&file.absolute);
                    if name.is_some() {
                        from_content += 1;
                    }
                    name
                }
            };

            match class_name {
                Some(name) => index.insert(name, file.relative.clone()),
                None => debug!(file = %file.relative, "no class name derived"),
            }
        }

        info!(
            framework = %convention.framework(),
            classes = index.len(),
            from_content,
            "built class index"
        );
        index
    }
}
