use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Local binding name -> descriptor, for one file.
pub type ImportMap = BTreeMap<String, ImportDescriptor>;

/// Local binding name -> node, for one level of the dependency tree.
pub type DependencyMap = BTreeMap<String, DependencyNode>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportKind {
    Value,
    Type,
}

/// One locally-bound import identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDescriptor {
    /// Absolute path for relative specifiers, the raw specifier otherwise.
    pub id: String,
    /// Specifier exactly as written.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_kind: Option<ImportKind>,
    /// `default`, the imported member name, or absent for namespace imports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_name: Option<String>,
}

impl ImportDescriptor {
    pub fn is_relative(&self) -> bool {
        is_relative_specifier(&self.source)
    }

    pub fn is_data_only(&self) -> bool {
        self.id.ends_with(".json")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    #[serde(flatten)]
    pub descriptor: ImportDescriptor,
    /// Present only when the target was expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyMap>,
}

impl DependencyNode {
    pub fn leaf(descriptor: ImportDescriptor) -> Self {
        Self {
            descriptor,
            dependencies: None,
        }
    }
}

pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with('.')
}
