use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ALIASES: [(&str, &str); 1] = [("@/", "src/")];

/// Ordered prefix -> replacement table.
///
/// Iteration follows insertion order; overriding an existing prefix keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasMap(IndexMap<String, String>);

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        DEFAULT_ALIASES.into_iter().collect()
    }

    pub fn insert(&mut self, prefix: impl Into<String>, target: impl Into<String>) {
        self.0.insert(prefix.into(), target.into());
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Defaults first, then `overrides` layered on top.
    pub fn merged_over_defaults(overrides: Option<&AliasMap>) -> Self {
        let mut merged = Self::with_defaults();
        if let Some(overrides) = overrides {
            overrides
                .iter()
                .for_each(|(prefix, target)| merged.insert(prefix, target));
        }
        merged
    }

    /// Rewrites `specifier` with every matching prefix; the last match wins.
    pub fn rewrite(&self, specifier: &str) -> Option<String> {
        self.iter()
            .filter_map(|(prefix, target)| {
                specifier
                    .strip_prefix(prefix)
                    .map(|rest| format!("{target}{rest}"))
            })
            .last()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
