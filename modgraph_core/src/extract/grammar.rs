use oxc_span::SourceType;
use serde::{Deserialize, Serialize};

/// Grammar every extracted file is parsed with, regardless of its extension.
///
/// Sources are always parsed as modules and decorators are always accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrammarProfile {
    pub typescript: bool,
    pub jsx: bool,
}

impl Default for GrammarProfile {
    fn default() -> Self {
        Self {
            typescript: true,
            jsx: true,
        }
    }
}

impl GrammarProfile {
    pub fn source_type(self) -> SourceType {
        SourceType::default()
            .with_module(true)
            .with_typescript(self.typescript)
            .with_jsx(self.jsx)
    }
}
