use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::CliError;

/// Include/exclude globs over bare specifiers.
///
/// With no include globs every specifier is included; excludes always win.
#[derive(Debug, Clone, Default)]
pub struct SpecifierGlobs {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl SpecifierGlobs {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, CliError> {
        Ok(Self {
            include: build_globset(include)?,
            exclude: build_globset(exclude)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }

    pub fn accepts(&self, specifier: &str) -> bool {
        let included = self
            .include
            .as_ref()
            .is_none_or(|set| set.is_match(specifier));
        let excluded = self
            .exclude
            .as_ref()
            .is_some_and(|set| set.is_match(specifier));
        included && !excluded
    }
}

fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, CliError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|err| CliError::InvalidGlob {
            pattern: pattern.clone(),
            message: err.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map(Some).map_err(|err| CliError::InvalidGlob {
        pattern: patterns.join(","),
        message: err.to_string(),
    })
}
