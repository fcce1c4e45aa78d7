use std::path::{Path, PathBuf};

use crate::fs::{FileSystem, OsFileSystem};
use crate::model::is_relative_specifier;
use crate::resolve::alias::AliasMap;
use crate::resolve::paths::{append_suffix, normalize_lexically};

pub const RESOLVE_EXTENSIONS: [&str; 6] = ["", ".js", ".jsx", ".ts", ".tsx", ".json"];

/// File stems treated as the project's routing configuration.
pub const ROUTES_CONFIG_NAMES: [&str; 1] = ["routes"];

/// Specifiers starting with this marker bypass the routing-config override.
pub const ALIAS_MARKER: char = '@';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Probed in order after the candidate path is built.
    pub extensions: Vec<String>,
    pub routes_config_names: Vec<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            extensions: RESOLVE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            routes_config_names: ROUTES_CONFIG_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Project-aware specifier resolution.
#[derive(Debug, Clone, Default)]
pub struct PathResolver<F = OsFileSystem> {
    fs: F,
    options: ResolverOptions,
}

impl PathResolver<OsFileSystem> {
    pub fn new(options: ResolverOptions) -> Self {
        Self::with_fs(OsFileSystem, options)
    }
}

impl<F: FileSystem> PathResolver<F> {
    pub fn with_fs(fs: F, options: ResolverOptions) -> Self {
        Self { fs, options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolves `import_path` as written in `importer` to an existing file.
    ///
    /// `None` is the normal "not found" outcome, not a failure.
    pub fn resolve(
        &self,
        root_dir: &Path,
        importer: &Path,
        import_path: &str,
        aliases: Option<&AliasMap>,
    ) -> Option<PathBuf> {
        let candidate = normalize_lexically(&self.candidate_path(
            root_dir,
            importer,
            import_path,
            aliases,
        ));
        let candidate = if self.fs.is_dir(&candidate) {
            candidate.join("index")
        } else {
            candidate
        };
        self.probe(&candidate)
    }

    fn candidate_path(
        &self,
        root_dir: &Path,
        importer: &Path,
        import_path: &str,
        aliases: Option<&AliasMap>,
    ) -> PathBuf {
        if self.is_routes_config(importer) && !import_path.starts_with(ALIAS_MARKER) {
            return root_dir.join("src").join("pages").join(import_path);
        }
        if is_relative_specifier(import_path) {
            // Config-adjacent files resolve from the directory above their own.
            let scope = importer
                .parent()
                .and_then(Path::parent)
                .unwrap_or(root_dir);
            return scope.join(import_path);
        }
        let default_target = if import_path.starts_with("src") {
            root_dir.join(import_path)
        } else {
            root_dir.join("src").join(import_path)
        };
        AliasMap::merged_over_defaults(aliases)
            .rewrite(import_path)
            .map(|rewritten| root_dir.join(rewritten))
            .unwrap_or(default_target)
    }

    fn is_routes_config(&self, importer: &Path) -> bool {
        importer
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| {
                self.options
                    .routes_config_names
                    .iter()
                    .any(|name| name == stem)
            })
    }

    fn probe(&self, base: &Path) -> Option<PathBuf> {
        self.options
            .extensions
            .iter()
            .map(|ext| append_suffix(base, ext))
            .find(|candidate| self.fs.is_file(candidate))
    }
}
