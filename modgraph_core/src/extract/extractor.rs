use std::fmt;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;

use crate::extract::SpecifierFilter;
use crate::extract::collector::ImportCollector;
use crate::extract::grammar::GrammarProfile;
use crate::fs::{FileSystem, OsFileSystem};
use crate::model::ImportMap;
use crate::resolve::paths::append_suffix;

pub const SUPPORTED_EXTENSIONS: [&str; 4] = [".js", ".jsx", ".ts", ".tsx"];

/// Why a file contributed no imports even though one was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractDiagnostic {
    NoSourceFile { path: PathBuf },
    ReadFailed { path: PathBuf, message: String },
    ParseFailed { path: PathBuf, message: String },
}

impl ExtractDiagnostic {
    pub fn path(&self) -> &Path {
        match self {
            Self::NoSourceFile { path }
            | Self::ReadFailed { path, .. }
            | Self::ParseFailed { path, .. } => path,
        }
    }
}

impl fmt::Display for ExtractDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSourceFile { path } => {
                write!(f, "no source file for {}", path.display())
            }
            Self::ReadFailed { path, message } => {
                write!(f, "failed to read {}: {message}", path.display())
            }
            Self::ParseFailed { path, message } => {
                write!(f, "failed to parse {}: {message}", path.display())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub imports: ImportMap,
    pub diagnostics: Vec<ExtractDiagnostic>,
}

impl Extraction {
    fn degraded(diagnostic: ExtractDiagnostic) -> Self {
        tracing::warn!(
            path = %diagnostic.path().display(),
            cause = %diagnostic,
            "import extraction degraded to empty result"
        );
        Self {
            imports: ImportMap::new(),
            diagnostics: vec![diagnostic],
        }
    }
}

/// Parses one file (or a directory's index file) and collects its import bindings.
#[derive(Debug, Clone, Default)]
pub struct ImportExtractor<F = OsFileSystem> {
    fs: F,
    grammar: GrammarProfile,
}

impl ImportExtractor<OsFileSystem> {
    pub fn new(grammar: GrammarProfile) -> Self {
        Self::with_fs(OsFileSystem, grammar)
    }
}

impl<F: FileSystem> ImportExtractor<F> {
    pub fn with_fs(fs: F, grammar: GrammarProfile) -> Self {
        Self { fs, grammar }
    }

    pub fn grammar(&self) -> GrammarProfile {
        self.grammar
    }

    pub fn extract_imports(&self, file_path: &Path, filter: Option<SpecifierFilter<'_>>) -> ImportMap {
        self.extract(file_path, filter).imports
    }

    /// Never fails: unreadable or unparsable files yield an empty mapping plus a diagnostic.
    pub fn extract(&self, file_path: &Path, filter: Option<SpecifierFilter<'_>>) -> Extraction {
        let is_dir = self.fs.is_dir(file_path);
        let source_file = if is_dir {
            self.directory_index_file(file_path)
        } else {
            self.source_file_for(file_path)
        };
        let Some(source_file) = source_file else {
            return Extraction::degraded(ExtractDiagnostic::NoSourceFile {
                path: file_path.to_path_buf(),
            });
        };

        let base_dir = if is_dir {
            file_path
        } else {
            file_path.parent().unwrap_or_else(|| Path::new(""))
        };
        match self.parse_imports(&source_file, base_dir, filter) {
            Ok(imports) => Extraction {
                imports,
                diagnostics: Vec::new(),
            },
            Err(diagnostic) => Extraction::degraded(diagnostic),
        }
    }

    /// First entry (by name) containing `index` with a supported extension.
    fn directory_index_file(&self, dir: &Path) -> Option<PathBuf> {
        let mut names = self.fs.read_dir_names(dir).ok()?;
        names.sort();
        names
            .into_iter()
            .find(|name| name.contains("index") && has_supported_extension(Path::new(name)))
            .map(|name| dir.join(name))
    }

    fn source_file_for(&self, file_path: &Path) -> Option<PathBuf> {
        if has_supported_extension(file_path) {
            return Some(file_path.to_path_buf());
        }
        // A foreign extension (`.css`, `.svg`) is never parsed as source; only
        // suffixed candidates such as `a.service.ts` are tried.
        let bare = file_path.extension().is_none().then_some("");
        bare.into_iter()
            .chain(SUPPORTED_EXTENSIONS.iter().copied())
            .map(|ext| append_suffix(file_path, ext))
            .find(|candidate| self.fs.is_file(candidate))
    }

    fn parse_imports(
        &self,
        source_file: &Path,
        base_dir: &Path,
        filter: Option<SpecifierFilter<'_>>,
    ) -> Result<ImportMap, ExtractDiagnostic> {
        let source_text =
            self.fs
                .read_to_string(source_file)
                .map_err(|err| ExtractDiagnostic::ReadFailed {
                    path: source_file.to_path_buf(),
                    message: err.to_string(),
                })?;
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, &source_text, self.grammar.source_type()).parse();
        if ret.panicked || !ret.errors.is_empty() {
            let message = ret
                .errors
                .iter()
                .map(|err| err.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ExtractDiagnostic::ParseFailed {
                path: source_file.to_path_buf(),
                message,
            });
        }

        let mut collector = ImportCollector::new(base_dir, filter);
        collector.visit_program(&ret.program);
        Ok(collector.into_imports())
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.trim_start_matches('.') == ext)
        })
}
