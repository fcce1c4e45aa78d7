use std::path::Path;

use crate::error::ModgraphError;
use crate::fs::FileSystem;
use crate::model::is_relative_specifier;
use crate::resolve::paths::{append_suffix, normalize_lexically};

pub const READ_EXTENSIONS: [&str; 6] = [".js", ".jsx", ".ts", ".tsx", ".json", ".txt"];

pub const RELATIVE_READ_EXTENSIONS: [&str; 5] = [".js", ".jsx", ".ts", ".tsx", ".json"];

/// Reads the first of `base + ext` that exists, in `extensions` order.
///
/// A base that already mentions one of the candidate extensions is read as-is.
pub fn read_file_with_extensions<F: FileSystem>(
    fs: &F,
    base: &Path,
    extensions: &[&str],
) -> Result<String, ModgraphError> {
    let base_text = base.to_string_lossy();
    let already_suffixed = extensions.iter().any(|ext| base_text.contains(ext));
    let candidates = if already_suffixed {
        vec![base.to_path_buf()]
    } else {
        extensions
            .iter()
            .map(|ext| append_suffix(base, ext))
            .collect::<Vec<_>>()
    };
    candidates
        .iter()
        .find_map(|candidate| fs.read_to_string(candidate).ok())
        .ok_or_else(|| ModgraphError::NotFound {
            path: base.to_path_buf(),
        })
}

pub fn read_relative_import_file<F: FileSystem>(
    fs: &F,
    source_file: &Path,
    import_path: &str,
) -> Result<String, ModgraphError> {
    if !is_relative_specifier(import_path) {
        return Err(ModgraphError::InvalidArgument {
            specifier: import_path.to_string(),
            message: "expected a relative specifier".to_string(),
        });
    }
    let base_dir = source_file.parent().unwrap_or_else(|| Path::new(""));
    let base = normalize_lexically(&base_dir.join(import_path));
    read_file_with_extensions(fs, &base, &RELATIVE_READ_EXTENSIONS)
}
