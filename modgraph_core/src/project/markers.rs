use std::path::{Path, PathBuf};

use crate::error::ModgraphError;
use crate::fs::{FileSystem, OsFileSystem};

pub const MANIFEST_FILE_NAME: &str = "package.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    pub root_dir: PathBuf,
}

impl ProjectRoot {
    pub fn manifest_path(&self) -> PathBuf {
        self.root_dir.join(MANIFEST_FILE_NAME)
    }
}

pub fn find_project_root(start_path: &Path) -> Result<ProjectRoot, ModgraphError> {
    find_project_root_with(&OsFileSystem, start_path)
}

/// Walks upward from `start_path` until a directory lists a `package.json` entry.
///
/// Stops with [`ModgraphError::ManifestNotFound`] once the filesystem root has
/// been listed without a match.
pub fn find_project_root_with<F: FileSystem>(
    fs: &F,
    start_path: &Path,
) -> Result<ProjectRoot, ModgraphError> {
    let not_found = || ModgraphError::ManifestNotFound {
        start: start_path.to_path_buf(),
    };
    let mut cursor = if fs.is_dir(start_path) {
        start_path.to_path_buf()
    } else {
        start_path.parent().ok_or_else(not_found)?.to_path_buf()
    };

    loop {
        if lists_manifest(fs, &cursor) {
            return Ok(ProjectRoot { root_dir: cursor });
        }
        cursor = cursor.parent().ok_or_else(not_found)?.to_path_buf();
    }
}

fn lists_manifest<F: FileSystem>(fs: &F, dir: &Path) -> bool {
    fs.read_dir_names(dir)
        .map(|names| names.iter().any(|name| name == MANIFEST_FILE_NAME))
        .unwrap_or(false)
}
