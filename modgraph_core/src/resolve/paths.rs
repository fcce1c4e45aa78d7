use std::path::{Component, Path, PathBuf};

use path_slash::PathExt;

/// Collapses `.` and `..` without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    path.components()
        .fold(PathBuf::new(), |mut out, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    let last_is_normal =
                        matches!(out.components().next_back(), Some(Component::Normal(_)));
                    if last_is_normal {
                        out.pop();
                    } else if !out.has_root() {
                        out.push("..");
                    }
                }
                other => out.push(other.as_os_str()),
            }
            out
        })
}

/// Stable string identity for a filesystem path.
pub fn path_id(path: &Path) -> String {
    normalize_lexically(path).to_slash_lossy().into_owned()
}

pub fn append_suffix(base: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return base.to_path_buf();
    }
    let mut raw = base.as_os_str().to_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}
