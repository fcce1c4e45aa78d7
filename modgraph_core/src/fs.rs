//! Filesystem accessor used by resolution and extraction.
//!
//! Every component is generic over [`FileSystem`] and defaults to
//! [`OsFileSystem`].

use std::io;
use std::path::Path;

pub trait FileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the direct entries of `dir`, in the order the platform lists them.
    fn read_dir_names(&self, dir: &Path) -> io::Result<Vec<String>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        std::fs::metadata(path).ok().is_some_and(|m| m.is_file())
    }

    fn is_dir(&self, path: &Path) -> bool {
        std::fs::metadata(path).ok().is_some_and(|m| m.is_dir())
    }

    fn read_dir_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect()
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn read_dir_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        (**self).read_dir_names(dir)
    }
}
