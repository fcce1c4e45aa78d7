use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModgraphError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no file found for {path} with any candidate extension")]
    NotFound { path: PathBuf },

    #[error("invalid import specifier {specifier:?}: {message}")]
    InvalidArgument { specifier: String, message: String },

    #[error("no package.json found above {start}")]
    ManifestNotFound { start: PathBuf },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("dependency traversal exceeded depth {limit} at {path}")]
    DepthExceeded { limit: usize, path: String },
}
