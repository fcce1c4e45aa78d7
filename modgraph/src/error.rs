use std::path::PathBuf;

use modgraph_core::ModgraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("invalid glob {pattern:?}: {message}")]
    InvalidGlob { pattern: String, message: String },

    #[error("invalid alias {raw:?}: expected PREFIX=TARGET")]
    InvalidAlias { raw: String },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] ModgraphError),
}
