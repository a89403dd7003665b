//! Crate-level failures. Derivation problems are not errors here: they are
//! recorded on schema nodes as [`ElementError`](crate::schema::ElementError).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {origin} at {path}: {message}")]
    Json {
        origin: String,
        path: String,
        message: String,
    },
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("glob pattern matched no files: {0}")]
    NoMatches(String),
    #[error("JSON pointer {pointer} matches nothing in {path}")]
    Pointer { path: String, pointer: String },
    #[error("failed to serialize the schema tree of {origin}: {source}")]
    Tree {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("jq filter failed: {0}")]
    Jq(String),
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
