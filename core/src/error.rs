use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a collection or a query file.
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CollectionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectionError::Io { path: path.into(), source }
    }

    /// True when the error means the input does not exist, as opposed to a read failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CollectionError::NotFound { .. })
    }
}
