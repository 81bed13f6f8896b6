use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a trace scan.
///
/// Loading is fail-fast: the first error stops the batch and is handed to
/// the caller unchanged.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("malformed trace path {}: {reason}", path.display())]
    MalformedPath { path: PathBuf, reason: String },

    #[error("malformed trace {}: token {index} ('{token}') is not a number", path.display())]
    MalformedTrace {
        path: PathBuf,
        index: usize,
        token: String,
    },

    #[error("unreadable CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("empty trace {}", path.display())]
    EmptyTrace { path: PathBuf },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid path schema: {0}")]
    Schema(String),
}

impl LoadError {
    pub(crate) fn malformed_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        LoadError::MalformedPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
