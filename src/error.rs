//! Error types for notebook conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a manifest.
///
/// Nothing in the pipeline recovers from these: the first error aborts the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid notebook: {0}")]
    InvalidNotebook(String),

    #[error("Unsupported notebook format version {0} (expected 3 or 4)")]
    UnsupportedVersion(u64),

    #[error("Cannot classify {0:?}: file name has no extension")]
    Unclassifiable(String),

    #[error("Invalid slide options: {0}")]
    InvalidSlideOptions(String),

    #[error("{0:?} would be copied onto itself")]
    SameFile(PathBuf),
}

impl Error {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
