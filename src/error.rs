use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::ModelError;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write results to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CheckError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CheckError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CheckError::Write {
            path: path.into(),
            source,
        }
    }
}
