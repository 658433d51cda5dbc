//! Error types for scenario synthesis.

use std::io;
use std::path::PathBuf;

use crate::validate::ValidationError;

/// Result alias used throughout the crate.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur while generating a scenario batch.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// Generation parameters were rejected before any file was touched.
    #[error("invalid parameters: {message}")]
    InvalidParameters {
        /// Which parameter was rejected and why.
        message: String,
    },

    /// The target directory could not be created or written to.
    #[error("directory unwritable: {}: {}", .path.display(), .source)]
    DirectoryUnwritable {
        /// The directory or file path that failed.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// A composed scenario failed read-back validation and was not published.
    #[error("scenario {index} failed validation: {source}")]
    Validation {
        /// Index of the scenario within the batch.
        index: usize,
        /// What the validator rejected.
        #[source]
        source: ValidationError,
    },
}

impl ScenarioError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ScenarioError::InvalidParameters {
            message: message.into(),
        }
    }

    pub(crate) fn unwritable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScenarioError::DirectoryUnwritable {
            path: path.into(),
            source,
        }
    }
}
