use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::frontmatter::FrontmatterError;

/// Errors that can occur while reading, tagging, or compiling posts.
#[derive(Debug, Error)]
pub enum PostbookError {
    /// A document or output file could not be read or written.
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The front matter block of a document is malformed.
    #[error("Parse error in {}: {source}", .path.display())]
    Parse {
        /// Document whose header failed to parse.
        path: PathBuf,
        /// Extraction failure.
        #[source]
        source: FrontmatterError,
    },
    /// A requested value is outside the accepted set.
    #[error("Invalid access level '{value}' (expected one of: {})", .allowed.join(", "))]
    Validation {
        /// Rejected value.
        value: String,
        /// Accepted values, in rank order.
        allowed: Vec<&'static str>,
    },
    /// Header or manifest serialization failed.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl PostbookError {
    /// Wrap an IO error with the path it concerns.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap a front matter failure with the document it came from.
    pub fn parse(path: impl AsRef<Path>, source: FrontmatterError) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns true when the error was raised before any file was touched.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<serde_yaml::Error> for PostbookError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

impl From<serde_json::Error> for PostbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

/// Convenience alias used across the workspace.
pub type Result<T, E = PostbookError> = std::result::Result<T, E>;
