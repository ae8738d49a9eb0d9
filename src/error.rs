use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unified error type for changelog tooling operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown change type: '{0}'")]
    UnknownType(String),

    #[error("Invalid change entry: {0}")]
    InvalidEntry(String),

    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ChangelogError>,
    },

    #[error("Release error: {0}")]
    Release(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Service model error: {0}")]
    ServiceModel(String),

    #[error("Staging failed: {0}")]
    Staging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in sdk-changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ChangelogError::Version(msg.into())
    }

    pub fn unknown_type(value: impl Into<String>) -> Self {
        ChangelogError::UnknownType(value.into())
    }

    pub fn invalid_entry(msg: impl Into<String>) -> Self {
        ChangelogError::InvalidEntry(msg.into())
    }

    /// Create a release error with context
    pub fn release(msg: impl Into<String>) -> Self {
        ChangelogError::Release(msg.into())
    }

    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        ChangelogError::Template(msg.into())
    }

    pub fn service_model(msg: impl Into<String>) -> Self {
        ChangelogError::ServiceModel(msg.into())
    }

    /// Create an index staging error with context
    pub fn staging(msg: impl Into<String>) -> Self {
        ChangelogError::Staging(msg.into())
    }

    /// Wrap a JSON error with the file it came from
    pub fn parse(path: &Path, source: serde_json::Error) -> Self {
        ChangelogError::Parse {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Attach the offending file to a validation error
    pub fn in_file(self, path: &Path) -> Self {
        ChangelogError::InFile {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }
}
