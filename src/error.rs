use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the release tools
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("invalid branch, should be {expected}: current is {actual}")]
    InvalidBranch { expected: String, actual: String },

    #[error("No version tags found in repository")]
    NoVersionTags,

    #[error("Missing credential: please set the {0} environment variable")]
    MissingCredential(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Release API error: {0}")]
    Api(String),

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Dump tool not found: {0}")]
    DumpToolMissing(String),

    #[error("Database dump failed: {0}")]
    Dump(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in the release tools
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a release API error with context
    pub fn api(msg: impl Into<String>) -> Self {
        ReleaseError::Api(msg.into())
    }

    /// Create an archive error with context
    pub fn archive(msg: impl Into<String>) -> Self {
        ReleaseError::Archive(msg.into())
    }

    /// Create a database dump error with context
    pub fn dump(msg: impl Into<String>) -> Self {
        ReleaseError::Dump(msg.into())
    }

    /// Process exit code for this error.
    ///
    /// Missing credentials share exit code 2 with argument errors; every
    /// other failure exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReleaseError::MissingCredential(_) => 2,
            _ => 1,
        }
    }
}

impl From<toml::de::Error> for ReleaseError {
    fn from(err: toml::de::Error) -> Self {
        ReleaseError::Config(err.to_string())
    }
}
