//! Error types for `CarPak`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `CarPak` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Configuration Errors ====================
    /// The config file does not exist.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// The expected path to the config file.
        path: PathBuf,
    },

    /// The config file exists but could not be parsed.
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // ==================== Setup Errors ====================
    /// The base path contains no bracketed level folders.
    #[error("no level folders (e.g. '[L1]') found under: {path}")]
    NoLevels {
        /// The base path that was scanned.
        path: PathBuf,
    },

    /// The level source root is missing or not a directory.
    #[error("source root not found or not a directory: {path}")]
    SourceRootNotFound {
        /// The source root that was expected.
        path: PathBuf,
    },

    /// The source root contains no mergeable resource folders.
    #[error("no resource folders to merge under: {path}")]
    NoResources {
        /// The source root that was scanned.
        path: PathBuf,
    },

    // ==================== Merge Errors ====================
    /// The unified tree already contains a directory this run was about to
    /// create. The destination is expected to be fresh for the items being
    /// merged, so this aborts the whole run rather than silently merging.
    #[error("destination already exists (stale unified tree?): {path}")]
    DestinationCollision {
        /// The pre-existing destination directory.
        path: PathBuf,
    },

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDir(String),
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err.to_string())
    }
}

/// A specialized Result type for `CarPak` operations.
pub type Result<T> = std::result::Result<T, Error>;
