use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or starting a stitch operation.
///
/// Every variant here is fatal and aborts the run before any output is
/// produced. Once a valid root has been accepted, per-file problems
/// (binary content, permission errors, undecodable bytes) degrade into
/// placeholders inside the document instead of surfacing as errors.
#[derive(Error, Debug)]
pub enum StitchError {
    /// The configured root was not found on the filesystem or was
    /// inaccessible due to permissions.
    #[error("Root path not found or not accessible: {0}")]
    RootNotFound(PathBuf),

    /// The configured root exists but is not a directory.
    #[error("Root path is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    /// The preset name does not correspond to a built-in pattern bundle.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// A size string could not be parsed by [`crate::parse_size`].
    #[error("Invalid size value: '{0}'")]
    InvalidSize(String),

    /// The encoding name is not one the engine can decode.
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// An I/O error occurred while accessing a path (e.g. canonicalizing
    /// the root).
    #[error("IO error accessing path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The combined ignore pattern set could not be compiled into a
    /// matcher. Individual malformed patterns are skipped with a warning
    /// instead of raising this.
    #[error("Failed to build ignore pattern matcher: {0}")]
    PatternBuildError(#[source] ignore::Error),
}

/// A convenience type alias for `Result<T, StitchError>`.
pub type StitchResult<T> = Result<T, StitchError>;
