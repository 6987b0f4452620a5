use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning a path into practice text.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path does not exist or is not a regular file.
    #[error("{} is not a text file", .0.display())]
    InvalidPath(PathBuf),

    /// The file exists but is not valid UTF-8 text.
    #[error("{} is not valid UTF-8 text", .0.display())]
    NotText(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A text buffer cannot be built from zero lines. The loader absorbs this
/// case by substituting a single empty line, so it only surfaces when the
/// buffer is constructed directly.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("practice text must contain at least one line")]
pub struct EmptyInput;
