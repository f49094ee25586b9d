use std::path::PathBuf;

use thiserror::Error;

/// Fatal startup problems. Anything here terminates the process before
/// the listener ever accepts a connection.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("document root does not exist: {0}")]
    RootMissing(PathBuf),

    #[error("document root is not a directory: {0}")]
    RootNotADirectory(PathBuf),
}

/// The uniform rejection for the serving pipeline.
///
/// Traversal attempts, missing files, directories, and read failures all
/// collapse into this one value; the client sees `404 File Not Found`
/// regardless of the internal cause.
#[derive(Debug, PartialEq, Eq, Error)]
#[error("file not found")]
pub struct NotFound;

impl From<std::io::Error> for NotFound {
    fn from(_: std::io::Error) -> Self {
        NotFound
    }
}
