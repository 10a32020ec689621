use std::path::PathBuf;

use thiserror::Error;

use mamekit_dat::{DatError, MergeError};

/// Errors that end a library operation.
///
/// Problems confined to one input file, group, or asset are logged and
/// counted in the operation's summary instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A required input directory does not exist
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The directory exists but holds nothing to process
    #[error("No input files found in {}", .0.display())]
    NoInputFiles(PathBuf),

    /// An output directory could not be created
    #[error("Cannot create directory {}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The caller requested cancellation
    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Dat(#[from] DatError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl Error {
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Cancellation is a requested stop, not a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
