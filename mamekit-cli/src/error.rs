use thiserror::Error;

use mamekit_lib::dat::{DatError, MergeError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Library operation failed
    #[error(transparent)]
    Lib(#[from] mamekit_lib::Error),

    /// Catalog or record-set error
    #[error(transparent)]
    Dat(#[from] DatError),

    /// Merge aborted
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing or invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Stopped by Ctrl-C
    #[error("Cancelled")]
    Cancelled,
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Lib(mamekit_lib::Error::Cancelled))
    }
}
