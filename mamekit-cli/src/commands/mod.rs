pub(crate) mod config;
pub(crate) mod copy;
pub(crate) mod dat;
pub(crate) mod merge;
pub(crate) mod partition;
pub(crate) mod software;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::CliError;

/// Multi-threaded runtime for the async library operations.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::runtime(format!("failed to create tokio runtime: {e}")))
}

/// A flag raised by the first Ctrl-C. Must be called inside the runtime.
pub(crate) fn cancel_on_ctrl_c() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let raised = flag.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, stopping after the current item...");
            raised.store(true, Ordering::Relaxed);
        }
    });
    flag
}
