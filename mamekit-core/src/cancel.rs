//! Cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Polled by long-running operations at file and batch boundaries.
pub trait CancellationSignal: Send + Sync {
    fn is_requested(&self) -> bool;
}

impl CancellationSignal for AtomicBool {
    fn is_requested(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CancellationSignal + ?Sized> CancellationSignal for Arc<T> {
    fn is_requested(&self) -> bool {
        (**self).is_requested()
    }
}

/// A signal that is never raised.
pub struct NeverCancel;

impl CancellationSignal for NeverCancel {
    fn is_requested(&self) -> bool {
        false
    }
}
