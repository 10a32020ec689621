//! Bounded pool of tokio tasks for independent per-file work.
//!
//! Items are fed through a bounded `async-channel` (each worker holds its own
//! cloned `Receiver`, so no lock is shared between them) and results come
//! back on an unbounded mpsc channel in completion order. An item that runs
//! past the timeout comes back as `Err(item)` so the caller can report it.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Last-resort limit per item. A hung item is abandoned, handed back to the
/// caller as `Err(item)`, and the worker moves on.
pub const SAFETY_TIMEOUT: Duration = Duration::from_secs(300);

/// A pool of worker tasks processing a fixed list of items.
///
/// ```ignore
/// let mut pool = WorkerPool::start(4, paths, |path| async move {
///     parse(path).await
/// });
///
/// while let Some(result) = pool.recv().await {
///     match result {
///         Ok(parsed) => handle(parsed),
///         Err(path) => report_timeout(path),
///     }
/// }
/// ```
///
/// Dropping the pool (or calling [`shutdown`](Self::shutdown)) aborts the
/// submitter and every worker. Items already handed to `spawn_blocking`
/// run to completion but their results are discarded.
pub struct WorkerPool<R: Send + 'static, W: Send + 'static> {
    result_rx: mpsc::UnboundedReceiver<Result<R, W>>,
    workers: Vec<JoinHandle<()>>,
    submitter: JoinHandle<()>,
}

impl<R: Send + 'static, W: Clone + Send + 'static> WorkerPool<R, W> {
    /// Spawn `n` workers (at least one) and queue all `items`, allowing each
    /// item [`SAFETY_TIMEOUT`].
    pub fn start<F, Fut>(n: usize, items: Vec<W>, process_fn: F) -> Self
    where
        F: Fn(W) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        Self::start_with_timeout(n, items, SAFETY_TIMEOUT, process_fn)
    }

    /// Like [`start`](Self::start) with a custom per-item limit.
    pub fn start_with_timeout<F, Fut>(
        n: usize,
        items: Vec<W>,
        timeout: Duration,
        process_fn: F,
    ) -> Self
    where
        F: Fn(W) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let n = n.max(1);
        let (work_tx, work_rx) = async_channel::bounded::<W>(n);
        let (result_tx, result_rx) = mpsc::unbounded_channel::<Result<R, W>>();
        let process_fn = Arc::new(process_fn);

        let workers = (0..n)
            .map(|_| {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let process_fn = process_fn.clone();
                tokio::spawn(async move {
                    while let Ok(item) = work_rx.recv().await {
                        let held = item.clone();
                        let result = match tokio::time::timeout(timeout, process_fn(item)).await {
                            Ok(r) => Ok(r),
                            Err(_) => {
                                log::warn!(
                                    "Worker pool: item timed out after {}s",
                                    timeout.as_secs_f64()
                                );
                                Err(held)
                            }
                        };
                        if result_tx.send(result).is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();

        // The result channel closes once every worker has exited
        drop(result_tx);

        let submitter = tokio::spawn(async move {
            for item in items {
                if work_tx.send(item).await.is_err() {
                    break;
                }
            }
        });

        Self {
            result_rx,
            workers,
            submitter,
        }
    }

    /// Next result in completion order, or `None` once every item has been
    /// processed. `Err` hands back an item that timed out.
    pub async fn recv(&mut self) -> Option<Result<R, W>> {
        self.result_rx.recv().await
    }

    /// Stop submitting and abort all workers.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl<R: Send + 'static, W: Send + 'static> Drop for WorkerPool<R, W> {
    fn drop(&mut self) {
        self.submitter.abort();
        for worker in &self.workers {
            worker.abort();
        }
        self.result_rx.close();
    }
}
