//! Flatten a directory of MAME software lists into one record-set.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use mamekit_core::{
    CancellationSignal, LogSink, MonotonicProgress, ProgressSink, RecordSet, SoftwareRecord,
    percent_of,
};
use mamekit_dat::{DatError, parse_software_list_file};

use crate::Error;
use crate::util::{list_xml_files, worker_count};
use crate::worker_pool::{SAFETY_TIMEOUT, WorkerPool};

/// Parser run on each input file.
type ParseFn = fn(&Path) -> Result<Vec<SoftwareRecord>, DatError>;

/// What happened to one input file.
enum FileResult {
    Parsed(Vec<SoftwareRecord>),
    Failed(DatError),
    /// Not parsed because cancellation was already observed
    Stopped,
}

/// Aggregate every `*.xml` software list in `dir` using one worker per
/// available core.
pub async fn aggregate(
    dir: &Path,
    progress: &dyn ProgressSink,
    log: &dyn LogSink,
    cancel: &dyn CancellationSignal,
) -> Result<RecordSet, Error> {
    aggregate_with_workers(dir, worker_count(None), progress, log, cancel).await
}

/// Aggregate every `*.xml` software list in `dir` on `workers` pool tasks.
///
/// Files are parsed concurrently and their records appended in completion
/// order; each file's own order is kept. A file that fails to parse is
/// logged and contributes nothing, as does a file whose parse outlives the
/// pool's safety timeout. Cancellation is checked as each file completes;
/// once seen, no further file is parsed and [`Error::Cancelled`] is returned.
pub async fn aggregate_with_workers(
    dir: &Path,
    workers: usize,
    progress: &dyn ProgressSink,
    log: &dyn LogSink,
    cancel: &dyn CancellationSignal,
) -> Result<RecordSet, Error> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }
    let files = list_xml_files(dir)?;
    if files.is_empty() {
        return Err(Error::NoInputFiles(dir.to_path_buf()));
    }
    if cancel.is_requested() {
        return Err(Error::Cancelled);
    }

    log.info(&format!(
        "Aggregating {} software lists from {} on {workers} workers",
        files.len(),
        dir.display()
    ));
    aggregate_files(
        files,
        workers,
        SAFETY_TIMEOUT,
        parse_software_list_file,
        progress,
        log,
        cancel,
    )
    .await
}

async fn aggregate_files(
    files: Vec<PathBuf>,
    workers: usize,
    timeout: Duration,
    parse: ParseFn,
    progress: &dyn ProgressSink,
    log: &dyn LogSink,
    cancel: &dyn CancellationSignal,
) -> Result<RecordSet, Error> {
    let total = files.len();
    let progress = MonotonicProgress::new(progress);

    let stop = Arc::new(AtomicBool::new(false));
    let worker_stop = stop.clone();
    let mut pool = WorkerPool::start_with_timeout(workers, files, timeout, move |path| {
        let stop = worker_stop.clone();
        async move {
            let label = path.clone();
            let parsed = tokio::task::spawn_blocking(move || {
                if stop.load(Ordering::Relaxed) {
                    return FileResult::Stopped;
                }
                match parse(&path) {
                    Ok(softwares) => FileResult::Parsed(softwares),
                    Err(e) => FileResult::Failed(e),
                }
            });
            (label, parsed.await)
        }
    });

    let mut records = RecordSet::new();
    let mut completed = 0usize;
    let mut failed = 0usize;

    while let Some(result) = pool.recv().await {
        completed += 1;
        match result {
            Ok((path, Ok(FileResult::Parsed(softwares)))) => {
                log::debug!("{}: {} softwares", path.display(), softwares.len());
                records.extend(softwares.iter().map(SoftwareRecord::to_record));
            }
            Ok((path, Ok(FileResult::Failed(e)))) => {
                failed += 1;
                log.exception(&e, &format!("Skipping {}", path.display()));
            }
            Ok((_, Ok(FileResult::Stopped))) => {}
            Ok((path, Err(e))) => {
                failed += 1;
                log.error(&format!("Parser task for {} failed: {e}", path.display()));
            }
            Err(path) => {
                failed += 1;
                log.error(&format!(
                    "Skipping {}: parse did not finish within {}s",
                    path.display(),
                    timeout.as_secs_f64()
                ));
            }
        }
        progress.report(percent_of(completed, total));

        if cancel.is_requested() {
            stop.store(true, Ordering::Relaxed);
            pool.shutdown();
            log.warn(&format!(
                "Aggregation cancelled after {completed} of {total} files"
            ));
            return Err(Error::Cancelled);
        }
    }

    progress.report(100);
    log.info(&format!(
        "Aggregated {} softwares from {} files ({failed} skipped)",
        records.len(),
        total - failed
    ));
    Ok(records)
}

#[cfg(test)]
#[path = "tests/aggregate_tests.rs"]
mod tests;
