//! Copy the ROM archives or images named by record-set files.
//!
//! Record-set files are processed one after another; within a file every
//! named record maps to one or more candidate assets in a flat source
//! directory. Present assets are copied over whatever is in the destination;
//! absent ones are counted and otherwise ignored, since most catalogs name
//! far more machines than any one collection holds.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use mamekit_core::{CancellationSignal, LogSink, ProgressSink, WeightedProgress};
use mamekit_dat::read_record_set_file;

use crate::Error;
use crate::util::ensure_dir;

/// Records between inner progress reports and cancellation checks.
pub const BATCH_SIZE: usize = 50;

/// Which asset family to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// `<name>.zip`
    Rom,
    /// `<name>.png`, `<name>.jpg`, `<name>.jpeg`, each independently
    Image,
}

impl AssetKind {
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            AssetKind::Rom => &["zip"],
            AssetKind::Image => &["png", "jpg", "jpeg"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Rom => "roms",
            AssetKind::Image => "images",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rom" | "roms" => Ok(AssetKind::Rom),
            "image" | "images" => Ok(AssetKind::Image),
            _ => Err(format!("unknown asset kind '{s}' (expected roms or images)")),
        }
    }
}

/// Inputs for [`copy_assets`].
#[derive(Debug, Clone)]
pub struct CopyRequest {
    /// Record-set files naming the assets, processed in order.
    pub record_sets: Vec<PathBuf>,
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub kind: AssetKind,
}

/// One asset that was present but could not be copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFailure {
    pub record_set: PathBuf,
    pub name: String,
    pub source: PathBuf,
    pub message: String,
}

/// Counters for a copy run, complete or cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopySummary {
    pub record_sets_total: usize,
    pub record_sets_completed: usize,
    /// Record-set files that could not be read
    pub record_sets_skipped: usize,
    pub records_seen: usize,
    pub copied: usize,
    pub bytes_copied: u64,
    /// Candidate assets absent from the source directory
    pub missing: usize,
    /// Record names that are not plain file names
    pub invalid_names: usize,
    pub failures: Vec<CopyFailure>,
}

/// How a copy run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Completed(CopySummary),
    /// Stopped at a cancellation check; already copied assets stay in place.
    Cancelled(CopySummary),
}

impl CopyOutcome {
    pub fn summary(&self) -> &CopySummary {
        match self {
            CopyOutcome::Completed(s) | CopyOutcome::Cancelled(s) => s,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, CopyOutcome::Cancelled(_))
    }
}

/// Copy every asset named by `request.record_sets`.
///
/// Fails only when the source directory is missing or the destination
/// cannot be created. Unreadable record-set files, unsafe record names, and
/// per-asset I/O errors are logged and counted.
///
/// Progress is weighted by file: while file `i` of `n` is in flight the
/// overall value is `i/n*100 + inner/n`, with `inner` updated every
/// [`BATCH_SIZE`] records. The last report is exactly 100 unless the run is
/// cancelled. Cancellation is checked before each file and every
/// [`BATCH_SIZE`] records, with a cooperative yield at the same points.
pub async fn copy_assets(
    request: &CopyRequest,
    progress: &dyn ProgressSink,
    log: &dyn LogSink,
    cancel: &dyn CancellationSignal,
) -> Result<CopyOutcome, Error> {
    if !request.source_dir.is_dir() {
        return Err(Error::DirectoryNotFound(request.source_dir.clone()));
    }
    ensure_dir(&request.dest_dir)?;

    let total = request.record_sets.len();
    let progress = WeightedProgress::new(progress, total);
    let mut summary = CopySummary {
        record_sets_total: total,
        ..Default::default()
    };

    log.info(&format!(
        "Copying {} from {} to {} ({total} record-set files)",
        request.kind,
        request.source_dir.display(),
        request.dest_dir.display()
    ));

    for (index, record_set) in request.record_sets.iter().enumerate() {
        if cancel.is_requested() {
            log.warn(&format!(
                "Copy cancelled before {} ({index} of {total} files done)",
                record_set.display()
            ));
            return Ok(CopyOutcome::Cancelled(summary));
        }

        let records = match read_record_set_file(record_set) {
            Ok((_, records)) => records,
            Err(e) => {
                log.exception(&e, &format!("Skipping {}", record_set.display()));
                summary.record_sets_skipped += 1;
                summary.record_sets_completed += 1;
                progress.report_completed(index + 1);
                continue;
            }
        };

        let count = records.len();
        log::debug!("{}: {count} records", record_set.display());

        for (i, record) in records.iter().enumerate() {
            if i > 0 && i % BATCH_SIZE == 0 {
                progress.report_inner(index, i as f64 / count as f64 * 100.0);
                tokio::task::yield_now().await;
                if cancel.is_requested() {
                    log.warn(&format!(
                        "Copy cancelled in {} after {i} of {count} records",
                        record_set.display()
                    ));
                    return Ok(CopyOutcome::Cancelled(summary));
                }
            }

            let name = record.name.trim();
            if name.is_empty() {
                continue;
            }
            summary.records_seen += 1;
            if !is_plain_file_name(name) {
                log.warn(&format!(
                    "Skipping '{name}' from {}: not a plain file name",
                    record_set.display()
                ));
                summary.invalid_names += 1;
                continue;
            }

            for ext in request.kind.extensions() {
                let file_name = format!("{name}.{ext}");
                let source = request.source_dir.join(&file_name);
                if !source.is_file() {
                    summary.missing += 1;
                    continue;
                }
                let dest = request.dest_dir.join(&file_name);
                match std::fs::copy(&source, &dest) {
                    Ok(bytes) => {
                        summary.copied += 1;
                        summary.bytes_copied += bytes;
                    }
                    Err(e) => {
                        log.exception(
                            &e,
                            &format!("Failed to copy {} to {}", source.display(), dest.display()),
                        );
                        summary.failures.push(CopyFailure {
                            record_set: record_set.clone(),
                            name: name.to_string(),
                            source,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        summary.record_sets_completed += 1;
        progress.report_completed(index + 1);
    }

    progress.finish();
    log.info(&format!(
        "Copied {} {} ({} missing, {} failed)",
        summary.copied,
        request.kind,
        summary.missing,
        summary.failures.len()
    ));
    Ok(CopyOutcome::Completed(summary))
}

/// A single path component with no separators that stays inside the
/// directory it is joined to.
fn is_plain_file_name(name: &str) -> bool {
    !name.contains(['/', '\\'])
        && name != "."
        && name != ".."
        && Path::new(name).file_name().is_some_and(|f| f == name)
}

#[cfg(test)]
#[path = "tests/copy_tests.rs"]
mod tests;
