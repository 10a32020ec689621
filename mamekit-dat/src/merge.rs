//! Merge several record-set files into one.
//!
//! Inputs may mix the machine and software shapes. Records are normalized and
//! concatenated in input order; duplicates are kept. The first unreadable
//! input aborts the whole merge so an archive never holds a silent subset of
//! its sources.

use std::path::{Path, PathBuf};

use mamekit_core::{LogSink, Record, RecordSet};

use crate::codec::save_dat;
use crate::error::DatError;
use crate::record_set::{RecordShape, read_record_set_file, write_record_set_file};

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("No input files to merge")]
    NoInputs,

    #[error("Cannot merge {}", .path.display())]
    InvalidInput {
        path: PathBuf,
        #[source]
        source: DatError,
    },

    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: DatError,
    },
}

impl MergeError {
    /// The file the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            MergeError::NoInputs => None,
            MergeError::InvalidInput { path, .. } | MergeError::Write { path, .. } => Some(path),
        }
    }
}

/// What [`merge_to_files`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub inputs: usize,
    pub machine_inputs: usize,
    pub software_inputs: usize,
    pub records: usize,
}

/// Merge record-set files in order.
pub fn merge<P: AsRef<Path>>(paths: &[P]) -> Result<RecordSet, MergeError> {
    merge_inner(paths).map(|(records, _)| records)
}

fn merge_inner<P: AsRef<Path>>(
    paths: &[P],
) -> Result<(RecordSet, Vec<RecordShape>), MergeError> {
    let mut merged = RecordSet::new();
    let mut shapes = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        let (shape, records) =
            read_record_set_file(path).map_err(|source| MergeError::InvalidInput {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!(
            "Merging {} ({:?} shape, {} records)",
            path.display(),
            shape,
            records.len()
        );
        merged.extend(
            records
                .iter()
                .map(|r| Record::normalized(&r.name, &r.description)),
        );
        shapes.push(shape);
    }

    Ok((merged, shapes))
}

/// Merge `paths` and write the result as a machine-shape record-set at
/// `xml_out` and a DAT archive at `dat_out`. Nothing is written if any input
/// fails to read.
pub fn merge_to_files<P: AsRef<Path>>(
    paths: &[P],
    xml_out: &Path,
    dat_out: &Path,
    log: &dyn LogSink,
) -> Result<MergeSummary, MergeError> {
    if paths.is_empty() {
        log.error("No input files to merge");
        return Err(MergeError::NoInputs);
    }

    let (merged, shapes) = match merge_inner(paths) {
        Ok(result) => result,
        Err(e) => {
            log.exception(&e, "Merge aborted");
            return Err(e);
        }
    };

    if let Err(source) = write_record_set_file(xml_out, RecordShape::Machine, &merged) {
        let e = MergeError::Write {
            path: xml_out.to_path_buf(),
            source,
        };
        log.exception(&e, "Merge aborted");
        return Err(e);
    }
    log.info(&format!(
        "Wrote {} merged records to {}",
        merged.len(),
        xml_out.display()
    ));

    save_dat(dat_out, &merged, log).map_err(|source| MergeError::Write {
        path: dat_out.to_path_buf(),
        source,
    })?;

    let machine_inputs = shapes
        .iter()
        .filter(|s| **s == RecordShape::Machine)
        .count();
    Ok(MergeSummary {
        inputs: paths.len(),
        machine_inputs,
        software_inputs: paths.len() - machine_inputs,
        records: merged.len(),
    })
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
