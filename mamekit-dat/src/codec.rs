//! Binary DAT archives.
//!
//! A DAT is a MessagePack array of `[name, description]` string pairs. It
//! carries exactly what a normalized record-set carries, in the same order,
//! and reloads much faster than the XML form.

use std::io::Cursor;
use std::path::Path;

use serde::Deserialize;

use mamekit_core::{LogSink, RecordSet};

use crate::error::DatError;

/// Encode a record-set.
pub fn encode(records: &RecordSet) -> Result<Vec<u8>, DatError> {
    Ok(rmp_serde::to_vec(records)?)
}

/// Decode a record-set. The whole buffer must be consumed.
pub fn decode(bytes: &[u8]) -> Result<RecordSet, DatError> {
    let mut cursor = Cursor::new(bytes);
    let records = {
        let mut de = rmp_serde::Deserializer::new(&mut cursor);
        RecordSet::deserialize(&mut de)?
    };

    let consumed = cursor.position() as usize;
    if consumed != bytes.len() {
        return Err(DatError::TrailingBytes(bytes.len() - consumed));
    }
    Ok(records)
}

/// Load a DAT file. Any read or decode failure is logged and yields an
/// empty record-set.
pub fn load_dat(path: &Path, log: &dyn LogSink) -> RecordSet {
    let result = std::fs::read(path)
        .map_err(DatError::from)
        .and_then(|bytes| decode(&bytes));

    match result {
        Ok(records) => {
            log::debug!("Loaded {} records from {}", records.len(), path.display());
            records
        }
        Err(e) => {
            log.exception(&e, &format!("Failed to load DAT {}", path.display()));
            RecordSet::new()
        }
    }
}

/// Save a DAT file. Failures are logged and then returned.
pub fn save_dat(path: &Path, records: &RecordSet, log: &dyn LogSink) -> Result<(), DatError> {
    let result = encode(records).and_then(|bytes| Ok(std::fs::write(path, bytes)?));

    match result {
        Ok(()) => {
            log.info(&format!(
                "Wrote {} records to {}",
                records.len(),
                path.display()
            ));
            Ok(())
        }
        Err(e) => {
            log.exception(&e, &format!("Failed to save DAT {}", path.display()));
            Err(e)
        }
    }
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
