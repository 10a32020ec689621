//! Core types shared by every mamekit crate.
//!
//! Holds the catalog data model, the text sanitizers used to derive file
//! names and XML values, and the three collaborator contracts (progress,
//! log, cancellation) that long-running operations report through.

pub mod cancel;
pub mod log_sink;
pub mod progress;
pub mod record;
pub mod sanitize;

pub use cancel::{CancellationSignal, NeverCancel};
pub use log_sink::{FacadeLog, LogEntry, LogLevel, LogSink, MemoryLog};
pub use progress::{
    MonotonicProgress, ProgressSink, SilentProgress, WeightedProgress, percent_of,
};
pub use record::{MachineRecord, NO_DESCRIPTION, Record, RecordSet, SoftwareRecord};
pub use sanitize::{sanitize_file_name, sanitize_for_file_name, sanitize_for_xml_value};
