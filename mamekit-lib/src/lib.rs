//! Pipeline operations on MAME catalogs.
//!
//! Each operation takes its collaborators (progress, log, cancellation) as
//! arguments, returns a typed summary, and keeps per-item problems out of
//! its `Result`: those are logged and counted instead.

pub mod aggregate;
pub mod copy;
pub mod error;
pub mod partition;
pub mod session_log;
pub mod settings;
pub mod util;
pub mod worker_pool;

pub use aggregate::{aggregate, aggregate_with_workers};
pub use copy::{AssetKind, CopyFailure, CopyOutcome, CopyRequest, CopySummary, copy_assets};
pub use error::Error;
pub use partition::{
    Partition, PartitionMode, PartitionSummary, SkipReason, partition, write_full_list,
    write_partitions,
};
pub use session_log::{LogFile, SessionLog};
pub use settings::Settings;

// Frontends only depend on this crate.
pub use mamekit_core::*;
pub use mamekit_dat as dat;
