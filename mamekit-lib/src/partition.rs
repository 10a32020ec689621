//! Split a parsed catalog into per-group record-set files.
//!
//! [`partition`] is pure: it groups machines and decides which groups and
//! members survive. [`write_partitions`] writes one `<stem>.xml` per
//! surviving group into a flat output directory, reporting progress after
//! every group and logging (not propagating) per-group write failures.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use mamekit_core::sanitize::{strip_invalid_chars, strip_source_suffix};
use mamekit_core::{
    LogSink, MachineRecord, MonotonicProgress, ProgressSink, RecordSet, percent_of,
    sanitize_file_name,
};
use mamekit_dat::{RecordShape, write_record_set_file};

use crate::Error;
use crate::util::ensure_dir;

/// File stem used for the ungrouped full list.
pub const FULL_LIST_STEM: &str = "FullList";

/// How machines are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionMode {
    /// One group holding every named machine
    FullList,
    Manufacturer,
    Year,
    SourceFile,
}

impl PartitionMode {
    pub const ALL: &[PartitionMode] = &[
        PartitionMode::FullList,
        PartitionMode::Manufacturer,
        PartitionMode::Year,
        PartitionMode::SourceFile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PartitionMode::FullList => "full-list",
            PartitionMode::Manufacturer => "manufacturer",
            PartitionMode::Year => "year",
            PartitionMode::SourceFile => "source-file",
        }
    }
}

impl fmt::Display for PartitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartitionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase().replace('_', "-");
        PartitionMode::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| {
                format!("unknown partition mode '{s}' (expected manufacturer, year, source-file, or full-list)")
            })
    }
}

/// Why a group produced no file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The manufacturer name itself marks the group as bootleg
    BootlegManufacturer,
    /// Every member was filtered out
    NoEligibleRecords,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BootlegManufacturer => f.write_str("bootleg manufacturer"),
            SkipReason::NoEligibleRecords => f.write_str("no eligible machines"),
        }
    }
}

/// One group of machines and the file it becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Grouping value as it appeared in the catalog (derived stem for
    /// source-file grouping).
    pub key: String,
    /// Sanitized output file name, without the `.xml` extension.
    pub file_stem: String,
    /// Normalized members in catalog order.
    pub records: RecordSet,
    /// Set when the group is counted but not written.
    pub skip: Option<SkipReason>,
}

impl Partition {
    pub fn file_name(&self) -> String {
        format!("{}.xml", self.file_stem)
    }

    pub fn is_skipped(&self) -> bool {
        self.skip.is_some()
    }
}

/// Result of [`write_partitions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionSummary {
    pub total_groups: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub records_written: usize,
    /// Files written, in group order.
    pub files: Vec<PathBuf>,
}

/// Group `records` by `mode`, in order of each key's first appearance.
///
/// Machines without a name never appear in the output. Groups whose key is
/// absent or blank are dropped entirely and do not count as groups.
pub fn partition(records: &[MachineRecord], mode: PartitionMode) -> Vec<Partition> {
    let named = records.iter().filter(|r| r.has_name());

    match mode {
        PartitionMode::FullList => vec![Partition {
            key: FULL_LIST_STEM.to_string(),
            file_stem: FULL_LIST_STEM.to_string(),
            records: named.map(MachineRecord::to_record).collect(),
            skip: None,
        }],
        PartitionMode::Manufacturer => group_by(named, |r| r.manufacturer.clone())
            .into_iter()
            .map(|(raw, members)| manufacturer_partition(raw, members))
            .collect(),
        PartitionMode::Year => group_by(named, |r| r.year.clone())
            .into_iter()
            .map(|(raw, members)| {
                let file_stem = sanitize_file_name(&raw.replace('?', "X"));
                plain_partition(raw, file_stem, members)
            })
            .collect(),
        PartitionMode::SourceFile => group_by(named, |r| {
            r.source_file
                .as_deref()
                .map(|s| strip_invalid_chars(strip_source_suffix(s)))
        })
        .into_iter()
        .map(|(key, members)| {
            let file_stem = sanitize_file_name(&key);
            plain_partition(key, file_stem, members)
        })
        .collect(),
    }
}

/// Manufacturer name as shown in file names and used for the bootleg test.
pub fn manufacturer_display_name(raw: &str) -> String {
    strip_invalid_chars(raw).replace("unknown", "UnknownManufacturer")
}

/// Member filter applied only when grouping by manufacturer.
///
/// Keeps working originals: good emulation, not a clone, and nothing in the
/// name or description that marks a bootleg or BIOS set, plus no prototype or
/// PlayChoice-10 description.
pub fn is_manufacturer_member(record: &MachineRecord) -> bool {
    let name = record.name.to_lowercase();
    let description = record.description.to_lowercase();

    record.is_good()
        && !record.is_clone()
        && !name.contains("bootleg")
        && !description.contains("bootleg")
        && !name.contains("bios")
        && !description.contains("bios")
        && !description.contains("prototype")
        && !description.contains("playchoice")
}

fn manufacturer_partition(raw: String, members: Vec<&MachineRecord>) -> Partition {
    let display = manufacturer_display_name(&raw);
    let file_stem = sanitize_file_name(&display);

    if display.to_lowercase().contains("bootleg") {
        return Partition {
            key: raw,
            file_stem,
            records: RecordSet::new(),
            skip: Some(SkipReason::BootlegManufacturer),
        };
    }

    let records: RecordSet = members
        .into_iter()
        .filter(|r| is_manufacturer_member(r))
        .map(MachineRecord::to_record)
        .collect();
    let skip = records.is_empty().then_some(SkipReason::NoEligibleRecords);

    Partition {
        key: raw,
        file_stem,
        records,
        skip,
    }
}

fn plain_partition(key: String, file_stem: String, members: Vec<&MachineRecord>) -> Partition {
    Partition {
        key,
        file_stem,
        records: members.into_iter().map(MachineRecord::to_record).collect(),
        skip: None,
    }
}

/// Group by a derived key, keeping first-appearance order and dropping
/// absent or blank keys.
fn group_by<'a, I, F>(records: I, key_fn: F) -> Vec<(String, Vec<&'a MachineRecord>)>
where
    I: Iterator<Item = &'a MachineRecord>,
    F: Fn(&MachineRecord) -> Option<String>,
{
    let mut groups: Vec<(String, Vec<&'a MachineRecord>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(key) = key_fn(record).filter(|k| !k.trim().is_empty()) else {
            continue;
        };
        match index.get(&key) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }
    groups
}

/// Write every non-skipped partition to `<out_dir>/<file_stem>.xml`.
///
/// Progress is `processed / total * 100` after each group, whether it was
/// written, skipped, or failed; the last report is always 100. A failed
/// write is logged and counted and the remaining groups are still written.
pub fn write_partitions(
    partitions: &[Partition],
    out_dir: &Path,
    progress: &dyn ProgressSink,
    log: &dyn LogSink,
) -> Result<PartitionSummary, Error> {
    ensure_dir(out_dir)?;

    let progress = MonotonicProgress::new(progress);
    let total = partitions.len();
    let mut summary = PartitionSummary {
        total_groups: total,
        ..Default::default()
    };
    let mut stems_written: HashSet<&str> = HashSet::new();

    for (i, partition) in partitions.iter().enumerate() {
        match partition.skip {
            Some(reason) => {
                log::debug!("Skipping group '{}': {reason}", partition.key);
                summary.skipped += 1;
            }
            None => {
                let path = out_dir.join(partition.file_name());
                if !stems_written.insert(partition.file_stem.as_str()) {
                    log.warn(&format!(
                        "Group '{}' maps to the same file as an earlier group; {} is overwritten",
                        partition.key,
                        path.display()
                    ));
                }
                match write_record_set_file(&path, RecordShape::Machine, &partition.records) {
                    Ok(()) => {
                        summary.written += 1;
                        summary.records_written += partition.records.len();
                        summary.files.push(path);
                    }
                    Err(e) => {
                        log.exception(&e, &format!("Failed to write {}", path.display()));
                        summary.failed += 1;
                    }
                }
            }
        }
        progress.report(percent_of(i + 1, total));
    }

    progress.report(100);
    log.info(&format!(
        "Wrote {} of {} groups to {} ({} skipped, {} failed)",
        summary.written,
        summary.total_groups,
        out_dir.display(),
        summary.skipped,
        summary.failed
    ));
    Ok(summary)
}

/// Write every named machine, unfiltered, to `path`. Returns the number of
/// records written.
pub fn write_full_list(records: &[MachineRecord], path: &Path) -> Result<usize, Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let set = partition(records, PartitionMode::FullList)
        .into_iter()
        .next()
        .map(|full| full.records)
        .unwrap_or_default();
    write_record_set_file(path, RecordShape::Machine, &set)?;
    Ok(set.len())
}

#[cfg(test)]
#[path = "tests/partition_tests.rs"]
mod tests;
