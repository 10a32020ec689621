use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamekit_lib::dat::parse_catalog_file;
use mamekit_lib::partition::FULL_LIST_STEM;
use mamekit_lib::{PartitionMode, partition, write_full_list, write_partitions};

use crate::Session;
use crate::error::CliError;
use crate::progress::PercentBar;

/// Write every named machine in `catalog` to a single record-set file.
pub(crate) fn run_full_list(
    session: &Session,
    catalog: &Path,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let path = output.unwrap_or_else(|| {
        session
            .settings
            .output_dir(None)
            .join(format!("{FULL_LIST_STEM}.xml"))
    });

    log::info!("Reading {}", catalog.display());
    let machines = parse_catalog_file(catalog)?;
    let count = write_full_list(&machines, &path)?;

    log::info!(
        "{} {} machines to {}",
        "Wrote".if_supports_color(Stdout, |t| t.green()),
        count,
        path.display()
    );
    Ok(())
}

/// Split `catalog` into one record-set file per group.
pub(crate) fn run_partition(
    session: &Session,
    catalog: &Path,
    mode: PartitionMode,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let out_dir = session.settings.output_dir(output);

    log::info!("Reading {}", catalog.display());
    let machines = parse_catalog_file(catalog)?;
    log::debug!("{} machines in catalog", machines.len());

    let groups = partition(&machines, mode);
    let bar = PercentBar::new(&format!("by {mode}"), session.quiet);
    let summary = write_partitions(&groups, &out_dir, &bar, &session.log)?;
    bar.finish();

    log::info!(
        "{} {} files ({} machines) to {}",
        "Wrote".if_supports_color(Stdout, |t| t.green()),
        summary.written,
        summary.records_written,
        out_dir.display()
    );
    if summary.skipped > 0 {
        log::info!(
            "  {} groups skipped",
            summary.skipped.if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    if summary.failed > 0 {
        log::warn!("{} groups could not be written", summary.failed);
    }
    Ok(())
}
