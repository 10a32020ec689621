use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamekit_lib::{AssetKind, CopyOutcome, CopyRequest, copy_assets};

use crate::Session;
use crate::commands::{cancel_on_ctrl_c, runtime};
use crate::error::CliError;
use crate::progress::PercentBar;

/// Copy the assets named by `record_sets` from `from` to `to`, falling back
/// to the saved `copy.*` directories.
pub(crate) fn run_copy(
    session: &Session,
    kind: AssetKind,
    record_sets: Vec<PathBuf>,
    from: Option<PathBuf>,
    to: Option<PathBuf>,
) -> Result<(), CliError> {
    let source_dir = from
        .or_else(|| session.settings.copy.source_dir.clone())
        .ok_or_else(|| {
            CliError::config("no source directory: pass --from or set copy.source_dir")
        })?;
    let dest_dir = to
        .or_else(|| session.settings.copy.dest_dir.clone())
        .ok_or_else(|| {
            CliError::config("no destination directory: pass --to or set copy.dest_dir")
        })?;

    let request = CopyRequest {
        record_sets,
        source_dir,
        dest_dir,
        kind,
    };

    let rt = runtime()?;
    let outcome = rt.block_on(async {
        let cancel = cancel_on_ctrl_c();
        let bar = PercentBar::new(&format!("copying {kind}"), session.quiet);
        let result = copy_assets(&request, &bar, &session.log, &cancel).await;
        bar.finish();
        result
    })?;

    let summary = outcome.summary();
    let verb = match &outcome {
        CopyOutcome::Completed(_) => "Copied"
            .if_supports_color(Stdout, |t| t.green())
            .to_string(),
        CopyOutcome::Cancelled(_) => "Copied (before cancel)"
            .if_supports_color(Stdout, |t| t.yellow())
            .to_string(),
    };
    log::info!(
        "{verb} {} {} ({} bytes) into {}",
        summary.copied,
        kind,
        summary.bytes_copied,
        request.dest_dir.display()
    );
    log::info!(
        "  {} of {} record-set files processed, {} not in source",
        summary.record_sets_completed,
        summary.record_sets_total,
        summary.missing
    );
    if summary.invalid_names > 0 {
        log::warn!("{} record names were not plain file names", summary.invalid_names);
    }
    for failure in &summary.failures {
        log::warn!("  {}: {}", failure.source.display(), failure.message);
    }

    if outcome.is_cancelled() {
        return Err(CliError::Cancelled);
    }
    Ok(())
}
