use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamekit_lib::aggregate_with_workers;
use mamekit_lib::dat::{RecordShape, write_record_set_file};
use mamekit_lib::util::worker_count;

use crate::Session;
use crate::commands::{cancel_on_ctrl_c, runtime};
use crate::error::CliError;
use crate::progress::PercentBar;

const DEFAULT_OUTPUT: &str = "Softwares.xml";

/// Aggregate the software lists in `dir` into one Softwares record-set.
pub(crate) fn run_software(
    session: &Session,
    dir: &Path,
    output: Option<PathBuf>,
    workers: Option<usize>,
) -> Result<(), CliError> {
    let path =
        output.unwrap_or_else(|| session.settings.output_dir(None).join(DEFAULT_OUTPUT));
    let workers = worker_count(workers.or(session.settings.workers));

    let rt = runtime()?;
    let records = rt.block_on(async {
        let cancel = cancel_on_ctrl_c();
        let bar = PercentBar::new("software lists", session.quiet);
        let result = aggregate_with_workers(dir, workers, &bar, &session.log, &cancel).await;
        bar.finish();
        result
    })?;

    write_record_set_file(&path, RecordShape::Software, &records)?;
    log::info!(
        "{} {} softwares to {}",
        "Wrote".if_supports_color(Stdout, |t| t.green()),
        records.len(),
        path.display()
    );
    Ok(())
}
