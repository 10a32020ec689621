use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamekit_lib::dat::merge_to_files;

use crate::Session;
use crate::error::CliError;

const DEFAULT_XML: &str = "Merged.xml";

/// Merge record-set files into one XML list plus its DAT archive.
pub(crate) fn run_merge(
    session: &Session,
    inputs: &[PathBuf],
    xml: Option<PathBuf>,
    dat: Option<PathBuf>,
) -> Result<(), CliError> {
    let xml = xml.unwrap_or_else(|| session.settings.output_dir(None).join(DEFAULT_XML));
    let dat = dat.unwrap_or_else(|| xml.with_extension("dat"));

    let summary = merge_to_files(inputs, &xml, &dat, &session.log)?;

    log::info!(
        "{} {} records from {} files ({} machine lists, {} software lists)",
        "Merged".if_supports_color(Stdout, |t| t.green()),
        summary.records,
        summary.inputs,
        summary.machine_inputs,
        summary.software_inputs
    );
    log::info!("  XML: {}", xml.display());
    log::info!("  DAT: {}", dat.display());
    Ok(())
}
