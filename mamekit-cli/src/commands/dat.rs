use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamekit_lib::dat::decode;

use crate::error::CliError;

/// Print the records stored in a DAT archive.
///
/// Unlike the lenient library loader, a corrupt archive is reported as an
/// error here so the exit status reflects it.
pub(crate) fn run_dat_show(
    file: &Path,
    json: bool,
    limit: Option<usize>,
) -> Result<(), CliError> {
    let bytes = std::fs::read(file).map_err(|e| {
        std::io::Error::new(e.kind(), format!("cannot read {}: {e}", file.display()))
    })?;
    let records = decode(&bytes)?;
    let shown = &records.records()[..limit.unwrap_or(usize::MAX).min(records.len())];

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    let width = shown.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for record in shown {
        println!(
            "{:<width$}  {}",
            record.name.if_supports_color(Stdout, |t| t.bold()),
            record.description
        );
    }
    if shown.len() < records.len() {
        println!(
            "{}",
            format!("... {} more", records.len() - shown.len())
                .if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    log::info!("{} records in {}", records.len(), file.display());
    Ok(())
}
