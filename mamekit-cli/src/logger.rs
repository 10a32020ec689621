//! Console logger.
//!
//! Commands print through the `log` facade. Info lines are printed as-is,
//! warnings and errors get a colored tag, and `--verbose` adds timestamps
//! and debug output. `RUST_LOG` still overrides the level.

use std::io::Write;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

pub(crate) fn init(quiet: bool, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| {
            if verbose {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            match record.level() {
                Level::Error => writeln!(
                    buf,
                    "{} {}",
                    "error:".if_supports_color(Stdout, |t| t.red()),
                    record.args()
                ),
                Level::Warn => writeln!(
                    buf,
                    "{} {}",
                    "warning:".if_supports_color(Stdout, |t| t.yellow()),
                    record.args()
                ),
                Level::Info => writeln!(buf, "{}", record.args()),
                Level::Debug | Level::Trace => writeln!(
                    buf,
                    "{}",
                    format!("[{}] {}", record.target(), record.args())
                        .if_supports_color(Stdout, |t| t.dimmed())
                ),
            }
        });

    // A second init (tests, embedding) keeps the first logger
    let _ = builder.try_init();
}
