use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use mamekit_lib::settings::{KEYS, load_settings_string, set_value, unset_value};

use crate::error::CliError;

pub(crate) fn run_config_show(path: &Path) -> Result<(), CliError> {
    println!(
        "{} {}",
        "Settings file:".if_supports_color(Stdout, |t| t.bold()),
        path.display()
    );
    match load_settings_string(path) {
        Some(contents) if !contents.trim().is_empty() => {
            println!();
            print!("{contents}");
        }
        Some(_) => println!("  (empty)"),
        None if path.exists() => {
            println!(
                "  {}",
                "(unreadable or not valid TOML)".if_supports_color(Stdout, |t| t.red())
            );
        }
        None => println!("  (not created yet)"),
    }
    println!();
    println!(
        "{} {}",
        "Keys:".if_supports_color(Stdout, |t| t.dimmed()),
        KEYS.join(", ")
    );
    Ok(())
}

pub(crate) fn run_config_set(path: &Path, key: &str, value: &str) -> Result<(), CliError> {
    set_value(path, key, value)?;
    log::info!(
        "{} {key} = {value}",
        "Saved".if_supports_color(Stdout, |t| t.green())
    );
    Ok(())
}

pub(crate) fn run_config_unset(path: &Path, key: &str) -> Result<(), CliError> {
    unset_value(path, key)?;
    log::info!(
        "{} {key}",
        "Removed".if_supports_color(Stdout, |t| t.green())
    );
    Ok(())
}
