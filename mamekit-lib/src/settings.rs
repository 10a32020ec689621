//! Saved settings shared by every frontend.
//!
//! The file lives at `~/.config/mamekit/settings.toml`:
//!
//! ```toml
//! workers = 4
//!
//! [paths]
//! output_dir = "/data/mame/lists"
//!
//! [copy]
//! source_dir = "/data/mame/roms"
//! dest_dir = "/media/cab/roms"
//!
//! [log]
//! file = "/data/mame/mamekit.log"
//! ```
//!
//! Command-line arguments always win over saved values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Keys accepted by [`set_value`] and [`unset_value`].
pub const KEYS: &[&str] = &[
    "paths.output_dir",
    "copy.source_dir",
    "copy.dest_dir",
    "log.file",
    "workers",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    pub paths: PathSettings,
    pub copy: CopySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Settings {
    /// Resolve an output directory: explicit argument, then saved value,
    /// then the current directory.
    pub fn output_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.paths.output_dir.clone())
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("mamekit").join("settings.toml")
}

/// Load settings from the canonical path. A missing file yields defaults.
pub fn load_settings() -> Result<Settings, Error> {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &Path) -> Result<Settings, Error> {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents)
            .map_err(|e| Error::settings(format!("{}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

/// Write `settings` to `path` atomically.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), Error> {
    let doc = toml::Value::try_from(settings).map_err(|e| Error::settings(e.to_string()))?;
    write_document(path, &doc)
}

/// Set one dotted key (see [`KEYS`]).
///
/// Works on the raw TOML document so keys written by other tools survive.
pub fn set_value(path: &Path, key: &str, value: &str) -> Result<(), Error> {
    let parsed = if key == "workers" {
        let n: i64 = value
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| Error::settings(format!("workers must be a positive integer, got '{value}'")))?;
        toml::Value::Integer(n)
    } else {
        toml::Value::String(value.to_string())
    };
    update_document(path, key, Some(parsed))
}

/// Remove one dotted key (see [`KEYS`]). Removing an absent key is not an error.
pub fn unset_value(path: &Path, key: &str) -> Result<(), Error> {
    update_document(path, key, None)
}

/// The settings file pretty-printed, if it exists and parses.
pub fn load_settings_string(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

fn update_document(path: &Path, key: &str, value: Option<toml::Value>) -> Result<(), Error> {
    if !KEYS.contains(&key) {
        return Err(Error::settings(format!(
            "unknown key '{key}' (expected one of: {})",
            KEYS.join(", ")
        )));
    }

    let mut doc: toml::Value = match std::fs::read_to_string(path) {
        Ok(contents) => contents
            .parse()
            .map_err(|e| Error::settings(format!("{}: {e}", path.display())))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            toml::Value::Table(Default::default())
        }
        Err(e) => return Err(e.into()),
    };

    let root = doc
        .as_table_mut()
        .ok_or_else(|| Error::settings("settings root is not a table"))?;

    let (table, leaf) = match key.split_once('.') {
        Some((section, leaf)) => {
            let section_value = root
                .entry(section)
                .or_insert_with(|| toml::Value::Table(Default::default()));
            let table = section_value
                .as_table_mut()
                .ok_or_else(|| Error::settings(format!("[{section}] is not a table")))?;
            (table, leaf)
        }
        None => (root, key),
    };

    match value {
        Some(v) => {
            table.insert(leaf.to_string(), v);
        }
        None => {
            table.remove(leaf);
        }
    }

    write_document(path, &doc)
}

fn write_document(path: &Path, doc: &toml::Value) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(doc).map_err(|e| Error::settings(e.to_string()))?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
