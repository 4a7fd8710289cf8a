// src/config/loader.rs

use std::path::Path;

use tracing::debug;

use crate::config::model::{RawSettings, Settings};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Settings file looked up in the project root when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "TravisToHeroku.toml";

/// Load a settings file and return the raw, unvalidated `RawSettings`.
pub fn load_from_path(fs: &dyn FileSystem, path: &Path) -> Result<RawSettings> {
    let contents = fs.read_to_string(path)?;
    let raw: RawSettings = toml::from_str(&contents)?;
    Ok(raw)
}

/// Resolve and validate the settings for a run.
///
/// - An explicit path must exist.
/// - Without one, `TravisToHeroku.toml` in `root` is used when present,
///   otherwise every key takes its default.
pub fn load_settings(
    fs: &dyn FileSystem,
    root: &Path,
    explicit: Option<&Path>,
) -> Result<Settings> {
    let raw = match explicit {
        Some(path) => load_from_path(fs, path)?,
        None => {
            let candidate = root.join(DEFAULT_SETTINGS_FILE);
            if fs.is_file(&candidate) {
                load_from_path(fs, &candidate)?
            } else {
                debug!(path = ?candidate, "no settings file; using defaults");
                RawSettings::default()
            }
        }
    };

    Settings::try_from(raw)
}
