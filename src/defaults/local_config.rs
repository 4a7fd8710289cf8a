// src/defaults/local_config.rs

//! App name remembered in the generator's local state file (`.yo-rc.json`).

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::fs::FileSystem;

/// Field holding the app name under the tool's namespace.
pub const APP_NAME_FIELD: &str = "herokuAppName";

/// Look up `<namespace>.herokuAppName`.
///
/// A missing file, invalid JSON, a wrong shape or an empty string all mean
/// "no default".
pub fn app_name_from_local_config(
    fs: &dyn FileSystem,
    path: &Path,
    namespace: &str,
) -> Option<String> {
    if !fs.is_file(path) {
        return None;
    }

    let text = match fs.read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            debug!(path = ?path, error = %err, "local config unreadable");
            return None;
        }
    };

    let json: Value = match serde_json::from_str(&text) {
        Ok(json) => json,
        Err(err) => {
            debug!(path = ?path, error = %err, "local config is not valid JSON");
            return None;
        }
    };

    json.get(namespace)?
        .get(APP_NAME_FIELD)?
        .as_str()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
