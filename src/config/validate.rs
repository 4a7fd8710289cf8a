// src/config/validate.rs

use crate::config::model::{RawSettings, Settings};
use crate::errors::{DeployError, Result};

impl TryFrom<RawSettings> for Settings {
    type Error = DeployError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        Ok(Settings::new_unchecked(raw))
    }
}

fn validate_raw_settings(raw: &RawSettings) -> Result<()> {
    ensure_non_empty("pipeline_file", &raw.pipeline_file)?;
    ensure_non_empty("process_file", &raw.process_file)?;
    ensure_non_empty("local_config_file", &raw.local_config_file)?;
    ensure_non_empty("manifest_file", &raw.manifest_file)?;
    ensure_non_empty("namespace", &raw.namespace)?;
    ensure_non_empty("heroku_bin", &raw.heroku_bin)?;
    ensure_non_empty("travis_bin", &raw.travis_bin)?;

    if raw.query_timeout_ms == 0 {
        return Err(DeployError::ConfigError(
            "query_timeout_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn ensure_non_empty(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeployError::ConfigError(format!(
            "`{key}` must not be empty"
        )));
    }
    Ok(())
}
