// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Settings as read from `TravisToHeroku.toml`.
///
/// ```toml
/// pipeline_file = ".travis.yml"
/// process_file = "Procfile"
/// namespace = "donejs-heroku"
/// heroku_bin = "heroku"
/// query_timeout_ms = 2000
/// ```
///
/// Every key is optional; a missing file is the same as an empty one.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    /// CI pipeline file that receives the deploy settings.
    #[serde(default = "default_pipeline_file")]
    pub pipeline_file: String,

    /// Process-declaration file; only its existence matters.
    #[serde(default = "default_process_file")]
    pub process_file: String,

    /// Generator state file that may remember a previously chosen app name.
    #[serde(default = "default_local_config_file")]
    pub local_config_file: String,

    /// Package manifest carrying the `repository` field.
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,

    /// Top-level key inside `local_config_file` owned by this tool.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Heroku CLI executable.
    #[serde(default = "default_heroku_bin")]
    pub heroku_bin: String,

    /// Travis CLI executable, used for encrypting the token.
    #[serde(default = "default_travis_bin")]
    pub travis_bin: String,

    /// Deadline for each best-effort Heroku CLI query.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            pipeline_file: default_pipeline_file(),
            process_file: default_process_file(),
            local_config_file: default_local_config_file(),
            manifest_file: default_manifest_file(),
            namespace: default_namespace(),
            heroku_bin: default_heroku_bin(),
            travis_bin: default_travis_bin(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn default_pipeline_file() -> String {
    ".travis.yml".to_string()
}

fn default_process_file() -> String {
    "Procfile".to_string()
}

fn default_local_config_file() -> String {
    ".yo-rc.json".to_string()
}

fn default_manifest_file() -> String {
    "package.json".to_string()
}

fn default_namespace() -> String {
    "donejs-heroku".to_string()
}

fn default_heroku_bin() -> String {
    "heroku".to_string()
}

fn default_travis_bin() -> String {
    "travis".to_string()
}

fn default_query_timeout_ms() -> u64 {
    2000
}

/// Validated settings.
///
/// Only constructible through `TryFrom<RawSettings>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub pipeline_file: String,
    pub process_file: String,
    pub local_config_file: String,
    pub manifest_file: String,
    pub namespace: String,
    pub heroku_bin: String,
    pub travis_bin: String,
    pub query_timeout: Duration,
}

impl Settings {
    pub(crate) fn new_unchecked(raw: RawSettings) -> Self {
        Self {
            pipeline_file: raw.pipeline_file,
            process_file: raw.process_file,
            local_config_file: raw.local_config_file,
            manifest_file: raw.manifest_file,
            namespace: raw.namespace,
            heroku_bin: raw.heroku_bin,
            travis_bin: raw.travis_bin,
            query_timeout: Duration::from_millis(raw.query_timeout_ms),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new_unchecked(RawSettings::default())
    }
}
