// src/pipeline.rs

//! The CI pipeline document (`.travis.yml`) and the two sections this tool
//! adds to it.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::errors::{DeployError, Result};

pub const DEPLOY_KEY: &str = "deploy";
pub const BEFORE_DEPLOY_KEY: &str = "before_deploy";

/// Commands run before every deployment: commit the build output so the
/// Heroku push contains it.
pub const BEFORE_DEPLOY_STEPS: [&str; 5] = [
    r#"git config --global user.email "me@example.com""#,
    r#"git config --global user.name "deploy bot""#,
    "node build",
    "git add dist/ --force",
    r#"git commit -m "Updating build.""#,
];

/// Parsed pipeline document.
///
/// Top-level keys keep their original order; serializing writes every
/// unrelated key back unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    doc: Mapping,
}

impl PipelineConfig {
    /// Parse the textual document. An empty file is an empty mapping.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        match serde_yaml::from_str::<Value>(text)? {
            Value::Mapping(doc) => Ok(Self { doc }),
            Value::Null => Ok(Self::default()),
            other => Err(DeployError::ConfigError(format!(
                "pipeline config must be a mapping at the top level, found {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    /// A section counts as present unless it is missing or `null`.
    pub fn has_section(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_null())
    }

    pub fn has_deploy(&self) -> bool {
        self.has_section(DEPLOY_KEY)
    }

    pub fn has_before_deploy(&self) -> bool {
        self.has_section(BEFORE_DEPLOY_KEY)
    }

    pub(crate) fn set(&mut self, key: &str, value: Value) {
        self.doc.insert(Value::String(key.to_string()), value);
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.doc)?)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// The `deploy:` section written for Heroku.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploySettings {
    provider: &'static str,
    skip_cleanup: bool,
    app: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

impl DeploySettings {
    pub fn heroku(app: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            provider: "heroku",
            skip_cleanup: true,
            app: app.into(),
            api_key,
        }
    }

    pub fn provider(&self) -> &str {
        self.provider
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}
