// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Only the commit-critical steps (settings, reading/writing the pipeline
//! file, encryption, operator answers) produce errors. Best-effort lookups
//! degrade to empty defaults and never reach this type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    #[error("Invalid answer: {0}")]
    PromptError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DeployError>;
