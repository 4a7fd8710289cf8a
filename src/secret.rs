// src/secret.rs

//! Token encryption for `deploy.api_key`.
//!
//! The cryptography belongs to an external collaborator; this module only
//! fixes the contract and provides an implementation backed by the Travis
//! CLI. Any failure is fatal to the run and is never retried.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::info;

use crate::defaults::RepoSlug;
use crate::errors::{DeployError, Result};
use crate::exec::ProcessGateway;

pub type EncryptFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Turns a plaintext secret into a blob safe to commit for `repo`.
pub trait SecretEncryptor: Send + Sync {
    fn encrypt<'a>(&'a self, repo: &'a RepoSlug, plaintext: &'a str) -> EncryptFuture<'a>;
}

/// Runs `travis encrypt --no-interactive -r <owner>/<repo>` with the secret
/// on stdin, so it never shows up in the process table or in logs.
///
/// Not time-boxed: this step is commit-critical, so it waits for the CLI.
#[derive(Debug, Clone)]
pub struct TravisCliEncryptor {
    gateway: Arc<dyn ProcessGateway>,
    travis_bin: String,
}

impl TravisCliEncryptor {
    pub fn new(gateway: Arc<dyn ProcessGateway>, travis_bin: impl Into<String>) -> Self {
        Self {
            gateway,
            travis_bin: travis_bin.into(),
        }
    }
}

impl SecretEncryptor for TravisCliEncryptor {
    fn encrypt<'a>(&'a self, repo: &'a RepoSlug, plaintext: &'a str) -> EncryptFuture<'a> {
        Box::pin(async move {
            let slug = repo.to_string();
            info!(repo = %slug, "encrypting heroku token with the travis CLI");

            let output = self
                .gateway
                .run_with_stdin(
                    &self.travis_bin,
                    &["encrypt", "--no-interactive", "-r", slug.as_str()],
                    Some(plaintext),
                )
                .await;

            match output.exit_code {
                None => {
                    return Err(DeployError::EncryptionError(format!(
                        "could not run '{}'; is the Travis CLI installed?",
                        self.travis_bin
                    )));
                }
                Some(0) => {}
                Some(code) => {
                    return Err(DeployError::EncryptionError(format!(
                        "'{} encrypt' exited with status {code}",
                        self.travis_bin
                    )));
                }
            }

            extract_secure_value(&output.stdout).ok_or_else(|| {
                DeployError::EncryptionError(format!(
                    "'{} encrypt' printed no encrypted value",
                    self.travis_bin
                ))
            })
        })
    }
}

/// Pull the blob out of the CLI's output: the last non-empty line, with an
/// optional `secure:` prefix and surrounding quotes removed.
pub fn extract_secure_value(stdout: &str) -> Option<String> {
    let line = stdout.lines().map(str::trim).filter(|l| !l.is_empty()).last()?;
    let line = line.strip_prefix("secure:").map(str::trim).unwrap_or(line);
    let value = line.trim_matches('"').trim();
    (!value.is_empty()).then(|| value.to_string())
}
