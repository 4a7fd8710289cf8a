use std::sync::{Arc, Mutex};

use travis_to_heroku::defaults::RepoSlug;
use travis_to_heroku::errors::DeployError;
use travis_to_heroku::secret::{EncryptFuture, SecretEncryptor};

/// An encryptor that:
/// - records `(repo, plaintext)` for every call
/// - returns a fixed blob, or fails when built with [`StubEncryptor::failing`]
#[derive(Debug, Clone)]
pub struct StubEncryptor {
    result: Result<String, String>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl StubEncryptor {
    pub fn returning(blob: &str) -> Self {
        Self {
            result: Ok(blob.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            result: Err(reason.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SecretEncryptor for StubEncryptor {
    fn encrypt<'a>(&'a self, repo: &'a RepoSlug, plaintext: &'a str) -> EncryptFuture<'a> {
        self.calls
            .lock()
            .unwrap()
            .push((repo.to_string(), plaintext.to_string()));
        let result = self.result.clone().map_err(DeployError::EncryptionError);
        Box::pin(async move { result })
    }
}
