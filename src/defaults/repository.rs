// src/defaults/repository.rs

//! GitHub repository identity from the package manifest's `repository` field.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::fs::FileSystem;

/// `owner/name` of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// https://github.com/o/r(.git), git+https://..., git://..., ssh://git@...,
// git@github.com:o/r.git
static GITHUB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[/@.])github\.com[:/]([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$")
        .expect("valid regex")
});

// github:o/r and the bare npm shorthand o/r
static SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:github:)?([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?$")
        .expect("valid regex")
});

/// Parse one of the accepted repository URL forms.
pub fn parse_repository_url(url: &str) -> Option<RepoSlug> {
    let url = url.trim();
    let caps = GITHUB_URL
        .captures(url)
        .or_else(|| SHORTHAND.captures(url))?;
    Some(RepoSlug::new(&caps[1], &caps[2]))
}

/// Extract the slug from a manifest's `repository`, which is either a URL
/// string or an object with a `url` field.
pub fn slug_from_manifest(manifest: &Value) -> Option<RepoSlug> {
    let url = match manifest.get("repository")? {
        Value::String(url) => url.as_str(),
        Value::Object(obj) => obj.get("url")?.as_str()?,
        _ => return None,
    };
    parse_repository_url(url)
}

/// Read the manifest at `path`; anything missing or malformed yields `None`.
pub fn repository_from_manifest(fs: &dyn FileSystem, path: &Path) -> Option<RepoSlug> {
    if !fs.is_file(path) {
        return None;
    }
    let text = fs.read_to_string(path).ok()?;
    let manifest: Value = match serde_json::from_str(&text) {
        Ok(manifest) => manifest,
        Err(err) => {
            debug!(path = ?path, error = %err, "package manifest is not valid JSON");
            return None;
        }
    };
    slug_from_manifest(&manifest)
}
