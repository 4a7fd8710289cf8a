// src/defaults/mod.rs

//! Default resolution for the operator's questions.
//!
//! Each value comes from an ordered chain of sources, cheapest first:
//!
//! - app name: local generator config, then the newest app reported by
//!   `heroku apps --json` (time-boxed)
//! - auth token: `heroku auth:token` (time-boxed, token flow only)
//! - GitHub owner/repo: the package manifest's `repository` field
//!
//! The three derivations are independent and run concurrently. None of them
//! can fail: every degradation ends as "no default".

pub mod heroku;
pub mod local_config;
pub mod repository;

use std::path::Path;

use tracing::{debug, info};

use crate::config::Settings;
use crate::exec::ProcessGateway;
use crate::fs::FileSystem;

pub use heroku::HerokuApp;
pub use repository::RepoSlug;

/// Which questions the run asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Only the app name; no `api_key` is written.
    AppOnly,
    /// App name plus an encrypted Heroku token for authenticated deploys.
    WithToken,
}

/// Suggested answers. Lives only until the operator has confirmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDefaults {
    /// Empty when no source produced a name.
    pub app_name: String,
    pub github_owner: Option<String>,
    pub github_repo: Option<String>,
    pub heroku_token: Option<String>,
}

/// Borrowed view of everything the resolver reads from.
#[derive(Debug, Clone, Copy)]
pub struct DefaultResolver<'a> {
    fs: &'a dyn FileSystem,
    gateway: &'a dyn ProcessGateway,
    root: &'a Path,
    settings: &'a Settings,
}

impl<'a> DefaultResolver<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        gateway: &'a dyn ProcessGateway,
        root: &'a Path,
        settings: &'a Settings,
    ) -> Self {
        Self {
            fs,
            gateway,
            root,
            settings,
        }
    }

    /// Gather every default the flow needs.
    pub async fn resolve(&self, flow: Flow) -> ResolvedDefaults {
        let token = async {
            match flow {
                Flow::WithToken => Some(self.auth_token().await),
                Flow::AppOnly => None,
            }
        };
        let repo = async { self.repository() };

        let (app_name, token, repo) = tokio::join!(self.app_name(), token, repo);

        let defaults = ResolvedDefaults {
            app_name,
            github_owner: repo.as_ref().map(|r| r.owner.clone()),
            github_repo: repo.map(|r| r.name),
            heroku_token: token.filter(|t| !t.is_empty()),
        };

        info!(
            app_name = %defaults.app_name,
            github_owner = ?defaults.github_owner,
            github_repo = ?defaults.github_repo,
            has_token = defaults.heroku_token.is_some(),
            "resolved defaults"
        );
        defaults
    }

    /// First non-empty name from the chain, or `""`.
    pub async fn app_name(&self) -> String {
        if let Some(name) = self.app_name_from_local_config() {
            debug!(%name, "app name from local config");
            return name;
        }
        self.most_recent_heroku_app().await
    }

    pub fn app_name_from_local_config(&self) -> Option<String> {
        local_config::app_name_from_local_config(
            self.fs,
            &self.root.join(&self.settings.local_config_file),
            &self.settings.namespace,
        )
    }

    pub async fn most_recent_heroku_app(&self) -> String {
        let apps = heroku::list_apps(
            self.gateway,
            &self.settings.heroku_bin,
            self.settings.query_timeout,
        )
        .await;
        debug!(count = apps.len(), "heroku apps listed");
        heroku::most_recent_app_name(apps)
    }

    pub async fn auth_token(&self) -> String {
        heroku::auth_token(
            self.gateway,
            &self.settings.heroku_bin,
            self.settings.query_timeout,
        )
        .await
    }

    pub fn repository(&self) -> Option<RepoSlug> {
        repository::repository_from_manifest(
            self.fs,
            &self.root.join(&self.settings.manifest_file),
        )
    }
}
