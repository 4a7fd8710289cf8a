// src/defaults/heroku.rs

//! Best-effort queries against the Heroku CLI.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::exec::{CapturedOutput, ProcessGateway, race};

/// One entry of `heroku apps --json`. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HerokuApp {
    pub name: String,
    /// `None` when missing or not a recognisable timestamp.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// Accepts RFC 3339 timestamps (what the CLI prints) and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Interpret the output of `apps --json`.
///
/// A non-zero exit is trusted over whatever was printed: the list is empty
/// even if stdout happens to hold valid JSON.
pub fn apps_from_output(output: &CapturedOutput) -> Vec<HerokuApp> {
    if !output.success() {
        debug!(exit_code = ?output.exit_code, "`apps --json` did not succeed");
        return Vec::new();
    }

    match serde_json::from_str::<Vec<HerokuApp>>(&output.stdout) {
        Ok(apps) => apps,
        Err(err) => {
            debug!(error = %err, "`apps --json` printed unparseable JSON");
            Vec::new()
        }
    }
}

/// Name of the most recently created app, or `""` for an empty list.
///
/// Sorting is stable and ascending; apps without a usable timestamp sort
/// first, so they only win when nothing else is dated.
pub fn most_recent_app_name(mut apps: Vec<HerokuApp>) -> String {
    apps.sort_by_key(|app| app.created_at);
    apps.pop().map(|app| app.name).unwrap_or_default()
}

/// `heroku apps --json`, raced against `deadline` with an empty list.
pub async fn list_apps(
    gateway: &dyn ProcessGateway,
    heroku_bin: &str,
    deadline: Duration,
) -> Vec<HerokuApp> {
    let pending = gateway.run(heroku_bin, &["apps", "--json"]);
    race(
        async move { apps_from_output(&pending.await) },
        deadline,
        Vec::new(),
    )
    .await
}

/// `heroku auth:token`, trimmed, raced against `deadline` with `""`.
///
/// The exit code is not consulted; a logged-out CLI prints nothing useful
/// on stdout either way.
pub async fn auth_token(
    gateway: &dyn ProcessGateway,
    heroku_bin: &str,
    deadline: Duration,
) -> String {
    let pending = gateway.run(heroku_bin, &["auth:token"]);
    race(
        async move { pending.await.stdout.trim().to_string() },
        deadline,
        String::new(),
    )
    .await
}
