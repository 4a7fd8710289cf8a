// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `travis-to-heroku`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "travis-to-heroku",
    version,
    about = "Add Heroku deployment settings to an existing .travis.yml.",
    long_about = None
)]
pub struct CliArgs {
    /// Project root containing `.travis.yml` and `Procfile`.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Path to a settings file (TOML).
    ///
    /// Default: `TravisToHeroku.toml` in the project root, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TRAVIS_TO_HEROKU_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Heroku application name (skips the question).
    #[arg(long, value_name = "NAME")]
    pub app: Option<String>,

    /// GitHub user or organisation owning the repository.
    #[arg(long, value_name = "OWNER")]
    pub github_owner: Option<String>,

    /// GitHub repository name.
    #[arg(long, value_name = "REPO")]
    pub github_repo: Option<String>,

    /// Heroku auth token to encrypt into `deploy.api_key`.
    #[arg(long, value_name = "TOKEN", conflicts_with = "skip_token")]
    pub token: Option<String>,

    /// Only configure the app name; leave `api_key` out.
    #[arg(long)]
    pub skip_token: bool,

    /// Never ask: use flag values, falling back to resolved defaults.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Print the resulting `.travis.yml` instead of writing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
