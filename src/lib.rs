// src/lib.rs

pub mod cli;
pub mod config;
pub mod defaults;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod mutator;
pub mod pipeline;
pub mod precondition;
pub mod prompt;
pub mod secret;

use std::sync::Arc;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::load_settings;
use crate::defaults::Flow;
use crate::engine::{Outcome, Project, RunOptions, Runtime};
use crate::errors::Result;
use crate::exec::{ProcessGateway, RealProcessGateway};
use crate::fs::RealFileSystem;
use crate::prompt::{Prompter, QuestionId, ScriptedPrompter, TerminalPrompter};
use crate::secret::TravisCliEncryptor;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings loading
/// - the real filesystem, process gateway and Travis CLI encryptor
/// - a terminal or scripted prompter, depending on `--yes`
/// - the run itself
pub async fn run(args: CliArgs) -> Result<Outcome> {
    let fs = RealFileSystem;
    let settings = load_settings(&fs, &args.dir, args.config.as_deref())?;
    let project = Project::new(args.dir.clone(), settings);

    let gateway: Arc<dyn ProcessGateway> = Arc::new(RealProcessGateway);
    let encryptor = TravisCliEncryptor::new(Arc::clone(&gateway), &project.settings().travis_bin);

    let preset = preset_from_args(&args);
    let mut prompter: Box<dyn Prompter> = if args.yes {
        Box::new(preset)
    } else {
        Box::new(TerminalPrompter::from_preset(preset))
    };

    let options = RunOptions {
        flow: flow_from_args(&args),
        dry_run: args.dry_run,
    };
    debug!(?options, root = ?project.root(), "starting run");

    let runtime = Runtime::new(
        &project,
        &fs,
        gateway.as_ref(),
        &encryptor,
        prompter.as_mut(),
    );
    let outcome = runtime.run(options).await?;

    if let Outcome::DryRun { document } = &outcome {
        print!("{document}");
    }

    Ok(outcome)
}

pub fn flow_from_args(args: &CliArgs) -> Flow {
    if args.skip_token {
        Flow::AppOnly
    } else {
        Flow::WithToken
    }
}

/// Flag values answer their question without asking.
pub fn preset_from_args(args: &CliArgs) -> ScriptedPrompter {
    ScriptedPrompter::new()
        .with_optional(QuestionId::AppName, args.app.clone())
        .with_optional(QuestionId::GithubOwner, args.github_owner.clone())
        .with_optional(QuestionId::GithubRepo, args.github_repo.clone())
        .with_optional(QuestionId::HerokuToken, args.token.clone())
}
