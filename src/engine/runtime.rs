// src/engine/runtime.rs

use tracing::{error, info};

use crate::defaults::DefaultResolver;
use crate::errors::{DeployError, Result};
use crate::exec::ProcessGateway;
use crate::fs::FileSystem;
use crate::mutator;
use crate::pipeline::{BEFORE_DEPLOY_STEPS, DeploySettings, PipelineConfig};
use crate::precondition::{self, Readiness};
use crate::prompt::{Prompter, collect_answers};
use crate::secret::SecretEncryptor;

use super::{Outcome, Project, RunOptions};

/// One run over one project.
///
/// Phases, strictly in order: precondition check, default resolution,
/// operator confirmation, encryption, mutation, write. The write is the only
/// side effect and happens last, so any earlier failure leaves the project
/// untouched.
pub struct Runtime<'a> {
    project: &'a Project,
    fs: &'a dyn FileSystem,
    gateway: &'a dyn ProcessGateway,
    encryptor: &'a dyn SecretEncryptor,
    prompter: &'a mut dyn Prompter,
}

impl<'a> Runtime<'a> {
    pub fn new(
        project: &'a Project,
        fs: &'a dyn FileSystem,
        gateway: &'a dyn ProcessGateway,
        encryptor: &'a dyn SecretEncryptor,
        prompter: &'a mut dyn Prompter,
    ) -> Self {
        Self {
            project,
            fs,
            gateway,
            encryptor,
            prompter,
        }
    }

    pub async fn run(self, options: RunOptions) -> Result<Outcome> {
        let (pipeline, readiness) = self.check()?;
        if let Readiness::Abort(reason) = readiness {
            error!(%reason, "not adding deploy settings");
            return Ok(Outcome::Aborted(reason));
        }
        let pipeline = pipeline.unwrap_or_default();

        let defaults = DefaultResolver::new(
            self.fs,
            self.gateway,
            self.project.root(),
            self.project.settings(),
        )
        .resolve(options.flow)
        .await;

        let answers = collect_answers(self.prompter, options.flow, &defaults).await?;
        drop(defaults);

        let api_key = match &answers.token {
            Some(token) => Some(
                self.encryptor
                    .encrypt(&token.repo, &token.heroku_token)
                    .await?,
            ),
            None => None,
        };

        let settings = DeploySettings::heroku(answers.app_name, api_key);
        let document = mutator::apply(pipeline, &settings, &BEFORE_DEPLOY_STEPS)?;

        if options.dry_run {
            info!("dry run; pipeline config left unchanged");
            return Ok(Outcome::DryRun { document });
        }

        let path = self.project.pipeline_path();
        info!(path = ?path, app = %settings.app(), "adding deploy settings");
        self.fs
            .write(&path, document.as_bytes())
            .map_err(|e| DeployError::Other(e.context("writing pipeline config")))?;

        Ok(Outcome::Written { path, document })
    }

    /// Read what the precondition rules need and apply them.
    fn check(&self) -> Result<(Option<PipelineConfig>, Readiness)> {
        let pipeline_path = self.project.pipeline_path();
        let pipeline_exists = self.fs.is_file(&pipeline_path);

        let pipeline = if pipeline_exists {
            let text = self.fs.read_to_string(&pipeline_path)?;
            Some(PipelineConfig::parse(&text)?)
        } else {
            None
        };

        let process_exists = self.fs.exists(&self.project.process_path());
        let readiness = precondition::check(pipeline_exists, process_exists, pipeline.as_ref());
        Ok((pipeline, readiness))
    }
}
