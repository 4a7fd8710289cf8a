// src/prompt.rs

//! Operator confirmation.
//!
//! The resolved defaults become the questions' default answers. A
//! [`Prompter`] turns each question into a final answer: interactively with
//! `dialoguer`, or from preset values for `--yes` runs and tests.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use dialoguer::{Input, Password};
use tracing::debug;

use crate::defaults::{Flow, RepoSlug, ResolvedDefaults};
use crate::errors::{DeployError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionId {
    GithubOwner,
    GithubRepo,
    AppName,
    HerokuToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub message: &'static str,
    pub default: Option<String>,
}

/// Final values after confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub app_name: String,
    /// Set in the token flow only.
    pub token: Option<TokenAnswers>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAnswers {
    pub repo: RepoSlug,
    pub heroku_token: String,
}

pub type PromptFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

pub trait Prompter: Send {
    fn ask<'a>(&'a mut self, question: &'a Question) -> PromptFuture<'a>;
}

/// Questions for `flow`, in the order they are asked.
pub fn questions(flow: Flow, defaults: &ResolvedDefaults) -> Vec<Question> {
    let app = Question {
        id: QuestionId::AppName,
        message: "What is the name of the Heroku application?",
        default: Some(defaults.app_name.clone()).filter(|n| !n.is_empty()),
    };

    match flow {
        Flow::AppOnly => vec![app],
        Flow::WithToken => vec![
            Question {
                id: QuestionId::GithubOwner,
                message: "What is the GitHub user or organisation that owns the repository?",
                default: defaults.github_owner.clone(),
            },
            Question {
                id: QuestionId::GithubRepo,
                message: "What is the name of the GitHub repository?",
                default: defaults.github_repo.clone(),
            },
            app,
            Question {
                id: QuestionId::HerokuToken,
                message: "What is your Heroku auth token?",
                default: defaults.heroku_token.clone(),
            },
        ],
    }
}

/// Ask every question and validate the result.
pub async fn collect_answers(
    prompter: &mut dyn Prompter,
    flow: Flow,
    defaults: &ResolvedDefaults,
) -> Result<Answers> {
    let mut given: HashMap<QuestionId, String> = HashMap::new();
    for question in questions(flow, defaults) {
        let answer = prompter.ask(&question).await?;
        debug!(question = ?question.id, "answered");
        given.insert(question.id, answer.trim().to_string());
    }

    let mut take = |id: QuestionId| given.remove(&id).unwrap_or_default();

    let app_name = take(QuestionId::AppName);
    if app_name.is_empty() {
        return Err(DeployError::PromptError(
            "a Heroku application name is required".to_string(),
        ));
    }

    let token = match flow {
        Flow::AppOnly => None,
        Flow::WithToken => {
            let owner = take(QuestionId::GithubOwner);
            let repo = take(QuestionId::GithubRepo);
            let heroku_token = take(QuestionId::HerokuToken);
            if owner.is_empty() || repo.is_empty() {
                return Err(DeployError::PromptError(
                    "GitHub owner and repository are required to encrypt the token".to_string(),
                ));
            }
            if heroku_token.is_empty() {
                return Err(DeployError::PromptError(
                    "a Heroku auth token is required; run `heroku login` or pass --token"
                        .to_string(),
                ));
            }
            Some(TokenAnswers {
                repo: RepoSlug::new(owner, repo),
                heroku_token,
            })
        }
    };

    Ok(Answers { app_name, token })
}

/// Answers without a terminal: preset values first, then the defaults.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    preset: HashMap<QuestionId, String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(mut self, id: QuestionId, value: impl Into<String>) -> Self {
        self.preset.insert(id, value.into());
        self
    }

    pub fn with_optional(self, id: QuestionId, value: Option<String>) -> Self {
        match value {
            Some(v) => self.with_answer(id, v),
            None => self,
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask<'a>(&'a mut self, question: &'a Question) -> PromptFuture<'a> {
        let answer = self
            .preset
            .get(&question.id)
            .cloned()
            .or_else(|| question.default.clone())
            .unwrap_or_default();
        Box::pin(async move { Ok(answer) })
    }
}

/// Interactive prompter. Preset answers (from flags) skip their question.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompter {
    preset: HashMap<QuestionId, String>,
}

impl TerminalPrompter {
    pub fn from_preset(scripted: ScriptedPrompter) -> Self {
        Self {
            preset: scripted.preset,
        }
    }
}

impl Prompter for TerminalPrompter {
    fn ask<'a>(&'a mut self, question: &'a Question) -> PromptFuture<'a> {
        let preset = self.preset.get(&question.id).cloned();
        let question = question.clone();

        Box::pin(async move {
            if let Some(answer) = preset {
                return Ok(answer);
            }
            // dialoguer blocks on the terminal; keep it off the runtime thread.
            tokio::task::spawn_blocking(move || ask_on_terminal(&question))
                .await
                .map_err(|e| DeployError::PromptError(format!("prompt task failed: {e}")))?
        })
    }
}

fn ask_on_terminal(question: &Question) -> Result<String> {
    let to_prompt_error = |e: dialoguer::Error| DeployError::PromptError(e.to_string());

    match (question.id, &question.default) {
        (QuestionId::HerokuToken, default) => {
            let prompt = match default {
                Some(_) => format!("{} (Enter keeps the CLI token)", question.message),
                None => question.message.to_string(),
            };
            let entered = Password::new()
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact()
                .map_err(to_prompt_error)?;
            Ok(token_or_default(entered, default.as_deref()))
        }
        (_, default) => {
            let mut input = Input::<String>::new()
                .with_prompt(question.message)
                .allow_empty(true);
            if let Some(default) = default {
                input = input.default(default.clone());
            }
            input.interact_text().map_err(to_prompt_error)
        }
    }
}

/// A masked token answer left empty keeps the token the CLI reported.
pub fn token_or_default(entered: String, default: Option<&str>) -> String {
    match default {
        Some(default) if entered.trim().is_empty() => default.to_string(),
        _ => entered,
    }
}
