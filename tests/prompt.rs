// tests/prompt.rs

use travis_to_heroku::defaults::{Flow, RepoSlug, ResolvedDefaults};
use travis_to_heroku::errors::DeployError;
use travis_to_heroku::prompt::{
    QuestionId, ScriptedPrompter, collect_answers, questions, token_or_default,
};

fn defaults() -> ResolvedDefaults {
    ResolvedDefaults {
        app_name: "resolved-app".to_string(),
        github_owner: Some("donejs".to_string()),
        github_repo: Some("place-my-order".to_string()),
        heroku_token: Some("cli-token".to_string()),
    }
}

#[test]
fn app_only_flow_asks_one_question() {
    let qs = questions(Flow::AppOnly, &defaults());
    assert_eq!(qs.len(), 1);
    assert_eq!(qs[0].id, QuestionId::AppName);
    assert_eq!(qs[0].default.as_deref(), Some("resolved-app"));
}

#[test]
fn token_flow_asks_repository_first_and_token_last() {
    let ids: Vec<QuestionId> = questions(Flow::WithToken, &defaults())
        .into_iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(
        ids,
        [
            QuestionId::GithubOwner,
            QuestionId::GithubRepo,
            QuestionId::AppName,
            QuestionId::HerokuToken
        ]
    );
}

#[test]
fn empty_resolved_app_name_has_no_default() {
    let qs = questions(Flow::AppOnly, &ResolvedDefaults::default());
    assert_eq!(qs[0].default, None);
}

#[tokio::test]
async fn defaults_are_accepted_when_nothing_is_preset() {
    let mut prompter = ScriptedPrompter::new();
    let answers = collect_answers(&mut prompter, Flow::WithToken, &defaults())
        .await
        .unwrap();

    assert_eq!(answers.app_name, "resolved-app");
    let token = answers.token.unwrap();
    assert_eq!(token.repo, RepoSlug::new("donejs", "place-my-order"));
    assert_eq!(token.heroku_token, "cli-token");
}

#[tokio::test]
async fn preset_answers_override_defaults_and_are_trimmed() {
    let mut prompter = ScriptedPrompter::new()
        .with_answer(QuestionId::AppName, "  place-my-order-1234 ")
        .with_optional(QuestionId::GithubOwner, Some("foo".to_string()))
        .with_optional(QuestionId::GithubRepo, None);

    let answers = collect_answers(&mut prompter, Flow::WithToken, &defaults())
        .await
        .unwrap();

    assert_eq!(answers.app_name, "place-my-order-1234");
    assert_eq!(answers.token.unwrap().repo, RepoSlug::new("foo", "place-my-order"));
}

#[tokio::test]
async fn app_only_flow_has_no_token_answers() {
    let mut prompter = ScriptedPrompter::new();
    let answers = collect_answers(&mut prompter, Flow::AppOnly, &defaults())
        .await
        .unwrap();
    assert_eq!(answers.token, None);
}

#[tokio::test]
async fn empty_app_name_is_rejected() {
    let mut prompter = ScriptedPrompter::new();
    let err = collect_answers(&mut prompter, Flow::AppOnly, &ResolvedDefaults::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DeployError::PromptError(_)));
}

#[tokio::test]
async fn token_flow_requires_repository_and_token() {
    let without_repo = ResolvedDefaults {
        github_owner: None,
        ..defaults()
    };
    let err = collect_answers(&mut ScriptedPrompter::new(), Flow::WithToken, &without_repo)
        .await
        .unwrap_err();
    assert!(matches!(err, DeployError::PromptError(ref m) if m.contains("GitHub")));

    let without_token = ResolvedDefaults {
        heroku_token: None,
        ..defaults()
    };
    let err = collect_answers(&mut ScriptedPrompter::new(), Flow::WithToken, &without_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DeployError::PromptError(ref m) if m.contains("token")));
}

#[test]
fn empty_masked_token_keeps_the_cli_token() {
    assert_eq!(token_or_default(String::new(), Some("cli-token")), "cli-token");
    assert_eq!(token_or_default("  ".to_string(), Some("cli-token")), "cli-token");
    assert_eq!(token_or_default("typed".to_string(), Some("cli-token")), "typed");
    assert_eq!(token_or_default(String::new(), None), "");
}
