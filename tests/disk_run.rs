// tests/disk_run.rs

use std::fs;

use clap::Parser;
use tempfile::tempdir;
use travis_to_heroku::cli::CliArgs;
use travis_to_heroku::defaults::Flow;
use travis_to_heroku::engine::Outcome;
use travis_to_heroku::fs::{FileSystem, RealFileSystem};
use travis_to_heroku::precondition::AbortReason;
use travis_to_heroku::{flow_from_args, run};
use travis_to_heroku_test_utils::builders::{PROCFILE_FIXTURE, TRAVIS_FIXTURE};
use travis_to_heroku_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn args(dir: &std::path::Path, extra: &[&str]) -> CliArgs {
    let mut argv = vec!["travis-to-heroku", "--dir", dir.to_str().unwrap()];
    argv.extend_from_slice(extra);
    CliArgs::parse_from(argv)
}

#[tokio::test]
async fn non_interactive_run_rewrites_the_file_on_disk() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    fs::write(dir.path().join(".travis.yml"), TRAVIS_FIXTURE)?;
    fs::write(dir.path().join("Procfile"), PROCFILE_FIXTURE)?;
    // Point the CLI lookups at something that cannot exist.
    fs::write(
        dir.path().join("TravisToHeroku.toml"),
        "heroku_bin = \"missing-heroku-cli-7c1e\"\nquery_timeout_ms = 200\n",
    )?;

    let outcome = run(args(
        dir.path(),
        &["--yes", "--skip-token", "--app", "place-my-order-1234"],
    ))
    .await?;

    assert!(matches!(outcome, Outcome::Written { .. }));
    let text = fs::read_to_string(dir.path().join(".travis.yml"))?;
    assert!(text.contains("app: place-my-order-1234"));
    assert!(text.contains("provider: heroku"));
    assert!(text.contains("node build"));
    assert!(!text.contains("api_key"));
    assert!(text.contains("language: node_js"));

    let leftovers: Vec<_> = fs::read_dir(dir.path())?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains("tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temporary files left behind: {leftovers:?}");
    Ok(())
}

#[tokio::test]
async fn dry_run_leaves_the_file_alone() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    fs::write(dir.path().join(".travis.yml"), TRAVIS_FIXTURE)?;
    fs::write(dir.path().join("Procfile"), PROCFILE_FIXTURE)?;
    fs::write(
        dir.path().join("TravisToHeroku.toml"),
        "heroku_bin = \"missing-heroku-cli-7c1e\"\n",
    )?;

    let outcome = run(args(
        dir.path(),
        &["--yes", "--skip-token", "--dry-run", "--app", "x"],
    ))
    .await?;

    assert!(matches!(outcome, Outcome::DryRun { .. }));
    assert_eq!(fs::read_to_string(dir.path().join(".travis.yml"))?, TRAVIS_FIXTURE);
    Ok(())
}

#[tokio::test]
async fn missing_procfile_aborts_without_error() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    fs::write(dir.path().join(".travis.yml"), TRAVIS_FIXTURE)?;

    let outcome = run(args(dir.path(), &["--yes", "--skip-token", "--app", "x"])).await?;

    assert_eq!(outcome, Outcome::Aborted(AbortReason::ProcessFileMissing));
    assert_eq!(fs::read_to_string(dir.path().join(".travis.yml"))?, TRAVIS_FIXTURE);
    Ok(())
}

#[test]
fn token_flow_is_the_default() {
    let dir = std::env::temp_dir();
    assert_eq!(flow_from_args(&args(&dir, &[])), Flow::WithToken);
    assert_eq!(flow_from_args(&args(&dir, &["--skip-token"])), Flow::AppOnly);
}

#[test]
fn token_and_skip_token_conflict() {
    let result = CliArgs::try_parse_from(["travis-to-heroku", "--token", "t", "--skip-token"]);
    assert!(result.is_err());
}

#[cfg(unix)]
#[test]
fn write_follows_symlinks_and_keeps_permissions() -> TestResult {
    use std::os::unix::fs::{PermissionsExt, symlink};

    let dir = tempdir()?;
    let shared = dir.path().join("shared.yml");
    let link = dir.path().join(".travis.yml");
    fs::write(&shared, TRAVIS_FIXTURE)?;
    fs::set_permissions(&shared, fs::Permissions::from_mode(0o600))?;
    symlink(&shared, &link)?;

    RealFileSystem.write(&link, b"language: node_js\ndeploy: {}\n")?;

    assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
    assert_eq!(fs::read_to_string(&shared)?, "language: node_js\ndeploy: {}\n");
    assert_eq!(fs::metadata(&shared)?.permissions().mode() & 0o777, 0o600);
    Ok(())
}

#[test]
fn write_creates_missing_files() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("fresh.yml");

    RealFileSystem.write(&path, b"a: 1\n")?;

    assert_eq!(fs::read_to_string(&path)?, "a: 1\n");
    Ok(())
}
