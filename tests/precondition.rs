// tests/precondition.rs

use std::collections::BTreeMap;

use proptest::prelude::*;
use travis_to_heroku::pipeline::PipelineConfig;
use travis_to_heroku::precondition::{AbortReason, Readiness, check};

fn doc(text: &str) -> PipelineConfig {
    PipelineConfig::parse(text).unwrap()
}

#[test]
fn ready_when_files_exist_and_sections_absent() {
    let pipeline = doc("language: node_js\nnode_js: node\n");
    assert_eq!(check(true, true, Some(&pipeline)), Readiness::Ready);
}

#[test]
fn missing_pipeline_file_wins_over_everything() {
    let pipeline = doc("deploy:\n  provider: heroku\n");
    assert_eq!(
        check(false, false, Some(&pipeline)),
        Readiness::Abort(AbortReason::PipelineMissing)
    );
    assert_eq!(
        check(false, true, None),
        Readiness::Abort(AbortReason::PipelineMissing)
    );
}

#[test]
fn existing_deploy_section_aborts() {
    let pipeline = doc("deploy:\n  provider: heroku\n  app: my-awesome-app\n");
    assert_eq!(
        check(true, true, Some(&pipeline)),
        Readiness::Abort(AbortReason::DeployPresent)
    );
}

#[test]
fn deploy_is_checked_before_before_deploy() {
    let pipeline = doc("deploy:\n  provider: heroku\nbefore_deploy:\n  - echo hi\n");
    assert_eq!(
        check(true, true, Some(&pipeline)),
        Readiness::Abort(AbortReason::DeployPresent)
    );
}

#[test]
fn existing_before_deploy_section_aborts() {
    let pipeline = doc("before_deploy:\n  - echo 'ready?'\n");
    assert_eq!(
        check(true, true, Some(&pipeline)),
        Readiness::Abort(AbortReason::BeforeDeployPresent)
    );
}

#[test]
fn pipeline_sections_are_checked_before_the_process_file() {
    let pipeline = doc("before_deploy:\n  - echo 'ready?'\n");
    assert_eq!(
        check(true, false, Some(&pipeline)),
        Readiness::Abort(AbortReason::BeforeDeployPresent)
    );
}

#[test]
fn missing_process_file_aborts() {
    let pipeline = doc("language: node_js\n");
    assert_eq!(
        check(true, false, Some(&pipeline)),
        Readiness::Abort(AbortReason::ProcessFileMissing)
    );
}

#[test]
fn null_sections_count_as_absent() {
    let pipeline = doc("language: node_js\ndeploy: ~\nbefore_deploy:\n");
    assert!(check(true, true, Some(&pipeline)).is_ready());
}

#[test]
fn empty_pipeline_file_is_ready() {
    let pipeline = doc("");
    assert!(check(true, true, Some(&pipeline)).is_ready());
    assert!(check(true, true, None).is_ready());
}

#[test]
fn abort_reasons_read_as_instructions() {
    assert!(AbortReason::PipelineMissing.to_string().contains("pipeline-setup"));
    assert!(AbortReason::DeployPresent.to_string().contains("remove them"));
    assert!(AbortReason::BeforeDeployPresent.to_string().contains("before-deploy"));
    assert!(AbortReason::ProcessFileMissing.to_string().contains("platform-setup"));
}

// Any non-null YAML value.
fn section_value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|s| format!("'{s}'")),
        any::<u16>().prop_map(|n| n.to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        Just("[echo a, echo b]".to_string()),
        Just("{ provider: heroku }".to_string()),
        Just("{}".to_string()),
    ]
}

// Keys end in `_k`, so they never collide with the two guarded sections.
fn unrelated_keys() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("[a-z]{1,6}_k", section_value(), 0..6)
}

fn render(keys: &BTreeMap<String, String>, extra: Option<(&str, &str)>) -> String {
    let mut out = String::new();
    for (k, v) in keys {
        out.push_str(&format!("{k}: {v}\n"));
    }
    if let Some((k, v)) = extra {
        out.push_str(&format!("{k}: {v}\n"));
    }
    out
}

proptest! {
    #[test]
    fn any_document_with_deploy_aborts(
        keys in unrelated_keys(),
        value in section_value(),
        process_exists in any::<bool>(),
    ) {
        let pipeline = doc(&render(&keys, Some(("deploy", &value))));
        prop_assert_eq!(
            check(true, process_exists, Some(&pipeline)),
            Readiness::Abort(AbortReason::DeployPresent)
        );
    }

    #[test]
    fn any_document_with_before_deploy_aborts(
        keys in unrelated_keys(),
        value in section_value(),
        process_exists in any::<bool>(),
    ) {
        let pipeline = doc(&render(&keys, Some(("before_deploy", &value))));
        prop_assert_eq!(
            check(true, process_exists, Some(&pipeline)),
            Readiness::Abort(AbortReason::BeforeDeployPresent)
        );
    }

    #[test]
    fn missing_process_file_always_aborts(
        keys in unrelated_keys(),
        guarded in proptest::option::of(prop_oneof![Just("deploy"), Just("before_deploy")]),
    ) {
        let text = match guarded {
            Some(key) => render(&keys, Some((key, "x"))),
            None => render(&keys, None),
        };
        prop_assert!(!check(true, false, Some(&doc(&text))).is_ready());
    }
}
