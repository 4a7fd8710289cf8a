// src/mutator.rs

//! Writes the deploy sections into a pipeline document.
//!
//! Takes the document by value: once applied, the caller no longer holds a
//! document it could apply to a second time. Absence of both sections is
//! established beforehand by [`crate::precondition::check`].

use serde_yaml::Value;

use crate::errors::Result;
use crate::pipeline::{BEFORE_DEPLOY_KEY, DEPLOY_KEY, DeploySettings, PipelineConfig};

/// Set `deploy` and `before_deploy`, then serialize the whole document.
pub fn apply(
    mut pipeline: PipelineConfig,
    settings: &DeploySettings,
    steps: &[&str],
) -> Result<String> {
    pipeline.set(DEPLOY_KEY, serde_yaml::to_value(settings)?);

    let steps = steps
        .iter()
        .map(|s| Value::String(s.to_string()))
        .collect::<Vec<_>>();
    pipeline.set(BEFORE_DEPLOY_KEY, Value::Sequence(steps));

    let mut out = pipeline.to_yaml()?;
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
