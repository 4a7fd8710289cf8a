// src/precondition.rs

//! Decides whether the pipeline file may be mutated.
//!
//! Pure and synchronous: the caller gathers file existence and the parsed
//! document, this module only applies the rules. The first failing rule
//! wins, in this order:
//!
//! 1. pipeline file exists
//! 2. no `deploy` section
//! 3. no `before_deploy` section
//! 4. process-declaration file exists

use std::fmt;

use crate::pipeline::PipelineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    PipelineMissing,
    DeployPresent,
    BeforeDeployPresent,
    ProcessFileMissing,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            AbortReason::PipelineMissing => {
                "pipeline config missing; run the pipeline-setup step first"
            }
            AbortReason::DeployPresent => {
                "deploy settings already present; remove them before re-running"
            }
            AbortReason::BeforeDeployPresent => {
                "before-deploy steps already present; remove them before re-running"
            }
            AbortReason::ProcessFileMissing => {
                "process declaration missing; run the platform-setup step first"
            }
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Abort(AbortReason),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Apply the rules. `pipeline` is ignored when the pipeline file is missing;
/// an existing file without a parsed document is treated as empty.
pub fn check(
    pipeline_file_exists: bool,
    process_file_exists: bool,
    pipeline: Option<&PipelineConfig>,
) -> Readiness {
    if !pipeline_file_exists {
        return Readiness::Abort(AbortReason::PipelineMissing);
    }

    if let Some(doc) = pipeline {
        if doc.has_deploy() {
            return Readiness::Abort(AbortReason::DeployPresent);
        }
        if doc.has_before_deploy() {
            return Readiness::Abort(AbortReason::BeforeDeployPresent);
        }
    }

    if !process_file_exists {
        return Readiness::Abort(AbortReason::ProcessFileMissing);
    }

    Readiness::Ready
}
