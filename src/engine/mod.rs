// src/engine/mod.rs

//! Run orchestration.
//!
//! [`precondition`](crate::precondition) is the pure gate; [`Runtime`] is the
//! async shell around it that reads files, resolves defaults, asks the
//! operator, encrypts the token and commits the document.

pub mod runtime;

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::defaults::Flow;
use crate::precondition::AbortReason;

pub use runtime::Runtime;

/// A project root plus the settings that name its files.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    settings: Settings,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pipeline_path(&self) -> PathBuf {
        self.root.join(&self.settings.pipeline_file)
    }

    pub fn process_path(&self) -> PathBuf {
        self.root.join(&self.settings.process_file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub flow: Flow,
    /// Return the document instead of writing it.
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            flow: Flow::WithToken,
            dry_run: false,
        }
    }
}

/// How a run ended, short of a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The pipeline file was rewritten.
    Written { path: PathBuf, document: String },
    /// `dry_run` was set; nothing was written.
    DryRun { document: String },
    /// A precondition failed; nothing was written.
    Aborted(AbortReason),
}
