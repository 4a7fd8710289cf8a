// src/config/mod.rs

//! Tool settings for travis-to-heroku.
//!
//! Responsibilities:
//! - Define the TOML-backed settings model (`model.rs`).
//! - Load an optional settings file from disk (`loader.rs`).
//! - Validate basic invariants like non-empty file names (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{DEFAULT_SETTINGS_FILE, load_from_path, load_settings};
pub use model::{RawSettings, Settings};
