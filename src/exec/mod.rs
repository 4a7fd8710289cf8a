// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`gateway`] runs external commands with `tokio::process::Command` and
//!   captures their stdout, failing soft.
//! - [`race`] bounds a best-effort operation by a deadline without
//!   cancelling it.

pub mod gateway;
pub mod race;

pub use gateway::{CapturedOutput, GatewayFuture, ProcessGateway, RealProcessGateway};
pub use race::{DEFAULT_DEADLINE, race};
