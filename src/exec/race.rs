// src/exec/race.rs

//! Timeout race.
//!
//! The operation is detached onto its own task and reports through a
//! one-shot slot. Whoever settles first wins: either the slot is filled
//! before the deadline, or the receiver is dropped at the deadline and the
//! late `send` fails quietly. The operation is never cancelled, so a child
//! process started by it runs to completion in the background.

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

/// Deadline used for every best-effort CLI query unless configured otherwise.
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(2000);

/// Resolve to the operation's result, or to `fallback` once `deadline`
/// elapses.
pub async fn race<T, F>(operation: F, deadline: Duration, fallback: T) -> T
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let (slot, settled) = oneshot::channel::<T>();

    tokio::spawn(async move {
        let value = operation.await;
        if slot.send(value).is_err() {
            trace!("operation settled after its deadline; result discarded");
        }
    });

    match timeout(deadline, settled).await {
        Ok(Ok(value)) => value,
        Ok(Err(_)) => {
            // Sender dropped without a value: the detached task panicked.
            warn!("raced operation ended without a result; using fallback");
            fallback
        }
        Err(_) => {
            debug!(
                deadline_ms = deadline.as_millis() as u64,
                "deadline elapsed before operation settled; using fallback"
            );
            fallback
        }
    }
}
