//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap the single network operation of a probe with a deadline
//! - Classify the outcome: completed, failed, or timed out
//! - Cancel the operation cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from connection errors
//! - Dropping the in-flight future on expiry releases whatever it holds

use std::future::Future;
use std::time::Duration;
use tokio::time;

use crate::probe::types::{BoxError, ProbeError, ProbeResult};

/// Run `op` under `deadline`, classifying failures against `target`.
///
/// The closure is invoked once. An error returned by the operation becomes
/// [`ProbeError::ConnectionFailed`]; an elapsed deadline becomes
/// [`ProbeError::Timeout`].
pub async fn with_deadline<F, Fut, T, E>(target: &str, deadline: Duration, op: F) -> ProbeResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    match time::timeout(deadline, op()).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            let source = e.into();
            tracing::debug!(target_addr = %target, error = %source, "Operation failed before deadline");
            Err(ProbeError::ConnectionFailed {
                target: target.to_string(),
                source,
            })
        }
        Err(_) => {
            tracing::debug!(target_addr = %target, ?deadline, "Deadline elapsed");
            Err(ProbeError::Timeout {
                target: target.to_string(),
                after: deadline,
            })
        }
    }
}
