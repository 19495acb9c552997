//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Probe network call:
//!     → timeouts.rs (enforce the probe deadline)
//!     → Ok, ConnectionFailed, or Timeout
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries: a failed probe is a result, not a transient condition

pub mod timeouts;

pub use timeouts::with_deadline;
