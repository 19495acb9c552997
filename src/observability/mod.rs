//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config and probes produce:
//!     → tracing events with structured fields
//!     → logging.rs subscriber
//!
//! Sinks:
//!     → stderr (always)
//!     → append-only log file (optional, size-bounded)
//! ```
//!
//! # Design Decisions
//! - Structured fields, never interpolated secrets
//! - One logging service per process, shut down explicitly

pub mod logging;

pub use logging::Logging;
