//! Connectivity probe for MySQL, PostgreSQL, Redis, TCP ports and HTTP.

pub mod config;
pub mod observability;
pub mod probe;
pub mod resilience;

pub use config::{Cli, Mode, ProbeRequest};
pub use probe::{run, ProbeError, ProbeErrorKind};
