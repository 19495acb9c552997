//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! argv
//!     → cli.rs (normalize -flag to --flag, clap parse)
//!     → loader.rs (environment variable overrides)
//!     → validation.rs (required fields, defaults)
//!     → ProbeRequest (validated, immutable)
//!     → handed to the probe dispatcher
//! ```
//!
//! # Design Decisions
//! - A non-empty environment variable wins over the matching flag
//! - Invalid environment values are ignored, not fatal
//! - Required-field checks run before any network call

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use schema::{Mode, ProbeRequest};
pub use validation::resolve;
