//! Environment variable overrides.
//!
//! A non-empty environment variable replaces the value of the flag with the
//! same upper-case name. Values that fail to parse are ignored and the flag
//! value stands.

use std::path::PathBuf;

use crate::config::cli::Cli;

/// Apply overrides from the process environment.
pub fn apply_process_env(cli: &mut Cli) {
    apply_env_overrides(cli, |key| std::env::var(key).ok());
}

/// Apply overrides using `lookup` as the environment.
pub fn apply_env_overrides<F>(cli: &mut Cli, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = get("MODE") {
        cli.mode = v;
    }
    if let Some(v) = get("HOST") {
        cli.host = v;
    }
    if let Some(v) = get("PORT") {
        match v.trim().parse() {
            Ok(port) => cli.port = port,
            Err(e) => tracing::warn!(value = %v, error = %e, "Ignoring invalid PORT"),
        }
    }
    if let Some(v) = get("USERNAME") {
        cli.username = v;
    }
    if let Some(v) = get("PASSWORD") {
        cli.password = v;
    }
    if let Some(v) = get("DATABASE") {
        cli.database = v;
    }
    if let Some(v) = get("URL") {
        cli.url = v;
    }
    if let Some(v) = get("TIMEOUT") {
        match humantime::parse_duration(v.trim()) {
            Ok(timeout) => cli.timeout = Some(timeout),
            Err(e) => tracing::warn!(value = %v, error = %e, "Ignoring invalid TIMEOUT"),
        }
    }
    if let Some(v) = get("SSLMODE") {
        cli.sslmode = v;
    }
    if let Some(v) = get("REDIS_DB") {
        match v.trim().parse() {
            Ok(db) => cli.redis_db = db,
            Err(e) => tracing::warn!(value = %v, error = %e, "Ignoring invalid REDIS_DB"),
        }
    }
    if let Some(v) = get("HTTP_METHOD") {
        cli.http_method = v;
    }
}

/// Log file location: a non-empty `LOG_FILE` wins over `-log-file`.
///
/// Read on its own, ahead of [`apply_env_overrides`], so that logging is up
/// before the other overrides can warn.
pub fn log_path<F>(cli: &Cli, lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("LOG_FILE")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| cli.log_file.clone())
}
