//! Configuration validation.
//!
//! # Responsibilities
//! - Turn raw flags into a `ProbeRequest`
//! - Check required fields before any network call (port, url)
//! - Apply mode-specific defaults (timeout, sslmode, method)
//!
//! # Design Decisions
//! - Returns the first failure; every error is terminal
//! - Validation is a pure function: &Cli → ProbeResult<ProbeRequest>

use crate::config::cli::Cli;
use crate::config::schema::{Mode, ProbeRequest, DEFAULT_HOST, DEFAULT_HTTP_METHOD, DEFAULT_SSL_MODE};
use crate::probe::types::{ProbeError, ProbeResult};

/// Resolve flags into a validated request.
pub fn resolve(cli: &Cli) -> ProbeResult<ProbeRequest> {
    let mode: Mode = cli.mode.parse()?;

    let port = if mode.requires_port() {
        if cli.port == 0 {
            return Err(ProbeError::MissingRequiredField {
                field: "Port",
                mode: cli.mode.clone(),
            });
        }
        u16::try_from(cli.port)
            .map_err(|_| ProbeError::invalid(&cli.host, format!("port {} is out of range", cli.port)))?
    } else {
        u16::try_from(cli.port).unwrap_or(0)
    };

    let url = non_empty(&cli.url);
    if mode == Mode::Http && url.is_none() {
        return Err(ProbeError::MissingRequiredField {
            field: "URL",
            mode: cli.mode.clone(),
        });
    }

    let timeout = cli
        .timeout
        .filter(|t| !t.is_zero())
        .unwrap_or_else(|| mode.default_timeout());

    Ok(ProbeRequest {
        mode,
        host: non_empty(&cli.host).unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port,
        username: non_empty(&cli.username),
        password: non_empty(&cli.password),
        database: non_empty(&cli.database),
        url,
        method: non_empty(&cli.http_method).unwrap_or_else(|| DEFAULT_HTTP_METHOD.to_string()),
        timeout,
        ssl_mode: non_empty(&cli.sslmode).unwrap_or_else(|| DEFAULT_SSL_MODE.to_string()),
        redis_db: cli.redis_db,
    })
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
