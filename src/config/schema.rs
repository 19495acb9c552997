//! Probe request schema.
//!
//! `ProbeRequest` is the normalized form every probe consumes. It is built
//! once by the resolver (see `validation.rs`) and never mutated afterwards.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::probe::types::ProbeError;

/// Default deadline for every mode except HTTP.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default deadline for HTTP probes.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Default PostgreSQL SSL mode.
pub const DEFAULT_SSL_MODE: &str = "disable";

/// Default HTTP method.
pub const DEFAULT_HTTP_METHOD: &str = "GET";

/// Default target host.
pub const DEFAULT_HOST: &str = "localhost";

/// Protocol family selected for an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Mysql,
    Postgres,
    Redis,
    Port,
    Http,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Mysql, Mode::Postgres, Mode::Redis, Mode::Port, Mode::Http];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Mysql => "mysql",
            Mode::Postgres => "postgres",
            Mode::Redis => "redis",
            Mode::Port => "port",
            Mode::Http => "http",
        }
    }

    /// Deadline applied when none (or zero) was supplied.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Mode::Http => DEFAULT_HTTP_TIMEOUT,
            _ => DEFAULT_TIMEOUT,
        }
    }

    /// Whether the mode addresses `host:port` directly.
    pub fn requires_port(&self) -> bool {
        !matches!(self, Mode::Http)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProbeError::UnsupportedMode(s.to_string()))
    }
}

/// Normalized, validated configuration for a single probe.
#[derive(Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    /// Selected protocol family.
    pub mode: Mode,

    /// Target host.
    pub host: String,

    /// Target port; zero only when the mode is HTTP.
    pub port: u16,

    /// Username for DB/Redis authentication.
    pub username: Option<String>,

    /// Password for DB/Redis authentication.
    pub password: Option<String>,

    /// Database name (MySQL/PostgreSQL).
    pub database: Option<String>,

    /// Target URL (HTTP).
    pub url: Option<String>,

    /// HTTP verb.
    pub method: String,

    /// Deadline for the probe's network operation. Always positive.
    pub timeout: Duration,

    /// PostgreSQL SSL mode, passed through verbatim.
    pub ssl_mode: String,

    /// Redis logical database index.
    pub redis_db: i64,
}

impl ProbeRequest {
    /// A request for `mode` with every optional field at its default.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            host: DEFAULT_HOST.to_string(),
            port: 0,
            username: None,
            password: None,
            database: None,
            url: None,
            method: DEFAULT_HTTP_METHOD.to_string(),
            timeout: mode.default_timeout(),
            ssl_mode: DEFAULT_SSL_MODE.to_string(),
            redis_db: 0,
        }
    }

    /// `host:port` as used for dialing and in error messages.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for ProbeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeRequest")
            .field("mode", &self.mode)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("url", &self.url)
            .field("method", &self.method)
            .field("timeout", &self.timeout)
            .field("ssl_mode", &self.ssl_mode)
            .field("redis_db", &self.redis_db)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::types::ProbeErrorKind;

    #[test]
    fn test_mode_parse_is_case_insensitive() {
        assert_eq!("MySQL".parse::<Mode>().unwrap(), Mode::Mysql);
        assert_eq!("POSTGRES".parse::<Mode>().unwrap(), Mode::Postgres);
        assert_eq!("port".parse::<Mode>().unwrap(), Mode::Port);
    }

    #[test]
    fn test_unknown_mode() {
        let err = "ftp".parse::<Mode>().unwrap_err();
        assert_eq!(err.kind(), ProbeErrorKind::UnsupportedMode);
        assert_eq!(err.to_string(), "Unsupported mode: ftp");
    }

    #[test]
    fn test_defaults() {
        let req = ProbeRequest::new(Mode::Postgres);
        assert_eq!(req.host, "localhost");
        assert_eq!(req.timeout, Duration::from_secs(5));
        assert_eq!(req.ssl_mode, "disable");
        assert_eq!(req.method, "GET");
        assert_eq!(req.redis_db, 0);

        let req = ProbeRequest::new(Mode::Http);
        assert_eq!(req.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut req = ProbeRequest::new(Mode::Mysql);
        req.password = Some("hunter2".into());
        let rendered = format!("{:?}", req);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }
}
