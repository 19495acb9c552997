//! Command-line flags.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, CommandFactory, Parser};

/// Raw, unvalidated flags as typed by the user.
#[derive(Parser, Debug, Clone)]
#[command(name = "connection-cli")]
#[command(about = "A tool for testing connectivity to various services", long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "Example: connection-cli -mode=port -host=example.com -port=80")]
pub struct Cli {
    /// Testing mode: mysql, postgres, redis, port, http
    #[arg(long, default_value = "")]
    pub mode: String,

    /// Host to connect to
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Port to connect to (required unless mode is http)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub port: i64,

    /// Username for database connections
    #[arg(long, default_value = "")]
    pub username: String,

    /// Password for database connections
    #[arg(long, default_value = "", hide_default_value = true)]
    pub password: String,

    /// Database name for database connections
    #[arg(long, default_value = "")]
    pub database: String,

    /// URL for HTTP testing
    #[arg(long, default_value = "")]
    pub url: String,

    /// Connection timeout, e.g. 5s or 500ms [default: 5s, 10s for http]
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// SSL mode for PostgreSQL
    #[arg(long, default_value = "disable")]
    pub sslmode: String,

    /// Redis database number
    #[arg(long = "redis-db", default_value_t = 0)]
    pub redis_db: i64,

    /// HTTP method for HTTP testing
    #[arg(long = "http-method", default_value = "GET")]
    pub http_method: String,

    /// Append log output to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Show version information and exit
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub version: bool,
}

impl Cli {
    /// Parse flags, accepting both `-flag` and `--flag` spellings.
    pub fn parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Cli::try_parse_from(normalize_args(args))
    }

    /// True when no mode was selected, or `help` was asked for explicitly.
    pub fn wants_help(&self) -> bool {
        let mode = self.mode.trim();
        mode.is_empty() || mode.eq_ignore_ascii_case("help")
    }

    /// Render the usage text.
    pub fn help_text() -> String {
        Cli::command().render_help().to_string()
    }
}

/// Rewrite single-dash long flags (`-port=80`) to their double-dash form.
///
/// Single-character flags (`-h`), negative numbers and everything after a
/// bare `--` are left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }

        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some(s) if is_single_dash_long(s) => Some(OsString::from(format!("-{}", s))),
            _ => None,
        };
        out.push(rewritten.unwrap_or(arg));
    }

    out
}

fn is_single_dash_long(s: &str) -> bool {
    let Some(rest) = s.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split('=').next().unwrap_or_default();
    name.len() > 1 && name.starts_with(|c: char| c.is_ascii_alphabetic())
}
