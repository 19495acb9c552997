//! PostgreSQL probe.
//!
//! `sslmode` is passed through to the driver untouched. A value the driver
//! rejects while parsing surfaces as `ConfigurationInvalid`; one it rejects
//! during the handshake surfaces as `ConnectionFailed`.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, Postgres};
use url::Url;

use crate::config::ProbeRequest;
use crate::probe::sql;
use crate::probe::types::{ProbeError, ProbeResult};

/// Check that a PostgreSQL server at `host:port` accepts the credentials and a ping.
pub async fn check(request: &ProbeRequest) -> ProbeResult<()> {
    let address = request.address();
    tracing::info!(
        address = %address,
        username = request.username.as_deref().unwrap_or_default(),
        database = request.database.as_deref().unwrap_or_default(),
        sslmode = %request.ssl_mode,
        connect_timeout_secs = request.timeout.as_secs(),
        "Testing PostgreSQL connection"
    );

    let options = connect_options(request)?;

    tracing::info!("Pinging PostgreSQL server");
    sql::ping::<Postgres>(&address, request.timeout, options).await?;

    tracing::info!(address = %address, "PostgreSQL answered ping");
    Ok(())
}

/// Build the `postgres://` descriptor with `sslmode` and a whole-second
/// `connect_timeout`.
pub fn descriptor(request: &ProbeRequest) -> ProbeResult<Url> {
    let mut dsn = sql::descriptor("postgres", request)?;
    dsn.query_pairs_mut()
        .append_pair("sslmode", &request.ssl_mode)
        .append_pair("connect_timeout", &request.timeout.as_secs().to_string());
    Ok(dsn)
}

/// Parse the connection descriptor into driver options.
pub fn connect_options(request: &ProbeRequest) -> ProbeResult<PgConnectOptions> {
    let dsn = descriptor(request)?;
    tracing::debug!(dsn = %sql::redacted(&dsn), "PostgreSQL descriptor built");

    PgConnectOptions::from_str(dsn.as_str()).map_err(|e| ProbeError::invalid(request.address(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::probe::types::ProbeErrorKind;
    use std::time::{Duration, Instant};

    fn request(port: u16) -> ProbeRequest {
        let mut req = ProbeRequest::new(Mode::Postgres);
        req.host = "127.0.0.1".into();
        req.port = port;
        req.username = Some("postgres".into());
        req.password = Some("secret".into());
        req.database = Some("app".into());
        req.timeout = Duration::from_secs(1);
        req
    }

    #[test]
    fn test_default_sslmode_accepted() {
        assert!(connect_options(&request(5432)).is_ok());
    }

    #[test]
    fn test_unknown_sslmode_is_configuration_error() {
        let mut req = request(5432);
        req.ssl_mode = "sometimes".into();
        let err = connect_options(&req).unwrap_err();
        assert_eq!(err.kind(), ProbeErrorKind::ConfigurationInvalid);
    }

    #[test]
    fn test_descriptor_carries_sslmode_and_truncated_timeout() {
        let mut req = request(5432);
        req.ssl_mode = "require".into();
        req.timeout = Duration::from_millis(2900);
        let dsn = descriptor(&req).unwrap();
        let pairs: Vec<(String, String)> = dsn.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("sslmode".to_string(), "require".to_string()),
                ("connect_timeout".to_string(), "2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_closed_port_fails_fast_with_cause() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut req = request(port);
        req.timeout = Duration::from_secs(5);
        let started = Instant::now();
        let err = check(&req).await.unwrap_err();
        assert_eq!(err.kind(), ProbeErrorKind::ConnectionFailed);
        assert!(err.to_string().to_lowercase().contains("refused"), "{}", err);
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
