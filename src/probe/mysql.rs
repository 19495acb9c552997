//! MySQL probe.

use std::str::FromStr;

use sqlx::mysql::{MySql, MySqlConnectOptions};
use url::Url;

use crate::config::ProbeRequest;
use crate::probe::sql;
use crate::probe::types::{ProbeError, ProbeResult};

/// Check that a MySQL server at `host:port` accepts the credentials and a ping.
pub async fn check(request: &ProbeRequest) -> ProbeResult<()> {
    let address = request.address();
    tracing::info!(
        address = %address,
        username = request.username.as_deref().unwrap_or_default(),
        database = request.database.as_deref().unwrap_or_default(),
        timeout = ?request.timeout,
        "Testing MySQL connection"
    );

    let options = connect_options(request)?;

    tracing::info!("Pinging MySQL server");
    sql::ping::<MySql>(&address, request.timeout, options).await?;

    tracing::info!(address = %address, "MySQL answered ping");
    Ok(())
}

/// Build the `mysql://` descriptor, carrying the timeout as a `timeout` parameter.
pub fn descriptor(request: &ProbeRequest) -> ProbeResult<Url> {
    let mut dsn = sql::descriptor("mysql", request)?;
    dsn.query_pairs_mut()
        .append_pair("timeout", &humantime::format_duration(request.timeout).to_string());
    Ok(dsn)
}

/// Parse the connection descriptor into driver options.
pub fn connect_options(request: &ProbeRequest) -> ProbeResult<MySqlConnectOptions> {
    let dsn = descriptor(request)?;
    tracing::debug!(dsn = %sql::redacted(&dsn), "MySQL descriptor built");

    MySqlConnectOptions::from_str(dsn.as_str()).map_err(|e| ProbeError::invalid(request.address(), e))
}
