//! HTTP probe.
//!
//! Sends one request and inspects only the status line. The body is never
//! read; the response is dropped straight after the status check. Proxy
//! environment variables are ignored: the target itself is dialed.

use reqwest::{Method, Url};

use crate::config::ProbeRequest;
use crate::probe::types::{ProbeError, ProbeResult};
use crate::resilience::timeouts::with_deadline;

/// Check that `request.url` answers with a status below 400.
pub async fn check(request: &ProbeRequest) -> ProbeResult<()> {
    let raw_url = request.url.as_deref().unwrap_or_default();
    tracing::info!(url = %raw_url, method = %request.method, "Testing HTTP connection");

    let url = Url::parse(raw_url)
        .map_err(|e| ProbeError::RequestConstructionFailed(format!("invalid url '{}': {}", raw_url, e)))?;
    let method = Method::from_bytes(request.method.to_ascii_uppercase().as_bytes()).map_err(|e| {
        ProbeError::RequestConstructionFailed(format!("invalid method '{}': {}", request.method, e))
    })?;

    let client = reqwest::Client::builder()
        .user_agent(concat!("connection-cli/", env!("CARGO_PKG_VERSION")))
        .no_proxy()
        .build()
        .map_err(|e| ProbeError::RequestConstructionFailed(e.to_string()))?;

    let response = with_deadline(raw_url, request.timeout, || client.request(method, url).send()).await?;

    let status = response.status();
    drop(response);
    tracing::info!(url = %raw_url, status = status.as_u16(), "Received HTTP response");

    if status.as_u16() >= 400 {
        return Err(ProbeError::UnhealthyResponse {
            url: raw_url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(())
}
