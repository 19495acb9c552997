//! Connectivity probes.
//!
//! # Data Flow
//! ```text
//! ProbeRequest
//!     → run() selects one probe by mode
//!     → probe builds its client / descriptor
//!     → resilience::timeouts::with_deadline wraps the one network call
//!     → Ok(()) or a classified ProbeError
//! ```
//!
//! # Design Decisions
//! - One probe per invocation, no retries
//! - The handshake itself is delegated to a client library per protocol
//! - Every probe releases its socket/pool/client on all exit paths

pub mod http;
pub mod mysql;
pub mod port;
pub mod postgres;
pub mod redis;
mod sql;
pub mod types;

pub use types::{ProbeError, ProbeErrorKind, ProbeResult};

use crate::config::{Mode, ProbeRequest};

/// Dispatch `request` to the probe for its mode.
pub async fn run(request: &ProbeRequest) -> ProbeResult<()> {
    tracing::debug!(?request, "Dispatching probe");

    match request.mode {
        Mode::Mysql => mysql::check(request).await,
        Mode::Postgres => postgres::check(request).await,
        Mode::Redis => redis::check(request).await,
        Mode::Port => port::check(request).await,
        Mode::Http => http::check(request).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_dispatches_port_mode() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut req = ProbeRequest::new(Mode::Port);
        req.host = "127.0.0.1".into();
        req.port = listener.local_addr().unwrap().port();
        req.timeout = Duration::from_secs(1);

        run(&req).await.unwrap();
    }

    #[tokio::test]
    async fn test_dispatches_http_mode() {
        let mut req = ProbeRequest::new(Mode::Http);
        req.url = Some("::not-a-url".into());

        let err = run(&req).await.unwrap_err();
        assert_eq!(err.kind(), ProbeErrorKind::RequestConstructionFailed);
    }
}
