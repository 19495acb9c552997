//! TCP port probe.

use tokio::net::TcpStream;

use crate::config::ProbeRequest;
use crate::probe::types::ProbeResult;
use crate::resilience::timeouts::with_deadline;

/// Check that `host:port` accepts a TCP connection.
pub async fn check(request: &ProbeRequest) -> ProbeResult<()> {
    let address = request.address();
    tracing::info!(address = %address, timeout = ?request.timeout, "Testing TCP port connectivity");

    let stream = with_deadline(&address, request.timeout, || TcpStream::connect(address.as_str())).await?;
    drop(stream);

    tracing::info!(address = %address, "Port is open");
    Ok(())
}
