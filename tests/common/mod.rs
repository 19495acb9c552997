//! Shared utilities for integration tests.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock HTTP backend that answers `GET /<code>` with status `<code>`.
///
/// Any path that is not a number gets `200 OK`.
pub async fn start_status_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]);
                        let status = head
                            .split_whitespace()
                            .nth(1)
                            .and_then(|path| path.trim_start_matches('/').parse::<u16>().ok())
                            .unwrap_or(200);
                        let status_text = match status {
                            200 => "200 OK",
                            204 => "204 No Content",
                            302 => "302 Found",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            status_text
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// A port on 127.0.0.1 with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Environment variables the binary reads; cleared so the host environment
/// cannot leak into a test.
#[allow(dead_code)]
pub const OVERRIDE_VARS: [&str; 12] = [
    "MODE",
    "HOST",
    "PORT",
    "USERNAME",
    "PASSWORD",
    "DATABASE",
    "URL",
    "TIMEOUT",
    "SSLMODE",
    "REDIS_DB",
    "HTTP_METHOD",
    "LOG_FILE",
];
