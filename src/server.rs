use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::error::NotFound;
use crate::mime::mime_type;
use crate::path::resolve_target;
use crate::request::RequestLine;
use crate::response::{build_headers, error_body};

/// A request is read with a single bounded read. Anything longer is
/// truncated and will usually fail request-line parsing, which is the
/// accepted outcome; there is no accumulation loop.
const REQUEST_BUF_SIZE: usize = 1024;

/// Listener plus the shared read-only configuration.
pub struct Server {
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Bind to `0.0.0.0` on the configured port. Failure here is fatal to
    /// the caller; serving never starts without a listening socket.
    pub async fn bind(config: ServerConfig) -> std::io::Result<Server> {
        let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
        Ok(Server {
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until an interrupt signal arrives, spawning one
    /// task per connection. Handlers never block the accept loop, and a
    /// failed accept is logged and retried rather than ending the loop.
    pub async fn serve(self) -> std::io::Result<()> {
        loop {
            tokio::select! {
                result = self.listener.accept() => {
                    match result {
                        Ok((stream, peer)) => {
                            let _ = stream.set_nodelay(true);
                            let config = Arc::clone(&self.config);
                            tokio::spawn(handle_connection(stream, peer, config));
                        }
                        Err(e) => {
                            warn!(error = %e, "accept failed");
                        }
                    }
                }
                _ = shutdown_signal() => {
                    info!("shutdown signal received, stopping server");
                    break;
                }
            }
        }
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// One connection, one request, one response, then close. Failures are
/// logged here and never reach the accept loop.
async fn handle_connection(mut stream: TcpStream, peer: SocketAddr, config: Arc<ServerConfig>) {
    if let Err(e) = handle_request(&mut stream, peer, &config).await {
        error!(%peer, error = %e, "connection handling failed");
    }
    let _ = stream.shutdown().await;
}

async fn handle_request(
    stream: &mut TcpStream,
    peer: SocketAddr,
    config: &ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut buf = [0u8; REQUEST_BUF_SIZE];
    let n = stream.read(&mut buf).await?;
    if n == 0 {
        // Client connected and said nothing; no response owed.
        return Ok(());
    }

    let text = std::str::from_utf8(&buf[..n])?;
    let line = text.lines().next().unwrap_or_default();
    let request = RequestLine::parse(line).ok_or("malformed request line")?;

    info!(
        %peer,
        method = %request.method,
        target = %request.target,
        version = %request.version,
        "request"
    );

    // Any recognized-but-invalid request answers 404, including non-GET
    // methods. The server never emits 400/405/500.
    if request.method != "GET" {
        return send_error(stream, 404, "File Not Found").await;
    }

    match load_file(config, &request.target).await {
        Ok((body, content_type)) => send_file(stream, &body, content_type).await,
        Err(NotFound) => send_error(stream, 404, "File Not Found").await,
    }
}

/// The resolve-and-read pipeline. Every failure variant collapses into
/// `NotFound`; the handler never branches on the cause.
async fn load_file(
    config: &ServerConfig,
    target: &str,
) -> Result<(Vec<u8>, &'static str), NotFound> {
    let path = resolve_target(&config.root, target)?;

    let metadata = tokio::fs::metadata(&path).await?;
    if !metadata.is_file() {
        return Err(NotFound);
    }

    let body = tokio::fs::read(&path).await?;
    Ok((body, mime_type(&path)))
}

async fn send_file(
    stream: &mut TcpStream,
    body: &[u8],
    content_type: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let headers = build_headers(200, "OK", content_type, body.len());
    stream.write_all(headers.as_bytes()).await?;
    stream.write_all(body).await?;
    stream.flush().await?;
    Ok(())
}

async fn send_error(
    stream: &mut TcpStream,
    status: u16,
    message: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let body = error_body(status, message);
    let headers = build_headers(status, message, "text/html", body.len());
    stream.write_all(headers.as_bytes()).await?;
    stream.write_all(body.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}
