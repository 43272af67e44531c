//! Minimal HTTP/1.1 front end for the decision service
//!
//! One route, `POST /decide`. Connections are kept alive until the client
//! closes them or asks for `Connection: close`. Every decision runs inline
//! on the connection task; it never blocks or awaits.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

use crate::agent::DecisionService;
use crate::core::error::{ChaseError, Result};
use crate::server::wire::{DecideResponse, ErrorResponse, SenseRequest};

/// Longest request line or header line accepted
const MAX_LINE_BYTES: usize = 8 * 1024;
/// Most header lines accepted per request
const MAX_HEADERS: usize = 64;
/// Default wait for the next request on an open connection
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub keep_alive: bool,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    fn json<T: serde::Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_string(value)
            .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e));
        Self { status, body }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(
            status,
            &ErrorResponse {
                error: message.into(),
            },
        )
    }

    fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            413 => "Payload Too Large",
            422 => "Unprocessable Entity",
            _ => "Internal Server Error",
        }
    }

    fn to_bytes(&self, keep_alive: bool) -> Vec<u8> {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: {}\r\n\r\n{}",
            self.status,
            self.reason(),
            self.body.len(),
            if keep_alive { "keep-alive" } else { "close" },
            self.body
        )
        .into_bytes()
    }
}

/// Read one `\r\n`-terminated line; `None` at a clean end of stream
async fn read_line<R>(reader: &mut BufReader<R>) -> Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    let mut line = Vec::new();
    let read = (&mut *reader)
        .take(MAX_LINE_BYTES as u64 + 2)
        .read_until(b'\n', &mut line)
        .await?;
    if read == 0 {
        return Ok(None);
    }
    if !line.ends_with(b"\n") {
        return Err(ChaseError::HttpError("header line too long or truncated".into()));
    }
    while matches!(line.last(), Some(b'\n' | b'\r')) {
        line.pop();
    }
    String::from_utf8(line)
        .map(Some)
        .map_err(|_| ChaseError::HttpError("header is not UTF-8".into()))
}

/// Read one request head and body; `None` when the peer closed between requests
pub async fn read_request<R>(
    reader: &mut BufReader<R>,
    max_body_bytes: usize,
) -> Result<Option<HttpRequest>>
where
    R: AsyncRead + Unpin,
{
    let request_line = loop {
        match read_line(reader).await? {
            None => return Ok(None),
            // tolerate stray blank lines between pipelined requests
            Some(line) if line.is_empty() => continue,
            Some(line) => break line,
        }
    };

    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(path), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ChaseError::HttpError(format!(
            "bad request line '{}'",
            request_line
        )));
    };
    if !version.starts_with("HTTP/1.") {
        return Err(ChaseError::HttpError(format!("unsupported version {}", version)));
    }

    let mut keep_alive = version != "HTTP/1.0";
    let mut content_length = 0usize;
    let mut header_count = 0usize;

    loop {
        let Some(line) = read_line(reader).await? else {
            return Err(ChaseError::HttpError("connection closed inside headers".into()));
        };
        if line.is_empty() {
            break;
        }
        header_count += 1;
        if header_count > MAX_HEADERS {
            return Err(ChaseError::HttpError("too many headers".into()));
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(ChaseError::HttpError(format!("bad header '{}'", line)));
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse().map_err(|_| {
                ChaseError::HttpError(format!("bad Content-Length '{}'", value))
            })?;
        } else if name.eq_ignore_ascii_case("connection") {
            if value.eq_ignore_ascii_case("close") {
                keep_alive = false;
            } else if value.eq_ignore_ascii_case("keep-alive") {
                keep_alive = true;
            }
        } else if name.eq_ignore_ascii_case("transfer-encoding") {
            return Err(ChaseError::HttpError("chunked bodies are not supported".into()));
        }
    }

    if content_length > max_body_bytes {
        return Err(ChaseError::BodyTooLarge {
            length: content_length,
            limit: max_body_bytes,
        });
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;

    Ok(Some(HttpRequest {
        method: method.to_string(),
        path: path.to_string(),
        keep_alive,
        body,
    }))
}

/// Map a request onto the decision service
pub fn route(request: &HttpRequest, service: &DecisionService) -> HttpResponse {
    let path = request.path.split('?').next().unwrap_or("");
    if path != "/decide" {
        warn!("No route for {} {}", request.method, request.path);
        return HttpResponse::error(404, format!("no route for {}", request.path));
    }
    if request.method != "POST" {
        warn!("Rejected {} /decide", request.method);
        return HttpResponse::error(405, "use POST /decide");
    }

    match SenseRequest::parse(&request.body) {
        Ok(snapshot) => {
            let decision = service.decide(&snapshot);
            HttpResponse::json(
                200,
                &DecideResponse {
                    direction: decision.direction,
                },
            )
        }
        Err(ChaseError::InvalidSnapshot(reason)) => {
            warn!("Invalid snapshot: {}", reason);
            HttpResponse::error(422, reason)
        }
        Err(e) => {
            warn!("Malformed snapshot: {}", e);
            HttpResponse::error(400, e.to_string())
        }
    }
}

/// Serve requests on one connection until it closes
///
/// The connection is dropped when a full request does not arrive within
/// `idle_timeout`, whether the client is silent or stalls mid-request.
pub async fn handle_connection<S>(
    stream: S,
    service: Arc<DecisionService>,
    max_body_bytes: usize,
    idle_timeout: Duration,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut reader = BufReader::new(reader);

    loop {
        let read = tokio::time::timeout(idle_timeout, read_request(&mut reader, max_body_bytes));
        let request = match read.await {
            Err(_) => {
                debug!("Closing connection idle for {:?}", idle_timeout);
                return Ok(());
            }
            Ok(Ok(Some(request))) => request,
            Ok(Ok(None)) => return Ok(()),
            Ok(Err(e @ ChaseError::BodyTooLarge { .. })) => {
                warn!("Rejected request: {}", e);
                return reject(&mut writer, HttpResponse::error(413, e.to_string())).await;
            }
            Ok(Err(ChaseError::HttpError(reason))) => {
                warn!("Bad HTTP request: {}", reason);
                return reject(&mut writer, HttpResponse::error(400, reason)).await;
            }
            Ok(Err(e)) => return Err(e),
        };

        let response = route(&request, &service);
        writer.write_all(&response.to_bytes(request.keep_alive)).await?;
        writer.flush().await?;

        if !request.keep_alive {
            return Ok(());
        }
    }
}

/// Write a final error response and close
async fn reject<W>(writer: &mut W, response: HttpResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&response.to_bytes(false)).await?;
    writer.flush().await?;
    Ok(())
}

/// Bound listener plus the service it feeds
pub struct DecisionServer {
    listener: TcpListener,
    service: Arc<DecisionService>,
    max_body_bytes: usize,
    idle_timeout: Duration,
}

impl DecisionServer {
    pub async fn bind(
        address: &str,
        service: Arc<DecisionService>,
        max_body_bytes: usize,
    ) -> Result<Self> {
        let listener = TcpListener::bind(address).await?;
        Ok(Self {
            listener,
            service,
            max_body_bytes,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        })
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until `shutdown` resolves
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!(
            "Serving {} decisions on {}",
            self.service.strategy_name(),
            self.local_addr()?
        );
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(
                        "Shutting down; {} agents in memory",
                        self.service.store().len()
                    );
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(pair) => pair,
                        Err(e) => {
                            error!("Accept failed: {}", e);
                            continue;
                        }
                    };
                    self.spawn_connection(stream, peer);
                }
            }
        }
    }

    /// Accept connections forever
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    fn spawn_connection(&self, stream: TcpStream, peer: SocketAddr) {
        debug!("Connection from {}", peer);
        let service = Arc::clone(&self.service);
        let max_body_bytes = self.max_body_bytes;
        let idle_timeout = self.idle_timeout;
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, service, max_body_bytes, idle_timeout).await {
                error!("Connection {} failed: {}", peer, e);
            }
        });
    }
}
