//! Transport seam between the library logic and the backend.
//!
//! Controllers and the query service only ever see [`Transport`]; the
//! [`HttpTransport`] implementation sends requests with `reqwest`, tests
//! plug in fakes.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::{COOKIE, SET_COOKIE};
use serde::Serialize;
use tracing::debug;

use crate::error::TransportError;
use crate::session::Session;

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// A request against an API path, relative to the session's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// A request without a body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// A request with a JSON body.
    pub fn with_json<T: Serialize>(
        method: Method,
        path: impl Into<String>,
        body: &T,
    ) -> Result<Self, TransportError> {
        let body = serde_json::to_value(body)
            .map_err(|e| TransportError(format!("failed to encode request body: {e}")))?;
        Ok(Self {
            method,
            path: path.into(),
            body: Some(body),
        })
    }
}

/// Raw response: status, body bytes, and the first `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub set_cookie: Option<String>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            set_cookie: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends API requests on behalf of one session.
///
/// An error means no response was obtained at all; any HTTP status,
/// including 4xx/5xx, is a successful send.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + Send + '_>>;
}

/// `reqwest`-backed transport bound to a [`Session`].
pub struct HttpTransport {
    http: reqwest::Client,
    session: Session,
}

impl HttpTransport {
    /// Creates a transport with its own HTTP client and a per-request timeout.
    pub fn new(session: Session, timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(http, session))
    }

    /// Creates a transport sharing an existing HTTP client.
    pub fn with_client(http: reqwest::Client, session: Session) -> Self {
        Self { http, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + Send + '_>> {
        Box::pin(async move {
            let url = self.session.url(&request.path);
            let mut builder = match request.method {
                Method::Get => self.http.get(&url),
                Method::Post => self.http.post(&url),
                Method::Put => self.http.put(&url),
                Method::Delete => self.http.delete(&url),
            };
            if let Some(cookie) = self.session.cookie() {
                builder = builder.header(COOKIE, cookie);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            debug!(method = %request.method, %url, "sending request");
            let resp = builder
                .send()
                .await
                .map_err(|e| TransportError(format!("{} {url} failed: {e}", request.method)))?;

            let status = resp.status().as_u16();
            let set_cookie = resp
                .headers()
                .get(SET_COOKIE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = resp
                .bytes()
                .await
                .map_err(|e| TransportError(format!("failed to read response from {url}: {e}")))?
                .to_vec();

            debug!(method = %request.method, %url, status, "received response");
            Ok(ApiResponse {
                status,
                body,
                set_cookie,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Reads one HTTP request (headers plus `Content-Length` body).
    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Starts a one-shot mock HTTP server. Returns its URL, the raw request
    /// it received, and the server task.
    async fn mock_server(
        status_line: &str,
        extra_headers: &str,
        body: &str,
    ) -> (String, oneshot::Receiver<String>, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n{extra_headers}Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let request = read_request(&mut stream).await;
                let _ = tx.send(request);
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (url, rx, handle)
    }

    fn transport(url: &str, cookie: &str) -> HttpTransport {
        let session = Session::anonymous(url).with_cookie(cookie);
        HttpTransport::new(session, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn post_sends_json_body_and_cookie() {
        let (url, request_rx, handle) =
            mock_server("201 Created", "", r#"{"mensagem":"ok"}"#).await;

        let t = transport(&url, "session=abc");
        let req = ApiRequest::with_json(
            Method::Post,
            "/api/biblioteca/adicionar",
            &serde_json::json!({ "jogo_id": 42, "status": "jogando" }),
        )
        .unwrap();
        let resp = t.send(req).await.unwrap();

        assert_eq!(resp.status, 201);
        assert!(resp.is_success());
        assert_eq!(resp.body, br#"{"mensagem":"ok"}"#);

        let raw = request_rx.await.unwrap();
        let lower = raw.to_ascii_lowercase();
        assert!(raw.starts_with("POST /api/biblioteca/adicionar HTTP/1.1"), "{raw}");
        assert!(lower.contains("cookie: session=abc"), "{raw}");
        assert!(lower.contains("content-type: application/json"), "{raw}");
        let body = &raw[raw.find("\r\n\r\n").unwrap() + 4..];
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent, serde_json::json!({ "jogo_id": 42, "status": "jogando" }));

        handle.abort();
    }

    #[tokio::test]
    async fn delete_has_no_body_and_no_cookie_when_anonymous() {
        let (url, request_rx, handle) = mock_server("200 OK", "", r#"{"mensagem":"ok"}"#).await;

        let t = transport(&url, "");
        let resp = t
            .send(ApiRequest::new(Method::Delete, "/api/biblioteca/remover/7"))
            .await
            .unwrap();
        assert_eq!(resp.status, 200);

        let raw = request_rx.await.unwrap();
        assert!(raw.starts_with("DELETE /api/biblioteca/remover/7 HTTP/1.1"), "{raw}");
        assert!(!raw.to_ascii_lowercase().contains("cookie:"), "{raw}");

        handle.abort();
    }

    #[tokio::test]
    async fn error_status_is_still_a_response() {
        let (url, _request_rx, handle) =
            mock_server("500 Internal Server Error", "", r#"{"erro":"falhou"}"#).await;

        let t = transport(&url, "session=abc");
        let resp = t
            .send(ApiRequest::new(Method::Get, "/api/biblioteca"))
            .await
            .unwrap();
        assert_eq!(resp.status, 500);
        assert!(!resp.is_success());

        handle.abort();
    }

    #[tokio::test]
    async fn set_cookie_header_is_captured() {
        let (url, _request_rx, handle) = mock_server(
            "200 OK",
            "Set-Cookie: session=xyz; HttpOnly; Path=/\r\n",
            r#"{"success":true}"#,
        )
        .await;

        let t = transport(&url, "");
        let resp = t
            .send(ApiRequest::new(Method::Post, "/api/login"))
            .await
            .unwrap();
        assert_eq!(
            resp.set_cookie.as_deref(),
            Some("session=xyz; HttpOnly; Path=/")
        );

        handle.abort();
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let t = transport(&format!("http://127.0.0.1:{port}"), "");
        let err = t
            .send(ApiRequest::new(Method::Get, "/api/biblioteca"))
            .await
            .unwrap_err();
        assert!(err.0.contains("GET"), "{err}");
    }

    #[test]
    fn method_display_is_uppercase() {
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
