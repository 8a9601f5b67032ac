//! One-shot callback listener.
//!
//! A narrowly scoped "wait for one callback, then stop" primitive: bind a
//! listener, accept one connection, parse one request, respond, close. No
//! routing. The listener's lifetime equals exactly one callback, so a
//! second concurrent redirect is never serviced.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Upper bound on the request head we are willing to buffer.
const MAX_REQUEST_BYTES: usize = 8 * 1024;

/// Bound TCP listener waiting for the OAuth redirect.
pub struct CallbackListener {
    listener: TcpListener,
}

impl CallbackListener {
    /// Bind to the given address.
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    /// The address the listener is actually bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept exactly one connection and read one request head.
    ///
    /// Consumes the listener: once a request has been read, nothing else
    /// will ever be accepted on this port by this flow.
    pub async fn accept_one(self) -> io::Result<Callback> {
        let (mut stream, peer) = self.listener.accept().await?;
        drop(self.listener);

        let mut head = Vec::with_capacity(1024);
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            head.extend_from_slice(&chunk[..n]);
            if head.windows(4).any(|w| w == b"\r\n\r\n") || head.len() > MAX_REQUEST_BYTES {
                break;
            }
        }

        let head = String::from_utf8_lossy(&head);
        let params = parse_request_query(&head);
        tracing::debug!("Received OAuth callback from {}", peer);

        Ok(Callback { stream, params })
    }
}

/// A single received callback request, waiting for its response.
pub struct Callback {
    stream: TcpStream,
    params: HashMap<String, String>,
}

impl Callback {
    /// Look up a query parameter from the redirect.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Write an HTML page back to the browser and close the connection.
    pub async fn respond(mut self, body: &str) -> io::Result<()> {
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        self.stream.write_all(response.as_bytes()).await?;
        self.stream.shutdown().await
    }
}

/// Extract query parameters from the request line of an HTTP request head.
///
/// A request with no query string (or no parseable request line at all)
/// yields an empty map.
fn parse_request_query(head: &str) -> HashMap<String, String> {
    let request_line = head.lines().next().unwrap_or("");
    let target = request_line.split_whitespace().nth(1).unwrap_or("");
    let query = target.split_once('?').map(|(_, q)| q).unwrap_or("");

    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_code_from_request_line() {
        let head = "GET /oauth/callback?code=abc123&state=xyz HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let params = parse_request_query(head);
        assert_eq!(params.get("code").map(String::as_str), Some("abc123"));
        assert_eq!(params.get("state").map(String::as_str), Some("xyz"));
    }

    #[test]
    fn decodes_percent_encoded_values() {
        let head = "GET /cb?error=access_denied&error_description=user%20denied HTTP/1.1\r\n\r\n";
        let params = parse_request_query(head);
        assert_eq!(
            params.get("error_description").map(String::as_str),
            Some("user denied")
        );
    }

    #[test]
    fn bare_path_yields_no_params() {
        let head = "GET /oauth/callback HTTP/1.1\r\nHost: localhost\r\n\r\n";
        assert!(parse_request_query(head).is_empty());
    }

    #[test]
    fn empty_head_yields_no_params() {
        assert!(parse_request_query("").is_empty());
    }

    #[tokio::test]
    async fn accepts_one_request_and_responds() {
        let listener = CallbackListener::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream
                .write_all(b"GET /oauth/callback?code=one HTTP/1.1\r\nHost: x\r\n\r\n")
                .await
                .unwrap();
            let mut response = String::new();
            stream.read_to_string(&mut response).await.unwrap();
            response
        });

        let callback = listener.accept_one().await.unwrap();
        assert_eq!(callback.query_param("code"), Some("one"));
        callback.respond("<html>ok</html>").await.unwrap();

        let response = client.await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.ends_with("<html>ok</html>"));
    }
}
