//! HTTP JSON-RPC transport backed by `reqwest`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::{Connector, RpcRequest, RpcResponse, RpcTransport, TransportError};
use crate::config::AirdropConfig;
use crate::error::{AirdropError, Result};
use crate::network::NetworkProfile;

/// Transport bound to a single RPC endpoint.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    rpc_url: String,
}

impl HttpTransport {
    pub fn new(http_client: reqwest::Client, rpc_url: &str) -> Self {
        Self {
            http_client,
            rpc_url: rpc_url.to_string(),
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(&self, request: RpcRequest) -> core::result::Result<RpcResponse, TransportError> {
        debug!(url = %self.rpc_url, method = %request.method, "rpc call");

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(format!("{} request failed: {}", request.method, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Unreachable(format!("failed to read response body: {}", e)))?;

        // Rate-limited replies usually still carry a JSON-RPC error body; prefer it.
        match serde_json::from_str::<RpcResponse>(&body) {
            Ok(parsed) if parsed.result.is_some() || parsed.error.is_some() => Ok(parsed),
            _ if !status.is_success() => Err(TransportError::Status {
                code: status.as_u16(),
                body: body.trim().to_string(),
            }),
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(TransportError::Unreachable(format!(
                "failed to parse {} response: {}",
                request.method, e
            ))),
        }
    }

    fn endpoint(&self) -> &str {
        &self.rpc_url
    }
}

/// Connector sharing one `reqwest::Client` across requests.
#[derive(Clone, Debug)]
pub struct HttpConnector {
    http_client: reqwest::Client,
}

impl HttpConnector {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| AirdropError::Configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http_client })
    }

    pub fn from_config(config: &AirdropConfig) -> Result<Self> {
        Self::new(config.request_timeout())
    }
}

impl Connector for HttpConnector {
    fn connect(&self, profile: &NetworkProfile) -> Result<Arc<dyn RpcTransport>> {
        Ok(Arc::new(HttpTransport::new(self.http_client.clone(), &profile.endpoint_url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkResolver;
    use crate::types::Network;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn local_client() -> reqwest::Client {
        reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    /// Serve one canned HTTP response on a loopback port, returning its URL.
    async fn serve_once(status_line: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    /// Consume headers and the `Content-Length` body so the reply is not reset.
    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let body_len = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    return;
                }
            }
        }
    }

    async fn call(url: &str) -> core::result::Result<RpcResponse, TransportError> {
        HttpTransport::new(local_client(), url)
            .call(RpcRequest::new("requestAirdrop", serde_json::json!(["x", 1])))
            .await
    }

    #[tokio::test]
    async fn test_success_body_is_parsed() {
        let url = serve_once("200 OK", r#"{"jsonrpc":"2.0","id":1,"result":"5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW"}"#).await;
        let resp = call(&url).await.unwrap();
        assert!(resp.error.is_none());
        assert!(resp.result.unwrap().is_string());
    }

    #[tokio::test]
    async fn test_error_status_with_rpc_body_is_parsed() {
        let url = serve_once(
            "429 Too Many Requests",
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":429,"message":"Too many requests for a specific RPC call"}}"#,
        )
        .await;
        let resp = call(&url).await.unwrap();
        let error = resp.error.unwrap();
        assert_eq!(error.code, 429);
        assert!(error.message.contains("Too many requests"));
    }

    #[tokio::test]
    async fn test_bare_error_status_is_status_error() {
        let url = serve_once("429 Too Many Requests", "Too Many Requests\n").await;
        let err = call(&url).await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Status { code: 429, body: "Too Many Requests".to_string() }
        );
    }

    #[tokio::test]
    async fn test_ok_status_with_garbage_body_is_unreachable() {
        let url = serve_once("200 OK", "<html>gateway hiccup</html>").await;
        let err = call(&url).await.unwrap_err();
        assert!(matches!(err, TransportError::Unreachable(ref m) if m.contains("requestAirdrop")));
    }

    #[test]
    fn test_connector_binds_profile_endpoint() {
        let connector = HttpConnector::new(Duration::from_secs(5)).unwrap();
        let profile = NetworkResolver::default().resolve(Network::Devnet);
        let transport = connector.connect(&profile).unwrap();
        assert_eq!(transport.endpoint(), "https://api.devnet.solana.com");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let transport = HttpTransport::new(local_client(), "http://127.0.0.1:1");
        let err = transport
            .call(RpcRequest::new("getHealth", serde_json::json!([])))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Unreachable(_)));
    }
}
