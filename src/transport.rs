use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;
use tokio::time::timeout;
use wreq::{Client, header};

use crate::config::LoginConfig;

/// Outbound SOAP call
#[derive(Debug, Clone)]
pub struct SoapRequest {
    pub body: String,
    pub content_type: &'static str,
    pub soap_action: &'static str,
}

/// Status and raw body of the endpoint's reply
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] wreq::Error),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("HTTP Error: {0}")]
    Status(u16),
}

/// Sends a SOAP request and returns whatever the endpoint answered.
///
/// Implementations never interpret the body. The body of a non-2xx reply may
/// be left empty.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: SoapRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// `Transport` over HTTP(S) backed by a `wreq` client
pub struct HttpTransport {
    http_client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &LoginConfig) -> Result<Self> {
        let mut http_builder = Client::builder().gzip(true);

        if let Some(ref proxy_url) = config.proxy {
            tracing::info!("Using proxy for SOAP endpoint");
            http_builder = http_builder.proxy(wreq::Proxy::all(proxy_url)?);
        }

        let http_client = http_builder.build()?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: SoapRequest) -> Result<TransportResponse, TransportError> {
        let response = self
            .http_client
            .post(self.endpoint.as_str())
            .header(header::CONTENT_TYPE, request.content_type)
            .header("SOAPAction", request.soap_action)
            .body(request.body)
            .send()
            .await?;

        let status = response.status();

        // Error bodies are never classified, don't wait on them
        if !status.is_success() {
            return Ok(TransportResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response.text().await?;
        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: SoapRequest) -> Result<TransportResponse, TransportError> {
        let response = timeout(self.timeout, self.post(request))
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))??;

        tracing::debug!(
            "SOAP endpoint answered {} with {} bytes",
            response.status,
            response.body.len()
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let response = |status| TransportResponse {
            status,
            body: String::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(199).is_success());
        assert!(!response(302).is_success());
        assert!(!response(500).is_success());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TransportError::Status(500).to_string(), "HTTP Error: 500");
        assert_eq!(
            TransportError::Timeout(Duration::from_millis(250)).to_string(),
            "Request timed out after 250ms"
        );
    }

    #[test]
    fn test_builds_with_defaults() {
        let transport = HttpTransport::new(&LoginConfig::default()).unwrap();
        assert_eq!(transport.endpoint(), crate::config::DEFAULT_ENDPOINT);
    }
}
