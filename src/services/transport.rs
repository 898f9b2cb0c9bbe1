//! Minimal HTTP transport seam.
//!
//! The weather service only ever needs "GET this URL, give me the status and
//! body". Keeping that behind a single-method trait lets tests substitute a
//! canned-response double without any real network access.

use async_trait::async_trait;
use std::fmt::Debug;

/// Status code and raw body of a completed upstream GET.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Connection-level failure: the request never produced an HTTP response.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

/// Capability for issuing one HTTP GET against an arbitrary URL.
///
/// No retries, no timeout policy — one outbound call per invocation.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// Production transport over a shared reqwest client.
///
/// The client's connection pool is the only shared resource; it carries no
/// per-request state.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the transport with the given User-Agent (api.weather.gov
    /// rejects requests without one).
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_2xx() {
        let resp = TransportResponse {
            status: 200,
            body: Vec::new(),
        };
        assert!(resp.is_success());

        let resp = TransportResponse {
            status: 204,
            body: Vec::new(),
        };
        assert!(resp.is_success());
    }

    #[test]
    fn test_is_success_rejects_non_2xx() {
        for status in [199, 301, 404, 500] {
            let resp = TransportResponse {
                status,
                body: Vec::new(),
            };
            assert!(!resp.is_success(), "status {} should not be success", status);
        }
    }
}
