use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request, StatusCode};

/// Underlying cause of a failed round trip.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends exactly one request and hands back the full response.
///
/// Implementations must not retry and must not interpret the status code;
/// both are left to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport {
    async fn send(&self, request: Request) -> Result<TransportResponse, TransportError>;
}

/// A reqwest-backed `Transport`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport whose requests give up after `timeout`, if set.
    pub fn new(timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::with_client(Client::new())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<TransportResponse, TransportError> {
        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}
