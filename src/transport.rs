use std::time::Duration;

use async_trait::async_trait;

use crate::{EnrichlyError, Method, RawResponse, Request, Result};

/// Sends one request over the network.
///
/// The dispatch engine depends only on this seam: one asynchronous attempt in,
/// one raw response or transport failure out. Retry and classification live
/// above it, so alternative transports (tests, instrumentation wrappers) plug
/// in without touching the engine.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a single attempt. Must not retry internally.
    async fn send_once(&self, request: &Request) -> Result<RawResponse>;
}

/// Production [`Transport`] over `reqwest`.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with reqwest's default connect behavior.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Creates a transport with an explicit TCP connect timeout.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized.
    pub fn with_connect_timeout(connect_timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|err| panic!("failed to initialize HTTP transport: {err}"));
        Self { http }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_once(&self, request: &Request) -> Result<RawResponse> {
        let method = match request.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self
            .http
            .request(method, request.url())
            .timeout(request.timeout());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.body().is_empty() {
            builder = builder.body(request.body().to_vec());
        }

        let response = builder.send().await.map_err(EnrichlyError::transport)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|text| (name.as_str().to_owned(), text.to_owned()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(EnrichlyError::transport)?
            .to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
