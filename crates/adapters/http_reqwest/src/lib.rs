//! # restswitch-adapter-http-reqwest
//!
//! [`HttpClient`] built on [reqwest](https://docs.rs/reqwest).
//!
//! One port call is one request: redirects are followed by reqwest, but
//! nothing is retried. Failures are classified into [`TransportError`]
//! variants so the application can tell a malformed URL from an
//! unreachable endpoint.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `restswitch-app` only.

use std::time::Duration;

use restswitch_app::ports::{HttpClient, HttpResponse, TransportError};

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors raised while building the client.
#[derive(Debug, thiserror::Error)]
pub enum ReqwestClientError {
    /// reqwest could not initialise its TLS backend or connection pool.
    #[error("cannot build http client")]
    Build(#[source] reqwest::Error),
}

/// [`HttpClient`] backed by a pooled [`reqwest::Client`].
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client identifying itself as `restswitch-adapter-http-reqwest/<version>`.
    ///
    /// # Errors
    ///
    /// Returns [`ReqwestClientError::Build`] if reqwest cannot initialise.
    pub fn new() -> Result<Self, ReqwestClientError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ReqwestClientError::Build)?;
        Ok(Self { client })
    }

    /// Wrap an existing reqwest client.
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<HttpResponse, TransportError> {
        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError> {
        tracing::trace!(url, ?timeout, "GET");
        self.execute(self.client.get(url).timeout(timeout)).await
    }

    async fn post(
        &self,
        url: &str,
        body: String,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        tracing::trace!(url, ?timeout, "POST");
        let request = self.client.post(url).body(body).timeout(timeout);
        self.execute(request).await
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::InvalidUrl(Box::new(err))
    } else if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect(Box::new(err))
    } else {
        TransportError::Other(Box::new(err))
    }
}
