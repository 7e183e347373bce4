//! HTTP client port: the transport used to reach the switch resource.

use std::future::Future;
use std::time::Duration;

/// Boxed error carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl HttpResponse {
    /// Build a response from a status code and a body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is exactly `200 OK`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Why an HTTP exchange produced no response at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built, e.g. the URL has no scheme.
    #[error("invalid request url")]
    InvalidUrl(#[source] BoxError),

    /// The connection was refused or the host is unreachable.
    #[error("connection failed")]
    Connect(#[source] BoxError),

    /// No complete response arrived within the timeout.
    #[error("request timed out")]
    Timeout,

    /// Any other transport failure (TLS, protocol, body decoding, …).
    #[error("transport error")]
    Other(#[source] BoxError),
}

/// Issues single-attempt HTTP requests.
///
/// Implementations must not retry: one call is one request, and a failed
/// request is reported as a [`TransportError`]. Non-2xx statuses are **not**
/// errors at this level.
pub trait HttpClient {
    /// `GET url`, giving up after `timeout`.
    fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;

    /// `POST url` with `body` sent verbatim, giving up after `timeout`.
    fn post(
        &self,
        url: &str,
        body: String,
        timeout: Duration,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: HttpClient + Send + Sync> HttpClient for std::sync::Arc<T> {
    fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).get(url, timeout)
    }

    fn post(
        &self,
        url: &str,
        body: String,
        timeout: Duration,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).post(url, body, timeout)
    }
}
