//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use restswitch_app::error::ServiceError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`ServiceError`] to an HTTP response with appropriate status code.
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match std::error::Error::source(&self.0) {
            Some(cause) => format!("{}: {cause}", self.0),
            None => self.0.to_string(),
        };
        let status = match &self.0 {
            ServiceError::UnknownService(_) => StatusCode::BAD_REQUEST,
            ServiceError::Command(_) | ServiceError::Refresh(_) => {
                tracing::warn!(error = %message, "switch service failed");
                StatusCode::BAD_GATEWAY
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
