use crate::error::Error;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error body: `{success:false, error, message}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
}

/// A core error plus the category shown for server-side failures on this route.
#[derive(Debug)]
pub struct ApiError {
    pub error: Error,
    pub failure: &'static str,
}

impl ApiError {
    pub fn new(error: Error, failure: &'static str) -> Self {
        Self { error, failure }
    }

    pub fn status(&self) -> StatusCode {
        if self.error.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    pub fn category(&self) -> &'static str {
        match &self.error {
            Error::MissingParameter(_) => "Missing required parameter",
            Error::InvalidYearRange(_) => "Invalid year range",
            Error::InvalidCountries => "Invalid countries",
            Error::MalformedInput(_) => "Invalid parameters",
            Error::UpstreamFetch { .. } | Error::Internal(_) => self.failure,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}: {}", self.failure, self.error);
        }
        let body = ErrorBody {
            success: false,
            error: self.category().to_string(),
            message: self.error.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
