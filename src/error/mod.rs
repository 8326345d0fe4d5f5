use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Error carried out of API handlers. Anything that bubbles up through `?`
/// becomes a 500; input problems are tagged 400 via [`AppError::bad_request`].
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: Error,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            inner: Error::msg(message.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            inner: err.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("request failed: {:#}", self.inner);
        }
        let body = Json(json!({ "error": self.inner.to_string() }));
        (self.status, body).into_response()
    }
}
