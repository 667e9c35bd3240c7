//! Error handling for the Bookstand HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use bookstand_store::StoreError;

use crate::render::RenderError;

/// Application error types that map to HTTP responses.
///
/// Responses carry no body; failures are diagnosed from the logs, which
/// record the operation and identifier at the point of detection.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or incomplete request input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The record store rejected or failed the operation. This includes
    /// update-miss: the REST contract this service inherited reports a
    /// missing update target as a server error, not a 404.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A frontend call to the backend API failed in transport or decode.
    #[error("upstream request failed: {0}")]
    Upstream(anyhow::Error),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn upstream(err: impl Into<anyhow::Error>) -> Self {
        Self::Upstream(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Upstream(_) | ApiError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        tracing::error!(
            error = %self,
            status = status.as_u16(),
            "request failed"
        );

        status.into_response()
    }
}
