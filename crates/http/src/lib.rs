//! HTTP server facade for Bookstand: Axum bootstrap, router builder,
//! error-to-status mapping, and the view renderer seam.

use anyhow::Context;
use axum::{extract::Request, http::HeaderValue, Router};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::{Timestamp, Uuid};

pub mod error;
pub mod render;
pub mod router;

pub use error::ApiError;
pub use render::{Renderer, TeraRenderer};
pub use router::RouterBuilder;

/// Bind and serve the assembled router until the process exits.
pub async fn serve(app: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}"))
        .await
        .context("failed to bind to address")?;

    tracing::info!("HTTP server listening on http://{host}:{port}");

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Health check endpoint.
pub async fn health_check() -> &'static str {
    "ok"
}

/// Request ID generator for tracing.
#[derive(Clone, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}
