//! Bookstand frontend service library.
//!
//! Renders the same HTML views as the backend, but sources every listing
//! from the backend's REST API over HTTP instead of the record store.

pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use bookstand_http::Renderer;
use bookstand_kernel::{InitCtx, Module};

pub use routes::{ApiClient, FrontState};

/// Frontend module: proxy view handlers over the backend REST API.
pub struct FrontModule {
    state: FrontState,
}

impl FrontModule {
    pub fn new(api: ApiClient, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            state: FrontState { api, renderer },
        }
    }
}

#[async_trait]
impl Module for FrontModule {
    fn name(&self) -> &'static str {
        "front"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.environment,
            backend = %self.state.api.base_url(),
            "front module initialized"
        );
        Ok(())
    }

    fn view_routes(&self) -> Router {
        routes::view_routes(self.state.clone())
    }
}
