pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use bookstand_http::Renderer;
use bookstand_kernel::{InitCtx, Module};
use bookstand_store::Catalog;

use routes::CatalogState;

/// Book catalog module: the REST API over the record store plus the
/// server-rendered views.
pub struct CatalogModule {
    state: CatalogState,
}

impl CatalogModule {
    pub fn new(catalog: Arc<dyn Catalog>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            state: CatalogState { catalog, renderer },
        }
    }
}

#[async_trait]
impl Module for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.environment,
            "seeding catalog"
        );

        self.state.catalog.seed().await?;
        Ok(())
    }

    fn api_routes(&self) -> Router {
        routes::api_routes(self.state.clone())
    }

    fn view_routes(&self) -> Router {
        routes::view_routes(self.state.clone())
    }
}
