use async_trait::async_trait;
use axum::Router;

use crate::settings::Environment;

/// Context provided to modules during initialization.
pub struct InitCtx<'a> {
    pub environment: &'a Environment,
}

/// Core trait implemented by every Bookstand module.
///
/// A module owns whatever state its handlers need (store handles, HTTP
/// clients, a renderer) and exposes two routers: REST routes mounted under
/// `/api`, and view routes mounted at the server root.
#[async_trait]
pub trait Module: Send + Sync {
    /// Unique name for this module.
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context.
    ///
    /// Called during application startup, before the server binds. This is
    /// where a module provisions its storage invariants (collections,
    /// indexes, seed data). A failure here aborts the process.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// REST routes for this module, mounted under `/api`.
    fn api_routes(&self) -> Router {
        Router::new()
    }

    /// HTML view routes for this module, mounted at the root.
    fn view_routes(&self) -> Router {
        Router::new()
    }
}
