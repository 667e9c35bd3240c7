use anyhow::Context;
use std::sync::Arc;

use axum::Router;

use crate::module::{InitCtx, Module};

/// Module registry for managing module lifecycle and router assembly.
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new module registry.
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module with the registry. Modules are initialized in
    /// registration order.
    pub fn register(&mut self, module: Arc<dyn Module>) {
        self.modules.push(module);
    }

    /// Get all registered modules.
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Get a module by name.
    pub fn get_module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules.iter().find(|module| module.name() == name)
    }

    /// Initialize all modules in registration order.
    pub async fn init_all(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        for module in &self.modules {
            tracing::info!(module = module.name(), "initializing module");

            module
                .init(ctx)
                .await
                .with_context(|| format!("failed to initialize module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Merge every module's REST routes into one router (to be nested
    /// under `/api` by the server).
    pub fn api_router(&self) -> Router {
        self.modules
            .iter()
            .fold(Router::new(), |router, module| {
                router.merge(module.api_routes())
            })
    }

    /// Merge every module's view routes into one root-level router.
    pub fn view_router(&self) -> Router {
        self.modules
            .iter()
            .fold(Router::new(), |router, module| {
                router.merge(module.view_routes())
            })
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
