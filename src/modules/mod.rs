pub mod catalog;

use std::sync::Arc;

use bookstand_http::Renderer;
use bookstand_kernel::ModuleRegistry;
use bookstand_store::Catalog;

/// Register all backend modules with the registry.
pub fn register_all(
    registry: &mut ModuleRegistry,
    catalog: Arc<dyn Catalog>,
    renderer: Arc<dyn Renderer>,
) {
    registry.register(Arc::new(catalog::CatalogModule::new(catalog, renderer)));
}
