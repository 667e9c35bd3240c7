use std::sync::Arc;

use anyhow::Context;

use bookstand_app::modules;
use bookstand_http::{RouterBuilder, TeraRenderer};
use bookstand_kernel::settings::Settings;
use bookstand_kernel::{InitCtx, ModuleRegistry};
use bookstand_store::MongoCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookstand settings")?;
    bookstand_telemetry::init(settings.debug, settings.telemetry.format);

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.name,
        collection = %settings.database.collection,
        "bookstand bootstrap starting"
    );

    // The process refuses to run unless the store enforces the catalog's
    // uniqueness invariants, so provisioning failures are fatal here.
    let catalog = MongoCatalog::connect(&settings.database)
        .await
        .context("failed to connect to the record store")?;
    catalog
        .prepare()
        .await
        .context("failed to provision the collection and its indexes")?;
    let catalog = Arc::new(catalog);

    let renderer = Arc::new(
        TeraRenderer::load(&settings.views.glob).context("failed to load view templates")?,
    );

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, catalog, renderer);

    let ctx = InitCtx {
        environment: &settings.environment,
    };
    registry.init_all(&ctx).await?;

    let app = RouterBuilder::new()
        .route("/healthz", axum::routing::get(bookstand_http::health_check))
        .mount_api(registry.api_router())
        .mount_views(registry.view_router())
        .with_static_dir("/css", &settings.views.assets)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .build();

    tracing::info!(port = settings.server.port, "starting server");
    bookstand_http::serve(app, &settings.server.host, settings.server.port).await
}
