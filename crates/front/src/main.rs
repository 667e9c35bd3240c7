use std::sync::Arc;

use anyhow::Context;

use bookstand_front::{ApiClient, FrontModule};
use bookstand_http::{RouterBuilder, TeraRenderer};
use bookstand_kernel::settings::FrontSettings;
use bookstand_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings =
        FrontSettings::load().with_context(|| "failed to load bookstand-front settings")?;
    bookstand_telemetry::init(settings.debug, settings.telemetry.format);

    tracing::info!(
        env = ?settings.environment,
        backend = %settings.api.url,
        "bookstand-front bootstrap starting"
    );

    let renderer = Arc::new(
        TeraRenderer::load(&settings.views.glob).context("failed to load view templates")?,
    );

    let mut registry = ModuleRegistry::new();
    registry.register(Arc::new(FrontModule::new(
        ApiClient::new(settings.api.url.clone()),
        renderer,
    )));

    let ctx = InitCtx {
        environment: &settings.environment,
    };
    registry.init_all(&ctx).await?;

    let app = RouterBuilder::new()
        .route("/healthz", axum::routing::get(bookstand_http::health_check))
        .mount_views(registry.view_router())
        .with_static_dir("/css", &settings.views.assets)
        .with_tracing()
        .with_request_id()
        .build();

    tracing::info!(port = settings.server.port, "starting server");
    bookstand_http::serve(app, &settings.server.host, settings.server.port).await
}
