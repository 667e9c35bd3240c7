//! Router builder for the Bookstand services.

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::SetRequestIdLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::MakeRequestUuid;

/// Builder for constructing a service's HTTP router.
///
/// Both services assemble the same way: REST routes nested under `/api`,
/// view routes merged at the root, static assets, then the middleware
/// stack. There is deliberately no timeout layer; a request blocks until
/// the store (or the backend, for the frontend service) responds.
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder.
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router.
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Nest the REST routes under `/api`.
    pub fn mount_api(mut self, api: Router) -> Self {
        self.router = self.router.nest("/api", api);
        self
    }

    /// Merge view routes at the root.
    pub fn mount_views(mut self, views: Router) -> Self {
        self.router = self.router.merge(views);
        self
    }

    /// Serve a static asset directory (the stylesheet dir in practice).
    pub fn with_static_dir(mut self, path: &str, dir: &str) -> Self {
        self.router = self.router.nest_service(path, ServeDir::new(dir));
        self
    }

    /// Add tracing middleware.
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware.
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Add request ID middleware.
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        self
    }

    /// Build the final router.
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn api_routes_nest_under_api() {
        let api = Router::new().route("/books", get(|| async { "[]" }));

        let _router = RouterBuilder::new()
            .mount_api(api)
            .route("/healthz", get(crate::health_check))
            .build();
    }

    #[tokio::test]
    async fn middleware_chain_builds() {
        let views = Router::new().route("/", get(|| async { "index" }));

        let _router = RouterBuilder::new()
            .mount_views(views)
            .with_tracing()
            .with_cors()
            .with_request_id()
            .build();
    }
}
