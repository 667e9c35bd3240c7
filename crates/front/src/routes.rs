use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use bookstand_http::{ApiError, Renderer};
use bookstand_store::BookDto;

use crate::models::BookRow;

/// Thin client for the backend REST API. One synchronous-looking call per
/// view request; the underlying `reqwest::Client` pools connections and is
/// shared across all in-flight requests.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.get(&url).send().await.map_err(|err| {
            tracing::error!(url = %url, error = %err, "backend request failed");
            ApiError::upstream(err)
        })?;

        response.json::<T>().await.map_err(|err| {
            tracing::error!(url = %url, error = %err, "backend response failed to decode");
            ApiError::upstream(err)
        })
    }

    pub async fn books(&self) -> Result<Vec<BookDto>, ApiError> {
        self.get_json("/api/books").await
    }

    pub async fn authors(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("/api/authors").await
    }

    pub async fn years(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("/api/years").await
    }
}

/// Shared handler state: the backend client and the view renderer.
#[derive(Clone)]
pub struct FrontState {
    pub api: ApiClient,
    pub renderer: Arc<dyn Renderer>,
}

/// View routes, mounted at the server root.
pub fn view_routes(state: FrontState) -> Router {
    Router::new()
        .route("/", get(index_view))
        .route("/books", get(books_view))
        .route("/authors", get(authors_view))
        .route("/years", get(years_view))
        .route("/search", get(search_view))
        .route("/create", get(create_view))
        .with_state(state)
}

async fn index_view(State(state): State<FrontState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.renderer.render("index.html", &json!({}))?))
}

async fn books_view(State(state): State<FrontState>) -> Result<Html<String>, ApiError> {
    let books = state.api.books().await?;
    let rows: Vec<BookRow> = books.iter().map(BookRow::from).collect();

    Ok(Html(
        state
            .renderer
            .render("book-table.html", &json!({ "books": rows }))?,
    ))
}

async fn authors_view(State(state): State<FrontState>) -> Result<Html<String>, ApiError> {
    let authors = state.api.authors().await?;
    Ok(Html(
        state
            .renderer
            .render("author-list.html", &json!({ "authors": authors }))?,
    ))
}

async fn years_view(State(state): State<FrontState>) -> Result<Html<String>, ApiError> {
    let years = state.api.years().await?;
    Ok(Html(
        state
            .renderer
            .render("year-list.html", &json!({ "years": years }))?,
    ))
}

async fn search_view(State(state): State<FrontState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.renderer.render("search-bar.html", &json!({}))?))
}

// Placeholder route: the create form is not served yet.
async fn create_view() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrontModule;

    use axum::body::Body;
    use axum::http::Request;
    use axum::Json;
    use bookstand_http::{RouterBuilder, TeraRenderer};
    use bookstand_kernel::Module;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_renderer() -> TeraRenderer {
        let mut tera = tera::Tera::default();
        tera.add_raw_templates(vec![
            ("index.html", "<h1>Bookstand</h1>"),
            (
                "book-table.html",
                "{% for book in books %}<tr><td>{{ book.ID }}</td><td>{{ book.BookName }}</td></tr>{% endfor %}",
            ),
            (
                "author-list.html",
                "{% for author in authors %}<li>{{ author }}</li>{% endfor %}",
            ),
            (
                "year-list.html",
                "{% for year in years %}<li>{{ year }}</li>{% endfor %}",
            ),
            ("search-bar.html", "<input type=\"search\">"),
        ])
        .unwrap();
        TeraRenderer::new(tera)
    }

    fn front_app(base_url: String) -> Router {
        let module = FrontModule::new(ApiClient::new(base_url), Arc::new(test_renderer()));
        RouterBuilder::new()
            .mount_views(module.view_routes())
            .build()
    }

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: axum::http::Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn books_view_reshapes_and_renders_the_backend_payload() {
        let backend = Router::new().route(
            "/api/books",
            get(|| async {
                Json(vec![BookDto {
                    id: "b1".to_string(),
                    title: "T".to_string(),
                    author: "A".to_string(),
                    pages: "10".to_string(),
                    edition: "e".to_string(),
                    year: "2000".to_string(),
                }])
            }),
        );
        let base_url = spawn_backend(backend).await;
        let app = front_app(base_url);

        let response = app.oneshot(get_req("/books")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<td>b1</td><td>T</td>"));
    }

    #[tokio::test]
    async fn author_and_year_views_render_backend_lists() {
        let backend = Router::new()
            .route("/api/authors", get(|| async { Json(vec!["A".to_string()]) }))
            .route("/api/years", get(|| async { Json(vec!["2000".to_string()]) }));
        let base_url = spawn_backend(backend).await;
        let app = front_app(base_url);

        let response = app.clone().oneshot(get_req("/authors")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("<li>A</li>"));

        let response = app.oneshot(get_req("/years")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("<li>2000</li>"));
    }

    #[tokio::test]
    async fn unreachable_backend_yields_a_bodiless_server_error() {
        // Nothing listens on port 1.
        let app = front_app("http://127.0.0.1:1".to_string());

        let response = app.oneshot(get_req("/books")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn undecodable_backend_payload_yields_a_server_error() {
        let backend =
            Router::new().route("/api/books", get(|| async { "not json at all" }));
        let base_url = spawn_backend(backend).await;
        let app = front_app(base_url);

        let response = app.oneshot(get_req("/books")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn static_views_do_not_touch_the_backend() {
        let app = front_app("http://127.0.0.1:1".to_string());

        let response = app.clone().oneshot(get_req("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get_req("/search")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_req("/create")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
