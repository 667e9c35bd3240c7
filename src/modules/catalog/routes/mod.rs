use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, put},
    Json, Router,
};
use serde_json::json;

use bookstand_http::{ApiError, Renderer};
use bookstand_store::{BookDto, BookRecord, Catalog};

use super::models::BookRow;

/// Shared handler state: the store seam and the view renderer.
#[derive(Clone)]
pub struct CatalogState {
    pub catalog: Arc<dyn Catalog>,
    pub renderer: Arc<dyn Renderer>,
}

/// REST routes, mounted under `/api`.
pub fn api_routes(state: CatalogState) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", put(update_book).delete(delete_book))
        .route("/authors", get(list_authors))
        .route("/years", get(list_years))
        .with_state(state)
}

/// View routes, mounted at the server root.
pub fn view_routes(state: CatalogState) -> Router {
    Router::new()
        .route("/", get(index_view))
        .route("/books", get(books_view))
        .route("/authors", get(authors_view))
        .route("/years", get(years_view))
        .route("/search", get(search_view))
        .route("/create", get(create_view))
        .with_state(state)
}

async fn list_books(State(state): State<CatalogState>) -> Result<Json<Vec<BookDto>>, ApiError> {
    let books = state.catalog.find_all().await?;
    Ok(Json(books.iter().map(BookRecord::to_dto).collect()))
}

async fn create_book(
    State(state): State<CatalogState>,
    payload: Result<Json<BookDto>, JsonRejection>,
) -> Result<(StatusCode, Json<BookDto>), ApiError> {
    let Json(dto) = payload.map_err(|err| {
        tracing::error!(operation = "create", error = %err, "malformed request body");
        ApiError::bad_request(err.body_text())
    })?;

    if dto.id.is_empty() || dto.title.is_empty() || dto.author.is_empty() {
        return Err(ApiError::bad_request("id, title and author are required"));
    }

    let record = state.catalog.insert(BookRecord::from_dto(dto)).await?;
    Ok((StatusCode::CREATED, Json(record.to_dto())))
}

async fn update_book(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    payload: Result<Json<BookDto>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(mut dto) = payload.map_err(|err| {
        tracing::error!(operation = "update", id = %id, error = %err, "malformed request body");
        ApiError::bad_request(err.body_text())
    })?;

    // The path identifier always overrides any identifier in the body.
    dto.id = id.clone();

    state.catalog.update(&id, BookRecord::from_dto(dto)).await?;
    Ok(StatusCode::OK)
}

async fn delete_book(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete(&id).await?;
    Ok(StatusCode::OK)
}

async fn list_authors(State(state): State<CatalogState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.catalog.distinct_authors().await?))
}

async fn list_years(State(state): State<CatalogState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.catalog.distinct_years().await?))
}

async fn index_view(State(state): State<CatalogState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.renderer.render("index.html", &json!({}))?))
}

async fn books_view(State(state): State<CatalogState>) -> Result<Html<String>, ApiError> {
    let books = state.catalog.find_all().await?;
    let rows: Vec<BookRow> = books.iter().map(BookRow::from_record).collect();

    Ok(Html(
        state
            .renderer
            .render("book-table.html", &json!({ "books": rows }))?,
    ))
}

async fn authors_view(State(state): State<CatalogState>) -> Result<Html<String>, ApiError> {
    let authors = state.catalog.distinct_authors().await?;
    Ok(Html(
        state
            .renderer
            .render("author-list.html", &json!({ "authors": authors }))?,
    ))
}

async fn years_view(State(state): State<CatalogState>) -> Result<Html<String>, ApiError> {
    let years = state.catalog.distinct_years().await?;
    Ok(Html(
        state
            .renderer
            .render("year-list.html", &json!({ "years": years }))?,
    ))
}

async fn search_view(State(state): State<CatalogState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.renderer.render("search-bar.html", &json!({}))?))
}

// Placeholder route: the create form is not served yet.
async fn create_view() -> StatusCode {
    StatusCode::NO_CONTENT
}
