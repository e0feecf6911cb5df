//! Page CRUD handlers.

use crate::{
    api::{with_conn, ApiError},
    AppState,
};
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use notebook_pages::{create_page, delete_page, get_page, list_pages, update_page, Page, PageInput};
use std::sync::Arc;

/// GET /pages/
///
/// Returns every page, ordered by title without regard to case.
pub async fn list_pages_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Page>>, ApiError> {
    let pages = with_conn(&state.pool, "list_pages", list_pages).await?;
    Ok(Json(pages))
}

/// GET /pages/:pageId
pub async fn get_page_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(page_id): Path<String>,
) -> Result<Json<Page>, ApiError> {
    with_conn(&state.pool, "get_page", move |conn| get_page(conn, &page_id))
        .await?
        .map(Json)
        .ok_or_else(ApiError::page_not_found)
}

/// POST /pages/
pub async fn create_page_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(input): Json<PageInput>,
) -> Result<(StatusCode, Json<Page>), ApiError> {
    input.validate()?;

    let page = with_conn(&state.pool, "create_page", move |conn| {
        create_page(conn, &input)
    })
    .await?;

    tracing::info!(page_id = %page.id, "page created");
    Ok((StatusCode::CREATED, Json(page)))
}

/// PUT /pages/:pageId
///
/// Replaces title and content. The page keeps its ID.
pub async fn update_page_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(page_id): Path<String>,
    Json(input): Json<PageInput>,
) -> Result<Json<Page>, ApiError> {
    input.validate()?;

    with_conn(&state.pool, "update_page", move |conn| {
        update_page(conn, &page_id, &input)
    })
    .await?
    .map(Json)
    .ok_or_else(ApiError::page_not_found)
}

/// DELETE /pages/:pageId
pub async fn delete_page_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(page_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = page_id.clone();
    let deleted = with_conn(&state.pool, "delete_page", move |conn| delete_page(conn, &id)).await?;

    if !deleted {
        return Err(ApiError::page_not_found());
    }

    tracing::info!(page_id = %page_id, "page deleted");
    Ok(StatusCode::NO_CONTENT)
}
