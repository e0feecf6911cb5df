//! Notebook server library logic.
//!
//! Wires page storage and sentiment analysis into an axum router. The
//! binary in `main.rs` only loads configuration, runs the startup routines
//! and serves [`app`].

pub mod api;
pub mod api_pages;
pub mod api_sentiment;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Extension, Json, Router,
};
use notebook_db::DbPool;
use notebook_sentiment::SentimentClassifier;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Sentiment classifier, built once at startup.
    pub classifier: Arc<dyn SentimentClassifier>,
    /// Browser origins allowed to call the API.
    pub cors_origins: Vec<String>,
}

/// Maximum request body size (1 MiB).
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Health check handler.
async fn health(Extension(state): Extension<Arc<AppState>>) -> Result<Json<Value>, api::ApiError> {
    let pages = api::with_conn(&state.pool, "count_pages", notebook_pages::count_pages).await?;
    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "pages": pages,
        "classifier": state.classifier.name(),
    })))
}

/// Builds the CORS layer for the configured origins.
///
/// Credentials are allowed, so methods and headers are mirrored from the
/// preflight request rather than answered with a wildcard.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);

    Router::new()
        .route("/health", get(health))
        .route(
            "/pages/",
            get(api_pages::list_pages_handler).post(api_pages::create_page_handler),
        )
        .route(
            "/pages/{pageId}",
            get(api_pages::get_page_handler)
                .put(api_pages::update_page_handler)
                .delete(api_pages::delete_page_handler),
        )
        .route(
            "/analyze-sentiment/",
            post(api_sentiment::analyze_sentiment_handler),
        )
        .route(
            "/analyze-page-sentiment/{pageId}",
            post(api_sentiment::analyze_page_sentiment_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(Arc::new(state)))
}
