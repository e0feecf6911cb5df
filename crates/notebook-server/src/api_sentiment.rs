//! Sentiment analysis handlers.

use crate::{
    api::{with_conn, ApiError},
    AppState,
};
use axum::extract::{rejection::JsonRejection, Extension, Json, Path};
use notebook_pages::get_page;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Label reported for a page with no content.
pub const NEUTRAL_LABEL: &str = "Neutral";

/// Score reported alongside [`NEUTRAL_LABEL`].
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Error returned when there is nothing to classify.
pub const NO_TEXT_MESSAGE: &str = "No text provided for sentiment analysis.";

/// Explanation attached to the neutral response.
pub const EMPTY_CONTENT_MESSAGE: &str = "Page content is empty, sentiment is neutral.";

/// Request body for free-text analysis.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Response body for free-text analysis.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub text: String,
    pub sentiment: String,
    pub score: f64,
}

/// Response body for page analysis.
///
/// A classified page carries `text_analyzed`; the empty-content shortcut
/// carries `message` instead.
#[derive(Debug, Serialize, Deserialize)]
pub struct PageSentimentResponse {
    pub page_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_analyzed: Option<String>,
    pub sentiment: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PageSentimentResponse {
    fn neutral(page_id: String) -> Self {
        Self {
            page_id,
            text_analyzed: None,
            sentiment: NEUTRAL_LABEL.to_string(),
            score: NEUTRAL_SCORE,
            message: Some(EMPTY_CONTENT_MESSAGE.to_string()),
        }
    }
}

/// POST /analyze-sentiment/
///
/// A request without a JSON body counts as missing `text`. Any other body
/// that fails to parse is a 400 carrying the parser's message.
pub async fn analyze_sentiment_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(JsonRejection::MissingJsonContentType(_)) => AnalyzeRequest { text: None },
        Err(rejection) => return Err(ApiError::BadRequest(rejection.body_text())),
    };

    let text = payload
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest(NO_TEXT_MESSAGE.to_string()))?;

    let result = state.classifier.classify(&text).await?;
    tracing::debug!(
        classifier = state.classifier.name(),
        label = %result.label,
        score = result.score,
        "classified text"
    );

    Ok(Json(AnalyzeResponse {
        text,
        sentiment: result.label,
        score: result.score,
    }))
}

/// POST /analyze-page-sentiment/:pageId
///
/// Classifies the page's content. Empty content is answered with a fixed
/// neutral result and never reaches the classifier.
pub async fn analyze_page_sentiment_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(page_id): Path<String>,
) -> Result<Json<PageSentimentResponse>, ApiError> {
    let id = page_id.clone();
    let page = with_conn(&state.pool, "get_page", move |conn| get_page(conn, &id))
        .await?
        .ok_or_else(ApiError::page_not_found)?;

    if page.content.is_empty() {
        return Ok(Json(PageSentimentResponse::neutral(page_id)));
    }

    let result = state.classifier.classify(&page.content).await?;
    tracing::debug!(
        page_id = %page_id,
        classifier = state.classifier.name(),
        label = %result.label,
        "classified page"
    );

    Ok(Json(PageSentimentResponse {
        page_id,
        text_analyzed: Some(page.content),
        sentiment: result.label,
        score: result.score,
        message: None,
    }))
}
