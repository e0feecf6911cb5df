#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use notebook_db::{create_memory_pool, run_migrations, DbPool};
use notebook_sentiment::{Sentiment, SentimentClassifier, SentimentError};
use notebook_server::{app, AppState};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Classifier stand-in that labels text containing "bad" as negative and
/// counts how often it was called.
#[derive(Default)]
pub struct FakeClassifier {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeClassifier {
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentClassifier for FakeClassifier {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment, SentimentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SentimentError::Process("model crashed".to_string()));
        }
        let sentiment = if text.contains("bad") {
            Sentiment {
                label: "NEGATIVE".to_string(),
                score: 0.98,
            }
        } else {
            Sentiment {
                label: "POSITIVE".to_string(),
                score: 0.95,
            }
        };
        Ok(sentiment)
    }
}

/// An in-memory page store with the schema applied.
pub fn memory_pool() -> DbPool {
    let pool = create_memory_pool().unwrap();
    run_migrations(&pool.get().unwrap()).unwrap();
    pool
}

pub fn setup_app_with(classifier: Arc<FakeClassifier>) -> (Router, DbPool) {
    let pool = memory_pool();
    let state = AppState {
        pool: pool.clone(),
        classifier,
        cors_origins: vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ],
    };
    (app(state), pool)
}

pub fn setup_app() -> (Router, DbPool) {
    setup_app_with(Arc::new(FakeClassifier::default()))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
