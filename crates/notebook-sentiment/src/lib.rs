//! Sentiment analysis for notebook pages.
//!
//! Inference is delegated to a pre-trained text-classification model. Route
//! handlers only see the [`SentimentClassifier`] trait; which model answers
//! is decided once at startup by [`build_classifier`]:
//!
//! - [`HttpClassifier`] posts to a hosted inference endpoint
//!   (by default the SST-2 fine-tuned DistilBERT model).
//! - [`CommandClassifier`] pipes text through a local model runner.
//!
//! There are no retries, no caching and no timeouts. A failed or slow model
//! call is the caller's problem.

pub mod classifier;
pub mod command;
pub mod config;
pub mod error;
pub mod http;

pub use classifier::{select_top, Sentiment, SentimentClassifier};
pub use command::CommandClassifier;
pub use config::{ClassifierBackend, ClassifierConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use error::SentimentError;
pub use http::HttpClassifier;

use std::sync::Arc;

/// Builds the configured classifier, ready to be shared across requests.
pub fn build_classifier(
    config: &ClassifierConfig,
) -> Result<Arc<dyn SentimentClassifier>, SentimentError> {
    let classifier: Arc<dyn SentimentClassifier> = match config.backend {
        ClassifierBackend::Http => {
            let classifier = HttpClassifier::new(config)?;
            tracing::info!(url = classifier.url(), "using hosted sentiment classifier");
            Arc::new(classifier)
        }
        ClassifierBackend::Command => {
            let classifier = CommandClassifier::from_config(config)?;
            tracing::info!(
                binary = %config.binary_path,
                model = %config.model_path,
                "using local sentiment classifier"
            );
            Arc::new(classifier)
        }
    };
    Ok(classifier)
}
