//! The classifier capability and the output shapes shared by all backends.

use crate::error::SentimentError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single polarity prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Category chosen by the model, e.g. `POSITIVE` or `NEGATIVE`.
    pub label: String,
    /// Model confidence for `label`, in `[0, 1]`.
    pub score: f64,
}

/// Anything that can turn text into a [`Sentiment`].
///
/// Implementations are constructed once at startup and shared across
/// requests, so they must be safe to call concurrently.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Classifies `text`, returning the most likely label and its score.
    async fn classify(&self, text: &str) -> Result<Sentiment, SentimentError>;
}

/// Raw output of a text-classification model.
///
/// Inference servers answer with one list of candidates per input, either
/// wrapped (`[[...]]`) or flattened (`[...]`). Local runners may print a
/// single object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ClassifierOutput {
    Nested(Vec<Vec<Sentiment>>),
    Flat(Vec<Sentiment>),
    Single(Sentiment),
}

impl ClassifierOutput {
    /// Parses raw model output and picks the top prediction.
    pub(crate) fn parse(raw: &str) -> Result<Sentiment, SentimentError> {
        let output: ClassifierOutput = serde_json::from_str(raw.trim())
            .map_err(|e| SentimentError::InvalidOutput(format!("{e}: {}", truncate(raw))))?;
        select_top(output.into_candidates())
    }

    fn into_candidates(self) -> Vec<Sentiment> {
        match self {
            ClassifierOutput::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            ClassifierOutput::Flat(candidates) => candidates,
            ClassifierOutput::Single(sentiment) => vec![sentiment],
        }
    }
}

/// Returns the highest-scoring candidate.
///
/// Fails on an empty candidate list or on any score outside `[0, 1]`.
pub fn select_top(candidates: Vec<Sentiment>) -> Result<Sentiment, SentimentError> {
    if let Some(bad) = candidates
        .iter()
        .find(|c| !(0.0..=1.0).contains(&c.score))
    {
        return Err(SentimentError::InvalidOutput(format!(
            "score {} for label '{}' is outside [0, 1]",
            bad.score, bad.label
        )));
    }

    candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| SentimentError::InvalidOutput("classifier returned no labels".to_string()))
}

fn truncate(raw: &str) -> String {
    const MAX: usize = 200;
    match raw.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &raw[..idx]),
        None => raw.to_string(),
    }
}
