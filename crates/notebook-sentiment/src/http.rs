use crate::classifier::{ClassifierOutput, Sentiment, SentimentClassifier};
use crate::config::ClassifierConfig;
use crate::error::SentimentError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Classifier backed by a hosted text-classification endpoint
/// (Hugging Face inference API or a compatible server).
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
    url: String,
    api_token: Option<String>,
}

impl HttpClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, SentimentError> {
        if config.endpoint.trim().is_empty() {
            return Err(SentimentError::Config(
                "classifier endpoint must not be empty".to_string(),
            ));
        }
        if config.model.trim().is_empty() {
            return Err(SentimentError::Config(
                "classifier model must not be empty".to_string(),
            ));
        }

        let client = Client::builder().build()?;
        let url = format!("{}/{}", config.endpoint.trim_end_matches('/'), config.model);

        Ok(Self {
            client,
            url,
            api_token: config.api_token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SentimentClassifier for HttpClassifier {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment, SentimentError> {
        let mut request = self.client.post(&self.url).json(&json!({ "inputs": text }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %self.url, "inference request rejected");
            return Err(SentimentError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        ClassifierOutput::parse(&body)
    }
}
