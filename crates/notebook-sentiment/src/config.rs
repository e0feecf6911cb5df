use serde::{Deserialize, Serialize};
use std::fmt;

/// Hosted inference endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://router.huggingface.co/hf-inference/models";

/// Pre-trained model used when none is configured.
pub const DEFAULT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Which classifier implementation to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierBackend {
    /// Remote text-classification inference endpoint.
    #[default]
    Http,
    /// Local model runner spawned per request.
    Command,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub backend: ClassifierBackend,
    /// Base URL of the inference service. The model name is appended.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Bearer token for the inference service.
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,
    /// Executable for the `command` backend.
    #[serde(default)]
    pub binary_path: String,
    /// Model file handed to the runner as `--model <model_path>`.
    #[serde(default)]
    pub model_path: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: ClassifierBackend::default(),
            endpoint: default_endpoint(),
            model: default_model(),
            api_token: None,
            binary_path: String::new(),
            model_path: String::new(),
        }
    }
}

impl fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("backend", &self.backend)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("binary_path", &self.binary_path)
            .field("model_path", &self.model_path)
            .finish()
    }
}
