use crate::classifier::{ClassifierOutput, Sentiment, SentimentClassifier};
use crate::config::ClassifierConfig;
use crate::error::SentimentError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Maximum text size handed to the runner (10 MiB).
const MAX_COMMAND_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Classifier that runs a local model binary once per call.
///
/// The text is written to the runner's stdin and the prediction is read as
/// JSON from stdout, in any shape accepted by the inference endpoints.
#[derive(Debug, Clone)]
pub struct CommandClassifier {
    binary_path: PathBuf,
    args: Vec<String>,
}

impl CommandClassifier {
    pub fn new(binary_path: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
            args,
        }
    }

    /// Runs `<binary_path> --model <model_path>`.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, SentimentError> {
        if config.binary_path.trim().is_empty() {
            return Err(SentimentError::Config(
                "binary_path is required for the command backend".to_string(),
            ));
        }
        if config.model_path.trim().is_empty() {
            return Err(SentimentError::Config(
                "model_path is required for the command backend".to_string(),
            ));
        }
        Ok(Self::new(
            &config.binary_path,
            vec!["--model".to_string(), config.model_path.clone()],
        ))
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl SentimentClassifier for CommandClassifier {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment, SentimentError> {
        if text.len() > MAX_COMMAND_INPUT_BYTES {
            return Err(SentimentError::Process(format!(
                "text exceeds maximum size: {} bytes (limit: {} bytes)",
                text.len(),
                MAX_COMMAND_INPUT_BYTES
            )));
        }

        let mut child = Command::new(&self.binary_path)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SentimentError::Process(format!(
                    "failed to spawn {}: {}",
                    self.binary_path.display(),
                    e
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| SentimentError::Process("failed to open stdin".to_string()))?;

        // Input is written while stdout and stderr drain, so neither pipe can fill up.
        let input = text.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&input).await;
            drop(stdin);
            result
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| SentimentError::Process(format!("failed to read output: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SentimentError::Process(format!(
                "classifier exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        writer
            .await
            .map_err(|e| SentimentError::Process(format!("stdin writer failed: {}", e)))?
            .map_err(|e| SentimentError::Process(format!("failed to write to stdin: {}", e)))?;

        ClassifierOutput::parse(&String::from_utf8_lossy(&output.stdout))
    }
}
