use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("inference request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("inference endpoint returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("classifier process error: {0}")]
    Process(String),

    #[error("unexpected classifier output: {0}")]
    InvalidOutput(String),

    #[error("invalid classifier configuration: {0}")]
    Config(String),
}
