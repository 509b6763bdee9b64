use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    pub fn malformed(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether the request never produced a response (connect, timeout, body read).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
