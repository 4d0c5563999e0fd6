use reqwest::StatusCode;
use thiserror::Error;

pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("notify request rejected with status {status}: {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("notify request failed: {0}")]
    Http(#[from] reqwest::Error),
}
