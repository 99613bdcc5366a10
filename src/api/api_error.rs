use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Resource not found")]
    NotFound,
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Could not decode API response: {0}")]
    Decode(String),
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}
