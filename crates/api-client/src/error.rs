use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to send the HTTP request: {0}")]
    RequestBuild(#[from] reqwest::Error),

    #[error("The API request returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("The API reported an error: {code} - {description}")]
    Provider { code: String, description: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),
}

impl ApiError {
    /// Transport failures, rate limiting and server errors may succeed on a
    /// second attempt; a payload we could not understand will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::RequestBuild(_) => true,
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            ApiError::Provider { .. }
            | ApiError::Deserialization(_)
            | ApiError::InvalidData(_) => false,
        }
    }
}
