/// Result type for feed API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure taxonomy of the remote feed API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No access token or user id is available.
    #[error("Please sign in first.")]
    Unauthenticated,

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status; `message` is decoded from the body.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A success response whose body could not be decoded.
    #[error("Invalid response from server: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
            || matches!(self, ApiError::Server { status: 401, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
