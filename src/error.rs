// Client error types

/// Failures that can occur while talking to the backend or touching
/// client-local state.
///
/// Application-level failures (wrong credentials, rejected records) are not
/// errors at this layer; they arrive as ordinary JSON bodies and are decoded
/// into the outcome types of the calling module.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedShape { endpoint: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl ClientError {
    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Network(message.into())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ClientError::InvalidJson(message.into())
    }

    pub fn unexpected_shape(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::UnexpectedShape {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ClientError::Storage(message.into())
    }

    /// Get error code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::InvalidJson(_) => "INVALID_JSON",
            ClientError::UnexpectedShape { .. } => "UNEXPECTED_RESPONSE",
            ClientError::InvalidUrl(_) => "INVALID_URL",
            ClientError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::InvalidJson(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
