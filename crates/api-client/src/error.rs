//! Error types for the API client

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Request timeout
    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },

    /// Backend returned a record that fails validation
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] recycling_geo::GeoError),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::Timeout(_) => true,
            Self::Config(_)
            | Self::Json(_)
            | Self::RetriesExhausted { .. }
            | Self::InvalidRecord(_) => false,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }

    /// Check if the backend reported a missing resource
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiResponse { status: 404, .. })
    }
}

impl From<ApiError> for recycling_core::Error {
    fn from(err: ApiError) -> Self {
        use recycling_core::error::ErrorCode;

        let code = match &err {
            ApiError::ApiResponse { status: 404, .. } => ErrorCode::NotFound,
            ApiError::Request(e) if e.is_connect() => ErrorCode::BackendUnreachable,
            ApiError::Config(_) => ErrorCode::ConfigError,
            ApiError::Timeout(_) => ErrorCode::Timeout,
            _ => ErrorCode::BackendError,
        };
        let suggestion = match code {
            ErrorCode::BackendUnreachable => {
                Some("Check that the backend is running and api.base_url is correct")
            }
            _ => None,
        };

        let mut converted = recycling_core::Error::new(code, err.to_string());
        if let Some(suggestion) = suggestion {
            converted = converted.with_suggestion(suggestion);
        }
        converted.with_source(err)
    }
}
